pub mod contracts;
pub mod error;
pub mod memory;
