pub mod error;
pub mod factory;
pub mod schedule;
pub mod workflow;
