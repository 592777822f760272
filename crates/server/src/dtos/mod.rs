pub mod occurrence;
pub mod schedule;
pub mod teacher;
