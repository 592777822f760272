pub mod classroom;
pub mod lesson;
pub mod lesson_draft;
pub mod lesson_number;
pub mod study_group;
pub mod subject;
pub mod teacher;
