use crate::error::StoreError;
use models::{classroom::Classroom, study_group::StudyGroup, subject::Subject, teacher::Teacher};
use scheduling::schedule::Schedule;
use uuid::Uuid;

/// One line of the schedule listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSummary {
    pub id: Uuid,
    pub name: String,
    pub lessons: usize,
    pub drafts: usize,
}

/// Load/persist contract for schedule aggregates.
///
/// The scheduling core never persists anything itself: it hands mutated
/// aggregates back and the caller writes them through this trait. `load`
/// returns a fully hydrated schedule with its lesson, draft and
/// lesson-number sets.
pub trait ScheduleStore {
    fn load_schedule(&self, id: Uuid) -> Result<Schedule, StoreError>;
    fn list_schedules(&self) -> Vec<ScheduleSummary>;
    fn persist_schedule(&mut self, schedule: Schedule);
    fn delete_schedule(&mut self, id: Uuid) -> Result<(), StoreError>;
}

/// Lookup contract for the value catalog and the teacher roster.
///
/// Subjects, classrooms and study groups are values created on demand when
/// first referenced by name, so their lookups cannot fail; teachers carry
/// identity and must already exist.
pub trait CatalogStore {
    fn teacher(&self, id: Uuid) -> Result<Teacher, StoreError>;
    fn teachers(&self) -> Vec<Teacher>;
    fn save_teacher(&mut self, teacher: Teacher);

    fn subject_by_name(&mut self, name: &str) -> Subject;
    fn classroom_by_name(&mut self, name: &str, description: Option<&str>) -> Classroom;
    fn study_group_by_name(&mut self, name: &str) -> StudyGroup;
}
