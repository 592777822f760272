use crate::{
    contracts::{CatalogStore, ScheduleStore, ScheduleSummary},
    error::StoreError,
};
use models::{classroom::Classroom, study_group::StudyGroup, subject::Subject, teacher::Teacher};
use scheduling::schedule::Schedule;
use std::collections::HashMap;
use uuid::Uuid;

/// In-process implementation of the persistence contracts.
///
/// Backs the server and the tests; a database-backed store would implement
/// the same traits. Named value entities are cached by name so that every
/// reference to e.g. classroom "101" resolves to the same value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    schedules: HashMap<Uuid, Schedule>,
    teachers: HashMap<Uuid, Teacher>,
    subjects: HashMap<String, Subject>,
    classrooms: HashMap<String, Classroom>,
    study_groups: HashMap<String, StudyGroup>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStore for MemoryStore {
    fn load_schedule(&self, id: Uuid) -> Result<Schedule, StoreError> {
        self.schedules
            .get(&id)
            .cloned()
            .ok_or(StoreError::ScheduleNotFound(id))
    }

    fn list_schedules(&self) -> Vec<ScheduleSummary> {
        let mut summaries: Vec<ScheduleSummary> = self
            .schedules
            .values()
            .map(|s| ScheduleSummary {
                id: s.id(),
                name: s.name().to_string(),
                lessons: s.lessons().len(),
                drafts: s.drafts().len(),
            })
            .collect();

        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    fn persist_schedule(&mut self, schedule: Schedule) {
        self.schedules.insert(schedule.id(), schedule);
    }

    fn delete_schedule(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.schedules
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::ScheduleNotFound(id))
    }
}

impl CatalogStore for MemoryStore {
    fn teacher(&self, id: Uuid) -> Result<Teacher, StoreError> {
        self.teachers
            .get(&id)
            .cloned()
            .ok_or(StoreError::TeacherNotFound(id))
    }

    fn teachers(&self) -> Vec<Teacher> {
        let mut teachers: Vec<Teacher> = self.teachers.values().cloned().collect();
        teachers.sort_by(|a, b| a.full_name().cmp(&b.full_name()));
        teachers
    }

    fn save_teacher(&mut self, teacher: Teacher) {
        self.teachers.insert(teacher.id, teacher);
    }

    fn subject_by_name(&mut self, name: &str) -> Subject {
        self.subjects
            .entry(name.to_string())
            .or_insert_with(|| Subject::new(name))
            .clone()
    }

    fn classroom_by_name(&mut self, name: &str, description: Option<&str>) -> Classroom {
        self.classrooms
            .entry(name.to_string())
            .or_insert_with(|| Classroom::new(name, description.map(str::to_string)))
            .clone()
    }

    fn study_group_by_name(&mut self, name: &str) -> StudyGroup {
        self.study_groups
            .entry(name.to_string())
            .or_insert_with(|| StudyGroup::new(name))
            .clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use models::lesson_number::LessonNumber;

    #[test]
    fn test_schedule_round_trip() {
        let mut store = MemoryStore::new();
        let id = Uuid::new_v4();
        let numbers = (1..=4).filter_map(LessonNumber::new).collect();
        store.persist_schedule(Schedule::new(id, "fall", numbers));

        let loaded = store.load_schedule(id).unwrap();
        assert_eq!(loaded.id(), id);
        assert_eq!(loaded.name(), "fall");
        assert_eq!(loaded.lesson_numbers().len(), 4);

        store.delete_schedule(id).unwrap();
        assert_eq!(
            store.load_schedule(id).unwrap_err(),
            StoreError::ScheduleNotFound(id)
        );
    }

    #[test]
    fn test_named_values_created_on_demand_and_reused() {
        let mut store = MemoryStore::new();

        let first = store.classroom_by_name("101", Some("physics lab"));
        let second = store.classroom_by_name("101", None);

        // The stored value wins over later divergent descriptions.
        assert_eq!(first, second);
        assert_eq!(second.description.as_deref(), Some("physics lab"));

        assert_eq!(store.subject_by_name("Math"), store.subject_by_name("Math"));
    }

    #[test]
    fn test_unknown_teacher_is_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert_eq!(store.teacher(id).unwrap_err(), StoreError::TeacherNotFound(id));
    }
}
