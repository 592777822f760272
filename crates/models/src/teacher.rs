use crate::{study_group::StudyGroup, subject::Subject};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A teacher with the subjects they are qualified for and the groups they
/// are assigned to.
///
/// Teachers are entities: equality and hashing go by `id` only, so a renamed
/// teacher is still the same teacher.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub description: Option<String>,
    pub subjects: Vec<Subject>,
    pub groups: Vec<StudyGroup>,
}

impl Teacher {
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        surname: impl Into<String>,
        patronymic: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            patronymic: patronymic.into(),
            description: None,
            subjects: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Replaces every mutable field wholesale.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        surname: impl Into<String>,
        patronymic: impl Into<String>,
        description: Option<String>,
        subjects: Vec<Subject>,
        groups: Vec<StudyGroup>,
    ) {
        self.name = name.into();
        self.surname = surname.into();
        self.patronymic = patronymic.into();
        self.description = description;
        self.subjects = subjects;
        self.groups = groups;
    }

    pub fn teaches(&self, subject: &Subject) -> bool {
        self.subjects.contains(subject)
    }

    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.surname, self.name, self.patronymic)
    }
}

impl PartialEq for Teacher {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Teacher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_teachers_compare_by_id() {
        let id = Uuid::new_v4();
        let a = Teacher::new(id, "Anna", "Ivanova", "Petrovna");
        let mut b = a.clone();
        b.update(
            "Anna",
            "Sidorova",
            "Petrovna",
            Some("married name".to_string()),
            vec![Subject::new("Math")],
            vec![],
        );

        assert_eq!(a, b);
        assert_ne!(a, Teacher::new(Uuid::new_v4(), "Anna", "Ivanova", "Petrovna"));
    }

    #[test]
    fn test_teaches_goes_by_subject_value() {
        let mut teacher = Teacher::new(Uuid::new_v4(), "Ivan", "Petrov", "Sergeevich");
        teacher.subjects = vec![Subject::new("Physics")];

        assert!(teacher.teaches(&Subject::new("Physics")));
        assert!(!teacher.teaches(&Subject::new("Math")));
    }
}
