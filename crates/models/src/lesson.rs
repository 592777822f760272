use crate::{
    classroom::Classroom,
    lesson_number::LessonNumber,
    study_group::{StudyGroup, Subgroup},
    subject::Subject,
    teacher::Teacher,
};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Classification of the most severe issue found for a lesson.
///
/// Exactly one value is stored per lesson; the two `Warning` sources
/// (teacher double-booked, teacher not qualified for the subject) and the
/// `Conflict` source (teacher or classroom missing entirely) collapse into
/// a single stored value with last-write-wins semantics.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum WarningType {
    /// No detected issue
    #[default]
    Normal,
    /// Teacher double-booked or teaching outside their subject list
    Warning,
    /// Teacher or classroom binding missing, the lesson cannot be taught
    Conflict,
}

/// One committed occurrence of a taught lesson.
///
/// The relational fields are nullable to tolerate partial data from legacy
/// paths, but a lesson meant to be conflict-checked carries at least a
/// period and a study group. Equality goes by `id`.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub subject: Option<Subject>,
    pub lesson_number: Option<LessonNumber>,
    pub teacher: Option<Teacher>,
    pub study_group: Option<StudyGroup>,
    pub subgroup: Option<Subgroup>,
    pub classroom: Option<Classroom>,
    pub comment: Option<String>,
    warning: WarningType,
}

impl Lesson {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            subject: None,
            lesson_number: None,
            teacher: None,
            study_group: None,
            subgroup: None,
            classroom: None,
            comment: None,
            warning: WarningType::Normal,
        }
    }

    pub fn warning(&self) -> WarningType {
        self.warning
    }

    /// Derived classification, written only by the schedule's conflict pass.
    pub fn set_warning(&mut self, warning: WarningType) {
        self.warning = warning;
    }
}

impl PartialEq for Lesson {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Lesson {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_lessons_compare_by_id() {
        let id = Uuid::new_v4();
        let a = Lesson::new(id);
        let mut b = Lesson::new(id);
        b.subject = Some(Subject::new("Math"));
        b.set_warning(WarningType::Conflict);

        assert_eq!(a, b);
        assert_ne!(a, Lesson::new(Uuid::new_v4()));
    }

    #[test]
    fn test_warning_type_round_trips_as_string() {
        assert_eq!(WarningType::Warning.to_string(), "Warning");
        assert_eq!(
            WarningType::from_str("Conflict").unwrap(),
            WarningType::Conflict
        );
        assert!(WarningType::from_str("Severe").is_err());
    }
}
