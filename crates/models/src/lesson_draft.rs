use crate::{
    classroom::Classroom,
    lesson::Lesson,
    lesson_number::LessonNumber,
    study_group::{StudyGroup, Subgroup},
    subject::Subject,
    teacher::Teacher,
};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A partially-specified lesson.
///
/// Same shape as [`Lesson`] minus the warning classification; used whenever
/// one or more of the required bindings is still unknown. A draft and a
/// lesson sharing an id are the same logical occurrence at different
/// completeness levels, and a schedule holds one or the other, never both.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
pub struct LessonDraft {
    pub id: Uuid,
    pub subject: Option<Subject>,
    pub lesson_number: Option<LessonNumber>,
    pub teacher: Option<Teacher>,
    pub study_group: Option<StudyGroup>,
    pub subgroup: Option<Subgroup>,
    pub classroom: Option<Classroom>,
    pub comment: Option<String>,
}

impl LessonDraft {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl From<&Lesson> for LessonDraft {
    /// Downgrades a committed lesson back to draft shape, dropping the
    /// derived warning classification.
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id,
            subject: lesson.subject.clone(),
            lesson_number: lesson.lesson_number.clone(),
            teacher: lesson.teacher.clone(),
            study_group: lesson.study_group.clone(),
            subgroup: lesson.subgroup.clone(),
            classroom: lesson.classroom.clone(),
            comment: lesson.comment.clone(),
        }
    }
}

impl PartialEq for LessonDraft {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for LessonDraft {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_draft_from_lesson_keeps_every_binding() {
        let mut lesson = Lesson::new(Uuid::new_v4());
        lesson.subject = Some(Subject::new("Math"));
        lesson.lesson_number = LessonNumber::new(1);
        lesson.classroom = Some(Classroom::new("101", None));
        lesson.comment = Some("moved from Friday".to_string());

        let draft = LessonDraft::from(&lesson);
        assert_eq!(draft.id, lesson.id);
        assert_eq!(draft.subject, lesson.subject);
        assert_eq!(draft.lesson_number, lesson.lesson_number);
        assert_eq!(draft.classroom, lesson.classroom);
        assert_eq!(draft.comment, lesson.comment);
        assert!(draft.teacher.is_none());
    }
}
