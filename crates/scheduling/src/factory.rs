use crate::error::MissingBinding;
use models::{lesson::Lesson, lesson_draft::LessonDraft};

/// Builds full lessons out of drafts whose required bindings are complete.
pub struct LessonFactory;

impl LessonFactory {
    /// Promotes a draft into a lesson, or reports the first missing binding
    /// in the fixed order study group, teacher, lesson number, classroom.
    ///
    /// The subject is not checked; an unsubjected lesson promotes and is
    /// then flagged by the schedule's qualification check. The returned
    /// lesson carries no classification yet — feeding it through the
    /// schedule's conflict pass is the caller's job.
    pub fn create_from_draft(draft: &LessonDraft) -> Result<Lesson, MissingBinding> {
        let study_group = draft
            .study_group
            .clone()
            .ok_or(MissingBinding::StudyGroup)?;
        let teacher = draft.teacher.clone().ok_or(MissingBinding::Teacher)?;
        let lesson_number = draft
            .lesson_number
            .clone()
            .ok_or(MissingBinding::LessonNumber)?;
        let classroom = draft.classroom.clone().ok_or(MissingBinding::Classroom)?;

        let mut lesson = Lesson::new(draft.id);
        lesson.subject = draft.subject.clone();
        lesson.lesson_number = Some(lesson_number);
        lesson.teacher = Some(teacher);
        lesson.study_group = Some(study_group);
        lesson.subgroup = draft.subgroup.clone();
        lesson.classroom = Some(classroom);
        lesson.comment = draft.comment.clone();

        Ok(lesson)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use models::{
        classroom::Classroom, lesson_number::LessonNumber, study_group::StudyGroup,
        subject::Subject, teacher::Teacher,
    };
    use uuid::Uuid;

    fn complete_draft() -> LessonDraft {
        let mut draft = LessonDraft::new(Uuid::new_v4());
        draft.subject = Some(Subject::new("Math"));
        draft.lesson_number = LessonNumber::new(1);
        draft.teacher = Some(Teacher::new(Uuid::new_v4(), "Anna", "Ivanova", "Petrovna"));
        draft.study_group = Some(StudyGroup::new("10-A"));
        draft.classroom = Some(Classroom::new("101", None));
        draft.comment = Some("double period".to_string());
        draft
    }

    #[test]
    fn test_complete_draft_promotes_with_fields_carried_over() {
        let draft = complete_draft();
        let lesson = LessonFactory::create_from_draft(&draft).unwrap();

        assert_eq!(lesson.id, draft.id);
        assert_eq!(lesson.subject, draft.subject);
        assert_eq!(lesson.lesson_number, draft.lesson_number);
        assert_eq!(lesson.teacher, draft.teacher);
        assert_eq!(lesson.study_group, draft.study_group);
        assert_eq!(lesson.classroom, draft.classroom);
        assert_eq!(lesson.comment, draft.comment);
    }

    #[test]
    fn test_missing_bindings_reported_in_fixed_order() {
        let mut draft = complete_draft();
        draft.study_group = None;
        draft.teacher = None;
        assert_eq!(
            LessonFactory::create_from_draft(&draft),
            Err(MissingBinding::StudyGroup)
        );

        let mut draft = complete_draft();
        draft.teacher = None;
        draft.classroom = None;
        assert_eq!(
            LessonFactory::create_from_draft(&draft),
            Err(MissingBinding::Teacher)
        );

        let mut draft = complete_draft();
        draft.lesson_number = None;
        assert_eq!(
            LessonFactory::create_from_draft(&draft),
            Err(MissingBinding::LessonNumber)
        );

        let mut draft = complete_draft();
        draft.classroom = None;
        assert_eq!(
            LessonFactory::create_from_draft(&draft),
            Err(MissingBinding::Classroom)
        );
    }

    #[test]
    fn test_subject_is_not_required() {
        let mut draft = complete_draft();
        draft.subject = None;

        let lesson = LessonFactory::create_from_draft(&draft).unwrap();
        assert!(lesson.subject.is_none());
    }
}
