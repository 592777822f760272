use crate::{
    error::{EditError, MissingBinding},
    factory::LessonFactory,
    schedule::Schedule,
};
use log::info;
use models::{
    classroom::Classroom,
    lesson::Lesson,
    lesson_draft::LessonDraft,
    lesson_number::LessonNumber,
    study_group::{StudyGroup, Subgroup},
    subject::Subject,
    teacher::Teacher,
};
use uuid::Uuid;

/// Tri-state edit of one optional field: leave as-is, unset, or overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Change<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Change<T> {
    fn apply(self, slot: &mut Option<T>) {
        match self {
            Change::Keep => {}
            Change::Clear => *slot = None,
            Change::Set(value) => *slot = Some(value),
        }
    }
}

/// Field edits for one occurrence, draft or committed.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceChanges {
    pub subject: Change<Subject>,
    pub lesson_number: Change<LessonNumber>,
    pub teacher: Change<Teacher>,
    pub study_group: Change<StudyGroup>,
    pub subgroup: Change<Subgroup>,
    pub classroom: Change<Classroom>,
    pub comment: Change<String>,
}

/// Where an occurrence ended up after an edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The occurrence is (or became) a full lesson, conflict-evaluated.
    Committed(Lesson),
    /// The occurrence remains a draft; `missing` is the factory's reason.
    StillDraft {
        draft: LessonDraft,
        missing: MissingBinding,
    },
}

/// Applies edits to a draft and promotes it when the result is complete.
///
/// An edit that leaves the draft incomplete is not an error: the draft is
/// updated in place and returned as `StillDraft` together with the first
/// missing binding. Drafts are never conflict-checked; classification
/// happens only once the occurrence is committed.
pub fn edit_draft(
    schedule: &mut Schedule,
    draft_id: Uuid,
    changes: OccurrenceChanges,
) -> Result<EditOutcome, EditError> {
    let idx = schedule
        .drafts
        .iter()
        .position(|d| d.id == draft_id)
        .ok_or(EditError::DraftNotFound(draft_id))?;

    let mut updated = schedule.drafts[idx].clone();
    apply_changes(&mut updated, changes)?;

    match LessonFactory::create_from_draft(&updated) {
        Ok(lesson) => {
            info!("draft {draft_id} complete, promoting to a full lesson");
            schedule.drafts.remove(idx);
            Ok(EditOutcome::Committed(schedule.commit(lesson).clone()))
        }
        Err(missing) => {
            schedule.drafts[idx] = updated.clone();
            Ok(EditOutcome::StillDraft {
                draft: updated,
                missing,
            })
        }
    }
}

/// Applies edits to a committed lesson.
///
/// If the result still carries every required binding the lesson stays
/// committed and the whole set is re-scanned (an edit can create or
/// dissolve collisions anywhere). If the edit removed a required binding
/// the occurrence is downgraded: the lesson leaves the committed set and a
/// draft with the same id takes its place.
pub fn edit_lesson(
    schedule: &mut Schedule,
    lesson_id: Uuid,
    changes: OccurrenceChanges,
) -> Result<EditOutcome, EditError> {
    let idx = schedule
        .lessons
        .iter()
        .position(|l| l.id == lesson_id)
        .ok_or(EditError::LessonNotFound(lesson_id))?;

    let mut working = LessonDraft::from(&schedule.lessons[idx]);
    apply_changes(&mut working, changes)?;

    match LessonFactory::create_from_draft(&working) {
        Ok(lesson) => {
            schedule.lessons[idx] = lesson;
            schedule.refresh_warnings();
            Ok(EditOutcome::Committed(schedule.lessons[idx].clone()))
        }
        Err(missing) => {
            info!("lesson {lesson_id} lost a required binding, downgrading to draft");
            schedule.lessons.remove(idx);
            schedule.drafts.push(working.clone());
            schedule.refresh_warnings();
            Ok(EditOutcome::StillDraft {
                draft: working,
                missing,
            })
        }
    }
}

/// Applies the field edits, then checks the cross-aggregate invariant: a
/// subgroup must belong to the occurrence's study group. A mismatch is a
/// caller bug and aborts the edit before anything is persisted.
fn apply_changes(draft: &mut LessonDraft, changes: OccurrenceChanges) -> Result<(), EditError> {
    changes.subject.apply(&mut draft.subject);
    changes.lesson_number.apply(&mut draft.lesson_number);
    changes.teacher.apply(&mut draft.teacher);
    changes.study_group.apply(&mut draft.study_group);
    changes.subgroup.apply(&mut draft.subgroup);
    changes.classroom.apply(&mut draft.classroom);
    changes.comment.apply(&mut draft.comment);

    if let Some(subgroup) = &draft.subgroup {
        let group_name = draft.study_group.as_ref().map(|g| g.name.as_str());
        if group_name != Some(subgroup.group_name.as_str()) {
            return Err(EditError::ForeignSubgroup {
                subgroup: subgroup.name.clone(),
                owner: subgroup.group_name.clone(),
                group: group_name.unwrap_or("(none)").to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use models::lesson::WarningType;

    fn schedule_with_periods() -> Schedule {
        let numbers = (1..=8).filter_map(LessonNumber::new).collect();
        Schedule::new(Uuid::new_v4(), "fall", numbers)
    }

    fn math_teacher() -> Teacher {
        let mut teacher = Teacher::new(Uuid::new_v4(), "Anna", "Ivanova", "Petrovna");
        teacher.subjects = vec![Subject::new("Math")];
        teacher
    }

    fn draft_missing_classroom(teacher: &Teacher) -> LessonDraft {
        let mut draft = LessonDraft::new(Uuid::new_v4());
        draft.subject = Some(Subject::new("Math"));
        draft.lesson_number = LessonNumber::new(1);
        draft.teacher = Some(teacher.clone());
        draft.study_group = Some(StudyGroup::new("10-A"));
        draft
    }

    #[test]
    fn test_supplying_last_binding_promotes_and_classifies() {
        let mut schedule = schedule_with_periods();
        let teacher = math_teacher();
        let draft = draft_missing_classroom(&teacher);
        let draft_id = draft.id;
        schedule.add_draft(draft).unwrap();

        let changes = OccurrenceChanges {
            classroom: Change::Set(Classroom::new("101", None)),
            ..OccurrenceChanges::default()
        };
        let outcome = edit_draft(&mut schedule, draft_id, changes).unwrap();

        match outcome {
            EditOutcome::Committed(lesson) => {
                assert_eq!(lesson.id, draft_id);
                assert_eq!(lesson.warning(), WarningType::Normal);
            }
            other => panic!("expected a committed lesson, got {other:?}"),
        }
        assert!(schedule.draft(draft_id).is_none());
        assert!(schedule.lesson(draft_id).is_some());
    }

    #[test]
    fn test_promoted_lesson_is_evaluated_against_existing_peers() {
        let mut schedule = schedule_with_periods();
        let teacher = math_teacher();

        let peer = crate::schedule::NewLesson {
            id: Uuid::new_v4(),
            subject_name: Some("Math".to_string()),
            period: 1,
            teacher: Some(teacher.clone()),
            study_group_name: Some("10-B".to_string()),
            classroom_name: Some("101".to_string()),
            ..Default::default()
        };
        let peer_id = schedule.add_lesson(peer).unwrap().id;

        let draft = draft_missing_classroom(&teacher);
        let draft_id = draft.id;
        schedule.add_draft(draft).unwrap();

        let changes = OccurrenceChanges {
            classroom: Change::Set(Classroom::new("101", None)),
            ..OccurrenceChanges::default()
        };
        let outcome = edit_draft(&mut schedule, draft_id, changes).unwrap();

        // Same teacher, same room, same period: both sides flagged.
        assert!(
            matches!(outcome, EditOutcome::Committed(l) if l.warning() == WarningType::Warning)
        );
        assert_eq!(
            schedule.lesson(peer_id).unwrap().warning(),
            WarningType::Warning
        );
    }

    #[test]
    fn test_incomplete_edit_stays_draft_and_names_the_gap() {
        let mut schedule = schedule_with_periods();
        let teacher = math_teacher();
        let draft = draft_missing_classroom(&teacher);
        let draft_id = draft.id;
        schedule.add_draft(draft).unwrap();

        let changes = OccurrenceChanges {
            comment: Change::Set("waiting for a room".to_string()),
            ..OccurrenceChanges::default()
        };
        let outcome = edit_draft(&mut schedule, draft_id, changes).unwrap();

        match outcome {
            EditOutcome::StillDraft { draft, missing } => {
                assert_eq!(missing, MissingBinding::Classroom);
                assert_eq!(draft.comment.as_deref(), Some("waiting for a room"));
            }
            other => panic!("expected the occurrence to stay a draft, got {other:?}"),
        }
        // The applied fields were persisted on the stored draft.
        assert_eq!(
            schedule.draft(draft_id).unwrap().comment.as_deref(),
            Some("waiting for a room")
        );
    }

    #[test]
    fn test_clearing_a_required_binding_downgrades_a_lesson() {
        let mut schedule = schedule_with_periods();
        let teacher = math_teacher();

        let new = crate::schedule::NewLesson {
            id: Uuid::new_v4(),
            subject_name: Some("Math".to_string()),
            period: 1,
            teacher: Some(teacher),
            study_group_name: Some("10-A".to_string()),
            classroom_name: Some("101".to_string()),
            ..Default::default()
        };
        let lesson_id = schedule.add_lesson(new).unwrap().id;

        let changes = OccurrenceChanges {
            classroom: Change::Clear,
            ..OccurrenceChanges::default()
        };
        let outcome = edit_lesson(&mut schedule, lesson_id, changes).unwrap();

        assert!(matches!(
            outcome,
            EditOutcome::StillDraft {
                missing: MissingBinding::Classroom,
                ..
            }
        ));
        assert!(schedule.lesson(lesson_id).is_none());
        assert!(schedule.draft(lesson_id).is_some());
    }

    #[test]
    fn test_committed_edit_rescans_the_whole_set() {
        let mut schedule = schedule_with_periods();
        let teacher = math_teacher();

        let make = |group: &str, room: &str| crate::schedule::NewLesson {
            id: Uuid::new_v4(),
            subject_name: Some("Math".to_string()),
            period: 1,
            teacher: Some(teacher.clone()),
            study_group_name: Some(group.to_string()),
            classroom_name: Some(room.to_string()),
            ..Default::default()
        };
        let first = schedule.add_lesson(make("10-A", "101")).unwrap().id;
        let second = schedule.add_lesson(make("10-B", "101")).unwrap().id;
        assert_eq!(schedule.lesson(first).unwrap().warning(), WarningType::Warning);

        // Moving the second lesson to another room dissolves the collision
        // on both sides.
        let changes = OccurrenceChanges {
            classroom: Change::Set(Classroom::new("202", None)),
            ..OccurrenceChanges::default()
        };
        let outcome = edit_lesson(&mut schedule, second, changes).unwrap();

        assert!(
            matches!(outcome, EditOutcome::Committed(l) if l.warning() == WarningType::Normal)
        );
        assert_eq!(schedule.lesson(first).unwrap().warning(), WarningType::Normal);
    }

    #[test]
    fn test_foreign_subgroup_is_a_hard_error() {
        let mut schedule = schedule_with_periods();
        let teacher = math_teacher();
        let draft = draft_missing_classroom(&teacher);
        let draft_id = draft.id;
        schedule.add_draft(draft.clone()).unwrap();

        let changes = OccurrenceChanges {
            subgroup: Change::Set(Subgroup::new("english", "10-B")),
            ..OccurrenceChanges::default()
        };
        let err = edit_draft(&mut schedule, draft_id, changes).unwrap_err();

        assert_eq!(
            err,
            EditError::ForeignSubgroup {
                subgroup: "english".to_string(),
                owner: "10-B".to_string(),
                group: "10-A".to_string(),
            }
        );
        // The failed edit left the stored draft untouched.
        assert_eq!(schedule.draft(draft_id).unwrap().subgroup, None);
    }

    #[test]
    fn test_subgroup_together_with_its_group_is_accepted() {
        let mut schedule = schedule_with_periods();
        let teacher = math_teacher();
        let draft = draft_missing_classroom(&teacher);
        let draft_id = draft.id;
        schedule.add_draft(draft).unwrap();

        let mut group = StudyGroup::new("10-B");
        let subgroup = group.add_subgroup("english").unwrap().clone();

        let changes = OccurrenceChanges {
            study_group: Change::Set(group),
            subgroup: Change::Set(subgroup),
            ..OccurrenceChanges::default()
        };
        let outcome = edit_draft(&mut schedule, draft_id, changes).unwrap();

        assert!(matches!(
            outcome,
            EditOutcome::StillDraft {
                missing: MissingBinding::Classroom,
                ..
            }
        ));
    }

    #[test]
    fn test_editing_an_absent_occurrence_is_not_found() {
        let mut schedule = schedule_with_periods();
        let id = Uuid::new_v4();

        assert_eq!(
            edit_draft(&mut schedule, id, OccurrenceChanges::default()),
            Err(EditError::DraftNotFound(id))
        );
        assert_eq!(
            edit_lesson(&mut schedule, id, OccurrenceChanges::default()),
            Err(EditError::LessonNotFound(id))
        );
    }
}
