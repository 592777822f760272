use thiserror::Error;
use uuid::Uuid;

/// A required binding the factory found absent on a draft.
///
/// Reported in the fixed check order: study group, teacher, lesson number,
/// classroom. Subject is deliberately not on this list — a lesson without a
/// verified subject promotes and is then flagged by the qualification check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingBinding {
    #[error("the draft has no study group")]
    StudyGroup,
    #[error("the draft has no teacher")]
    Teacher,
    #[error("the draft has no lesson number")]
    LessonNumber,
    #[error("the draft has no classroom")]
    Classroom,
}

/// Recoverable failures when inserting into a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("a study group name is required")]
    MissingStudyGroupName,
    #[error("lesson number {0} is not part of this schedule")]
    UnknownLessonNumber(u32),
    #[error("occurrence {0} already exists in this schedule")]
    DuplicateOccurrence(Uuid),
}

/// Failures of the draft-editing workflow.
///
/// The not-found variants are recoverable; `ForeignSubgroup` is a caller
/// bug (a cross-aggregate mismatch), not bad user input, and should never
/// be shown as a validation message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no draft with id {0}")]
    DraftNotFound(Uuid),
    #[error("no lesson with id {0}")]
    LessonNotFound(Uuid),
    #[error("subgroup '{subgroup}' belongs to study group '{owner}', not '{group}'")]
    ForeignSubgroup {
        subgroup: String,
        owner: String,
        group: String,
    },
}
