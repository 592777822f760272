use thiserror::Error;
use uuid::Uuid;

/// Recoverable persistence failures; callers decide whether to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("schedule {0} not found")]
    ScheduleNotFound(Uuid),
    #[error("teacher {0} not found")]
    TeacherNotFound(Uuid),
}
