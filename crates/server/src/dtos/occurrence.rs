use models::{lesson::Lesson, lesson_draft::LessonDraft};
use scheduling::workflow::EditOutcome;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherBrief {
    pub id: Uuid,
    pub full_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonResponse {
    pub id: Uuid,
    pub subject: Option<String>,
    pub period: Option<u32>,
    pub teacher: Option<TeacherBrief>,
    pub study_group: Option<String>,
    pub subgroup: Option<String>,
    pub classroom: Option<String>,
    pub comment: Option<String>,
    pub warning: String,
}

impl LessonResponse {
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id,
            subject: lesson.subject.as_ref().map(|s| s.name.clone()),
            period: lesson.lesson_number.as_ref().map(|n| n.number),
            teacher: lesson.teacher.as_ref().map(|t| TeacherBrief {
                id: t.id,
                full_name: t.full_name(),
            }),
            study_group: lesson.study_group.as_ref().map(|g| g.name.clone()),
            subgroup: lesson.subgroup.as_ref().map(|s| s.name.clone()),
            classroom: lesson.classroom.as_ref().map(|c| c.name.clone()),
            comment: lesson.comment.clone(),
            warning: lesson.warning().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DraftResponse {
    pub id: Uuid,
    pub subject: Option<String>,
    pub period: Option<u32>,
    pub teacher: Option<TeacherBrief>,
    pub study_group: Option<String>,
    pub subgroup: Option<String>,
    pub classroom: Option<String>,
    pub comment: Option<String>,
}

impl DraftResponse {
    pub fn from_draft(draft: &LessonDraft) -> Self {
        Self {
            id: draft.id,
            subject: draft.subject.as_ref().map(|s| s.name.clone()),
            period: draft.lesson_number.as_ref().map(|n| n.number),
            teacher: draft.teacher.as_ref().map(|t| TeacherBrief {
                id: t.id,
                full_name: t.full_name(),
            }),
            study_group: draft.study_group.as_ref().map(|g| g.name.clone()),
            subgroup: draft.subgroup.as_ref().map(|s| s.name.clone()),
            classroom: draft.classroom.as_ref().map(|c| c.name.clone()),
            comment: draft.comment.clone(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddLessonRequest {
    /// Generated when omitted
    pub id: Option<Uuid>,
    pub subject: Option<String>,
    pub period: u32,
    pub teacher_id: Option<Uuid>,
    pub study_group: Option<String>,
    pub subgroup: Option<String>,
    pub classroom: Option<String>,
    pub classroom_description: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateDraftRequest {
    /// Generated when omitted
    pub id: Option<Uuid>,
    pub subject: Option<String>,
    pub period: Option<u32>,
    pub teacher_id: Option<Uuid>,
    pub study_group: Option<String>,
    pub subgroup: Option<String>,
    pub classroom: Option<String>,
    pub classroom_description: Option<String>,
    pub comment: Option<String>,
}

/// Field edits for a lesson or draft. Omitted fields are left as-is;
/// listing a field name under `clear` unsets it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EditOccurrenceRequest {
    pub subject: Option<String>,
    pub period: Option<u32>,
    pub teacher_id: Option<Uuid>,
    pub study_group: Option<String>,
    pub subgroup: Option<String>,
    pub classroom: Option<String>,
    pub classroom_description: Option<String>,
    pub comment: Option<String>,

    /// Any of: subject, period, teacher, study_group, subgroup, classroom,
    /// comment
    #[serde(default)]
    pub clear: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EditOutcomeResponse {
    /// The occurrence is a full, conflict-evaluated lesson
    Committed { lesson: LessonResponse },
    /// The occurrence remains a draft; `missing` names the first gap
    StillDraft {
        draft: DraftResponse,
        missing: String,
    },
}

impl EditOutcomeResponse {
    pub fn from_outcome(outcome: &EditOutcome) -> Self {
        match outcome {
            EditOutcome::Committed(lesson) => Self::Committed {
                lesson: LessonResponse::from_lesson(lesson),
            },
            EditOutcome::StillDraft { draft, missing } => Self::StillDraft {
                draft: DraftResponse::from_draft(draft),
                missing: missing.to_string(),
            },
        }
    }
}
