use crate::dtos::occurrence::{DraftResponse, LessonResponse};
use scheduling::schedule::Schedule;
use serde::{Deserialize, Serialize};
use store::contracts::ScheduleSummary;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateScheduleRequest {
    pub name: String,
    pub periods: Vec<PeriodRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PeriodRequest {
    /// 1-based period number
    pub number: u32,
    /// 12-hour format with AM/PM, e.g. "08:30AM"
    pub begin: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleSummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub lessons: usize,
    pub drafts: usize,
}

impl ScheduleSummaryResponse {
    pub fn from_summary(summary: &ScheduleSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name.clone(),
            lessons: summary.lessons,
            drafts: summary.drafts,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonNumberResponse {
    pub number: u32,
    pub time: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub name: String,
    pub lesson_numbers: Vec<LessonNumberResponse>,
    pub lessons: Vec<LessonResponse>,
    pub drafts: Vec<DraftResponse>,
}

impl ScheduleResponse {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id(),
            name: schedule.name().to_string(),
            lesson_numbers: schedule
                .lesson_numbers()
                .iter()
                .map(|n| LessonNumberResponse {
                    number: n.number,
                    time: n.time.map(|t| t.to_string()),
                })
                .collect(),
            lessons: schedule
                .lessons()
                .iter()
                .map(LessonResponse::from_lesson)
                .collect(),
            drafts: schedule
                .drafts()
                .iter()
                .map(DraftResponse::from_draft)
                .collect(),
        }
    }
}

/// One column of the timetable grid
#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableColumn {
    pub study_group: String,
    pub subgroup: Option<String>,
}

/// One period row of the timetable grid; `cells` aligns with the columns
#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableRow {
    pub period: u32,
    pub cells: Vec<Option<LessonResponse>>,
}

/// Sparse `{period x (group, subgroup)}` projection of the committed
/// lessons, as consumed by document export
#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableResponse {
    pub columns: Vec<TimetableColumn>,
    pub rows: Vec<TimetableRow>,
}

impl TimetableResponse {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let columns = schedule.columns();

        let rows = schedule
            .lesson_numbers()
            .iter()
            .map(|number| TimetableRow {
                period: number.number,
                cells: columns
                    .iter()
                    .map(|(group, subgroup)| {
                        schedule
                            .lesson_at(number.number, group, subgroup.as_deref())
                            .map(LessonResponse::from_lesson)
                    })
                    .collect(),
            })
            .collect();

        Self {
            columns: columns
                .into_iter()
                .map(|(study_group, subgroup)| TimetableColumn {
                    study_group,
                    subgroup,
                })
                .collect(),
            rows,
        }
    }
}
