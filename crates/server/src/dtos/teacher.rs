use models::teacher::Teacher;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TeacherRequest {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub description: Option<String>,
    /// Subject names, created on demand
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Study group names, created on demand
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub full_name: String,
    pub description: Option<String>,
    pub subjects: Vec<String>,
    pub groups: Vec<String>,
}

impl TeacherResponse {
    pub fn from_teacher(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            name: teacher.name.clone(),
            surname: teacher.surname.clone(),
            patronymic: teacher.patronymic.clone(),
            full_name: teacher.full_name(),
            description: teacher.description.clone(),
            subjects: teacher.subjects.iter().map(|s| s.name.clone()).collect(),
            groups: teacher.groups.iter().map(|g| g.name.clone()).collect(),
        }
    }
}
