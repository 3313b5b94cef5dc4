use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Course as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDto {
    /// Unique identifier for the course
    pub id: Uuid,
    /// Author owning the course
    pub author_id: Uuid,
    /// Title of the course
    pub title: String,
    /// Optional long-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request model for creating a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseForCreation {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request model for updating a course. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseForUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Author as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: Uuid,
    /// First and last name joined by a space
    pub name: String,
    /// Age in whole years
    pub age: i32,
    pub main_category: String,
}

/// `page_number`/`page_size` query parameters shared by list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page_number: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
}
