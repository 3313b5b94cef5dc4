//! Persistence entities.

use time::Date;
use uuid::Uuid;

/// An author as stored by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub main_category: String,
}

impl Author {
    /// Build an author with a freshly generated identifier.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: Date,
        main_category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            main_category: main_category.into(),
        }
    }
}

/// A course as stored by the repository.
///
/// `author_id` is owned by the repository: it is set by
/// [`CourseLibraryRepository::add_course`](crate::CourseLibraryRepository::add_course)
/// and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

impl Course {
    /// Build an unattached course with a freshly generated identifier.
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            author_id: Uuid::nil(),
            title: title.into(),
            description,
        }
    }
}
