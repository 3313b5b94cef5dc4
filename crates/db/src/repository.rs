//! Repository contract consumed by the HTTP resource handlers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Author, Course};

/// Persistence collaborator for authors and their courses.
///
/// One instance is one unit of work. Mutations are staged on it:
/// `add_course` and `update_course` only take effect once `save` commits
/// them, and `save` never commits changes staged on another instance.
#[async_trait]
pub trait CourseLibraryRepository: Send + Sync {
    /// Whether an author with this id exists.
    async fn author_exists(&self, author_id: Uuid) -> anyhow::Result<bool>;

    /// All authors, ordered by last name then first name.
    async fn get_authors(&self) -> anyhow::Result<Vec<Author>>;

    async fn get_author(&self, author_id: Uuid) -> anyhow::Result<Option<Author>>;

    /// Courses of one author, ordered by title.
    async fn get_courses(&self, author_id: Uuid) -> anyhow::Result<Vec<Course>>;

    /// A course, only if it belongs to `author_id`.
    async fn get_course(&self, author_id: Uuid, course_id: Uuid)
        -> anyhow::Result<Option<Course>>;

    /// Associate `course` with the author and stage it for insertion.
    /// Returns the entity as it will be committed.
    async fn add_course(&self, author_id: Uuid, course: Course) -> anyhow::Result<Course>;

    /// Stage the modified entity for the next commit.
    async fn update_course(&self, course: Course) -> anyhow::Result<()>;

    /// Commit all staged changes. `false` means the batch was rejected and
    /// nothing was written.
    async fn save(&self) -> anyhow::Result<bool>;
}

/// Opens a fresh unit of work, typically once per request.
pub trait RepositoryFactory: Send + Sync {
    fn open(&self) -> Box<dyn CourseLibraryRepository>;
}
