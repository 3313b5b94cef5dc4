//! In-memory unit-of-work implementation of [`CourseLibraryRepository`].

use async_trait::async_trait;
use thiserror::Error;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, RwLockReadGuard};
use uuid::Uuid;

use crate::entities::{Author, Course};
use crate::repository::{CourseLibraryRepository, RepositoryFactory};

/// Reason a staged batch could not be committed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    #[error("author {0} already exists")]
    DuplicateAuthor(Uuid),

    #[error("course {0} already exists")]
    DuplicateCourse(Uuid),

    #[error("author {0} does not exist")]
    UnknownAuthor(Uuid),

    #[error("course {0} does not exist")]
    UnknownCourse(Uuid),

    #[error("course {0} cannot be moved to another author")]
    AuthorChanged(Uuid),
}

#[derive(Debug, Clone)]
enum PendingChange {
    AddAuthor(Author),
    AddCourse(Course),
    UpdateCourse(Course),
}

#[derive(Debug, Clone, Default)]
struct Tables {
    authors: Vec<Author>,
    courses: Vec<Course>,
}

impl Tables {
    fn has_author(&self, author_id: Uuid) -> bool {
        self.authors.iter().any(|a| a.id == author_id)
    }

    fn apply(&mut self, change: PendingChange) -> Result<(), CommitError> {
        match change {
            PendingChange::AddAuthor(author) => {
                if self.has_author(author.id) {
                    return Err(CommitError::DuplicateAuthor(author.id));
                }
                self.authors.push(author);
            }
            PendingChange::AddCourse(course) => {
                if !self.has_author(course.author_id) {
                    return Err(CommitError::UnknownAuthor(course.author_id));
                }
                if self.courses.iter().any(|c| c.id == course.id) {
                    return Err(CommitError::DuplicateCourse(course.id));
                }
                self.courses.push(course);
            }
            PendingChange::UpdateCourse(course) => {
                let stored = self
                    .courses
                    .iter_mut()
                    .find(|c| c.id == course.id)
                    .ok_or(CommitError::UnknownCourse(course.id))?;
                if stored.author_id != course.author_id {
                    return Err(CommitError::AuthorChanged(course.id));
                }
                *stored = course;
            }
        }
        Ok(())
    }
}

/// Process-wide course tables, shared by every unit of work.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a unit of work with an empty change set.
    pub fn unit_of_work(&self) -> InMemoryRepository {
        InMemoryRepository {
            store: self.clone(),
            pending: Mutex::new(Vec::new()),
        }
    }
}

impl RepositoryFactory for InMemoryStore {
    fn open(&self) -> Box<dyn CourseLibraryRepository> {
        Box::new(self.unit_of_work())
    }
}

/// One unit of work over an [`InMemoryStore`].
///
/// Reads observe committed state only. Changes staged through this handle
/// are private to it and are validated as one batch on
/// [`save`](CourseLibraryRepository::save): either all land or none do.
#[derive(Debug)]
pub struct InMemoryRepository {
    store: InMemoryStore,
    pending: Mutex<Vec<PendingChange>>,
}

impl InMemoryRepository {
    /// Stage a new author for the next commit.
    pub async fn add_author(&self, author: Author) -> Author {
        self.pending
            .lock()
            .await
            .push(PendingChange::AddAuthor(author.clone()));
        author
    }

    #[cfg(test)]
    async fn pending_changes(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Validate and apply staged changes, reporting why a batch was rejected.
    pub async fn commit(&self) -> Result<usize, CommitError> {
        let changes = std::mem::take(&mut *self.pending.lock().await);
        if changes.is_empty() {
            return Ok(0);
        }

        let count = changes.len();
        let mut tables = self.store.tables.write().await;
        let mut staged = tables.clone();
        for change in changes {
            staged.apply(change)?;
        }
        *tables = staged;

        tracing::debug!(changes = count, "committed course library changes");
        Ok(count)
    }

    async fn tables(&self) -> RwLockReadGuard<'_, Tables> {
        self.store.tables.read().await
    }
}

impl Drop for InMemoryRepository {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().len();
        if pending > 0 {
            tracing::warn!(pending, "unit of work dropped with unsaved changes");
        }
    }
}

#[async_trait]
impl CourseLibraryRepository for InMemoryRepository {
    async fn author_exists(&self, author_id: Uuid) -> anyhow::Result<bool> {
        Ok(self.tables().await.has_author(author_id))
    }

    async fn get_authors(&self) -> anyhow::Result<Vec<Author>> {
        let mut authors = self.tables().await.authors.clone();
        authors.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(authors)
    }

    async fn get_author(&self, author_id: Uuid) -> anyhow::Result<Option<Author>> {
        let tables = self.tables().await;
        Ok(tables.authors.iter().find(|a| a.id == author_id).cloned())
    }

    async fn get_courses(&self, author_id: Uuid) -> anyhow::Result<Vec<Course>> {
        let tables = self.tables().await;
        let mut courses: Vec<Course> = tables
            .courses
            .iter()
            .filter(|c| c.author_id == author_id)
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(courses)
    }

    async fn get_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> anyhow::Result<Option<Course>> {
        let tables = self.tables().await;
        Ok(tables
            .courses
            .iter()
            .find(|c| c.id == course_id && c.author_id == author_id)
            .cloned())
    }

    async fn add_course(&self, author_id: Uuid, mut course: Course) -> anyhow::Result<Course> {
        course.author_id = author_id;
        self.pending
            .lock()
            .await
            .push(PendingChange::AddCourse(course.clone()));
        Ok(course)
    }

    async fn update_course(&self, course: Course) -> anyhow::Result<()> {
        self.pending
            .lock()
            .await
            .push(PendingChange::UpdateCourse(course));
        Ok(())
    }

    async fn save(&self) -> anyhow::Result<bool> {
        match self.commit().await {
            Ok(_) => Ok(true),
            Err(err) => {
                tracing::warn!(error = %err, "rejected staged course library changes");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    async fn repo_with_author() -> (InMemoryRepository, Author) {
        let repo = InMemoryStore::new().unit_of_work();
        let author = repo
            .add_author(Author::new("Ada", "Lovelace", date!(1815 - 12 - 10), "Mathematics"))
            .await;
        assert!(repo.save().await.unwrap());
        (repo, author)
    }

    #[tokio::test]
    async fn staged_course_is_invisible_until_saved() {
        let (repo, author) = repo_with_author().await;

        let course = repo
            .add_course(author.id, Course::new("Analytical Engines", None))
            .await
            .unwrap();
        assert_eq!(course.author_id, author.id);
        assert_eq!(repo.pending_changes().await, 1);
        assert!(repo.get_course(author.id, course.id).await.unwrap().is_none());

        assert!(repo.save().await.unwrap());
        assert_eq!(repo.pending_changes().await, 0);
        assert_eq!(
            repo.get_course(author.id, course.id).await.unwrap(),
            Some(course)
        );
    }

    #[tokio::test]
    async fn get_course_requires_matching_author() {
        let (repo, author) = repo_with_author().await;
        let other = repo
            .add_author(Author::new("Grace", "Hopper", date!(1906 - 12 - 09), "Compilers"))
            .await;
        let course = repo
            .add_course(author.id, Course::new("Notes", None))
            .await
            .unwrap();
        repo.save().await.unwrap();

        assert!(repo.get_course(other.id, course.id).await.unwrap().is_none());
        assert!(repo.get_course(author.id, course.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn courses_are_ordered_by_title() {
        let (repo, author) = repo_with_author().await;
        for title in ["Zeta", "Alpha", "Mu"] {
            repo.add_course(author.id, Course::new(title, None))
                .await
                .unwrap();
        }
        repo.save().await.unwrap();

        let titles: Vec<String> = repo
            .get_courses(author.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Mu", "Zeta"]);
    }

    #[tokio::test]
    async fn update_replaces_committed_course() {
        let (repo, author) = repo_with_author().await;
        let mut course = repo
            .add_course(author.id, Course::new("Draft", Some("first".into())))
            .await
            .unwrap();
        repo.save().await.unwrap();

        course.title = "Final".to_string();
        repo.update_course(course.clone()).await.unwrap();
        assert!(repo.save().await.unwrap());

        let stored = repo.get_course(author.id, course.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Final");
        assert_eq!(stored.description.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn invalid_batch_is_rejected_atomically() {
        let (repo, author) = repo_with_author().await;
        let good = repo
            .add_course(author.id, Course::new("Kept out", None))
            .await
            .unwrap();
        repo.update_course(Course::new("Ghost", None)).await.unwrap();

        assert!(!repo.save().await.unwrap());
        assert_eq!(repo.pending_changes().await, 0);
        assert!(repo.get_courses(author.id).await.unwrap().is_empty());
        assert!(repo.get_course(author.id, good.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn commit_reports_reason() {
        let repo = InMemoryStore::new().unit_of_work();
        let orphan_author = Uuid::now_v7();
        repo.add_course(orphan_author, Course::new("Orphan", None))
            .await
            .unwrap();

        assert_eq!(
            repo.commit().await,
            Err(CommitError::UnknownAuthor(orphan_author))
        );
    }

    #[tokio::test]
    async fn update_cannot_move_course_between_authors() {
        let (repo, author) = repo_with_author().await;
        let mut course = repo
            .add_course(author.id, Course::new("Pinned", None))
            .await
            .unwrap();
        repo.save().await.unwrap();

        course.author_id = Uuid::now_v7();
        repo.update_course(course.clone()).await.unwrap();
        assert_eq!(repo.commit().await, Err(CommitError::AuthorChanged(course.id)));
    }

    #[tokio::test]
    async fn authors_are_ordered_by_last_then_first_name() {
        let repo = InMemoryStore::new().unit_of_work();
        repo.add_author(Author::new("Zed", "Smith", date!(1980 - 01 - 01), "Rust"))
            .await;
        repo.add_author(Author::new("Amy", "Smith", date!(1980 - 01 - 01), "Rust"))
            .await;
        repo.add_author(Author::new("Bob", "Adams", date!(1980 - 01 - 01), "Rust"))
            .await;
        repo.save().await.unwrap();

        let names: Vec<String> = repo
            .get_authors()
            .await
            .unwrap()
            .into_iter()
            .map(|a| format!("{} {}", a.first_name, a.last_name))
            .collect();
        assert_eq!(names, vec!["Bob Adams", "Amy Smith", "Zed Smith"]);
        assert!(!repo.author_exists(Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn rejected_batch_does_not_discard_another_unit_of_work() {
        let store = InMemoryStore::new();
        let setup = store.unit_of_work();
        let author = setup
            .add_author(Author::new("Ada", "Lovelace", date!(1815 - 12 - 10), "Mathematics"))
            .await;
        assert!(setup.save().await.unwrap());

        let first = store.unit_of_work();
        let second = store.unit_of_work();

        let course = first
            .add_course(author.id, Course::new("Difference Engines", None))
            .await
            .unwrap();
        second.update_course(Course::new("Ghost", None)).await.unwrap();
        assert_eq!(first.pending_changes().await, 1);
        assert_eq!(second.pending_changes().await, 1);

        assert!(!second.save().await.unwrap());
        assert_eq!(first.pending_changes().await, 1);
        assert!(first.save().await.unwrap());

        assert_eq!(
            second.get_course(author.id, course.id).await.unwrap(),
            Some(course)
        );
    }

    #[tokio::test]
    async fn units_of_work_share_committed_state() {
        let store = InMemoryStore::new();
        let writer = store.unit_of_work();
        let author = writer
            .add_author(Author::new("Grace", "Hopper", date!(1906 - 12 - 09), "Compilers"))
            .await;

        let reader = store.open();
        assert!(!reader.author_exists(author.id).await.unwrap());

        assert!(writer.save().await.unwrap());
        assert!(reader.author_exists(author.id).await.unwrap());
        assert!(reader.save().await.unwrap());
    }
}
