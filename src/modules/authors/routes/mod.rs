//! HTTP routes for authors and their courses.

mod authors;
mod courses;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use courselib_db::{CourseLibraryRepository, RepositoryFactory};
use courselib_http::error::AppError;
use courselib_kernel::{module::mount_path, settings::PagingSettings};
use serde::Serialize;
use uuid::Uuid;

use super::models::PageQuery;
use super::MODULE_NAME;
use crate::utils::{PageMetadata, PagedList, PagingError};

pub static X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

/// Shared state handed to every handler of this module.
#[derive(Clone)]
pub struct LibraryState {
    pub repositories: Arc<dyn RepositoryFactory>,
    pub paging: PagingSettings,
}

impl LibraryState {
    /// Unit of work scoped to the current request.
    fn repository(&self) -> Box<dyn CourseLibraryRepository> {
        self.repositories.open()
    }
}

/// Build the module router; it is mounted under `/api/authors`.
pub fn router(state: LibraryState) -> Router {
    Router::new()
        .route("/", get(authors::list_authors))
        .route("/{author_id}", get(authors::get_author))
        .route(
            "/{author_id}/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/{author_id}/courses/{course_id}",
            get(courses::get_course).put(courses::update_course),
        )
        .with_state(state)
}

impl From<PagingError> for AppError {
    fn from(err: PagingError) -> Self {
        let field = match err {
            PagingError::InvalidPageNumber => "page_number",
            PagingError::InvalidPageSize => "page_size",
        };
        AppError::bad_request(
            vec![serde_json::json!({ "field": field, "error": err.to_string() })],
            "invalid paging parameters",
        )
    }
}

/// Fail with 404 unless the author exists.
async fn ensure_author(
    repository: &dyn CourseLibraryRepository,
    author_id: Uuid,
) -> Result<(), AppError> {
    if !repository.author_exists(author_id).await? {
        return Err(AppError::not_found(format!("author {} not found", author_id)));
    }
    Ok(())
}

/// Commit staged changes; a rejected batch is a server-side failure.
async fn commit(repository: &dyn CourseLibraryRepository) -> Result<(), AppError> {
    let saved = repository
        .save()
        .await
        .context("failed to commit course library changes")?;
    if !saved {
        return Err(anyhow::anyhow!("course library rejected the staged changes").into());
    }
    Ok(())
}

fn authors_path() -> String {
    mount_path(MODULE_NAME)
}

fn courses_path(author_id: Uuid) -> String {
    format!("{}/{}/courses", authors_path(), author_id)
}

fn course_path(author_id: Uuid, course_id: Uuid) -> String {
    format!("{}/{}", courses_path(author_id), course_id)
}

/// Apply defaults and clamp `page_size` to the configured maximum.
fn resolve_page(query: PageQuery, paging: &PagingSettings) -> (usize, usize) {
    let page_number = query.page_number.unwrap_or(1);
    let page_size = query
        .page_size
        .unwrap_or(paging.default_page_size)
        .min(paging.max_page_size);
    (page_number, page_size)
}

#[derive(Debug, Serialize)]
struct PaginationHeader {
    #[serde(flatten)]
    metadata: PageMetadata,
    previous_page_link: Option<String>,
    next_page_link: Option<String>,
}

fn page_link(path: &str, page_number: usize, page_size: usize) -> String {
    format!("{}?page_number={}&page_size={}", path, page_number, page_size)
}

/// JSON array body for the page, with its metadata in `X-Pagination`.
fn paged_response<T: Serialize>(page: PagedList<T>, path: &str) -> Result<Response, AppError> {
    let metadata = page.metadata();
    let header = PaginationHeader {
        metadata,
        previous_page_link: metadata
            .has_previous
            .then(|| page_link(path, metadata.current_page - 1, metadata.page_size)),
        next_page_link: metadata
            .has_next
            .then(|| page_link(path, metadata.current_page + 1, metadata.page_size)),
    };

    let encoded = serde_json::to_string(&header).context("failed to encode pagination header")?;
    let value = HeaderValue::from_str(&encoded).context("invalid pagination header value")?;

    Ok(([(X_PAGINATION.clone(), value)], Json(page.into_items())).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use courselib_db::{Author, Course};
    use tower::ServiceExt;

    /// Store whose commits are always rejected.
    struct RejectingRepository {
        author_id: Uuid,
        course_id: Uuid,
    }

    #[async_trait]
    impl CourseLibraryRepository for RejectingRepository {
        async fn author_exists(&self, author_id: Uuid) -> anyhow::Result<bool> {
            Ok(author_id == self.author_id)
        }

        async fn get_authors(&self) -> anyhow::Result<Vec<Author>> {
            Ok(Vec::new())
        }

        async fn get_author(&self, _author_id: Uuid) -> anyhow::Result<Option<Author>> {
            Ok(None)
        }

        async fn get_courses(&self, _author_id: Uuid) -> anyhow::Result<Vec<Course>> {
            Ok(Vec::new())
        }

        async fn get_course(
            &self,
            author_id: Uuid,
            course_id: Uuid,
        ) -> anyhow::Result<Option<Course>> {
            Ok((author_id == self.author_id && course_id == self.course_id).then(|| Course {
                id: course_id,
                author_id,
                title: "Stored".to_string(),
                description: None,
            }))
        }

        async fn add_course(&self, author_id: Uuid, mut course: Course) -> anyhow::Result<Course> {
            course.author_id = author_id;
            Ok(course)
        }

        async fn update_course(&self, _course: Course) -> anyhow::Result<()> {
            Ok(())
        }

        async fn save(&self) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    struct RejectingFactory {
        author_id: Uuid,
        course_id: Uuid,
    }

    impl RepositoryFactory for RejectingFactory {
        fn open(&self) -> Box<dyn CourseLibraryRepository> {
            Box::new(RejectingRepository {
                author_id: self.author_id,
                course_id: self.course_id,
            })
        }
    }

    async fn send_json(
        router: Router,
        method: Method,
        uri: &str,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"Rejected"}"#))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn rejected_save_is_an_internal_error() {
        let author_id = Uuid::now_v7();
        let course_id = Uuid::now_v7();
        let app = router(LibraryState {
            repositories: Arc::new(RejectingFactory {
                author_id,
                course_id,
            }),
            paging: PagingSettings::default(),
        });

        let (status, body) =
            send_json(app.clone(), Method::POST, &format!("/{}/courses", author_id)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "internal_error");

        let (status, body) = send_json(
            app,
            Method::PUT,
            &format!("/{}/courses/{}", author_id, course_id),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "internal_error");
    }

    #[test]
    fn resolve_page_applies_defaults_and_clamps() {
        let paging = PagingSettings::default();

        assert_eq!(resolve_page(PageQuery::default(), &paging), (1, 10));
        assert_eq!(
            resolve_page(
                PageQuery {
                    page_number: Some(3),
                    page_size: Some(500),
                },
                &paging
            ),
            (3, 20)
        );
    }

    #[test]
    fn paging_error_becomes_bad_request() {
        let err = AppError::from(PagingError::InvalidPageSize);
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn paged_response_sets_header_links() {
        let page = PagedList::create(vec![1, 2, 3, 4, 5], 2, 2).unwrap();
        let response = paged_response(page, "/api/authors").unwrap();

        let header = response.headers().get(&X_PAGINATION).unwrap();
        let header: serde_json::Value = serde_json::from_str(header.to_str().unwrap()).unwrap();
        assert_eq!(header["current_page"], 2);
        assert_eq!(header["total_pages"], 3);
        assert_eq!(
            header["previous_page_link"],
            "/api/authors?page_number=1&page_size=2"
        );
        assert_eq!(
            header["next_page_link"],
            "/api/authors?page_number=3&page_size=2"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Vec<i32> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, vec![3, 4]);
    }
}
