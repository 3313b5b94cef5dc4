use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use courselib_http::error::AppError;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{authors_path, paged_response, resolve_page, LibraryState};
use crate::modules::authors::models::{AuthorDto, PageQuery};
use crate::utils::PagedList;

/// `GET /`; always paged, metadata in `X-Pagination`
pub(super) async fn list_authors(
    State(state): State<LibraryState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    tracing::debug!(?query, "list authors");

    let (page_number, page_size) = resolve_page(query, &state.paging);
    let authors = state.repository().get_authors().await?;
    let today = OffsetDateTime::now_utc().date();

    let page = PagedList::create(authors, page_number, page_size)?
        .map(|author| AuthorDto::from_author(&author, today));
    paged_response(page, &authors_path())
}

/// `GET /{author_id}`
pub(super) async fn get_author(
    State(state): State<LibraryState>,
    Path(author_id): Path<Uuid>,
) -> Result<Json<AuthorDto>, AppError> {
    tracing::debug!(%author_id, "get author");

    let author = state
        .repository()
        .get_author(author_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("author {} not found", author_id)))?;

    Ok(Json(AuthorDto::from(&author)))
}
