use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use courselib_db::Course;
use courselib_http::error::AppError;
use uuid::Uuid;

use super::{
    commit, course_path, courses_path, ensure_author, paged_response, resolve_page, LibraryState,
};
use crate::modules::authors::models::{CourseDto, CourseForCreation, CourseForUpdate, PageQuery};
use crate::utils::PagedList;

fn course_not_found(author_id: Uuid, course_id: Uuid) -> AppError {
    AppError::not_found(format!(
        "course {} not found for author {}",
        course_id, author_id
    ))
}

/// `GET /{author_id}/courses`; paged when `page_number` or `page_size` is given
pub(super) async fn list_courses(
    State(state): State<LibraryState>,
    Path(author_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    tracing::debug!(%author_id, "list courses");
    let repository = state.repository();
    ensure_author(&*repository, author_id).await?;

    let courses = repository.get_courses(author_id).await?;

    if query.page_number.is_none() && query.page_size.is_none() {
        let body: Vec<CourseDto> = courses.into_iter().map(CourseDto::from).collect();
        return Ok(Json(body).into_response());
    }

    let (page_number, page_size) = resolve_page(query, &state.paging);
    let page = PagedList::create(courses, page_number, page_size)?.map(CourseDto::from);
    paged_response(page, &courses_path(author_id))
}

/// `GET /{author_id}/courses/{course_id}`
pub(super) async fn get_course(
    State(state): State<LibraryState>,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CourseDto>, AppError> {
    tracing::debug!(%author_id, %course_id, "get course");
    let repository = state.repository();
    ensure_author(&*repository, author_id).await?;

    let course = repository
        .get_course(author_id, course_id)
        .await?
        .ok_or_else(|| course_not_found(author_id, course_id))?;

    Ok(Json(CourseDto::from(course)))
}

/// `POST /{author_id}/courses`; 201 with a `Location` pointing at the new course
pub(super) async fn create_course(
    State(state): State<LibraryState>,
    Path(author_id): Path<Uuid>,
    Json(input): Json<CourseForCreation>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(%author_id, "create course");
    let repository = state.repository();
    ensure_author(&*repository, author_id).await?;

    let course = repository
        .add_course(author_id, Course::from(input))
        .await?;
    commit(&*repository).await?;

    tracing::info!(%author_id, course_id = %course.id, "course created");

    let location = course_path(author_id, course.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CourseDto::from(course)),
    ))
}

/// `PUT /{author_id}/courses/{course_id}`; merges the given fields, 204 on success
pub(super) async fn update_course(
    State(state): State<LibraryState>,
    Path((author_id, course_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<CourseForUpdate>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(%author_id, %course_id, "update course");
    let repository = state.repository();
    ensure_author(&*repository, author_id).await?;

    let mut course = repository
        .get_course(author_id, course_id)
        .await?
        .ok_or_else(|| course_not_found(author_id, course_id))?;

    input.apply_to(&mut course);
    repository.update_course(course).await?;
    commit(&*repository).await?;

    tracing::info!(%author_id, %course_id, "course updated");
    Ok(StatusCode::NO_CONTENT)
}
