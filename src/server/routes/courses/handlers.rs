use crate::db::{CourseCreate, CourseFilter, CoursePatch, DbCourse, ResourceCreate, ResourcePatch};
use crate::error::RostraError;
use crate::server::router::RostraState;
use crate::server::routes::require_name;
use axum::extract::rejection::JsonRejection;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::debug;

/// GET /api/v1/courses/
///
/// Optional `id`/`name` query params narrow the listing (exact matches,
/// AND-ed together). No params returns every course, ordered by id.
pub async fn list_courses(
    State(state): State<RostraState>,
    Query(filter): Query<CourseFilter>,
) -> Result<Json<Vec<DbCourse>>, RostraError> {
    let courses = state.db.list_courses(filter).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/{id}/
pub async fn get_course(
    State(state): State<RostraState>,
    Path(id): Path<i64>,
) -> Result<Json<DbCourse>, RostraError> {
    let course = state.db.get_course(id).await?;
    Ok(Json(course))
}

/// POST /api/v1/courses/
///
/// Ids are server-assigned; any `id` in the payload is ignored.
pub async fn create_course(
    State(state): State<RostraState>,
    payload: Result<Json<CourseCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<DbCourse>), RostraError> {
    let Json(create) = payload.map_err(|e| RostraError::Validation(e.body_text()))?;
    let name = require_name(&create.name)?;

    let id = state
        .db
        .create(ResourceCreate::Course(CourseCreate { name }))
        .await?;
    debug!(id, "course created");

    let course = state.db.get_course(id).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /api/v1/courses/{id}/
pub async fn replace_course(
    State(state): State<RostraState>,
    Path(id): Path<i64>,
    payload: Result<Json<CourseCreate>, JsonRejection>,
) -> Result<Json<DbCourse>, RostraError> {
    let Json(update) = payload.map_err(|e| RostraError::Validation(e.body_text()))?;
    let name = require_name(&update.name)?;

    state
        .db
        .patch(ResourcePatch::Course {
            id,
            patch: CoursePatch { name: Some(name) },
        })
        .await?;

    let course = state.db.get_course(id).await?;
    Ok(Json(course))
}

/// PATCH /api/v1/courses/{id}/
///
/// Absent fields are left unchanged.
pub async fn update_course(
    State(state): State<RostraState>,
    Path(id): Path<i64>,
    payload: Result<Json<CoursePatch>, JsonRejection>,
) -> Result<Json<DbCourse>, RostraError> {
    let Json(patch) = payload.map_err(|e| RostraError::Validation(e.body_text()))?;
    if let Some(name) = patch.name.as_deref() {
        require_name(name)?;
    }

    state.db.patch(ResourcePatch::Course { id, patch }).await?;

    let course = state.db.get_course(id).await?;
    Ok(Json(course))
}

/// DELETE /api/v1/courses/{id}/
pub async fn delete_course(
    State(state): State<RostraState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, RostraError> {
    state.db.delete_course(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
