//! Student endpoints. Same lifecycle shape as the course endpoints.

use crate::db::{
    DbStudent, ResourceCreate, ResourcePatch, StudentCreate, StudentFilter, StudentPatch,
};
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

/// GET /api/v1/students/
pub async fn list_students(
    State(state): State<RostraState>,
    Query(filter): Query<StudentFilter>,
) -> Result<Json<Vec<DbStudent>>, RostraError> {
    let students = state.db.list_students(filter).await?;
    Ok(Json(students))
}

/// GET /api/v1/students/{id}/
pub async fn get_student(
    State(state): State<RostraState>,
    Path(id): Path<i64>,
) -> Result<Json<DbStudent>, RostraError> {
    let student = state.db.get_student(id).await?;
    Ok(Json(student))
}

/// POST /api/v1/students/
pub async fn create_student(
    State(state): State<RostraState>,
    payload: Result<Json<StudentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<DbStudent>), RostraError> {
    let Json(create) = payload.map_err(|e| RostraError::Validation(e.body_text()))?;
    let name = require_name(&create.name)?;

    let id = state
        .db
        .create(ResourceCreate::Student(StudentCreate { name }))
        .await?;
    debug!(id, "student created");

    let student = state.db.get_student(id).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// PUT /api/v1/students/{id}/
pub async fn replace_student(
    State(state): State<RostraState>,
    Path(id): Path<i64>,
    payload: Result<Json<StudentCreate>, JsonRejection>,
) -> Result<Json<DbStudent>, RostraError> {
    let Json(update) = payload.map_err(|e| RostraError::Validation(e.body_text()))?;
    let name = require_name(&update.name)?;

    state
        .db
        .patch(ResourcePatch::Student {
            id,
            patch: StudentPatch { name: Some(name) },
        })
        .await?;

    let student = state.db.get_student(id).await?;
    Ok(Json(student))
}

/// PATCH /api/v1/students/{id}/
pub async fn update_student(
    State(state): State<RostraState>,
    Path(id): Path<i64>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<Json<DbStudent>, RostraError> {
    let Json(patch) = payload.map_err(|e| RostraError::Validation(e.body_text()))?;
    if let Some(name) = patch.name.as_deref() {
        require_name(name)?;
    }

    state.db.patch(ResourcePatch::Student { id, patch }).await?;

    let student = state.db.get_student(id).await?;
    Ok(Json(student))
}

/// DELETE /api/v1/students/{id}/
pub async fn delete_student(
    State(state): State<RostraState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, RostraError> {
    state.db.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
