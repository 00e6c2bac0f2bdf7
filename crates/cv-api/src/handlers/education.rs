//! Education API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cv_core::traits::Id;
use cv_db::{
    ChildRepository, CreateEducationDto, EducationRow, Repository, UpdateEducationDto,
    WithProfessionalName,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, JsonBody, ValidPath};
use crate::handlers::MessageResponse;

/// GET /api/formacao
pub async fn list_education(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WithProfessionalName<EducationRow>>>> {
    let rows = state.repos.education.find_all().await?;
    Ok(Json(rows))
}

/// GET /api/formacao/profissional/:profissional_id
pub async fn list_professional_education(
    State(state): State<AppState>,
    ValidPath(professional_id): ValidPath<Id>,
) -> ApiResult<Json<Vec<EducationRow>>> {
    let rows = state.repos.education.find_by_professional(professional_id).await?;
    Ok(Json(rows))
}

/// GET /api/formacao/:id
pub async fn get_education(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<EducationRow>> {
    let row = state
        .repos
        .education
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found::<EducationRow>)?;

    Ok(Json(row))
}

/// POST /api/formacao
pub async fn create_education(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<CreateEducationDto>,
) -> ApiResult<impl IntoResponse> {
    let row = state.repos.education.create(dto).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/formacao/:id
pub async fn update_education(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
    JsonBody(dto): JsonBody<UpdateEducationDto>,
) -> ApiResult<Json<EducationRow>> {
    let row = state.repos.education.update(id, dto).await?;
    Ok(Json(row))
}

/// DELETE /api/formacao/:id
pub async fn delete_education(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<MessageResponse>> {
    state.repos.education.delete(id).await?;
    Ok(Json(MessageResponse::deleted::<EducationRow>()))
}
