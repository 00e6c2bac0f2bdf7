//! Work experience API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cv_core::traits::Id;
use cv_db::{
    ChildRepository, CreateExperienceDto, ExperienceRow, Repository, UpdateExperienceDto,
    WithProfessionalName,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, JsonBody, ValidPath};
use crate::handlers::MessageResponse;

/// GET /api/experiencias
pub async fn list_experiences(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WithProfessionalName<ExperienceRow>>>> {
    let rows = state.repos.experiences.find_all().await?;
    Ok(Json(rows))
}

/// GET /api/experiencias/profissional/:profissional_id
pub async fn list_professional_experiences(
    State(state): State<AppState>,
    ValidPath(professional_id): ValidPath<Id>,
) -> ApiResult<Json<Vec<ExperienceRow>>> {
    let rows = state.repos.experiences.find_by_professional(professional_id).await?;
    Ok(Json(rows))
}

/// GET /api/experiencias/:id
pub async fn get_experience(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<ExperienceRow>> {
    let row = state
        .repos
        .experiences
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found::<ExperienceRow>)?;

    Ok(Json(row))
}

/// POST /api/experiencias
pub async fn create_experience(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<CreateExperienceDto>,
) -> ApiResult<impl IntoResponse> {
    let row = state.repos.experiences.create(dto).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/experiencias/:id
pub async fn update_experience(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
    JsonBody(dto): JsonBody<UpdateExperienceDto>,
) -> ApiResult<Json<ExperienceRow>> {
    let row = state.repos.experiences.update(id, dto).await?;
    Ok(Json(row))
}

/// DELETE /api/experiencias/:id
pub async fn delete_experience(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<MessageResponse>> {
    state.repos.experiences.delete(id).await?;
    Ok(Json(MessageResponse::deleted::<ExperienceRow>()))
}
