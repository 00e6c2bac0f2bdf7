//! Professional API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cv_core::traits::Id;
use cv_db::{
    CreateProfessionalDto, ProfessionalRepository, ProfessionalRow, Repository,
    UpdateProfessionalDto,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, JsonBody, ValidPath};
use crate::handlers::MessageResponse;

/// GET /api/profissionais
pub async fn list_professionals(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProfessionalRow>>> {
    let rows = state.repos.professionals.find_all().await?;
    Ok(Json(rows))
}

/// GET /api/profissionais/:id
pub async fn get_professional(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<ProfessionalRow>> {
    let row = state
        .repos
        .professionals
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found::<ProfessionalRow>)?;

    Ok(Json(row))
}

/// POST /api/profissionais
pub async fn create_professional(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<CreateProfessionalDto>,
) -> ApiResult<impl IntoResponse> {
    let row = state.repos.professionals.create(dto).await?;
    tracing::info!(id = row.id, "Professional created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/profissionais/:id
pub async fn update_professional(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
    JsonBody(dto): JsonBody<UpdateProfessionalDto>,
) -> ApiResult<Json<ProfessionalRow>> {
    let row = state.repos.professionals.update(id, dto).await?;
    Ok(Json(row))
}

/// DELETE /api/profissionais/:id
pub async fn delete_professional(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<MessageResponse>> {
    state.repos.professionals.delete(id).await?;
    tracing::info!(id, "Professional deleted");
    Ok(Json(MessageResponse::deleted::<ProfessionalRow>()))
}

/// GET /api/profissionais/disponiveis
pub async fn list_available_professionals(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProfessionalRow>>> {
    let rows = state.repos.professionals.find_available().await?;
    Ok(Json(rows))
}

/// GET /api/profissionais/nivel/:nivel
pub async fn list_professionals_by_level(
    State(state): State<AppState>,
    ValidPath(level): ValidPath<String>,
) -> ApiResult<Json<Vec<ProfessionalRow>>> {
    let rows = state.repos.professionals.find_by_experience_level(&level).await?;
    Ok(Json(rows))
}
