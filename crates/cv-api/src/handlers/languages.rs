//! Language API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cv_core::traits::Id;
use cv_db::{
    ChildRepository, CreateLanguageDto, LanguageRow, Repository, UpdateLanguageDto,
    WithProfessionalName,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, JsonBody, ValidPath};
use crate::handlers::MessageResponse;

/// GET /api/idiomas
pub async fn list_languages(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WithProfessionalName<LanguageRow>>>> {
    let rows = state.repos.languages.find_all().await?;
    Ok(Json(rows))
}

/// GET /api/idiomas/profissional/:profissional_id
pub async fn list_professional_languages(
    State(state): State<AppState>,
    ValidPath(professional_id): ValidPath<Id>,
) -> ApiResult<Json<Vec<LanguageRow>>> {
    let rows = state.repos.languages.find_by_professional(professional_id).await?;
    Ok(Json(rows))
}

/// GET /api/idiomas/:id
pub async fn get_language(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<LanguageRow>> {
    let row = state
        .repos
        .languages
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found::<LanguageRow>)?;

    Ok(Json(row))
}

/// POST /api/idiomas
pub async fn create_language(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<CreateLanguageDto>,
) -> ApiResult<impl IntoResponse> {
    let row = state.repos.languages.create(dto).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/idiomas/:id
pub async fn update_language(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
    JsonBody(dto): JsonBody<UpdateLanguageDto>,
) -> ApiResult<Json<LanguageRow>> {
    let row = state.repos.languages.update(id, dto).await?;
    Ok(Json(row))
}

/// DELETE /api/idiomas/:id
pub async fn delete_language(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<MessageResponse>> {
    state.repos.languages.delete(id).await?;
    Ok(Json(MessageResponse::deleted::<LanguageRow>()))
}
