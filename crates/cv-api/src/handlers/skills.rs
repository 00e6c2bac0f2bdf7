//! Skill API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cv_core::traits::Id;
use cv_db::{
    ChildRepository, CreateSkillDto, Repository, SkillRepository, SkillRow, UpdateSkillDto,
    WithProfessionalName,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, JsonBody, ValidPath};
use crate::handlers::MessageResponse;

/// GET /api/habilidades
pub async fn list_skills(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WithProfessionalName<SkillRow>>>> {
    let rows = state.repos.skills.find_all().await?;
    Ok(Json(rows))
}

/// GET /api/habilidades/profissional/:profissional_id
pub async fn list_professional_skills(
    State(state): State<AppState>,
    ValidPath(professional_id): ValidPath<Id>,
) -> ApiResult<Json<Vec<SkillRow>>> {
    let rows = state.repos.skills.find_by_professional(professional_id).await?;
    Ok(Json(rows))
}

/// GET /api/habilidades/:id
pub async fn get_skill(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<SkillRow>> {
    let row = state
        .repos
        .skills
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found::<SkillRow>)?;

    Ok(Json(row))
}

/// POST /api/habilidades
pub async fn create_skill(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<CreateSkillDto>,
) -> ApiResult<impl IntoResponse> {
    let row = state.repos.skills.create(dto).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/habilidades/:id
pub async fn update_skill(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
    JsonBody(dto): JsonBody<UpdateSkillDto>,
) -> ApiResult<Json<SkillRow>> {
    let row = state.repos.skills.update(id, dto).await?;
    Ok(Json(row))
}

/// DELETE /api/habilidades/:id
pub async fn delete_skill(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Id>,
) -> ApiResult<Json<MessageResponse>> {
    state.repos.skills.delete(id).await?;
    Ok(Json(MessageResponse::deleted::<SkillRow>()))
}

/// GET /api/habilidades/categoria/:categoria
pub async fn list_skills_by_category(
    State(state): State<AppState>,
    ValidPath(category): ValidPath<String>,
) -> ApiResult<Json<Vec<WithProfessionalName<SkillRow>>>> {
    let rows = state.repos.skills.find_by_category(&category).await?;
    Ok(Json(rows))
}
