//! Full curriculum handler

use axum::{extract::State, Json};
use cv_core::traits::Id;
use cv_db::Profile;

use crate::error::ApiResult;
use crate::extractors::{AppState, ValidPath};

/// GET /api/curriculo/:profissional_id
pub async fn get_curriculum(
    State(state): State<AppState>,
    ValidPath(professional_id): ValidPath<Id>,
) -> ApiResult<Json<Profile>> {
    let profile = state.repos.assemble_profile(professional_id).await?;
    Ok(Json(profile))
}
