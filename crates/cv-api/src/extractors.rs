//! Axum extractors for API handlers
//!
//! Malformed bodies and path segments are turned into `ApiError::Validation`
//! before any statement reaches the store.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use cv_db::Repositories;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
}

impl AppState {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }
}

/// JSON request body with typed fields
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| JsonBody(value))
            .map_err(|rejection| ApiError::validation(rejection.body_text()))
    }
}

/// Typed path parameters
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| ValidPath(value))
            .map_err(|rejection| ApiError::validation(rejection.body_text()))
    }
}
