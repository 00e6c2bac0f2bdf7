//! API request handlers

pub mod professionals;
pub mod experiences;
pub mod education;
pub mod skills;
pub mod languages;
pub mod curriculum;

use cv_core::traits::Entity;
use serde::Serialize;

/// Acknowledgement body returned by deletes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn deleted<E: Entity>() -> Self {
        Self {
            message: E::DELETED_MESSAGE,
        }
    }
}
