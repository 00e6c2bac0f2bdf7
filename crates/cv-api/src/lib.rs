//! # cv-api
//!
//! REST API handlers for Curriculos RS.
//!
//! Maps each method and path to one repository operation and serializes the
//! resulting rows verbatim. Errors are always a single-field `{"error": ...}` body.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
