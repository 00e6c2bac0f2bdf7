//! Core traits shared by the storage and API layers

/// Primary key type (BIGSERIAL in PostgreSQL)
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Id;
}

/// Trait for child entities that belong to a professional
pub trait ProfessionalScoped {
    fn professional_id(&self) -> Id;
}

/// Base trait for all persisted entities
///
/// The messages are part of the public API surface and are served verbatim
/// in error and acknowledgement bodies.
pub trait Entity: Identifiable + Send + Sync {
    /// The database table name
    const TABLE_NAME: &'static str;

    /// Human-readable type name for logs
    const TYPE_NAME: &'static str;

    /// Message returned when a lookup, update or delete matches no row
    const NOT_FOUND_MESSAGE: &'static str;

    /// Message returned after a successful delete
    const DELETED_MESSAGE: &'static str;
}
