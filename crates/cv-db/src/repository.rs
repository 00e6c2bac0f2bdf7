//! Repository traits and the shared repository bundle
//!
//! Every operation issues a single parameterized statement. Handlers receive a
//! [`Repositories`] value at construction time and never reach for a global pool.

use std::sync::Arc;

use async_trait::async_trait;
use cv_core::traits::Id;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use crate::education::{CreateEducationDto, EducationRow, PgEducationRepository, UpdateEducationDto};
use crate::experiences::{
    CreateExperienceDto, ExperienceRow, PgExperienceRepository, UpdateExperienceDto,
};
use crate::languages::{CreateLanguageDto, LanguageRow, PgLanguageRepository, UpdateLanguageDto};
use crate::professionals::{
    CreateProfessionalDto, PgProfessionalRepository, ProfessionalRow, UpdateProfessionalDto,
};
use crate::skills::{CreateSkillDto, PgSkillRepository, SkillRow, UpdateSkillDto};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No row matched the requested id. Carries the entity's fixed message.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A referential or column constraint rejected the write
    #[error("{0}")]
    Constraint(String),
}

impl RepositoryError {
    pub fn not_found<E: cv_core::Entity>() -> Self {
        RepositoryError::NotFound(E::NOT_FOUND_MESSAGE.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }

    /// The storage engine's own message, without any wrapper prefix
    pub fn storage_message(&self) -> String {
        match self {
            RepositoryError::Database(sqlx::Error::Database(db)) => db.message().to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Base repository trait for single-record operations
#[async_trait]
pub trait Repository<T, CreateDto, UpdateDto>: Send + Sync {
    /// Find an entity by ID
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<T>>;

    /// Insert a new entity and return it with its generated id
    async fn create(&self, dto: CreateDto) -> RepositoryResult<T>;

    /// Replace the writable fields of an entity.
    /// Returns `NotFound` when no row has the id.
    async fn update(&self, id: Id, dto: UpdateDto) -> RepositoryResult<T>;

    /// Delete an entity by ID. Returns `NotFound` when no row has the id.
    async fn delete(&self, id: Id) -> RepositoryResult<()>;
}

/// Professional-specific reads
#[async_trait]
pub trait ProfessionalRepository:
    Repository<ProfessionalRow, CreateProfessionalDto, UpdateProfessionalDto>
{
    async fn find_all(&self) -> RepositoryResult<Vec<ProfessionalRow>>;

    /// Professionals with `disponivel_contratacao = true`
    async fn find_available(&self) -> RepositoryResult<Vec<ProfessionalRow>>;

    /// Exact, case-sensitive match on `nivel_experiencia`
    async fn find_by_experience_level(&self, level: &str) -> RepositoryResult<Vec<ProfessionalRow>>;
}

/// Reads shared by the four collections that belong to a professional
#[async_trait]
pub trait ChildRepository<T, CreateDto, UpdateDto>: Repository<T, CreateDto, UpdateDto> {
    /// Every row, joined with the owning professional's name
    async fn find_all(&self) -> RepositoryResult<Vec<WithProfessionalName<T>>>;

    /// Rows owned by one professional, in the entity's listing order
    async fn find_by_professional(&self, professional_id: Id) -> RepositoryResult<Vec<T>>;
}

/// Skill-specific reads
#[async_trait]
pub trait SkillRepository: ChildRepository<SkillRow, CreateSkillDto, UpdateSkillDto> {
    /// Exact, case-sensitive match on `categoria`, joined with the professional's name
    async fn find_by_category(
        &self,
        category: &str,
    ) -> RepositoryResult<Vec<WithProfessionalName<SkillRow>>>;
}

pub type ExperienceRepository =
    dyn ChildRepository<ExperienceRow, CreateExperienceDto, UpdateExperienceDto>;
pub type EducationRepository =
    dyn ChildRepository<EducationRow, CreateEducationDto, UpdateEducationDto>;
pub type LanguageRepository =
    dyn ChildRepository<LanguageRow, CreateLanguageDto, UpdateLanguageDto>;

/// A child row with the owning professional's full name attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithProfessionalName<T> {
    #[serde(flatten)]
    pub record: T,
    pub profissional_nome: String,
}

impl<'r, T> FromRow<'r, PgRow> for WithProfessionalName<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            record: T::from_row(row)?,
            profissional_nome: row.try_get("profissional_nome")?,
        })
    }
}

/// The single storage handle injected into the API layer
#[derive(Clone)]
pub struct Repositories {
    pub professionals: Arc<dyn ProfessionalRepository>,
    pub experiences: Arc<ExperienceRepository>,
    pub education: Arc<EducationRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub languages: Arc<LanguageRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            professionals: Arc::new(PgProfessionalRepository::new(pool.clone())),
            experiences: Arc::new(PgExperienceRepository::new(pool.clone())),
            education: Arc::new(PgEducationRepository::new(pool.clone())),
            skills: Arc::new(PgSkillRepository::new(pool.clone())),
            languages: Arc::new(PgLanguageRepository::new(pool)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::professionals::ProfessionalRow;

    #[test]
    fn test_not_found_carries_entity_message() {
        let err = RepositoryError::not_found::<ProfessionalRow>();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Profissional não encontrado");
    }

    #[test]
    fn test_constraint_message_is_verbatim() {
        let err = RepositoryError::Constraint("violates foreign key constraint".into());
        assert!(!err.is_not_found());
        assert_eq!(err.storage_message(), "violates foreign key constraint");
    }

    #[test]
    fn test_joined_row_serializes_flat() {
        #[derive(Serialize)]
        struct Plain {
            id: i64,
        }

        let row = WithProfessionalName {
            record: Plain { id: 7 },
            profissional_nome: "Ana Silva".into(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "profissional_nome": "Ana Silva" }));
    }
}
