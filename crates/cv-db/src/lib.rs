//! # cv-db
//!
//! Database layer for Curriculos RS.
//!
//! This crate provides PostgreSQL access using SQLx, including:
//!
//! - Connection pool management and embedded migrations
//! - Repository traits for professionals and their child collections
//! - PostgreSQL and in-memory implementations of those traits
//! - Full profile assembly over the five collections
//!
//! ## Example
//!
//! ```ignore
//! use cv_db::{Database, DatabaseConfig, Repositories};
//!
//! let db = Database::connect(&DatabaseConfig::with_url(url)).await?;
//! db.migrate().await?;
//!
//! let repos = Repositories::postgres(db.pool().clone());
//! let profile = repos.assemble_profile(1).await?;
//! ```

pub mod pool;
pub mod repository;
pub mod professionals;
pub mod experiences;
pub mod education;
pub mod skills;
pub mod languages;
pub mod profile;
pub mod memory;

// Re-exports
pub use pool::{Database, DatabaseConfig, PoolStats};
pub use repository::{
    ChildRepository, EducationRepository, ExperienceRepository, LanguageRepository,
    ProfessionalRepository, Repositories, Repository, RepositoryError, RepositoryResult,
    SkillRepository, WithProfessionalName,
};
pub use professionals::{CreateProfessionalDto, PgProfessionalRepository, ProfessionalRow, UpdateProfessionalDto};
pub use experiences::{CreateExperienceDto, ExperienceRow, PgExperienceRepository, UpdateExperienceDto};
pub use education::{CreateEducationDto, EducationRow, PgEducationRepository, UpdateEducationDto};
pub use skills::{CreateSkillDto, PgSkillRepository, SkillRow, UpdateSkillDto};
pub use languages::{CreateLanguageDto, LanguageRow, PgLanguageRepository, UpdateLanguageDto};
pub use profile::Profile;
pub use memory::MemoryStore;
