//! Languages repository
//!
//! Table: idiomas. Per-professional listings have no defined order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cv_core::traits::{Entity, Id, Identifiable, ProfessionalScoped};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::repository::{
    ChildRepository, Repository, RepositoryError, RepositoryResult, WithProfessionalName,
};

/// Language row from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct LanguageRow {
    pub id: Id,
    pub profissional_id: Id,
    pub idioma: String,
    pub nivel: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for LanguageRow {
    fn id(&self) -> Id {
        self.id
    }
}

impl ProfessionalScoped for LanguageRow {
    fn professional_id(&self) -> Id {
        self.profissional_id
    }
}

impl Entity for LanguageRow {
    const TABLE_NAME: &'static str = "idiomas";
    const TYPE_NAME: &'static str = "Language";
    const NOT_FOUND_MESSAGE: &'static str = "Idioma não encontrado";
    const DELETED_MESSAGE: &'static str = "Idioma deletado com sucesso";
}

/// DTO for creating a language
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateLanguageDto {
    pub profissional_id: Id,
    pub idioma: String,
    pub nivel: Option<String>,
}

/// DTO for updating a language
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateLanguageDto {
    pub idioma: String,
    pub nivel: Option<String>,
}

/// PostgreSQL language repository
pub struct PgLanguageRepository {
    pool: PgPool,
}

impl PgLanguageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<LanguageRow, CreateLanguageDto, UpdateLanguageDto> for PgLanguageRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<LanguageRow>> {
        let row = sqlx::query_as::<_, LanguageRow>("SELECT * FROM idiomas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create(&self, dto: CreateLanguageDto) -> RepositoryResult<LanguageRow> {
        let row = sqlx::query_as::<_, LanguageRow>(
            "INSERT INTO idiomas (profissional_id, idioma, nivel) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(dto.profissional_id)
        .bind(&dto.idioma)
        .bind(&dto.nivel)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateLanguageDto) -> RepositoryResult<LanguageRow> {
        let row = sqlx::query_as::<_, LanguageRow>(
            "UPDATE idiomas SET idioma = $1, nivel = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&dto.idioma)
        .bind(&dto.nivel)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(RepositoryError::not_found::<LanguageRow>)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM idiomas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<LanguageRow>());
        }

        Ok(())
    }
}

#[async_trait]
impl ChildRepository<LanguageRow, CreateLanguageDto, UpdateLanguageDto> for PgLanguageRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<WithProfessionalName<LanguageRow>>> {
        let rows = sqlx::query_as::<_, WithProfessionalName<LanguageRow>>(
            r#"
            SELECT i.*, p.nome_completo AS profissional_nome
            FROM idiomas i
            JOIN profissionais p ON i.profissional_id = p.id
            ORDER BY i.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_professional(&self, professional_id: Id) -> RepositoryResult<Vec<LanguageRow>> {
        let rows = sqlx::query_as::<_, LanguageRow>(
            "SELECT * FROM idiomas WHERE profissional_id = $1",
        )
        .bind(professional_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
