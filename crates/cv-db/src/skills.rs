//! Skills repository
//!
//! Table: habilidades. Listed per professional by `nivel_proficiencia` descending.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cv_core::traits::{Entity, Id, Identifiable, ProfessionalScoped};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::repository::{
    ChildRepository, Repository, RepositoryError, RepositoryResult, SkillRepository,
    WithProfessionalName,
};

/// Skill row from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SkillRow {
    pub id: Id,
    pub profissional_id: Id,
    pub tecnologia: String,
    pub categoria: Option<String>,
    pub nivel_proficiencia: i32,
    pub anos_experiencia: Option<i32>,
    pub destaque: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for SkillRow {
    fn id(&self) -> Id {
        self.id
    }
}

impl ProfessionalScoped for SkillRow {
    fn professional_id(&self) -> Id {
        self.profissional_id
    }
}

impl Entity for SkillRow {
    const TABLE_NAME: &'static str = "habilidades";
    const TYPE_NAME: &'static str = "Skill";
    const NOT_FOUND_MESSAGE: &'static str = "Habilidade não encontrada";
    const DELETED_MESSAGE: &'static str = "Habilidade deletada com sucesso";
}

/// DTO for creating a skill
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateSkillDto {
    pub profissional_id: Id,
    pub tecnologia: String,
    pub categoria: Option<String>,
    pub nivel_proficiencia: i32,
    pub anos_experiencia: Option<i32>,
    pub destaque: Option<bool>,
}

/// DTO for updating a skill
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateSkillDto {
    pub tecnologia: String,
    pub categoria: Option<String>,
    pub nivel_proficiencia: i32,
    pub anos_experiencia: Option<i32>,
    pub destaque: Option<bool>,
}

/// PostgreSQL skill repository
pub struct PgSkillRepository {
    pool: PgPool,
}

impl PgSkillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<SkillRow, CreateSkillDto, UpdateSkillDto> for PgSkillRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<SkillRow>> {
        let row = sqlx::query_as::<_, SkillRow>("SELECT * FROM habilidades WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create(&self, dto: CreateSkillDto) -> RepositoryResult<SkillRow> {
        let row = sqlx::query_as::<_, SkillRow>(
            r#"
            INSERT INTO habilidades (
                profissional_id, tecnologia, categoria, nivel_proficiencia, anos_experiencia, destaque
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(dto.profissional_id)
        .bind(&dto.tecnologia)
        .bind(&dto.categoria)
        .bind(dto.nivel_proficiencia)
        .bind(dto.anos_experiencia)
        .bind(dto.destaque)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateSkillDto) -> RepositoryResult<SkillRow> {
        let row = sqlx::query_as::<_, SkillRow>(
            r#"
            UPDATE habilidades SET
                tecnologia = $1, categoria = $2, nivel_proficiencia = $3,
                anos_experiencia = $4, destaque = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&dto.tecnologia)
        .bind(&dto.categoria)
        .bind(dto.nivel_proficiencia)
        .bind(dto.anos_experiencia)
        .bind(dto.destaque)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(RepositoryError::not_found::<SkillRow>)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM habilidades WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<SkillRow>());
        }

        Ok(())
    }
}

#[async_trait]
impl ChildRepository<SkillRow, CreateSkillDto, UpdateSkillDto> for PgSkillRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<WithProfessionalName<SkillRow>>> {
        let rows = sqlx::query_as::<_, WithProfessionalName<SkillRow>>(
            r#"
            SELECT h.*, p.nome_completo AS profissional_nome
            FROM habilidades h
            JOIN profissionais p ON h.profissional_id = p.id
            ORDER BY h.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_professional(&self, professional_id: Id) -> RepositoryResult<Vec<SkillRow>> {
        let rows = sqlx::query_as::<_, SkillRow>(
            r#"
            SELECT * FROM habilidades
            WHERE profissional_id = $1
            ORDER BY nivel_proficiencia DESC, id ASC
            "#,
        )
        .bind(professional_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl SkillRepository for PgSkillRepository {
    async fn find_by_category(
        &self,
        category: &str,
    ) -> RepositoryResult<Vec<WithProfessionalName<SkillRow>>> {
        let rows = sqlx::query_as::<_, WithProfessionalName<SkillRow>>(
            r#"
            SELECT h.*, p.nome_completo AS profissional_nome
            FROM habilidades h
            JOIN profissionais p ON h.profissional_id = p.id
            WHERE h.categoria = $1
            ORDER BY h.id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
