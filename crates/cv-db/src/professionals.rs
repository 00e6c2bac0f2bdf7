//! Professionals repository
//!
//! Table: profissionais

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cv_core::traits::{Entity, Id, Identifiable};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::repository::{ProfessionalRepository, Repository, RepositoryError, RepositoryResult};

/// Professional row from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ProfessionalRow {
    pub id: Id,
    pub nome_completo: String,
    pub email: String,
    pub telefone: Option<String>,
    pub cargo_atual: Option<String>,
    pub nivel_experiencia: Option<String>,
    pub localizacao: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub salario_pretendido: Option<f64>,
    pub disponivel_contratacao: Option<bool>,
    pub resumo_profissional: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for ProfessionalRow {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for ProfessionalRow {
    const TABLE_NAME: &'static str = "profissionais";
    const TYPE_NAME: &'static str = "Professional";
    const NOT_FOUND_MESSAGE: &'static str = "Profissional não encontrado";
    const DELETED_MESSAGE: &'static str = "Profissional deletado com sucesso";
}

/// DTO for creating a professional
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProfessionalDto {
    pub nome_completo: String,
    pub email: String,
    pub telefone: Option<String>,
    pub cargo_atual: Option<String>,
    pub nivel_experiencia: Option<String>,
    pub localizacao: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub salario_pretendido: Option<f64>,
    pub disponivel_contratacao: Option<bool>,
    pub resumo_profissional: Option<String>,
}

/// Updates replace all eleven writable fields
pub type UpdateProfessionalDto = CreateProfessionalDto;

/// PostgreSQL professional repository
pub struct PgProfessionalRepository {
    pool: PgPool,
}

impl PgProfessionalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<ProfessionalRow, CreateProfessionalDto, UpdateProfessionalDto>
    for PgProfessionalRepository
{
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ProfessionalRow>> {
        let row = sqlx::query_as::<_, ProfessionalRow>("SELECT * FROM profissionais WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create(&self, dto: CreateProfessionalDto) -> RepositoryResult<ProfessionalRow> {
        let row = sqlx::query_as::<_, ProfessionalRow>(
            r#"
            INSERT INTO profissionais (
                nome_completo, email, telefone, cargo_atual, nivel_experiencia,
                localizacao, linkedin_url, github_url, salario_pretendido,
                disponivel_contratacao, resumo_profissional
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&dto.nome_completo)
        .bind(&dto.email)
        .bind(&dto.telefone)
        .bind(&dto.cargo_atual)
        .bind(&dto.nivel_experiencia)
        .bind(&dto.localizacao)
        .bind(&dto.linkedin_url)
        .bind(&dto.github_url)
        .bind(dto.salario_pretendido)
        .bind(dto.disponivel_contratacao)
        .bind(&dto.resumo_profissional)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: Id,
        dto: UpdateProfessionalDto,
    ) -> RepositoryResult<ProfessionalRow> {
        let row = sqlx::query_as::<_, ProfessionalRow>(
            r#"
            UPDATE profissionais SET
                nome_completo = $1, email = $2, telefone = $3, cargo_atual = $4,
                nivel_experiencia = $5, localizacao = $6, linkedin_url = $7,
                github_url = $8, salario_pretendido = $9,
                disponivel_contratacao = $10, resumo_profissional = $11
            WHERE id = $12
            RETURNING *
            "#,
        )
        .bind(&dto.nome_completo)
        .bind(&dto.email)
        .bind(&dto.telefone)
        .bind(&dto.cargo_atual)
        .bind(&dto.nivel_experiencia)
        .bind(&dto.localizacao)
        .bind(&dto.linkedin_url)
        .bind(&dto.github_url)
        .bind(dto.salario_pretendido)
        .bind(dto.disponivel_contratacao)
        .bind(&dto.resumo_profissional)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(RepositoryError::not_found::<ProfessionalRow>)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM profissionais WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<ProfessionalRow>());
        }

        Ok(())
    }
}

#[async_trait]
impl ProfessionalRepository for PgProfessionalRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<ProfessionalRow>> {
        let rows = sqlx::query_as::<_, ProfessionalRow>("SELECT * FROM profissionais ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn find_available(&self) -> RepositoryResult<Vec<ProfessionalRow>> {
        let rows = sqlx::query_as::<_, ProfessionalRow>(
            "SELECT * FROM profissionais WHERE disponivel_contratacao = true ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_experience_level(&self, level: &str) -> RepositoryResult<Vec<ProfessionalRow>> {
        let rows = sqlx::query_as::<_, ProfessionalRow>(
            "SELECT * FROM profissionais WHERE nivel_experiencia = $1 ORDER BY id",
        )
        .bind(level)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
