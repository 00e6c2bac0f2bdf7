//! Education repository
//!
//! Table: formacao. Listed per professional by `data_inicio` descending.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use cv_core::traits::{Entity, Id, Identifiable, ProfessionalScoped};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::repository::{
    ChildRepository, Repository, RepositoryError, RepositoryResult, WithProfessionalName,
};

/// Education row from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct EducationRow {
    pub id: Id,
    pub profissional_id: Id,
    pub instituicao: String,
    pub curso: String,
    pub nivel: Option<String>,
    pub data_inicio: NaiveDate,
    pub data_conclusao: Option<NaiveDate>,
    pub concluido: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for EducationRow {
    fn id(&self) -> Id {
        self.id
    }
}

impl ProfessionalScoped for EducationRow {
    fn professional_id(&self) -> Id {
        self.profissional_id
    }
}

impl Entity for EducationRow {
    const TABLE_NAME: &'static str = "formacao";
    const TYPE_NAME: &'static str = "Education";
    const NOT_FOUND_MESSAGE: &'static str = "Formação não encontrada";
    const DELETED_MESSAGE: &'static str = "Formação deletada com sucesso";
}

/// DTO for creating an education entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateEducationDto {
    pub profissional_id: Id,
    pub instituicao: String,
    pub curso: String,
    pub nivel: Option<String>,
    pub data_inicio: NaiveDate,
    pub data_conclusao: Option<NaiveDate>,
    pub concluido: Option<bool>,
}

/// DTO for updating an education entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateEducationDto {
    pub instituicao: String,
    pub curso: String,
    pub nivel: Option<String>,
    pub data_inicio: NaiveDate,
    pub data_conclusao: Option<NaiveDate>,
    pub concluido: Option<bool>,
}

/// PostgreSQL education repository
pub struct PgEducationRepository {
    pool: PgPool,
}

impl PgEducationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<EducationRow, CreateEducationDto, UpdateEducationDto> for PgEducationRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<EducationRow>> {
        let row = sqlx::query_as::<_, EducationRow>("SELECT * FROM formacao WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create(&self, dto: CreateEducationDto) -> RepositoryResult<EducationRow> {
        let row = sqlx::query_as::<_, EducationRow>(
            r#"
            INSERT INTO formacao (
                profissional_id, instituicao, curso, nivel, data_inicio, data_conclusao, concluido
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(dto.profissional_id)
        .bind(&dto.instituicao)
        .bind(&dto.curso)
        .bind(&dto.nivel)
        .bind(dto.data_inicio)
        .bind(dto.data_conclusao)
        .bind(dto.concluido)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateEducationDto) -> RepositoryResult<EducationRow> {
        let row = sqlx::query_as::<_, EducationRow>(
            r#"
            UPDATE formacao SET
                instituicao = $1, curso = $2, nivel = $3, data_inicio = $4,
                data_conclusao = $5, concluido = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&dto.instituicao)
        .bind(&dto.curso)
        .bind(&dto.nivel)
        .bind(dto.data_inicio)
        .bind(dto.data_conclusao)
        .bind(dto.concluido)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(RepositoryError::not_found::<EducationRow>)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM formacao WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<EducationRow>());
        }

        Ok(())
    }
}

#[async_trait]
impl ChildRepository<EducationRow, CreateEducationDto, UpdateEducationDto> for PgEducationRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<WithProfessionalName<EducationRow>>> {
        let rows = sqlx::query_as::<_, WithProfessionalName<EducationRow>>(
            r#"
            SELECT f.*, p.nome_completo AS profissional_nome
            FROM formacao f
            JOIN profissionais p ON f.profissional_id = p.id
            ORDER BY f.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_professional(&self, professional_id: Id) -> RepositoryResult<Vec<EducationRow>> {
        let rows = sqlx::query_as::<_, EducationRow>(
            r#"
            SELECT * FROM formacao
            WHERE profissional_id = $1
            ORDER BY data_inicio DESC, id ASC
            "#,
        )
        .bind(professional_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
