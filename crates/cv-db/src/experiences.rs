//! Work experience repository
//!
//! Table: experiencias. Listed per professional by `data_inicio` descending.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use cv_core::traits::{Entity, Id, Identifiable, ProfessionalScoped};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::repository::{
    ChildRepository, Repository, RepositoryError, RepositoryResult, WithProfessionalName,
};

/// Experience row from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ExperienceRow {
    pub id: Id,
    pub profissional_id: Id,
    pub empresa: String,
    pub cargo: String,
    pub data_inicio: NaiveDate,
    pub data_fim: Option<NaiveDate>,
    pub atual: Option<bool>,
    pub descricao: Option<String>,
    pub tecnologias: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for ExperienceRow {
    fn id(&self) -> Id {
        self.id
    }
}

impl ProfessionalScoped for ExperienceRow {
    fn professional_id(&self) -> Id {
        self.profissional_id
    }
}

impl Entity for ExperienceRow {
    const TABLE_NAME: &'static str = "experiencias";
    const TYPE_NAME: &'static str = "Experience";
    const NOT_FOUND_MESSAGE: &'static str = "Experiência não encontrada";
    const DELETED_MESSAGE: &'static str = "Experiência deletada com sucesso";
}

/// DTO for creating an experience
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateExperienceDto {
    pub profissional_id: Id,
    pub empresa: String,
    pub cargo: String,
    pub data_inicio: NaiveDate,
    pub data_fim: Option<NaiveDate>,
    pub atual: Option<bool>,
    pub descricao: Option<String>,
    pub tecnologias: Option<String>,
}

/// DTO for updating an experience (the owner cannot change)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateExperienceDto {
    pub empresa: String,
    pub cargo: String,
    pub data_inicio: NaiveDate,
    pub data_fim: Option<NaiveDate>,
    pub atual: Option<bool>,
    pub descricao: Option<String>,
    pub tecnologias: Option<String>,
}

/// PostgreSQL experience repository
pub struct PgExperienceRepository {
    pool: PgPool,
}

impl PgExperienceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<ExperienceRow, CreateExperienceDto, UpdateExperienceDto> for PgExperienceRepository {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ExperienceRow>> {
        let row = sqlx::query_as::<_, ExperienceRow>("SELECT * FROM experiencias WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create(&self, dto: CreateExperienceDto) -> RepositoryResult<ExperienceRow> {
        let row = sqlx::query_as::<_, ExperienceRow>(
            r#"
            INSERT INTO experiencias (
                profissional_id, empresa, cargo, data_inicio, data_fim, atual, descricao, tecnologias
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(dto.profissional_id)
        .bind(&dto.empresa)
        .bind(&dto.cargo)
        .bind(dto.data_inicio)
        .bind(dto.data_fim)
        .bind(dto.atual)
        .bind(&dto.descricao)
        .bind(&dto.tecnologias)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateExperienceDto) -> RepositoryResult<ExperienceRow> {
        let row = sqlx::query_as::<_, ExperienceRow>(
            r#"
            UPDATE experiencias SET
                empresa = $1, cargo = $2, data_inicio = $3, data_fim = $4,
                atual = $5, descricao = $6, tecnologias = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&dto.empresa)
        .bind(&dto.cargo)
        .bind(dto.data_inicio)
        .bind(dto.data_fim)
        .bind(dto.atual)
        .bind(&dto.descricao)
        .bind(&dto.tecnologias)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(RepositoryError::not_found::<ExperienceRow>)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM experiencias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<ExperienceRow>());
        }

        Ok(())
    }
}

#[async_trait]
impl ChildRepository<ExperienceRow, CreateExperienceDto, UpdateExperienceDto>
    for PgExperienceRepository
{
    async fn find_all(&self) -> RepositoryResult<Vec<WithProfessionalName<ExperienceRow>>> {
        let rows = sqlx::query_as::<_, WithProfessionalName<ExperienceRow>>(
            r#"
            SELECT e.*, p.nome_completo AS profissional_nome
            FROM experiencias e
            JOIN profissionais p ON e.profissional_id = p.id
            ORDER BY e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_professional(&self, professional_id: Id) -> RepositoryResult<Vec<ExperienceRow>> {
        let rows = sqlx::query_as::<_, ExperienceRow>(
            r#"
            SELECT * FROM experiencias
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_ignores_owner() {
        let dto: UpdateExperienceDto = serde_json::from_value(serde_json::json!({
            "profissional_id": 99,
            "empresa": "Acme",
            "cargo": "Engenheira",
            "data_inicio": "2021-03-01",
            "atual": true
        }))
        .unwrap();

        assert_eq!(dto.empresa, "Acme");
        assert_eq!(dto.data_inicio, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        assert!(dto.data_fim.is_none());
    }

    #[test]
    fn test_create_dto_rejects_malformed_date() {
        let result = serde_json::from_value::<CreateExperienceDto>(serde_json::json!({
            "profissional_id": 1,
            "empresa": "Acme",
            "cargo": "Dev",
            "data_inicio": "march"
        }));
        assert!(result.is_err());
    }
}
