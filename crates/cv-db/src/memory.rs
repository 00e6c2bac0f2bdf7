//! In-memory repository implementation
//!
//! Implements every repository trait over plain maps so the API layer can be
//! exercised without a database. Behaviour mirrors the PostgreSQL schema:
//! ids come from per-table sequences, child inserts require an existing
//! professional, and deleting a professional cascades to its children.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use cv_core::traits::{Entity, Id, Identifiable, ProfessionalScoped};
use parking_lot::RwLock;

use crate::education::{CreateEducationDto, EducationRow, UpdateEducationDto};
use crate::experiences::{CreateExperienceDto, ExperienceRow, UpdateExperienceDto};
use crate::languages::{CreateLanguageDto, LanguageRow, UpdateLanguageDto};
use crate::professionals::{CreateProfessionalDto, ProfessionalRow, UpdateProfessionalDto};
use crate::repository::{
    ChildRepository, ProfessionalRepository, Repositories, Repository, RepositoryError,
    RepositoryResult, SkillRepository, WithProfessionalName,
};
use crate::skills::{CreateSkillDto, SkillRow, UpdateSkillDto};

/// One table: rows keyed by id, plus the sequence that generates ids
struct Table<T> {
    rows: BTreeMap<Id, T>,
    last_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone + Identifiable> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(Id) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(row.id(), row.clone());
        row
    }

    fn get(&self, id: Id) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn update_with<E: Entity>(&mut self, id: Id, apply: impl FnOnce(&mut T)) -> RepositoryResult<T> {
        let row = self
            .rows
            .get_mut(&id)
            .ok_or_else(RepositoryError::not_found::<E>)?;
        apply(row);
        Ok(row.clone())
    }

    fn remove<E: Entity>(&mut self, id: Id) -> RepositoryResult<()> {
        self.rows
            .remove(&id)
            .ok_or_else(RepositoryError::not_found::<E>)?;
        tracing::debug!(entity = E::TYPE_NAME, id, "Removed from memory store");
        Ok(())
    }
}

impl<T: Clone + Identifiable + ProfessionalScoped> Table<T> {
    fn owned_by(&self, professional_id: Id) -> Vec<T> {
        self.rows
            .values()
            .filter(|row| row.professional_id() == professional_id)
            .cloned()
            .collect()
    }

    fn remove_owned_by(&mut self, professional_id: Id) {
        self.rows.retain(|_, row| row.professional_id() != professional_id);
    }
}

#[derive(Default)]
struct MemoryData {
    professionals: Table<ProfessionalRow>,
    experiences: Table<ExperienceRow>,
    education: Table<EducationRow>,
    skills: Table<SkillRow>,
    languages: Table<LanguageRow>,
    offline: bool,
}

impl MemoryData {
    /// Rejects a child write whose owner does not exist, the way the foreign key does
    fn check_owner<E: Entity>(&self, professional_id: Id) -> RepositoryResult<()> {
        if self.professionals.rows.contains_key(&professional_id) {
            return Ok(());
        }
        Err(RepositoryError::Constraint(format!(
            "insert or update on table \"{table}\" violates foreign key constraint \"{table}_profissional_id_fkey\"",
            table = E::TABLE_NAME
        )))
    }

    /// Inner join against professionals, attaching the full name
    fn with_names<T>(&self, rows: Vec<T>) -> Vec<WithProfessionalName<T>>
    where
        T: ProfessionalScoped,
    {
        rows.into_iter()
            .filter_map(|record| {
                let owner = self.professionals.rows.get(&record.professional_id())?;
                Some(WithProfessionalName {
                    profissional_nome: owner.nome_completo.clone(),
                    record,
                })
            })
            .collect()
    }
}

/// In-memory store shared by all repository traits
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing the database: every call fails until brought back online
    pub fn set_offline(&self, offline: bool) {
        self.data.write().offline = offline;
    }

    fn read<R>(&self, f: impl FnOnce(&MemoryData) -> RepositoryResult<R>) -> RepositoryResult<R> {
        let data = self.data.read();
        if data.offline {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        f(&data)
    }

    fn write<R>(
        &self,
        f: impl FnOnce(&mut MemoryData) -> RepositoryResult<R>,
    ) -> RepositoryResult<R> {
        let mut data = self.data.write();
        if data.offline {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        f(&mut data)
    }
}

impl Repositories {
    /// Repositories backed by a fresh, empty in-memory store
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    /// Repositories backed by an existing in-memory store
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            professionals: store.clone(),
            experiences: store.clone(),
            education: store.clone(),
            skills: store.clone(),
            languages: store,
        }
    }
}

// ===== Professionals =====

#[async_trait]
impl Repository<ProfessionalRow, CreateProfessionalDto, UpdateProfessionalDto> for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ProfessionalRow>> {
        self.read(|data| Ok(data.professionals.get(id)))
    }

    async fn create(&self, dto: CreateProfessionalDto) -> RepositoryResult<ProfessionalRow> {
        self.write(|data| {
            Ok(data.professionals.insert_with(|id| ProfessionalRow {
                id,
                nome_completo: dto.nome_completo,
                email: dto.email,
                telefone: dto.telefone,
                cargo_atual: dto.cargo_atual,
                nivel_experiencia: dto.nivel_experiencia,
                localizacao: dto.localizacao,
                linkedin_url: dto.linkedin_url,
                github_url: dto.github_url,
                salario_pretendido: dto.salario_pretendido,
                disponivel_contratacao: dto.disponivel_contratacao,
                resumo_profissional: dto.resumo_profissional,
                created_at: Utc::now(),
            }))
        })
    }

    async fn update(
        &self,
        id: Id,
        dto: UpdateProfessionalDto,
    ) -> RepositoryResult<ProfessionalRow> {
        self.write(|data| {
            data.professionals.update_with::<ProfessionalRow>(id, |row| {
                row.nome_completo = dto.nome_completo;
                row.email = dto.email;
                row.telefone = dto.telefone;
                row.cargo_atual = dto.cargo_atual;
                row.nivel_experiencia = dto.nivel_experiencia;
                row.localizacao = dto.localizacao;
                row.linkedin_url = dto.linkedin_url;
                row.github_url = dto.github_url;
                row.salario_pretendido = dto.salario_pretendido;
                row.disponivel_contratacao = dto.disponivel_contratacao;
                row.resumo_profissional = dto.resumo_profissional;
            })
        })
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        self.write(|data| {
            data.professionals.remove::<ProfessionalRow>(id)?;
            data.experiences.remove_owned_by(id);
            data.education.remove_owned_by(id);
            data.skills.remove_owned_by(id);
            data.languages.remove_owned_by(id);
            Ok(())
        })
    }
}

#[async_trait]
impl ProfessionalRepository for MemoryStore {
    async fn find_all(&self) -> RepositoryResult<Vec<ProfessionalRow>> {
        self.read(|data| Ok(data.professionals.all()))
    }

    async fn find_available(&self) -> RepositoryResult<Vec<ProfessionalRow>> {
        self.read(|data| {
            let mut rows = data.professionals.all();
            rows.retain(|row| row.disponivel_contratacao == Some(true));
            Ok(rows)
        })
    }

    async fn find_by_experience_level(&self, level: &str) -> RepositoryResult<Vec<ProfessionalRow>> {
        self.read(|data| {
            let mut rows = data.professionals.all();
            rows.retain(|row| row.nivel_experiencia.as_deref() == Some(level));
            Ok(rows)
        })
    }
}

// ===== Experiences =====

#[async_trait]
impl Repository<ExperienceRow, CreateExperienceDto, UpdateExperienceDto> for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ExperienceRow>> {
        self.read(|data| Ok(data.experiences.get(id)))
    }

    async fn create(&self, dto: CreateExperienceDto) -> RepositoryResult<ExperienceRow> {
        self.write(|data| {
            data.check_owner::<ExperienceRow>(dto.profissional_id)?;
            Ok(data.experiences.insert_with(|id| ExperienceRow {
                id,
                profissional_id: dto.profissional_id,
                empresa: dto.empresa,
                cargo: dto.cargo,
                data_inicio: dto.data_inicio,
                data_fim: dto.data_fim,
                atual: dto.atual,
                descricao: dto.descricao,
                tecnologias: dto.tecnologias,
                created_at: Utc::now(),
            }))
        })
    }

    async fn update(&self, id: Id, dto: UpdateExperienceDto) -> RepositoryResult<ExperienceRow> {
        self.write(|data| {
            data.experiences.update_with::<ExperienceRow>(id, |row| {
                row.empresa = dto.empresa;
                row.cargo = dto.cargo;
                row.data_inicio = dto.data_inicio;
                row.data_fim = dto.data_fim;
                row.atual = dto.atual;
                row.descricao = dto.descricao;
                row.tecnologias = dto.tecnologias;
            })
        })
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        self.write(|data| data.experiences.remove::<ExperienceRow>(id))
    }
}

#[async_trait]
impl ChildRepository<ExperienceRow, CreateExperienceDto, UpdateExperienceDto> for MemoryStore {
    async fn find_all(&self) -> RepositoryResult<Vec<WithProfessionalName<ExperienceRow>>> {
        self.read(|data| Ok(data.with_names(data.experiences.all())))
    }

    async fn find_by_professional(&self, professional_id: Id) -> RepositoryResult<Vec<ExperienceRow>> {
        self.read(|data| {
            let mut rows = data.experiences.owned_by(professional_id);
            rows.sort_by(|a, b| b.data_inicio.cmp(&a.data_inicio));
            Ok(rows)
        })
    }
}

// ===== Education =====

#[async_trait]
impl Repository<EducationRow, CreateEducationDto, UpdateEducationDto> for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<EducationRow>> {
        self.read(|data| Ok(data.education.get(id)))
    }

    async fn create(&self, dto: CreateEducationDto) -> RepositoryResult<EducationRow> {
        self.write(|data| {
            data.check_owner::<EducationRow>(dto.profissional_id)?;
            Ok(data.education.insert_with(|id| EducationRow {
                id,
                profissional_id: dto.profissional_id,
                instituicao: dto.instituicao,
                curso: dto.curso,
                nivel: dto.nivel,
                data_inicio: dto.data_inicio,
                data_conclusao: dto.data_conclusao,
                concluido: dto.concluido,
                created_at: Utc::now(),
            }))
        })
    }

    async fn update(&self, id: Id, dto: UpdateEducationDto) -> RepositoryResult<EducationRow> {
        self.write(|data| {
            data.education.update_with::<EducationRow>(id, |row| {
                row.instituicao = dto.instituicao;
                row.curso = dto.curso;
                row.nivel = dto.nivel;
                row.data_inicio = dto.data_inicio;
                row.data_conclusao = dto.data_conclusao;
                row.concluido = dto.concluido;
            })
        })
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        self.write(|data| data.education.remove::<EducationRow>(id))
    }
}

#[async_trait]
impl ChildRepository<EducationRow, CreateEducationDto, UpdateEducationDto> for MemoryStore {
    async fn find_all(&self) -> RepositoryResult<Vec<WithProfessionalName<EducationRow>>> {
        self.read(|data| Ok(data.with_names(data.education.all())))
    }

    async fn find_by_professional(&self, professional_id: Id) -> RepositoryResult<Vec<EducationRow>> {
        self.read(|data| {
            let mut rows = data.education.owned_by(professional_id);
            rows.sort_by(|a, b| b.data_inicio.cmp(&a.data_inicio));
            Ok(rows)
        })
    }
}

// ===== Skills =====

#[async_trait]
impl Repository<SkillRow, CreateSkillDto, UpdateSkillDto> for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<SkillRow>> {
        self.read(|data| Ok(data.skills.get(id)))
    }

    async fn create(&self, dto: CreateSkillDto) -> RepositoryResult<SkillRow> {
        self.write(|data| {
            data.check_owner::<SkillRow>(dto.profissional_id)?;
            Ok(data.skills.insert_with(|id| SkillRow {
                id,
                profissional_id: dto.profissional_id,
                tecnologia: dto.tecnologia,
                categoria: dto.categoria,
                nivel_proficiencia: dto.nivel_proficiencia,
                anos_experiencia: dto.anos_experiencia,
                destaque: dto.destaque,
                created_at: Utc::now(),
            }))
        })
    }

    async fn update(&self, id: Id, dto: UpdateSkillDto) -> RepositoryResult<SkillRow> {
        self.write(|data| {
            data.skills.update_with::<SkillRow>(id, |row| {
                row.tecnologia = dto.tecnologia;
                row.categoria = dto.categoria;
                row.nivel_proficiencia = dto.nivel_proficiencia;
                row.anos_experiencia = dto.anos_experiencia;
                row.destaque = dto.destaque;
            })
        })
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        self.write(|data| data.skills.remove::<SkillRow>(id))
    }
}

#[async_trait]
impl ChildRepository<SkillRow, CreateSkillDto, UpdateSkillDto> for MemoryStore {
    async fn find_all(&self) -> RepositoryResult<Vec<WithProfessionalName<SkillRow>>> {
        self.read(|data| Ok(data.with_names(data.skills.all())))
    }

    async fn find_by_professional(&self, professional_id: Id) -> RepositoryResult<Vec<SkillRow>> {
        self.read(|data| {
            let mut rows = data.skills.owned_by(professional_id);
            rows.sort_by(|a, b| b.nivel_proficiencia.cmp(&a.nivel_proficiencia));
            Ok(rows)
        })
    }
}

#[async_trait]
impl SkillRepository for MemoryStore {
    async fn find_by_category(
        &self,
        category: &str,
    ) -> RepositoryResult<Vec<WithProfessionalName<SkillRow>>> {
        self.read(|data| {
            let mut rows = data.skills.all();
            rows.retain(|row| row.categoria.as_deref() == Some(category));
            Ok(data.with_names(rows))
        })
    }
}

// ===== Languages =====

#[async_trait]
impl Repository<LanguageRow, CreateLanguageDto, UpdateLanguageDto> for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<LanguageRow>> {
        self.read(|data| Ok(data.languages.get(id)))
    }

    async fn create(&self, dto: CreateLanguageDto) -> RepositoryResult<LanguageRow> {
        self.write(|data| {
            data.check_owner::<LanguageRow>(dto.profissional_id)?;
            Ok(data.languages.insert_with(|id| LanguageRow {
                id,
                profissional_id: dto.profissional_id,
                idioma: dto.idioma,
                nivel: dto.nivel,
                created_at: Utc::now(),
            }))
        })
    }

    async fn update(&self, id: Id, dto: UpdateLanguageDto) -> RepositoryResult<LanguageRow> {
        self.write(|data| {
            data.languages.update_with::<LanguageRow>(id, |row| {
                row.idioma = dto.idioma;
                row.nivel = dto.nivel;
            })
        })
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        self.write(|data| data.languages.remove::<LanguageRow>(id))
    }
}

#[async_trait]
impl ChildRepository<LanguageRow, CreateLanguageDto, UpdateLanguageDto> for MemoryStore {
    async fn find_all(&self) -> RepositoryResult<Vec<WithProfessionalName<LanguageRow>>> {
        self.read(|data| Ok(data.with_names(data.languages.all())))
    }

    async fn find_by_professional(&self, professional_id: Id) -> RepositoryResult<Vec<LanguageRow>> {
        self.read(|data| Ok(data.languages.owned_by(professional_id)))
    }
}
