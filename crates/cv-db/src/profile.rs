//! Full profile assembly
//!
//! A professional plus all four child collections, fetched concurrently.

use cv_core::traits::Id;
use futures::future::join5;
use serde::Serialize;

use crate::education::EducationRow;
use crate::experiences::ExperienceRow;
use crate::languages::LanguageRow;
use crate::professionals::ProfessionalRow;
use crate::repository::{
    ChildRepository, Repositories, Repository, RepositoryError, RepositoryResult,
};
use crate::skills::SkillRow;

/// Complete curriculum for one professional
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub profissional: ProfessionalRow,
    pub experiencias: Vec<ExperienceRow>,
    pub formacao: Vec<EducationRow>,
    pub habilidades: Vec<SkillRow>,
    pub idiomas: Vec<LanguageRow>,
}

impl Repositories {
    /// Issue all five reads at once and wait for every one of them to settle.
    ///
    /// Faults win over absence: a failed professional read, then any failed
    /// child read, fails the whole profile. Only when every read succeeded
    /// does a missing professional yield `NotFound`.
    pub async fn assemble_profile(&self, professional_id: Id) -> RepositoryResult<Profile> {
        let (professional, experiences, education, skills, languages) = join5(
            self.professionals.find_by_id(professional_id),
            self.experiences.find_by_professional(professional_id),
            self.education.find_by_professional(professional_id),
            self.skills.find_by_professional(professional_id),
            self.languages.find_by_professional(professional_id),
        )
        .await;

        let professional = professional?;
        let (experiences, education, skills, languages) =
            (experiences?, education?, skills?, languages?);
        let professional =
            professional.ok_or_else(RepositoryError::not_found::<ProfessionalRow>)?;

        tracing::debug!(professional_id, "Assembled profile");

        Ok(Profile {
            profissional: professional,
            experiencias: experiences,
            formacao: education,
            habilidades: skills,
            idiomas: languages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiences::CreateExperienceDto;
    use crate::memory::MemoryStore;
    use crate::professionals::CreateProfessionalDto;
    use crate::skills::CreateSkillDto;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn ana() -> CreateProfessionalDto {
        CreateProfessionalDto {
            nome_completo: "Ana Silva".into(),
            email: "ana@x.com".into(),
            telefone: None,
            cargo_atual: Some("Backend".into()),
            nivel_experiencia: Some("senior".into()),
            localizacao: None,
            linkedin_url: None,
            github_url: None,
            salario_pretendido: Some(15000.0),
            disponivel_contratacao: Some(true),
            resumo_profissional: None,
        }
    }

    fn skill(owner: Id, tech: &str, level: i32) -> CreateSkillDto {
        CreateSkillDto {
            profissional_id: owner,
            tecnologia: tech.into(),
            categoria: Some("backend".into()),
            nivel_proficiencia: level,
            anos_experiencia: None,
            destaque: None,
        }
    }

    #[tokio::test]
    async fn test_profile_matches_direct_reads() {
        let repos = Repositories::in_memory();
        let pro = repos.professionals.create(ana()).await.unwrap();
        repos.skills.create(skill(pro.id, "Go", 7)).await.unwrap();
        repos.skills.create(skill(pro.id, "Rust", 9)).await.unwrap();
        repos
            .experiences
            .create(CreateExperienceDto {
                profissional_id: pro.id,
                empresa: "Acme".into(),
                cargo: "Dev".into(),
                data_inicio: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
                data_fim: None,
                atual: Some(true),
                descricao: None,
                tecnologias: Some("Go, Rust".into()),
            })
            .await
            .unwrap();

        let profile = repos.assemble_profile(pro.id).await.unwrap();

        assert_eq!(profile.profissional, pro);
        assert_eq!(
            profile.habilidades,
            repos.skills.find_by_professional(pro.id).await.unwrap()
        );
        assert_eq!(profile.habilidades[0].tecnologia, "Rust");
        assert_eq!(profile.experiencias.len(), 1);
        assert!(profile.formacao.is_empty());
        assert!(profile.idiomas.is_empty());
    }

    #[tokio::test]
    async fn test_missing_professional_is_not_found() {
        let repos = Repositories::in_memory();
        let err = repos.assemble_profile(404).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Profissional não encontrado");
    }

    #[tokio::test]
    async fn test_child_fault_wins_over_missing_professional() {
        let failing = Arc::new(MemoryStore::new());
        failing.set_offline(true);

        let mut repos = Repositories::in_memory();
        repos.experiences = failing;

        let err = repos.assemble_profile(404).await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(
            err,
            RepositoryError::Database(sqlx::Error::PoolTimedOut)
        ));
    }

    #[tokio::test]
    async fn test_storage_fault_fails_profile() {
        let store = Arc::new(MemoryStore::new());
        let repos = Repositories::from_memory(store.clone());
        let pro = repos.professionals.create(ana()).await.unwrap();

        store.set_offline(true);
        let err = repos.assemble_profile(pro.id).await.unwrap_err();
        assert!(!err.is_not_found());
    }
}
