//! API routes
//!
//! Routes are declared in one table and registered in specificity order, so a
//! literal segment such as `disponiveis` is always tried before an `:id`
//! parameter at the same position, regardless of where it sits in the table.

use axum::{
    routing::{get, MethodRouter},
    Json, Router,
};
use serde_json::json;

use crate::error::ApiError;
use crate::extractors::AppState;
use crate::handlers::{curriculum, education, experiences, languages, professionals, skills};

/// Prefix shared by every resource route
pub const API_ROOT: &str = "/api";

/// Create the complete router
pub fn router() -> Router<AppState> {
    let api = ranked(api_routes())
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router.route(path, method_router)
        });

    Router::new()
        .route("/", get(api_directory))
        .nest(API_ROOT, api)
        .fallback(unknown_route)
}

fn api_routes() -> Vec<(&'static str, MethodRouter<AppState>)> {
    vec![
        // Professionals
        (
            "/profissionais",
            get(professionals::list_professionals).post(professionals::create_professional),
        ),
        (
            "/profissionais/:id",
            get(professionals::get_professional)
                .put(professionals::update_professional)
                .delete(professionals::delete_professional),
        ),
        (
            "/profissionais/disponiveis",
            get(professionals::list_available_professionals),
        ),
        (
            "/profissionais/nivel/:nivel",
            get(professionals::list_professionals_by_level),
        ),
        // Experiences
        (
            "/experiencias",
            get(experiences::list_experiences).post(experiences::create_experience),
        ),
        (
            "/experiencias/:id",
            get(experiences::get_experience)
                .put(experiences::update_experience)
                .delete(experiences::delete_experience),
        ),
        (
            "/experiencias/profissional/:profissional_id",
            get(experiences::list_professional_experiences),
        ),
        // Education
        (
            "/formacao",
            get(education::list_education).post(education::create_education),
        ),
        (
            "/formacao/:id",
            get(education::get_education)
                .put(education::update_education)
                .delete(education::delete_education),
        ),
        (
            "/formacao/profissional/:profissional_id",
            get(education::list_professional_education),
        ),
        // Skills
        (
            "/habilidades",
            get(skills::list_skills).post(skills::create_skill),
        ),
        (
            "/habilidades/:id",
            get(skills::get_skill)
                .put(skills::update_skill)
                .delete(skills::delete_skill),
        ),
        (
            "/habilidades/profissional/:profissional_id",
            get(skills::list_professional_skills),
        ),
        (
            "/habilidades/categoria/:categoria",
            get(skills::list_skills_by_category),
        ),
        // Languages
        (
            "/idiomas",
            get(languages::list_languages).post(languages::create_language),
        ),
        (
            "/idiomas/:id",
            get(languages::get_language)
                .put(languages::update_language)
                .delete(languages::delete_language),
        ),
        (
            "/idiomas/profissional/:profissional_id",
            get(languages::list_professional_languages),
        ),
        // Composite
        ("/curriculo/:profissional_id", get(curriculum::get_curriculum)),
    ]
}

/// Per-segment rank: 0 for a literal, 1 for a `:param` or `*wildcard`
fn specificity(path: &str) -> Vec<u8> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| u8::from(segment.starts_with(':') || segment.starts_with('*')))
        .collect()
}

/// Stable sort: literal segments win over parameters, compared left to right.
///
/// The router's matcher already prefers static segments; this ordering keeps the
/// precedence stated in the table rather than left to the matcher.
fn ranked<T>(mut routes: Vec<(&'static str, T)>) -> Vec<(&'static str, T)> {
    routes.sort_by_key(|(path, _)| specificity(path));
    routes
}

/// GET /
async fn api_directory() -> Json<serde_json::Value> {
    Json(json!({
        "message": "API de Currículos Profissionais funcionando!",
        "endpoints": {
            "profissionais": "/api/profissionais",
            "experiencias": "/api/experiencias",
            "formacao": "/api/formacao",
            "habilidades": "/api/habilidades",
            "idiomas": "/api/idiomas",
            "especiais": {
                "profissionais_disponiveis": "/api/profissionais/disponiveis",
                "por_nivel": "/api/profissionais/nivel/:nivel",
                "curriculo_completo": "/api/curriculo/:profissional_id",
                "habilidades_por_categoria": "/api/habilidades/categoria/:categoria"
            }
        }
    }))
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound("Rota não encontrada".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cv_db::{MemoryStore, Repositories};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(Repositories::from_memory(store.clone()));
        (router().with_state(state), store)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_ana(app: &Router) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/api/profissionais",
            Some(json!({
                "nome_completo": "Ana Silva",
                "email": "ana@x.com",
                "nivel_experiencia": "senior",
                "disponivel_contratacao": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    fn ids(body: &Value) -> Vec<i64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_literal_routes_rank_before_parameters() {
        let order: Vec<&str> = ranked(vec![
            ("/profissionais/:id", ()),
            ("/profissionais/nivel/:nivel", ()),
            ("/profissionais/disponiveis", ()),
            ("/profissionais", ()),
        ])
        .into_iter()
        .map(|(path, _)| path)
        .collect();

        assert_eq!(
            order,
            vec![
                "/profissionais",
                "/profissionais/disponiveis",
                "/profissionais/nivel/:nivel",
                "/profissionais/:id",
            ]
        );
    }

    #[tokio::test]
    async fn test_directory() {
        let (app, _) = test_app();
        let (status, body) = send(&app, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["profissionais"], "/api/profissionais");
        assert_eq!(
            body["endpoints"]["especiais"]["curriculo_completo"],
            "/api/curriculo/:profissional_id"
        );
    }

    #[tokio::test]
    async fn test_professional_lifecycle() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        let (status, body) = send(&app, "GET", "/api/profissionais/disponiveis", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(ids(&body).contains(&id));

        let (status, body) = send(&app, "GET", "/api/profissionais/nivel/senior", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(ids(&body).contains(&id));

        let (_, body) = send(&app, "GET", "/api/profissionais/nivel/Senior", None).await;
        assert!(ids(&body).is_empty());

        let (status, body) = send(&app, "DELETE", &format!("/api/profissionais/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Profissional deletado com sucesso" }));

        let (status, body) = send(&app, "GET", &format!("/api/profissionais/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Profissional não encontrado" }));
    }

    #[tokio::test]
    async fn test_created_record_matches_fetch() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        let (status, body) = send(&app, "GET", &format!("/api/profissionais/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["nome_completo"], "Ana Silva");
        assert_eq!(body["email"], "ana@x.com");
        assert_eq!(body["nivel_experiencia"], "senior");
        assert_eq!(body["disponivel_contratacao"], true);
        assert_eq!(body["telefone"], Value::Null);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_return_not_found() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/profissionais/999",
            Some(json!({ "nome_completo": "Outra", "email": "o@x.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Profissional não encontrado");

        let (status, body) = send(&app, "DELETE", "/api/idiomas/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Idioma não encontrado");

        let (_, body) = send(&app, "GET", "/api/profissionais", None).await;
        assert_eq!(ids(&body), vec![id]);
        assert_eq!(body[0]["nome_completo"], "Ana Silva");
    }

    #[tokio::test]
    async fn test_full_update_replaces_fields() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/profissionais/{id}"),
            Some(json!({
                "nome_completo": "Ana Souza",
                "email": "ana@y.com",
                "nivel_experiencia": "pleno",
                "unknown_field": "ignored"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
        assert_eq!(body["nome_completo"], "Ana Souza");
        assert_eq!(body["disponivel_contratacao"], Value::Null);
    }

    #[tokio::test]
    async fn test_skill_category_carries_professional_name() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        let (status, skill) = send(
            &app,
            "POST",
            "/api/habilidades",
            Some(json!({
                "profissional_id": id,
                "tecnologia": "Go",
                "categoria": "backend",
                "nivel_proficiencia": 9
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "GET", "/api/habilidades/categoria/backend", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], skill["id"]);
        assert_eq!(rows[0]["profissional_nome"], "Ana Silva");
    }

    #[tokio::test]
    async fn test_child_lifecycle() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        let (status, created) = send(
            &app,
            "POST",
            "/api/idiomas",
            Some(json!({ "profissional_id": id, "idioma": "Inglês", "nivel": "fluente" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let language_id = created["id"].as_i64().unwrap();

        let (_, listed) = send(&app, "GET", "/api/idiomas", None).await;
        assert_eq!(listed[0]["profissional_nome"], "Ana Silva");

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/idiomas/{language_id}"),
            Some(json!({ "profissional_id": 12345, "idioma": "Inglês", "nivel": "nativo" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["nivel"], "nativo");
        assert_eq!(updated["profissional_id"], id);

        let (status, _) = send(&app, "DELETE", &format!("/api/idiomas/{language_id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", &format!("/api/idiomas/{language_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Idioma não encontrado");
    }

    #[tokio::test]
    async fn test_listing_by_professional_is_ordered() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        for (company, start) in [("A", "2018-01-01"), ("B", "2023-06-01"), ("C", "2020-03-15")] {
            send(
                &app,
                "POST",
                "/api/experiencias",
                Some(json!({
                    "profissional_id": id,
                    "empresa": company,
                    "cargo": "Dev",
                    "data_inicio": start
                })),
            )
            .await;
        }

        let (status, body) = send(&app, "GET", &format!("/api/experiencias/profissional/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let companies: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["empresa"].as_str().unwrap())
            .collect();
        assert_eq!(companies, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn test_curriculum() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        send(
            &app,
            "POST",
            "/api/formacao",
            Some(json!({
                "profissional_id": id,
                "instituicao": "USP",
                "curso": "Ciência da Computação",
                "data_inicio": "2012-02-01",
                "concluido": true
            })),
        )
        .await;

        let (status, body) = send(&app, "GET", &format!("/api/curriculo/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profissional"]["id"], id);
        assert_eq!(body["formacao"][0]["instituicao"], "USP");
        assert_eq!(body["experiencias"], json!([]));
        assert_eq!(body["habilidades"], json!([]));
        assert_eq!(body["idiomas"], json!([]));

        let (status, body) = send(&app, "GET", "/api/curriculo/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Profissional não encontrado");
    }

    #[tokio::test]
    async fn test_malformed_input_is_a_validation_error() {
        let (app, _) = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/profissionais",
            Some(json!({ "nome_completo": "Sem Email" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("email"));

        let (status, body) = send(&app, "GET", "/api/profissionais/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_storage_faults_are_internal_errors() {
        let (app, store) = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/experiencias",
            Some(json!({
                "profissional_id": 77,
                "empresa": "Acme",
                "cargo": "Dev",
                "data_inicio": "2020-01-01"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("foreign key"));

        store.set_offline(true);
        let (status, body) = send(&app, "GET", "/api/profissionais", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (app, _) = test_app();
        let (status, body) = send(&app, "GET", "/api/desconhecido", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Rota não encontrada");
    }

    async fn create_row(app: &Router, uri: &str, body: Value) -> i64 {
        let (status, created) = send(app, "POST", uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        created["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_update_missing_child_leaves_collection_unchanged() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        create_row(
            &app,
            "/api/experiencias",
            json!({ "profissional_id": id, "empresa": "Acme", "cargo": "Dev", "data_inicio": "2020-01-01" }),
        )
        .await;
        create_row(
            &app,
            "/api/formacao",
            json!({ "profissional_id": id, "instituicao": "USP", "curso": "BCC", "data_inicio": "2012-02-01" }),
        )
        .await;
        create_row(
            &app,
            "/api/habilidades",
            json!({ "profissional_id": id, "tecnologia": "Go", "nivel_proficiencia": 7 }),
        )
        .await;

        let cases = [
            (
                "/api/experiencias",
                json!({ "empresa": "Outra", "cargo": "CTO", "data_inicio": "2021-01-01" }),
                "Experiência não encontrada",
            ),
            (
                "/api/formacao",
                json!({ "instituicao": "Unicamp", "curso": "EC", "data_inicio": "2013-02-01" }),
                "Formação não encontrada",
            ),
            (
                "/api/habilidades",
                json!({ "tecnologia": "Rust", "nivel_proficiencia": 10 }),
                "Habilidade não encontrada",
            ),
        ];

        for (collection, body, message) in cases {
            let (_, before) = send(&app, "GET", collection, None).await;

            let (status, error) = send(&app, "PUT", &format!("{collection}/999"), Some(body)).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(error, json!({ "error": message }));

            let (_, after) = send(&app, "GET", collection, None).await;
            assert_eq!(before, after);
        }
    }

    #[tokio::test]
    async fn test_education_by_professional_ordered_with_ties() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        let mut created = Vec::new();
        for (course, start) in [("A", "2015-02-01"), ("B", "2019-03-01"), ("C", "2015-02-01")] {
            created.push(
                create_row(
                    &app,
                    "/api/formacao",
                    json!({
                        "profissional_id": id,
                        "instituicao": "USP",
                        "curso": course,
                        "data_inicio": start
                    }),
                )
                .await,
            );
        }

        let (status, body) = send(&app, "GET", &format!("/api/formacao/profissional/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![created[1], created[0], created[2]]);
    }

    #[tokio::test]
    async fn test_skills_by_professional_ordered_with_ties() {
        let (app, _) = test_app();
        let id = create_ana(&app).await;

        let mut created = Vec::new();
        for (tech, level) in [("Go", 7), ("Rust", 9), ("SQL", 7), ("Python", 9)] {
            created.push(
                create_row(
                    &app,
                    "/api/habilidades",
                    json!({ "profissional_id": id, "tecnologia": tech, "nivel_proficiencia": level }),
                )
                .await,
            );
        }

        let (status, body) = send(&app, "GET", &format!("/api/habilidades/profissional/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![created[1], created[3], created[0], created[2]]);
    }
}
