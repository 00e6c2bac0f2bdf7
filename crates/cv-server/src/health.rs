//! Health checks
//!
//! Liveness never touches the store. Readiness pings PostgreSQL and reports
//! 503 while it is unreachable.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cv_db::Database;
use serde::Serialize;
use tracing::warn;

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Overall health report
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Health checker service
pub struct HealthChecker {
    start_time: Instant,
    database: Option<Database>,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            database: None,
        }
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    pub async fn check(&self) -> HealthReport {
        let mut components = Vec::new();

        if let Some(ref database) = self.database {
            components.push(check_database(database).await);
        }

        let status = if components
            .iter()
            .any(|component| component.status == HealthStatus::Unhealthy)
        {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };

        HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

async fn check_database(database: &Database) -> ComponentHealth {
    let start = Instant::now();

    let (status, message) = match database.ping().await {
        Ok(()) => (HealthStatus::Healthy, "Connected".to_string()),
        Err(e) => {
            warn!(error = %e, "Database ping failed");
            (HealthStatus::Unhealthy, e.to_string())
        }
    };

    ComponentHealth {
        name: "database".to_string(),
        status,
        message: Some(message),
        response_time_ms: start.elapsed().as_millis() as u64,
        details: serde_json::to_value(database.stats()).ok(),
    }
}

/// GET /health
pub async fn liveness() -> &'static str {
    "OK"
}

/// GET /health/ready
pub async fn readiness(
    State(checker): State<Arc<HealthChecker>>,
) -> (StatusCode, Json<HealthReport>) {
    let report = checker.check().await;
    (report.http_status(), Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_db::DatabaseConfig;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    fn unreachable_database() -> Database {
        let config = DatabaseConfig::with_url("postgres://nobody@127.0.0.1:1/nothing");
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy(&config.url)
            .unwrap();
        Database::from_pool(pool)
    }

    #[tokio::test]
    async fn test_no_components_is_healthy() {
        let report = HealthChecker::new().check().await;

        assert_eq!(report.status, HealthStatus::Healthy);
        assert!(report.components.is_empty());
        assert_eq!(report.http_status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unreachable_database_is_unhealthy() {
        let checker = HealthChecker::new().with_database(unreachable_database());
        let report = checker.check().await;

        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.components[0].name, "database");
        assert_eq!(report.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
