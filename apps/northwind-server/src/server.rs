//! Database connection and router assembly for the host.

use anyhow::{Context, Result};
use apikit::{DbModule, OpenApiInfo, OpenApiRegistryImpl, RestfulModule};
use axum::{Json, Router, routing::get};
use northwind::NorthwindModule;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tower_http::trace::TraceLayer;
use tracing::info;
use weather::WeatherModule;

use crate::config::{AppConfig, DatabaseConfig};

pub const OPENAPI_PATH: &str = "/api/openapi.json";

pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.max_connections(cfg.max_connections).sqlx_logging(false);
    if cfg.dsn.contains(":memory:") {
        // The database lives only as long as its single connection.
        opts.min_connections(1);
    }

    let db = Database::connect(opts)
        .await
        .context("failed to connect to database")?;
    info!(backend = ?db.get_database_backend(), "Database connection established");
    Ok(db)
}

/// Migrate, optionally seed, and mount every module under one router.
pub async fn build_app(config: &AppConfig, db: DatabaseConnection) -> Result<Router> {
    let northwind = NorthwindModule::new(db);
    northwind.migrate().await?;
    if config.database.seed {
        info!("Loading sample data");
        northwind.seed_sample_data().await?;
    }

    let weather = WeatherModule::from_config(&config.weather)?;

    let registry = OpenApiRegistryImpl::new();
    let modules: [&dyn RestfulModule; 2] = [&northwind, &weather];
    let mut router = Router::new();
    for module in modules {
        router = module
            .register_rest(router, &registry)
            .with_context(|| format!("module '{}' failed to register routes", module.name()))?;
    }

    let doc = serde_json::to_value(registry.build_openapi(&OpenApiInfo::default()))
        .context("failed to serialize OpenAPI document")?;
    let router = router.route(
        OPENAPI_PATH,
        get(move || {
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    );

    info!(
        operations = registry.operation_count(),
        "All modules registered"
    );
    Ok(router.layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::{CliOverrides, MOCK_DSN};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn mock_app() -> Router {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            mock: true,
            ..CliOverrides::default()
        });
        assert_eq!(config.database.dsn, MOCK_DSN);

        let db = connect(&config.database).await.unwrap();
        build_app(&config, db).await.unwrap()
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn mock_mode_serves_seeded_regions() {
        let (status, body) = get_json(mock_app().await, "/api/regions").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn openapi_document_lists_every_module() {
        let (status, doc) = get_json(mock_app().await, OPENAPI_PATH).await;
        assert_eq!(status, StatusCode::OK);

        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/api/employees",
            "/api/employees/{id}",
            "/api/products/{id}",
            "/api/regions",
            "/api/weather",
            "/api/weatherbureau/{city}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(doc["components"]["schemas"]["Problem"].is_object());
    }

    #[tokio::test]
    async fn seeded_file_database_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.database.dsn = format!("sqlite://{}?mode=rwc", dir.path().join("nw.db").display());
        config.database.seed = true;

        for _ in 0..2 {
            let db = connect(&config.database).await.unwrap();
            let app = build_app(&config, db.clone()).await.unwrap();
            let (status, body) = get_json(app, "/api/regions").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body.as_array().map(Vec::len), Some(4));
            db.close().await.unwrap();
        }
    }
}
