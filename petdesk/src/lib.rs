//! # petdesk: pet records web application
//!
//! `petdesk` is a server-rendered web application for managing pet records. Each pet belongs to
//! an owner and has a type. Pages list the pets with their owner and type, filter them by name
//! and type, and create, edit and delete them through plain HTML forms.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! uses PostgreSQL for persistence. Pages are rendered on the server with minijinja templates
//! embedded into the binary.
//!
//! ### Request Flow
//!
//! A request is routed to a handler in [`api::handlers`]. Read-only pages query the database
//! through the repositories in [`db::handlers`] and render a view from [`views`]. Form
//! submissions are validated into a [`records::PetRecord`] first; nothing is written unless every
//! field is valid. Writes then go through [`records::Records`], which resolves the owner by name
//! (creating it when needed) before inserting or updating the pet. Successful writes answer with
//! a `303 See Other` redirect to `/`.
//!
//! Failures are mapped to plain-text responses by [`errors::Error`]: `400` for invalid input,
//! `404` for a missing pet, `500` for anything the database or renderer reports.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use petdesk::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = petdesk::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     petdesk::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations run automatically on startup. They create the schema and seed the pet types:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! petdesk::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod names;
pub mod records;
pub mod telemetry;
pub mod types;
pub mod validation;
pub mod views;

#[cfg(test)]
pub mod test_utils;

use crate::{
    api::handlers::{pets, static_assets},
    records::Records,
    views::Views,
};
use axum::{Router, routing::get};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info, instrument};

pub use types::{OwnerId, PetId, PetTypeId};

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder()
///     .db(pool.clone())
///     .config(config)
///     .records(Records::new(pool))
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub records: Records,
    #[builder(default)]
    pub views: Views,
}

/// Get the petdesk database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect to the configured database and bring its schema up to date.
#[instrument(skip_all)]
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let connect_options = config.database.connect_options()?;
    let pool = config.database.pool.pool_options().connect_with(connect_options).await?;

    migrator().run(&pool).await?;
    info!("Database migrations applied");

    Ok(pool)
}

/// Build the application router.
///
/// The pet pages are mounted at their fixed paths, `/healthz` answers `OK`, and every other path
/// falls through to the embedded static assets. When `enable_metrics` is set, request metrics
/// are recorded and exposed at `/internal/metrics`.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let enable_metrics = state.config.enable_metrics;

    let mut router = Router::new()
        .route("/", get(pets::list_pets))
        .route("/search", get(pets::search_pets))
        .route("/create", get(pets::create_form).post(pets::create_pet))
        .route("/edit/{id}", get(pets::edit_form).post(pets::update_pet))
        .route("/delete/{id}", get(pets::delete_form).post(pets::delete_pet))
        .route("/healthz", get(|| async { "OK" }))
        .fallback(static_assets::serve_embedded_asset)
        .with_state(state);

    if enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns the router, the pool and the configuration.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects to the database and runs migrations
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: once the shutdown future resolves, in-flight requests finish, then the pool
///    is closed and telemetry flushed
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting petdesk with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;
        Self::new_with_pool(config, pool)
    }

    /// Create an application around an existing, already migrated pool
    pub fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        let app_state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .records(Records::new(pool.clone()))
            .build();

        let router = build_router(app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("petdesk listening on http://{}, available at http://localhost:{}", bind_addr, self.config.port);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::AppState;
    use crate::{records::Records, test_utils::*};
    use sqlx::{ConnectOptions, PgPool};

    fn router_with_metrics(pool: PgPool, enable_metrics: bool) -> axum_test::TestServer {
        let mut config = create_test_config();
        config.enable_metrics = enable_metrics;

        let app_state = AppState::builder()
            .db(pool.clone())
            .config(config)
            .records(Records::new(pool))
            .build();
        let router = super::build_router(app_state).expect("Failed to build router");
        axum_test::TestServer::new(router).expect("Failed to create test server")
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_application_integration(pool: PgPool) {
        let mut config = create_test_config();
        config.database.url = Some(pool.connect_options().to_url_lossy().to_string());

        let app = crate::Application::new(config).await;
        assert!(app.is_ok(), "Application::new should succeed");
        let server = app.unwrap().into_test_server();

        let health_response = server.get("/healthz").await;
        assert_eq!(health_response.status_code().as_u16(), 200);
        assert_eq!(health_response.text(), "OK");

        let index_response = server.get("/").await;
        assert_eq!(index_response.status_code().as_u16(), 200);
        assert!(index_response.text().contains("<!DOCTYPE html>"));

        let style_response = server.get("/style.css").await;
        assert_eq!(style_response.status_code().as_u16(), 200);

        let missing_response = server.get("/does-not-exist").await;
        assert_eq!(missing_response.status_code().as_u16(), 404);
    }

    #[sqlx::test]
    async fn test_migrations_seed_pet_types(pool: PgPool) {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pet_types")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 6);
    }

    #[sqlx::test]
    async fn test_build_router_with_metrics_disabled(pool: PgPool) {
        let server = router_with_metrics(pool, false);

        // Falls through to the static asset fallback
        let metrics_response = server.get("/internal/metrics").await;
        assert_eq!(metrics_response.status_code().as_u16(), 404);
        let metrics_content = metrics_response.text();
        assert!(!metrics_content.contains("# HELP") && !metrics_content.contains("# TYPE"));
    }

    #[sqlx::test]
    async fn test_build_router_with_metrics_enabled(pool: PgPool) {
        let server = router_with_metrics(pool, true);

        // Record at least one request so the exporter has something to render
        server.get("/healthz").await;

        let metrics_response = server.get("/internal/metrics").await;
        assert_eq!(metrics_response.status_code().as_u16(), 200);

        let metrics_content = metrics_response.text();
        assert!(metrics_content.contains("# HELP") || metrics_content.contains("# TYPE"));
    }
}
