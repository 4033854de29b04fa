//! docket HTTP shell: axum router over the template catalogue, the
//! normalizer, and the renderers.
//!
//! | Method | Path                         | Handler                              |
//! |--------|------------------------------|--------------------------------------|
//! | GET    | `/health`                    | [`handlers::health`]                 |
//! | GET    | `/api/templates`             | [`handlers::list_templates`]         |
//! | GET    | `/api/templates/{id}`        | [`handlers::get_template`]           |
//! | POST   | `/api/templates/render`      | [`handlers::render_template`]        |
//! | GET    | `/api/templates/render/{id}` | [`handlers::preview_template`]       |
//! | GET    | `/api/templates/render`      | [`handlers::preview_without_id`]     |
//!
//! Collaborators are injected through [`AppState`]; nothing here holds global
//! state, so tests build a router with fakes and drive it with
//! `tower::ServiceExt::oneshot`.

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::routing::get;
use axum::Router;
use docket_core::config::Config;
use docket_core::{BuiltinTemplates, TemplateRepository};
use docket_render::{ChromiumPdfRenderer, HandlebarsRenderer, HtmlRenderer, PdfRenderer};
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Shared, immutable collaborators. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<dyn TemplateRepository>,
    pub html: Arc<dyn HtmlRenderer>,
    pub pdf: Arc<dyn PdfRenderer>,
    /// Supplies "today" for date defaults; swapped out in tests.
    pub today: Arc<dyn Fn() -> chrono::NaiveDate + Send + Sync>,
}

impl AppState {
    /// Production wiring: built-in catalogue, Handlebars, headless Chromium,
    /// local wall-clock date.
    pub fn from_config(config: &Config) -> Self {
        Self {
            templates: Arc::new(BuiltinTemplates::new()),
            html: Arc::new(HandlebarsRenderer::new()),
            pdf: Arc::new(ChromiumPdfRenderer::new(&config.pdf)),
            today: Arc::new(|| chrono::Local::now().date_naive()),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/templates", get(handlers::list_templates))
        .route(
            "/api/templates/render",
            get(handlers::preview_without_id).post(handlers::render_template),
        )
        .route("/api/templates/render/{id}", get(handlers::preview_template))
        .route("/api/templates/{id}", get(handlers::get_template))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(axum::middleware::from_fn(middleware::cors))
        .with_state(state)
}

/// Bind and serve until the process is interrupted.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let active = state.templates.list_active().len();
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(
        addr = %listener.local_addr()?,
        templates = active,
        "template server running"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("template server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
