//! Web layer module
//!
//! Thin axum handlers over the logo cache, the resolver and the roster.
//! Errors are mapped to status codes in [`responses::handle_error`].

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    config::Config,
    roster::Roster,
    services::{FeedbackService, LogoCacheService, LogoResolver},
};

pub mod extractors;
pub mod handlers;
pub mod responses;

pub use extractors::{CompanyListParams, PaginationParams, SearchParams};
pub use responses::{ApiResponse, CacheControl, PaginatedResponse, handle_error, handle_result};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub cache: LogoCacheService,
    pub resolver: Arc<LogoResolver>,
    pub roster: Arc<Roster>,
    pub feedback: Arc<FeedbackService>,
}

impl AppState {
    /// Wire the services described by `config`
    ///
    /// The cache starts out not ready; call [`LogoCacheService::initialize`]
    /// (usually in a background task) to load it.
    pub fn from_config(config: Config) -> Result<Self> {
        let cache = LogoCacheService::from_config(&config.storage);
        let resolver = LogoResolver::from_config(cache.clone(), &config.logos)
            .context("Failed to build logo resolver")?;

        let roster = match &config.storage.roster_csv_path {
            Some(path) => Roster::load(path)
                .with_context(|| format!("Failed to load roster {}", path.display()))?,
            None => {
                warn!("No roster configured; company endpoints will be empty");
                Roster::empty()
            }
        };

        let feedback = FeedbackService::new(config.feedback.clone().unwrap_or_default())
            .context("Failed to build feedback service")?;

        Ok(Self {
            config,
            cache,
            resolver: Arc::new(resolver),
            roster: Arc::new(roster),
            feedback: Arc::new(feedback),
        })
    }
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState) -> Result<Self> {
        let addr: SocketAddr =
            format!("{}:{}", state.config.web.host, state.config.web.port).parse()?;
        let app = create_router(state);
        Ok(Self { app, addr })
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Build the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/live", get(handlers::health::liveness_check))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Logo cache
        .route(
            "/logo-cache",
            get(handlers::logo_cache::get_cached_logo).post(handlers::logo_cache::cache_logo),
        )
        .route("/logo-cache/bulk", get(handlers::logo_cache::get_bulk_cache))
        // Logo lookup
        .route("/logo", get(handlers::logo::scrape_logo))
        .route("/logo/resolve", get(handlers::logo::resolve_logo))
        // Admin
        .route("/admin/save-logo", post(handlers::admin::save_logo))
        .route(
            "/admin/companies-without-logos",
            get(handlers::admin::companies_without_logos),
        )
        // Roster
        .route("/companies", get(handlers::companies::list_companies))
        .route("/companies/{id}", get(handlers::companies::get_company))
        .route("/students", get(handlers::companies::search_students))
        .route("/stats", get(handlers::companies::dashboard_stats))
        // Feedback
        .route("/feedback", post(handlers::feedback::submit_feedback))
}
