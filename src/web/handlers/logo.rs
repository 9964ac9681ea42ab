//! Logo lookup HTTP handlers

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::models::CompanyLogoQuery;
use crate::web::{
    AppState,
    responses::{CacheControl, bad_request, handle_error, ok, with_cache_headers},
};

#[derive(Debug, Deserialize)]
pub struct LogoParams {
    pub company: Option<String>,
    pub domain: Option<String>,
    pub size: Option<u32>,
}

/// GET /api/logo?company=&domain=
///
/// Discovers the domain when only a name is given and scrapes the homepage.
/// Nothing is probed or cached.
pub async fn scrape_logo(
    State(state): State<AppState>,
    Query(params): Query<LogoParams>,
) -> Response {
    match state
        .resolver
        .scrape_company(params.company.as_deref(), params.domain.as_deref())
        .await
    {
        Ok(result) => with_cache_headers(Json(result), CacheControl::ScrapedLogo),
        Err(AppError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": "Could not find company domain",
                "logoUrl": null,
            })),
        )
            .into_response(),
        Err(e) => handle_error(e),
    }
}

/// GET /api/logo/resolve?company=&domain=&size=
pub async fn resolve_logo(
    State(state): State<AppState>,
    Query(params): Query<LogoParams>,
) -> Response {
    let Some(company) = params
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    else {
        return bad_request("Company name required");
    };

    let mut query = CompanyLogoQuery::new(company);
    if let Some(domain) = params.domain.filter(|d| !d.trim().is_empty()) {
        query = query.with_domain(domain);
    }
    if let Some(size) = params.size {
        query = query.with_size(size);
    }

    let resolved = state.resolver.resolve(&query).await;
    info!(
        "Resolved '{}': source={:?} cached={} error={}",
        company, resolved.source, resolved.cached, resolved.error
    );
    ok(resolved)
}
