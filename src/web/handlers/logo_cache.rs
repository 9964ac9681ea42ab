//! Logo cache HTTP handlers
//!
//! Response bodies match what the dashboard front end already consumes, so
//! successful replies are bare JSON objects rather than the envelope.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::models::LogoSource;
use crate::services::{CacheLookup, LogoCacheEntry, WriteOutcome};
use crate::utils::company_initials;
use crate::web::{
    AppState,
    responses::{
        CacheControl, bad_request, handle_error, service_unavailable, with_cache_headers,
    },
};

#[derive(Debug, Deserialize)]
pub struct CompanyParam {
    pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheLogoRequest {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub source: Option<LogoSource>,
    #[serde(default)]
    pub initials: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// GET /api/logo-cache/bulk
pub async fn get_bulk_cache(State(state): State<AppState>) -> Response {
    let snapshot = state.cache.load_all().await;
    if snapshot.exists {
        debug!("Serving bulk logo cache ({} entries)", snapshot.document.cache.len());
        with_cache_headers(Json(snapshot.document.as_ref()), CacheControl::BulkSnapshot)
    } else {
        with_cache_headers(
            Json(json!({ "cache": {}, "lastUpdated": null })),
            CacheControl::BulkEmpty,
        )
    }
}

/// GET /api/logo-cache?company=
///
/// Answers 503 until the index is loaded rather than holding the request.
pub async fn get_cached_logo(
    State(state): State<AppState>,
    Query(params): Query<CompanyParam>,
) -> Response {
    let Some(company) = non_empty(params.company.as_deref()) else {
        return bad_request("Company name required");
    };

    match state.cache.lookup(company).await {
        CacheLookup::Hit(entry) => Json(json!({
            "logoUrl": entry.url,
            "source": entry.source,
            "cached": true,
        }))
        .into_response(),
        CacheLookup::Miss => (
            StatusCode::NOT_FOUND,
            Json(json!({ "logoUrl": null, "cached": false })),
        )
            .into_response(),
        CacheLookup::Loading => service_unavailable("Logo cache is still loading"),
    }
}

/// POST /api/logo-cache
pub async fn cache_logo(
    State(state): State<AppState>,
    body: Result<Json<CacheLogoRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    let (Some(company_name), Some(logo_url)) = (
        non_empty(request.company_name.as_deref()),
        non_empty(request.logo_url.as_deref()),
    ) else {
        return bad_request("Company name and logo URL required");
    };

    let initials = non_empty(request.initials.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| company_initials(company_name));
    let entry = LogoCacheEntry::new(logo_url, request.source.unwrap_or_default(), initials);

    match state.cache.put(company_name, entry).await {
        Ok(WriteOutcome::Durable) => {
            info!("Cached logo for '{}'", company_name);
            Json(json!({ "success": true, "cached": true })).into_response()
        }
        Ok(WriteOutcome::NotDurable { reason }) => {
            warn!("Logo for '{}' cached in memory only: {}", company_name, reason);
            Json(json!({ "success": true, "cached": true, "warning": reason })).into_response()
        }
        Err(e) => handle_error(e),
    }
}
