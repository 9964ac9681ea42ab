//! Operator endpoints for curating the logo cache

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::models::LogoSource;
use crate::services::WriteOutcome;
use crate::web::{
    AppState,
    responses::{bad_request, handle_error},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLogoRequest {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub source: Option<LogoSource>,
}

/// POST /api/admin/save-logo
pub async fn save_logo(
    State(state): State<AppState>,
    body: Result<Json<SaveLogoRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    info!(
        "Saving logo for '{}': {} ({:?})",
        request.company_name, request.logo_url, request.source
    );

    let company = request.company_name.trim().to_string();
    match state
        .resolver
        .save_manual(&company, &request.logo_url, request.source)
        .await
    {
        Ok(WriteOutcome::Durable) => Json(json!({
            "success": true,
            "message": format!("Logo saved for {company}"),
        }))
        .into_response(),
        Ok(WriteOutcome::NotDurable { reason }) => {
            warn!("Logo for '{}' kept in memory only: {}", company, reason);
            Json(json!({
                "success": true,
                "warning": format!("Changes saved temporarily and will not persist: {reason}"),
                "message": format!("Logo saved for {company} (memory only)"),
            }))
            .into_response()
        }
        Err(e) => handle_error(e),
    }
}

/// GET /api/admin/companies-without-logos
pub async fn companies_without_logos(State(state): State<AppState>) -> Response {
    state.cache.wait_ready().await;
    let entries = state.cache.entries().await;
    let companies = state.roster.companies_without_logos(&entries);

    info!("{} roster companies need logos", companies.len());
    Json(json!({
        "success": true,
        "total": companies.len(),
        "companies": companies,
    }))
    .into_response()
}
