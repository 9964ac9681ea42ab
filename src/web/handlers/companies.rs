//! Roster browsing handlers: companies, students and dashboard metrics

use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use serde::Serialize;
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::{
    Company, CompanyFilter, DashboardStats, Industry, IndustryMetric, LocationMetric, Student,
};
use crate::roster::{filter_companies, search_companies};
use crate::web::{
    AppState,
    extractors::{CompanyListParams, SearchParams},
    responses::{PaginatedResponse, bad_request, handle_result, ok, validation_error},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail<'a> {
    #[serde(flatten)]
    pub company: &'a Company,
    pub students: Vec<&'a Student>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub stats: DashboardStats,
    pub industries: Vec<IndustryMetric>,
    pub locations: Vec<LocationMetric>,
}

/// GET /api/companies
pub async fn list_companies(
    State(state): State<AppState>,
    Query(params): Query<CompanyListParams>,
) -> Response {
    let pagination = params.pagination();
    if let Err(errors) = pagination.validate() {
        return validation_error(errors);
    }

    let industry = match params.industry.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(name) => match Industry::from_str(name) {
            Ok(industry) => Some(industry),
            Err(_) => return bad_request(&format!("Unknown industry '{name}'")),
        },
    };
    let filter = CompanyFilter {
        industry,
        city: params.city.filter(|c| !c.trim().is_empty()),
        min_interns: params.min_interns,
    };

    let matches = search_companies(state.roster.companies(), params.q.as_deref().unwrap_or(""));
    let filtered = filter_companies(matches, &filter);
    let page = pagination.apply(&filtered);

    ok(PaginatedResponse::new(
        page,
        filtered.len() as u64,
        pagination.page,
        pagination.limit,
    ))
}

/// GET /api/companies/{id}
pub async fn get_company(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let detail = state
        .roster
        .company(&id)
        .map(|company| CompanyDetail {
            company,
            students: state.roster.students_of(company),
        })
        .ok_or_else(|| AppError::not_found("Company", id.as_str()));
    handle_result(detail)
}

/// GET /api/students?q=
pub async fn search_students(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    ok(state.roster.search_students(params.q.as_deref().unwrap_or("")))
}

/// GET /api/stats
pub async fn dashboard_stats(State(state): State<AppState>) -> Response {
    let roster = &state.roster;
    ok(StatsResponse {
        stats: roster.stats(),
        industries: roster.industry_metrics(),
        locations: roster.location_metrics(),
    })
}
