//! HTTP response types and utilities
//!
//! Errors from every endpoint leave through [`handle_error`], so failures
//! share one envelope: `{ "success": false, "error": ..., "timestamp": ... }`.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;

use crate::errors::{AppError, AppResult};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            details: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_with_details(
        message: String,
        details: HashMap<String, String>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            details: Some(details),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(self)).into_response()
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Current page number (1-based)
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, per_page: u32) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page as u64) as u32
        } else {
            1
        };

        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

/// `Cache-Control` policies used by the public endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheControl {
    /// Bulk cache document: one hour at the edge, a day stale
    BulkSnapshot,
    /// Bulk endpoint with no backing file yet
    BulkEmpty,
    /// Scraped logos change rarely: a day at the edge, a week stale
    ScrapedLogo,
}

impl CacheControl {
    pub fn header_value(self) -> &'static str {
        match self {
            CacheControl::BulkSnapshot => "public, s-maxage=3600, stale-while-revalidate=86400",
            CacheControl::BulkEmpty => "public, s-maxage=3600",
            CacheControl::ScrapedLogo => "public, s-maxage=86400, stale-while-revalidate=604800",
        }
    }
}

/// Attach a `Cache-Control` header to any response
pub fn with_cache_headers(response: impl IntoResponse, policy: CacheControl) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(policy.header_value()),
    );
    response
}

/// Helper function to convert AppResult to HTTP response
pub fn handle_result<T>(result: AppResult<T>) -> Response
where
    T: Serialize,
{
    match result {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::success(data))).into_response(),
        Err(error) => handle_error(error),
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = match &error {
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AppError::NotFound { resource, id } => (
            StatusCode::NOT_FOUND,
            format!("{} with id '{}' not found", resource, id),
        ),
        AppError::Configuration { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Configuration error: {}", message),
        ),
        AppError::ExternalService { service, message } => (
            StatusCode::BAD_GATEWAY,
            format!("External service error ({}): {}", service, message),
        ),
        AppError::Http(_) => (
            StatusCode::BAD_GATEWAY,
            "External service communication failed".to_string(),
        ),
        AppError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Logo cache operation failed".to_string(),
        ),
        AppError::Roster(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Roster data unavailable".to_string(),
        ),
        AppError::Internal { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", message),
        ),
    };

    if status.is_server_error() {
        error!("Request failed: {}", error);
    }

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

/// Success response helpers
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// Error response helpers
pub fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(message.to_string())),
    )
        .into_response()
}

pub fn service_unavailable(message: &str) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiResponse::<()>::error(message.to_string())),
    )
        .into_response()
}

/// Validation error detail for a single field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub field: String,
    pub message: String,
}

pub fn validation_error(errors: Vec<ValidationErrorResponse>) -> Response {
    let details = errors
        .into_iter()
        .map(|error| (error.field, error.message))
        .collect();

    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error_with_details(
            "Validation failed".to_string(),
            details,
        )),
    )
        .into_response()
}
