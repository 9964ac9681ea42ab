//! Query parameter types shared by the listing endpoints

use serde::Deserialize;

use crate::web::responses::ValidationErrorResponse;

const MAX_LIMIT: u32 = 1000;

/// Pagination parameters from query string
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), Vec<ValidationErrorResponse>> {
        let mut errors = Vec::new();

        if self.page < 1 {
            errors.push(ValidationErrorResponse {
                field: "page".to_string(),
                message: "Page must be >= 1".to_string(),
            });
        }

        if self.limit < 1 || self.limit > MAX_LIMIT {
            errors.push(ValidationErrorResponse {
                field: "limit".to_string(),
                message: format!("Limit must be between 1 and {MAX_LIMIT}"),
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Index of the first item on the requested page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }

    /// Slice one page out of `items`
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .cloned()
            .collect()
    }
}

/// Search, filter and paging parameters of the company listing
///
/// Paging fields are inlined; `serde(flatten)` cannot parse numbers out of
/// a query string.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyListParams {
    pub q: Option<String>,
    pub industry: Option<String>,
    pub city: Option<String>,
    pub min_interns: Option<usize>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl CompanyListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}
