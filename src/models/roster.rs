use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One row of the placement roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Matric number doubles as the identifier
    pub id: String,
    pub name: String,
    pub matric_no: String,
    pub reg_no: String,
    pub level: u32,
    pub department: String,
    pub company_id: String,
    pub company_name: String,
    pub company_address: String,
    pub email: String,
    pub phone: String,
    pub parent_phone: String,
    pub has_internship: bool,
    /// LinkedIn people search for this student
    pub linkedin_url: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum Industry {
    #[strum(serialize = "Banking & Fintech")]
    #[serde(rename = "Banking & Fintech")]
    BankingFintech,
    #[strum(serialize = "IT & Consulting")]
    #[serde(rename = "IT & Consulting")]
    ItConsulting,
    #[strum(serialize = "Telecommunications")]
    Telecommunications,
    #[strum(serialize = "Energy & Oil/Gas")]
    #[serde(rename = "Energy & Oil/Gas")]
    EnergyOilGas,
    Government,
    Manufacturing,
    Education,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CompanyBadge {
    Popular,
    Validated,
    Emerging,
}

impl CompanyBadge {
    pub fn for_intern_count(count: usize) -> Self {
        if count >= 5 {
            CompanyBadge::Popular
        } else if count >= 2 {
            CompanyBadge::Validated
        } else {
            CompanyBadge::Emerging
        }
    }
}

/// A placement company aggregated from the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Slug of the first spelling seen
    pub id: String,
    pub name: String,
    pub name_variations: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub intern_count: usize,
    pub student_ids: Vec<String>,
    pub industry: Industry,
    pub tags: Vec<String>,
    pub rank: usize,
    pub badge: CompanyBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_companies: usize,
    pub average_interns_per_company: f64,
    pub top_industry: String,
    pub top_city: String,
    pub most_popular_company: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryMetric {
    pub name: Industry,
    pub count: usize,
    pub percentage: f64,
    pub top_companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMetric {
    pub city: String,
    pub state: String,
    pub count: usize,
    pub top_companies: Vec<String>,
}

/// Roster company still missing a usable logo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyLogoGap {
    pub name: String,
    pub intern_count: usize,
    pub current_logo: Option<String>,
}

/// Criteria accepted by the company listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyFilter {
    pub industry: Option<Industry>,
    pub city: Option<String>,
    pub min_interns: Option<usize>,
}
