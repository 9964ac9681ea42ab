//! Placement roster: parsed students and the companies they were placed at
//!
//! The roster is loaded once at start-up and never mutated, so it can be
//! shared behind an `Arc` without locking.

mod aggregate;
mod parser;

pub use aggregate::{
    aggregate_companies, companies_without_logos, dashboard_stats, detect_industry,
    extract_city, extract_state, filter_companies, industry_metrics, location_metrics,
    search_companies, search_students,
};
pub use parser::{
    UNASSIGNED_COMPANY_ID, UNASSIGNED_COMPANY_NAME, linkedin_search_url, load_students,
    normalize_phone, parse_students, slugify,
};

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::errors::RosterResult;
use crate::models::{
    Company, CompanyLogoGap, DashboardStats, IndustryMetric, LocationMetric, Student,
};
use crate::services::LogoCacheEntry;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<Student>,
    companies: Vec<Company>,
}

impl Roster {
    pub fn new(students: Vec<Student>) -> Self {
        let companies = aggregate_companies(&students);
        Self {
            students,
            companies,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> RosterResult<Self> {
        Ok(Self::new(parse_students(reader)?))
    }

    pub fn load(path: &Path) -> RosterResult<Self> {
        let roster = Self::new(load_students(path)?);
        info!(
            "Loaded roster from {}: {} students, {} companies",
            path.display(),
            roster.students.len(),
            roster.companies.len()
        );
        Ok(roster)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Companies in rank order
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn students_of(&self, company: &Company) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.has_internship && s.company_id == company.id)
            .collect()
    }

    pub fn stats(&self) -> DashboardStats {
        dashboard_stats(&self.students, &self.companies)
    }

    pub fn industry_metrics(&self) -> Vec<IndustryMetric> {
        industry_metrics(&self.companies)
    }

    pub fn location_metrics(&self) -> Vec<LocationMetric> {
        location_metrics(&self.companies)
    }

    pub fn search_students(&self, query: &str) -> Vec<&Student> {
        search_students(&self.students, query)
    }

    pub fn companies_without_logos(
        &self,
        cache: &HashMap<String, LogoCacheEntry>,
    ) -> Vec<CompanyLogoGap> {
        companies_without_logos(&self.students, cache)
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
