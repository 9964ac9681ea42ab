pub mod logo;
pub mod roster;

pub use logo::{CompanyLogoQuery, LogoSource, ResolvedLogo, ScrapeResult, ScrapeSource};
pub use roster::{
    Company, CompanyBadge, CompanyFilter, CompanyLogoGap, DashboardStats, Industry,
    IndustryMetric, LocationMetric, Student,
};
