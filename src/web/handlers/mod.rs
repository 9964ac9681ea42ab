//! HTTP request handlers organized by domain

pub mod admin;
pub mod companies;
pub mod feedback;
pub mod health;
pub mod logo;
pub mod logo_cache;
