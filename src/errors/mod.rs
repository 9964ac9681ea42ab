//! Centralized error handling for the logo resolver
//!
//! # Error Categories
//!
//! - **Store Errors**: reading and writing the persisted logo cache
//! - **Roster Errors**: loading the placement roster CSV
//! - **Validation Errors**: bad request input
//! - **External Service Errors**: upstream APIs the caller explicitly asked for
//!
//! # Usage
//!
//! ```rust
//! use logo_resolver::errors::{AppError, AppResult};
//!
//! fn require_name(name: &str) -> AppResult<&str> {
//!     if name.trim().is_empty() {
//!         return Err(AppError::validation("company name is required"));
//!     }
//!     Ok(name)
//! }
//! # assert!(require_name(" ").is_err());
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for store Results
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for roster Results
pub type RosterResult<T> = Result<T, RosterError>;
