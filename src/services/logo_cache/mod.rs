//! Persistent logo cache
//!
//! A JSON document on disk holds every resolved logo keyed by normalized
//! company name. At start-up it is loaded into an in-memory index which is
//! consulted before any network call; inserts update the index immediately
//! and reach the file through a serialized background write.

pub mod entry;
pub mod service;
pub mod store;

pub use entry::{LogoCacheDocument, LogoCacheEntry};
pub use service::{CacheLookup, LogoCacheService, PendingWrite};
pub use store::{LogoCacheStore, StoreSnapshot, WriteOutcome};
