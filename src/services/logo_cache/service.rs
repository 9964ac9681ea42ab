//! Logo cache service: in-memory index over the persisted store

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::entry::LogoCacheEntry;
use super::store::{LogoCacheStore, StoreSnapshot, WriteOutcome};
use crate::config::StorageConfig;
use crate::errors::{AppError, AppResult, StoreError};
use crate::utils::normalize_company_name;

/// Readiness-aware lookup result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// The index has not been loaded yet
    Loading,
    Hit(LogoCacheEntry),
    Miss,
}

/// Durable half of an insert, running in the background
///
/// The index is already updated when this is handed out. Await it to learn
/// whether the entry reached the store, or drop it to let the write finish
/// on its own.
pub struct PendingWrite {
    handle: JoinHandle<Result<WriteOutcome, StoreError>>,
}

impl PendingWrite {
    pub async fn outcome(self) -> AppResult<WriteOutcome> {
        self.await
    }
}

impl Future for PendingWrite {
    type Output = AppResult<WriteOutcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(result) => result.map_err(AppError::from),
            Err(e) => Err(AppError::from(StoreError::WriteAborted {
                message: e.to_string(),
            })),
        })
    }
}

/// Persistent logo cache with an in-memory index
#[derive(Clone)]
pub struct LogoCacheService {
    /// Primary index: normalized company name -> entry
    index: Arc<RwLock<HashMap<String, LogoCacheEntry>>>,
    store: Arc<LogoCacheStore>,
    ready: Arc<watch::Sender<bool>>,
}

impl LogoCacheService {
    pub fn new(store: LogoCacheStore) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            index: Arc::new(RwLock::new(HashMap::new())),
            store: Arc::new(store),
            ready: Arc::new(ready),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(LogoCacheStore::new(
            config.logo_cache_path.clone(),
            config.read_only,
            config.bulk_snapshot_ttl,
        ))
    }

    /// Load the index from the store and mark the cache ready
    pub async fn initialize(&self) -> usize {
        let loaded = self.reload().await;
        self.ready.send_replace(true);
        info!(
            "Logo cache initialized with {} entries from {}",
            loaded,
            self.store.path().display()
        );
        loaded
    }

    /// Rebuild the index from scratch
    pub async fn reload(&self) -> usize {
        let document = self.store.read().await;
        let mut index = self.index.write().await;
        index.clear();
        for (key, entry) in document.cache {
            index.insert(normalize_company_name(&key), entry);
        }
        index.len()
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Resolve once `initialize` has completed
    pub async fn wait_ready(&self) {
        let mut rx = self.ready.subscribe();
        if rx.wait_for(|ready| *ready).await.is_err() {
            warn!("Logo cache readiness channel closed before initialization");
        }
    }

    /// Non-blocking read that reports `Loading` instead of waiting
    pub async fn lookup(&self, company_name: &str) -> CacheLookup {
        if !self.is_ready() {
            return CacheLookup::Loading;
        }
        match self.get(company_name).await {
            Some(entry) => CacheLookup::Hit(entry),
            None => CacheLookup::Miss,
        }
    }

    pub async fn get(&self, company_name: &str) -> Option<LogoCacheEntry> {
        let key = normalize_company_name(company_name);
        self.index.read().await.get(&key).cloned()
    }

    /// Copy of the whole index, keyed by normalized company name
    pub async fn entries(&self) -> HashMap<String, LogoCacheEntry> {
        self.index.read().await.clone()
    }

    /// Update the index now and persist in the background
    pub async fn insert(&self, company_name: &str, entry: LogoCacheEntry) -> PendingWrite {
        let key = normalize_company_name(company_name);
        self.index.write().await.insert(key.clone(), entry.clone());
        debug!("Logo cache index updated for '{}' ({})", key, entry.source);

        let store = self.store.clone();
        let handle = tokio::spawn(async move { store.upsert(&key, entry).await });
        PendingWrite { handle }
    }

    /// Insert and wait for the store write to finish
    pub async fn put(&self, company_name: &str, entry: LogoCacheEntry) -> AppResult<WriteOutcome> {
        self.insert(company_name, entry).await.outcome().await
    }

    /// Bulk view of the persisted store
    pub async fn load_all(&self) -> StoreSnapshot {
        self.store.snapshot().await
    }

    pub async fn len(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.index.read().await.is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        self.store.is_read_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogoSource;
    use std::time::Duration;

    fn service_in(dir: &tempfile::TempDir, read_only: bool) -> LogoCacheService {
        LogoCacheService::new(LogoCacheStore::new(
            dir.path().join("logoCache.json"),
            read_only,
            Duration::from_secs(3600),
        ))
    }

    #[tokio::test]
    async fn test_lookup_reports_loading_until_initialized() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir, false);

        assert_eq!(service.lookup("acme").await, CacheLookup::Loading);
        service.initialize().await;
        assert_eq!(service.lookup("acme").await, CacheLookup::Miss);
    }

    #[tokio::test]
    async fn test_round_trip_through_normalization() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir, false);
        service.initialize().await;

        let entry = LogoCacheEntry::new("https://x/logo.png", LogoSource::Manual, "AC");
        let outcome = service.put("Acme Co", entry.clone()).await.unwrap();
        assert!(outcome.is_durable());

        assert_eq!(service.get("acme co ").await, Some(entry.clone()));
        assert_eq!(service.lookup("ACME CO").await, CacheLookup::Hit(entry));
    }

    #[tokio::test]
    async fn test_initialize_loads_existing_store() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("logoCache.json"),
            r#"{"cache":{"Quidax ":{"url":"https://q/l.png","source":"clearbit","initials":"QU","timestamp":1}},"lastUpdated":null}"#,
        )
        .unwrap();
        let service = service_in(&dir, false);

        assert_eq!(service.initialize().await, 1);
        assert!(service.is_ready());
        assert_eq!(service.get("quidax").await.unwrap().source, LogoSource::Clearbit);
    }

    #[tokio::test]
    async fn test_wait_ready_unblocks_after_initialize() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir, false);

        let waiter = {
            let service = service.clone();
            tokio::spawn(async move { service.wait_ready().await })
        };
        service.initialize().await;
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_insert_is_visible_before_write_completes() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir, false);
        service.initialize().await;

        let pending = service
            .insert(
                "Flutterwave",
                LogoCacheEntry::new("https://f/l.png", LogoSource::Brandfetch, "FL"),
            )
            .await;
        assert!(service.get("flutterwave").await.is_some());
        assert!(pending.outcome().await.unwrap().is_durable());
        assert!(service.load_all().await.document.cache.contains_key("flutterwave"));
    }

    #[tokio::test]
    async fn test_read_only_keeps_entry_in_memory_only() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir, true);
        service.initialize().await;

        let outcome = service
            .put("Andela", LogoCacheEntry::new("https://a/l.png", LogoSource::Manual, "AN"))
            .await
            .unwrap();
        assert!(!outcome.is_durable());
        assert!(service.get("andela").await.is_some());
        assert!(!service.load_all().await.exists);
    }

    #[tokio::test]
    async fn test_reload_discards_unpersisted_entries() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir, true);
        service.initialize().await;
        service
            .put("Paystack", LogoCacheEntry::new("https://p/l.png", LogoSource::Manual, "PA"))
            .await
            .unwrap();

        assert_eq!(service.reload().await, 0);
        assert!(service.is_empty().await);
    }
}
