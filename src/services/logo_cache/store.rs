//! Flat-file backing store for the logo cache
//!
//! The whole document is rewritten on every upsert. Writers inside this
//! process are serialized through one lock and each write lands via a temp
//! file rename, so readers never observe a torn document. Writers in other
//! processes can still race (last writer wins).

use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::entry::{LogoCacheDocument, LogoCacheEntry};
use crate::errors::{StoreError, StoreResult};

/// Durability of a completed cache write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Durable,
    NotDurable { reason: String },
}

impl WriteOutcome {
    pub fn is_durable(&self) -> bool {
        matches!(self, WriteOutcome::Durable)
    }
}

/// Bulk view of the store shared between readers
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub document: Arc<LogoCacheDocument>,
    /// False when the backing file is absent or unreadable
    pub exists: bool,
}

struct CachedSnapshot {
    snapshot: StoreSnapshot,
    taken_at: Instant,
}

pub struct LogoCacheStore {
    path: PathBuf,
    read_only: bool,
    snapshot_ttl: Duration,
    write_lock: Mutex<()>,
    snapshot: RwLock<Option<CachedSnapshot>>,
}

impl LogoCacheStore {
    pub fn new<P: Into<PathBuf>>(path: P, read_only: bool, snapshot_ttl: Duration) -> Self {
        Self {
            path: path.into(),
            read_only,
            snapshot_ttl,
            write_lock: Mutex::new(()),
            snapshot: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Read the document from disk; absent or corrupt files read as empty
    pub async fn read(&self) -> LogoCacheDocument {
        self.read_existing().await.unwrap_or_default()
    }

    async fn read_existing(&self) -> Option<LogoCacheDocument> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Logo cache store {} does not exist yet", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read logo cache store {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<LogoCacheDocument>(&contents) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(
                    "Logo cache store {} is not valid JSON, treating as empty: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Bulk snapshot, reused for `snapshot_ttl` and dropped on every write
    pub async fn snapshot(&self) -> StoreSnapshot {
        {
            let cached = self.snapshot.read().await;
            if let Some(cached) = cached.as_ref()
                && cached.taken_at.elapsed() < self.snapshot_ttl
            {
                return cached.snapshot.clone();
            }
        }

        let mut cached = self.snapshot.write().await;
        if let Some(existing) = cached.as_ref()
            && existing.taken_at.elapsed() < self.snapshot_ttl
        {
            return existing.snapshot.clone();
        }

        let document = self.read_existing().await;
        let snapshot = StoreSnapshot {
            exists: document.is_some(),
            document: Arc::new(document.unwrap_or_default()),
        };
        *cached = Some(CachedSnapshot {
            snapshot: snapshot.clone(),
            taken_at: Instant::now(),
        });
        snapshot
    }

    /// Read-modify-write a single key
    ///
    /// I/O failures and read-only stores produce `NotDurable` rather than an
    /// error so callers can report non-persistence without failing the request.
    pub async fn upsert(&self, key: &str, entry: LogoCacheEntry) -> StoreResult<WriteOutcome> {
        if self.read_only {
            return Ok(WriteOutcome::NotDurable {
                reason: "logo cache store is read-only".to_string(),
            });
        }

        let _guard = self.write_lock.lock().await;

        let mut document = self.read().await;
        document.cache.insert(key.to_string(), entry);
        document.last_updated = Some(Utc::now());
        let contents = serde_json::to_string_pretty(&document)?;

        let path = self.path.clone();
        let written =
            tokio::task::spawn_blocking(move || write_atomically(&path, contents.as_bytes()))
                .await
                .map_err(|e| StoreError::WriteAborted {
                    message: e.to_string(),
                })?;

        self.snapshot.write().await.take();

        match written {
            Ok(()) => {
                debug!("Persisted logo cache entry '{}' to {}", key, self.path.display());
                Ok(WriteOutcome::Durable)
            }
            Err(e) => {
                warn!("Logo cache write for '{}' was not persisted: {}", key, e);
                Ok(WriteOutcome::NotDurable {
                    reason: e.to_string(),
                })
            }
        }
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> StoreResult<()> {
    let display = path.display().to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&display, e))?;
        info!("Created logo cache directory {}", dir.display());
    }

    let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&display, e))?;
    file.write_all(contents)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| StoreError::io(&display, e))?;
    file.persist(path)
        .map_err(|e| StoreError::io(&display, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogoSource;

    fn store_in(dir: &tempfile::TempDir) -> LogoCacheStore {
        LogoCacheStore::new(dir.path().join("logoCache.json"), false, Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.read().await.cache.is_empty());
        let snapshot = store.snapshot().await;
        assert!(!snapshot.exists);
        assert!(snapshot.document.last_updated.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.read().await.cache.is_empty());
        assert!(!store.snapshot().await.exists);
    }

    #[tokio::test]
    async fn test_upsert_persists_and_stamps_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let outcome = store
            .upsert("acme co", LogoCacheEntry::new("https://x/logo.png", LogoSource::Manual, "AC"))
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Durable);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["cache"]["acme co"]["url"], "https://x/logo.png");
        assert_eq!(raw["cache"]["acme co"]["source"], "manual");
        assert!(raw["lastUpdated"].is_string());
    }

    #[tokio::test]
    async fn test_upsert_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogoCacheStore::new(
            dir.path().join("nested/data/logoCache.json"),
            false,
            Duration::from_secs(60),
        );

        let outcome = store
            .upsert(
                "kpmg",
                LogoCacheEntry::new("https://kpmg.com/l.png", LogoSource::Clearbit, "KP"),
            )
            .await
            .unwrap();
        assert!(outcome.is_durable());
        assert_eq!(store.read().await.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_read_only_store_reports_not_durable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logoCache.json");
        let store = LogoCacheStore::new(&path, true, Duration::from_secs(60));

        let outcome = store
            .upsert("acme", LogoCacheEntry::new("https://x/l.png", LogoSource::Manual, "AC"))
            .await
            .unwrap();
        assert!(matches!(outcome, WriteOutcome::NotDurable { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_io_failure_reports_not_durable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, "not a directory").unwrap();
        let store =
            LogoCacheStore::new(blocker.join("logoCache.json"), false, Duration::from_secs(60));

        let outcome = store
            .upsert("acme", LogoCacheEntry::new("https://x/l.png", LogoSource::Manual, "AC"))
            .await
            .unwrap();

        match outcome {
            WriteOutcome::NotDurable { reason } => assert!(reason.contains("logoCache.json")),
            WriteOutcome::Durable => panic!("write under a regular file must not be durable"),
        }
        assert!(blocker.is_file());
    }

    #[tokio::test]
    async fn test_snapshot_is_invalidated_by_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.snapshot().await.document.cache.is_empty());
        store
            .upsert("tizeti", LogoCacheEntry::new("https://t/l.png", LogoSource::Brandfetch, "TI"))
            .await
            .unwrap();

        let snapshot = store.snapshot().await;
        assert!(snapshot.exists);
        assert!(snapshot.document.cache.contains_key("tizeti"));
    }

    #[tokio::test]
    async fn test_concurrent_upserts_keep_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .upsert(
                            &format!("company {i}"),
                            LogoCacheEntry::new(
                                format!("https://c{i}/l.png"),
                                LogoSource::Clearbit,
                                "CO",
                            ),
                        )
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.read().await.cache.len(), 16);
    }
}
