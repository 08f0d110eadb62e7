//! On-disk TTL cache for lifecycle responses
//!
//! Layout: `<dir>/<sha256(key) hex>.json`, each file holding
//! `{ "fetched_at": <RFC 3339>, "data": <payload> }`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eolcheck_core::{LifecycleCycle, LifecycleSource};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::DataError;
use crate::Result;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    data: serde_json::Value,
}

/// File-per-key JSON cache with expiry
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    ttl: Duration,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let hex = hex::encode(Sha256::digest(key.as_bytes()));
        self.dir.join(format!("{hex}.json"))
    }

    /// Cached payload for `key` if present and fresh
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.get_at(key, Utc::now())
    }

    /// [`FileCache::get`] evaluated at `now`
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<serde_json::Value> {
        let path = self.entry_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!(event = "cache.miss", key = %key, "no cache entry");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(event = "cache.miss", key = %key, error = %e, "corrupt cache entry");
                return None;
            }
        };

        let age = now.signed_duration_since(entry.fetched_at);
        let fresh = age
            .to_std()
            .map(|age| age <= self.ttl)
            .unwrap_or(true);
        if !fresh {
            debug!(event = "cache.miss", key = %key, "cache entry expired");
            return None;
        }

        debug!(event = "cache.hit", key = %key);
        Some(entry.data)
    }

    /// Store `data` under `key`, stamped with the current time
    pub fn put(&self, key: &str, data: &serde_json::Value) -> Result<()> {
        self.put_at(key, data, Utc::now())
    }

    /// [`FileCache::put`] with an explicit fetch time
    pub fn put_at(&self, key: &str, data: &serde_json::Value, fetched_at: DateTime<Utc>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| DataError::Cache(format!("create {:?}: {}", self.dir, e)))?;

        let entry = CacheEntry {
            fetched_at,
            data: data.clone(),
        };
        let body = serde_json::to_vec(&entry)?;

        // Write to a temp file in the same directory, then rename.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&body)?;
        tmp.persist(self.entry_path(key)).map_err(|e| e.error)?;

        debug!(event = "cache.write", key = %key);
        Ok(())
    }
}

/// Cache-first wrapper around another [`LifecycleSource`]
pub struct CachedSource<S> {
    inner: S,
    cache: FileCache,
    refresh: bool,
}

impl<S: LifecycleSource> CachedSource<S> {
    pub fn new(inner: S, cache: FileCache) -> Self {
        Self {
            inner,
            cache,
            refresh: false,
        }
    }

    /// Skip cache reads; fresh responses are still written back.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }
}

#[async_trait]
impl<S: LifecycleSource> LifecycleSource for CachedSource<S> {
    async fn fetch(&self, product: &str) -> eolcheck_core::Result<Vec<LifecycleCycle>> {
        if !self.refresh {
            if let Some(cached) = self.cache.get(product) {
                match serde_json::from_value::<Vec<LifecycleCycle>>(cached) {
                    Ok(cycles) => return Ok(cycles),
                    Err(e) => debug!(product = %product, error = %e, "cached payload unreadable"),
                }
            }
        }

        let cycles = self.inner.fetch(product).await?;

        match serde_json::to_value(&cycles) {
            Ok(value) => {
                if let Err(e) = self.cache.put(product, &value) {
                    warn!(event = "cache.write_failed", product = %product, error = %e);
                }
            }
            Err(e) => warn!(event = "cache.write_failed", product = %product, error = %e),
        }

        Ok(cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_cache() -> (tempfile::TempDir, FileCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache"), Duration::from_secs(3600));
        (dir, cache)
    }

    #[test]
    fn entry_name_is_key_digest() {
        let (_dir, cache) = make_cache();
        let path = cache.entry_path("nodejs");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(name.len(), 64 + ".json".len());
        assert!(name.ends_with(".json"));
        assert_ne!(cache.entry_path("nodejs"), cache.entry_path("python"));
    }

    #[test]
    fn put_then_get() {
        let (_dir, cache) = make_cache();
        let data = json!([{"cycle": "18", "eol": "2025-04-30"}]);
        cache.put("nodejs", &data).unwrap();
        assert_eq!(cache.get("nodejs"), Some(data));
        assert_eq!(cache.get("python"), None);
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let (_dir, cache) = make_cache();
        let fetched = Utc::now() - chrono::Duration::hours(2);
        cache.put_at("nodejs", &json!([]), fetched).unwrap();
        assert_eq!(cache.get("nodejs"), None);
        assert_eq!(
            cache.get_at("nodejs", fetched + chrono::Duration::minutes(30)),
            Some(json!([]))
        );
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let (_dir, cache) = make_cache();
        cache.put("nodejs", &json!([])).unwrap();
        fs::write(cache.entry_path("nodejs"), b"{ truncated").unwrap();
        assert_eq!(cache.get("nodejs"), None);
    }

    #[test]
    fn overwrite_keeps_single_file() {
        let (_dir, cache) = make_cache();
        cache.put("nodejs", &json!([1])).unwrap();
        cache.put("nodejs", &json!([2])).unwrap();
        assert_eq!(cache.get("nodejs"), Some(json!([2])));
        let entries: Vec<_> = fs::read_dir(cache.dir()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
