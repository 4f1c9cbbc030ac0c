//! Single-slot, versioned theme cache.
//!
//! The last theme resolved from the backend is stored under one key so the
//! next page load can paint correct colors before anything else runs.
//!
//! # Staleness
//!
//! An entry is ignored (but left in place) when:
//! - its `version` differs from [`CACHE_VERSION`]
//! - it is older than the expiry window (5 minutes by default)
//! - it is missing or fails to parse
//!
//! All of these read as "no usable cache"; none is an error.
//!
//! # Versioning
//!
//! Bump [`CACHE_VERSION`] whenever the shape of `ThemeConfig` as stored
//! changes in a way an older reader (including the inline bootstrap script
//! already deployed in cached HTML) could misinterpret.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;
use crate::error::Result;
use crate::storage::Storage;

/// Storage key holding the serialized [`CachedThemeEntry`].
pub const CACHE_KEY: &str = "modele_theme_cache";

/// Schema version; entries with any other version are ignored.
pub const CACHE_VERSION: &str = "1.0.0";

/// Default age after which an entry is ignored.
pub const CACHE_EXPIRY: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedThemeEntry {
    pub version: String,
    /// Epoch milliseconds at write time.
    pub timestamp: i64,
    pub config: ThemeConfig,
}

impl CachedThemeEntry {
    pub fn age(&self, now_ms: i64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.timestamp).max(0) as u64)
    }

    pub fn age_description(&self, now_ms: i64) -> String {
        let age_secs = self.age(now_ms).as_secs();

        if age_secs < 60 {
            "just now".to_string()
        } else if age_secs < 3600 {
            format!("{} minutes ago", age_secs / 60)
        } else if age_secs < 86400 {
            format!("{} hours ago", age_secs / 3600)
        } else {
            format!("{} days ago", age_secs / 86400)
        }
    }
}

/// Outcome of looking at the stored entry, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    Missing,
    Corrupt,
    VersionMismatch { found: String },
    Expired(CachedThemeEntry),
    Fresh(CachedThemeEntry),
}

impl CacheStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CacheStatus::Missing => "missing",
            CacheStatus::Corrupt => "corrupt",
            CacheStatus::VersionMismatch { .. } => "version mismatch",
            CacheStatus::Expired(_) => "expired",
            CacheStatus::Fresh(_) => "fresh",
        }
    }

    pub fn into_fresh(self) -> Option<CachedThemeEntry> {
        match self {
            CacheStatus::Fresh(entry) => Some(entry),
            _ => None,
        }
    }
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug, Clone)]
pub struct ThemeCache<S> {
    storage: S,
    expiry: Duration,
}

impl<S: Storage> ThemeCache<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            expiry: CACHE_EXPIRY,
        }
    }

    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Usable entry, or `None` when missing, corrupt, outdated or expired.
    pub fn read(&self) -> Option<CachedThemeEntry> {
        self.read_at(now_millis())
    }

    pub fn read_at(&self, now_ms: i64) -> Option<CachedThemeEntry> {
        self.inspect_at(now_ms).into_fresh()
    }

    pub fn inspect(&self) -> CacheStatus {
        self.inspect_at(now_millis())
    }

    pub fn inspect_at(&self, now_ms: i64) -> CacheStatus {
        let Some(raw) = self.storage.get_item(CACHE_KEY) else {
            return CacheStatus::Missing;
        };
        let entry: CachedThemeEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unparseable theme cache");
                return CacheStatus::Corrupt;
            }
        };

        if entry.version != CACHE_VERSION {
            return CacheStatus::VersionMismatch {
                found: entry.version,
            };
        }

        let expiry_ms = i64::try_from(self.expiry.as_millis()).unwrap_or(i64::MAX);
        if now_ms.saturating_sub(entry.timestamp) > expiry_ms {
            return CacheStatus::Expired(entry);
        }

        CacheStatus::Fresh(entry)
    }

    /// Overwrite the slot with `config`, stamped now.
    pub fn write(&mut self, config: &ThemeConfig) -> Result<CachedThemeEntry> {
        self.write_at(config, now_millis())
    }

    pub fn write_at(&mut self, config: &ThemeConfig, now_ms: i64) -> Result<CachedThemeEntry> {
        let entry = CachedThemeEntry {
            version: CACHE_VERSION.to_string(),
            timestamp: now_ms,
            config: config.clone(),
        };
        let json = serde_json::to_string(&entry)?;
        self.storage.set_item(CACHE_KEY, &json)?;
        Ok(entry)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove_item(CACHE_KEY)
    }

    /// Raw stored text, if any, regardless of freshness.
    pub fn raw(&self) -> Option<String> {
        self.storage.get_item(CACHE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn sample_config() -> ThemeConfig {
        ThemeConfig {
            primary_color: Some("#3b82f6".into()),
            font_family: Some("Inter".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_write_then_read() {
        let mut cache = ThemeCache::new(MemoryStorage::new());
        let before = now_millis();
        cache.write(&sample_config()).unwrap();

        let entry = cache.read().unwrap();
        assert_eq!(entry.config, sample_config());
        assert_eq!(entry.version, CACHE_VERSION);
        assert!(entry.timestamp >= before);
        assert!(now_millis() - entry.timestamp < 1000);
    }

    #[test]
    fn test_expired_entry_is_ignored_not_deleted() {
        let mut cache = ThemeCache::new(MemoryStorage::new());
        let now = 1_700_000_000_000;
        cache.write_at(&sample_config(), now - 6 * 60 * 1000).unwrap();

        assert_eq!(cache.read_at(now), None);
        assert!(matches!(cache.inspect_at(now), CacheStatus::Expired(_)));
        assert!(cache.raw().is_some());
    }

    #[test]
    fn test_entry_at_expiry_boundary_is_fresh() {
        let mut cache = ThemeCache::new(MemoryStorage::new());
        let now = 1_700_000_000_000;
        cache.write_at(&sample_config(), now - 5 * 60 * 1000).unwrap();
        assert!(cache.read_at(now).is_some());
        assert!(cache.read_at(now + 1).is_none());
    }

    #[test]
    fn test_version_mismatch() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                CACHE_KEY,
                &format!(
                    r##"{{"version":"0.9.0","timestamp":{},"config":{{"primaryColor":"#000000"}}}}"##,
                    now_millis()
                ),
            )
            .unwrap();
        let cache = ThemeCache::new(storage);
        assert_eq!(cache.read(), None);
        assert_eq!(
            cache.inspect(),
            CacheStatus::VersionMismatch {
                found: "0.9.0".into()
            }
        );
    }

    #[test]
    fn test_corrupt_and_missing() {
        let mut storage = MemoryStorage::new();
        assert_eq!(ThemeCache::new(storage.clone()).inspect(), CacheStatus::Missing);

        storage.set_item(CACHE_KEY, "{not json").unwrap();
        let cache = ThemeCache::new(storage);
        assert_eq!(cache.inspect(), CacheStatus::Corrupt);
        assert_eq!(cache.read(), None);
    }

    #[test]
    fn test_custom_expiry_and_clear() {
        let mut cache = ThemeCache::new(MemoryStorage::new()).with_expiry(Duration::from_secs(1));
        let now = 1_700_000_000_000;
        cache.write_at(&sample_config(), now - 2000).unwrap();
        assert!(cache.read_at(now).is_none());

        cache.clear().unwrap();
        assert_eq!(cache.inspect_at(now), CacheStatus::Missing);
    }

    #[test]
    fn test_age_description() {
        let entry = CachedThemeEntry {
            version: CACHE_VERSION.into(),
            timestamp: 0,
            config: ThemeConfig::default(),
        };
        assert_eq!(entry.age_description(30_000), "just now");
        assert_eq!(entry.age_description(5 * 60_000), "5 minutes ago");
        assert_eq!(entry.age_description(3 * 3_600_000), "3 hours ago");
        assert_eq!(entry.age_description(-10), "just now");
    }
}
