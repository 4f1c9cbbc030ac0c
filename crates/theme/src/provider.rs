//! Backend fetch and reconciliation.
//!
//! The provider owns the cache. `hydrate` paints from the cache without
//! touching the network; `refresh` pulls the canonical config from the
//! backend and overwrites whatever was painted (last write wins). A failed
//! fetch leaves the current variables and cache untouched.

use std::time::Duration;

use serde_json::Value;

use crate::applier::{apply_theme, StyleSink};
use crate::cache::{CachedThemeEntry, ThemeCache};
use crate::config::{normalize_theme_config, ThemeConfig};
use crate::error::{Result, ThemeError};
use crate::storage::Storage;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the canonical theme comes from.
pub trait ThemeSource {
    fn fetch(&self) -> Result<Value>;
}

/// Fetches the active theme from the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpThemeSource {
    url: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpThemeSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ThemeSource for HttpThemeSource {
    fn fetch(&self) -> Result<Value> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();

        let mut request = agent.get(&self.url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        tracing::debug!(url = %self.url, "fetching theme");
        let mut response = request.call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => ThemeError::Http { status },
            ureq::Error::Timeout(_) => ThemeError::Timeout(self.timeout),
            other => ThemeError::Network(other.to_string()),
        })?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ThemeError::Network(e.to_string()))?;

        Ok(unwrap_envelope(serde_json::from_str(&body)?))
    }
}

/// Accept both a bare theme object and `{ "data": { ... } }`.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Result of a successful reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Whether the variables were rewritten.
    pub changed: bool,
    pub entry: CachedThemeEntry,
}

#[derive(Debug)]
pub struct ThemeProvider<S> {
    cache: ThemeCache<S>,
    applied: Option<ThemeConfig>,
}

impl<S: Storage> ThemeProvider<S> {
    pub fn new(cache: ThemeCache<S>) -> Self {
        Self {
            cache,
            applied: None,
        }
    }

    pub fn cache(&self) -> &ThemeCache<S> {
        &self.cache
    }

    pub fn applied(&self) -> Option<&ThemeConfig> {
        self.applied.as_ref()
    }

    /// Paint from the cache, if it holds a usable entry.
    pub fn hydrate(&mut self, sink: &mut dyn StyleSink) -> Option<CachedThemeEntry> {
        let entry = self.cache.read()?;
        apply_theme(&entry.config, sink);
        self.applied = Some(entry.config.clone());
        tracing::debug!(timestamp = entry.timestamp, "hydrated theme from cache");
        Some(entry)
    }

    /// Fetch from `source`, then reconcile. Errors leave state untouched.
    pub fn refresh(
        &mut self,
        source: &dyn ThemeSource,
        sink: &mut dyn StyleSink,
    ) -> Result<RefreshOutcome> {
        let raw = source.fetch().inspect_err(|e| {
            tracing::warn!(error = %e, "theme fetch failed, keeping current colors");
        })?;
        self.reconcile(normalize_theme_config(&raw), sink)
    }

    /// Apply `config` if it differs from what is painted, and rewrite the cache.
    pub fn reconcile(
        &mut self,
        config: ThemeConfig,
        sink: &mut dyn StyleSink,
    ) -> Result<RefreshOutcome> {
        let changed = self.applied.as_ref() != Some(&config);
        if changed {
            apply_theme(&config, sink);
        }

        let entry = self.cache.write(&config)?;
        tracing::info!(changed, "theme reconciled with backend");
        self.applied = Some(config);

        Ok(RefreshOutcome { changed, entry })
    }
}
