//! Configuration for a catching session.

use std::time::Duration;

use url::Url;

use crate::catalog::CatalogRange;
use crate::error::{DexError, DexResult};

/// Default base URL of the creature API.
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Default number of rejection draws before falling back to the free set.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

/// What a failed fetch does to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Show the failure as a notification and keep going.
    #[default]
    Notify,
    /// Show the failure and end the process with a non-zero status.
    Fatal,
}

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct DexConfig {
    /// Identifiers that may be drawn.
    pub catalog: CatalogRange,
    /// RNG seed for reproducible draws; OS entropy when unset.
    pub seed: Option<u64>,
    /// Rejection draws before sampling from the free identifiers.
    pub max_attempts: u32,
    /// How fetch failures are handled.
    pub failure_policy: FailurePolicy,
    /// Base URL of the creature API.
    pub api_base_url: String,
    /// Per-request timeout; none means wait indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogRange::default(),
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            failure_policy: FailurePolicy::default(),
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl DexConfig {
    /// Draw from `[1, size]`.
    pub fn with_catalog_size(mut self, size: u32) -> DexResult<Self> {
        self.catalog = CatalogRange::with_size(size)?;
        Ok(self)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the rejection draw cap (at least 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the API base URL. Trailing slashes are dropped.
    ///
    /// The URL must parse, use `http` or `https`, and name a host.
    pub fn with_api_base_url(mut self, url: &str) -> DexResult<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|_| DexError::InvalidUrl(url.to_string()))?;
        let web = matches!(parsed.scheme(), "http" | "https");
        if !web || parsed.host_str().is_none_or(str::is_empty) {
            return Err(DexError::InvalidUrl(url.to_string()));
        }
        self.api_base_url = trimmed.to_string();
        Ok(self)
    }

    /// Set a per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
