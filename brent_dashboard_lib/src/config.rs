//! Environment-driven configuration for a dashboard session.

use std::str::FromStr;
use std::time::Duration;

use rand::Rng;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// What happens when a fetch is requested while another one is loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReentryPolicy {
    /// Start the new fetch; the older one's result is discarded on completion.
    #[default]
    Supersede,
    /// Refuse the new fetch with [`crate::DashboardError::Busy`].
    Reject,
}

impl FromStr for ReentryPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supersede" => Ok(ReentryPolicy::Supersede),
            "reject" => Ok(ReentryPolicy::Reject),
            _ => Err(()),
        }
    }
}

/// Exponential backoff for a single resource retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 5000,
        }
    }
}

impl RetryConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_usize("BRENT_RETRY_MAX", defaults.max_retries),
            base_delay_ms: env_u64("BRENT_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_u64("BRENT_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    /// No retries: the first failure of a retrieval is final.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

/// Settings for one [`crate::ViewSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryConfig,
    pub reentry: ReentryPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::for_base_url(DEFAULT_BASE_URL)
    }
}

impl DashboardConfig {
    /// Reads `BRENT_API_URL`, `BRENT_TIMEOUT_SECS`, `BRENT_REENTRY` and the
    /// `BRENT_RETRY_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        let reentry = std::env::var("BRENT_REENTRY")
            .ok()
            .and_then(|val| val.parse::<ReentryPolicy>().ok())
            .unwrap_or_default();
        Self {
            base_url: std::env::var("BRENT_API_URL")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(env_u64("BRENT_TIMEOUT_SECS", 30)),
            retry: RetryConfig::from_env(),
            reentry,
        }
    }

    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
            reentry: ReentryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_reentry(mut self, reentry: ReentryPolicy) -> Self {
        self.reentry = reentry;
        self
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}
