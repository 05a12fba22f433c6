//! Runtime configuration
//!
//! Two external values drive the calculator: the report endpoint and the
//! base URL of the follow-up form. Both have working defaults, so a missing
//! config file or variable never stops the calculator from starting.
//!
//! Precedence: environment variables > JSON config file > defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_DISPATCH_ENDPOINT: &str = "http://127.0.0.1:5001/api/send-report-email";
pub const DEFAULT_REDIRECT_BASE_URL: &str = "https://share.hsforms.com/your-form-id";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Overrides `dispatch_endpoint`
pub const ENV_DISPATCH_URL: &str = "SAVINGS_DISPATCH_URL";
/// Overrides `redirect_base_url`
pub const ENV_REDIRECT_URL: &str = "SAVINGS_REDIRECT_URL";

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where finished reports are POSTed
    pub dispatch_endpoint: String,
    /// Follow-up form the visitor is sent to after a successful dispatch
    pub redirect_base_url: String,
    /// Upper bound on the report request
    pub request_timeout_secs: u64,
    /// Open the follow-up form in the system browser after submission
    pub open_browser: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dispatch_endpoint: DEFAULT_DISPATCH_ENDPOINT.to_string(),
            redirect_base_url: DEFAULT_REDIRECT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            open_browser: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file. Absent keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Resolve the effective configuration for this process.
    ///
    /// An unreadable config file is logged and skipped rather than fatal.
    pub fn resolve(path: Option<&Path>) -> Self {
        let base = match path {
            Some(path) => Self::load_from_file(path).unwrap_or_else(|e| {
                warn!("Ignoring configuration file: {:#}", e);
                Self::default()
            }),
            None => Self::default(),
        };
        base.with_env_overrides(|key| std::env::var(key).ok())
            .sanitized()
    }

    /// Apply overrides from an environment lookup. Blank values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(endpoint) = present(ENV_DISPATCH_URL) {
            debug!("{} overrides dispatch endpoint", ENV_DISPATCH_URL);
            self.dispatch_endpoint = endpoint.trim().to_string();
        }
        if let Some(redirect) = present(ENV_REDIRECT_URL) {
            debug!("{} overrides redirect base URL", ENV_REDIRECT_URL);
            self.redirect_base_url = redirect.trim().to_string();
        }
        self
    }

    /// Replace blank or unparsable values with defaults.
    pub fn sanitized(mut self) -> Self {
        if Url::parse(self.dispatch_endpoint.trim()).is_err() {
            warn!(
                "Dispatch endpoint {:?} is not a valid URL, using {}",
                self.dispatch_endpoint, DEFAULT_DISPATCH_ENDPOINT
            );
            self.dispatch_endpoint = DEFAULT_DISPATCH_ENDPOINT.to_string();
        }
        if Url::parse(self.redirect_base_url.trim()).is_err() {
            warn!(
                "Redirect base URL {:?} is not a valid URL, using {}",
                self.redirect_base_url, DEFAULT_REDIRECT_BASE_URL
            );
            self.redirect_base_url = DEFAULT_REDIRECT_BASE_URL.to_string();
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parsed redirect base. Falls back to the default form URL.
    pub fn redirect_base(&self) -> Url {
        Url::parse(self.redirect_base_url.trim())
            .or_else(|_| Url::parse(DEFAULT_REDIRECT_BASE_URL))
            .expect("INTERNAL ERROR: default redirect URL failed to parse - this is a bug")
    }
}
