//! Client configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;
use warhundred_panels::PollConfig;

/// Environment variable that overrides the API base URL.
pub const API_URL_VAR: &str = "WARHUNDRED_API_URL";
/// Environment variable that selects the environment (`development` or
/// `production`).
pub const ENVIRONMENT_VAR: &str = "WARHUNDRED_ENV";
/// Environment variable pointing at the credential file.
pub const CREDENTIALS_VAR: &str = "WARHUNDRED_CREDENTIALS";

/// Which backend the client talks to by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `Development` in debug builds, `Production` in release builds.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn default_api_url(self) -> &'static str {
        match self {
            Self::Development => "http://localhost:8000",
            Self::Production => "https://srv851138.hstgr.cloud",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment {other:?}")),
        }
    }
}

/// Everything the client needs to know before it starts.
///
/// `Default` gives a working setup for the build's environment; override
/// individual fields with the `with_*` setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every API path is resolved against.
    pub api_base_url: String,
    pub environment: Environment,
    /// Per-request timeout applied by the HTTP client.
    pub request_timeout: Duration,
    /// How often the zone and chat panels reload.
    pub poll_interval: Duration,
    /// Where to persist the bearer token. `None` keeps it in memory only.
    pub credential_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::current())
    }
}

impl ClientConfig {
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn for_environment(environment: Environment) -> Self {
        Self {
            api_base_url: environment.default_api_url().to_string(),
            environment,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            poll_interval: PollConfig::DEFAULT_INTERVAL,
            credential_path: None,
        }
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = match lookup(ENVIRONMENT_VAR) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring {ENVIRONMENT_VAR}");
                Environment::current()
            }),
            None => Environment::current(),
        };

        let mut config = Self::for_environment(environment);
        if let Some(url) = lookup(API_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url;
        }
        if let Some(path) = lookup(CREDENTIALS_VAR).filter(|p| !p.trim().is_empty()) {
            config.credential_path = Some(PathBuf::from(path));
        }
        config.validated()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = Some(path.into());
        self
    }

    /// Fix any out-of-range values so the config is safe to use.
    ///
    /// - An empty base URL falls back to the environment default; a
    ///   trailing `/` is dropped.
    /// - A zero request timeout becomes [`Self::DEFAULT_REQUEST_TIMEOUT`].
    /// - The poll interval is clamped to at least one second.
    pub fn validated(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() {
            warn!(environment = %self.environment, "empty api_base_url, using default");
            self.environment.default_api_url().to_string()
        } else {
            trimmed.to_string()
        };

        if self.request_timeout.is_zero() {
            warn!("request_timeout is zero, using default");
            self.request_timeout = Self::DEFAULT_REQUEST_TIMEOUT;
        }

        self.poll_interval = PollConfig::with_interval(self.poll_interval)
            .validated()
            .interval;
        self
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig::with_interval(self.poll_interval)
    }
}
