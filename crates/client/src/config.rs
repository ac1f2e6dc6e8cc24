//! Client configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Default table API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Deployment stage the tools talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Environment {
    #[default]
    Beta,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beta => "beta",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beta" => Ok(Self::Beta),
            "prod" | "production" => Ok(Self::Prod),
            other => Err(format!("unknown environment '{other}' (expected beta or prod)")),
        }
    }
}

/// Table API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `APP_ENVIRONMENT`: `beta` or `prod` (default: `beta`; unknown values fall back to `beta`)
    /// - `API_URL`: Table API base URL (default: `http://localhost:3000`)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let environment = match var("APP_ENVIRONMENT").map(|v| v.parse::<Environment>()) {
            Some(Ok(environment)) => environment,
            Some(Err(e)) => {
                tracing::warn!("{e}; using beta");
                Environment::Beta
            }
            None => Environment::Beta,
        };

        Self {
            environment,
            api_url: var("API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}
