//! Run configuration, read from `DOCKHAND_*` environment variables

use std::path::PathBuf;

pub const ENV_ENDPOINT: &str = "DOCKHAND_ENDPOINT";
pub const ENV_USERNAME: &str = "DOCKHAND_USERNAME";
pub const ENV_PASSWORD: &str = "DOCKHAND_PASSWORD";
pub const ENV_AUTH_PROVIDER: &str = "DOCKHAND_AUTH_PROVIDER";
pub const ENV_DEFAULT_ENV: &str = "DOCKHAND_DEFAULT_ENV";
pub const ENV_INSECURE: &str = "DOCKHAND_INSECURE";
pub const ENV_ALLOW_MUTATION: &str = "DOCKHAND_PROBE_ALLOW_MUTATION";

const DEFAULT_AUTH_PROVIDER: &str = "local";
const DEFAULT_ENVIRONMENT: &str = "1";

/// Login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub auth_provider: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("auth_provider", &self.auth_provider)
            .finish()
    }
}

impl Credentials {
    /// Login request body.
    #[must_use]
    pub fn login_body(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password,
            "authProvider": self.auth_provider,
        })
    }
}

/// Settings that shape request materialization. Needs no credentials, so a
/// dry run can be planned offline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Value of the `env` query parameter on environment-scoped routes
    pub default_env: String,
    /// Issue real POST/PUT/DELETE requests instead of safe-mode probes
    pub allow_mutation: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            default_env: DEFAULT_ENVIRONMENT.to_string(),
            allow_mutation: false,
        }
    }
}

impl ProbeSettings {
    /// Read optional settings through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            default_env: lookup(ENV_DEFAULT_ENV).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            allow_mutation: lookup(ENV_ALLOW_MUTATION).is_some_and(|v| parse_flag(&v)),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }
}

/// Full configuration for a probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Base URL of the service, e.g. "https://dockhand.local:3000"
    pub endpoint: String,
    pub credentials: Credentials,
    pub settings: ProbeSettings,
    /// Skip TLS certificate and hostname verification (https only).
    /// Unsafe; never on by default.
    pub insecure: bool,
}

impl ProbeConfig {
    /// Build a config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for the first required variable that
    /// is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let endpoint = required(ENV_ENDPOINT)?;
        let username = required(ENV_USERNAME)?;
        let password = required(ENV_PASSWORD)?;

        Ok(Self {
            endpoint,
            credentials: Credentials {
                username,
                password,
                auth_provider: lookup(ENV_AUTH_PROVIDER)
                    .unwrap_or_else(|| DEFAULT_AUTH_PROVIDER.to_string()),
            },
            settings: ProbeSettings::from_lookup(&lookup),
            insecure: lookup(ENV_INSECURE).is_some_and(|v| parse_flag(&v)),
        })
    }

    /// Build a config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a required variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }
}

/// `1`, `true` and `yes` (any case) are true; everything else is false.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
}
