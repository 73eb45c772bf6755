//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Environment variable holding the Jenkins base URL.
pub const ENV_HOST: &str = "JENKINS_HOST";
/// Environment variable holding the Jenkins username (optional, pairs with the token).
pub const ENV_USER: &str = "JENKINS_USER";
/// Environment variable holding the Jenkins API token (optional, pairs with the user).
pub const ENV_API_TOKEN: &str = "JENKINS_API_TOKEN";
/// Environment variable overriding the cache directory.
pub const ENV_CACHE_DIR: &str = "JENKINS_LAUNCHER_CACHE_DIR";
/// Environment variable overriding the cache max-age in seconds.
pub const ENV_CACHE_TTL_SECS: &str = "JENKINS_LAUNCHER_CACHE_TTL_SECS";
/// Environment variable overriding the icon resource root.
pub const ENV_RESOURCE_DIR: &str = "JENKINS_LAUNCHER_RESOURCE_DIR";

/// Default cache max-age: five minutes.
pub const DEFAULT_CACHE_MAX_AGE: Duration = Duration::from_secs(5 * 60);

/// Basic-auth credentials for a secured Jenkins instance.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Jenkins username.
    pub user: String,
    /// Jenkins API token (never logged or serialized).
    pub api_token: SecretString,
}

/// Launcher configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Base URL of the Jenkins server, without a trailing slash.
    pub host: String,
    /// Optional basic-auth credentials.
    pub credentials: Option<Credentials>,
    /// Directory holding the query cache.
    pub cache_dir: PathBuf,
    /// Maximum age of a cached query result.
    pub cache_max_age: Duration,
    /// Root against which item icon paths are resolved.
    pub resource_dir: PathBuf,
}

impl LauncherConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Tests pass a closure over a map instead of mutating the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(ENV_HOST)
            .map(|h| h.trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConfigError::MissingRequired {
                key: ENV_HOST.to_string(),
                hint: format!("Set {ENV_HOST} to the base URL of your Jenkins server"),
            })?;

        let credentials = match (lookup(ENV_USER), lookup(ENV_API_TOKEN)) {
            (Some(user), Some(token)) => Some(Credentials {
                user,
                api_token: SecretString::from(token),
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::MissingRequired {
                    key: ENV_API_TOKEN.to_string(),
                    hint: format!("{ENV_USER} is set, so {ENV_API_TOKEN} is required too"),
                });
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingRequired {
                    key: ENV_USER.to_string(),
                    hint: format!("{ENV_API_TOKEN} is set, so {ENV_USER} is required too"),
                });
            }
        };

        let cache_dir = lookup(ENV_CACHE_DIR).map(PathBuf::from).unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| ".".to_string());
            PathBuf::from(home).join(".cache/jenkins-launcher")
        });

        let cache_max_age = match lookup(ENV_CACHE_TTL_SECS) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_CACHE_TTL_SECS.to_string(),
                    message: format!("expected a whole number of seconds, got {raw:?}"),
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_CACHE_MAX_AGE,
        };

        let resource_dir = lookup(ENV_RESOURCE_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            host,
            credentials,
            cache_dir,
            cache_max_age,
            resource_dir,
        })
    }
}
