//! Runtime configuration loaded from the environment.
//!
//! | Env Var                  | Default          |
//! |--------------------------|------------------|
//! | `WORKTRACK_DATABASE_URL` | unset (in-memory store) |
//! | `WORKTRACK_DB_POOL_SIZE` | `4`              |
//! | `WORKTRACK_LOG`          | `worktrack=info` |

use std::env;
use std::num::NonZeroU32;
use thiserror::Error;

/// Environment variable naming the `PostgreSQL` database.
pub const DATABASE_URL_VAR: &str = "WORKTRACK_DATABASE_URL";

/// Environment variable bounding the connection pool.
pub const POOL_SIZE_VAR: &str = "WORKTRACK_DB_POOL_SIZE";

/// Environment variable holding the tracing filter directive.
pub const LOG_FILTER_VAR: &str = "WORKTRACK_LOG";

/// Pool size used when none is configured.
pub const DEFAULT_POOL_SIZE: NonZeroU32 = NonZeroU32::MIN.saturating_add(3);

/// Filter directive used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "worktrack=info";

/// Errors raised for malformed configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set to something that does not parse.
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Description of an acceptable value.
        expected: &'static str,
    },
    /// A variable was set but blank.
    #[error("{name} is set but empty")]
    Empty {
        /// Variable name.
        name: &'static str,
    },
}

/// Settings for building a tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// `PostgreSQL` connection string; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: NonZeroU32,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl TrackerConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to a malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            tracing::warn!(error = %err, "ignoring unreadable .env file");
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to a malformed value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = match lookup(DATABASE_URL_VAR) {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::Empty {
                    name: DATABASE_URL_VAR,
                });
            }
            other => other,
        };

        let pool_size = lookup(POOL_SIZE_VAR)
            .map(|raw| parse_pool_size(&raw))
            .transpose()?
            .unwrap_or(DEFAULT_POOL_SIZE);

        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            database_url,
            pool_size,
            log_filter,
        })
    }
}

fn parse_pool_size(raw: &str) -> Result<NonZeroU32, ConfigError> {
    raw.trim()
        .parse::<NonZeroU32>()
        .map_err(|_| ConfigError::Invalid {
            name: POOL_SIZE_VAR,
            value: raw.to_owned(),
            expected: "a positive integer",
        })
}
