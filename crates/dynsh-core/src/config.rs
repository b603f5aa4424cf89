//! Shell configuration.
//!
//! Configuration is driven by environment variables; command-line flags are
//! applied on top by the binary.
//!
//! | Variable             | Default            |
//! |----------------------|--------------------|
//! | `AWS_REGION`         | `DEFAULT_REGION`   |
//! | `DEFAULT_REGION`     | `us-east-1`        |
//! | `DYNSH_ENDPOINT_URL` | unset              |
//! | `LOG_LEVEL`          | `warn`             |
//! | `DYNSH_VERBOSE`      | `false`            |
//! | `DYNSH_HISTORY`      | `~/.dynsh_history` |

use std::env;
use std::path::PathBuf;

use crate::error::{DynshError, DynshResult};

/// Default AWS region.
const DEFAULT_REGION: &str = "us-east-1";

/// File name of the history file inside the home directory.
const HISTORY_FILE_NAME: &str = ".dynsh_history";

/// Configuration for one shell process.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynshConfig {
    /// AWS region requests are addressed to.
    pub region: String,
    /// Custom endpoint, e.g. a local DynamoDB.
    pub endpoint_url: Option<String>,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Log each translated expression; raises the log level to `debug`.
    pub verbose: bool,
    /// Where the line editor keeps its history; `None` disables it.
    pub history_file: Option<PathBuf>,
}

impl Default for DynshConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_owned(),
            endpoint_url: None,
            log_level: "warn".to_owned(),
            verbose: false,
            history_file: dirs::home_dir().map(|home| home.join(HISTORY_FILE_NAME)),
        }
    }
}

impl DynshConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("AWS_REGION").or_else(|| lookup("DEFAULT_REGION")) {
            config.region = v;
        }
        if let Some(v) = lookup("DYNSH_ENDPOINT_URL") {
            config.endpoint_url = Some(v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("DYNSH_VERBOSE") {
            config.verbose = parse_bool(&v);
        }
        if let Some(v) = lookup("DYNSH_HISTORY") {
            config.history_file = Some(PathBuf::from(v));
        }

        config
    }

    /// The log level after applying `verbose`.
    #[must_use]
    pub fn effective_log_level(&self) -> &str {
        if self.verbose { "debug" } else { &self.log_level }
    }

    /// Check the values that flags and the environment cannot type-check.
    pub fn validate(&self) -> DynshResult<()> {
        if self.region.trim().is_empty() {
            return Err(DynshError::Config("region must not be empty".to_owned()));
        }
        if let Some(url) = &self.endpoint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(DynshError::Config(format!(
                    "endpoint URL must start with http:// or https://, got {url}"
                )));
            }
        }
        Ok(())
    }
}

fn parse_bool(v: &str) -> bool {
    matches!(v, "1" | "true" | "yes" | "TRUE" | "YES")
}
