//! Interactive session state.

use tracing::info;

use crate::config::DynshConfig;
use crate::error::{DynshError, DynshResult};

/// State carried between commands of one shell process.
///
/// Only connection settings and the selected table live here. Expression
/// placeholders are scoped to a single command and never stored on the
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    region: String,
    endpoint_url: Option<String>,
    table: Option<String>,
}

impl Session {
    /// Create a session for `region` with no table selected.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            table: None,
        }
    }

    /// Create a session from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &DynshConfig) -> Self {
        Self {
            endpoint_url: config.endpoint_url.clone(),
            ..Self::new(config.region.clone())
        }
    }

    /// The configured region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The endpoint requests are addressed to: the configured URL, or the
    /// regional DynamoDB endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.endpoint_url
            .clone()
            .unwrap_or_else(|| format!("https://dynamodb.{}.amazonaws.com", self.region))
    }

    /// Select the table subsequent commands operate on.
    ///
    /// # Errors
    ///
    /// Returns [`DynshError::MissingArgument`] if `name` is blank.
    pub fn use_table(&mut self, name: &str) -> DynshResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DynshError::MissingArgument("table"));
        }
        info!(table = name, "selected table");
        self.table = Some(name.to_owned());
        Ok(())
    }

    /// The selected table, if any.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// The selected table.
    ///
    /// # Errors
    ///
    /// Returns [`DynshError::NoTableSelected`] if `use` has not been run.
    pub fn require_table(&self) -> DynshResult<&str> {
        self.table().ok_or(DynshError::NoTableSelected)
    }

    /// The prompt shown by the line editor.
    #[must_use]
    pub fn prompt(&self) -> String {
        match &self.table {
            Some(table) => format!("{}:{table}> ", self.region),
            None => format!("{}> ", self.region),
        }
    }
}
