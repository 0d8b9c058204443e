use serde::{Deserialize, Serialize};

use crate::engine::EngineVariant;
use crate::error::{Error, Result};

/// Connection parameters for one introspection run.
///
/// Passed explicitly by the caller; nothing in the workspace keeps a global copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub engine: EngineVariant,
    pub host: String,
    /// Defaults to the engine's standard port when omitted.
    #[serde(default)]
    pub port: Option<u16>,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
    /// Namespace filter. PostgreSQL falls back to `public`; MySQL ignores it.
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub include_views: bool,
}

impl ConnectionConfig {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.engine.default_port())
    }

    /// Reject settings that cannot possibly address a database.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Configuration("host must not be empty".to_string()));
        }
        if self.user.trim().is_empty() {
            return Err(Error::Configuration("user must not be empty".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(Error::Configuration(
                "database name must not be empty".to_string(),
            ));
        }
        if self.port == Some(0) {
            return Err(Error::Configuration("port must not be 0".to_string()));
        }
        Ok(())
    }
}
