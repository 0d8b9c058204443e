use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Database product whose catalog dialect applies to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub enum EngineVariant {
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "sqlserver")]
    SqlServer,
    #[serde(rename = "postgres")]
    Postgres,
}

impl EngineVariant {
    pub const ALL: [EngineVariant; 3] = [
        EngineVariant::MySql,
        EngineVariant::SqlServer,
        EngineVariant::Postgres,
    ];

    /// Stable identifier used in snapshots and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineVariant::MySql => "mysql",
            EngineVariant::SqlServer => "sqlserver",
            EngineVariant::Postgres => "postgres",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            EngineVariant::MySql => 3306,
            EngineVariant::SqlServer => 1433,
            EngineVariant::Postgres => 5432,
        }
    }
}

impl fmt::Display for EngineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legacy numeric engine codes: 1 MySQL, 2 SQL Server, 3 PostgreSQL.
impl TryFrom<u8> for EngineVariant {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(EngineVariant::MySql),
            2 => Ok(EngineVariant::SqlServer),
            3 => Ok(EngineVariant::Postgres),
            other => Err(Error::Configuration(format!(
                "unrecognized engine variant code {other}"
            ))),
        }
    }
}

impl FromStr for EngineVariant {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(EngineVariant::MySql),
            "sqlserver" | "mssql" => Ok(EngineVariant::SqlServer),
            "postgres" | "postgresql" | "pg" => Ok(EngineVariant::Postgres),
            other => match other.parse::<u8>() {
                Ok(code) => EngineVariant::try_from(code),
                Err(_) => Err(Error::Configuration(format!(
                    "unrecognized engine variant `{value}`"
                ))),
            },
        }
    }
}

/// Wire form accepted in configuration files: a name or a legacy code.
#[derive(Deserialize)]
#[serde(untagged)]
enum EngineTag {
    Code(u8),
    Name(String),
}

impl<'de> Deserialize<'de> for EngineVariant {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match EngineTag::deserialize(deserializer)? {
            EngineTag::Code(code) => EngineVariant::try_from(code),
            EngineTag::Name(name) => name.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!(EngineVariant::try_from(1).ok(), Some(EngineVariant::MySql));
        assert_eq!(EngineVariant::try_from(2).ok(), Some(EngineVariant::SqlServer));
        assert_eq!(EngineVariant::try_from(3).ok(), Some(EngineVariant::Postgres));
        assert_eq!("MSSQL".parse::<EngineVariant>().ok(), Some(EngineVariant::SqlServer));
        assert_eq!("postgresql".parse::<EngineVariant>().ok(), Some(EngineVariant::Postgres));
        assert_eq!("3".parse::<EngineVariant>().ok(), Some(EngineVariant::Postgres));
    }

    #[test]
    fn rejects_unknown_engine_with_configuration_error() {
        assert!(matches!(
            EngineVariant::try_from(99),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            "oracle".parse::<EngineVariant>(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for engine in EngineVariant::ALL {
            assert_eq!(engine.to_string().parse::<EngineVariant>().ok(), Some(engine));
        }
    }
}
