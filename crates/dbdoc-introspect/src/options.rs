use dbdoc_core::ConnectionConfig;

/// Options that control what the catalog queries select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectOptions {
    /// Database name, as configured. Reported verbatim in the snapshot.
    pub database: String,
    /// Namespace filter; see [`IntrospectOptions::schema_or`].
    pub schema: Option<String>,
    pub include_views: bool,
}

impl IntrospectOptions {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            schema: None,
            include_views: false,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_views(mut self, include_views: bool) -> Self {
        self.include_views = include_views;
        self
    }

    /// Configured schema, or the engine's fallback namespace.
    pub fn schema_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.schema.as_deref().unwrap_or(fallback)
    }
}

impl From<&ConnectionConfig> for IntrospectOptions {
    fn from(config: &ConnectionConfig) -> Self {
        Self {
            database: config.database.clone(),
            schema: config.schema.clone(),
            include_views: config.include_views,
        }
    }
}
