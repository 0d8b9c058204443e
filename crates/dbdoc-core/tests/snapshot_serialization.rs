use dbdoc_core::{ColumnInfo, ConnectionConfig, DatabaseInfo, EngineVariant, SchemaSnapshot, TableInfo};

#[test]
fn serializes_snapshot_deterministically() {
    let mut users = TableInfo::new("users", "");
    users.columns.push(ColumnInfo {
        name: "id".to_string(),
        data_type: "int".to_string(),
        key: "PRI".to_string(),
        is_nullable: false,
        comment: String::new(),
        default: String::new(),
    });

    let snapshot = SchemaSnapshot {
        schema_version: "0.1".to_string(),
        engine: EngineVariant::MySql,
        database: DatabaseInfo {
            name: "shop".to_string(),
            version: "8.0.36".to_string(),
            charset: "utf8mb4".to_string(),
            collation: String::new(),
        },
        tables: vec![users],
    };

    let json = serde_json::to_string_pretty(&snapshot).expect("serialize snapshot");
    let expected = r#"{
  "schema_version": "0.1",
  "engine": "mysql",
  "database": {
    "name": "shop",
    "version": "8.0.36",
    "charset": "utf8mb4",
    "collation": ""
  },
  "tables": [
    {
      "name": "users",
      "comment": "users",
      "columns": [
        {
          "name": "id",
          "data_type": "int",
          "key": "PRI",
          "is_nullable": false,
          "comment": "",
          "default": ""
        }
      ]
    }
  ]
}"#;
    assert_eq!(json, expected);

    let decoded: SchemaSnapshot = serde_json::from_str(&json).expect("deserialize snapshot");
    assert_eq!(decoded, snapshot);
}

#[test]
fn connection_config_accepts_legacy_engine_codes() {
    let config: ConnectionConfig = toml::from_str(
        r#"
        engine = 2
        host = "localhost"
        user = "sa"
        password = "Passw0rd!"
        database = "shop"
        "#,
    )
    .expect("parse config");
    assert_eq!(config.engine, EngineVariant::SqlServer);
    assert_eq!(config.port(), 1433);
    assert!(!config.include_views);

    let named: ConnectionConfig = toml::from_str(
        r#"
        engine = "postgresql"
        host = "localhost"
        port = 6543
        user = "app"
        database = "shop"
        schema = "sales"
        "#,
    )
    .expect("parse config");
    assert_eq!(named.engine, EngineVariant::Postgres);
    assert_eq!(named.port(), 6543);
    assert_eq!(named.schema.as_deref(), Some("sales"));
}

#[test]
fn connection_config_rejects_unknown_engine() {
    let result: Result<ConnectionConfig, _> = toml::from_str(
        r#"
        engine = 99
        host = "localhost"
        user = "app"
        database = "shop"
        "#,
    );
    let err = result.expect_err("engine 99 must be rejected");
    assert!(err.to_string().contains("unrecognized engine variant code 99"));
}
