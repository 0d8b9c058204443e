use dbdoc_core::{ColumnInfo, DatabaseInfo, EngineVariant, SCHEMA_VERSION, SchemaSnapshot, TableInfo};
use schemars::schema_for;

#[test]
fn serialized_snapshot_matches_json_schema() {
    let generated = schema_for!(SchemaSnapshot);
    let schema = serde_json::to_value(&generated).expect("serialize generated schema");

    let mut orders = TableInfo::new("orders", "order records");
    orders.columns.push(ColumnInfo {
        name: "total".to_string(),
        data_type: "numeric(10,2)".to_string(),
        key: String::new(),
        is_nullable: true,
        comment: "gross amount".to_string(),
        default: "0".to_string(),
    });
    let snapshot = SchemaSnapshot {
        schema_version: SCHEMA_VERSION.to_string(),
        engine: EngineVariant::Postgres,
        database: DatabaseInfo {
            name: "shop".to_string(),
            ..DatabaseInfo::default()
        },
        tables: vec![orders],
    };
    let instance = serde_json::to_value(&snapshot).expect("serialize snapshot");

    assert!(jsonschema::is_valid(&schema, &instance));

    let mut broken = instance.clone();
    broken["engine"] = serde_json::Value::String("oracle".to_string());
    assert!(!jsonschema::is_valid(&schema, &broken));
}
