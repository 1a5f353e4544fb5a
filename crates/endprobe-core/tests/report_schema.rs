//! Integration test that regenerates probe-report.schema.json at the workspace root
//!
//! Run with: cargo test -p endprobe-core --test report_schema

use std::path::Path;

use endprobe_core::schema::generate_schema;

#[test]
fn write_schema_file() {
    let schema = generate_schema();

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap();
    let schema_path = workspace_root.join("probe-report.schema.json");
    std::fs::write(&schema_path, &schema).expect("failed to write schema file");

    let content = std::fs::read_to_string(&schema_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let properties = parsed.get("properties").and_then(|v| v.as_object()).unwrap();
    for field in ["meta", "summary", "fixtures", "results"] {
        assert!(properties.contains_key(field), "missing {field}");
    }
}
