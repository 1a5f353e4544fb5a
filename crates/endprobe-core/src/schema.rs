//! JSON Schema for the machine-readable report

use crate::report::ProbeReport;

/// Generate JSON Schema for [`ProbeReport`].
#[must_use]
pub fn generate_schema() -> String {
    let schema = schemars::schema_for!(ProbeReport);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
