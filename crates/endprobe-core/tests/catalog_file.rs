//! Loading a catalog from disk and planning against it

use endprobe_core::{Catalog, Fixtures, Method, ProbeSettings, ValidationStatus, plan};

#[test]
fn toml_catalog_round_trip_through_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widgets.toml");
    std::fs::write(
        &path,
        r#"
[[endpoints]]
method = "POST"
path = "/api/auth/login"

[[endpoints]]
method = "GET"
path = "/api/widgets"

[[endpoints]]
method = "GET"
path = "/api/widgets/{id}"
fixture = "container_id"

[[endpoints]]
method = "DELETE"
path = "/api/settings"
"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 4);

    let fixtures = Fixtures {
        container_id: Some("42".into()),
        ..Default::default()
    };
    let p = plan(&catalog, &fixtures, &ProbeSettings::default());

    assert_eq!(p.skipped, 0);
    assert_eq!(p.downgraded, 1);
    assert_eq!(p.entries[2].concrete_path.as_deref(), Some("/api/widgets/42"));
    assert_eq!(p.entries[3].issued_method, Some(Method::Options));
    assert!(
        p.validations
            .iter()
            .all(|v| v.status == ValidationStatus::Ok)
    );
}

#[test]
fn missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().starts_with("Cannot read"));
}

#[test]
fn yaml_catalog_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.yaml");
    std::fs::write(
        &path,
        "endpoints:\n  - method: GET\n    path: /api/networks/{id}/inspect\n    fixture: network_id\n    with_env: true\n",
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert!(catalog.endpoints[0].with_env);
    assert!(catalog.endpoints[0].has_placeholder());
}
