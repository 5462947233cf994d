//! Tests for error context preservation
//!
//! Verifies that read, parse and write failures keep the underlying
//! std::io::Error or serde_yaml::Error as their source.

use archcfg::config::{ArchConfig, parse_document};
use archcfg::emit::{self, Artifacts};
use archcfg::schema::JsonSchemaValidator;
use std::error::Error;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_file_read_error_preserves_io_error() {
    let err = ArchConfig::read_document("/nonexistent/path/to/arch_config.yaml").unwrap_err();

    let err_string = err.to_string();
    assert!(
        err_string.contains("/nonexistent/path/to/arch_config.yaml"),
        "Error should include the file path, got: {}",
        err_string
    );

    let source = err.source().expect("Should have source error");
    assert!(
        source.is::<std::io::Error>(),
        "Source error should be io::Error, got: {:?}",
        source
    );
}

#[test]
fn test_config_parse_error_preserves_yaml_error() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"llm_providers: [\n  - model: {{{{ broken\n")
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");

    let err = ArchConfig::read_document(file.path()).unwrap_err();
    assert!(
        err.to_string().contains(&file.path().display().to_string()),
        "Error should include the file path, got: {}",
        err
    );

    let source = err.source().expect("Should have source error");
    assert!(
        source.is::<serde_yaml::Error>(),
        "Source error should be serde_yaml::Error, got: {:?}",
        source
    );
}

#[test]
fn test_wrong_shape_preserves_json_error() {
    let document = parse_document("llm_providers: not-a-list\n", "test").unwrap();
    let err = ArchConfig::from_value(document).unwrap_err();

    let source = err.source().expect("Should have source error");
    assert!(
        source.is::<serde_json::Error>(),
        "Source error should be serde_json::Error, got: {:?}",
        source
    );
}

#[test]
fn test_schema_file_read_error_includes_path() {
    let result = JsonSchemaValidator::from_file("/nonexistent/arch_config_schema.yaml");
    let err = match result {
        Ok(_) => panic!("Reading a missing schema should fail"),
        Err(e) => e,
    };
    assert!(err.to_string().contains("/nonexistent/arch_config_schema.yaml"));
    assert!(err.source().is_some());
}

#[test]
fn test_artifact_write_error_preserves_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let artifacts = Artifacts {
        canonical: "normalized: true\n".to_string(),
        gateway: "admin: {}\n".to_string(),
    };

    let err = emit::write(
        &artifacts,
        &dir.path().join("no/such/dir/arch_config_rendered.yaml"),
        &dir.path().join("envoy.yaml"),
    )
    .unwrap_err();

    let source = err.source().expect("Should have source error");
    assert!(source.is::<std::io::Error>());
    // Nothing after the failed write is attempted
    assert!(!dir.path().join("envoy.yaml").exists());
}
