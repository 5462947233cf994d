//! Schema validation
//!
//! The document's shape is checked against a JSON Schema (written in YAML or
//! JSON) before any normalization runs.

use crate::config::parse_document;
use crate::error::{AppError, AppResult};
use jsonschema::Validator;
use serde_json::Value;
use std::path::Path;

/// Schema shipped with the crate
pub const BUNDLED_SCHEMA: &str = include_str!("../config/arch_config_schema.yaml");

/// Checks a document tree against a schema
pub trait SchemaValidator {
    /// Return every violation found, or `Ok(())` if the document conforms
    fn validate(&self, document: &Value) -> Result<(), Vec<String>>;
}

/// [`SchemaValidator`] backed by the `jsonschema` crate
pub struct JsonSchemaValidator {
    validator: Validator,
}

impl JsonSchemaValidator {
    /// Compile a schema tree
    ///
    /// `origin` names the schema in error messages.
    pub fn new(schema: &Value, origin: &str) -> AppResult<Self> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| AppError::SchemaCompile {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    /// Load and compile a schema file (YAML or JSON)
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;
        let schema = parse_document(&content, &path_display)?;
        Self::new(&schema, &path_display)
    }

    /// Compile [`BUNDLED_SCHEMA`]
    pub fn bundled() -> AppResult<Self> {
        let schema = parse_document(BUNDLED_SCHEMA, "arch_config_schema.yaml")?;
        Self::new(&schema, "arch_config_schema.yaml")
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, document: &Value) -> Result<(), Vec<String>> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(document)
            .map(|error| {
                let location = error.instance_path.to_string();
                if location.is_empty() {
                    error.to_string()
                } else {
                    format!("{location}: {error}")
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Validate `document`, turning violations into [`AppError::SchemaViolation`]
pub fn check(
    validator: &dyn SchemaValidator,
    document: &Value,
    origin: &str,
) -> AppResult<()> {
    validator.validate(document).map_err(|violations| {
        tracing::warn!(
            path = origin,
            violations = violations.len(),
            "Configuration does not match schema"
        );
        AppError::SchemaViolation {
            path: origin.to_string(),
            violations,
        }
    })
}
