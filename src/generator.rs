//! End-to-end generator run
//!
//! Reads the document, validates it against the schema, normalizes it, renders
//! both artifacts in memory and only then writes them out.

use crate::config::ArchConfig;
use crate::emit::{self, Artifacts, TemplateRenderer, TeraRenderer};
use crate::error::AppResult;
use crate::normalize::{self, NormalizedConfig};
use crate::schema::{self, JsonSchemaValidator, SchemaValidator};
use crate::settings::Settings;
use serde_json::Value;

/// Validate and normalize a parsed document
///
/// `origin` names the document in error messages.
pub fn check(
    document: Value,
    origin: &str,
    validator: &dyn SchemaValidator,
) -> AppResult<NormalizedConfig> {
    schema::check(validator, &document, origin)?;
    normalize::normalize(ArchConfig::from_value(document)?)
}

/// Validate, normalize and render a parsed document without touching the filesystem
pub fn compile(
    document: Value,
    origin: &str,
    validator: &dyn SchemaValidator,
    renderer: &dyn TemplateRenderer,
) -> AppResult<(NormalizedConfig, Artifacts)> {
    let normalized = check(document, origin, validator)?;
    let artifacts = emit::emit(&normalized, renderer)?;
    Ok((normalized, artifacts))
}

/// Runs the generator against the files named in [`Settings`]
pub struct Generator {
    settings: Settings,
}

impl Generator {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Validate and normalize the configuration file, writing nothing
    pub fn check(&self) -> AppResult<NormalizedConfig> {
        let (document, origin) = self.read_document()?;
        let validator = JsonSchemaValidator::from_file(&self.settings.schema_file)?;
        check(document, &origin, &validator)
    }

    /// Produce both artifacts in memory
    pub fn render(&self) -> AppResult<(NormalizedConfig, Artifacts)> {
        let (document, origin) = self.read_document()?;
        let validator = JsonSchemaValidator::from_file(&self.settings.schema_file)?;
        let renderer =
            TeraRenderer::from_root(&self.settings.template_root, &self.settings.template_file)?;
        compile(document, &origin, &validator, &renderer)
    }

    /// Full run: render both artifacts, then write the canonical document
    /// followed by the gateway configuration
    pub fn run(&self) -> AppResult<NormalizedConfig> {
        let (normalized, artifacts) = self.render()?;
        emit::write(
            &artifacts,
            &self.settings.rendered_config_file,
            &self.settings.envoy_config_file,
        )?;
        Ok(normalized)
    }

    fn read_document(&self) -> AppResult<(Value, String)> {
        let path = &self.settings.config_file;
        tracing::info!(
            config_file = %path.display(),
            schema_file = %self.settings.schema_file.display(),
            "Validating configuration"
        );
        let document = ArchConfig::read_document(path)?;
        Ok((document, path.display().to_string()))
    }
}
