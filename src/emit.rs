//! Artifact emission
//!
//! Produces the two outputs of a run:
//!
//! - the canonical document (`arch_config_rendered.yaml`), keys sorted
//! - the gateway configuration (`envoy.yaml`), rendered from a template
//!
//! Both are produced in memory before anything is written.

use crate::error::{AppError, AppResult};
use crate::normalize::NormalizedConfig;
use serde::Serialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

/// Gateway template shipped with the crate
pub const BUNDLED_TEMPLATE: &str = include_str!("../config/envoy.template.yaml");

/// Renders the gateway template against a context tree
pub trait TemplateRenderer {
    fn render(&self, context: &Value) -> AppResult<String>;
}

/// [`TemplateRenderer`] backed by Tera
pub struct TeraRenderer {
    tera: Tera,
    name: String,
}

impl TeraRenderer {
    /// Register `template` under `name`
    pub fn from_template(name: &str, template: &str) -> AppResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(name, template)
            .map_err(|source| AppError::Template {
                name: name.to_string(),
                source,
            })?;
        Ok(Self {
            tera,
            name: name.to_string(),
        })
    }

    /// Load `template_file` relative to `template_root`
    pub fn from_root<P: AsRef<Path>>(template_root: P, template_file: &str) -> AppResult<Self> {
        let path: PathBuf = template_root.as_ref().join(template_file);
        let template = std::fs::read_to_string(&path).map_err(|source| {
            AppError::ConfigFileRead {
                path: path.display().to_string(),
                source,
            }
        })?;
        Self::from_template(template_file, &template)
    }

    /// Register [`BUNDLED_TEMPLATE`]
    pub fn bundled() -> AppResult<Self> {
        Self::from_template("envoy.template.yaml", BUNDLED_TEMPLATE)
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, context: &Value) -> AppResult<String> {
        let template_error = |source| AppError::Template {
            name: self.name.clone(),
            source,
        };
        let context = Context::from_value(context.clone()).map_err(template_error)?;
        self.tera.render(&self.name, &context).map_err(template_error)
    }
}

/// The two rendered outputs of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Canonical normalized document
    pub canonical: String,
    /// Gateway configuration
    pub gateway: String,
}

/// Serialize the canonical document as YAML with keys sorted at every level
pub fn render_canonical(normalized: &NormalizedConfig) -> AppResult<String> {
    let document = tree(&normalized.document)?;
    serde_yaml::to_string(&sorted(document)).map_err(|source| AppError::Serialize { source })
}

/// Rebuild a tree as YAML with mapping keys in sorted order
fn sorted(value: Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                serde_yaml::Value::Number(u.into())
            } else if let Some(i) = n.as_i64() {
                serde_yaml::Value::Number(i.into())
            } else {
                serde_yaml::Value::Number(n.as_f64().unwrap_or_default().into())
            }
        }
        Value::String(s) => serde_yaml::Value::String(s),
        Value::Array(items) => {
            serde_yaml::Value::Sequence(items.into_iter().map(sorted).collect())
        }
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            serde_yaml::Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (serde_yaml::Value::String(k), sorted(v)))
                    .collect(),
            )
        }
    }
}

/// Build the context handed to the gateway template
pub fn render_context(normalized: &NormalizedConfig, canonical: &str) -> AppResult<Value> {
    Ok(json!({
        "prompt_gateway_listener": tree(&normalized.ingress)?,
        "llm_gateway_listener": tree(&normalized.egress)?,
        "arch_config": canonical,
        // Older templates read the same document under this name
        "arch_llm_config": canonical,
        "arch_clusters": tree(&normalized.clusters)?,
        "arch_llm_providers": tree(normalized.llm_providers())?,
        "arch_tracing": normalized.tracing(),
        "local_llms": tree(&normalized.local_llms)?,
        "agent_orchestrator": normalized.agent_orchestrator,
        "llms_with_usage": normalized.llms_with_usage,
    }))
}

fn tree<T: Serialize + ?Sized>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|source| AppError::DocumentShape { source })
}

/// Produce both artifacts in memory
pub fn emit(normalized: &NormalizedConfig, renderer: &dyn TemplateRenderer) -> AppResult<Artifacts> {
    let canonical = render_canonical(normalized)?;
    let context = render_context(normalized, &canonical)?;
    let gateway = renderer.render(&context)?;

    tracing::debug!(bytes = gateway.len(), "Rendered gateway configuration");

    Ok(Artifacts { canonical, gateway })
}

/// Write both artifacts, canonical document first
///
/// The writes are not atomic as a pair: if the gateway configuration fails to
/// write, the canonical document is already on disk.
pub fn write(artifacts: &Artifacts, canonical_path: &Path, gateway_path: &Path) -> AppResult<()> {
    write_file(canonical_path, &artifacts.canonical)?;
    write_file(gateway_path, &artifacts.gateway)?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> AppResult<()> {
    std::fs::write(path, content).map_err(|source| AppError::ArtifactWrite {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote artifact");
    Ok(())
}
