//! Configuration document model
//!
//! Typed view of `arch_config.yaml`. Only the sections the normalizer interprets
//! are modelled as fields; every other key is kept in an `extra` map so that it
//! survives into the canonical document untouched.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Keys the pipeline does not interpret, carried through verbatim
pub type Extra = Map<String, Value>;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArchConfig {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub endpoints: BTreeMap<String, Endpoint>,
    #[serde(default)]
    pub llm_providers: Vec<LlmProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_targets: Option<Vec<PromptTarget>>,
    /// Opaque to this crate; handed to the gateway template as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracing: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listeners: Option<Listeners>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Overrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingConfig>,
    /// Set on every canonical document this crate writes.
    ///
    /// A document carrying the marker has already been through normalization:
    /// provider models are bare model ids and every provider names its interface.
    #[serde(default, skip_serializing_if = "is_false")]
    pub normalized: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A named network destination declared under `endpoints`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Endpoint {
    /// `host` or `host:port`
    #[serde(alias = "address")]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Only present on canonical documents, where the host has been split off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// An upstream model backend declared under `llm_providers`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LlmProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `<provider>/<model_id>` on input, `<model_id>` once normalized
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_interface: Option<String>,
    /// Legacy spelling of `provider_interface`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routing_preferences: Vec<RoutingPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    /// Host derived from `base_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Port derived from `base_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Scheme derived from `base_url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl LlmProvider {
    /// Display name, falling back to the full model string
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.model)
    }
}

/// A named, described intent used to pick a provider at request time
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RoutingPreference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PromptTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointRef>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Reference from a prompt target to an entry in `endpoints`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EndpointRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Listeners {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_traffic: Option<Listener>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egress_traffic: Option<Listener>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Traffic listener settings; absent fields are filled in by listener defaulting
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Listener {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Overrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_agent_orchestrator: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RoutingConfig {
    /// Provider that serves routing decisions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_provider: Option<String>,
    /// Model used by the synthetic routing provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ArchConfig {
    /// Read a YAML document from disk as an untyped tree
    ///
    /// Schema validation runs on this tree before it is converted with
    /// [`ArchConfig::from_value`].
    pub fn read_document<P: AsRef<Path>>(path: P) -> AppResult<Value> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        parse_document(&content, &path_display)
    }

    /// Convert a (schema-validated) document tree into the typed model
    pub fn from_value(document: Value) -> AppResult<Self> {
        serde_json::from_value(document).map_err(|source| AppError::DocumentShape { source })
    }

    /// Whether `overrides.use_agent_orchestrator` is switched on
    pub fn use_agent_orchestrator(&self) -> bool {
        self.overrides
            .as_ref()
            .and_then(|o| o.use_agent_orchestrator)
            .unwrap_or(false)
    }
}

/// Parse YAML text into an untyped tree
///
/// `origin` names the source in error messages.
pub fn parse_document(content: &str, origin: &str) -> AppResult<Value> {
    let document: Value =
        serde_yaml::from_str(content).map_err(|source| AppError::ConfigParseFailed {
            path: origin.to_string(),
            source,
        })?;

    // A file holding only comments parses as null
    Ok(match document {
        Value::Null => Value::Object(Map::new()),
        other => other,
    })
}

impl FromStr for ArchConfig {
    type Err = AppError;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        Self::from_value(parse_document(yaml, "<string>")?)
    }
}
