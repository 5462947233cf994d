//! Validation and normalization pipeline
//!
//! Runs the normalization stages over a schema-validated document in order:
//!
//! 1. cluster inference (and prompt target endpoint checks)
//! 2. provider normalization
//! 3. routing provider synthesis
//! 4. listener defaulting
//! 5. agent orchestrator selection
//!
//! The first failing stage aborts the run.

pub mod clusters;
pub mod endpoint;
pub mod listeners;
pub mod orchestrator;
pub mod providers;
pub mod routing;

pub use clusters::{Cluster, Clusters};
pub use listeners::ListenerKind;
pub use providers::{NormalizedProviders, ProviderNormalizer, SupportedProvider};

use crate::config::{ArchConfig, Endpoint, Listener, Listeners, LlmProvider};
use crate::error::AppResult;
use serde_json::Value;

/// Output of a successful normalization run
#[derive(Debug, Clone)]
pub struct NormalizedConfig {
    /// Canonical document, written out as-is
    pub document: ArchConfig,
    pub clusters: Clusters,
    pub ingress: Listener,
    pub egress: Listener,
    /// Providers reached through their own `base_url`
    pub local_llms: Vec<LlmProvider>,
    /// Names of providers carrying a `usage` marker
    pub llms_with_usage: Vec<String>,
    pub agent_orchestrator: Option<String>,
}

impl NormalizedConfig {
    /// Final provider list, including any synthetic routing provider
    pub fn llm_providers(&self) -> &[LlmProvider] {
        &self.document.llm_providers
    }

    /// Tracing section, or an empty map when none was configured
    pub fn tracing(&self) -> Value {
        self.document
            .tracing
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()))
    }
}

/// Normalize a parsed configuration document
pub fn normalize(mut config: ArchConfig) -> AppResult<NormalizedConfig> {
    let canonical = config.normalized;

    let clusters = clusters::infer(&config.endpoints)?;
    if let Some(targets) = &config.prompt_targets {
        clusters::check_prompt_targets(targets, &clusters)?;
    }

    let providers = providers::normalize(&config.llm_providers, canonical)?;
    let mut llm_providers = providers.providers;
    if let Some(router) = routing::synthesize(
        &providers.routing_preference_names,
        &providers.names,
        config.routing.as_ref(),
    )? {
        llm_providers.push(router);
    }

    let declared_listeners = config.listeners.take().unwrap_or_default();
    let ingress = listeners::apply_defaults(
        declared_listeners.ingress_traffic.as_ref(),
        ListenerKind::Ingress,
    );
    let egress = listeners::apply_defaults(
        declared_listeners.egress_traffic.as_ref(),
        ListenerKind::Egress,
    );

    let agent_orchestrator =
        orchestrator::select(config.use_agent_orchestrator(), &config.endpoints)?;

    config.endpoints = clusters
        .iter()
        .map(|(name, cluster)| (name.clone(), Endpoint::from(cluster)))
        .collect();
    config.llm_providers = llm_providers;
    config.listeners = Some(Listeners {
        ingress_traffic: Some(ingress.clone()),
        egress_traffic: Some(egress.clone()),
        extra: declared_listeners.extra,
    });
    config.normalized = true;

    tracing::info!(
        clusters = clusters.len(),
        llm_providers = config.llm_providers.len(),
        local_llms = providers.local_llms.len(),
        agent_orchestrator = ?agent_orchestrator,
        "Configuration normalized"
    );

    Ok(NormalizedConfig {
        document: config,
        clusters,
        ingress,
        egress,
        local_llms: providers.local_llms,
        llms_with_usage: providers.llms_with_usage,
        agent_orchestrator,
    })
}
