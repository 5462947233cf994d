//! Cluster inference
//!
//! Every declared endpoint becomes a cluster with a concrete host and port.

use super::endpoint::{self, DEFAULT_PROTOCOL};
use crate::config::{Endpoint, Extra, PromptTarget};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resolved form of an [`Endpoint`]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Cluster {
    /// Host only, the port has been split off
    pub endpoint: String,
    pub port: u16,
    pub protocol: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<&Cluster> for Endpoint {
    fn from(cluster: &Cluster) -> Self {
        Self {
            endpoint: cluster.endpoint.clone(),
            protocol: Some(cluster.protocol.clone()),
            port: Some(cluster.port),
            extra: cluster.extra.clone(),
        }
    }
}

/// Clusters keyed by endpoint name
pub type Clusters = BTreeMap<String, Cluster>;

/// Resolve every endpoint into a cluster
///
/// An endpoint that already carries a `port` and whose address has no port
/// token keeps that port, so a canonical document resolves to itself.
pub fn infer(endpoints: &BTreeMap<String, Endpoint>) -> AppResult<Clusters> {
    let mut clusters = Clusters::new();

    for (name, declared) in endpoints {
        let protocol = declared
            .protocol
            .clone()
            .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string());

        let resolved = endpoint::resolve(&declared.endpoint, &protocol)?;
        let port = match declared.port {
            Some(port) if !endpoint::has_port(&declared.endpoint) => port,
            _ => resolved.port,
        };

        clusters.insert(
            name.clone(),
            Cluster {
                endpoint: resolved.host,
                port,
                protocol,
                extra: declared.extra.clone(),
            },
        );
    }

    tracing::debug!(
        clusters = ?clusters.keys().collect::<Vec<_>>(),
        "Inferred clusters from endpoints"
    );

    Ok(clusters)
}

/// Check that every prompt target referencing an endpoint by name can find it
///
/// Targets without an endpoint reference are skipped.
pub fn check_prompt_targets(targets: &[PromptTarget], clusters: &Clusters) -> AppResult<()> {
    for target in targets {
        let Some(name) = target.endpoint.as_ref().and_then(|e| e.name.as_deref()) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if !clusters.contains_key(name) {
            return Err(AppError::UnknownEndpoint {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
