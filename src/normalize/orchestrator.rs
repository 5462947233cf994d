//! Agent orchestrator selection

use crate::config::Endpoint;
use crate::error::{AppError, AppResult};
use std::collections::BTreeMap;

/// Pick the agent orchestrator endpoint
///
/// When `enabled`, exactly one endpoint must be declared and its name is the
/// orchestrator. When not enabled there is no orchestrator.
pub fn select(
    enabled: bool,
    endpoints: &BTreeMap<String, Endpoint>,
) -> AppResult<Option<String>> {
    if !enabled {
        return Ok(None);
    }

    tracing::info!("Using agent orchestrator");

    let mut names = endpoints.keys();
    match (names.next(), endpoints.len()) {
        (None, _) => Err(AppError::NoOrchestratorEndpoint),
        (Some(name), 1) => {
            tracing::info!(agent_orchestrator = %name, "Selected agent orchestrator");
            Ok(Some(name.clone()))
        }
        (Some(_), count) => Err(AppError::MultipleOrchestratorEndpoints { count }),
    }
}
