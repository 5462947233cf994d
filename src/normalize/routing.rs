//! Routing provider synthesis

use crate::config::{LlmProvider, RoutingConfig};
use crate::error::{AppError, AppResult};
use std::collections::HashSet;

/// Name of the routing provider appended when none is configured
pub const DEFAULT_ROUTING_LLM_PROVIDER: &str = "arch-router";

/// Model served by the synthetic routing provider unless `routing.model` says otherwise
pub const DEFAULT_ROUTING_MODEL_NAME: &str = "Arch-Router";

/// Interface of the synthetic routing provider
pub const ROUTING_PROVIDER_INTERFACE: &str = "arch";

/// Make sure routing preferences have a provider to route with
///
/// Does nothing unless some provider declared a routing preference. An explicit
/// `routing.llm_provider` must name a declared provider; otherwise a synthetic
/// `arch-router` provider is returned, unless one by that name already exists.
pub fn synthesize(
    routing_preference_names: &HashSet<String>,
    provider_names: &HashSet<String>,
    routing: Option<&RoutingConfig>,
) -> AppResult<Option<LlmProvider>> {
    if routing_preference_names.is_empty() {
        return Ok(None);
    }

    if let Some(name) = routing.and_then(|r| r.llm_provider.as_deref()) {
        if !provider_names.contains(name) {
            return Err(AppError::UnknownRoutingProvider {
                name: name.to_string(),
            });
        }
        return Ok(None);
    }

    if provider_names.contains(DEFAULT_ROUTING_LLM_PROVIDER) {
        return Ok(None);
    }

    let model = routing
        .and_then(|r| r.model.clone())
        .unwrap_or_else(|| DEFAULT_ROUTING_MODEL_NAME.to_string());

    tracing::info!(
        name = DEFAULT_ROUTING_LLM_PROVIDER,
        model = %model,
        "Adding default routing llm_provider"
    );

    Ok(Some(LlmProvider {
        name: Some(DEFAULT_ROUTING_LLM_PROVIDER.to_string()),
        model,
        provider_interface: Some(ROUTING_PROVIDER_INTERFACE.to_string()),
        ..Default::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_no_preferences_no_router() {
        let result = synthesize(&set(&[]), &set(&["openai/gpt-4o"]), None).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_preferences_add_default_router() {
        let router = synthesize(&set(&["code generation"]), &set(&["openai/gpt-4o"]), None)
            .unwrap()
            .expect("router should be synthesized");
        assert_eq!(router.name.as_deref(), Some("arch-router"));
        assert_eq!(router.provider_interface.as_deref(), Some("arch"));
        assert_eq!(router.model, "Arch-Router");
    }

    #[test]
    fn test_routing_model_overrides_default_model() {
        let routing = RoutingConfig {
            model: Some("Arch-Router-1.5B".to_string()),
            ..Default::default()
        };
        let router = synthesize(&set(&["code"]), &set(&[]), Some(&routing))
            .unwrap()
            .unwrap();
        assert_eq!(router.model, "Arch-Router-1.5B");
    }

    #[test]
    fn test_existing_arch_router_is_not_duplicated() {
        let result = synthesize(&set(&["code"]), &set(&["arch-router"]), None).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_explicit_routing_provider_must_exist() {
        let routing = RoutingConfig {
            llm_provider: Some("my-router".to_string()),
            ..Default::default()
        };
        let err = synthesize(&set(&["code"]), &set(&["openai/gpt-4o"]), Some(&routing))
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Routing llm_provider my-router is not defined"));
    }

    #[test]
    fn test_explicit_routing_provider_suppresses_synthesis() {
        let routing = RoutingConfig {
            llm_provider: Some("my-router".to_string()),
            ..Default::default()
        };
        let result = synthesize(&set(&["code"]), &set(&["my-router"]), Some(&routing)).unwrap();
        assert!(result.is_none());
    }
}
