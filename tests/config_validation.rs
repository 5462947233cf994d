//! Integration tests for configuration validation
//!
//! Runs whole documents through schema validation and normalization and checks
//! that invalid configurations are rejected with the message users rely on.

use archcfg::config::parse_document;
use archcfg::error::AppError;
use archcfg::generator;
use archcfg::normalize::NormalizedConfig;
use archcfg::schema::JsonSchemaValidator;

const LISTENERS: &str = r#"
version: v0.1.0

listeners:
  egress_traffic:
    address: 0.0.0.0
    port: 12000
    message_format: openai
    timeout: 30s
"#;

fn check(providers: &str) -> Result<NormalizedConfig, AppError> {
    let yaml = format!("{LISTENERS}\n{providers}");
    let document = parse_document(&yaml, "arch_config.yaml").expect("test YAML should parse");
    let validator = JsonSchemaValidator::bundled().expect("bundled schema should compile");
    generator::check(document, "arch_config.yaml", &validator)
}

fn assert_rejected(providers: &str, expected: &str) {
    let err = check(providers).expect_err("configuration should be rejected");
    assert!(
        err.to_string().contains(expected),
        "Error should mention '{}', got: {}",
        expected,
        err
    );
}

#[test]
fn test_happy_path_adds_router_and_keeps_listener() {
    let normalized = check(
        r#"
llm_providers:

  - model: openai/gpt-4o-mini
    access_key: $OPENAI_API_KEY
    default: true

  - model: openai/gpt-4o
    access_key: $OPENAI_API_KEY
    routing_preferences:
      - name: code understanding
        description: understand and explain existing code snippets, functions, or libraries

  - model: openai/gpt-4.1
    access_key: $OPENAI_API_KEY
    routing_preferences:
      - name: code generation
        description: generating new code snippets, functions, or boilerplate based on user prompts or requirements

tracing:
  random_sampling: 100
"#,
    )
    .expect("configuration should be valid");

    let names: Vec<&str> = normalized
        .llm_providers()
        .iter()
        .map(|p| p.display_name())
        .collect();
    assert_eq!(
        names,
        vec!["openai/gpt-4o-mini", "openai/gpt-4o", "openai/gpt-4.1", "arch-router"]
    );
    assert_eq!(normalized.llm_providers()[0].model, "gpt-4o-mini");
    assert_eq!(normalized.egress.address.as_deref(), Some("0.0.0.0"));
    assert_eq!(normalized.egress.timeout.as_deref(), Some("30s"));
    assert_eq!(normalized.ingress.port, Some(10000));
}

#[test]
fn test_duplicate_provider_name() {
    assert_rejected(
        r#"
llm_providers:

  - name: test1
    model: openai/gpt-4o
    access_key: $OPENAI_API_KEY

  - name: test1
    model: openai/gpt-4o
    access_key: $OPENAI_API_KEY
"#,
        "Duplicate llm_provider name",
    );
}

#[test]
fn test_provider_interface_with_supported_provider() {
    assert_rejected(
        r#"
llm_providers:

  - model: openai/gpt-4o
    access_key: $OPENAI_API_KEY
    provider_interface: openai
"#,
        "Please provide provider interface as part of model name",
    );
}

#[test]
fn test_duplicate_model_id() {
    assert_rejected(
        r#"
llm_providers:

  - model: openai/gpt-4o
    access_key: $OPENAI_API_KEY

  - model: mistral/gpt-4o
"#,
        "Duplicate model_id",
    );
}

#[test]
fn test_custom_provider_needs_base_url_and_interface() {
    assert_rejected(
        r#"
llm_providers:

  - model: custom/gpt-4o
"#,
        "Must provide base_url and provider_interface",
    );
}

#[test]
fn test_base_url_with_path() {
    assert_rejected(
        r#"
llm_providers:

  - model: custom/gpt-4o
    base_url: "http://custom.com/test"
    provider_interface: openai
"#,
        "Please provide base_url without path",
    );
}

#[test]
fn test_duplicate_routing_preference_name() {
    assert_rejected(
        r#"
llm_providers:

  - model: openai/gpt-4o-mini
    access_key: $OPENAI_API_KEY
    default: true

  - model: openai/gpt-4o
    access_key: $OPENAI_API_KEY
    routing_preferences:
      - name: code understanding
        description: understand and explain existing code snippets, functions, or libraries

  - model: openai/gpt-4.1
    access_key: $OPENAI_API_KEY
    routing_preferences:
      - name: code understanding
        description: generating new code snippets, functions, or boilerplate based on user prompts or requirements
"#,
        "Duplicate routing preference name",
    );
}

#[test]
fn test_model_without_provider_prefix() {
    let err = check("llm_providers:\n  - model: gpt-4o\n").unwrap_err();
    assert!(
        matches!(err, AppError::InvalidModelFormat { ref model } if model == "gpt-4o"),
        "Expected InvalidModelFormat, got: {:?}",
        err
    );
}

#[test]
fn test_custom_provider_with_base_url_is_local() {
    let normalized = check(
        r#"
llm_providers:
  - model: ollama/llama3
    base_url: https://llm.internal:8443
    provider_interface: openai
"#,
    )
    .expect("configuration should be valid");

    assert_eq!(normalized.local_llms.len(), 1);
    let local = &normalized.local_llms[0];
    assert_eq!(local.endpoint.as_deref(), Some("llm.internal"));
    assert_eq!(local.port, Some(8443));
    assert_eq!(local.protocol.as_deref(), Some("https"));
}

#[test]
fn test_routing_provider_must_exist() {
    assert_rejected(
        r#"
routing:
  llm_provider: my-router

llm_providers:
  - model: openai/gpt-4o
    routing_preferences:
      - name: code generation
        description: generating new code
"#,
        "my-router",
    );
}

#[test]
fn test_schema_violation_lists_every_problem() {
    let err = check(
        r#"
llm_providers:
  - name: missing-model
endpoints:
  app_server:
    endpoint: localhost
    protocol: grpc
"#,
    )
    .unwrap_err();

    match err {
        AppError::SchemaViolation { path, violations } => {
            assert_eq!(path, "arch_config.yaml");
            assert!(
                violations.len() >= 2,
                "Expected every violation, got: {:?}",
                violations
            );
        }
        other => panic!("Expected SchemaViolation, got: {:?}", other),
    }
}

#[test]
fn test_orchestrator_requires_single_endpoint() {
    let base = "overrides:\n  use_agent_orchestrator: true\nllm_providers:\n  - model: openai/gpt-4o\n";

    let err = check(base).unwrap_err();
    assert!(matches!(err, AppError::NoOrchestratorEndpoint));

    let err = check(&format!(
        "{base}endpoints:\n  svc1:\n    endpoint: svc1:80\n  svc2:\n    endpoint: svc2:80\n"
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::MultipleOrchestratorEndpoints { count: 2 }
    ));

    let normalized =
        check(&format!("{base}endpoints:\n  svc1:\n    endpoint: svc1:80\n")).unwrap();
    assert_eq!(normalized.agent_orchestrator.as_deref(), Some("svc1"));
}

#[test]
fn test_normalized_marker_reads_models_as_bare_ids() {
    let normalized = check(
        r#"
normalized: true
llm_providers:
  - name: gpt
    model: gpt-4o
    provider_interface: openai
"#,
    )
    .expect("marked document should be read as already normalized");
    assert_eq!(normalized.llm_providers()[0].model, "gpt-4o");

    // The same document without the marker is rejected
    assert_rejected(
        r#"
llm_providers:
  - name: gpt
    model: gpt-4o
    provider_interface: openai
"#,
        "Invalid model name gpt-4o",
    );
}

#[test]
fn test_normalized_marker_still_needs_interface() {
    assert_rejected(
        r#"
normalized: true
llm_providers:
  - name: gpt
    model: gpt-4o
"#,
        "llm_provider gpt (model gpt-4o) has no provider_interface",
    );
}
