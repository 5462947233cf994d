//! Error types for archcfg
//!
//! Every error is fatal: the run stops at the first one and nothing is retried.

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration has an unexpected shape: {source}")]
    DocumentShape {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to compile schema {path}: {reason}")]
    SchemaCompile { path: String, reason: String },

    #[error(
        "Error validating arch_config file: {path}, {} violation(s): {}",
        .violations.len(),
        .violations.join("; ")
    )]
    SchemaViolation {
        path: String,
        violations: Vec<String>,
    },

    #[error(
        "Unknown endpoint {name}, please add it in endpoints section in your arch_config.yaml file"
    )]
    UnknownEndpoint { name: String },

    #[error("Malformed endpoint '{address}': port '{port}' is not a valid port number")]
    MalformedEndpoint { address: String, port: String },

    #[error(
        "Duplicate llm_provider name {name}, please provide unique name for each llm_provider"
    )]
    DuplicateProviderName { name: String },

    #[error("Duplicate {kind} {model}, please provide unique {kind} for each llm_provider")]
    DuplicateModelId { kind: &'static str, model: String },

    #[error(
        "Duplicate routing preference name \"{name}\", please provide unique name for each routing preference"
    )]
    DuplicateRoutingPreferenceName { name: String },

    #[error(
        "Invalid model name {model}. Please provide model name in the format <provider>/<model_id>."
    )]
    InvalidModelFormat { model: String },

    #[error(
        "Must provide base_url and provider_interface for unsupported provider {provider} for model {model}. Supported providers are: {supported}"
    )]
    MissingProviderInterface {
        provider: String,
        model: String,
        supported: String,
    },

    #[error(
        "llm_provider {name} (model {model}) has no provider_interface; every llm_provider in a normalized config must name its provider_interface"
    )]
    ProviderInterfaceRequired { name: String, model: String },

    #[error(
        "Please provide provider interface as part of model name {model} using the format <provider>/<model_id>. For example, use 'openai/gpt-3.5-turbo' instead of 'gpt-3.5-turbo'"
    )]
    RedundantProviderInterface { model: String },

    #[error("Please provide either provider or provider_interface, not both (llm_provider {name})")]
    ConflictingProviderFields { name: String },

    #[error(
        "Please provide base_url without path, got {base_url}. Use base_url like 'http://example.com' instead of 'http://example.com/path'."
    )]
    BaseUrlHasPath { base_url: String },

    #[error(
        "Please provide a valid URL with scheme (http/https) in base_url, got {base_url}"
    )]
    InvalidBaseUrlScheme { base_url: String },

    #[error("Routing llm_provider {name} is not defined in llm_providers")]
    UnknownRoutingProvider { name: String },

    #[error(
        "Please provide agent orchestrator in the endpoints section in your arch_config.yaml file"
    )]
    NoOrchestratorEndpoint,

    #[error(
        "Please provide single agent orchestrator in the endpoints section in your arch_config.yaml file, found {count}"
    )]
    MultipleOrchestratorEndpoints { count: usize },

    #[error("Failed to render template {name}: {source}")]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to serialize normalized config: {source}")]
    Serialize {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write {path}: {source}")]
    ArtifactWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Whether this error comes from schema validation rather than normalization
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation { .. })
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
