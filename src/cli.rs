//! Command-line interface for archcfg
//!
//! Every path can also be set through the environment, so the bare binary runs
//! unchanged inside the gateway container.

use crate::settings::{
    DEFAULT_CONFIG_FILE, DEFAULT_ENVOY_CONFIG_FILE, DEFAULT_RENDERED_CONFIG_FILE,
    DEFAULT_SCHEMA_FILE, DEFAULT_TEMPLATE_FILE, DEFAULT_TEMPLATE_ROOT, Settings,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gateway configuration validator and renderer
#[derive(Parser)]
#[command(name = "archcfg")]
#[command(version)]
#[command(about = "Validate the arch gateway configuration and render the envoy config")]
#[command(
    long_about = "archcfg validates arch_config.yaml against its schema, normalizes \
    endpoints, llm_providers and listeners, and writes the normalized document \
    together with the envoy configuration rendered from a template."
)]
pub struct Cli {
    /// Configuration document to validate
    #[arg(long, env = "ARCH_CONFIG_FILE", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config_file: PathBuf,

    /// JSON Schema (YAML or JSON) the configuration must satisfy
    #[arg(long, env = "ARCH_CONFIG_SCHEMA_FILE", default_value = DEFAULT_SCHEMA_FILE, global = true)]
    pub schema_file: PathBuf,

    /// Output path of the normalized configuration
    #[arg(long, env = "ARCH_CONFIG_FILE_RENDERED", default_value = DEFAULT_RENDERED_CONFIG_FILE)]
    pub rendered_config_file: PathBuf,

    /// Output path of the envoy configuration
    #[arg(long, env = "ENVOY_CONFIG_FILE_RENDERED", default_value = DEFAULT_ENVOY_CONFIG_FILE)]
    pub envoy_config_file: PathBuf,

    /// Envoy template file name, relative to --template-root
    #[arg(long, env = "ENVOY_CONFIG_TEMPLATE_FILE", default_value = DEFAULT_TEMPLATE_FILE)]
    pub template_file: String,

    /// Directory holding the envoy template
    #[arg(long, env = "TEMPLATE_ROOT", default_value = DEFAULT_TEMPLATE_ROOT)]
    pub template_root: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate and normalize the configuration without writing anything
    Validate,
    /// Generate a starter configuration file
    Init {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            config_file: self.config_file.clone(),
            schema_file: self.schema_file.clone(),
            rendered_config_file: self.rendered_config_file.clone(),
            envoy_config_file: self.envoy_config_file.clone(),
            template_file: self.template_file.clone(),
            template_root: self.template_root.clone(),
        }
    }
}

/// Generate starter configuration content
pub fn generate_config_template() -> &'static str {
    r#"# arch gateway configuration
# ==========================
#
# Validated against arch_config_schema.yaml, then normalized into
# arch_config_rendered.yaml and rendered into envoy.yaml.
#
# arch_config_rendered.yaml carries "normalized: true". Do not set it in a
# hand-written file: a document with the marker is read as already
# normalized, so <provider>/<model_id> splitting, the provider_interface
# rules and the full model name duplicate check are skipped.

version: v0.1.0

# ─────────────────────────────────────────────────────────────────────────────
# LISTENERS
# ─────────────────────────────────────────────────────────────────────────────
#
# Omitted fields default to 127.0.0.1, port 10000 (ingress) or 12000 (egress),
# and a 10s timeout.

listeners:
  ingress_traffic:
    address: 0.0.0.0
    port: 10000
    message_format: openai
    timeout: 30s
  egress_traffic:
    address: 0.0.0.0
    port: 12000
    message_format: openai
    timeout: 30s

# ─────────────────────────────────────────────────────────────────────────────
# ENDPOINTS
# ─────────────────────────────────────────────────────────────────────────────
#
# Application servers reachable from prompt targets. "host:port", or a bare
# host with the port taken from the protocol (http: 80, https: 443).

endpoints:
  app_server:
    endpoint: host.docker.internal:18083
    connect_timeout: 0.005s

# ─────────────────────────────────────────────────────────────────────────────
# LLM PROVIDERS
# ─────────────────────────────────────────────────────────────────────────────
#
# model is <provider>/<model_id>. Supported providers (arch, claude, deepseek,
# groq, mistral, openai, gemini) imply their interface. Any other provider
# needs both base_url (scheme, host and optional port only) and
# provider_interface.
#
# Routing preferences add an arch-router provider unless routing.llm_provider
# names one of the providers below.

llm_providers:
  - model: openai/gpt-4o-mini
    access_key: $OPENAI_API_KEY
    default: true

  - model: openai/gpt-4o
    access_key: $OPENAI_API_KEY
    routing_preferences:
      - name: code understanding
        description: understand and explain existing code snippets, functions, or libraries

  - name: local-llama
    model: ollama/llama3.1
    base_url: http://host.docker.internal:11434
    provider_interface: openai

prompt_targets:
  - name: get_weather
    description: Get the current weather for a city
    endpoint:
      name: app_server
      path: /weather

# ─────────────────────────────────────────────────────────────────────────────
# TRACING (Optional)
# ─────────────────────────────────────────────────────────────────────────────

tracing:
  random_sampling: 100
"#
}
