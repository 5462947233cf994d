//! archcfg - arch gateway configuration compiler
//!
//! Validates a gateway configuration document against its schema, normalizes
//! endpoints, llm_providers, routing preferences and listeners, and renders the
//! canonical document together with the envoy configuration.

pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod normalize;
pub mod schema;
pub mod settings;
pub mod telemetry;
