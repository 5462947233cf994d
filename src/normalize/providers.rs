//! Provider normalization
//!
//! Validates the `llm_providers` list and rewrites each entry into its
//! canonical form: `model` becomes the bare model id, `provider_interface` is
//! always set, the legacy `provider` key is dropped, and `base_url` is split
//! into host, port and scheme.
//!
//! Uniqueness is enforced in a single forward pass over three independent
//! namespaces:
//!
//! - provider names (`name`, defaulting to the full model string)
//! - model identifiers (full `<provider>/<model_id>` strings and bare model ids)
//! - routing preference names, across every provider combined
//!
//! A provider's name must also not collide with another provider's model id.

use super::endpoint;
use super::routing::{DEFAULT_ROUTING_LLM_PROVIDER, ROUTING_PROVIDER_INTERFACE};
use crate::config::LlmProvider;
use crate::error::{AppError, AppResult};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Provider prefixes that imply their own provider interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedProvider {
    Arch,
    Claude,
    Deepseek,
    Groq,
    Mistral,
    OpenAI,
    Gemini,
}

impl SupportedProvider {
    pub const ALL: [Self; 7] = [
        Self::Arch,
        Self::Claude,
        Self::Deepseek,
        Self::Groq,
        Self::Mistral,
        Self::OpenAI,
        Self::Gemini,
    ];

    /// Prefix as written in `<provider>/<model_id>`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arch => "arch",
            Self::Claude => "claude",
            Self::Deepseek => "deepseek",
            Self::Groq => "groq",
            Self::Mistral => "mistral",
            Self::OpenAI => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Comma separated list for error messages
    pub fn list() -> String {
        Self::ALL
            .iter()
            .map(SupportedProvider::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SupportedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedProvider {
    type Err = ();

    /// Case-sensitive: `OpenAI/gpt-4o` is a custom provider, not `openai`
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == value)
            .ok_or(())
    }
}

/// Result of normalizing the provider list
#[derive(Debug, Clone, Default)]
pub struct NormalizedProviders {
    /// Normalized providers in input order
    pub providers: Vec<LlmProvider>,
    /// Every provider name seen
    pub names: HashSet<String>,
    /// Every routing preference name seen, across all providers
    pub routing_preference_names: HashSet<String>,
    /// Providers reached through their own `base_url`
    pub local_llms: Vec<LlmProvider>,
    /// Names of providers carrying a `usage` marker
    pub llms_with_usage: Vec<String>,
}

/// Host, port and scheme taken from a provider's `base_url`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    pub host: String,
    pub port: u16,
    pub scheme: String,
}

/// Parse a provider `base_url`
///
/// The URL must not carry a path (a bare `/` is allowed) and its scheme must be
/// `http` or `https`. The port defaults by scheme.
pub fn parse_base_url(base_url: &str) -> AppResult<BaseUrl> {
    let invalid_scheme = || AppError::InvalidBaseUrlScheme {
        base_url: base_url.to_string(),
    };

    // Without a scheme the url crate refuses to parse at all
    let parsed = Url::parse(base_url).map_err(|_| invalid_scheme())?;

    let path = parsed.path();
    if !path.is_empty() && path != "/" {
        return Err(AppError::BaseUrlHasPath {
            base_url: base_url.to_string(),
        });
    }

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(invalid_scheme());
    }

    // Url::port() is None when the port equals the scheme's default
    let port = parsed
        .port()
        .unwrap_or_else(|| endpoint::default_port(scheme));

    Ok(BaseUrl {
        host: parsed.host_str().unwrap_or_default().to_string(),
        port,
        scheme: scheme.to_string(),
    })
}

/// Split `<provider>/<model_id>`; the model id may itself contain `/`
pub fn split_model(model: &str) -> AppResult<(&str, &str)> {
    model
        .split_once('/')
        .ok_or_else(|| AppError::InvalidModelFormat {
            model: model.to_string(),
        })
}

/// Single-pass provider normalizer
///
/// Holds the per-run "seen" sets; create a fresh one for every run.
#[derive(Debug, Default)]
pub struct ProviderNormalizer {
    canonical: bool,
    /// Full model strings and bare model ids
    model_keys: HashSet<String>,
    /// Bare model ids only, for the name/model-id cross check
    model_ids: HashSet<String>,
    output: NormalizedProviders,
}

impl ProviderNormalizer {
    /// Create a normalizer
    ///
    /// With `canonical` set, entries are expected in their normalized form
    /// (bare model ids, explicit `provider_interface`).
    pub fn new(canonical: bool) -> Self {
        Self {
            canonical,
            ..Default::default()
        }
    }

    /// Validate one declared provider and append its normalized form
    pub fn push(&mut self, declared: &LlmProvider) -> AppResult<()> {
        let name = declared.display_name().to_string();
        if declared.usage.is_some() {
            self.output.llms_with_usage.push(name.clone());
        }

        // Checks on the record itself
        let (model_id, interface) = if self.canonical {
            (
                declared.model.clone(),
                declared.provider_interface.clone(),
            )
        } else {
            let (provider, model_id) = split_model(&declared.model)?;
            let interface = resolve_interface(provider, declared)?;
            (model_id.to_string(), Some(interface))
        };

        let interface = match &declared.provider {
            Some(_) if declared.provider_interface.is_some() => {
                return Err(AppError::ConflictingProviderFields { name });
            }
            Some(legacy) => legacy.clone(),
            None => interface.ok_or_else(|| AppError::ProviderInterfaceRequired {
                name: name.clone(),
                model: declared.model.clone(),
            })?,
        };

        // Checks against earlier records
        if self.output.names.contains(&name) {
            return Err(AppError::DuplicateProviderName { name });
        }

        // The synthetic router is appended without model id checks; re-reading
        // it from a canonical document must not check it either
        let synthetic_router = self.canonical
            && name == DEFAULT_ROUTING_LLM_PROVIDER
            && interface == ROUTING_PROVIDER_INTERFACE;
        if !synthetic_router {
            self.check_model_id(declared, &name, &model_id)?;
        }

        for preference in &declared.routing_preferences {
            if !self
                .output
                .routing_preference_names
                .insert(preference.name.clone())
            {
                return Err(AppError::DuplicateRoutingPreferenceName {
                    name: preference.name.clone(),
                });
            }
        }

        self.output.names.insert(name.clone());

        let mut provider = LlmProvider {
            name: Some(name),
            model: model_id,
            provider_interface: Some(interface),
            provider: None,
            ..declared.clone()
        };

        if let Some(base_url) = &declared.base_url {
            let parsed = parse_base_url(base_url)?;
            provider.endpoint = Some(parsed.host);
            provider.port = Some(parsed.port);
            provider.protocol = Some(parsed.scheme);
            self.output.local_llms.push(provider.clone());
        }

        tracing::debug!(
            name = provider.display_name(),
            model = %provider.model,
            provider_interface = provider.provider_interface.as_deref().unwrap_or_default(),
            "Normalized llm_provider"
        );

        self.output.providers.push(provider);
        Ok(())
    }

    /// Check a provider's model against every earlier provider and record it
    fn check_model_id(
        &mut self,
        declared: &LlmProvider,
        name: &str,
        model_id: &str,
    ) -> AppResult<()> {
        if !self.canonical && !self.model_keys.insert(declared.model.clone()) {
            return Err(AppError::DuplicateModelId {
                kind: "model name",
                model: declared.model.clone(),
            });
        }

        if self.model_keys.contains(model_id) || self.output.names.contains(model_id) {
            return Err(AppError::DuplicateModelId {
                kind: "model_id",
                model: model_id.to_string(),
            });
        }
        if self.model_ids.contains(name) {
            return Err(AppError::DuplicateModelId {
                kind: "model_id",
                model: name.to_string(),
            });
        }
        self.model_keys.insert(model_id.to_string());
        self.model_ids.insert(model_id.to_string());
        Ok(())
    }

    pub fn finish(self) -> NormalizedProviders {
        self.output
    }
}

/// Pick the provider interface for a model prefix
///
/// Supported prefixes imply their interface and must not restate it. Any other
/// prefix needs both `base_url` and an explicit `provider_interface`.
fn resolve_interface(provider: &str, declared: &LlmProvider) -> AppResult<String> {
    match SupportedProvider::from_str(provider) {
        Ok(supported) => {
            if declared.provider_interface.is_some() {
                return Err(AppError::RedundantProviderInterface {
                    model: declared.model.clone(),
                });
            }
            Ok(supported.as_str().to_string())
        }
        Err(()) => match (&declared.base_url, &declared.provider_interface) {
            (Some(_), Some(interface)) => Ok(interface.clone()),
            _ => Err(AppError::MissingProviderInterface {
                provider: provider.to_string(),
                model: declared.model.clone(),
                supported: SupportedProvider::list(),
            }),
        },
    }
}

/// Normalize a full provider list in one pass
pub fn normalize(providers: &[LlmProvider], canonical: bool) -> AppResult<NormalizedProviders> {
    let mut normalizer = ProviderNormalizer::new(canonical);
    for provider in providers {
        normalizer.push(provider)?;
    }
    Ok(normalizer.finish())
}
