//! Backend Registry
//!
//! Holds the ordered, read-only list of backends the pipeline queries. Each
//! entry pairs a validated [`BackendSpec`] with the client that serves it.
//! The registry is built once at startup and never mutated afterwards.

use crate::llm::client::{LLMClient, Provider};
use crate::types::{AppError, GenerationParams, Result};
use crate::utils::config::Config;
use crate::utils::toml_config::{BackendConfig, ChorusConfig, ProviderKind};
use std::collections::HashSet;
use tracing::info;

/// Substitution point for the user's input inside a prompt template
pub const PLACEHOLDER: &str = "{input}";

/// A prompt template containing exactly one [`PLACEHOLDER`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let count = template.matches(PLACEHOLDER).count();
        if count != 1 {
            return Err(AppError::Configuration(format!(
                "template must contain exactly one {} placeholder, found {}: {:?}",
                PLACEHOLDER, count, template
            )));
        }
        Ok(Self { template })
    }

    pub fn render(&self, input: &str) -> String {
        self.template.replacen(PLACEHOLDER, input, 1)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

/// Static description of one backend
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSpec {
    name: String,
    template: PromptTemplate,
    params: GenerationParams,
}

impl BackendSpec {
    pub fn new(
        name: impl Into<String>,
        template: PromptTemplate,
        params: GenerationParams,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::Configuration(
                "backend name must not be empty".to_string(),
            ));
        }
        params.validate()?;
        Ok(Self {
            name,
            template,
            params,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn render(&self, input: &str) -> String {
        self.template.render(input)
    }
}

/// A backend spec together with the client that answers for it
pub struct RegisteredBackend {
    pub spec: BackendSpec,
    pub client: Box<dyn LLMClient>,
}

impl RegisteredBackend {
    pub fn new(spec: BackendSpec, client: Box<dyn LLMClient>) -> Self {
        Self { spec, client }
    }
}

impl std::fmt::Debug for RegisteredBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredBackend")
            .field("spec", &self.spec)
            .field("model", &self.client.model_name())
            .finish()
    }
}

/// Ordered registry of backends
#[derive(Debug)]
pub struct BackendRegistry {
    backends: Vec<RegisteredBackend>,
}

impl BackendRegistry {
    /// Build a registry, rejecting an empty list and duplicate names
    pub fn new(backends: Vec<RegisteredBackend>) -> Result<Self> {
        if backends.is_empty() {
            return Err(AppError::Configuration(
                "at least one backend must be registered".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for backend in &backends {
            if !seen.insert(backend.spec.name()) {
                return Err(AppError::Configuration(format!(
                    "backend '{}' is registered more than once",
                    backend.spec.name()
                )));
            }
        }

        Ok(Self { backends })
    }

    /// Create the registry described by the configuration file
    pub fn from_config(chorus: &ChorusConfig, config: &Config) -> Result<Self> {
        let backends = chorus
            .backends
            .iter()
            .map(|backend| -> Result<RegisteredBackend> {
                let spec = BackendSpec::new(
                    backend.name.clone(),
                    PromptTemplate::new(backend.template.clone())?,
                    GenerationParams {
                        temperature: backend.temperature,
                        max_length: backend.max_length,
                    },
                )?;
                let client = provider_for(backend, config)?.create_client()?;
                Ok(RegisteredBackend::new(spec, client))
            })
            .collect::<Result<Vec<_>>>()?;

        let registry = Self::new(backends)?;
        info!(backends = registry.len(), "Backend registry initialised");
        Ok(registry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredBackend> {
        self.backends.iter()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Backend names in registry order
    pub fn names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.spec.name()).collect()
    }
}

fn provider_for(backend: &BackendConfig, config: &Config) -> Result<Provider> {
    Ok(match backend.provider {
        ProviderKind::HuggingFace => Provider::HuggingFace {
            api_token: config.huggingface_token()?.to_string(),
            api_base: config.endpoints.huggingface_api_base.clone(),
            repo_id: backend.model_id().to_string(),
        },
        ProviderKind::Ollama => Provider::Ollama {
            base_url: config.endpoints.ollama_url.clone(),
            model: backend.model_id().to_string(),
        },
        ProviderKind::Echo => Provider::Echo {
            name: backend.model_id().to_string(),
        },
    })
}
