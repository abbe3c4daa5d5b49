//! TOML-based configuration for chorus
//!
//! Declares the ordered backend list and pipeline settings via a TOML file
//! (`chorus.toml`). When no file is present the built-in defaults are used,
//! which query the classic Hugging Face model list with a fixed chat template.
//!
//! Backends are an array of tables so their order is preserved:
//!
//! ```toml
//! [pipeline]
//! backend_timeout_secs = 30
//!
//! [[backends]]
//! name = "gpt2"
//! provider = "huggingface"
//! template = "User: {input}\nBot: "
//! temperature = 0.0
//! max_length = 64
//! ```

use crate::llm::registry::PLACEHOLDER;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root configuration structure loaded from chorus.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChorusConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub memory: MemoryConfig,

    /// Backends in the order they are queried
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendConfig>,
}

impl Default for ChorusConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            memory: MemoryConfig::default(),
            backends: default_backends(),
        }
    }
}

// ============= Pipeline Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Upper bound for a single backend call
    #[serde(default = "default_timeout_secs")]
    pub backend_timeout_secs: u64,

    /// Query all backends at once instead of one after another
    #[serde(default)]
    pub concurrent: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            backend_timeout_secs: default_timeout_secs(),
            concurrent: false,
        }
    }
}

// ============= Memory Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_source_name")]
    pub source_name: String,

    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Upper bound for each call to the memory service
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_source_name() -> String {
    "Conversation History".to_string()
}

fn default_device_name() -> String {
    "Laptop".to_string()
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            source_name: default_source_name(),
            device_name: default_device_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============= Backend Configuration =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    HuggingFace,
    Ollama,
    Echo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Unique name, reported as `model_name` in the memory record
    pub name: String,

    #[serde(default)]
    pub provider: ProviderKind,

    /// Provider-side model identifier; defaults to `name`
    pub model: Option<String>,

    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "default_max_length")]
    pub max_length: u32,
}

impl BackendConfig {
    pub fn huggingface(name: &str) -> Self {
        Self {
            name: name.to_string(),
            provider: ProviderKind::HuggingFace,
            model: None,
            template: default_template(),
            temperature: 0.0,
            max_length: default_max_length(),
        }
    }

    /// Model identifier sent to the provider
    pub fn model_id(&self) -> &str {
        self.model.as_deref().unwrap_or(&self.name)
    }
}

fn default_template() -> String {
    format!("User: {PLACEHOLDER}\nBot: ")
}

fn default_max_length() -> u32 {
    64
}

/// Model list queried when no configuration file overrides it
pub const DEFAULT_MODELS: &[&str] = &[
    "gpt2",
    "gpt2-medium",
    "gpt2-large",
    "gpt2-xl",
    "gpt3.5-turbo",
    "bert-base-uncased",
    "bert-large-uncased",
    "roberta-base",
    "roberta-large",
    "distilbert-base-uncased",
    "distilbert-base-uncased-distilled-squad",
    "gpt-neo-125M",
    "gpt-neo-1.3B",
    "gpt-neo-2.7B",
    "mosaicml/mpt-7b-storywriter",
    "mosaicml/mpt-7b-chat",
    "mosaicml/mpt-7b-instruct",
    "mosaicml/mpt-7b",
];

fn default_backends() -> Vec<BackendConfig> {
    DEFAULT_MODELS
        .iter()
        .map(|name| BackendConfig::huggingface(name))
        .collect()
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Backend '{0}' is defined more than once")]
    DuplicateBackend(String),
}

impl ChorusConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), backends = config.backends.len(), "Loaded configuration");
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to the built-in defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound(path)) => {
                debug!(path = %path.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ChorusConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the backend list and pipeline settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backends.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one backend must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for backend in &self.backends {
            if backend.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "backend name must not be empty".to_string(),
                ));
            }
            if !seen.insert(backend.name.as_str()) {
                return Err(ConfigError::DuplicateBackend(backend.name.clone()));
            }

            let placeholders = backend.template.matches(PLACEHOLDER).count();
            if placeholders != 1 {
                return Err(ConfigError::ValidationError(format!(
                    "template of backend '{}' must contain exactly one {} placeholder, found {}",
                    backend.name, PLACEHOLDER, placeholders
                )));
            }

            if !backend.temperature.is_finite() || backend.temperature < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "temperature of backend '{}' must be >= 0",
                    backend.name
                )));
            }
            if backend.max_length == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "max_length of backend '{}' must be positive",
                    backend.name
                )));
            }
        }

        if self.pipeline.backend_timeout_secs == 0 || self.memory.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeouts must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether any backend needs a Hugging Face API token
    pub fn uses_huggingface(&self) -> bool {
        self.backends
            .iter()
            .any(|b| b.provider == ProviderKind::HuggingFace)
    }
}
