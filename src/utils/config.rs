use crate::types::{AppError, Result};
use std::env;

pub const PERSONAL_AI_API_KEY: &str = "PERSONAL_AI_API_KEY";
pub const HUGGINGFACEHUB_API_TOKEN: &str = "HUGGINGFACEHUB_API_TOKEN";

/// Secrets sourced from the environment once at startup
#[derive(Clone)]
pub struct Credentials {
    pub personal_ai_api_key: String,
    pub huggingface_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("personal_ai_api_key", &"<redacted>")
            .field(
                "huggingface_token",
                &self.huggingface_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub personal_ai_url: String,
    pub huggingface_api_base: String,
    pub ollama_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            personal_ai_url: "https://api.personal.ai".to_string(),
            huggingface_api_base: "https://api-inference.huggingface.co".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: EndpointConfig,
}

impl Config {
    /// Read credentials and endpoints from the process environment and `.env`
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = EndpointConfig::default();

        Ok(Config {
            credentials: Credentials {
                personal_ai_api_key: non_empty(PERSONAL_AI_API_KEY).ok_or_else(|| {
                    AppError::Configuration(format!(
                        "environment variable {} is not set",
                        PERSONAL_AI_API_KEY
                    ))
                })?,
                huggingface_token: non_empty(HUGGINGFACEHUB_API_TOKEN),
            },
            endpoints: EndpointConfig {
                personal_ai_url: non_empty("PERSONAL_AI_URL")
                    .unwrap_or(defaults.personal_ai_url),
                huggingface_api_base: non_empty("HUGGINGFACE_API_BASE")
                    .unwrap_or(defaults.huggingface_api_base),
                ollama_url: non_empty("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            },
        })
    }

    /// The Hugging Face token, required once a Hugging Face backend is configured
    pub fn huggingface_token(&self) -> Result<&str> {
        self.credentials.huggingface_token.as_deref().ok_or_else(|| {
            AppError::Configuration(format!(
                "environment variable {} is not set",
                HUGGINGFACEHUB_API_TOKEN
            ))
        })
    }
}
