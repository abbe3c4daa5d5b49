//! LLM Client abstractions and provider management
//!
//! Every backend the pipeline can query implements [`LLMClient`]:
//! - **Hugging Face**: hosted Inference API, one model repository per backend
//! - **Ollama**: local inference server
//! - **Echo**: deterministic offline backend that returns its input

use crate::types::{GenerationParams, Result};
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction
///
/// A client is bound to a single model. The pipeline renders the prompt and
/// passes the backend's fixed generation parameters on every call.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion for an already rendered prompt
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// Hugging Face Inference API
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::HuggingFace {
    ///     api_token: "hf_...".to_string(),
    ///     api_base: "https://api-inference.huggingface.co".to_string(),
    ///     repo_id: "gpt2".to_string(),
    /// };
    /// ```
    HuggingFace {
        api_token: String,
        api_base: String,
        repo_id: String,
    },

    /// Ollama local LLM provider
    Ollama { base_url: String, model: String },

    /// Returns the rendered prompt unchanged
    Echo { name: String },
}

impl Provider {
    /// Create a client instance for this provider
    pub fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            Provider::HuggingFace {
                api_token,
                api_base,
                repo_id,
            } => Ok(Box::new(super::huggingface::HuggingFaceClient::new(
                api_token.clone(),
                api_base.clone(),
                repo_id.clone(),
            )?)),

            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone())?,
            )),

            Provider::Echo { name } => Ok(Box::new(super::echo::EchoClient::new(name.clone()))),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::HuggingFace { .. } => "HuggingFace",
            Provider::Ollama { .. } => "Ollama",
            Provider::Echo { .. } => "Echo",
        }
    }
}
