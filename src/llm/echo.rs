use crate::llm::client::LLMClient;
use crate::types::{GenerationParams, Result};
use async_trait::async_trait;

/// Deterministic backend that answers with the rendered prompt.
///
/// Useful for dry runs of the memory pipeline without any inference service.
pub struct EchoClient {
    name: String,
}

impl EchoClient {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

#[async_trait]
impl LLMClient for EchoClient {
    async fn generate(&self, prompt: &str, _params: &GenerationParams) -> Result<String> {
        Ok(prompt.to_string())
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}
