use crate::llm::client::LLMClient;
use crate::types::{AppError, GenerationParams, Result};
use async_trait::async_trait;
use serde_json::{Value, json};

pub struct OllamaClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Result<Self> {
        Ok(Self {
            http_client: reqwest::Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": params.temperature,
                "num_predict": params.max_length,
            }
        });

        let response = self
            .http_client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Backend(format!(
                "Ollama request failed ({}): {}",
                status, text
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse response: {}", e)))?;

        response_json["response"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::Backend("No response field in Ollama reply".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
