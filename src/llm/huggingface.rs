use crate::llm::client::LLMClient;
use crate::types::{AppError, GenerationParams, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

/// Client for the Hugging Face hosted Inference API
pub struct HuggingFaceClient {
    http_client: reqwest::Client,
    api_token: String,
    endpoint: String,
    repo_id: String,
}

impl HuggingFaceClient {
    pub fn new(api_token: String, api_base: String, repo_id: String) -> Result<Self> {
        let endpoint = format!("{}/models/{}", api_base.trim_end_matches('/'), repo_id);
        Ok(Self {
            http_client: reqwest::Client::builder().build()?,
            api_token,
            endpoint,
            repo_id,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Extract the generated text from an Inference API response body.
///
/// Text-generation models echo the prompt ahead of the completion; the prefix
/// is dropped so only new text is returned.
fn parse_generated_text(body: &Value, prompt: &str) -> Result<String> {
    let entry = match body {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(body),
        _ => None,
    };

    let generated = entry
        .and_then(|e| e.get("generated_text"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::Backend(format!("Unexpected Hugging Face response: {}", body))
        })?;

    Ok(generated
        .strip_prefix(prompt)
        .unwrap_or(generated)
        .to_string())
}

#[async_trait]
impl LLMClient for HuggingFaceClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "temperature": params.temperature,
                "max_length": params.max_length,
            },
            "options": { "wait_for_model": true }
        });

        debug!(model = %self.repo_id, "Sending Hugging Face inference request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Backend(format!(
                "Hugging Face request failed ({}): {}",
                status, text
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse response: {}", e)))?;

        parse_generated_text(&response_json, prompt)
    }

    fn model_name(&self) -> &str {
        &self.repo_id
    }
}
