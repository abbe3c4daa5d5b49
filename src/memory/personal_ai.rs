use crate::memory::MemorySink;
use crate::pipeline::serializer::message_context;
use crate::types::{AppError, MemoryAck, MessageReply, QueryResult, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default upper bound for each call to the memory service
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MessagePayload<'a> {
    text: &'a str,
    context: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MemoryPayload<'a> {
    text: &'a str,
    source_name: &'a str,
    created_time: &'a str,
    device_name: &'a str,
}

/// HTTP client for the Personal AI message and memory endpoints
pub struct PersonalAiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PersonalAiClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/v1/{}", self.base_url, endpoint)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .post(self.url(endpoint))
            .header("x-api-key", &self.api_key)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(endpoint, status, "Memory service rejected request");
            return Err(AppError::RemoteService { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl MemorySink for PersonalAiClient {
    async fn send_message(&self, prompt: &str, results: &[QueryResult]) -> Result<MessageReply> {
        let payload = MessagePayload {
            text: prompt,
            context: message_context(results)?,
        };
        debug!(context_bytes = payload.context.len(), "Sending message");

        let reply: MessageReply = self.post("message", &payload).await?.json().await?;
        info!(score = ?reply.ai_score, "Message accepted");
        Ok(reply)
    }

    async fn store_memory(
        &self,
        text: &str,
        source_name: &str,
        created_time: &str,
        device_name: &str,
    ) -> Result<MemoryAck> {
        let payload = MemoryPayload {
            text,
            source_name,
            created_time,
            device_name,
        };
        debug!(text_bytes = text.len(), source_name, device_name, "Creating memory");

        let ack: MemoryAck = self.post("memory", &payload).await?.json().await?;
        info!("Memory created");
        Ok(ack)
    }
}
