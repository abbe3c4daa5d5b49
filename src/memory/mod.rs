//! Memory Sink
//!
//! Two independent calls to the long-term memory service:
//! - [`MemorySink::send_message`] submits the prompt and every backend answer
//!   to the real-time scoring endpoint.
//! - [`MemorySink::store_memory`] submits the JSON Lines record to the durable
//!   memory endpoint.
//!
//! Neither outcome feeds back into dispatch. A non-2xx reply is returned as
//! [`AppError::RemoteService`](crate::types::AppError::RemoteService) with the
//! raw response body.

pub mod personal_ai;

use crate::types::{MemoryAck, MessageReply, QueryResult, Result};
use async_trait::async_trait;

pub use personal_ai::PersonalAiClient;

/// Destination for finished conversation records
#[async_trait]
pub trait MemorySink: Send + Sync {
    /// Submit the prompt with all results for real-time scoring
    async fn send_message(&self, prompt: &str, results: &[QueryResult]) -> Result<MessageReply>;

    /// Persist a JSON Lines memory record with its metadata
    async fn store_memory(
        &self,
        text: &str,
        source_name: &str,
        created_time: &str,
        device_name: &str,
    ) -> Result<MemoryAck>;
}
