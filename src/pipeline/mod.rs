//! Multi-backend query pipeline
//!
//! Dispatcher → Aggregator → Serializer → Memory Sink. One [`Pipeline::run`]
//! handles a single prompt end to end and returns a [`PipelineReport`]
//! describing every backend result and both memory service outcomes.
//!
//! ```rust,ignore
//! use chorus::{ChorusConfig, Config, Pipeline};
//!
//! let config = Config::from_env()?;
//! let pipeline = Pipeline::from_config(&ChorusConfig::default(), &config)?;
//! let report = pipeline.run("What is the capital of France?").await?;
//! println!("{}", report.jsonl);
//! ```

pub mod aggregator;
pub mod dispatcher;
pub mod serializer;

use crate::llm::registry::BackendRegistry;
use crate::memory::{MemorySink, PersonalAiClient};
use crate::types::{AppError, ConversationRecord, MemoryAck, MemoryLine, MessageReply, Result};
use crate::utils::config::Config;
use crate::utils::toml_config::{ChorusConfig, MemoryConfig};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

pub use aggregator::aggregate;
pub use dispatcher::Dispatcher;
pub use serializer::{decode_line, encode_line, serialize, to_jsonl};

/// `CreatedTime` format expected by the memory endpoint
pub const CREATED_TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// Time source for memory record timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Everything one run produced
#[derive(Debug)]
pub struct PipelineReport {
    pub record: ConversationRecord,
    pub lines: Vec<MemoryLine>,
    /// The memory record exactly as submitted
    pub jsonl: String,
    pub created_time: String,
    pub message: Result<MessageReply>,
    pub memory: Result<MemoryAck>,
}

impl PipelineReport {
    pub fn backend_failures(&self) -> usize {
        self.record.failed_backends().count()
    }

    /// True when every backend answered and both memory calls succeeded
    pub fn is_complete(&self) -> bool {
        self.backend_failures() == 0 && self.message.is_ok() && self.memory.is_ok()
    }
}

pub struct Pipeline {
    registry: BackendRegistry,
    sink: Box<dyn MemorySink>,
    dispatcher: Dispatcher,
    memory: MemoryConfig,
    clock: Box<dyn Clock>,
}

impl Pipeline {
    pub fn new(registry: BackendRegistry, sink: Box<dyn MemorySink>) -> Self {
        Self {
            registry,
            sink,
            dispatcher: Dispatcher::default(),
            memory: MemoryConfig::default(),
            clock: Box::new(SystemClock),
        }
    }

    /// Wire the registry, memory client and settings from configuration
    pub fn from_config(chorus: &ChorusConfig, config: &Config) -> Result<Self> {
        let registry = BackendRegistry::from_config(chorus, config)?;
        let sink = PersonalAiClient::new(
            config.endpoints.personal_ai_url.clone(),
            config.credentials.personal_ai_api_key.clone(),
            Duration::from_secs(chorus.memory.timeout_secs),
        )?;

        Ok(Self::new(registry, Box::new(sink))
            .with_dispatcher(Dispatcher::new(
                Duration::from_secs(chorus.pipeline.backend_timeout_secs),
                chorus.pipeline.concurrent,
            ))
            .with_memory_config(chorus.memory.clone()))
    }

    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_memory_config(mut self, memory: MemoryConfig) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Query every backend with `prompt` and persist the conversation.
    ///
    /// Only an empty prompt or a serialization failure is returned as `Err`.
    /// Backend and memory service failures are recorded in the report.
    pub async fn run(&self, prompt: &str) -> Result<PipelineReport> {
        if prompt.trim().is_empty() {
            return Err(AppError::InvalidInput("prompt must not be empty".to_string()));
        }

        let span = info_span!("pipeline", run_id = %Uuid::new_v4());
        self.run_inner(prompt).instrument(span).await
    }

    async fn run_inner(&self, prompt: &str) -> Result<PipelineReport> {
        let results = self.dispatcher.dispatch(prompt, &self.registry).await;
        let record = aggregate(prompt, results);
        let lines = serialize(&record);
        let jsonl = to_jsonl(&lines)?;

        info!(
            backends = record.results.len(),
            failures = record.failed_backends().count(),
            "Sending user question and responses to message endpoint"
        );
        let message = self.sink.send_message(&record.prompt, &record.results).await;
        if let Err(e) = &message {
            warn!(error = %e, "Failed to send message");
        }

        let created_time = self.clock.now().format(CREATED_TIME_FORMAT).to_string();
        info!(lines = lines.len(), "Creating memory with conversation history and responses");
        let memory = self
            .sink
            .store_memory(
                &jsonl,
                &self.memory.source_name,
                &created_time,
                &self.memory.device_name,
            )
            .await;
        if let Err(e) = &memory {
            warn!(error = %e, "Failed to create memory");
        }

        Ok(PipelineReport {
            record,
            lines,
            jsonl,
            created_time,
            message,
            memory,
        })
    }
}
