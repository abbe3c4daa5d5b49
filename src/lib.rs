//! # chorus
//!
//! Ask many language models the same question and keep every answer as a
//! durable memory record.
//!
//! ## Overview
//!
//! chorus sends one prompt to an ordered list of model backends (Hugging Face
//! Inference API, Ollama, or the offline echo backend), collects each answer,
//! and submits the conversation to the Personal AI memory service:
//!
//! 1. **Dispatch** - query each backend in registry order with the same prompt
//! 2. **Aggregate** - keep every result, failures included, in that order
//! 3. **Serialize** - one JSON object per result, one per line
//! 4. **Persist** - score the exchange and store the JSON Lines record
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use chorus::{ChorusConfig, Config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let chorus = ChorusConfig::load_or_default("chorus.toml")?;
//!     let pipeline = Pipeline::from_config(&chorus, &config)?;
//!
//!     let report = pipeline.run("Why is the sky blue?").await?;
//!     for result in &report.record.results {
//!         println!("{}: {:?}", result.backend_name, result.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`llm`] - Backend clients and the ordered backend registry
//! - [`pipeline`] - Dispatcher, aggregator, serializer and the run entry point
//! - [`memory`] - Memory service sink
//! - [`types`] - Common types and error handling
//! - [`utils`] - Environment and TOML configuration

#![warn(rustdoc::missing_crate_level_docs)]

/// Command-line parsing and terminal output.
pub mod cli;
/// LLM backend clients and registry.
pub mod llm;
/// Long-term memory service sink.
pub mod memory;
/// Dispatch, aggregation and serialization pipeline.
pub mod pipeline;
/// Core types (results, records, errors).
pub mod types;
/// Configuration utilities (environment, TOML).
pub mod utils;

// Re-export commonly used types
pub use llm::{BackendRegistry, BackendSpec, LLMClient, PromptTemplate, Provider};
pub use memory::{MemorySink, PersonalAiClient};
pub use pipeline::{Dispatcher, Pipeline, PipelineReport};
pub use types::{AppError, ConversationRecord, MemoryLine, QueryResult, Result};
pub use utils::config::Config;
pub use utils::toml_config::ChorusConfig;
