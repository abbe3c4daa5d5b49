//! LLM Backend Clients and Registry
//!
//! This module provides a unified interface over the model backends the
//! pipeline queries. Provider-specific HTTP details stay behind the
//! [`LLMClient`] trait so the dispatcher works with any of them.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all providers implement
//! - [`Provider`] - Runtime provider selection and client construction
//! - [`BackendRegistry`] - Ordered, validated list of backends
//!
//! # Supported Providers
//!
//! - `huggingface` - Hugging Face hosted Inference API (default)
//! - `ollama` - Local Ollama server
//! - `echo` - Deterministic offline backend

/// Core LLM client trait and provider selection.
pub mod client;
/// Offline backend returning its input.
pub mod echo;
/// Hugging Face Inference API client.
pub mod huggingface;
/// Ollama generate API client.
pub mod ollama;
/// Ordered backend registry.
pub mod registry;

pub use client::{LLMClient, Provider};
pub use registry::{BackendRegistry, BackendSpec, PromptTemplate, RegisteredBackend};
