//! Mock implementations for testing.
//!
//! This module provides mock LLM clients and registry helpers that can be used
//! across different test files without duplication.

use chorus::llm::registry::{BackendRegistry, BackendSpec, PromptTemplate, RegisteredBackend};
use chorus::llm::LLMClient;
use chorus::types::{AppError, GenerationParams, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Template used by every mock backend
pub const TEMPLATE: &str = "User: {input}\nBot: ";

/// Mock LLM client for testing with configurable responses.
///
/// This client can be configured to return a specific response, to answer
/// only after a delay, or to simulate failures. Every rendered prompt it
/// receives is recorded.
///
/// # Examples
///
/// ```ignore
/// // Create a client that returns a simple response
/// let client = MockLLMClient::new("Hello, world!");
///
/// // Create a client that answers after five seconds
/// let client = MockLLMClient::slow("late", Duration::from_secs(5));
///
/// // Create a client that always fails
/// let client = MockLLMClient::failing();
/// ```
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    delay: Duration,
    should_fail: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            delay: Duration::ZERO,
            should_fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock client that answers only after `delay`.
    pub fn slow(response: &str, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(response)
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// Prompts received so far, shared with every clone of this client.
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str, _params: &GenerationParams) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.should_fail {
            return Err(AppError::Backend("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Build a registry from `(name, client)` pairs, in the given order.
pub fn registry_of(backends: Vec<(&str, MockLLMClient)>) -> BackendRegistry {
    let entries = backends
        .into_iter()
        .map(|(name, client)| {
            let spec = BackendSpec::new(
                name,
                PromptTemplate::new(TEMPLATE).unwrap(),
                GenerationParams::default(),
            )
            .unwrap();
            RegisteredBackend::new(spec, Box::new(client) as Box<dyn LLMClient>)
        })
        .collect();
    BackendRegistry::new(entries).unwrap()
}
