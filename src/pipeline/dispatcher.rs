//! Query Dispatcher
//!
//! Sends the same prompt to every registered backend and captures each answer
//! or failure as a [`QueryResult`]. A failing or slow backend never aborts the
//! run; its result simply carries the error.

use crate::llm::registry::{BackendRegistry, RegisteredBackend};
use crate::types::{AppError, QueryResult};
use futures::future::join_all;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{info, warn};

/// Default upper bound for a single backend call
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Dispatch behaviour shared by every run.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// Upper bound for each backend call
    pub backend_timeout: Duration,

    /// Issue all calls at once. Results are still returned in registry order.
    pub concurrent: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
            concurrent: false,
        }
    }
}

impl Dispatcher {
    pub fn new(backend_timeout: Duration, concurrent: bool) -> Self {
        Self {
            backend_timeout,
            concurrent,
        }
    }

    /// Query every backend with `prompt`, one result per backend in registry order.
    pub async fn dispatch(&self, prompt: &str, registry: &BackendRegistry) -> Vec<QueryResult> {
        if self.concurrent {
            self.dispatch_concurrent(prompt, registry).await
        } else {
            self.dispatch_sequential(prompt, registry).await
        }
    }

    /// Query backends strictly one after another.
    ///
    /// Every backend receives the original prompt; earlier answers are never
    /// fed into later prompts.
    pub async fn dispatch_sequential(
        &self,
        prompt: &str,
        registry: &BackendRegistry,
    ) -> Vec<QueryResult> {
        let total = registry.len();
        let mut results = Vec::with_capacity(total);

        for (index, backend) in registry.iter().enumerate() {
            info!(
                backend = backend.spec.name(),
                position = index + 1,
                total,
                "Interacting with backend"
            );
            results.push(self.invoke(backend, prompt).await);
        }

        results
    }

    /// Query all backends concurrently; `join_all` keeps registry order.
    pub async fn dispatch_concurrent(
        &self,
        prompt: &str,
        registry: &BackendRegistry,
    ) -> Vec<QueryResult> {
        info!(total = registry.len(), "Interacting with all backends concurrently");
        join_all(registry.iter().map(|backend| self.invoke(backend, prompt))).await
    }

    async fn invoke(&self, backend: &RegisteredBackend, prompt: &str) -> QueryResult {
        let name = backend.spec.name();
        let rendered = backend.spec.render(prompt);
        let started = Instant::now();

        let outcome = timeout(
            self.backend_timeout,
            backend.client.generate(&rendered, backend.spec.params()),
        )
        .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(text)) => {
                info!(backend = name, elapsed_ms, chars = text.len(), "Backend responded");
                QueryResult::success(name, text)
            }
            Ok(Err(e)) => {
                warn!(backend = name, elapsed_ms, error = %e, "Backend failed");
                QueryResult::failure(name, e.to_string())
            }
            Err(_) => {
                let e = AppError::Timeout {
                    backend: name.to_string(),
                    limit: self.backend_timeout,
                };
                warn!(backend = name, elapsed_ms, error = %e, "Backend timed out");
                QueryResult::failure(name, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::LLMClient;
    use crate::llm::echo::EchoClient;
    use crate::llm::registry::{BackendSpec, PromptTemplate};
    use crate::types::{GenerationParams, Result};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records every prompt it receives and answers after an optional delay.
    struct RecordingClient {
        name: String,
        delay: Duration,
        fail: bool,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl LLMClient for RecordingClient {
        async fn generate(&self, prompt: &str, _params: &GenerationParams) -> Result<String> {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, prompt));
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(AppError::Backend("model unavailable".to_string()));
            }
            Ok(format!("{} says hello", self.name))
        }

        fn model_name(&self) -> &str {
            &self.name
        }
    }

    fn backend(name: &str, client: Box<dyn LLMClient>) -> RegisteredBackend {
        let spec = BackendSpec::new(
            name,
            PromptTemplate::new("User: {input}\nBot: ").unwrap(),
            GenerationParams::default(),
        )
        .unwrap();
        RegisteredBackend::new(spec, client)
    }

    fn recording(
        name: &str,
        delay_ms: u64,
        fail: bool,
        seen: &Arc<Mutex<Vec<String>>>,
    ) -> RegisteredBackend {
        backend(
            name,
            Box::new(RecordingClient {
                name: name.to_string(),
                delay: Duration::from_millis(delay_ms),
                fail,
                seen: Arc::clone(seen),
            }),
        )
    }

    #[tokio::test]
    async fn test_echo_scenario() {
        let registry =
            BackendRegistry::new(vec![backend("echo", Box::new(EchoClient::new("echo".into())))])
                .unwrap();

        let results = Dispatcher::default().dispatch("hi", &registry).await;

        assert_eq!(results, vec![QueryResult::success("echo", "User: hi\nBot: ")]);
    }

    #[tokio::test]
    async fn test_sequential_order_and_same_prompt() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = BackendRegistry::new(vec![
            recording("b", 0, false, &seen),
            recording("a", 0, false, &seen),
            recording("c", 0, false, &seen),
        ])
        .unwrap();

        let results = Dispatcher::default().dispatch("question", &registry).await;

        let names: Vec<&str> = results.iter().map(|r| r.backend_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                "b:User: question\nBot: ",
                "a:User: question\nBot: ",
                "c:User: question\nBot: ",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_isolation() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = BackendRegistry::new(vec![
            recording("first", 0, false, &seen),
            recording("broken", 0, true, &seen),
            recording("last", 0, false, &seen),
        ])
        .unwrap();

        let results = Dispatcher::default().dispatch("q", &registry).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
        assert!(results[1].text.is_none());
        assert!(results[1].error.as_ref().unwrap().contains("model unavailable"));
        assert!(results[2].is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_recorded() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = BackendRegistry::new(vec![
            recording("fast", 0, false, &seen),
            recording("slow", 60_000, false, &seen),
        ])
        .unwrap();

        let dispatcher = Dispatcher::new(Duration::from_secs(5), false);
        let results = dispatcher.dispatch("q", &registry).await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_success());
        let error = results[1].error.as_deref().unwrap();
        assert!(error.contains("timed out after 5s"));
        assert!(results[1].text.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_restores_registry_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let registry = BackendRegistry::new(vec![
            recording("slowest", 300, false, &seen),
            recording("middle", 200, false, &seen),
            recording("fastest", 100, false, &seen),
        ])
        .unwrap();

        let dispatcher = Dispatcher::new(Duration::from_secs(5), true);
        let results = dispatcher.dispatch("q", &registry).await;

        let names: Vec<&str> = results.iter().map(|r| r.backend_name.as_str()).collect();
        assert_eq!(names, vec!["slowest", "middle", "fastest"]);
        assert!(results.iter().all(QueryResult::is_success));
    }
}
