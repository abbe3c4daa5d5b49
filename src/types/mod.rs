use serde::{Deserialize, Serialize};

// ============= Generation Types =============

/// Fixed sampling parameters sent with every call to a backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_length: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_length: 64,
        }
    }
}

impl GenerationParams {
    pub fn validate(&self) -> Result<()> {
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(AppError::Configuration(format!(
                "temperature must be a finite number >= 0, got {}",
                self.temperature
            )));
        }
        if self.max_length == 0 {
            return Err(AppError::Configuration(
                "max_length must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

// ============= Pipeline Types =============

/// Outcome of invoking one backend.
///
/// Exactly one of `text` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub backend_name: String,
    pub text: Option<String>,
    pub error: Option<String>,
}

impl QueryResult {
    pub fn success(backend_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            backend_name: backend_name.into(),
            text: Some(text.into()),
            error: None,
        }
    }

    pub fn failure(backend_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            backend_name: backend_name.into(),
            text: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// The prompt and every backend's answer, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub prompt: String,
    pub results: Vec<QueryResult>,
}

impl ConversationRecord {
    pub fn failed_backends(&self) -> impl Iterator<Item = &QueryResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

/// One JSON Lines entry of a memory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryLine {
    pub user_question: String,
    pub model_name: String,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============= Memory Service Types =============

/// Reply from the real-time message endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub ai_message: Option<String>,
    #[serde(default)]
    pub ai_score: Option<f64>,
}

/// Acknowledgment returned by the memory endpoint; its shape is not documented.
pub type MemoryAck = serde_json::Value;

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Backend '{backend}' timed out after {limit:?}")]
    Timeout { backend: String, limit: std::time::Duration },

    #[error("Remote service returned {status}: {body}")]
    RemoteService { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<crate::utils::toml_config::ConfigError> for AppError {
    fn from(err: crate::utils::toml_config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_params_validation() {
        assert!(GenerationParams::default().validate().is_ok());

        let negative = GenerationParams {
            temperature: -0.1,
            max_length: 64,
        };
        assert!(matches!(
            negative.validate(),
            Err(AppError::Configuration(_))
        ));

        let nan = GenerationParams {
            temperature: f32::NAN,
            max_length: 64,
        };
        assert!(nan.validate().is_err());

        let zero_length = GenerationParams {
            temperature: 0.5,
            max_length: 0,
        };
        assert!(zero_length.validate().is_err());
    }

    #[test]
    fn test_query_result_constructors() {
        let ok = QueryResult::success("gpt2", "hello");
        assert!(ok.is_success());
        assert_eq!(ok.text.as_deref(), Some("hello"));

        let failed = QueryResult::failure("gpt2", "boom");
        assert!(!failed.is_success());
        assert!(failed.text.is_none());
    }

    #[test]
    fn test_memory_line_omits_absent_error() {
        let line = MemoryLine {
            user_question: "hi".to_string(),
            model_name: "echo".to_string(),
            response: "there".to_string(),
            error: None,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(
            json,
            r#"{"user_question":"hi","model_name":"echo","response":"there"}"#
        );
    }

    #[test]
    fn test_message_reply_tolerates_missing_fields() {
        let reply: MessageReply = serde_json::from_str(r#"{"ai_message":"ok"}"#).unwrap();
        assert_eq!(reply.ai_message.as_deref(), Some("ok"));
        assert!(reply.ai_score.is_none());
    }
}
