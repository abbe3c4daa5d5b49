//! Backend client tests against a mocked HTTP server

use chorus::llm::LLMClient;
use chorus::llm::huggingface::HuggingFaceClient;
use chorus::llm::ollama::OllamaClient;
use chorus::types::{AppError, GenerationParams};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO_ID: &str = "databricks/dolly-v2-3b";

fn hf_client(server: &MockServer) -> HuggingFaceClient {
    HuggingFaceClient::new("hf_test".to_string(), server.uri(), REPO_ID.to_string()).unwrap()
}

#[tokio::test]
async fn test_huggingface_sends_token_and_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}", REPO_ID)))
        .and(header("authorization", "Bearer hf_test"))
        .and(body_partial_json(json!({
            "inputs": "User: hi\nBot: ",
            "parameters": { "temperature": 0.0, "max_length": 64 },
            "options": { "wait_for_model": true }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "generated_text": "User: hi\nBot: Hello!" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = hf_client(&server)
        .generate("User: hi\nBot: ", &GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(text, "Hello!");
}

#[tokio::test]
async fn test_huggingface_loading_model_is_a_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}", REPO_ID)))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "Model databricks/dolly-v2-3b is currently loading",
            "estimated_time": 20.0
        })))
        .mount(&server)
        .await;

    let err = hf_client(&server)
        .generate("User: hi\nBot: ", &GenerationParams::default())
        .await
        .unwrap_err();

    match err {
        AppError::Backend(msg) => {
            assert!(msg.contains("503"));
            assert!(msg.contains("currently loading"));
        }
        other => panic!("Expected Backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_huggingface_unexpected_body_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "label": "POSITIVE" })))
        .mount(&server)
        .await;

    let result = hf_client(&server)
        .generate("prompt", &GenerationParams::default())
        .await;

    assert!(matches!(result, Err(AppError::Backend(_))));
}

#[tokio::test]
async fn test_ollama_generate_is_non_streaming() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3.2",
            "prompt": "User: hi\nBot: ",
            "stream": false,
            "options": { "num_predict": 32 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2",
            "response": "Hi, how can I help?",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri(), "llama3.2".to_string()).unwrap();
    let params = GenerationParams {
        temperature: 0.0,
        max_length: 32,
    };
    let text = client.generate("User: hi\nBot: ", &params).await.unwrap();

    assert_eq!(text, "Hi, how can I help?");
    assert_eq!(client.model_name(), "llama3.2");
}

#[tokio::test]
async fn test_ollama_missing_model_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "model 'nope' not found" })),
        )
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri(), "nope".to_string()).unwrap();
    let err = client
        .generate("hi", &GenerationParams::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("404"));
}
