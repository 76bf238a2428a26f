use std::future::Future;

use prd_core::generation::GenerationRequest;
use prd_core::{GenerationError, GenerationParams, Generator};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

use crate::{InferenceError, Result};

/// Longest slice of an error body carried into the error message.
const MAX_ERROR_BODY: usize = 500;

/// Client for a single hosted text-generation endpoint.
///
/// Every call issues exactly one request. There is no retry and no timeout
/// beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    endpoint: String,
}

impl InferenceClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Use a preconfigured HTTP client, e.g. one with a request timeout.
    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the prompt and return the decoded JSON body untouched.
    pub async fn post(&self, prompt: &str, params: GenerationParams, token: &str) -> Result<Value> {
        let token = token.trim();
        if token.is_empty() {
            return Err(InferenceError::MissingToken);
        }

        let body = GenerationRequest {
            inputs: prompt,
            parameters: params,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            max_length = params.max_length,
            temperature = params.temperature,
            "sending generation request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "generation endpoint returned an error");
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: truncate(text.trim(), MAX_ERROR_BODY),
            });
        }

        serde_json::from_str(&text).map_err(InferenceError::Decode)
    }
}

impl Generator for InferenceClient {
    fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
        token: &str,
    ) -> impl Future<Output = std::result::Result<Value, GenerationError>> + Send {
        async move {
            self.post(prompt, params, token)
                .await
                .map_err(GenerationError::from)
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use prd_core::{run_attempt, ProjectInputs};
    use serde_json::json;

    fn todo_inputs() -> ProjectInputs {
        ProjectInputs::from_form("Todo App", "A simple app", "Add tasks\nDelete tasks")
    }

    #[tokio::test]
    async fn posts_prompt_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/test")
            .match_header("authorization", "Bearer hf_test")
            .match_body(Matcher::PartialJson(json!({
                "inputs": "hello",
                "parameters": { "max_length": 1000 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r##"[{"generated_text":"# A"}]"##)
            .create_async()
            .await;

        let client = InferenceClient::new(format!("{}/models/test", server.url()));
        let body = client
            .post("hello", GenerationParams::default(), "hf_test")
            .await
            .unwrap();

        assert_eq!(body, json!([{ "generated_text": "# A" }]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_token_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = InferenceClient::new(server.url());
        let err = client
            .post("hello", GenerationParams::default(), "  ")
            .await
            .unwrap_err();

        assert!(matches!(err, InferenceError::MissingToken));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(503)
            .with_body("model is loading")
            .create_async()
            .await;

        let client = InferenceClient::new(server.url());
        let err = client
            .post("hello", GenerationParams::default(), "t")
            .await
            .unwrap_err();

        match err {
            InferenceError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model is loading");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = InferenceClient::new(server.url());
        let err = client
            .post("hello", GenerationParams::default(), "t")
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();
        let client = InferenceClient::with_client(http, "http://127.0.0.1:1/generate");
        assert_eq!(client.endpoint(), "http://127.0.0.1:1/generate");
        let err = client
            .generate("hello", GenerationParams::default(), "t")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[tokio::test]
    async fn attempt_normalizes_object_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r##"{"generated_text":"  # Todo App\nOutput only markdown"}"##)
            .create_async()
            .await;

        let client = InferenceClient::new(server.url());
        let doc = run_attempt(&client, &todo_inputs(), GenerationParams::default(), Some("t"))
            .await
            .unwrap();
        assert_eq!(doc.as_str(), "# Todo App");
    }

    #[tokio::test]
    async fn attempt_with_server_error_yields_error_document() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = InferenceClient::new(server.url());
        let doc = run_attempt(&client, &todo_inputs(), GenerationParams::default(), Some("t"))
            .await
            .unwrap();
        assert_eq!(doc.as_str(), "# Error\nFailed to generate: HTTP 500: boom");
    }

    #[tokio::test]
    async fn attempt_with_unrecognized_body_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = InferenceClient::new(server.url());
        let doc = run_attempt(&client, &todo_inputs(), GenerationParams::default(), Some("t"))
            .await
            .unwrap();
        assert_eq!(
            doc.as_str(),
            "# Todo App\n## Description\nA simple app\n## Features\n- Add tasks\n- Delete tasks"
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééé", 3), "é…");
    }
}
