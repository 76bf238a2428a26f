//! One generation attempt: prompt → generator → normalizer.
//!
//! The [`Generator`] trait is the seam between the form and whichever
//! backend produces completions. `hf-inference` provides the hosted
//! backend; [`CannedGenerator`] fabricates a response locally.

use crate::document::NormalizedDocument;
use crate::error::PrdError;
use crate::inputs::ProjectInputs;
use crate::normalize;
use crate::prompt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Sampling parameters sent alongside the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub temperature: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 1000,
            temperature: 0.7,
        }
    }
}

/// Wire body accepted by the text-generation service.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: GenerationParams,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("missing API token")]
    MissingToken,

    #[error("{0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// A backend that turns a prompt into a raw response body.
///
/// Implementations issue at most one request per call and never retry.
pub trait Generator {
    /// Whether an attempt must be refused when no token is configured.
    fn requires_token(&self) -> bool {
        true
    }

    fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
        token: &str,
    ) -> impl Future<Output = Result<Value, GenerationError>> + Send;
}

/// Offline generator that fabricates a response from the form inputs.
///
/// Mirrors the response envelope of the hosted service
/// (`[{"generated_text": …}]`) so output flows through the same normalizer.
#[derive(Debug, Clone, Default)]
pub struct CannedGenerator {
    inputs: ProjectInputs,
}

impl CannedGenerator {
    pub fn new(inputs: ProjectInputs) -> Self {
        Self { inputs }
    }

    pub fn render(inputs: &ProjectInputs) -> String {
        format!(
            "# {name} - Project Requirements Document\n\n\
             ## Description\n\
             {description}\n\n\
             ## Features\n\
             {features}\n",
            name = inputs.name,
            description = inputs.description,
            features = inputs.feature_bullets(),
        )
    }
}

impl Generator for CannedGenerator {
    fn requires_token(&self) -> bool {
        false
    }

    fn generate(
        &self,
        _prompt: &str,
        _params: GenerationParams,
        _token: &str,
    ) -> impl Future<Output = Result<Value, GenerationError>> + Send {
        let text = Self::render(&self.inputs);
        async move { Ok(serde_json::json!([{ "generated_text": text }])) }
    }
}

// ---------------------------------------------------------------------------
// Attempt
// ---------------------------------------------------------------------------

/// Run one generation attempt.
///
/// Fails only with [`PrdError::MissingToken`], before any request is made.
/// Generation failures are absorbed into the `# Error` document so the
/// caller always has something to display and download.
pub async fn run_attempt<G: Generator>(
    generator: &G,
    inputs: &ProjectInputs,
    params: GenerationParams,
    token: Option<&str>,
) -> Result<NormalizedDocument, PrdError> {
    let token = token.map(str::trim).filter(|t| !t.is_empty());
    let token = match token {
        Some(t) => t,
        None if generator.requires_token() => return Err(PrdError::MissingToken),
        None => "",
    };

    let prompt = prompt::build_prompt(inputs);
    tracing::info!(project = %inputs.name, prompt_len = prompt.len(), "starting generation attempt");

    match generator.generate(&prompt, params, token).await {
        Ok(body) => {
            let doc = normalize::normalize(Some(&body), inputs);
            tracing::info!(doc_len = doc.as_str().len(), "generation attempt finished");
            Ok(doc)
        }
        Err(e) => {
            tracing::warn!(error = %e, "generation failed");
            Ok(NormalizedDocument::error(e))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
