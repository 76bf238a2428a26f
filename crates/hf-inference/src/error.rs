use prd_core::GenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("missing API token")]
    MissingToken,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl From<InferenceError> for GenerationError {
    fn from(e: InferenceError) -> Self {
        match e {
            InferenceError::MissingToken => GenerationError::MissingToken,
            InferenceError::Status { status, body } => GenerationError::Status { status, body },
            InferenceError::Decode(e) => GenerationError::Decode(e.to_string()),
            InferenceError::Http(e) => GenerationError::Transport(e.to_string()),
        }
    }
}
