//! `hf-inference` — client for a hosted text-generation endpoint.
//!
//! # Architecture
//!
//! ```text
//! prompt + GenerationParams + bearer token
//!     │
//!     ▼
//! InferenceClient  ← one POST { inputs, parameters }, no retry
//!     │
//!     ▼
//! serde_json::Value (raw body, untouched)
//!     │
//!     ▼
//! prd_core::normalize
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use hf_inference::InferenceClient;
//! use prd_core::{run_attempt, GenerationParams, ProjectInputs};
//!
//! let client = InferenceClient::new("https://api-inference.huggingface.co/models/gpt2");
//! let inputs = ProjectInputs::from_form("Todo App", "A simple app", "Add tasks");
//! let doc = run_attempt(&client, &inputs, GenerationParams::default(), Some("hf_…")).await?;
//! println!("{doc}");
//! ```

pub mod client;
pub mod error;

pub use client::InferenceClient;
pub use error::InferenceError;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, InferenceError>;
