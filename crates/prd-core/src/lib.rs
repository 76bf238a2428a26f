pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod generation;
pub mod inputs;
pub mod io;
pub mod normalize;
pub mod paths;
pub mod prompt;
pub mod token;

pub use document::{DocumentState, Editor, NormalizedDocument};
pub use error::{PrdError, Result};
pub use generation::{run_attempt, CannedGenerator, GenerationError, GenerationParams, Generator};
pub use inputs::ProjectInputs;
