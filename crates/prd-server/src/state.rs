use hf_inference::InferenceClient;
use prd_core::config::Config;
use prd_core::token::TokenStore;
use prd_core::DocumentState;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub state_dir: PathBuf,
    pub config: Arc<Config>,
    /// Use the canned generator instead of the hosted endpoint.
    pub offline: bool,
    pub client: InferenceClient,
    pub tokens: TokenStore,
    pub token: Arc<RwLock<Option<String>>>,
    pub document: Arc<RwLock<DocumentState>>,
    in_flight: Arc<AtomicUsize>,
}

impl AppState {
    /// Build state for `state_dir`, reading the stored token once.
    pub fn new(state_dir: PathBuf, config: Config, offline: bool) -> prd_core::Result<Self> {
        let tokens = TokenStore::new(&state_dir);
        let token = tokens.load()?;
        let client = InferenceClient::new(config.endpoint.clone());
        Ok(Self {
            state_dir,
            config: Arc::new(config),
            offline,
            client,
            tokens,
            token: Arc::new(RwLock::new(token)),
            document: Arc::new(RwLock::new(DocumentState::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Mark an attempt as running until the returned guard drops.
    ///
    /// Advisory only: the UI disables its trigger while `is_generating`, but
    /// concurrent attempts are not rejected.
    pub fn begin_attempt(&self) -> AttemptGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        AttemptGuard {
            in_flight: self.in_flight.clone(),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

pub struct AttemptGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for AttemptGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
