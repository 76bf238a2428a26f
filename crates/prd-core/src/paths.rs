use crate::error::{PrdError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Overrides the per-user state directory (default `~/.prdgen`).
pub const HOME_ENV: &str = "PRDGEN_HOME";

pub const STATE_DIR: &str = ".prdgen";
pub const CONFIG_FILE: &str = "config.yaml";
pub const CREDENTIALS_FILE: &str = "credentials.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Resolve the per-user state directory.
///
/// Priority:
/// 1. `explicit` (the `--home` flag)
/// 2. `PRDGEN_HOME`
/// 3. `~/.prdgen`
pub fn state_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    home::home_dir()
        .map(|h| h.join(STATE_DIR))
        .ok_or(PrdError::HomeNotFound)
}

pub fn config_path(state_dir: &Path) -> PathBuf {
    state_dir.join(CONFIG_FILE)
}

pub fn credentials_path(state_dir: &Path) -> PathBuf {
    state_dir.join(CREDENTIALS_FILE)
}
