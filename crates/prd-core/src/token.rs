//! API token persistence.
//!
//! Layout:
//!   <state dir>/credentials.yaml   — key/value map, token under `hf_api_token`
//!
//! Values are stored in plain text with no expiry. The file is read once at
//! startup and written only on an explicit save.

use crate::error::Result;
use crate::{io, paths};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fixed key the API token lives under.
pub const TOKEN_KEY: &str = "hf_api_token";

type Credentials = BTreeMap<String, String>;

/// Key/value store backed by a single YAML file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store rooted at `state_dir`. Nothing is touched on disk until
    /// the first `save`.
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: paths::credentials_path(state_dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. Blank values count as absent.
    pub fn load(&self) -> Result<Option<String>> {
        Ok(self
            .read()?
            .remove(TOKEN_KEY)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        let mut creds = self.read()?;
        creds.insert(TOKEN_KEY.to_string(), token.trim().to_string());
        self.write(&creds)
    }

    /// Remove the token. Returns `true` if one was stored.
    pub fn clear(&self) -> Result<bool> {
        let mut creds = self.read()?;
        if creds.remove(TOKEN_KEY).is_none() {
            return Ok(false);
        }
        if creds.is_empty() {
            io::remove_if_exists(&self.path)?;
        } else {
            self.write(&creds)?;
        }
        Ok(true)
    }

    fn read(&self) -> Result<Credentials> {
        if !self.path.exists() {
            return Ok(Credentials::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Credentials::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn write(&self, creds: &Credentials) -> Result<()> {
        let data = serde_yaml::to_string(creds)?;
        io::atomic_write(&self.path, data.as_bytes())
    }
}

/// Mask a token for display, keeping only the last four characters.
pub fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TokenStore, TempDir) {
        let dir = TempDir::new().unwrap();
        (TokenStore::new(dir.path()), dir)
    }

    #[test]
    fn load_returns_none_when_no_file() {
        let (store, _dir) = store();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _dir) = store();
        store.save("hf_abc123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("hf_abc123"));
    }

    #[test]
    fn save_trims_whitespace() {
        let (store, _dir) = store();
        store.save("  hf_abc123\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("hf_abc123"));
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let (store, _dir) = store();
        store.save("   ").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_overwrites_previous_token() {
        let (store, _dir) = store();
        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn clear_removes_file() {
        let (store, _dir) = store();
        store.save("hf_abc123").unwrap();
        assert!(store.clear().unwrap());
        assert!(!store.path().exists());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn clear_keeps_unrelated_keys() {
        let (store, _dir) = store();
        std::fs::write(store.path(), "other: value\nhf_api_token: t\n").unwrap();
        assert!(store.clear().unwrap());
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("other: value"));
        assert!(!content.contains(TOKEN_KEY));
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask("hf_abcdef1234"), "*********1234");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask(""), "");
    }
}
