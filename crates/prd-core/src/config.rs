use crate::error::{PrdError, Result};
use crate::export::DEFAULT_BASENAME;
use crate::generation::GenerationParams;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_filename")]
    pub default_filename: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_length() -> u32 {
    GenerationParams::default().max_length
}

fn default_temperature() -> f64 {
    GenerationParams::default().temperature
}

fn default_filename() -> String {
    DEFAULT_BASENAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_length: default_max_length(),
            temperature: default_temperature(),
            default_filename: default_filename(),
        }
    }
}

impl Config {
    /// Load `config.yaml` from the state directory; a missing or empty file
    /// yields the defaults.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = paths::config_path(state_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, state_dir: &Path) -> Result<()> {
        let path = paths::config_path(state_dir);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            max_length: self.max_length,
            temperature: self.temperature,
        }
    }

    /// Fail if `validate` reports any error-level warning.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PrdError::InvalidConfig(errors.join("; ")))
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "endpoint is empty".to_string(),
            });
        } else if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("endpoint '{endpoint}' is not an http(s) URL"),
            });
        } else if endpoint.starts_with("http://") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("endpoint '{endpoint}' is not https; the token is sent in clear text"),
            });
        }

        if self.max_length == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "max_length must be greater than 0".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "temperature={} is outside 0.0..=2.0 and may be rejected",
                    self.temperature
                ),
            });
        }

        if self.default_filename.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "default_filename is empty; downloads use 'project'".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
