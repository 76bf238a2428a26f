//! Form inputs captured at the moment a generation attempt starts.

use serde::{Deserialize, Serialize};

/// Immutable snapshot of the project form.
///
/// `features` holds one entry per line of the raw feature text, including
/// blank lines; renderers decide what to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInputs {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl ProjectInputs {
    /// Build inputs from raw form text, splitting `features` on newlines.
    pub fn from_form(
        name: impl Into<String>,
        description: impl Into<String>,
        features: &str,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            features: split_features(features),
        }
    }

    /// Features rendered as markdown bullets, one per line.
    ///
    /// Each feature is trimmed; lines that are blank after trimming produce
    /// no bullet, so an empty feature box yields an empty list.
    pub fn feature_bullets(&self) -> String {
        self.features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(|f| format!("- {f}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split multi-line feature text into one entry per line.
///
/// Splits on `\n` only and strips a trailing `\r` so text pasted from
/// Windows clipboards behaves the same.
pub fn split_features(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
