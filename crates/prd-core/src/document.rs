//! Generated documents and the editable state that holds them.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Heading prefix every generated document starts with.
pub const HEADING_PREFIX: &str = "# ";

// ---------------------------------------------------------------------------
// NormalizedDocument
// ---------------------------------------------------------------------------

/// Markdown produced by a generation attempt.
///
/// Always starts with `"# "`. Values are only minted inside this crate (the
/// normalizer, the fallback template, and the error document), so the
/// invariant cannot be bypassed by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedDocument {
    markdown: String,
}

impl NormalizedDocument {
    pub(crate) fn new_unchecked(markdown: String) -> Self {
        debug_assert!(markdown.starts_with(HEADING_PREFIX));
        Self { markdown }
    }

    /// The document shown when the generation service failed.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::new_unchecked(format!("# Error\nFailed to generate: {message}"))
    }

    pub fn as_str(&self) -> &str {
        &self.markdown
    }

    pub fn into_string(self) -> String {
        self.markdown
    }
}

impl std::fmt::Display for NormalizedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.markdown)
    }
}

impl AsRef<str> for NormalizedDocument {
    fn as_ref(&self) -> &str {
        &self.markdown
    }
}

// ---------------------------------------------------------------------------
// DocumentState
// ---------------------------------------------------------------------------

/// Where the currently held markdown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentOrigin {
    Generated,
    Edited,
}

/// The editable document held between attempts.
///
/// A new attempt overwrites it with a [`NormalizedDocument`]; user edits
/// replace it verbatim and are not re-validated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentState {
    markdown: Option<String>,
    origin: Option<DocumentOrigin>,
    updated_at: Option<DateTime<Utc>>,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, doc: NormalizedDocument) {
        self.markdown = Some(doc.into_string());
        self.origin = Some(DocumentOrigin::Generated);
        self.updated_at = Some(Utc::now());
    }

    pub fn apply_edit(&mut self, markdown: String) {
        self.markdown = Some(markdown);
        self.origin = Some(DocumentOrigin::Edited);
        self.updated_at = Some(Utc::now());
    }

    pub fn markdown(&self) -> Option<&str> {
        self.markdown.as_deref()
    }

    pub fn origin(&self) -> Option<DocumentOrigin> {
        self.origin
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_empty(&self) -> bool {
        self.markdown.is_none()
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// An interactive markdown editor.
///
/// The editor is seeded with `initial_value` and reports every change
/// through `on_change`. Implementations may call `on_change` zero times
/// (nothing edited) or many times.
pub trait Editor {
    type Error;

    fn open(
        &self,
        initial_value: &str,
        on_change: &mut dyn FnMut(String),
    ) -> std::result::Result<(), Self::Error>;
}

/// Run `editor` against the document held in `state`, storing edits verbatim.
pub fn edit_in_place<E: Editor>(
    editor: &E,
    state: &mut DocumentState,
) -> std::result::Result<(), E::Error> {
    let initial = state.markdown().unwrap_or_default().to_string();
    editor.open(&initial, &mut |edited| state.apply_edit(edited))
}
