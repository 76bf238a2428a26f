//! Turns a raw model completion into a well-formed markdown document.
//!
//! The pipeline is total: every input, including a missing or malformed
//! response body, yields a [`NormalizedDocument`] that starts with `"# "`.
//!
//! ```text
//! response body ──extract──▶ candidate ──cleanup──▶ cleaned ──gate──▶ document
//!                                                      │ empty / no "# "
//!                                                      └──────▶ fallback(inputs)
//! ```

use crate::document::{NormalizedDocument, HEADING_PREFIX};
use crate::inputs::ProjectInputs;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Candidate text used when the response body has no recognizable shape.
pub const NO_COMPLETION: &str = "No valid markdown generated.";

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Text pulled out of the generation service's response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCompletion {
    pub text: String,
}

/// Extract the completion from a response body.
///
/// Recognized shapes, in order of precedence:
/// 1. `[{"generated_text": "..."}, ...]` — first element only
/// 2. `{"generated_text": "..."}`
///
/// Non-string `generated_text` values are treated as absent.
pub fn extract(body: &Value) -> Option<RawCompletion> {
    let first = body
        .as_array()
        .and_then(|items| items.first())
        .and_then(|item| item.get("generated_text"))
        .and_then(Value::as_str);
    let top = || body.get("generated_text").and_then(Value::as_str);

    first.or_else(top).map(|text| RawCompletion {
        text: text.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Cleanup rules
// ---------------------------------------------------------------------------

static ECHO_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUN_RE: OnceLock<Regex> = OnceLock::new();
static BLANK_LINES_RE: OnceLock<Regex> = OnceLock::new();

fn echo_re() -> &'static Regex {
    // A run of 2+ whitespace is collapsed to one space by a later rule, so
    // it counts as the phrase's space. A lone newline or tab does not.
    ECHO_RE.get_or_init(|| Regex::new(r"(?:Summarize|Output(?: |\s{2,})only).*").unwrap())
}

fn whitespace_run_re() -> &'static Regex {
    WHITESPACE_RUN_RE.get_or_init(|| Regex::new(r"\s{2,}").unwrap())
}

fn blank_lines_re() -> &'static Regex {
    BLANK_LINES_RE.get_or_init(|| Regex::new(r"(?:\n\n){2,}").unwrap())
}

/// Rule 1 and 5: trim surrounding whitespace.
pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

/// Rule 2: strip instruction text the model echoed back.
///
/// Removes from `Summarize` or `Output only` (case-sensitive) to the end of
/// that line. Repeats until nothing matches, since a removal can splice two
/// fragments into a new match.
pub fn strip_prompt_echo(text: &str) -> String {
    let mut current = text.to_string();
    while echo_re().is_match(&current) {
        current = echo_re().replace_all(&current, "").into_owned();
    }
    current
}

/// Rule 3: collapse every run of two or more whitespace characters into a
/// single space. This also flattens indentation and paragraph breaks.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_run_re().replace_all(text, " ").into_owned()
}

/// Rule 4: collapse two or more consecutive blank-line pairs into one blank
/// line.
pub fn collapse_blank_lines(text: &str) -> String {
    blank_lines_re().replace_all(text, "\n\n").into_owned()
}

/// Apply the cleanup rules in order.
pub fn cleanup(text: &str) -> String {
    let text = trim(text);
    let text = strip_prompt_echo(&text);
    let text = collapse_whitespace(&text);
    let text = collapse_blank_lines(&text);
    trim(&text)
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Deterministic document built only from the form inputs.
pub fn fallback(inputs: &ProjectInputs) -> NormalizedDocument {
    let markdown = format!(
        "{HEADING_PREFIX}{name}\n## Description\n{description}\n## Features\n{features}",
        name = inputs.name,
        description = inputs.description,
        features = inputs.feature_bullets(),
    );
    NormalizedDocument::new_unchecked(markdown.trim_end().to_string())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Normalize a response body into a document, falling back to the inputs
/// when the cleaned completion is empty or lacks a top-level heading.
pub fn normalize(body: Option<&Value>, inputs: &ProjectInputs) -> NormalizedDocument {
    let candidate = match body.and_then(extract) {
        Some(raw) => raw.text,
        None => {
            tracing::debug!("response body has no generated_text");
            NO_COMPLETION.to_string()
        }
    };

    let cleaned = cleanup(&candidate);
    if cleaned.is_empty() || !cleaned.starts_with(HEADING_PREFIX) {
        tracing::warn!(
            cleaned_len = cleaned.len(),
            "completion failed the heading check; using fallback document"
        );
        return fallback(inputs);
    }
    NormalizedDocument::new_unchecked(cleaned)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn todo_inputs() -> ProjectInputs {
        ProjectInputs::from_form("Todo App", "A simple app", "Add tasks\nDelete tasks")
    }

    const TODO_FALLBACK: &str =
        "# Todo App\n## Description\nA simple app\n## Features\n- Add tasks\n- Delete tasks";

    // --- extraction ---

    #[test]
    fn extract_prefers_first_array_element() {
        let body = json!([{ "generated_text": "# A" }, { "generated_text": "# Z" }]);
        assert_eq!(extract(&body).unwrap().text, "# A");
    }

    #[test]
    fn extract_top_level_object() {
        let body = json!({ "generated_text": "# B" });
        assert_eq!(extract(&body).unwrap().text, "# B");
    }

    #[test]
    fn extract_empty_array_is_absent() {
        assert_eq!(extract(&json!([])), None);
    }

    #[test]
    fn extract_ignores_non_string_values() {
        assert_eq!(extract(&json!({ "generated_text": 42 })), None);
        assert_eq!(extract(&json!([{ "generated_text": null }])), None);
    }

    #[test]
    fn extract_first_element_without_field_is_absent() {
        assert_eq!(extract(&json!([{ "text": "# A" }])), None);
    }

    // --- individual rules ---

    #[test]
    fn strip_prompt_echo_removes_to_end_of_line() {
        let out = strip_prompt_echo("# T\nkeep Summarize this\nOutput only markdown\nlast");
        assert_eq!(out, "# T\nkeep \n\nlast");
    }

    #[test]
    fn strip_prompt_echo_is_case_sensitive() {
        assert_eq!(strip_prompt_echo("summarize output only"), "summarize output only");
    }

    #[test]
    fn strip_prompt_echo_handles_spliced_matches() {
        // Removing "Summarize…" leaves "Output \nonly" behind.
        let out = strip_prompt_echo("Output Summarize x\nonly y");
        assert!(!out.contains("Output"));
    }

    #[test]
    fn strip_prompt_echo_keeps_output_without_the_phrase() {
        for text in ["Output\nonly", "Output\tonly", "Outputs only", "# Plan\nOutput\nonly admins"] {
            assert_eq!(strip_prompt_echo(text), text);
        }
    }

    #[test]
    fn cleanup_keeps_phrase_split_across_lines() {
        let text = "# Plan\nOutput\nonly admins can delete";
        assert_eq!(cleanup(text), text);
    }

    #[test]
    fn collapse_whitespace_flattens_runs() {
        assert_eq!(collapse_whitespace("a  b\n\nc\t \td\ne"), "a b c d\ne");
    }

    #[test]
    fn collapse_blank_lines_keeps_one_blank_line() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn cleanup_is_idempotent() {
        let samples = [
            "  # Title\n\n  body   text\nSummarize it\n\n\n\nmore  ",
            "# T\nOutput  only\nx",
            "Output Summarize x\nonly y",
            "\n\n\n",
            "# A\n- one\n- two",
            "Output\nonly",
            "Output\tonly",
            "Outputs only",
            "# Plan\nOutput \nonly admins",
        ];
        for s in samples {
            let once = cleanup(s);
            assert_eq!(cleanup(&once), once, "not idempotent for {s:?}");
        }
    }

    // --- normalize ---

    #[test]
    fn scenario_echoed_instruction_is_stripped() {
        let body = json!([{ "generated_text": "# Todo App\n\nGreat project! Summarize the above." }]);
        let doc = normalize(Some(&body), &todo_inputs());
        assert!(doc.as_str().starts_with("# Todo App"));
        assert!(!doc.as_str().contains("Summarize"));
        assert_eq!(doc.as_str(), "# Todo App Great project!");
    }

    #[test]
    fn scenario_missing_text_falls_back() {
        let doc = normalize(Some(&json!({})), &todo_inputs());
        assert_eq!(doc.as_str(), TODO_FALLBACK);
    }

    #[test]
    fn absent_body_falls_back() {
        let doc = normalize(None, &todo_inputs());
        assert_eq!(doc.as_str(), TODO_FALLBACK);
    }

    #[test]
    fn completion_without_heading_falls_back() {
        let body = json!({ "generated_text": "Here is your document:\n# Todo App" });
        assert_eq!(normalize(Some(&body), &todo_inputs()).as_str(), TODO_FALLBACK);
    }

    #[test]
    fn completion_that_is_only_echo_falls_back() {
        let body = json!([{ "generated_text": "  Summarize the project goals.  " }]);
        assert_eq!(normalize(Some(&body), &todo_inputs()).as_str(), TODO_FALLBACK);
    }

    #[test]
    fn hash_without_space_falls_back() {
        let body = json!({ "generated_text": "#Todo" });
        assert_eq!(normalize(Some(&body), &todo_inputs()).as_str(), TODO_FALLBACK);
    }

    #[test]
    fn array_wins_over_sibling_fields() {
        let body = json!([{ "generated_text": "# A" }]);
        assert_eq!(normalize(Some(&body), &todo_inputs()).as_str(), "# A");
    }

    #[test]
    fn empty_features_render_no_bullets() {
        let inputs = ProjectInputs::from_form("Todo App", "A simple app", "");
        let doc = normalize(None, &inputs);
        assert_eq!(doc.as_str(), "# Todo App\n## Description\nA simple app\n## Features");
    }

    #[test]
    fn fallback_with_all_fields_empty_keeps_heading() {
        let doc = fallback(&ProjectInputs::default());
        assert!(doc.as_str().starts_with("# "));
        assert_eq!(doc.as_str(), "# \n## Description\n\n## Features");
    }

    #[test]
    fn fallback_is_deterministic() {
        let inputs = todo_inputs();
        assert_eq!(fallback(&inputs), fallback(&inputs));
    }

    #[test]
    fn every_output_starts_with_heading() {
        let bodies = [
            json!(null),
            json!(""),
            json!([]),
            json!([1, 2]),
            json!({ "generated_text": "" }),
            json!({ "generated_text": "   " }),
            json!([{ "generated_text": "# " }]),
            json!([{ "generated_text": "#" }]),
            json!([{ "generated_text": "Output only # Heading" }]),
            json!({ "error": "model loading" }),
        ];
        let inputs_set = [
            ProjectInputs::default(),
            todo_inputs(),
            ProjectInputs::from_form("  ", "\n", "\n\n"),
        ];
        for body in &bodies {
            for inputs in &inputs_set {
                let doc = normalize(Some(body), inputs);
                assert!(doc.as_str().starts_with("# "), "{body} -> {:?}", doc.as_str());
            }
        }
    }
}
