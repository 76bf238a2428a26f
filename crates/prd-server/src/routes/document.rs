use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// GET /api/document — the currently held document, if any.
pub async fn get_document(State(app): State<AppState>) -> Json<serde_json::Value> {
    let doc = app.document.read().await;
    Json(serde_json::to_value(&*doc).unwrap_or(serde_json::Value::Null))
}

#[derive(serde::Deserialize)]
pub struct EditBody {
    pub markdown: String,
}

/// PUT /api/document — store an editor change verbatim.
///
/// Edits are not normalized and need not start with a heading.
pub async fn put_document(
    State(app): State<AppState>,
    Json(body): Json<EditBody>,
) -> Json<serde_json::Value> {
    let mut doc = app.document.write().await;
    doc.apply_edit(body.markdown);
    Json(serde_json::to_value(&*doc).unwrap_or(serde_json::Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prd_core::config::Config;

    #[tokio::test]
    async fn empty_document_initially() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf(), Config::default(), true).unwrap();
        let json = get_document(State(app)).await.0;
        assert!(json["markdown"].is_null());
        assert!(json["origin"].is_null());
    }

    #[tokio::test]
    async fn edit_is_stored_verbatim() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf(), Config::default(), true).unwrap();

        let body = EditBody {
            markdown: "plain text, no heading\n\n\n".to_string(),
        };
        let _ = put_document(State(app.clone()), Json(body)).await;

        let json = get_document(State(app)).await.0;
        assert_eq!(json["markdown"], "plain text, no heading\n\n\n");
        assert_eq!(json["origin"], "edited");
    }
}
