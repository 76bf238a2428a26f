use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// GET /api/session — what the page needs on load: whether a token is
/// stored, whether an attempt is running, and the held document.
pub async fn get_session(State(app): State<AppState>) -> Json<serde_json::Value> {
    let has_token = app.token.read().await.is_some();
    let doc = app.document.read().await;
    Json(serde_json::json!({
        "has_token": has_token,
        "generating": app.is_generating(),
        "offline": app.offline,
        "default_filename": app.config.default_filename,
        "document": &*doc,
    }))
}
