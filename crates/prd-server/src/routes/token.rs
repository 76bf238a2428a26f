use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct SaveTokenBody {
    pub token: String,
}

/// PUT /api/token — persist the API token and use it for later attempts.
pub async fn save_token(
    State(app): State<AppState>,
    Json(body): Json<SaveTokenBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = body.token.trim().to_string();
    if token.is_empty() {
        return Err(AppError::bad_request("token must not be empty"));
    }

    let store = app.tokens.clone();
    let to_save = token.clone();
    tokio::task::spawn_blocking(move || store.save(&to_save))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    *app.token.write().await = Some(token);
    tracing::info!("API token saved");
    Ok(Json(serde_json::json!({ "saved": true })))
}

/// DELETE /api/token — forget the stored token.
pub async fn clear_token(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.tokens.clone();
    let removed = tokio::task::spawn_blocking(move || store.clear())
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    *app.token.write().await = None;
    Ok(Json(serde_json::json!({ "removed": removed })))
}
