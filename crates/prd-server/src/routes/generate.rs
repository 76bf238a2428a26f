use axum::extract::State;
use axum::Json;
use prd_core::{export, run_attempt, CannedGenerator, ProjectInputs};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Raw feature text, one feature per line.
    #[serde(default)]
    pub features: String,
}

/// POST /api/generate — run one generation attempt from the form fields.
///
/// Responds 400 when no token is stored. Generation failures still return
/// 200 with the `# Error` document so the UI can display and download it.
pub async fn generate(
    State(app): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let inputs = ProjectInputs::from_form(body.name, body.description, &body.features);
    let token = app.token.read().await.clone();
    let params = app.config.params();

    let doc = {
        let _attempt = app.begin_attempt();
        if app.offline {
            let canned = CannedGenerator::new(inputs.clone());
            run_attempt(&canned, &inputs, params, token.as_deref()).await?
        } else {
            run_attempt(&app.client, &inputs, params, token.as_deref()).await?
        }
    };

    let filename = export::filename_for(&inputs.name, &app.config.default_filename);
    app.document.write().await.replace(doc.clone());

    Ok(Json(serde_json::json!({
        "markdown": doc,
        "filename": filename,
    })))
}
