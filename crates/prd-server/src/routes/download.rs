use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use prd_core::export;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct DownloadQuery {
    /// Project name used to derive the filename.
    #[serde(default)]
    pub name: Option<String>,
}

/// GET /api/download — the held document as a markdown attachment.
pub async fn download(
    State(app): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let markdown = app
        .document
        .read()
        .await
        .markdown()
        .map(str::to_string)
        .ok_or_else(|| AppError::not_found("no document to download; generate one first"))?;

    let filename = export::filename_for(
        query.name.as_deref().unwrap_or_default(),
        &app.config.default_filename,
    );

    Ok((
        [
            (header::CONTENT_TYPE, export::MARKDOWN_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                export::content_disposition(&filename),
            ),
        ],
        markdown,
    )
        .into_response())
}
