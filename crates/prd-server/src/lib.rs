pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/session", get(routes::session::get_session))
        // Token
        .route(
            "/api/token",
            put(routes::token::save_token).delete(routes::token::clear_token),
        )
        // Generation
        .route("/api/generate", post(routes::generate::generate))
        // Editor
        .route(
            "/api/document",
            get(routes::document::get_document).put(routes::document::put_document),
        )
        // Download
        .route("/api/download", get(routes::download::download))
        .fallback(embed::static_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Serve the web UI on a pre-bound listener.
///
/// Taking a bound `TcpListener` lets the caller read the actual port before
/// starting (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(
    app_state: AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let offline = app_state.offline;
    let app = build_router(app_state);

    tracing::info!(offline, "prdgen UI listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
