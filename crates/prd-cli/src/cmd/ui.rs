use anyhow::Context;
use prd_core::config::Config;
use prd_server::AppState;
use std::path::Path;

pub fn run(home: &Path, port: u16, no_open: bool, offline: bool) -> anyhow::Result<()> {
    let config = Config::load(home).context("failed to load config")?;
    if !offline {
        config.ensure_valid()?;
    }
    let state = AppState::new(home.to_path_buf(), config, offline)
        .context("failed to initialize UI state")?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {port}"))?;
        let actual_port = listener.local_addr()?.port();
        println!("prdgen UI → http://localhost:{actual_port}");

        tokio::select! {
            res = prd_server::serve_on(state, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
