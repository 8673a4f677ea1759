use std::sync::Arc;

use anyhow::Context;

use tenanthr_api::{app, config::ShellConfig, context::AppState};
use tenanthr_auth::{CapabilityTable, DemoDirectory, FileMarkerStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tenanthr_observability::init();

    let config = ShellConfig::from_env()?;
    let state = AppState::new(
        Arc::new(FileMarkerStore::new(&config.marker_path)),
        Arc::new(DemoDirectory::demo()?),
        CapabilityTable::hrms(),
    );

    // Requests that arrive before this finishes get the loading placeholder.
    tokio::spawn({
        let session = state.session.clone();
        async move {
            session.initialize().await;
        }
    });

    let app = app::build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
