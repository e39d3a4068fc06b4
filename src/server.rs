use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppResult;
use crate::handlers;
use crate::services::budget_api::BudgetApiClient;
use crate::services::preferences::PreferencesStore;
use crate::state::AppState;

/// Build the application state and Axum router from a [`Config`].
///
/// Creates the backend client and loads the preferences file. Returns the
/// shared state and a ready-to-serve router.
pub fn build_app(config: &Config) -> AppResult<(AppState, Router)> {
    let api = BudgetApiClient::new(&config.api)?;
    tracing::info!("Using budget backend at {}", api.base_url());

    let preferences = PreferencesStore::load(&config.preferences_path);
    tracing::info!("Loaded preferences from {}", preferences.path().display());

    let state = AppState {
        api,
        preferences: Arc::new(preferences),
    };

    let app = Router::new()
        .merge(handlers::routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok((state, app))
}

/// Bind the router to `host:port` and spawn the server as a tokio task.
///
/// Returns the actual port the server bound to (useful when `port` is 0 for
/// OS-assigned ports) and a [`JoinHandle`] for the server task.
pub async fn serve(
    app: Router,
    host: &str,
    port: u16,
) -> Result<(u16, JoinHandle<()>), Box<dyn std::error::Error>> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((actual_port, handle))
}
