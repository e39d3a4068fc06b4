use easy_budget::config::Config;
use easy_budget::server::{build_app, serve};
use easy_budget::VERSION;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "easy_budget=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting Easy Budget {} on {}", VERSION, config.address());

    let (_state, app) = build_app(&config)?;
    let (port, handle) = serve(app, &config.host, config.port).await?;

    tracing::info!("Listening on http://{}:{}", config.host, port);

    handle.await?;
    Ok(())
}
