use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use spadchyna_harvester::WikiClient;
use spadchyna_pipeline::api;
use spadchyna_pipeline::config::{DescribeConfig, ServerConfig};
use spadchyna_pipeline::describe::{Describer, OpenAiClient};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be populated
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match DescribeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "failed to load server configuration");
            std::process::exit(1);
        }
    };

    let source = match WikiClient::with_api_url(&config.wiki_api_url) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "failed to create Wikipedia client");
            std::process::exit(1);
        }
    };
    let client = match OpenAiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create LLM client");
            std::process::exit(1);
        }
    };
    tracing::info!(model = client.model(), wiki = %config.wiki_api_url, "clients ready");

    let describer = Arc::new(Describer::with_policy(
        source,
        client,
        config.paragraphs.clone(),
    ));
    let app = api::router(describer);

    let listener = match tokio::net::TcpListener::bind(server.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %server.listen_addr, "failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!("listening on {}", server.listen_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
