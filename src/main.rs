use anyhow::Result;
use clap::Parser;
use imagegen_server::inference::WorkersAiClient;
use imagegen_server::models::Config;
use imagegen_server::server::{build_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "imagegen-server")]
#[command(about = "HTTP endpoint for AI image generation")]
struct CliArgs {
    /// Address to listen on.
    #[arg(long, value_name = "ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imagegen_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting imagegen-server");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Image model: {}", config.image_model);

    let inference = Arc::new(WorkersAiClient::new(
        config.api_token,
        config.account_id,
        config.image_model,
    ));

    let app = build_router(AppState::new(inference));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
