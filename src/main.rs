// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use lang_portal::config::Config;
use lang_portal::logging::init_tracing;
use lang_portal::routes;
use lang_portal::services::bedrock::BedrockModel;
use lang_portal::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment (and .env, if present)
    let config = Config::from_env();

    let _guard = init_tracing(&config, "generator.log", true);
    config.log_warnings();

    if config.aws_credentials.access_key_id.is_empty() {
        tracing::warn!("AWS_ACCESS_KEY_ID is not set; generation requests will fail until it is");
    }

    let model = BedrockModel::from_config(&config);
    tracing::info!(
        "Using model {} in {}",
        config.model_id,
        config.aws_region
    );

    let addr: SocketAddr = match config.generator_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid GENERATOR_ADDR {:?}: {}", config.generator_addr, e);
            std::process::exit(2);
        }
    };

    let state = AppState {
        model: Arc::new(model),
    };

    let app = routes::create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Vocabulary generator listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
