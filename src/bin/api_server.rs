// src/bin/api_server.rs

use imbibe_action::infra::config::Config;
use imbibe_action::solana::RpcConnector;
use imbibe_action::transport;
use imbibe_action::TransactionAssembler;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imbibe_action=info,api_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = Config::from_env()?;
    tracing::info!("> Solana RPC endpoint: {}", config.solana_rpc_url);

    // --- Service Initialization ---
    let app_state = transport::http::AppState {
        connector: Arc::new(RpcConnector::new(config.solana_rpc_url.clone())),
        assembler: Arc::new(TransactionAssembler::default()),
    };
    let params = app_state.assembler.params();
    tracing::info!(
        "> Imbibe action: {} lamports to {} (priority fee {} microlamports, CU limit {})",
        params.amount_lamports,
        params.recipient_domain,
        params.priority_fee_micro_lamports,
        params.compute_unit_limit
    );

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("> API server listening on http://{}", config.bind_addr);
    tracing::info!("> Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("> Shutdown signal received (Ctrl+C).");
        }
    }

    Ok(())
}
