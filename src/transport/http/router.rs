use crate::domain::assembler::{ActionMetadata, ActionSpecification, ButtonSpec};
use crate::transport::http::handlers::{health, imbibe};
use crate::transport::http::types::{
    AccountKeyJson, ApiResponse, ImbibeResponse, ImbibeTransactionRequest,
    ImbibeTransactionResponse, InstructionJson,
};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        imbibe::imbibe_handler,
        imbibe::imbibe_transaction_handler
    ),
    components(schemas(
        ApiResponse,
        ImbibeResponse,
        InstructionJson,
        AccountKeyJson,
        ActionMetadata,
        ActionSpecification,
        ButtonSpec,
        ImbibeTransactionRequest,
        ImbibeTransactionResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/imbibe",
            get(imbibe::imbibe_handler).post(imbibe::imbibe_transaction_handler),
        )
        .with_state(app_state)
}
