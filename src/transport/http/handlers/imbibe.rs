use crate::error::ImbibeError;
use crate::transport::http::types::{
    error_response, json_422, AppState, ImbibeResponse, ImbibeTransactionRequest,
    ImbibeTransactionResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use solana_program::pubkey::Pubkey;
use std::str::FromStr;

impl IntoResponse for ImbibeError {
    fn into_response(self) -> Response {
        let status = match &self {
            ImbibeError::ResolutionFailure { .. } => StatusCode::BAD_GATEWAY,
            ImbibeError::AssemblyFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.to_string()).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/api/imbibe",
    responses(
        (status = 200, description = "Unsigned instructions and action metadata", body = ImbibeResponse),
        (status = 502, description = "Recipient domain could not be resolved", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn imbibe_handler(
    State(state): State<AppState>,
) -> Result<Json<ImbibeResponse>, ImbibeError> {
    let connection = state.connector.connect();
    let bundle = state.assembler.assemble(connection.as_ref()).await?;

    tracing::info!(
        recipient = %bundle.recipient,
        instructions = bundle.instructions.len(),
        "assembled imbibe instructions"
    );
    Ok(Json(ImbibeResponse::from(&bundle)))
}

#[utoipa::path(
    post,
    path = "/api/imbibe",
    request_body = ImbibeTransactionRequest,
    responses(
        (status = 200, description = "Unsigned transaction for the given account", body = ImbibeTransactionResponse),
        (status = 400, description = "Invalid account", body = ApiResponse),
        (status = 422, description = "Malformed JSON body", body = ApiResponse),
        (status = 502, description = "Recipient domain could not be resolved", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn imbibe_transaction_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImbibeTransactionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(e) => return json_422(e, "{ \"account\": \"<base58 pubkey>\" }").into_response(),
    };

    let sender = match Pubkey::from_str(request.account.trim()) {
        Ok(pk) => pk,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid account '{}': {}", request.account, e),
            )
            .into_response();
        }
    };

    let connection = state.connector.connect();
    let tx = match state
        .assembler
        .assemble_for_sender(connection.as_ref(), &sender)
        .await
    {
        Ok(tx) => tx,
        Err(e) => return e.into_response(),
    };

    let bytes = match bincode::serialize(&tx) {
        Ok(b) => b,
        Err(e) => {
            return ImbibeError::assembly(format!("Failed to serialize transaction: {}", e))
                .into_response();
        }
    };

    tracing::info!(%sender, "built unsigned imbibe transaction");
    let params = state.assembler.params();
    (
        StatusCode::OK,
        Json(ImbibeTransactionResponse {
            transaction: BASE64.encode(bytes),
            message: params.description(),
        }),
    )
        .into_response()
}
