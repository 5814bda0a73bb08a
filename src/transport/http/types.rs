use crate::domain::assembler::{ActionMetadata, InstructionBundle, TransactionAssembler};
use crate::domain::connection::Connector;
use crate::domain::instruction::{AccountRef, InstructionDescriptor, InstructionKind};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<dyn Connector>,
    pub assembler: Arc<TransactionAssembler>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One account slot of an instruction.
///
/// `pubkey` is `null` and `unboundSigner` is `true` for the slot the signing wallet fills.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountKeyJson {
    pub pubkey: Option<String>,
    pub is_signer: bool,
    pub is_writable: bool,
    pub unbound_signer: bool,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructionJson {
    /// Typed view, e.g. `{ "type": "transfer", "lamports": 100000000 }`.
    #[schema(value_type = Object)]
    pub kind: InstructionKind,
    pub program_id: String,
    pub keys: Vec<AccountKeyJson>,
    /// Base64 instruction data.
    pub data: String,
}

impl From<&InstructionDescriptor> for InstructionJson {
    fn from(ix: &InstructionDescriptor) -> Self {
        Self {
            kind: ix.kind,
            program_id: ix.program_id.to_string(),
            keys: ix
                .accounts
                .iter()
                .map(|slot| {
                    let (pubkey, unbound_signer) = match slot.account {
                        AccountRef::Bound(key) => (Some(key.to_string()), false),
                        AccountRef::UnboundSigner => (None, true),
                    };
                    AccountKeyJson {
                        pubkey,
                        is_signer: slot.is_signer,
                        is_writable: slot.is_writable,
                        unbound_signer,
                    }
                })
                .collect(),
            data: BASE64.encode(&ix.data),
        }
    }
}

/// Body of `GET /api/imbibe`: exactly `transaction` and `metadata`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ImbibeResponse {
    pub transaction: Vec<InstructionJson>,
    pub metadata: ActionMetadata,
}

impl From<&InstructionBundle> for ImbibeResponse {
    fn from(bundle: &InstructionBundle) -> Self {
        Self {
            transaction: bundle.instructions.iter().map(InstructionJson::from).collect(),
            metadata: bundle.metadata.clone(),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ImbibeTransactionRequest {
    /// Base-58 address of the wallet that will sign and pay.
    pub account: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ImbibeTransactionResponse {
    /// Base64 bincode of an unsigned v0 `VersionedTransaction`.
    pub transaction: String,
    pub message: String,
}

pub fn error_response(status: StatusCode, error: String) -> (StatusCode, Json<ApiResponse>) {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(error),
        }),
    )
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Invalid JSON body: {} (expected: {})", err, expected),
    )
}
