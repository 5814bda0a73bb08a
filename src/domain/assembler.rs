// Builds the fixed "imbibe" action: two compute-budget instructions and a SOL transfer to the
// owner of imbibed.sol, plus the metadata a wallet shows before signing.

use serde::Serialize;
use solana_program::{hash::Hash, instruction::Instruction, pubkey::Pubkey};
use solana_sdk::{
    message::{v0, VersionedMessage},
    native_token::LAMPORTS_PER_SOL,
    signature::Signature,
    transaction::VersionedTransaction,
};
use utoipa::ToSchema;

use crate::domain::connection::Connection;
use crate::domain::instruction::InstructionDescriptor;
use crate::domain::resolver::resolve_sns_domain;
use crate::error::{ImbibeError, LogOnError};

pub const ACTION_NAME: &str = "Imbibe";
pub const RECIPIENT_DOMAIN: &str = "imbibed.sol";
/// 0.1 SOL.
pub const IMBIBE_AMOUNT_LAMPORTS: u64 = LAMPORTS_PER_SOL / 10;
pub const PRIORITY_FEE_MICROLAMPORTS: u64 = 20_000;
pub const COMPUTE_UNIT_LIMIT: u32 = 200_000;

/// The knobs of the action. `Default` is the production configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImbibeParams {
    pub recipient_domain: String,
    pub amount_lamports: u64,
    pub priority_fee_micro_lamports: u64,
    pub compute_unit_limit: u32,
}

impl Default for ImbibeParams {
    fn default() -> Self {
        Self {
            recipient_domain: RECIPIENT_DOMAIN.to_string(),
            amount_lamports: IMBIBE_AMOUNT_LAMPORTS,
            priority_fee_micro_lamports: PRIORITY_FEE_MICROLAMPORTS,
            compute_unit_limit: COMPUTE_UNIT_LIMIT,
        }
    }
}

impl ImbibeParams {
    /// Human-readable amount, e.g. `0.1 SOL`.
    pub fn amount_label(&self) -> String {
        let whole = self.amount_lamports / LAMPORTS_PER_SOL;
        let frac = self.amount_lamports % LAMPORTS_PER_SOL;
        if frac == 0 {
            return format!("{} SOL", whole);
        }
        let digits = format!("{:09}", frac);
        format!("{}.{} SOL", whole, digits.trim_end_matches('0'))
    }

    pub fn priority_fee_label(&self) -> String {
        format!("{} microlamports", self.priority_fee_micro_lamports)
    }

    pub fn description(&self) -> String {
        format!(
            "Send exactly {} to {} with priority fees",
            self.amount_label(),
            self.recipient_domain
        )
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ButtonSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub default: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ActionSpecification {
    pub button: ButtonSpec,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionMetadata {
    pub name: String,
    pub description: String,
    pub specification: ActionSpecification,
    /// Base-58 address of the resolved recipient.
    pub recipient: String,
    pub amount: String,
    pub priority_fee: String,
}

/// The three instructions, always in the order price, limit, transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionBundle {
    pub instructions: Vec<InstructionDescriptor>,
    pub recipient: Pubkey,
    pub metadata: ActionMetadata,
}

impl InstructionBundle {
    /// Binds every unbound slot to `sender`.
    pub fn bind(&self, sender: &Pubkey) -> Vec<Instruction> {
        self.instructions.iter().map(|ix| ix.bind(sender)).collect()
    }

    /// Compiles a v0 message paid by `sender` and wraps it in a transaction with empty
    /// signature slots.
    pub fn to_unsigned_transaction(
        &self,
        sender: &Pubkey,
        recent_blockhash: Hash,
    ) -> Result<VersionedTransaction, ImbibeError> {
        let instructions = self.bind(sender);
        let message = v0::Message::try_compile(sender, &instructions, &[], recent_blockhash)
            .map_err(|e| ImbibeError::assembly(format!("Failed to compile message: {:?}", e)))?;
        let required = usize::from(message.header.num_required_signatures);
        Ok(VersionedTransaction {
            signatures: vec![Signature::default(); required],
            message: VersionedMessage::V0(message),
        })
    }
}

pub struct TransactionAssembler {
    params: ImbibeParams,
}

impl Default for TransactionAssembler {
    fn default() -> Self {
        Self::new(ImbibeParams::default())
    }
}

impl TransactionAssembler {
    pub fn new(params: ImbibeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ImbibeParams {
        &self.params
    }

    /// Resolves the recipient and builds the instruction bundle.
    ///
    /// Either the whole bundle comes back or an error does.
    pub async fn assemble(
        &self,
        connection: &dyn Connection,
    ) -> Result<InstructionBundle, ImbibeError> {
        let result: Result<InstructionBundle, ImbibeError> = async {
            let recipient =
                resolve_sns_domain(connection, &self.params.recipient_domain).await?;
            self.build(recipient)
        }
        .await;

        result.log_on_error("Error creating imbibe transaction")
    }

    /// Assembles and compiles an unsigned transaction for `sender`.
    pub async fn assemble_for_sender(
        &self,
        connection: &dyn Connection,
        sender: &Pubkey,
    ) -> Result<VersionedTransaction, ImbibeError> {
        let bundle = self.assemble(connection).await?;
        let result: Result<VersionedTransaction, ImbibeError> = async {
            let blockhash = connection
                .latest_blockhash()
                .await
                .map_err(ImbibeError::assembly)?;
            bundle.to_unsigned_transaction(sender, blockhash)
        }
        .await;

        result.log_on_error("Error compiling imbibe transaction")
    }

    fn build(&self, recipient: Pubkey) -> Result<InstructionBundle, ImbibeError> {
        let p = &self.params;
        let transfer = InstructionDescriptor::transfer_from_signer(recipient, p.amount_lamports)
            .map_err(ImbibeError::assembly)?;

        let instructions = vec![
            InstructionDescriptor::set_compute_unit_price(p.priority_fee_micro_lamports),
            InstructionDescriptor::set_compute_unit_limit(p.compute_unit_limit),
            transfer,
        ];

        let metadata = ActionMetadata {
            name: ACTION_NAME.to_string(),
            description: p.description(),
            specification: ActionSpecification {
                button: ButtonSpec {
                    kind: "string".to_string(),
                    description: "Button label".to_string(),
                    default: "imbibe".to_string(),
                },
            },
            recipient: recipient.to_string(),
            amount: p.amount_label(),
            priority_fee: p.priority_fee_label(),
        };

        Ok(InstructionBundle {
            instructions,
            recipient,
            metadata,
        })
    }
}
