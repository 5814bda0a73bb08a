//! Instruction descriptors with an explicit slot for the not-yet-known signer.
//!
//! The transfer built by the assembler has no sender until a wallet signs it, so account
//! slots are either bound to a concrete key or marked as the unbound signer. A descriptor
//! becomes a real `Instruction` only through [`InstructionDescriptor::bind`].

use serde::Serialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_instruction::SystemInstruction,
};
use solana_sdk::{compute_budget::ComputeBudgetInstruction, system_program};

/// Who sits in an account slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRef {
    Bound(Pubkey),
    /// Filled in by whoever signs the transaction.
    UnboundSigner,
}

impl AccountRef {
    pub fn resolve(self, signer: &Pubkey) -> Pubkey {
        match self {
            AccountRef::Bound(key) => key,
            AccountRef::UnboundSigner => *signer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSlot {
    pub account: AccountRef,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// What an instruction does, with its parameters in plain units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InstructionKind {
    #[serde(rename_all = "camelCase")]
    SetComputeUnitPrice { micro_lamports: u64 },
    SetComputeUnitLimit { units: u32 },
    Transfer { lamports: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDescriptor {
    pub kind: InstructionKind,
    pub program_id: Pubkey,
    pub accounts: Vec<AccountSlot>,
    pub data: Vec<u8>,
}

impl InstructionDescriptor {
    pub fn set_compute_unit_price(micro_lamports: u64) -> Self {
        Self::from_bound(
            InstructionKind::SetComputeUnitPrice { micro_lamports },
            ComputeBudgetInstruction::set_compute_unit_price(micro_lamports),
        )
    }

    pub fn set_compute_unit_limit(units: u32) -> Self {
        Self::from_bound(
            InstructionKind::SetComputeUnitLimit { units },
            ComputeBudgetInstruction::set_compute_unit_limit(units),
        )
    }

    /// System transfer from the unbound signer to `to`.
    pub fn transfer_from_signer(to: Pubkey, lamports: u64) -> Result<Self, bincode::Error> {
        let data = bincode::serialize(&SystemInstruction::Transfer { lamports })?;
        Ok(Self {
            kind: InstructionKind::Transfer { lamports },
            program_id: system_program::ID,
            accounts: vec![
                AccountSlot {
                    account: AccountRef::UnboundSigner,
                    is_signer: true,
                    is_writable: true,
                },
                AccountSlot {
                    account: AccountRef::Bound(to),
                    is_signer: false,
                    is_writable: true,
                },
            ],
            data,
        })
    }

    fn from_bound(kind: InstructionKind, ix: Instruction) -> Self {
        Self {
            kind,
            program_id: ix.program_id,
            accounts: ix
                .accounts
                .into_iter()
                .map(|meta| AccountSlot {
                    account: AccountRef::Bound(meta.pubkey),
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
                .collect(),
            data: ix.data,
        }
    }

    pub fn has_unbound_signer(&self) -> bool {
        self.accounts
            .iter()
            .any(|slot| slot.account == AccountRef::UnboundSigner)
    }

    /// Produces a real instruction, substituting `signer` for every unbound slot.
    pub fn bind(&self, signer: &Pubkey) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self
                .accounts
                .iter()
                .map(|slot| AccountMeta {
                    pubkey: slot.account.resolve(signer),
                    is_signer: slot.is_signer,
                    is_writable: slot.is_writable,
                })
                .collect(),
            data: self.data.clone(),
        }
    }
}
