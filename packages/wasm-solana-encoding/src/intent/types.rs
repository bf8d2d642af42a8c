//! Types for intent-based message building.
//!
//! These types are deserialized from JavaScript via serde. Public keys are base58
//! strings and amounts are decimal strings, to stay clear of JavaScript's number
//! limits.

use serde::Deserialize;

/// Where the message's blockhash comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Nonce {
    /// Recent blockhash (standard messages)
    Blockhash { value: String },
    /// Durable nonce (offline signing). An advance-nonce instruction is prepended.
    Durable {
        address: String,
        authority: String,
        /// Value currently stored in the nonce account; used as the blockhash
        value: String,
    },
}

/// Wire format requested by the intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageVersion {
    #[default]
    Legacy,
    V0,
}

/// A lookup table supplied with a v0 intent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupTableIntent {
    pub address: String,
    pub addresses: Vec<String>,
}

/// Intent to build a message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageIntent {
    /// Base58 address; first signer and first static account
    pub fee_payer: String,
    pub nonce: Nonce,
    #[serde(default)]
    pub version: MessageVersion,
    pub instructions: Vec<InstructionIntent>,
    /// Only consulted for v0 messages
    #[serde(default)]
    pub lookup_tables: Vec<LookupTableIntent>,
}

/// An account reference of a custom instruction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetaIntent {
    pub pubkey: String,
    #[serde(default)]
    pub is_signer: bool,
    #[serde(default)]
    pub is_writable: bool,
}

/// An instruction to include in the message, discriminated by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InstructionIntent {
    // System program
    Transfer {
        from: String,
        to: String,
        /// Decimal string, so values above 2^53 survive the trip from JavaScript
        lamports: String,
    },

    CreateAccount {
        from: String,
        new_account: String,
        lamports: String,
        space: u64,
        owner: String,
    },

    NonceAdvance {
        nonce: String,
        authority: String,
    },

    NonceInitialize {
        nonce: String,
        authority: String,
    },

    Allocate {
        account: String,
        space: u64,
    },

    Assign {
        account: String,
        owner: String,
    },

    // Memo
    Memo {
        message: String,
    },

    // Compute budget
    ComputeBudget {
        unit_limit: Option<u32>,
        /// Micro-lamports per compute unit
        unit_price: Option<u64>,
    },

    // SPL Token / Token-2022
    /// Plain transfer, or transfer-checked when both `mint` and `decimals` are given
    TokenTransfer {
        source: String,
        destination: String,
        owner: String,
        amount: String,
        mint: Option<String>,
        decimals: Option<u8>,
        program_id: Option<String>,
    },

    CreateAta {
        payer: String,
        owner: String,
        mint: String,
        program_id: Option<String>,
        #[serde(default)]
        idempotent: bool,
    },

    CloseAta {
        account: String,
        destination: String,
        owner: String,
        program_id: Option<String>,
    },

    // Address lookup tables
    CreateLookupTable {
        authority: String,
        payer: String,
        recent_slot: String,
    },

    ExtendLookupTable {
        table: String,
        authority: String,
        payer: Option<String>,
        addresses: Vec<String>,
    },

    // Any other program
    Custom {
        program_id: String,
        accounts: Vec<AccountMetaIntent>,
        /// Base64-encoded instruction data
        data: String,
    },
}
