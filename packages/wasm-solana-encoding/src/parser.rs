//! High-level message parser.
//!
//! Turns encoded message bytes into owned, display-ready data (base58 addresses,
//! base64 instruction data) for JavaScript callers. Instruction data is returned
//! raw; decoding it per program is left to the consumer.

use crate::error::{EncodingError, Result};
use crate::js_obj;
use crate::message::{MessageView, Version};
use crate::programs::SYSTEM_PROGRAM_ID;
use crate::pubkey::PublicKey;
use crate::wasm::try_into_js_value::{JsConversionError, TryIntoJsValue};
use base64::prelude::*;
use wasm_bindgen::JsValue;

/// Discriminator of the System Program's AdvanceNonceAccount instruction.
const ADVANCE_NONCE_DATA: [u8; 4] = [4, 0, 0, 0];

/// A fully parsed message.
#[derive(Debug, Clone)]
pub struct ParsedMessage {
    /// "legacy" or "v0".
    pub version: &'static str,

    /// The fee payer address (base58).
    pub fee_payer: String,

    pub num_signatures: u8,
    pub num_readonly_signed: u8,
    pub num_readonly_unsigned: u8,

    /// The blockhash or durable nonce value (base58).
    pub recent_blockhash: String,

    /// Present when the first instruction advances a nonce account.
    pub durable_nonce: Option<DurableNonce>,

    /// Static account keys with their header-derived flags.
    pub account_keys: Vec<ParsedAccount>,

    /// Signatures in slot order (base58). Unsigned all-zero slots are `None`.
    pub signatures: Vec<Option<String>>,

    pub instructions: Vec<ParsedInstruction>,

    /// Lookup-table references (v0 only).
    pub lookups: Vec<ParsedLookup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAccount {
    pub address: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInstruction {
    /// `None` when the program is loaded from a lookup table.
    pub program_id: Option<String>,
    pub account_indices: Vec<u8>,
    /// Addresses for indices into the static list; `None` for lookup-loaded accounts.
    pub accounts: Vec<Option<String>>,
    /// Base64-encoded instruction data.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLookup {
    pub table: String,
    pub read_write: Vec<u8>,
    pub read_only: Vec<u8>,
}

/// Durable nonce information for nonce-based messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurableNonce {
    pub wallet_nonce_address: String,
    pub auth_wallet_address: String,
}

impl TryIntoJsValue for ParsedAccount {
    fn try_to_js_value(&self) -> std::result::Result<JsValue, JsConversionError> {
        js_obj!(
            "address" => self.address,
            "isSigner" => self.is_signer,
            "isWritable" => self.is_writable
        )
    }
}

impl TryIntoJsValue for ParsedInstruction {
    fn try_to_js_value(&self) -> std::result::Result<JsValue, JsConversionError> {
        js_obj!(
            "programId" => self.program_id,
            "accountIndices" => self.account_indices,
            "accounts" => self.accounts,
            "data" => self.data
        )
    }
}

impl TryIntoJsValue for ParsedLookup {
    fn try_to_js_value(&self) -> std::result::Result<JsValue, JsConversionError> {
        js_obj!(
            "accountKey" => self.table,
            "writableIndexes" => self.read_write,
            "readonlyIndexes" => self.read_only
        )
    }
}

impl TryIntoJsValue for DurableNonce {
    fn try_to_js_value(&self) -> std::result::Result<JsValue, JsConversionError> {
        js_obj!(
            "walletNonceAddress" => self.wallet_nonce_address,
            "authWalletAddress" => self.auth_wallet_address
        )
    }
}

impl TryIntoJsValue for ParsedMessage {
    fn try_to_js_value(&self) -> std::result::Result<JsValue, JsConversionError> {
        js_obj!(
            "version" => self.version,
            "feePayer" => self.fee_payer,
            "numSignatures" => self.num_signatures,
            "numReadonlySigned" => self.num_readonly_signed,
            "numReadonlyUnsigned" => self.num_readonly_unsigned,
            "recentBlockhash" => self.recent_blockhash,
            "durableNonce" => self.durable_nonce,
            "accountKeys" => self.account_keys,
            "signatures" => self.signatures,
            "instructions" => self.instructions,
            "lookups" => self.lookups
        )
    }
}

fn durable_nonce(instruction: &ParsedInstruction) -> Option<DurableNonce> {
    if instruction.program_id.as_deref() != Some(SYSTEM_PROGRAM_ID.to_string().as_str()) {
        return None;
    }
    let data = BASE64_STANDARD.decode(&instruction.data).ok()?;
    if data != ADVANCE_NONCE_DATA {
        return None;
    }
    // accounts: [nonce, recent_blockhashes_sysvar, authority]
    Some(DurableNonce {
        wallet_nonce_address: instruction.accounts.first()?.clone()?,
        auth_wallet_address: instruction.accounts.get(2)?.clone()?,
    })
}

/// Parse encoded message bytes (signed or not) into structured data.
pub fn parse_message(bytes: &[u8]) -> Result<ParsedMessage> {
    let view = MessageView::parse(bytes)?;
    let header = view.header();
    let static_accounts = view.static_accounts();
    let address = |index: u8| static_accounts.get(usize::from(index)).map(PublicKey::to_base58);

    let fee_payer = view
        .fee_payer()
        .ok_or_else(|| EncodingError::AccountNotFound("fee payer".to_string()))?;

    let account_keys = static_accounts
        .iter()
        .enumerate()
        .map(|(index, account)| ParsedAccount {
            address: account.to_base58(),
            is_signer: index < usize::from(header.count_signed),
            is_writable: view.is_writer_index(index),
        })
        .collect();

    let instructions = view
        .instructions()
        .iter()
        .map(|ix| ParsedInstruction {
            program_id: address(ix.program_index),
            account_indices: ix.account_indices.to_vec(),
            accounts: ix.account_indices.iter().map(|index| address(*index)).collect(),
            data: BASE64_STANDARD.encode(ix.data),
        })
        .collect::<Vec<_>>();

    let signatures = view
        .signatures()
        .map(|signature| {
            if signature.iter().all(|b| *b == 0) {
                None
            } else {
                Some(bs58::encode(signature).into_string())
            }
        })
        .collect();

    let lookups = view
        .lookups()
        .iter()
        .map(|lookup| ParsedLookup {
            table: lookup.table.to_base58(),
            read_write: lookup.read_write.clone(),
            read_only: lookup.read_only.clone(),
        })
        .collect();

    Ok(ParsedMessage {
        version: match view.version() {
            Version::Legacy => "legacy",
            Version::V0 => "v0",
        },
        fee_payer: fee_payer.to_base58(),
        num_signatures: header.count_signed,
        num_readonly_signed: header.count_signed_readonly,
        num_readonly_unsigned: header.count_unsigned_readonly,
        recent_blockhash: view.recent_blockhash().to_base58(),
        durable_nonce: instructions.first().and_then(durable_nonce),
        account_keys,
        signatures,
        instructions,
        lookups,
    })
}
