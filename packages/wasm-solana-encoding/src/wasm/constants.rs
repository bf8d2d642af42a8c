//! Well-known program and sysvar addresses exported via WASM.

use crate::programs::{
    address_lookup_table::ADDRESS_LOOKUP_TABLE_PROGRAM_ID,
    associated_token::ASSOCIATED_TOKEN_PROGRAM_ID,
    compute_budget::COMPUTE_BUDGET_PROGRAM_ID,
    memo::MEMO_PROGRAM_ID,
    system::{NONCE_ACCOUNT_SPACE, SYSTEM_PROGRAM_ID},
    sysvar::{SYSVAR_CLOCK, SYSVAR_INSTRUCTIONS, SYSVAR_RECENT_BLOCKHASHES, SYSVAR_RENT},
    token::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID},
};
use crate::message::PACKET_DATA_SIZE;
use wasm_bindgen::prelude::*;

/// System Program ID
#[wasm_bindgen]
pub fn system_program_id() -> String {
    SYSTEM_PROGRAM_ID.to_base58()
}

/// Compute Budget Program ID
#[wasm_bindgen]
pub fn compute_budget_program_id() -> String {
    COMPUTE_BUDGET_PROGRAM_ID.to_base58()
}

/// Memo Program ID
#[wasm_bindgen]
pub fn memo_program_id() -> String {
    MEMO_PROGRAM_ID.to_base58()
}

/// Token Program ID (SPL Token)
#[wasm_bindgen]
pub fn token_program_id() -> String {
    TOKEN_PROGRAM_ID.to_base58()
}

/// Token 2022 Program ID
#[wasm_bindgen]
pub fn token_2022_program_id() -> String {
    TOKEN_2022_PROGRAM_ID.to_base58()
}

/// Associated Token Account Program ID
#[wasm_bindgen]
pub fn ata_program_id() -> String {
    ASSOCIATED_TOKEN_PROGRAM_ID.to_base58()
}

/// Address Lookup Table Program ID
#[wasm_bindgen]
pub fn address_lookup_table_program_id() -> String {
    ADDRESS_LOOKUP_TABLE_PROGRAM_ID.to_base58()
}

#[wasm_bindgen]
pub fn sysvar_clock() -> String {
    SYSVAR_CLOCK.to_base58()
}

#[wasm_bindgen]
pub fn sysvar_rent() -> String {
    SYSVAR_RENT.to_base58()
}

/// Sysvar Recent Blockhashes address, required by nonce instructions
#[wasm_bindgen]
pub fn sysvar_recent_blockhashes() -> String {
    SYSVAR_RECENT_BLOCKHASHES.to_base58()
}

#[wasm_bindgen]
pub fn sysvar_instructions() -> String {
    SYSVAR_INSTRUCTIONS.to_base58()
}

/// Nonce account space in bytes (80)
#[wasm_bindgen]
pub fn nonce_account_space() -> u64 {
    NONCE_ACCOUNT_SPACE
}

/// Largest encoded message that fits a single packet (1232)
#[wasm_bindgen]
pub fn max_message_size() -> usize {
    PACKET_DATA_SIZE
}
