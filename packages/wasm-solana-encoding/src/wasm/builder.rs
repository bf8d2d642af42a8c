//! WASM binding for message building.
//!
//! - `build_message` - encodes a message from a high-level intent structure
//! - `build_inner_instructions` - encodes instructions as a standalone legacy message

use crate::intent::{self, MessageIntent};
use crate::message::InnerInstructions;
use wasm_bindgen::prelude::*;

/// Namespace for message building operations.
#[wasm_bindgen]
pub struct BuilderNamespace;

#[wasm_bindgen]
impl BuilderNamespace {
    /// Build an unsigned message from an intent.
    ///
    /// ```json
    /// {
    ///   "feePayer": "<base58>",
    ///   "nonce": { "type": "durable", "address": "<base58>", "authority": "<base58>", "value": "<base58>" },
    ///   "version": "v0",
    ///   "instructions": [
    ///     { "type": "computeBudget", "unitPrice": 5000 },
    ///     { "type": "tokenTransfer", "source": "...", "destination": "...", "owner": "...",
    ///       "amount": "2500000", "mint": "...", "decimals": 6 }
    ///   ],
    ///   "lookupTables": [{ "address": "<base58>", "addresses": ["<base58>"] }]
    /// }
    /// ```
    ///
    /// `nonce.type` is `blockhash` (with `value`) or `durable`. A durable nonce puts an
    /// advance-nonce instruction first. `version` defaults to `legacy`, which ignores
    /// `lookupTables`.
    ///
    /// Instruction `type`s: `transfer`, `createAccount`, `nonceAdvance`,
    /// `nonceInitialize`, `allocate`, `assign`, `memo`, `computeBudget`,
    /// `tokenTransfer`, `createAta`, `closeAta`, `createLookupTable`,
    /// `extendLookupTable`, `custom`. Amounts are decimal strings; `custom.data` is base64.
    ///
    /// @param intent - The message intent as a plain object
    /// @returns Encoded message bytes with zeroed signature slots
    #[wasm_bindgen]
    pub fn build_message(intent: JsValue) -> Result<Vec<u8>, JsValue> {
        let intent: MessageIntent = serde_wasm_bindgen::from_value(intent)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse message intent: {}", e)))?;
        Ok(intent::build_message(intent)?)
    }

    /// Encode the instructions of an intent as a standalone legacy message with a
    /// zero blockhash. Only `feePayer` and `instructions` are used.
    #[wasm_bindgen]
    pub fn build_inner_instructions(intent: JsValue) -> Result<Vec<u8>, JsValue> {
        let intent: MessageIntent = serde_wasm_bindgen::from_value(intent)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse message intent: {}", e)))?;
        let builder = intent::message_builder(intent)?;
        let payer = builder.get_payer();
        Ok(InnerInstructions::build(payer, builder.get_instructions().to_vec())?)
    }
}
