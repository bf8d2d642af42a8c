//! WASM binding for high-level message parsing.

use crate::parser;
use crate::wasm::try_into_js_value::TryIntoJsValue;
use wasm_bindgen::prelude::*;

/// Namespace for message parsing operations.
#[wasm_bindgen]
pub struct ParserNamespace;

#[wasm_bindgen]
impl ParserNamespace {
    /// Parse an encoded message (signed or not) into structured data.
    ///
    /// Returns an object with:
    /// - `version`: "legacy" or "v0"
    /// - `feePayer`, `recentBlockhash`: base58 strings
    /// - `numSignatures`, `numReadonlySigned`, `numReadonlyUnsigned`: header counts
    /// - `durableNonce`: `{ walletNonceAddress, authWalletAddress }` when the first
    ///   instruction advances a nonce account
    /// - `accountKeys`: array of `{ address, isSigner, isWritable }`
    /// - `signatures`: base58 strings, `undefined` for empty slots
    /// - `instructions`: array of `{ programId, accountIndices, accounts, data }`
    ///   with base64 `data`
    /// - `lookups`: array of `{ accountKey, writableIndexes, readonlyIndexes }`
    ///
    /// @param bytes - The encoded message bytes
    #[wasm_bindgen]
    pub fn parse_message(bytes: &[u8]) -> Result<JsValue, JsValue> {
        let parsed = parser::parse_message(bytes)?;
        Ok(parsed.try_to_js_value()?)
    }
}
