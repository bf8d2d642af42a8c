//! WASM binding for encoded messages.
//!
//! `WasmMessage` owns the encoded bytes. They are validated on construction and
//! re-viewed on each accessor.

use crate::error::EncodingError;
use crate::message::{MessageView, Version};
use crate::parser;
use crate::pubkey::PublicKey;
use crate::signer;
use crate::wasm::try_into_js_value::TryIntoJsValue;
use base64::prelude::*;
use wasm_bindgen::prelude::*;

/// An encoded message (legacy or v0) with its signature slots.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmMessage {
    bytes: Vec<u8>,
}

impl WasmMessage {
    fn view(&self) -> Result<MessageView<'_>, EncodingError> {
        MessageView::parse(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[wasm_bindgen]
impl WasmMessage {
    /// Wrap encoded message bytes.
    #[wasm_bindgen]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmMessage, EncodingError> {
        MessageView::parse(bytes)?;
        Ok(WasmMessage {
            bytes: bytes.to_vec(),
        })
    }

    /// Wrap a base64-encoded message.
    #[wasm_bindgen]
    pub fn from_base64(encoded: &str) -> Result<WasmMessage, JsValue> {
        let bytes = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| JsValue::from_str(&format!("Invalid base64: {}", e)))?;
        Ok(WasmMessage::from_bytes(&bytes)?)
    }

    /// "legacy" or "v0"
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> Result<String, EncodingError> {
        Ok(match self.view()?.version() {
            Version::Legacy => "legacy",
            Version::V0 => "v0",
        }
        .to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn fee_payer(&self) -> Result<Option<String>, EncodingError> {
        Ok(self.view()?.fee_payer().map(|payer| payer.to_base58()))
    }

    #[wasm_bindgen(getter)]
    pub fn recent_blockhash(&self) -> Result<String, EncodingError> {
        Ok(self.view()?.recent_blockhash().to_base58())
    }

    #[wasm_bindgen(getter)]
    pub fn num_signatures(&self) -> Result<usize, EncodingError> {
        Ok(self.view()?.signatures().count())
    }

    #[wasm_bindgen(getter)]
    pub fn num_instructions(&self) -> Result<usize, EncodingError> {
        Ok(self.view()?.instructions().len())
    }

    /// Required signers in signature-slot order (base58).
    #[wasm_bindgen]
    pub fn signers(&self) -> Result<Vec<String>, EncodingError> {
        Ok(self
            .view()?
            .signers()
            .iter()
            .map(PublicKey::to_base58)
            .collect())
    }

    /// The bytes every signer signs: everything after the signature slots.
    #[wasm_bindgen]
    pub fn signable_payload(&self) -> Result<js_sys::Uint8Array, EncodingError> {
        Ok(js_sys::Uint8Array::from(self.view()?.transaction()))
    }

    /// Current contents of `account`'s signature slot.
    ///
    /// @param account - Signer address (base58)
    #[wasm_bindgen]
    pub fn signature(&self, account: &str) -> Result<js_sys::Uint8Array, EncodingError> {
        let account = PublicKey::from_base58(account)?;
        Ok(js_sys::Uint8Array::from(self.view()?.signature(&account)?))
    }

    /// Place an externally produced 64-byte signature into `account`'s slot.
    ///
    /// @param account - Signer address (base58)
    /// @param signature - Raw ed25519 signature (64 bytes)
    #[wasm_bindgen]
    pub fn add_signature(&mut self, account: &str, signature: &[u8]) -> Result<(), EncodingError> {
        let account = PublicKey::from_base58(account)?;
        signer::add_signature(&mut self.bytes, &account, signature)
    }

    #[wasm_bindgen]
    pub fn is_signer(&self, account: &str) -> Result<bool, EncodingError> {
        let account = PublicKey::from_base58(account)?;
        Ok(self.view()?.is_signer(&account))
    }

    /// Writability of a static account. Lookup-table accounts are not considered.
    #[wasm_bindgen]
    pub fn is_writer(&self, account: &str) -> Result<bool, EncodingError> {
        let account = PublicKey::from_base58(account)?;
        Ok(self.view()?.is_writer(&account))
    }

    /// Parse into the same structure as `ParserNamespace.parse_message`.
    #[wasm_bindgen]
    pub fn parse(&self) -> Result<JsValue, JsValue> {
        let parsed = parser::parse_message(&self.bytes)?;
        Ok(parsed.try_to_js_value()?)
    }

    #[wasm_bindgen]
    pub fn to_bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.bytes.as_slice())
    }

    #[wasm_bindgen]
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }
}
