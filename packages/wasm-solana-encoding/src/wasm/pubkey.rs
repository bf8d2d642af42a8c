//! WASM bindings for public key (address) operations.

use crate::error::EncodingError;
use crate::pubkey::PublicKey;
use wasm_bindgen::prelude::*;

/// WASM wrapper for a public key (address).
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmPubkey {
    inner: PublicKey,
}

#[wasm_bindgen]
impl WasmPubkey {
    /// Create a public key from a base58 string.
    #[wasm_bindgen]
    pub fn from_base58(address: &str) -> Result<WasmPubkey, EncodingError> {
        PublicKey::from_base58(address).map(|inner| WasmPubkey { inner })
    }

    /// Create a public key from raw bytes (32 bytes).
    #[wasm_bindgen]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmPubkey, EncodingError> {
        PublicKey::from_slice(bytes).map(|inner| WasmPubkey { inner })
    }

    #[wasm_bindgen]
    pub fn to_base58(&self) -> String {
        self.inner.to_base58()
    }

    /// Get as raw bytes (32 bytes).
    #[wasm_bindgen]
    pub fn to_bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.inner.as_bytes()[..])
    }

    #[wasm_bindgen]
    pub fn equals(&self, other: &WasmPubkey) -> bool {
        self.inner == other.inner
    }

    /// Check if this public key is on the Ed25519 curve.
    ///
    /// Program-derived addresses never are.
    #[wasm_bindgen]
    pub fn is_on_curve(&self) -> bool {
        self.inner.is_on_curve()
    }
}

impl WasmPubkey {
    pub fn from_inner(inner: PublicKey) -> Self {
        WasmPubkey { inner }
    }

    pub fn inner(&self) -> &PublicKey {
        &self.inner
    }
}
