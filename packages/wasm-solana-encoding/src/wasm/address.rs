//! WASM bindings for address derivation.

use crate::address::{self, AssociatedTokenAddress, ProgramDerivedAddress};
use crate::js_obj;
use crate::programs::address_lookup_table::derive_lookup_table_address;
use crate::programs::token::TOKEN_PROGRAM_ID;
use crate::pubkey::{PublicKey, Slot};
use crate::wasm::try_into_js_value::{JsConversionError, TryIntoJsValue};
use wasm_bindgen::prelude::*;

impl TryIntoJsValue for ProgramDerivedAddress {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "address" => self.address,
            "programId" => self.program_id,
            "nonce" => self.nonce
        )
    }
}

impl TryIntoJsValue for AssociatedTokenAddress {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "address" => self.address,
            "owner" => self.owner,
            "mint" => self.mint,
            "tokenProgramId" => self.token_program_id,
            "nonce" => self.nonce
        )
    }
}

fn parse_address(field: &str, value: &str) -> Result<PublicKey, JsValue> {
    PublicKey::from_base58(value)
        .map_err(|_| JsValue::from_str(&format!("Invalid {}: {}", field, value)))
}

/// Namespace for address derivation.
#[wasm_bindgen]
pub struct AddressNamespace;

#[wasm_bindgen]
impl AddressNamespace {
    /// Find the program-derived address for `seeds`, searching bumps from 255 down.
    ///
    /// @param seeds - Array of Uint8Array seeds (at most 15, each at most 32 bytes)
    /// @param program_id - Owning program (base58)
    /// @returns `{ address, programId, nonce }`
    #[wasm_bindgen]
    pub fn derive_program_address(
        seeds: &js_sys::Array,
        program_id: &str,
    ) -> Result<JsValue, JsValue> {
        let program_id = parse_address("program ID", program_id)?;
        let seeds: Vec<Vec<u8>> = seeds
            .iter()
            .map(|seed| js_sys::Uint8Array::new(&seed).to_vec())
            .collect();
        let seeds: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
        let derived = address::derive_program_address(&seeds, &program_id)?;
        Ok(derived.try_to_js_value()?)
    }

    /// Derive the associated token account of a wallet for a mint.
    ///
    /// @param owner - Wallet address (base58)
    /// @param mint - Token mint (base58)
    /// @param token_program_id - Token program (base58), defaults to the SPL Token program
    /// @returns `{ address, owner, mint, tokenProgramId, nonce }`
    #[wasm_bindgen]
    pub fn derive_associated_token_address(
        owner: &str,
        mint: &str,
        token_program_id: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let owner = parse_address("owner", owner)?;
        let mint = parse_address("mint", mint)?;
        let token_program_id = match token_program_id {
            Some(id) => parse_address("token program ID", &id)?,
            None => TOKEN_PROGRAM_ID,
        };
        let derived = address::derive_associated_token_address(&owner, &mint, &token_program_id)?;
        Ok(derived.try_to_js_value()?)
    }

    /// Derive the address of the lookup table `authority` creates at `recent_slot`.
    ///
    /// @returns `{ address, programId, nonce }`
    #[wasm_bindgen]
    pub fn derive_lookup_table_address(
        authority: &str,
        recent_slot: u64,
    ) -> Result<JsValue, JsValue> {
        let authority = parse_address("authority", authority)?;
        let derived = derive_lookup_table_address(&authority, Slot(recent_slot))?;
        Ok(derived.try_to_js_value()?)
    }
}
