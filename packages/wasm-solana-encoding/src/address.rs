//! Program-derived and associated-token address derivation.
//!
//! A program-derived address is `sha256(seeds || bump || program_id || marker)`
//! for the highest bump in `255..=1` whose hash is not a valid ed25519 point.

use crate::error::{EncodingError, Result};
use crate::programs::associated_token::ASSOCIATED_TOKEN_PROGRAM_ID;
use crate::pubkey::{bytes_are_curve_point, PublicKey};
use log::{debug, trace};
use sha2::{Digest, Sha256};

/// Maximum number of seeds, bump excluded.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

/// Result of a successful bump search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramDerivedAddress {
    pub address: PublicKey,
    pub program_id: PublicKey,
    pub nonce: u8,
}

/// An associated token account together with the inputs it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociatedTokenAddress {
    pub address: PublicKey,
    pub owner: PublicKey,
    pub mint: PublicKey,
    pub token_program_id: PublicKey,
    pub nonce: u8,
}

fn validate_seeds(seeds: &[&[u8]]) -> Result<()> {
    if seeds.len() > MAX_SEEDS {
        return Err(EncodingError::InvalidSeeds("too many seeds"));
    }
    if seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(EncodingError::InvalidSeeds("seed exceeds 32 bytes"));
    }
    Ok(())
}

fn hash_candidate(seeds: &[&[u8]], bump: Option<u8>, program_id: &PublicKey) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    if let Some(bump) = bump {
        hasher.update([bump]);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);
    hasher.finalize().into()
}

/// Hash `seeds` (bump already included) into an address, rejecting on-curve results.
pub fn create_program_address(seeds: &[&[u8]], program_id: &PublicKey) -> Result<PublicKey> {
    validate_seeds(seeds)?;
    let hash = hash_candidate(seeds, None, program_id);
    if bytes_are_curve_point(&hash) {
        return Err(EncodingError::InvalidSeeds("derived address is on the curve"));
    }
    Ok(PublicKey::new(hash))
}

/// Search bumps from 255 down to 1 for the first off-curve address.
pub fn derive_program_address(
    seeds: &[&[u8]],
    program_id: &PublicKey,
) -> Result<ProgramDerivedAddress> {
    validate_seeds(seeds)?;
    // the bump is appended as one more seed
    if seeds.len() == MAX_SEEDS {
        return Err(EncodingError::InvalidSeeds("too many seeds"));
    }

    for bump in (1..=u8::MAX).rev() {
        let hash = hash_candidate(seeds, Some(bump), program_id);
        if !bytes_are_curve_point(&hash) {
            debug!("derived program address with bump {}", bump);
            return Ok(ProgramDerivedAddress {
                address: PublicKey::new(hash),
                program_id: *program_id,
                nonce: bump,
            });
        }
        trace!("bump {} is on curve", bump);
    }
    Err(EncodingError::DerivationExhausted)
}

/// Derive the associated token account of `owner` for `mint`.
pub fn derive_associated_token_address(
    owner: &PublicKey,
    mint: &PublicKey,
    token_program_id: &PublicKey,
) -> Result<AssociatedTokenAddress> {
    let seeds: [&[u8]; 3] = [
        owner.as_ref(),
        token_program_id.as_ref(),
        mint.as_ref(),
    ];
    let derived = derive_program_address(&seeds, &ASSOCIATED_TOKEN_PROGRAM_ID)?;
    Ok(AssociatedTokenAddress {
        address: derived.address,
        owner: *owner,
        mint: *mint,
        token_program_id: *token_program_id,
        nonce: derived.nonce,
    })
}
