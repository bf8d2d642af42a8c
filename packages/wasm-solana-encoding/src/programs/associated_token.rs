//! Associated Token Account program.
//!
//! An associated token account is the canonical token account of a wallet for a
//! given mint, at an address derived from `[owner, token_program, mint]`.

use super::system::SYSTEM_PROGRAM_ID;
use super::sysvar::SYSVAR_RENT;
use crate::address::{derive_associated_token_address, AssociatedTokenAddress};
use crate::error::Result;
use crate::instruction::{AccountReference, Instruction};
use crate::pubkey::PublicKey;

/// `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: PublicKey = PublicKey::new([
    140, 151, 37, 143, 78, 36, 137, 241, 187, 61, 16, 41, 20, 142, 13, 131, 11, 90, 19, 153, 218,
    255, 16, 132, 4, 142, 123, 216, 219, 233, 248, 89,
]);

const CREATE: u8 = 0;
const CREATE_IDEMPOTENT: u8 = 1;

fn create_with(
    discriminator: u8,
    payer: PublicKey,
    owner: PublicKey,
    mint: PublicKey,
    token_program_id: PublicKey,
) -> Result<(Instruction, AssociatedTokenAddress)> {
    let ata = derive_associated_token_address(&owner, &mint, &token_program_id)?;
    let instruction = Instruction::new(
        ASSOCIATED_TOKEN_PROGRAM_ID,
        vec![
            AccountReference::signer_writer(payer),
            AccountReference::writer(ata.address),
            AccountReference::readonly(owner),
            AccountReference::readonly(mint),
            AccountReference::readonly(SYSTEM_PROGRAM_ID),
            AccountReference::readonly(token_program_id),
            AccountReference::readonly(SYSVAR_RENT),
        ],
        vec![discriminator],
    );
    Ok((instruction, ata))
}

/// Create `owner`'s associated token account for `mint`; fails on chain if it exists.
/// Accounts: [payer (signer, writable), ata (writable), owner, mint, system_program,
/// token_program, rent_sysvar]
pub fn create(
    payer: PublicKey,
    owner: PublicKey,
    mint: PublicKey,
    token_program_id: PublicKey,
) -> Result<(Instruction, AssociatedTokenAddress)> {
    create_with(CREATE, payer, owner, mint, token_program_id)
}

/// Like [`create`], but succeeds when the account already exists.
pub fn create_idempotent(
    payer: PublicKey,
    owner: PublicKey,
    mint: PublicKey,
    token_program_id: PublicKey,
) -> Result<(Instruction, AssociatedTokenAddress)> {
    create_with(CREATE_IDEMPOTENT, payer, owner, mint, token_program_id)
}
