//! SPL Token program instruction builders.
//!
//! # Wire Format
//!
//! Token instructions use a single-byte discriminator:
//! - 1: InitializeAccount
//! - 3: Transfer (u64 amount)
//! - 7: MintTo (u64 amount)
//! - 9: CloseAccount
//! - 12: TransferChecked (u64 amount, u8 decimals)
//!
//! Token-2022 shares these layouts, so every builder takes the program id.

use super::sysvar::SYSVAR_RENT;
use crate::instruction::{AccountReference, Instruction};
use crate::pubkey::PublicKey;

/// `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: PublicKey = PublicKey::new([
    6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133, 237,
    95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169,
]);

/// `TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb`
pub const TOKEN_2022_PROGRAM_ID: PublicKey = PublicKey::new([
    6, 221, 246, 225, 238, 117, 143, 222, 24, 66, 93, 188, 228, 108, 205, 218, 182, 26, 252, 77,
    131, 185, 13, 39, 254, 189, 249, 40, 216, 161, 139, 252,
]);

const INITIALIZE_ACCOUNT: u8 = 1;
const TRANSFER: u8 = 3;
const MINT_TO: u8 = 7;
const CLOSE_ACCOUNT: u8 = 9;
const TRANSFER_CHECKED: u8 = 12;

fn with_amount(discriminator: u8, amount: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(9);
    data.push(discriminator);
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

/// Initialize a token account for `mint` held by `owner`.
/// Accounts: [account (writable), mint, owner, rent_sysvar]
pub fn initialize_account(
    program_id: PublicKey,
    account: PublicKey,
    mint: PublicKey,
    owner: PublicKey,
) -> Instruction {
    Instruction::new(
        program_id,
        vec![
            AccountReference::writer(account),
            AccountReference::readonly(mint),
            AccountReference::readonly(owner),
            AccountReference::readonly(SYSVAR_RENT),
        ],
        vec![INITIALIZE_ACCOUNT],
    )
}

/// Move `amount` base units between token accounts.
/// Accounts: [source (writable), destination (writable), owner (signer)]
pub fn transfer(
    program_id: PublicKey,
    source: PublicKey,
    destination: PublicKey,
    owner: PublicKey,
    amount: u64,
) -> Instruction {
    Instruction::new(
        program_id,
        vec![
            AccountReference::writer(source),
            AccountReference::writer(destination),
            AccountReference::signer(owner),
        ],
        with_amount(TRANSFER, amount),
    )
}

/// Transfer that also asserts the mint and its decimals.
/// Accounts: [source (writable), mint, destination (writable), owner (signer)]
pub fn transfer_checked(
    program_id: PublicKey,
    source: PublicKey,
    mint: PublicKey,
    destination: PublicKey,
    owner: PublicKey,
    amount: u64,
    decimals: u8,
) -> Instruction {
    let mut data = with_amount(TRANSFER_CHECKED, amount);
    data.push(decimals);
    Instruction::new(
        program_id,
        vec![
            AccountReference::writer(source),
            AccountReference::readonly(mint),
            AccountReference::writer(destination),
            AccountReference::signer(owner),
        ],
        data,
    )
}

/// Accounts: [mint (writable), destination (writable), mint_authority (signer)]
pub fn mint_to(
    program_id: PublicKey,
    mint: PublicKey,
    destination: PublicKey,
    authority: PublicKey,
    amount: u64,
) -> Instruction {
    Instruction::new(
        program_id,
        vec![
            AccountReference::writer(mint),
            AccountReference::writer(destination),
            AccountReference::signer(authority),
        ],
        with_amount(MINT_TO, amount),
    )
}

/// Close an empty token account, sending its rent to `destination`.
/// Accounts: [account (writable), destination (writable), owner (signer)]
pub fn close_account(
    program_id: PublicKey,
    account: PublicKey,
    destination: PublicKey,
    owner: PublicKey,
) -> Instruction {
    Instruction::new(
        program_id,
        vec![
            AccountReference::writer(account),
            AccountReference::writer(destination),
            AccountReference::signer(owner),
        ],
        vec![CLOSE_ACCOUNT],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: PublicKey = PublicKey::new([1u8; 32]);
    const MINT: PublicKey = PublicKey::new([2u8; 32]);
    const DESTINATION: PublicKey = PublicKey::new([3u8; 32]);
    const OWNER: PublicKey = PublicKey::new([4u8; 32]);

    #[test]
    fn test_program_ids() {
        assert_eq!(
            TOKEN_PROGRAM_ID.to_string(),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
        assert_eq!(
            TOKEN_2022_PROGRAM_ID.to_string(),
            "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb"
        );
    }

    #[test]
    fn test_transfer() {
        let ix = transfer(TOKEN_PROGRAM_ID, SOURCE, DESTINATION, OWNER, 1_000);
        assert_eq!(hex::encode(ix.data.to_vec().unwrap()), "03e803000000000000");
        assert!(ix.accounts[0].is_writer && ix.accounts[1].is_writer);
        assert!(ix.accounts[2].is_signer && !ix.accounts[2].is_writer);
    }

    #[test]
    fn test_transfer_checked() {
        let ix = transfer_checked(
            TOKEN_2022_PROGRAM_ID,
            SOURCE,
            MINT,
            DESTINATION,
            OWNER,
            1_000,
            6,
        );
        assert_eq!(ix.program, TOKEN_2022_PROGRAM_ID);
        assert_eq!(
            hex::encode(ix.data.to_vec().unwrap()),
            "0ce80300000000000006"
        );
        let accounts: Vec<PublicKey> = ix.accounts.iter().map(|r| r.account).collect();
        assert_eq!(accounts, vec![SOURCE, MINT, DESTINATION, OWNER]);
    }

    #[test]
    fn test_single_byte_instructions() {
        let init = initialize_account(TOKEN_PROGRAM_ID, SOURCE, MINT, OWNER);
        assert_eq!(init.data.to_vec().unwrap(), vec![1]);
        assert_eq!(init.accounts[3].account, SYSVAR_RENT);

        let close = close_account(TOKEN_PROGRAM_ID, SOURCE, DESTINATION, OWNER);
        assert_eq!(close.data.to_vec().unwrap(), vec![9]);

        let mint = mint_to(TOKEN_PROGRAM_ID, MINT, DESTINATION, OWNER, 7);
        assert_eq!(mint.data.to_vec().unwrap()[0], 7);
    }
}
