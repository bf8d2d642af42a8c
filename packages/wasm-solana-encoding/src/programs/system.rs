//! System Program instruction builders.
//!
//! # Wire Format
//!
//! System instructions start with a 4-byte little-endian discriminator:
//! - 0: CreateAccount
//! - 1: Assign
//! - 2: Transfer
//! - 4: AdvanceNonceAccount
//! - 6: InitializeNonceAccount
//! - 8: Allocate

use super::sysvar::{SYSVAR_RECENT_BLOCKHASHES, SYSVAR_RENT};
use crate::instruction::{AccountReference, Instruction};
use crate::pubkey::PublicKey;

/// `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: PublicKey = PublicKey::new([0u8; 32]);

/// Size of a nonce account's data.
pub const NONCE_ACCOUNT_SPACE: u64 = 80;

const CREATE_ACCOUNT: u32 = 0;
const ASSIGN: u32 = 1;
const TRANSFER: u32 = 2;
const ADVANCE_NONCE_ACCOUNT: u32 = 4;
const INITIALIZE_NONCE_ACCOUNT: u32 = 6;
const ALLOCATE: u32 = 8;

fn data(discriminator: u32, payload: &[&[u8]]) -> Vec<u8> {
    let len = 4 + payload.iter().map(|part| part.len()).sum::<usize>();
    let mut data = Vec::with_capacity(len);
    data.extend_from_slice(&discriminator.to_le_bytes());
    for part in payload {
        data.extend_from_slice(part);
    }
    data
}

/// Create a new account owned by `owner`.
/// Accounts: [payer (signer, writable), new_account (signer, writable)]
pub fn create_account(
    payer: PublicKey,
    new_account: PublicKey,
    lamports: u64,
    space: u64,
    owner: PublicKey,
) -> Instruction {
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountReference::signer_writer(payer),
            AccountReference::signer_writer(new_account),
        ],
        data(
            CREATE_ACCOUNT,
            &[&lamports.to_le_bytes(), &space.to_le_bytes(), owner.as_ref()],
        ),
    )
}

/// Assign `account` to `owner`.
/// Accounts: [account (signer, writable)]
pub fn assign(account: PublicKey, owner: PublicKey) -> Instruction {
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![AccountReference::signer_writer(account)],
        data(ASSIGN, &[owner.as_ref()]),
    )
}

/// Transfer lamports.
/// Accounts: [from (signer, writable), to (writable)]
pub fn transfer(from: PublicKey, to: PublicKey, lamports: u64) -> Instruction {
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountReference::signer_writer(from),
            AccountReference::writer(to),
        ],
        data(TRANSFER, &[&lamports.to_le_bytes()]),
    )
}

/// Advance the stored nonce. Must be the first instruction of a durable-nonce message.
/// Accounts: [nonce (writable), recent_blockhashes_sysvar, authority (signer)]
pub fn advance_nonce_account(nonce: PublicKey, authority: PublicKey) -> Instruction {
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountReference::writer(nonce),
            AccountReference::readonly(SYSVAR_RECENT_BLOCKHASHES),
            AccountReference::signer(authority),
        ],
        data(ADVANCE_NONCE_ACCOUNT, &[]),
    )
}

/// Initialize a nonce account.
/// Accounts: [nonce (writable), recent_blockhashes_sysvar, rent_sysvar]
pub fn initialize_nonce_account(nonce: PublicKey, authority: PublicKey) -> Instruction {
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountReference::writer(nonce),
            AccountReference::readonly(SYSVAR_RECENT_BLOCKHASHES),
            AccountReference::readonly(SYSVAR_RENT),
        ],
        data(INITIALIZE_NONCE_ACCOUNT, &[authority.as_ref()]),
    )
}

/// Create and initialize a nonce account in one go.
pub fn create_nonce_account(
    payer: PublicKey,
    nonce: PublicKey,
    authority: PublicKey,
    lamports: u64,
) -> [Instruction; 2] {
    [
        create_account(payer, nonce, lamports, NONCE_ACCOUNT_SPACE, SYSTEM_PROGRAM_ID),
        initialize_nonce_account(nonce, authority),
    ]
}

/// Allocate `space` bytes of account data.
/// Accounts: [account (signer, writable)]
pub fn allocate(account: PublicKey, space: u64) -> Instruction {
    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![AccountReference::signer_writer(account)],
        data(ALLOCATE, &[&space.to_le_bytes()]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FROM: PublicKey = PublicKey::new([1u8; 32]);
    const TO: PublicKey = PublicKey::new([2u8; 32]);

    #[test]
    fn test_transfer() {
        let ix = transfer(FROM, TO, 100_000);
        assert_eq!(ix.program, SYSTEM_PROGRAM_ID);
        assert_eq!(
            hex::encode(ix.data.to_vec().unwrap()),
            "02000000a086010000000000"
        );
        assert_eq!(
            ix.accounts,
            vec![
                AccountReference::signer_writer(FROM),
                AccountReference::writer(TO)
            ]
        );
    }

    #[test]
    fn test_create_account_layout() {
        let owner = PublicKey::new([9u8; 32]);
        let ix = create_account(FROM, TO, 1_000_000, 165, owner);
        let data = ix.data.to_vec().unwrap();
        assert_eq!(data.len(), 52);
        assert_eq!(&data[..4], &[0, 0, 0, 0]);
        assert_eq!(&data[4..12], &1_000_000u64.to_le_bytes());
        assert_eq!(&data[12..20], &165u64.to_le_bytes());
        assert_eq!(&data[20..], owner.as_bytes());
        assert!(ix.accounts.iter().all(|r| r.is_signer && r.is_writer));
    }

    #[test]
    fn test_nonce_instructions() {
        let advance = advance_nonce_account(TO, FROM);
        assert_eq!(advance.data.to_vec().unwrap(), vec![4, 0, 0, 0]);
        assert_eq!(advance.accounts[1].account, SYSVAR_RECENT_BLOCKHASHES);
        assert!(advance.accounts[2].is_signer);

        let [create, initialize] = create_nonce_account(FROM, TO, FROM, 1_447_680);
        assert_eq!(
            &create.data.to_vec().unwrap()[12..20],
            &NONCE_ACCOUNT_SPACE.to_le_bytes()
        );
        let data = initialize.data.to_vec().unwrap();
        assert_eq!(&data[..4], &[6, 0, 0, 0]);
        assert_eq!(&data[4..], FROM.as_bytes());
        assert_eq!(initialize.accounts[2].account, SYSVAR_RENT);
    }

    #[test]
    fn test_assign_and_allocate() {
        let owner = PublicKey::new([9u8; 32]);
        assert_eq!(&assign(FROM, owner).data.to_vec().unwrap()[..4], &[1, 0, 0, 0]);
        assert_eq!(
            hex::encode(allocate(FROM, 200).data.to_vec().unwrap()),
            "08000000c800000000000000"
        );
    }
}
