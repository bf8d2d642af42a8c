//! Address Lookup Table program.
//!
//! # Wire Format
//!
//! Instructions start with a 4-byte little-endian discriminator:
//! - 0: CreateLookupTable (u64 recent slot, u8 bump)
//! - 1: FreezeLookupTable
//! - 2: ExtendLookupTable (u64 count, count x 32-byte address)
//! - 3: DeactivateLookupTable
//! - 4: CloseLookupTable

use super::system::SYSTEM_PROGRAM_ID;
use crate::address::{derive_program_address, ProgramDerivedAddress};
use crate::error::Result;
use crate::instruction::{AccountReference, Instruction};
use crate::pubkey::{PublicKey, Slot, PUBLIC_KEY_LENGTH};

/// `AddressLookupTab1e1111111111111111111111111`
pub const ADDRESS_LOOKUP_TABLE_PROGRAM_ID: PublicKey = PublicKey::new([
    2, 119, 166, 175, 151, 51, 155, 122, 200, 141, 24, 146, 201, 4, 70, 245, 0, 2, 48, 146, 102,
    246, 46, 83, 193, 24, 36, 73, 130, 0, 0, 0,
]);

const CREATE_LOOKUP_TABLE: u32 = 0;
const FREEZE_LOOKUP_TABLE: u32 = 1;
const EXTEND_LOOKUP_TABLE: u32 = 2;
const DEACTIVATE_LOOKUP_TABLE: u32 = 3;
const CLOSE_LOOKUP_TABLE: u32 = 4;

/// Address of the table `authority` creates at `recent_slot`.
pub fn derive_lookup_table_address(
    authority: &PublicKey,
    recent_slot: Slot,
) -> Result<ProgramDerivedAddress> {
    let slot = recent_slot.to_le_bytes();
    derive_program_address(&[authority.as_ref(), &slot], &ADDRESS_LOOKUP_TABLE_PROGRAM_ID)
}

/// Create a lookup table; returns the instruction and the new table's address.
/// Accounts: [table (writable), authority (signer), payer (signer, writable), system_program]
pub fn create_lookup_table(
    authority: PublicKey,
    payer: PublicKey,
    recent_slot: Slot,
) -> Result<(Instruction, PublicKey)> {
    let table = derive_lookup_table_address(&authority, recent_slot)?;
    let bump = table.nonce;
    let instruction = Instruction::with_writer(
        ADDRESS_LOOKUP_TABLE_PROGRAM_ID,
        vec![
            AccountReference::writer(table.address),
            AccountReference::signer(authority),
            AccountReference::signer_writer(payer),
            AccountReference::readonly(SYSTEM_PROGRAM_ID),
        ],
        13,
        move |writer| {
            writer.put_u32_le(CREATE_LOOKUP_TABLE)?;
            writer.put_u64_le(recent_slot.0)?;
            writer.put_u8(bump)
        },
    );
    Ok((instruction, table.address))
}

/// Append addresses to a table. A payer is only needed when the table must grow
/// beyond its current rent-exempt balance.
/// Accounts: [table (writable), authority (signer), payer (signer, writable)?, system_program?]
pub fn extend_lookup_table(
    table: PublicKey,
    authority: PublicKey,
    payer: Option<PublicKey>,
    addresses: Vec<PublicKey>,
) -> Instruction {
    let mut accounts = vec![
        AccountReference::writer(table),
        AccountReference::signer(authority),
    ];
    if let Some(payer) = payer {
        accounts.push(AccountReference::signer_writer(payer));
        accounts.push(AccountReference::readonly(SYSTEM_PROGRAM_ID));
    }
    let len = 12 + addresses.len() * PUBLIC_KEY_LENGTH;
    Instruction::with_writer(ADDRESS_LOOKUP_TABLE_PROGRAM_ID, accounts, len, move |writer| {
        writer.put_u32_le(EXTEND_LOOKUP_TABLE)?;
        writer.put_u64_le(addresses.len() as u64)?;
        addresses
            .iter()
            .try_for_each(|address| writer.put_pubkey(address))
    })
}

fn authority_only(discriminator: u32, table: PublicKey, authority: PublicKey) -> Instruction {
    Instruction::new(
        ADDRESS_LOOKUP_TABLE_PROGRAM_ID,
        vec![
            AccountReference::writer(table),
            AccountReference::signer(authority),
        ],
        discriminator.to_le_bytes().to_vec(),
    )
}

/// Permanently freeze a table. Accounts: [table (writable), authority (signer)]
pub fn freeze_lookup_table(table: PublicKey, authority: PublicKey) -> Instruction {
    authority_only(FREEZE_LOOKUP_TABLE, table, authority)
}

/// Start the cool-down that precedes closing. Accounts: [table (writable), authority (signer)]
pub fn deactivate_lookup_table(table: PublicKey, authority: PublicKey) -> Instruction {
    authority_only(DEACTIVATE_LOOKUP_TABLE, table, authority)
}

/// Close a deactivated table.
/// Accounts: [table (writable), authority (signer), recipient (writable)]
pub fn close_lookup_table(
    table: PublicKey,
    authority: PublicKey,
    recipient: PublicKey,
) -> Instruction {
    Instruction::new(
        ADDRESS_LOOKUP_TABLE_PROGRAM_ID,
        vec![
            AccountReference::writer(table),
            AccountReference::signer(authority),
            AccountReference::writer(recipient),
        ],
        CLOSE_LOOKUP_TABLE.to_le_bytes().to_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authority() -> PublicKey {
        "EYB1g5R8beNtVqDpKpmkKWtLdhBY8Wh7q3QT3U3fbw7y".parse().unwrap()
    }

    #[test]
    fn test_program_id() {
        assert_eq!(
            ADDRESS_LOOKUP_TABLE_PROGRAM_ID.to_string(),
            "AddressLookupTab1e1111111111111111111111111"
        );
    }

    #[test]
    fn test_create_lookup_table() {
        let payer = PublicKey::new([1u8; 32]);
        let (ix, table) = create_lookup_table(authority(), payer, Slot(265008810)).unwrap();
        assert_eq!(
            table.to_string(),
            "DmTtM8rQMcqR56ksBkayLd9KuYiFaGYZEAPnh5iUtgVV"
        );
        assert_eq!(
            hex::encode(ix.data.to_vec().unwrap()),
            "00000000aab6cb0f00000000ff"
        );
        assert_eq!(ix.accounts[0], AccountReference::writer(table));
        assert_eq!(ix.accounts[2], AccountReference::signer_writer(payer));
    }

    #[test]
    fn test_extend_lookup_table() {
        let table = PublicKey::new([20u8; 32]);
        let addresses = vec![PublicKey::new([5u8; 32]), PublicKey::new([6u8; 32])];

        let ix = extend_lookup_table(table, authority(), None, addresses.clone());
        assert_eq!(ix.accounts.len(), 2);
        let data = ix.data.to_vec().unwrap();
        assert_eq!(data.len(), 76);
        assert_eq!(&data[..12], &[2, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&data[12..44], addresses[0].as_bytes());

        let payer = PublicKey::new([1u8; 32]);
        let funded = extend_lookup_table(table, authority(), Some(payer), vec![]);
        assert_eq!(funded.accounts.len(), 4);
        assert_eq!(funded.accounts[3].account, SYSTEM_PROGRAM_ID);
    }

    #[test]
    fn test_lifecycle_instructions() {
        let table = PublicKey::new([20u8; 32]);
        let recipient = PublicKey::new([1u8; 32]);
        assert_eq!(
            freeze_lookup_table(table, authority()).data.to_vec().unwrap(),
            vec![1, 0, 0, 0]
        );
        assert_eq!(
            deactivate_lookup_table(table, authority()).data.to_vec().unwrap(),
            vec![3, 0, 0, 0]
        );
        let close = close_lookup_table(table, authority(), recipient);
        assert_eq!(close.data.to_vec().unwrap(), vec![4, 0, 0, 0]);
        assert_eq!(close.accounts[2], AccountReference::writer(recipient));
    }
}
