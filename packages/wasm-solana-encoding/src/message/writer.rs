use super::{Version, MESSAGE_VERSION_PREFIX, SIGNATURE_LENGTH};
use crate::accounts::{Accounts, LookupEntry};
use crate::cursor::BufferWriter;
use crate::error::{EncodingError, Result};
use crate::instruction::Instruction;
use crate::pubkey::{Blockhash, PublicKey};
use std::collections::BTreeMap;

/// Serialize a resolved message into `buffer`, returning the number of bytes written.
///
/// The signature region is reserved but not touched, so whatever the caller
/// pre-filled stays in place. On error the buffer contents are unspecified.
pub fn write_message(
    version: Version,
    accounts: &Accounts,
    recent_blockhash: &Blockhash,
    instructions: &[Instruction],
    buffer: &mut [u8],
) -> Result<usize> {
    let mut writer = BufferWriter::new(buffer);
    let count_signed = accounts.count_signed();

    writer.put_len(usize::from(count_signed))?;
    writer.reserve(usize::from(count_signed) * SIGNATURE_LENGTH)?;

    match version {
        Version::Legacy => {
            // a legacy first header byte must keep its top bit clear
            if count_signed & MESSAGE_VERSION_PREFIX != 0 {
                return Err(EncodingError::AccountIndexOverflow(usize::from(count_signed)));
            }
            if !accounts.lookup_entries().is_empty() {
                return Err(EncodingError::LookupTablesRequireV0);
            }
        }
        Version::V0 => writer.put_u8(MESSAGE_VERSION_PREFIX)?,
    }
    writer.put_u8(count_signed)?;
    writer.put_u8(accounts.count_signed_readonly())?;
    writer.put_u8(accounts.count_unsigned_readonly())?;

    writer.put_len(accounts.static_accounts().len())?;
    for account in accounts.static_accounts() {
        writer.put_pubkey(account)?;
    }

    writer.put_bytes(recent_blockhash.as_bytes())?;

    let indices = accounts.flattened_indices();
    writer.put_len(instructions.len())?;
    for instruction in instructions {
        write_instruction(&mut writer, instruction, &indices)?;
    }

    if version == Version::V0 {
        write_lookups(&mut writer, accounts.lookup_entries())?;
    }

    Ok(writer.position())
}

fn account_index(indices: &BTreeMap<PublicKey, usize>, account: &PublicKey) -> Result<u8> {
    let index = *indices
        .get(account)
        .ok_or_else(|| EncodingError::AccountNotFound(account.to_string()))?;
    u8::try_from(index).map_err(|_| EncodingError::AccountIndexOverflow(index))
}

fn write_instruction(
    writer: &mut BufferWriter<'_>,
    instruction: &Instruction,
    indices: &BTreeMap<PublicKey, usize>,
) -> Result<()> {
    writer.put_u8(account_index(indices, &instruction.program)?)?;

    writer.put_len(instruction.accounts.len())?;
    for reference in &instruction.accounts {
        writer.put_u8(account_index(indices, &reference.account)?)?;
    }

    writer.put_len(instruction.data.len())?;
    instruction.data.write_to(writer)
}

fn write_lookups(writer: &mut BufferWriter<'_>, entries: &[LookupEntry]) -> Result<()> {
    writer.put_len(entries.len())?;
    for entry in entries {
        writer.put_pubkey(&entry.table)?;
        writer.put_len(entry.read_write.len())?;
        for lookup in &entry.read_write {
            writer.put_varint(u64::from(lookup.index))?;
        }
        writer.put_len(entry.read_only.len())?;
        for lookup in &entry.read_only {
            writer.put_varint(u64::from(lookup.index))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::AccountReference;
    use crate::lookup::AddressLookupTable;

    const PAYER: PublicKey = PublicKey::new([1u8; 32]);
    const BLOCKHASH: Blockhash = Blockhash::new([2u8; 32]);
    const PROGRAM1: PublicKey = PublicKey::new([3u8; 32]);
    const ACCOUNT1: PublicKey = PublicKey::new([5u8; 32]);
    const ACCOUNT2: PublicKey = PublicKey::new([6u8; 32]);
    const TABLE: PublicKey = PublicKey::new([20u8; 32]);

    fn sample_instruction() -> Instruction {
        Instruction::new(
            PROGRAM1,
            vec![
                AccountReference::signer_writer(ACCOUNT1),
                AccountReference::readonly(ACCOUNT2),
            ],
            vec![13u8; 10],
        )
    }

    #[test]
    fn test_legacy_layout() {
        let instructions = [sample_instruction()];
        let accounts = Accounts::resolve(&instructions, &PAYER).unwrap();
        let mut buffer = [0u8; 512];
        let len =
            write_message(Version::Legacy, &accounts, &BLOCKHASH, &instructions, &mut buffer)
                .unwrap();

        let mut expected = vec![2u8];
        expected.extend_from_slice(&[0u8; 128]);
        expected.extend_from_slice(&[2, 0, 2]);
        expected.push(4);
        for key in [PAYER, ACCOUNT1, PROGRAM1, ACCOUNT2] {
            expected.extend_from_slice(key.as_bytes());
        }
        expected.extend_from_slice(BLOCKHASH.as_bytes());
        expected.extend_from_slice(&[1, 2, 2, 1, 3, 10]);
        expected.extend_from_slice(&[13u8; 10]);

        assert_eq!(&buffer[..len], expected.as_slice());
    }

    #[test]
    fn test_v0_layout_with_lookup() {
        let instructions = [sample_instruction()];
        let mut table_addresses = vec![PublicKey::new([99u8; 32]); 5];
        table_addresses.push(ACCOUNT2);
        let tables = [AddressLookupTable::new(TABLE, table_addresses)];
        let accounts = Accounts::resolve_with_lookups(&instructions, &PAYER, &tables).unwrap();

        let mut buffer = [0u8; 512];
        let len = write_message(Version::V0, &accounts, &BLOCKHASH, &instructions, &mut buffer)
            .unwrap();

        let mut expected = vec![2u8];
        expected.extend_from_slice(&[0u8; 128]);
        expected.extend_from_slice(&[0x80, 2, 0, 1]);
        expected.push(3);
        for key in [PAYER, ACCOUNT1, PROGRAM1] {
            expected.extend_from_slice(key.as_bytes());
        }
        expected.extend_from_slice(BLOCKHASH.as_bytes());
        expected.extend_from_slice(&[1, 2, 2, 1, 3, 10]);
        expected.extend_from_slice(&[13u8; 10]);
        expected.push(1);
        expected.extend_from_slice(TABLE.as_bytes());
        expected.extend_from_slice(&[0, 1, 5]);

        assert_eq!(&buffer[..len], expected.as_slice());
    }

    #[test]
    fn test_legacy_rejects_lookup_entries() {
        let instructions = [sample_instruction()];
        let tables = [AddressLookupTable::new(TABLE, vec![ACCOUNT2])];
        let accounts = Accounts::resolve_with_lookups(&instructions, &PAYER, &tables).unwrap();
        let mut buffer = [0u8; 512];
        assert_eq!(
            write_message(Version::Legacy, &accounts, &BLOCKHASH, &instructions, &mut buffer),
            Err(EncodingError::LookupTablesRequireV0)
        );
    }

    #[test]
    fn test_signature_prefill_is_preserved() {
        let instructions = [sample_instruction()];
        let accounts = Accounts::resolve(&instructions, &PAYER).unwrap();
        let mut buffer = [0xeeu8; 512];
        write_message(Version::Legacy, &accounts, &BLOCKHASH, &instructions, &mut buffer).unwrap();
        assert_eq!(buffer[0], 2);
        assert!(buffer[1..129].iter().all(|b| *b == 0xee));
    }

    #[test]
    fn test_buffer_too_small() {
        let instructions = [sample_instruction()];
        let accounts = Accounts::resolve(&instructions, &PAYER).unwrap();
        let mut buffer = [0u8; 200];
        assert!(matches!(
            write_message(Version::Legacy, &accounts, &BLOCKHASH, &instructions, &mut buffer),
            Err(EncodingError::BufferOverflow { .. })
        ));
    }
}
