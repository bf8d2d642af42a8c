//! Zero-copy views over encoded messages.
//!
//! Parsing borrows the buffer: account keys, signatures, account-index lists and
//! instruction data are slices of the original bytes. Only lookup-table index
//! lists (varint encoded) are decoded into owned vectors.

use super::{Version, MESSAGE_VERSION_PREFIX, SIGNATURE_LENGTH};
use crate::cursor::Cursor;
use crate::error::{EncodingError, Result};
use crate::lookup::AddressLookupTable;
use crate::pubkey::{Blockhash, PublicKey, PUBLIC_KEY_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub count_signed: u8,
    pub count_signed_readonly: u8,
    pub count_unsigned_readonly: u8,
}

/// An instruction as encoded: indices into the flattened account list plus raw data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionView<'a> {
    pub program_index: u8,
    pub account_indices: &'a [u8],
    pub data: &'a [u8],
}

/// An instruction with its indices resolved to addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstruction<'a> {
    pub program: PublicKey,
    pub accounts: Vec<PublicKey>,
    pub data: &'a [u8],
}

/// One lookup-table reference from a v0 trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupView {
    pub table: PublicKey,
    pub read_write: Vec<u8>,
    pub read_only: Vec<u8>,
}

/// Fields common to every message version.
#[derive(Debug, Clone)]
pub struct MessageParts<'a> {
    signatures: &'a [u8],
    transaction: &'a [u8],
    message_offset: usize,
    header: MessageHeader,
    static_accounts: &'a [u8],
    recent_blockhash: Blockhash,
    instructions: Vec<InstructionView<'a>>,
}

#[derive(Debug, Clone)]
pub struct LegacyMessage<'a> {
    pub parts: MessageParts<'a>,
}

#[derive(Debug, Clone)]
pub struct V0Message<'a> {
    pub parts: MessageParts<'a>,
    pub lookups: Vec<LookupView>,
}

/// A parsed message of either version.
#[derive(Debug, Clone)]
pub enum MessageView<'a> {
    Legacy(LegacyMessage<'a>),
    V0(V0Message<'a>),
}

// =============================================================================
// Parsing
// =============================================================================

fn read_instruction<'a>(cursor: &mut Cursor<'a>) -> Result<InstructionView<'a>> {
    let program_index = cursor.read_u8()?;
    let count = cursor.read_len()?;
    let account_indices = cursor.read_bytes(count)?;
    let len = cursor.read_len()?;
    let data = cursor.read_bytes(len)?;
    Ok(InstructionView {
        program_index,
        account_indices,
        data,
    })
}

fn read_lookup_indices(cursor: &mut Cursor<'_>) -> Result<Vec<u8>> {
    let count = cursor.read_len()?;
    let mut indices = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        let index = cursor.read_len()?;
        indices.push(u8::try_from(index).map_err(|_| EncodingError::LookupIndexOverflow(index))?);
    }
    Ok(indices)
}

fn read_lookups(cursor: &mut Cursor<'_>) -> Result<Vec<LookupView>> {
    let count = cursor.read_len()?;
    let mut lookups = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        let table = cursor.read_pubkey()?;
        let read_write = read_lookup_indices(cursor)?;
        let read_only = read_lookup_indices(cursor)?;
        lookups.push(LookupView {
            table,
            read_write,
            read_only,
        });
    }
    Ok(lookups)
}

impl<'a> MessageView<'a> {
    /// Parse a signed or unsigned message of either version.
    pub fn parse(bytes: &'a [u8]) -> Result<MessageView<'a>> {
        let mut cursor = Cursor::new(bytes);

        let signature_count = cursor.read_len()?;
        let signatures_len = signature_count
            .checked_mul(SIGNATURE_LENGTH)
            .ok_or(EncodingError::Truncated)?;
        let signatures = cursor.read_bytes(signatures_len)?;
        let message_offset = cursor.position();

        let first = cursor.read_u8()?;
        let (version, count_signed) = if first == MESSAGE_VERSION_PREFIX {
            (Version::V0, cursor.read_u8()?)
        } else if first & MESSAGE_VERSION_PREFIX == 0 {
            (Version::Legacy, first)
        } else {
            return Err(EncodingError::UnsupportedFormat(first));
        };
        let header = MessageHeader {
            count_signed,
            count_signed_readonly: cursor.read_u8()?,
            count_unsigned_readonly: cursor.read_u8()?,
        };

        let account_count = cursor.read_len()?;
        let static_accounts = cursor.read_bytes(
            account_count
                .checked_mul(PUBLIC_KEY_LENGTH)
                .ok_or(EncodingError::Truncated)?,
        )?;
        let recent_blockhash = Blockhash::new(*cursor.read_array::<32>()?);

        let instruction_count = cursor.read_len()?;
        let mut instructions = Vec::with_capacity(instruction_count.min(cursor.remaining()));
        for _ in 0..instruction_count {
            instructions.push(read_instruction(&mut cursor)?);
        }

        let lookups = match version {
            Version::Legacy => Vec::new(),
            Version::V0 => read_lookups(&mut cursor)?,
        };
        if cursor.remaining() != 0 {
            return Err(EncodingError::TrailingBytes(cursor.remaining()));
        }

        let parts = MessageParts {
            signatures,
            transaction: &bytes[message_offset..],
            message_offset,
            header,
            static_accounts,
            recent_blockhash,
            instructions,
        };

        Ok(match version {
            Version::Legacy => MessageView::Legacy(LegacyMessage { parts }),
            Version::V0 => MessageView::V0(V0Message { parts, lookups }),
        })
    }

    pub fn parts(&self) -> &MessageParts<'a> {
        match self {
            MessageView::Legacy(message) => &message.parts,
            MessageView::V0(message) => &message.parts,
        }
    }

    pub fn version(&self) -> Version {
        match self {
            MessageView::Legacy(_) => Version::Legacy,
            MessageView::V0(_) => Version::V0,
        }
    }

    /// Lookup-table references; always empty for legacy messages.
    pub fn lookups(&self) -> &[LookupView] {
        match self {
            MessageView::Legacy(_) => &[],
            MessageView::V0(message) => &message.lookups,
        }
    }

    pub fn header(&self) -> MessageHeader {
        self.parts().header
    }

    pub fn fee_payer(&self) -> Option<PublicKey> {
        static_account(self.parts(), 0)
    }

    pub fn recent_blockhash(&self) -> Blockhash {
        self.parts().recent_blockhash
    }

    pub fn static_accounts(&self) -> Vec<PublicKey> {
        static_accounts(self.parts()).collect()
    }

    pub fn static_account_count(&self) -> usize {
        self.parts().static_accounts.len() / PUBLIC_KEY_LENGTH
    }

    /// Accounts required to sign, in signature-slot order.
    pub fn signers(&self) -> Vec<PublicKey> {
        static_accounts(self.parts())
            .take(usize::from(self.header().count_signed))
            .collect()
    }

    /// The bytes that signatures are computed over (everything after the signature region).
    pub fn transaction(&self) -> &'a [u8] {
        self.parts().transaction
    }

    /// Offset of the unsigned transaction bytes within the parsed buffer.
    pub fn message_offset(&self) -> usize {
        self.parts().message_offset
    }

    pub fn signatures(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let signatures: &'a [u8] = self.parts().signatures;
        signatures.chunks_exact(SIGNATURE_LENGTH)
    }

    pub fn signature(&self, account: &PublicKey) -> Result<&'a [u8]> {
        signature_of(self.parts(), account)
    }

    pub fn instructions(&self) -> &[InstructionView<'a>] {
        &self.parts().instructions
    }

    pub fn is_signer(&self, account: &PublicKey) -> bool {
        static_position(self.parts(), account)
            .is_some_and(|index| index < usize::from(self.header().count_signed))
    }

    /// Writer predicate for statically listed accounts.
    pub fn is_writer(&self, account: &PublicKey) -> bool {
        static_position(self.parts(), account)
            .is_some_and(|index| self.is_writer_index(index))
    }

    /// Writer predicate by position in the flattened account list.
    pub fn is_writer_index(&self, index: usize) -> bool {
        let static_len = self.static_account_count();
        if index < static_len {
            return static_is_writer(&self.header(), static_len, index);
        }
        let mut offset = static_len;
        for lookup in self.lookups() {
            let read_only_start = offset + lookup.read_write.len();
            if index < read_only_start {
                return true;
            }
            offset = read_only_start + lookup.read_only.len();
            if index < offset {
                return false;
            }
        }
        false
    }

    /// Writer predicate for any account, resolving lookup-loaded ones through `tables`.
    pub fn is_writer_resolved(
        &self,
        account: &PublicKey,
        tables: &[AddressLookupTable],
    ) -> Result<bool> {
        let accounts = self.accounts(tables)?;
        Ok(accounts
            .iter()
            .position(|key| key == account)
            .is_some_and(|index| self.is_writer_index(index)))
    }

    /// The flattened account list: static accounts then lookup-loaded ones.
    ///
    /// Legacy messages ignore `tables`. V0 messages need every table they reference.
    pub fn accounts(&self, tables: &[AddressLookupTable]) -> Result<Vec<PublicKey>> {
        let mut accounts = self.static_accounts();
        for lookup in self.lookups() {
            let table = tables
                .iter()
                .find(|table| table.address == lookup.table)
                .ok_or_else(|| EncodingError::LookupTableMissing(lookup.table.to_string()))?;
            for index in lookup.read_write.iter().chain(lookup.read_only.iter()) {
                let address = table.get(usize::from(*index)).ok_or_else(|| {
                    EncodingError::AccountNotFound(format!("{}[{}]", table.address, index))
                })?;
                accounts.push(*address);
            }
        }
        Ok(accounts)
    }

    /// Resolve every instruction's program and accounts to addresses.
    pub fn resolved_instructions(
        &self,
        tables: &[AddressLookupTable],
    ) -> Result<Vec<ResolvedInstruction<'a>>> {
        let accounts = self.accounts(tables)?;
        self.instructions()
            .iter()
            .map(|instruction| instruction.resolve(&accounts))
            .collect()
    }
}

impl<'a> InstructionView<'a> {
    /// Resolve indices against a flattened account list.
    pub fn resolve(&self, accounts: &[PublicKey]) -> Result<ResolvedInstruction<'a>> {
        let lookup = |index: u8| {
            accounts
                .get(usize::from(index))
                .copied()
                .ok_or_else(|| EncodingError::AccountNotFound(format!("index {}", index)))
        };
        Ok(ResolvedInstruction {
            program: lookup(self.program_index)?,
            accounts: self
                .account_indices
                .iter()
                .map(|index| lookup(*index))
                .collect::<Result<Vec<_>>>()?,
            data: self.data,
        })
    }
}

// =============================================================================
// Shared accessors
// =============================================================================

fn static_accounts<'a>(parts: &MessageParts<'a>) -> impl Iterator<Item = PublicKey> + 'a {
    let accounts: &'a [u8] = parts.static_accounts;
    accounts
        .chunks_exact(PUBLIC_KEY_LENGTH)
        .filter_map(|chunk| PublicKey::from_slice(chunk).ok())
}

fn static_account(parts: &MessageParts<'_>, index: usize) -> Option<PublicKey> {
    let start = index.checked_mul(PUBLIC_KEY_LENGTH)?;
    parts
        .static_accounts
        .get(start..start + PUBLIC_KEY_LENGTH)
        .and_then(|chunk| PublicKey::from_slice(chunk).ok())
}

fn static_position(parts: &MessageParts<'_>, account: &PublicKey) -> Option<usize> {
    parts
        .static_accounts
        .chunks_exact(PUBLIC_KEY_LENGTH)
        .position(|chunk| chunk == account.as_bytes())
}

fn static_is_writer(header: &MessageHeader, static_len: usize, index: usize) -> bool {
    let count_signed = usize::from(header.count_signed);
    let signed_writers = count_signed.saturating_sub(usize::from(header.count_signed_readonly));
    let unsigned_writers_end =
        static_len.saturating_sub(usize::from(header.count_unsigned_readonly));
    index < signed_writers || (index >= count_signed && index < unsigned_writers_end)
}

fn signature_of<'a>(parts: &MessageParts<'a>, account: &PublicKey) -> Result<&'a [u8]> {
    let not_found = || EncodingError::SignatureNotFound(account.to_string());
    let index = static_position(parts, account)
        .filter(|index| *index < usize::from(parts.header.count_signed))
        .ok_or_else(not_found)?;
    let start = index * SIGNATURE_LENGTH;
    parts
        .signatures
        .get(start..start + SIGNATURE_LENGTH)
        .ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{AccountReference, Instruction};
    use crate::message::MessageBuilder;
    use base64::prelude::*;
    use rstest::rstest;

    const PAYER: PublicKey = PublicKey::new([1u8; 32]);
    const BLOCKHASH: Blockhash = Blockhash::new([2u8; 32]);
    const PROGRAM1: PublicKey = PublicKey::new([3u8; 32]);
    const PROGRAM2: PublicKey = PublicKey::new([4u8; 32]);
    const ACCOUNT1: PublicKey = PublicKey::new([5u8; 32]);
    const ACCOUNT2: PublicKey = PublicKey::new([6u8; 32]);
    const ACCOUNT3: PublicKey = PublicKey::new([7u8; 32]);
    const ACCOUNT4: PublicKey = PublicKey::new([8u8; 32]);
    const TABLE1: PublicKey = PublicKey::new([20u8; 32]);
    const TABLE2: PublicKey = PublicKey::new([21u8; 32]);

    // Legacy SOL transfer of 100000 lamports with an empty signature slot
    const SOL_TRANSFER_TX: &str = "AQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABAAEDFVMqpim7tqEi2XL8R6KKkP0DYJvY3eiRXLlL1P9EjYgXKQC+k0FKnqyC4AZGJR7OhJXfpPP3NHOhS8t/6G7bLAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA/1c7Oaj3RbyLIjU0/ZPpsmVfVUWAzc8g36fK5g6A0JoBAgIAAQwCAAAAoIYBAAAAAAA=";

    fn instructions() -> Vec<Instruction> {
        vec![
            Instruction::new(
                PROGRAM1,
                vec![
                    AccountReference::signer_writer(ACCOUNT1),
                    AccountReference::readonly(ACCOUNT2),
                ],
                vec![13u8; 10],
            ),
            Instruction::new(
                PROGRAM2,
                vec![
                    AccountReference::writer(ACCOUNT3),
                    AccountReference::readonly(ACCOUNT4),
                    AccountReference::signer(ACCOUNT2),
                ],
                vec![14u8; 15],
            ),
        ]
    }

    fn lookup_tables() -> Vec<AddressLookupTable> {
        vec![
            AddressLookupTable::new(TABLE1, vec![ACCOUNT4, PublicKey::new([30u8; 32])]),
            AddressLookupTable::new(TABLE2, vec![PublicKey::new([31u8; 32]), ACCOUNT3]),
        ]
    }

    #[test]
    fn test_parse_sol_transfer_fixture() {
        let bytes = BASE64_STANDARD.decode(SOL_TRANSFER_TX).unwrap();
        let view = MessageView::parse(&bytes).unwrap();

        assert_eq!(view.version(), Version::Legacy);
        assert_eq!(
            view.fee_payer().unwrap().to_string(),
            "2SF7eZXkyQeWkdF1Kh7i3zrGHsSCFdqVTwE8Ef9LFgCo"
        );
        assert_eq!(
            view.recent_blockhash().to_string(),
            "JBk7RejDBEsFgbR2iR6FV87xCnZXCwazw8MfLZYVk8nM"
        );
        assert_eq!(
            view.header(),
            MessageHeader {
                count_signed: 1,
                count_signed_readonly: 0,
                count_unsigned_readonly: 1
            }
        );
        assert_eq!(view.static_account_count(), 3);
        assert_eq!(view.message_offset(), 65);
        assert_eq!(view.transaction(), &bytes[65..]);

        let instruction = view.instructions()[0];
        assert_eq!(instruction.program_index, 2);
        assert_eq!(instruction.account_indices, &[0, 1]);
        assert_eq!(hex::encode(instruction.data), "02000000a086010000000000");

        let payer = view.fee_payer().unwrap();
        let recipient = view.static_accounts()[1];
        let system = view.static_accounts()[2];
        assert!(view.is_signer(&payer) && view.is_writer(&payer));
        assert!(!view.is_signer(&recipient) && view.is_writer(&recipient));
        assert!(!view.is_signer(&system) && !view.is_writer(&system));
        assert_eq!(view.signature(&payer).unwrap(), &[0u8; 64][..]);
        assert!(matches!(
            view.signature(&recipient),
            Err(EncodingError::SignatureNotFound(_))
        ));
    }

    #[test]
    fn test_legacy_round_trip() {
        let instructions = instructions();
        let mut buffer = [0u8; 1232];
        let sealed = MessageBuilder::legacy()
            .payer(PAYER)
            .recent_blockhash(BLOCKHASH)
            .instructions(instructions.clone())
            .seal(&mut buffer)
            .unwrap();
        let view = MessageView::parse(sealed.as_bytes()).unwrap();

        assert_eq!(view.version(), Version::Legacy);
        assert_eq!(view.fee_payer(), Some(PAYER));
        assert_eq!(view.recent_blockhash(), BLOCKHASH);
        assert_eq!(view.signers(), vec![PAYER, ACCOUNT1, ACCOUNT2]);
        assert!(view.lookups().is_empty());

        for key in [PAYER, ACCOUNT1] {
            assert!(view.is_signer(&key) && view.is_writer(&key));
        }
        assert!(view.is_signer(&ACCOUNT2) && !view.is_writer(&ACCOUNT2));
        assert!(!view.is_signer(&ACCOUNT3) && view.is_writer(&ACCOUNT3));
        for key in [PROGRAM1, PROGRAM2, ACCOUNT4] {
            assert!(!view.is_signer(&key) && !view.is_writer(&key));
        }

        let resolved = view.resolved_instructions(&[]).unwrap();
        assert_eq!(resolved.len(), 2);
        for (resolved, original) in resolved.iter().zip(&instructions) {
            assert_eq!(resolved.program, original.program);
            let accounts: Vec<PublicKey> = original.accounts.iter().map(|r| r.account).collect();
            assert_eq!(resolved.accounts, accounts);
            assert_eq!(resolved.data, original.data.to_vec().unwrap().as_slice());
        }
    }

    #[test]
    fn test_v0_round_trip() {
        let instructions = instructions();
        let tables = lookup_tables();
        let mut buffer = [0u8; 1232];
        let sealed = MessageBuilder::v0()
            .payer(PAYER)
            .recent_blockhash(BLOCKHASH)
            .instructions(instructions.clone())
            .lookup_tables(tables.clone())
            .seal(&mut buffer)
            .unwrap();
        let view = MessageView::parse(sealed.as_bytes()).unwrap();

        assert_eq!(view.version(), Version::V0);
        assert_eq!(view.fee_payer(), Some(PAYER));
        assert_eq!(view.recent_blockhash(), BLOCKHASH);
        assert_eq!(
            view.lookups(),
            &[
                LookupView {
                    table: TABLE1,
                    read_write: vec![],
                    read_only: vec![0],
                },
                LookupView {
                    table: TABLE2,
                    read_write: vec![1],
                    read_only: vec![],
                },
            ]
        );
        assert!(!view.static_accounts().contains(&ACCOUNT3));
        assert!(!view.static_accounts().contains(&ACCOUNT4));

        assert!(view.is_writer_resolved(&ACCOUNT3, &tables).unwrap());
        assert!(!view.is_writer_resolved(&ACCOUNT4, &tables).unwrap());
        assert!(view.is_writer_resolved(&ACCOUNT1, &tables).unwrap());
        assert!(!view.is_signer(&ACCOUNT3));

        let resolved = view.resolved_instructions(&tables).unwrap();
        for (resolved, original) in resolved.iter().zip(&instructions) {
            assert_eq!(resolved.program, original.program);
            let accounts: Vec<PublicKey> = original.accounts.iter().map(|r| r.account).collect();
            assert_eq!(resolved.accounts, accounts);
        }
        assert_eq!(resolved[1].data, &[14u8; 15][..]);
    }

    #[test]
    fn test_v0_missing_table() {
        let mut buffer = [0u8; 1232];
        let sealed = MessageBuilder::v0()
            .payer(PAYER)
            .recent_blockhash(BLOCKHASH)
            .instructions(instructions())
            .lookup_tables(lookup_tables())
            .seal(&mut buffer)
            .unwrap();
        let view = MessageView::parse(sealed.as_bytes()).unwrap();

        // index-only access needs no tables
        assert_eq!(view.instructions().len(), 2);

        let only_first = &lookup_tables()[..1];
        assert_eq!(
            view.resolved_instructions(only_first),
            Err(EncodingError::LookupTableMissing(TABLE2.to_string()))
        );
        assert!(matches!(
            view.accounts(&[]),
            Err(EncodingError::LookupTableMissing(_))
        ));
    }

    #[rstest]
    #[case(0x81)]
    #[case(0xff)]
    fn test_unsupported_version(#[case] first: u8) {
        let mut bytes = vec![0u8];
        bytes.extend_from_slice(&[first, 1, 0, 0]);
        assert_eq!(
            MessageView::parse(&bytes).unwrap_err(),
            EncodingError::UnsupportedFormat(first)
        );
    }

    #[test]
    fn test_truncated_message() {
        let bytes = BASE64_STANDARD.decode(SOL_TRANSFER_TX).unwrap();
        assert_eq!(
            MessageView::parse(&bytes[..150]).unwrap_err(),
            EncodingError::Truncated
        );
    }

    #[test]
    fn test_padding_after_message_is_rejected() {
        let mut buffer = [0u8; 1232];
        let len = MessageBuilder::legacy()
            .payer(PAYER)
            .recent_blockhash(BLOCKHASH)
            .instructions(instructions())
            .seal(&mut buffer)
            .unwrap()
            .len();

        assert_eq!(
            MessageView::parse(&buffer).unwrap_err(),
            EncodingError::TrailingBytes(1232 - len)
        );
        let view = MessageView::parse(&buffer[..len]).unwrap();
        assert_eq!(view.transaction().len(), len - view.message_offset());

        let mut padded = BASE64_STANDARD.decode(SOL_TRANSFER_TX).unwrap();
        padded.push(0);
        assert_eq!(
            MessageView::parse(&padded).unwrap_err(),
            EncodingError::TrailingBytes(1)
        );
    }

    #[test]
    fn test_independent_views_share_bytes() {
        let bytes = BASE64_STANDARD.decode(SOL_TRANSFER_TX).unwrap();
        let first = MessageView::parse(&bytes).unwrap();
        let second = MessageView::parse(&bytes).unwrap();
        assert_eq!(first.transaction().as_ptr(), second.transaction().as_ptr());
        assert_eq!(first.instructions()[0].data.as_ptr(), bytes[203..].as_ptr());
    }
}
