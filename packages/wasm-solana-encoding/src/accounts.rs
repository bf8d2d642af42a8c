//! Account resolution: turns instruction account references into the ordered,
//! deduplicated account table of a message.
//!
//! The resolved static list is grouped as signed-writable, signed-readonly,
//! unsigned-writable, unsigned-readonly. Within a group, accounts keep the order
//! in which they were first referenced (fee payer first). When lookup tables are
//! supplied, non-signer accounts found in a table are moved out of the static
//! list and referenced by table position instead.

use crate::error::{EncodingError, Result};
use crate::instruction::{AccountReference, Instruction};
use crate::lookup::AddressLookupTable;
use crate::pubkey::PublicKey;
use log::trace;
use std::collections::BTreeMap;

/// An address loaded from a lookup table, with its position in that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupIndex {
    pub address: PublicKey,
    pub index: u8,
}

/// All addresses a message loads from one lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEntry {
    pub table: PublicKey,
    pub read_write: Vec<LookupIndex>,
    pub read_only: Vec<LookupIndex>,
}

impl LookupEntry {
    fn new(table: PublicKey) -> Self {
        LookupEntry {
            table,
            read_write: Vec::new(),
            read_only: Vec::new(),
        }
    }

    /// Loaded addresses in flattened order: read-write first, then read-only.
    pub fn addresses(&self) -> impl Iterator<Item = &PublicKey> {
        self.read_write
            .iter()
            .chain(self.read_only.iter())
            .map(|entry| &entry.address)
    }
}

/// Result of resolving a message's accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accounts {
    static_accounts: Vec<PublicKey>,
    lookup_entries: Vec<LookupEntry>,
    count_signed: u8,
    count_signed_readonly: u8,
    count_unsigned_readonly: u8,
}

fn group(reference: &AccountReference) -> (bool, bool) {
    (!reference.is_signer, !reference.is_writer)
}

fn header_count(count: usize) -> Result<u8> {
    u8::try_from(count).map_err(|_| EncodingError::AccountIndexOverflow(count))
}

impl Accounts {
    /// Resolve accounts for a message without lookup tables.
    pub fn resolve(instructions: &[Instruction], payer: &PublicKey) -> Result<Accounts> {
        Self::resolve_with_lookups(instructions, payer, &[])
    }

    /// Resolve accounts, moving eligible accounts into the given lookup tables.
    ///
    /// Tables are searched in the order given and an account is taken from the
    /// first table that holds it. Signers always stay static.
    pub fn resolve_with_lookups(
        instructions: &[Instruction],
        payer: &PublicKey,
        tables: &[AddressLookupTable],
    ) -> Result<Accounts> {
        let merged = merge_references(instructions, payer);

        let mut entries: Vec<LookupEntry> = tables
            .iter()
            .map(|table| LookupEntry::new(table.address))
            .collect();
        let mut static_references = Vec::with_capacity(merged.len());

        for reference in merged {
            if reference.is_signer {
                static_references.push(reference);
                continue;
            }
            match find_in_tables(&reference.account, tables)? {
                Some((table_position, index)) => {
                    trace!(
                        "account {} found in lookup table {} at index {}",
                        reference.account,
                        tables[table_position].address,
                        index
                    );
                    let entry = LookupIndex {
                        address: reference.account,
                        index,
                    };
                    if reference.is_writer {
                        entries[table_position].read_write.push(entry);
                    } else {
                        entries[table_position].read_only.push(entry);
                    }
                }
                None => static_references.push(reference),
            }
        }
        entries.retain(|entry| !entry.read_write.is_empty() || !entry.read_only.is_empty());

        let mut count_signed = 0;
        let mut count_signed_readonly = 0;
        let mut count_unsigned_readonly = 0;
        for reference in &static_references {
            match (reference.is_signer, reference.is_writer) {
                (true, true) => count_signed += 1,
                (true, false) => {
                    count_signed += 1;
                    count_signed_readonly += 1;
                }
                (false, true) => {}
                (false, false) => count_unsigned_readonly += 1,
            }
        }

        Ok(Accounts {
            static_accounts: static_references.iter().map(|r| r.account).collect(),
            lookup_entries: entries,
            count_signed: header_count(count_signed)?,
            count_signed_readonly: header_count(count_signed_readonly)?,
            count_unsigned_readonly: header_count(count_unsigned_readonly)?,
        })
    }

    pub fn static_accounts(&self) -> &[PublicKey] {
        &self.static_accounts
    }

    pub fn lookup_entries(&self) -> &[LookupEntry] {
        &self.lookup_entries
    }

    pub fn count_signed(&self) -> u8 {
        self.count_signed
    }

    pub fn count_signed_readonly(&self) -> u8 {
        self.count_signed_readonly
    }

    pub fn count_unsigned_readonly(&self) -> u8 {
        self.count_unsigned_readonly
    }

    /// Static accounts followed by every lookup-loaded address, in entry order.
    pub fn flattened(&self) -> Vec<PublicKey> {
        self.static_accounts
            .iter()
            .chain(self.lookup_entries.iter().flat_map(LookupEntry::addresses))
            .copied()
            .collect()
    }

    /// Map from address to its position in the flattened list.
    pub fn flattened_indices(&self) -> BTreeMap<PublicKey, usize> {
        self.flattened()
            .into_iter()
            .enumerate()
            .map(|(position, key)| (key, position))
            .collect()
    }
}

/// Build the raw reference stream, stable-sort it by (signer, writer), and
/// merge duplicates with OR semantics keeping first-seen order.
fn merge_references(instructions: &[Instruction], payer: &PublicKey) -> Vec<AccountReference> {
    let mut stream = Vec::with_capacity(
        1 + instructions
            .iter()
            .map(|ix| 1 + ix.accounts.len())
            .sum::<usize>(),
    );
    stream.push(AccountReference::signer_writer(*payer));
    for instruction in instructions {
        stream.push(AccountReference::program(instruction.program));
        stream.extend(instruction.accounts.iter().copied());
    }

    // sort_by_key is stable: equal keys keep reference order
    stream.sort_by_key(group);

    let mut positions: BTreeMap<PublicKey, usize> = BTreeMap::new();
    let mut merged: Vec<AccountReference> = Vec::with_capacity(stream.len());
    for reference in stream {
        match positions.get(&reference.account) {
            Some(&position) => merged[position].merge(&reference),
            None => {
                positions.insert(reference.account, merged.len());
                merged.push(reference);
            }
        }
    }

    // a merge can promote an account (e.g. signer-readonly also written elsewhere)
    merged.sort_by_key(group);
    merged
}

fn find_in_tables(
    account: &PublicKey,
    tables: &[AddressLookupTable],
) -> Result<Option<(usize, u8)>> {
    for (table_position, table) in tables.iter().enumerate() {
        if let Some(index) = table.index_of(account) {
            let index =
                u8::try_from(index).map_err(|_| EncodingError::LookupIndexOverflow(index))?;
            return Ok(Some((table_position, index)));
        }
    }
    Ok(None)
}
