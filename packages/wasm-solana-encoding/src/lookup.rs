//! On-chain address lookup tables.

use crate::cursor::Cursor;
use crate::error::{EncodingError, Result};
use crate::pubkey::{PublicKey, PUBLIC_KEY_LENGTH};

/// Size of the metadata header that precedes the addresses in table account data.
pub const LOOKUP_TABLE_META_SIZE: usize = 56;

/// A lookup table as it exists on chain: its own address plus the addresses it
/// stores, referenced by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLookupTable {
    pub address: PublicKey,
    pub addresses: Vec<PublicKey>,
}

/// Metadata header of a lookup table account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTableMeta {
    pub deactivation_slot: u64,
    pub last_extended_slot: u64,
    pub last_extended_slot_start_index: u8,
    pub authority: Option<PublicKey>,
}

impl AddressLookupTable {
    pub fn new(address: PublicKey, addresses: Vec<PublicKey>) -> Self {
        AddressLookupTable { address, addresses }
    }

    /// Parse the raw data of a lookup table account fetched from an RPC node.
    pub fn from_account_data(address: PublicKey, data: &[u8]) -> Result<Self> {
        let addresses = data
            .get(LOOKUP_TABLE_META_SIZE..)
            .ok_or(EncodingError::InvalidLength {
                expected: LOOKUP_TABLE_META_SIZE,
                actual: data.len(),
            })?;
        if addresses.len() % PUBLIC_KEY_LENGTH != 0 {
            return Err(EncodingError::InvalidLength {
                expected: LOOKUP_TABLE_META_SIZE
                    + addresses.len() / PUBLIC_KEY_LENGTH * PUBLIC_KEY_LENGTH,
                actual: data.len(),
            });
        }

        let addresses = addresses
            .chunks_exact(PUBLIC_KEY_LENGTH)
            .map(PublicKey::from_slice)
            .collect::<Result<Vec<_>>>()?;
        Ok(AddressLookupTable { address, addresses })
    }

    /// Position of `account` within the table, if present.
    pub fn index_of(&self, account: &PublicKey) -> Option<usize> {
        self.addresses.iter().position(|address| address == account)
    }

    pub fn get(&self, index: usize) -> Option<&PublicKey> {
        self.addresses.get(index)
    }
}

impl LookupTableMeta {
    /// Decode the metadata header from table account data.
    pub fn from_account_data(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        if cursor.remaining() < LOOKUP_TABLE_META_SIZE {
            return Err(EncodingError::InvalidLength {
                expected: LOOKUP_TABLE_META_SIZE,
                actual: data.len(),
            });
        }
        // u32 account type discriminator
        cursor.skip(4)?;
        let deactivation_slot = u64::from_le_bytes(*cursor.read_array::<8>()?);
        let last_extended_slot = u64::from_le_bytes(*cursor.read_array::<8>()?);
        let last_extended_slot_start_index = cursor.read_u8()?;
        let authority = match cursor.read_u8()? {
            0 => None,
            _ => Some(cursor.read_pubkey()?),
        };
        Ok(LookupTableMeta {
            deactivation_slot,
            last_extended_slot,
            last_extended_slot_start_index,
            authority,
        })
    }

    pub fn is_active(&self) -> bool {
        self.deactivation_slot == u64::MAX
    }
}
