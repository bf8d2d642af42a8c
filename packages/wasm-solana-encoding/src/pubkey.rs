//! Fixed-size value types used on the wire: public keys, blockhashes and slots.
//!
//! All of them are plain `Copy` values. Base58 is the textual form for keys and
//! blockhashes, matching what RPC nodes and explorers display.

use crate::error::{EncodingError, Result};
use curve25519_dalek::edwards::CompressedEdwardsY;
use std::fmt;
use std::str::FromStr;

/// Length of a public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of a blockhash in bytes.
pub const BLOCKHASH_LENGTH: usize = 32;

/// A 32-byte account address, ordered by byte-lexicographic comparison.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub const fn new(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(bytes)
    }

    /// Parse a base58 address.
    pub fn from_base58(address: &str) -> Result<Self> {
        decode_base58::<PUBLIC_KEY_LENGTH>(address).map(PublicKey)
    }

    /// Create a key from a byte slice with length validation.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        to_array(bytes).map(PublicKey)
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    pub fn to_bytes(self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Whether these bytes decompress to a point on the ed25519 curve.
    ///
    /// Program-derived addresses are required to be off-curve so that no
    /// private key can exist for them.
    pub fn is_on_curve(&self) -> bool {
        bytes_are_curve_point(&self.0)
    }
}

pub fn bytes_are_curve_point(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = EncodingError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        PublicKey::from_slice(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for PublicKey {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        PublicKey::from_base58(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base58())
    }
}

/// Recent blockhash (or durable nonce value) a message is bound to.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Blockhash([u8; BLOCKHASH_LENGTH]);

impl Blockhash {
    pub const fn new(bytes: [u8; BLOCKHASH_LENGTH]) -> Self {
        Blockhash(bytes)
    }

    pub fn from_base58(value: &str) -> Result<Self> {
        decode_base58::<BLOCKHASH_LENGTH>(value).map(Blockhash)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        to_array(bytes).map(Blockhash)
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    pub fn as_bytes(&self) -> &[u8; BLOCKHASH_LENGTH] {
        &self.0
    }
}

impl FromStr for Blockhash {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        Blockhash::from_base58(s)
    }
}

impl fmt::Display for Blockhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for Blockhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blockhash({})", self.to_base58())
    }
}

/// Ledger slot. Used as a derivation seed in its 8-byte little-endian form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(pub u64);

impl Slot {
    pub fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl From<u64> for Slot {
    fn from(slot: u64) -> Self {
        Slot(slot)
    }
}

fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| EncodingError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

fn decode_base58<const N: usize>(value: &str) -> Result<[u8; N]> {
    let bytes = bs58::decode(value)
        .into_vec()
        .map_err(|e| EncodingError::InvalidBase58(format!("{}: {}", value, e)))?;
    to_array(&bytes)
}
