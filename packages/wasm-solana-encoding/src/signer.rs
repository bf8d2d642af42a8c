//! Filling the reserved signature slots of a sealed message.
//!
//! The library never signs by itself: callers supply a function per account that
//! writes 64 raw signature bytes for the unsigned transaction bytes.

use crate::error::{EncodingError, Result};
use crate::message::{MessageView, SIGNATURE_LENGTH};
use crate::pubkey::PublicKey;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

/// Produces a signature over `transaction` into the 64-byte `signature` slot.
pub trait MessageSigner {
    fn sign(&self, transaction: &[u8], signature: &mut [u8]);
}

impl<F> MessageSigner for F
where
    F: Fn(&[u8], &mut [u8]),
{
    fn sign(&self, transaction: &[u8], signature: &mut [u8]) {
        self(transaction, signature)
    }
}

/// Signing functions keyed by the account they sign for.
#[derive(Default)]
pub struct Signers<'s> {
    signers: BTreeMap<PublicKey, Box<dyn MessageSigner + 's>>,
}

impl<'s> Signers<'s> {
    pub fn new() -> Self {
        Signers {
            signers: BTreeMap::new(),
        }
    }

    /// Register a signer for `account`, replacing any earlier one.
    pub fn insert(&mut self, account: PublicKey, signer: impl MessageSigner + 's) {
        self.signers.insert(account, Box::new(signer));
    }

    pub fn with(mut self, account: PublicKey, signer: impl MessageSigner + 's) -> Self {
        self.insert(account, signer);
        self
    }

    pub fn contains(&self, account: &PublicKey) -> bool {
        self.signers.contains_key(account)
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    fn get(&self, account: &PublicKey) -> Option<&(dyn MessageSigner + 's)> {
        self.signers.get(account).map(|signer| signer.as_ref())
    }
}

impl fmt::Debug for Signers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.signers.keys()).finish()
    }
}

/// Location of the signature region and signer list of an encoded message.
struct SignatureLayout {
    signatures_start: usize,
    message_offset: usize,
    signers: Vec<PublicKey>,
}

impl SignatureLayout {
    fn of(buffer: &[u8]) -> Result<Self> {
        let view = MessageView::parse(buffer)?;
        let message_offset = view.message_offset();
        let slots = view.signatures().count();
        Ok(SignatureLayout {
            signatures_start: message_offset - slots * SIGNATURE_LENGTH,
            message_offset,
            signers: view.signers(),
        })
    }

    fn slot(&self, position: usize) -> Option<std::ops::Range<usize>> {
        let start = self.signatures_start + position * SIGNATURE_LENGTH;
        let end = start + SIGNATURE_LENGTH;
        (end <= self.message_offset).then_some(start..end)
    }
}

/// Sign every slot whose account has an entry in `signers`.
///
/// `buffer` must hold exactly one encoded message. Slots are visited in header
/// order; accounts without a signer keep their current slot contents. Returns the
/// number of slots signed.
pub fn sign_message(buffer: &mut [u8], signers: &Signers<'_>) -> Result<usize> {
    let layout = SignatureLayout::of(buffer)?;
    let (head, transaction) = buffer.split_at_mut(layout.message_offset);

    let mut signed = 0;
    for (position, account) in layout.signers.iter().enumerate() {
        let Some(signer) = signers.get(account) else {
            continue;
        };
        let slot = layout
            .slot(position)
            .ok_or_else(|| EncodingError::SignatureNotFound(account.to_string()))?;
        signer.sign(transaction, &mut head[slot]);
        signed += 1;
    }

    debug!("signed {} of {} signature slots", signed, layout.signers.len());
    Ok(signed)
}

/// Place an externally produced signature into `account`'s slot.
pub fn add_signature(buffer: &mut [u8], account: &PublicKey, signature: &[u8]) -> Result<()> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(EncodingError::InvalidLength {
            expected: SIGNATURE_LENGTH,
            actual: signature.len(),
        });
    }
    let layout = SignatureLayout::of(buffer)?;
    let slot = layout
        .signers
        .iter()
        .position(|signer| signer == account)
        .and_then(|position| layout.slot(position))
        .ok_or_else(|| EncodingError::SignatureNotFound(account.to_string()))?;
    buffer[slot].copy_from_slice(signature);
    Ok(())
}
