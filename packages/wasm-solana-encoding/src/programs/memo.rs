//! SPL Memo program.

use crate::instruction::{AccountReference, Instruction};
use crate::pubkey::PublicKey;

/// `MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr`
pub const MEMO_PROGRAM_ID: PublicKey = PublicKey::new([
    5, 74, 83, 90, 153, 41, 33, 6, 77, 36, 232, 113, 96, 218, 56, 124, 124, 53, 181, 221, 188, 146,
    187, 129, 228, 31, 168, 64, 65, 5, 68, 141,
]);

/// Attach a UTF-8 memo. Every account in `signers` must sign the message.
pub fn memo(text: &str, signers: &[PublicKey]) -> Instruction {
    Instruction::new(
        MEMO_PROGRAM_ID,
        signers.iter().copied().map(AccountReference::signer).collect(),
        text.as_bytes().to_vec(),
    )
}
