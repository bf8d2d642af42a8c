use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Errors raised while building, signing, reading or deriving messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    // Preconditions, raised before anything is written
    #[error("message payer has not been set")]
    MissingPayer,
    #[error("recent blockhash has not been set")]
    MissingBlockhash,
    #[error("instruction program has not been set")]
    MissingProgram,
    #[error("lookup tables can only be used by versioned messages")]
    LookupTablesRequireV0,

    // Capacity
    #[error("buffer overflow: needed {needed} bytes but only {remaining} remain")]
    BufferOverflow { needed: usize, remaining: usize },

    // Format
    #[error("unsupported message format (header byte 0x{0:02x})")]
    UnsupportedFormat(u8),
    #[error("malformed compact integer")]
    MalformedVarint,
    #[error("unexpected end of message")]
    Truncated,
    #[error("value cannot be encoded as a compact integer")]
    InvalidEncoding,
    #[error("{0} unexpected bytes after the end of the message")]
    TrailingBytes(usize),

    // Lookup
    #[error("no signature found for account {0}")]
    SignatureNotFound(String),
    #[error("the address lookup tables provided do not contain table {0} referenced by the message")]
    LookupTableMissing(String),
    #[error("account {0} is not present in the message")]
    AccountNotFound(String),

    // Derivation
    #[error("unable to find a viable program address bump seed")]
    DerivationExhausted,
    #[error("invalid seeds: {0}")]
    InvalidSeeds(&'static str),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("invalid base58: {0}")]
    InvalidBase58(String),
    #[error("account index {0} does not fit in a single byte")]
    AccountIndexOverflow(usize),
    #[error("lookup table index {0} does not fit in a single byte")]
    LookupIndexOverflow(usize),
    #[error("instruction data declared {declared} bytes but wrote {written}")]
    DataLengthMismatch { declared: usize, written: usize },
    #[error("{0}")]
    Intent(String),
}

pub type Result<T> = std::result::Result<T, EncodingError>;

impl EncodingError {
    pub fn intent(msg: impl Into<String>) -> EncodingError {
        EncodingError::Intent(msg.into())
    }
}

// Surfaces as a JavaScript Error (with stack trace) through wasm_bindgen
impl From<EncodingError> for JsValue {
    fn from(err: EncodingError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EncodingError::BufferOverflow {
            needed: 32,
            remaining: 4,
        };
        assert_eq!(
            err.to_string(),
            "buffer overflow: needed 32 bytes but only 4 remain"
        );
        assert_eq!(
            EncodingError::UnsupportedFormat(0x81).to_string(),
            "unsupported message format (header byte 0x81)"
        );
    }

    #[test]
    fn test_intent_error() {
        let err = EncodingError::intent("Invalid transfer.lamports: abc");
        assert_eq!(err.to_string(), "Invalid transfer.lamports: abc");
    }
}
