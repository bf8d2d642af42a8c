//! wasm-solana-encoding: Solana message encoding without the Solana SDK.
//!
//! Builds, signs and reads legacy and v0 messages directly on byte buffers, and
//! exposes the same operations to JavaScript via WASM bindings.
//!
//! # Architecture
//!
//! 1. **Encoding core** (`shortvec`, `cursor`, `pubkey`, `address`, `accounts`,
//!    `message`, `signer`) - buffer-level codec with no JavaScript dependencies
//! 2. **Program builders** (`programs`) - instructions for common on-chain programs
//! 3. **Intent layer** (`intent`, `parser`) - JSON intents in, display-ready data out
//! 4. **WASM bindings** (`wasm/`) - thin wrappers that expose the above to JavaScript
//!
//! # Usage from Rust
//!
//! ```rust
//! use wasm_solana_encoding::programs::system;
//! use wasm_solana_encoding::{Blockhash, MessageBuilder, MessageView, PublicKey};
//!
//! let payer = PublicKey::new([1u8; 32]);
//! let recipient = PublicKey::new([2u8; 32]);
//! let bytes = MessageBuilder::legacy()
//!     .payer(payer)
//!     .recent_blockhash(Blockhash::new([3u8; 32]))
//!     .instruction(system::transfer(payer, recipient, 1_000))
//!     .seal_to_vec()
//!     .unwrap();
//!
//! let view = MessageView::parse(&bytes).unwrap();
//! assert_eq!(view.fee_payer(), Some(payer));
//! assert!(view.is_writer(&recipient));
//! ```

pub mod accounts;
pub mod address;
pub mod cursor;
mod error;
pub mod instruction;
pub mod intent;
pub mod lookup;
pub mod message;
pub mod parser;
pub mod programs;
pub mod pubkey;
pub mod shortvec;
pub mod signer;
pub mod wasm;

// Re-export core types at crate root
pub use accounts::{Accounts, LookupEntry};
pub use address::{
    create_program_address, derive_associated_token_address, derive_program_address,
    AssociatedTokenAddress, ProgramDerivedAddress,
};
pub use error::{EncodingError, Result};
pub use instruction::{AccountReference, Instruction, InstructionData};
pub use lookup::AddressLookupTable;
pub use message::{
    InnerInstructions, MessageBuilder, MessageHeader, MessageView, SealedMessage, Version,
};
pub use pubkey::{Blockhash, PublicKey, Slot};
pub use signer::{add_signature, sign_message, MessageSigner, Signers};

// Re-export WASM types
pub use wasm::{AddressNamespace, BuilderNamespace, ParserNamespace, WasmMessage, WasmPubkey};
