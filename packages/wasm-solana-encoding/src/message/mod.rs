//! Message wire format: writing, sealing and zero-copy reading.
//!
//! ```text
//! [varint sigCount][sigCount x 64 bytes]
//! [legacy: 3 header bytes | v0: 0x80 + 3 header bytes]
//! [varint accountCount][accountCount x 32 bytes]
//! [32 bytes blockhash]
//! [varint ixCount]{ [u8 program][varint n][n x u8 account][varint len][len bytes] }
//! [v0 only: varint lookupCount]{ [32 bytes table][varint n][n x varint][varint m][m x varint] }
//! ```

mod builder;
mod view;
mod writer;

pub use builder::{InnerInstructions, MessageBuilder, SealedMessage, SignedMessageBuilder};
pub use view::{
    InstructionView, LegacyMessage, LookupView, MessageHeader, MessageParts, MessageView,
    ResolvedInstruction, V0Message,
};
pub use writer::write_message;

/// Size of one signature slot.
pub const SIGNATURE_LENGTH: usize = 64;

/// Largest transaction that fits in a single network packet
/// (IPv6 MTU minus IP and fragment headers).
pub const PACKET_DATA_SIZE: usize = 1280 - 40 - 8;

/// Default capacity used when sealing into a freshly allocated buffer.
pub const MAX_MESSAGE_SIZE: usize = PACKET_DATA_SIZE;

/// High bit of the first header byte marks a versioned message.
pub const MESSAGE_VERSION_PREFIX: u8 = 0x80;

/// Wire format of a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Version {
    #[default]
    Legacy,
    V0,
}
