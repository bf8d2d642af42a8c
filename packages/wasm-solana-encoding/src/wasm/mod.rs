mod address;
mod builder;
mod constants;
mod message;
mod parser;
mod pubkey;
pub mod try_into_js_value;

pub use address::AddressNamespace;
pub use builder::BuilderNamespace;
pub use message::WasmMessage;
pub use parser::ParserNamespace;
pub use pubkey::WasmPubkey;

// Re-export constants functions
pub use constants::*;
