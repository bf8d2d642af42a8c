//! Intent-based message building.
//!
//! An intent is a JSON description of a message: fee payer, nonce source,
//! version, instruction list and (for v0) lookup tables.
//!
//! # Usage from TypeScript
//!
//! ```typescript
//! const bytes = BuilderNamespace.buildMessage({ feePayer, nonce, instructions });
//! ```

mod build;
mod types;

pub use build::{build_from_json, build_message, message_builder};
pub use types::*;
