//! Instruction builders for the native and SPL programs most messages use.
//!
//! Each builder returns a plain [`Instruction`](crate::instruction::Instruction)
//! ready to hand to a [`MessageBuilder`](crate::message::MessageBuilder).

pub mod address_lookup_table;
pub mod associated_token;
pub mod compute_budget;
pub mod memo;
pub mod system;
pub mod sysvar;
pub mod token;

pub use address_lookup_table::ADDRESS_LOOKUP_TABLE_PROGRAM_ID;
pub use associated_token::ASSOCIATED_TOKEN_PROGRAM_ID;
pub use compute_budget::COMPUTE_BUDGET_PROGRAM_ID;
pub use memo::MEMO_PROGRAM_ID;
pub use system::SYSTEM_PROGRAM_ID;
pub use token::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};
