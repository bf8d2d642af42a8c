//! ComputeBudget Program instruction builders.
//!
//! # Wire Format
//!
//! ComputeBudget instructions use a single-byte discriminator:
//! - 2: SetComputeUnitLimit (u32 units)
//! - 3: SetComputeUnitPrice (u64 micro-lamports)

use crate::instruction::Instruction;
use crate::pubkey::PublicKey;

/// `ComputeBudget111111111111111111111111111111`
pub const COMPUTE_BUDGET_PROGRAM_ID: PublicKey = PublicKey::new([
    3, 6, 70, 111, 229, 33, 23, 50, 255, 236, 173, 186, 114, 195, 155, 231, 188, 140, 229, 187, 197,
    247, 18, 107, 44, 67, 155, 58, 64, 0, 0, 0,
]);

const SET_COMPUTE_UNIT_LIMIT: u8 = 2;
const SET_COMPUTE_UNIT_PRICE: u8 = 3;

/// Cap the compute units the message may consume.
pub fn set_compute_unit_limit(units: u32) -> Instruction {
    Instruction::with_writer(COMPUTE_BUDGET_PROGRAM_ID, vec![], 5, move |writer| {
        writer.put_u8(SET_COMPUTE_UNIT_LIMIT)?;
        writer.put_u32_le(units)
    })
}

/// Priority fee, in micro-lamports per compute unit.
pub fn set_compute_unit_price(micro_lamports: u64) -> Instruction {
    Instruction::with_writer(COMPUTE_BUDGET_PROGRAM_ID, vec![], 9, move |writer| {
        writer.put_u8(SET_COMPUTE_UNIT_PRICE)?;
        writer.put_u64_le(micro_lamports)
    })
}
