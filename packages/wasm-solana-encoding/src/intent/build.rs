//! Message building from intents.

use super::types::{
    AccountMetaIntent, InstructionIntent, LookupTableIntent, MessageIntent, MessageVersion, Nonce,
};
use crate::error::{EncodingError, Result};
use crate::instruction::{AccountReference, Instruction};
use crate::lookup::AddressLookupTable;
use crate::message::{MessageBuilder, Version};
use crate::programs::{
    address_lookup_table, associated_token, compute_budget, memo, system, token,
    TOKEN_PROGRAM_ID,
};
use crate::pubkey::{Blockhash, PublicKey, Slot};
use base64::prelude::*;

fn parse_pubkey(value: &str, field: &str) -> Result<PublicKey> {
    value
        .parse()
        .map_err(|_| EncodingError::intent(format!("Invalid {}: {}", field, value)))
}

fn parse_amount(value: &str, field: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| EncodingError::intent(format!("Invalid {}: {}", field, value)))
}

fn parse_token_program(program_id: Option<&str>, field: &str) -> Result<PublicKey> {
    program_id.map_or(Ok(TOKEN_PROGRAM_ID), |id| parse_pubkey(id, field))
}

/// Translate an intent into a configured [`MessageBuilder`].
pub fn message_builder(intent: MessageIntent) -> Result<MessageBuilder> {
    let fee_payer = parse_pubkey(&intent.fee_payer, "feePayer")?;

    let mut instructions = Vec::with_capacity(intent.instructions.len() + 1);
    let blockhash = match &intent.nonce {
        Nonce::Blockhash { value } => value,
        Nonce::Durable {
            address,
            authority,
            value,
        } => {
            // advance-nonce must come first in a durable-nonce message
            instructions.push(system::advance_nonce_account(
                parse_pubkey(address, "nonce.address")?,
                parse_pubkey(authority, "nonce.authority")?,
            ));
            value
        }
    };
    let blockhash: Blockhash = blockhash
        .parse()
        .map_err(|_| EncodingError::intent(format!("Invalid blockhash: {}", blockhash)))?;

    for ix in intent.instructions {
        instructions.extend(build_instruction(ix)?);
    }

    let builder = MessageBuilder::default()
        .payer(fee_payer)
        .recent_blockhash(blockhash)
        .instructions(instructions);

    Ok(match intent.version {
        MessageVersion::Legacy => builder,
        MessageVersion::V0 => builder.version(Version::V0).lookup_tables(
            intent
                .lookup_tables
                .iter()
                .map(build_lookup_table)
                .collect::<Result<Vec<_>>>()?,
        ),
    })
}

/// Build the unsigned message bytes for an intent.
pub fn build_message(intent: MessageIntent) -> Result<Vec<u8>> {
    message_builder(intent)?.seal_to_vec()
}

/// Deserialize an intent from JSON and build it.
pub fn build_from_json(json: &str) -> Result<Vec<u8>> {
    let intent: MessageIntent = serde_json::from_str(json)
        .map_err(|e| EncodingError::intent(format!("Invalid intent: {}", e)))?;
    build_message(intent)
}

fn build_lookup_table(table: &LookupTableIntent) -> Result<AddressLookupTable> {
    let address = parse_pubkey(&table.address, "lookupTable.address")?;
    let addresses = table
        .addresses
        .iter()
        .map(|entry| parse_pubkey(entry, "lookupTable.addresses"))
        .collect::<Result<Vec<_>>>()?;
    Ok(AddressLookupTable::new(address, addresses))
}

fn build_account_meta(meta: &AccountMetaIntent) -> Result<AccountReference> {
    Ok(AccountReference::new(
        parse_pubkey(&meta.pubkey, "custom.accounts.pubkey")?,
        meta.is_signer,
        meta.is_writable,
    ))
}

/// Build the instructions for one intent entry. Compute budget may expand to two.
fn build_instruction(ix: InstructionIntent) -> Result<Vec<Instruction>> {
    let instruction = match ix {
        // ===== System Program =====
        InstructionIntent::Transfer { from, to, lamports } => system::transfer(
            parse_pubkey(&from, "transfer.from")?,
            parse_pubkey(&to, "transfer.to")?,
            parse_amount(&lamports, "transfer.lamports")?,
        ),

        InstructionIntent::CreateAccount {
            from,
            new_account,
            lamports,
            space,
            owner,
        } => system::create_account(
            parse_pubkey(&from, "createAccount.from")?,
            parse_pubkey(&new_account, "createAccount.newAccount")?,
            parse_amount(&lamports, "createAccount.lamports")?,
            space,
            parse_pubkey(&owner, "createAccount.owner")?,
        ),

        InstructionIntent::NonceAdvance { nonce, authority } => system::advance_nonce_account(
            parse_pubkey(&nonce, "nonceAdvance.nonce")?,
            parse_pubkey(&authority, "nonceAdvance.authority")?,
        ),

        InstructionIntent::NonceInitialize { nonce, authority } => {
            system::initialize_nonce_account(
                parse_pubkey(&nonce, "nonceInitialize.nonce")?,
                parse_pubkey(&authority, "nonceInitialize.authority")?,
            )
        }

        InstructionIntent::Allocate { account, space } => {
            system::allocate(parse_pubkey(&account, "allocate.account")?, space)
        }

        InstructionIntent::Assign { account, owner } => system::assign(
            parse_pubkey(&account, "assign.account")?,
            parse_pubkey(&owner, "assign.owner")?,
        ),

        // ===== Memo Program =====
        InstructionIntent::Memo { message } => memo::memo(&message, &[]),

        // ===== Compute Budget Program =====
        InstructionIntent::ComputeBudget {
            unit_limit,
            unit_price,
        } => {
            let mut instructions = Vec::with_capacity(2);
            if let Some(units) = unit_limit {
                instructions.push(compute_budget::set_compute_unit_limit(units));
            }
            if let Some(micro_lamports) = unit_price {
                instructions.push(compute_budget::set_compute_unit_price(micro_lamports));
            }
            return Ok(instructions);
        }

        // ===== SPL Token =====
        InstructionIntent::TokenTransfer {
            source,
            destination,
            owner,
            amount,
            mint,
            decimals,
            program_id,
        } => {
            let program_id =
                parse_token_program(program_id.as_deref(), "tokenTransfer.programId")?;
            let source = parse_pubkey(&source, "tokenTransfer.source")?;
            let destination = parse_pubkey(&destination, "tokenTransfer.destination")?;
            let owner = parse_pubkey(&owner, "tokenTransfer.owner")?;
            let amount = parse_amount(&amount, "tokenTransfer.amount")?;
            match (mint, decimals) {
                (Some(mint), Some(decimals)) => token::transfer_checked(
                    program_id,
                    source,
                    parse_pubkey(&mint, "tokenTransfer.mint")?,
                    destination,
                    owner,
                    amount,
                    decimals,
                ),
                _ => token::transfer(program_id, source, destination, owner, amount),
            }
        }

        InstructionIntent::CreateAta {
            payer,
            owner,
            mint,
            program_id,
            idempotent,
        } => {
            let create = if idempotent {
                associated_token::create_idempotent
            } else {
                associated_token::create
            };
            let (instruction, _) = create(
                parse_pubkey(&payer, "createAta.payer")?,
                parse_pubkey(&owner, "createAta.owner")?,
                parse_pubkey(&mint, "createAta.mint")?,
                parse_token_program(program_id.as_deref(), "createAta.programId")?,
            )?;
            instruction
        }

        InstructionIntent::CloseAta {
            account,
            destination,
            owner,
            program_id,
        } => token::close_account(
            parse_token_program(program_id.as_deref(), "closeAta.programId")?,
            parse_pubkey(&account, "closeAta.account")?,
            parse_pubkey(&destination, "closeAta.destination")?,
            parse_pubkey(&owner, "closeAta.owner")?,
        ),

        // ===== Address Lookup Table Program =====
        InstructionIntent::CreateLookupTable {
            authority,
            payer,
            recent_slot,
        } => {
            let (instruction, _) = address_lookup_table::create_lookup_table(
                parse_pubkey(&authority, "createLookupTable.authority")?,
                parse_pubkey(&payer, "createLookupTable.payer")?,
                Slot(parse_amount(&recent_slot, "createLookupTable.recentSlot")?),
            )?;
            instruction
        }

        InstructionIntent::ExtendLookupTable {
            table,
            authority,
            payer,
            addresses,
        } => address_lookup_table::extend_lookup_table(
            parse_pubkey(&table, "extendLookupTable.table")?,
            parse_pubkey(&authority, "extendLookupTable.authority")?,
            payer
                .as_deref()
                .map(|payer| parse_pubkey(payer, "extendLookupTable.payer"))
                .transpose()?,
            addresses
                .iter()
                .map(|address| parse_pubkey(address, "extendLookupTable.addresses"))
                .collect::<Result<Vec<_>>>()?,
        ),

        // ===== Arbitrary program =====
        InstructionIntent::Custom {
            program_id,
            accounts,
            data,
        } => Instruction::new(
            parse_pubkey(&program_id, "custom.programId")?,
            accounts
                .iter()
                .map(build_account_meta)
                .collect::<Result<Vec<_>>>()?,
            BASE64_STANDARD
                .decode(&data)
                .map_err(|_| EncodingError::intent(format!("Invalid custom.data: {}", data)))?,
        ),
    };
    Ok(vec![instruction])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageView;
    use crate::programs::{COMPUTE_BUDGET_PROGRAM_ID, MEMO_PROGRAM_ID, SYSTEM_PROGRAM_ID};

    const FEE_PAYER: &str = "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB";
    const RECIPIENT: &str = "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH";
    const BLOCKHASH: &str = "GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4";

    fn transfer() -> InstructionIntent {
        InstructionIntent::Transfer {
            from: FEE_PAYER.to_string(),
            to: RECIPIENT.to_string(),
            lamports: "1000000".to_string(),
        }
    }

    fn intent(instructions: Vec<InstructionIntent>) -> MessageIntent {
        MessageIntent {
            fee_payer: FEE_PAYER.to_string(),
            nonce: Nonce::Blockhash {
                value: BLOCKHASH.to_string(),
            },
            version: MessageVersion::Legacy,
            instructions,
            lookup_tables: vec![],
        }
    }

    fn programs(bytes: &[u8]) -> Vec<PublicKey> {
        let view = MessageView::parse(bytes).unwrap();
        view.resolved_instructions(&[])
            .unwrap()
            .iter()
            .map(|ix| ix.program)
            .collect()
    }

    #[test]
    fn test_build_simple_transfer() {
        let bytes = build_message(intent(vec![transfer()])).unwrap();
        let view = MessageView::parse(&bytes).unwrap();
        assert_eq!(view.fee_payer().unwrap().to_string(), FEE_PAYER);
        assert_eq!(view.recent_blockhash().to_string(), BLOCKHASH);
        assert_eq!(view.instructions().len(), 1);
    }

    #[test]
    fn test_build_with_memo_and_compute_budget() {
        let bytes = build_message(intent(vec![
            InstructionIntent::ComputeBudget {
                unit_limit: Some(200_000),
                unit_price: Some(5_000),
            },
            transfer(),
            InstructionIntent::Memo {
                message: "BitGo transfer".to_string(),
            },
        ]))
        .unwrap();
        assert_eq!(
            programs(&bytes),
            vec![
                COMPUTE_BUDGET_PROGRAM_ID,
                COMPUTE_BUDGET_PROGRAM_ID,
                SYSTEM_PROGRAM_ID,
                MEMO_PROGRAM_ID
            ]
        );
    }

    #[test]
    fn test_durable_nonce_prepends_advance() {
        let mut durable = intent(vec![transfer()]);
        durable.nonce = Nonce::Durable {
            address: RECIPIENT.to_string(),
            authority: FEE_PAYER.to_string(),
            value: BLOCKHASH.to_string(),
        };
        let bytes = build_message(durable).unwrap();
        let view = MessageView::parse(&bytes).unwrap();
        let first = view.resolved_instructions(&[]).unwrap()[0].clone();
        assert_eq!(first.program, SYSTEM_PROGRAM_ID);
        assert_eq!(first.data, &[4, 0, 0, 0][..]);
        assert_eq!(view.instructions().len(), 2);
    }

    #[test]
    fn test_invalid_pubkey() {
        let mut invalid = intent(vec![]);
        invalid.fee_payer = "invalid".to_string();
        let err = build_message(invalid).unwrap_err();
        assert!(err.to_string().contains("Invalid feePayer"));
    }

    #[test]
    fn test_build_from_json_v0() {
        let json = format!(
            r#"{{
                "feePayer": "{FEE_PAYER}",
                "nonce": {{ "type": "blockhash", "value": "{BLOCKHASH}" }},
                "version": "v0",
                "instructions": [
                    {{ "type": "transfer", "from": "{FEE_PAYER}", "to": "{RECIPIENT}", "lamports": "5" }}
                ],
                "lookupTables": [
                    {{ "address": "{TABLE}", "addresses": ["{RECIPIENT}"] }}
                ]
            }}"#,
            TABLE = "AddressLookupTab1e1111111111111111111111111"
        );
        let bytes = build_from_json(&json).unwrap();
        let view = MessageView::parse(&bytes).unwrap();
        assert_eq!(view.version(), Version::V0);
        assert_eq!(view.lookups().len(), 1);
        assert_eq!(view.lookups()[0].read_write, vec![0]);
    }

    #[test]
    fn test_custom_and_token_instructions() {
        let owner = FEE_PAYER.to_string();
        let bytes = build_message(intent(vec![
            InstructionIntent::CreateAta {
                payer: owner.clone(),
                owner: owner.clone(),
                mint: RECIPIENT.to_string(),
                program_id: None,
                idempotent: true,
            },
            InstructionIntent::TokenTransfer {
                source: RECIPIENT.to_string(),
                destination: RECIPIENT.to_string(),
                owner: owner.clone(),
                amount: "10".to_string(),
                mint: Some(RECIPIENT.to_string()),
                decimals: Some(6),
                program_id: None,
            },
            InstructionIntent::Custom {
                program_id: RECIPIENT.to_string(),
                accounts: vec![AccountMetaIntent {
                    pubkey: owner,
                    is_signer: true,
                    is_writable: false,
                }],
                data: BASE64_STANDARD.encode([1, 2, 3]),
            },
        ]))
        .unwrap();

        let view = MessageView::parse(&bytes).unwrap();
        let resolved = view.resolved_instructions(&[]).unwrap();
        assert_eq!(resolved[0].data, &[1][..]);
        assert_eq!(resolved[1].data[0], 12);
        assert_eq!(resolved[2].data, &[1, 2, 3][..]);
    }

    #[test]
    fn test_invalid_json() {
        let err = build_from_json("{\"feePayer\": 1}").unwrap_err();
        assert!(matches!(err, EncodingError::Intent(_)));
    }
}
