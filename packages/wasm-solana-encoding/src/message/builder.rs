//! Message configuration and the seal → sign pipeline.

use super::writer::write_message;
use super::{MessageView, Version, MAX_MESSAGE_SIZE};
use crate::accounts::Accounts;
use crate::error::{EncodingError, Result};
use crate::instruction::Instruction;
use crate::lookup::AddressLookupTable;
use crate::pubkey::{Blockhash, PublicKey};
use crate::signer::{sign_message, MessageSigner, Signers};
use log::debug;

/// Everything needed to seal a message. Nothing is validated until [`seal`](Self::seal).
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    version: Version,
    payer: Option<PublicKey>,
    recent_blockhash: Option<Blockhash>,
    instructions: Vec<Instruction>,
    lookup_tables: Vec<AddressLookupTable>,
}

impl MessageBuilder {
    pub fn legacy() -> Self {
        Self::default()
    }

    pub fn v0() -> Self {
        Self::default().version(Version::V0)
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn payer(mut self, payer: PublicKey) -> Self {
        self.payer = Some(payer);
        self
    }

    pub fn recent_blockhash(mut self, blockhash: Blockhash) -> Self {
        self.recent_blockhash = Some(blockhash);
        self
    }

    pub fn instruction(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    pub fn instructions(mut self, instructions: impl IntoIterator<Item = Instruction>) -> Self {
        self.instructions.extend(instructions);
        self
    }

    /// Tables consulted when sealing a v0 message. Legacy messages ignore them.
    pub fn lookup_table(mut self, table: AddressLookupTable) -> Self {
        self.lookup_tables.push(table);
        self
    }

    pub fn lookup_tables(mut self, tables: impl IntoIterator<Item = AddressLookupTable>) -> Self {
        self.lookup_tables.extend(tables);
        self
    }

    pub fn get_version(&self) -> Version {
        self.version
    }

    pub fn get_payer(&self) -> Option<PublicKey> {
        self.payer
    }

    pub fn get_instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Resolve accounts and write the message into `buffer`.
    ///
    /// Signature slots are reserved but left as the caller pre-filled them.
    pub fn seal<'a>(&self, buffer: &'a mut [u8]) -> Result<SealedMessage<'a>> {
        let payer = self.payer.ok_or(EncodingError::MissingPayer)?;
        let recent_blockhash = self
            .recent_blockhash
            .ok_or(EncodingError::MissingBlockhash)?;

        let accounts = match self.version {
            Version::Legacy => Accounts::resolve(&self.instructions, &payer)?,
            Version::V0 => {
                Accounts::resolve_with_lookups(&self.instructions, &payer, &self.lookup_tables)?
            }
        };
        let len = write_message(
            self.version,
            &accounts,
            &recent_blockhash,
            &self.instructions,
            buffer,
        )?;

        debug!(
            "sealed {:?} message: {} static accounts, {} lookup tables, {} bytes",
            self.version,
            accounts.static_accounts().len(),
            accounts.lookup_entries().len(),
            len
        );
        Ok(SealedMessage { buffer, len })
    }

    /// Seal into a zeroed buffer of the maximum packet size and return the encoded bytes.
    pub fn seal_to_vec(&self) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; MAX_MESSAGE_SIZE];
        let len = self.seal(&mut buffer)?.len();
        buffer.truncate(len);
        Ok(buffer)
    }
}

/// A written message that owns its buffer until it is released or signed.
#[derive(Debug)]
pub struct SealedMessage<'a> {
    buffer: &'a mut [u8],
    len: usize,
}

impl<'a> SealedMessage<'a> {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn view(&self) -> Result<MessageView<'_>> {
        MessageView::parse(self.as_bytes())
    }

    /// Release the encoded bytes without signing.
    pub fn unsigned(self) -> &'a [u8] {
        let buffer: &'a [u8] = self.buffer;
        &buffer[..self.len]
    }

    /// Start collecting signers for this message.
    pub fn signed<'s>(self) -> SignedMessageBuilder<'a, 's> {
        SignedMessageBuilder {
            message: self,
            signers: Signers::new(),
        }
    }
}

/// Collects signing functions, then fills the sealed message's signature slots.
#[derive(Debug)]
pub struct SignedMessageBuilder<'a, 's> {
    message: SealedMessage<'a>,
    signers: Signers<'s>,
}

impl<'a, 's> SignedMessageBuilder<'a, 's> {
    /// Sign `account`'s slot with `signer`. A later call for the same account replaces it.
    pub fn by(mut self, account: PublicKey, signer: impl MessageSigner + 's) -> Self {
        self.signers.insert(account, signer);
        self
    }

    pub fn build(self) -> Result<&'a [u8]> {
        let SealedMessage { buffer, len } = self.message;
        let message = &mut buffer[..len];
        sign_message(message, &self.signers)?;
        Ok(message)
    }
}

/// Instructions encoded as a standalone legacy message, for programs that take
/// another message as instruction data.
///
/// The blockhash is zeroed. Without an explicit payer the zero address is used.
#[derive(Debug, Clone, Default)]
pub struct InnerInstructions {
    pub payer: Option<PublicKey>,
    pub instructions: Vec<Instruction>,
}

impl InnerInstructions {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        InnerInstructions {
            payer: None,
            instructions,
        }
    }

    pub fn with_payer(mut self, payer: PublicKey) -> Self {
        self.payer = Some(payer);
        self
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        MessageBuilder::legacy()
            .payer(self.payer.unwrap_or_default())
            .recent_blockhash(Blockhash::default())
            .instructions(self.instructions.iter().cloned())
            .seal_to_vec()
    }

    pub fn build(payer: Option<PublicKey>, instructions: Vec<Instruction>) -> Result<Vec<u8>> {
        InnerInstructions {
            payer,
            instructions,
        }
        .encode()
    }
}
