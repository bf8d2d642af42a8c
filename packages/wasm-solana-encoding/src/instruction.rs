//! Instructions and the account references they carry.

use crate::cursor::BufferWriter;
use crate::error::{EncodingError, Result};
use crate::pubkey::PublicKey;
use std::fmt;
use std::sync::Arc;

/// One use of an account by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountReference {
    pub account: PublicKey,
    pub is_signer: bool,
    pub is_writer: bool,
    pub is_executable: bool,
}

impl AccountReference {
    pub fn new(account: PublicKey, is_signer: bool, is_writer: bool) -> Self {
        AccountReference {
            account,
            is_signer,
            is_writer,
            is_executable: false,
        }
    }

    pub fn signer_writer(account: PublicKey) -> Self {
        Self::new(account, true, true)
    }

    pub fn signer(account: PublicKey) -> Self {
        Self::new(account, true, false)
    }

    pub fn writer(account: PublicKey) -> Self {
        Self::new(account, false, true)
    }

    pub fn readonly(account: PublicKey) -> Self {
        Self::new(account, false, false)
    }

    /// The implicit reference an instruction makes to its own program.
    pub fn program(account: PublicKey) -> Self {
        AccountReference {
            account,
            is_signer: false,
            is_writer: false,
            is_executable: true,
        }
    }

    /// OR the flags of another reference to the same account into this one.
    pub fn merge(&mut self, other: &AccountReference) {
        self.is_signer |= other.is_signer;
        self.is_writer |= other.is_writer;
        self.is_executable |= other.is_executable;
    }
}

type DataWriterFn = dyn Fn(&mut BufferWriter<'_>) -> Result<()> + Send + Sync;

/// Instruction payload: either owned bytes or a writer invoked at seal time.
#[derive(Clone)]
pub enum InstructionData {
    Bytes(Vec<u8>),
    Writer { len: usize, write: Arc<DataWriterFn> },
}

impl InstructionData {
    pub fn len(&self) -> usize {
        match self {
            InstructionData::Bytes(bytes) => bytes.len(),
            InstructionData::Writer { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write exactly `len()` bytes at the writer's position.
    pub fn write_to(&self, writer: &mut BufferWriter<'_>) -> Result<()> {
        match self {
            InstructionData::Bytes(bytes) => writer.put_bytes(bytes),
            InstructionData::Writer { len, write } => {
                let start = writer.position();
                write(writer)?;
                let written = writer.position() - start;
                if written != *len {
                    return Err(EncodingError::DataLengthMismatch {
                        declared: *len,
                        written,
                    });
                }
                Ok(())
            }
        }
    }

    /// Materialise the payload as owned bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        match self {
            InstructionData::Bytes(bytes) => Ok(bytes.clone()),
            InstructionData::Writer { len, .. } => {
                let mut out = vec![0u8; *len];
                let mut writer = BufferWriter::new(&mut out);
                self.write_to(&mut writer)?;
                Ok(out)
            }
        }
    }
}

impl fmt::Debug for InstructionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionData::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            InstructionData::Writer { len, .. } => {
                f.debug_struct("Writer").field("len", len).finish_non_exhaustive()
            }
        }
    }
}

/// A program invocation: the program, the accounts it touches, and its data.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub program: PublicKey,
    pub accounts: Vec<AccountReference>,
    pub data: InstructionData,
}

impl Instruction {
    pub fn new(program: PublicKey, accounts: Vec<AccountReference>, data: Vec<u8>) -> Self {
        Instruction {
            program,
            accounts,
            data: InstructionData::Bytes(data),
        }
    }

    /// Instruction whose data is produced by `write` when the message is sealed.
    pub fn with_writer<F>(
        program: PublicKey,
        accounts: Vec<AccountReference>,
        len: usize,
        write: F,
    ) -> Self
    where
        F: Fn(&mut BufferWriter<'_>) -> Result<()> + Send + Sync + 'static,
    {
        Instruction {
            program,
            accounts,
            data: InstructionData::Writer {
                len,
                write: Arc::new(write),
            },
        }
    }

    pub fn builder() -> InstructionBuilder {
        InstructionBuilder::default()
    }
}

/// Incremental construction of an [`Instruction`].
#[derive(Debug, Default)]
pub struct InstructionBuilder {
    program: Option<PublicKey>,
    accounts: Vec<AccountReference>,
    data: Option<InstructionData>,
}

impl InstructionBuilder {
    pub fn program(mut self, program: PublicKey) -> Self {
        self.program = Some(program);
        self
    }

    pub fn account(mut self, account: PublicKey, is_signer: bool, is_writer: bool) -> Self {
        self.accounts.push(AccountReference::new(account, is_signer, is_writer));
        self
    }

    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = Some(InstructionData::Bytes(data));
        self
    }

    pub fn data_writer<F>(mut self, len: usize, write: F) -> Self
    where
        F: Fn(&mut BufferWriter<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.data = Some(InstructionData::Writer {
            len,
            write: Arc::new(write),
        });
        self
    }

    pub fn build(self) -> Result<Instruction> {
        Ok(Instruction {
            program: self.program.ok_or(EncodingError::MissingProgram)?,
            accounts: self.accounts,
            data: self.data.unwrap_or(InstructionData::Bytes(Vec::new())),
        })
    }
}
