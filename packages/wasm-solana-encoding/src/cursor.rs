//! Position/limit cursors over borrowed byte buffers.
//!
//! [`Cursor`] reads and is `Copy`: handing a duplicate to another reader shares
//! the backing bytes but never the position. [`BufferWriter`] writes into a
//! caller-owned `&mut [u8]` and fails at the first byte that does not fit.

use crate::error::{EncodingError, Result};
use crate::pubkey::{PublicKey, PUBLIC_KEY_LENGTH};
use crate::shortvec;

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
    limit: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Cursor {
            data,
            position: 0,
            limit: data.len(),
        }
    }

    /// Independent cursor over the same bytes, starting at the same position.
    pub fn duplicate(&self) -> Self {
        *self
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Bytes between the current position and the limit, without consuming them.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.position..self.limit]
    }

    pub fn peek_u8(&self) -> Result<u8> {
        self.rest().first().copied().ok_or(EncodingError::Truncated)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, consumed) = shortvec::decode(self.rest())?;
        self.position += consumed;
        Ok(value)
    }

    /// Read a varint that counts or indexes something held in memory.
    pub fn read_len(&mut self) -> Result<usize> {
        let value = self.read_varint()?;
        usize::try_from(value).map_err(|_| EncodingError::MalformedVarint)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(EncodingError::Truncated);
        }
        let bytes = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<&'a [u8; N]> {
        let bytes = self.read_bytes(N)?;
        bytes.try_into().map_err(|_| EncodingError::Truncated)
    }

    pub fn read_pubkey(&mut self) -> Result<PublicKey> {
        self.read_array::<PUBLIC_KEY_LENGTH>()
            .map(|bytes| PublicKey::new(*bytes))
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }
}

/// Sequential writer over a fixed-capacity buffer.
#[derive(Debug)]
pub struct BufferWriter<'a> {
    buf: &'a mut [u8],
    position: usize,
}

impl<'a> BufferWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        BufferWriter { buf, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    fn claim(&mut self, len: usize) -> Result<&mut [u8]> {
        if self.remaining() < len {
            return Err(EncodingError::BufferOverflow {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let start = self.position;
        self.position += len;
        Ok(&mut self.buf[start..start + len])
    }

    /// Advance past `len` bytes, leaving whatever they already hold.
    pub fn reserve(&mut self, len: usize) -> Result<()> {
        self.claim(len).map(|_| ())
    }

    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        self.claim(1)?[0] = value;
        Ok(())
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.claim(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    pub fn put_u32_le(&mut self, value: u32) -> Result<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_u64_le(&mut self, value: u64) -> Result<()> {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_pubkey(&mut self, key: &PublicKey) -> Result<()> {
        self.put_bytes(key.as_bytes())
    }

    pub fn put_varint(&mut self, value: u64) -> Result<()> {
        let position = self.position;
        let written = shortvec::encode(value, &mut self.buf[position..])?;
        self.position += written;
        Ok(())
    }

    /// Varint for an in-memory count or index.
    pub fn put_len(&mut self, value: usize) -> Result<()> {
        self.put_varint(value as u64)
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.position]
    }

    /// Release the buffer, returning it with the number of bytes written.
    pub fn finish(self) -> (&'a mut [u8], usize) {
        (self.buf, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_has_independent_position() {
        let bytes = [1u8, 2, 3, 4];
        let mut cursor = Cursor::new(&bytes);
        cursor.read_u8().unwrap();

        let mut copy = cursor.duplicate();
        assert_eq!(copy.read_u8().unwrap(), 2);
        assert_eq!(copy.read_u8().unwrap(), 3);

        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.read_u8().unwrap(), 2);
    }

    #[test]
    fn test_read_past_limit() {
        let bytes = [1u8, 2];
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(cursor.read_bytes(3), Err(EncodingError::Truncated));
        // failed read leaves the position alone
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_bytes(2).unwrap(), &[1, 2]);
        assert_eq!(cursor.read_u8(), Err(EncodingError::Truncated));
    }

    #[test]
    fn test_read_varint_and_pubkey() {
        let mut bytes = vec![0x80, 0x01];
        bytes.extend_from_slice(&[9u8; 32]);
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(cursor.read_varint().unwrap(), 128);
        assert_eq!(cursor.read_pubkey().unwrap(), PublicKey::new([9u8; 32]));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_writer_overflow() {
        let mut buf = [0u8; 3];
        let mut writer = BufferWriter::new(&mut buf);
        writer.put_u8(7).unwrap();
        assert_eq!(
            writer.put_u32_le(1),
            Err(EncodingError::BufferOverflow {
                needed: 4,
                remaining: 2
            })
        );
        assert_eq!(writer.position(), 1);
    }

    #[test]
    fn test_reserve_keeps_prefill() {
        let mut buf = [0xeeu8; 6];
        let mut writer = BufferWriter::new(&mut buf);
        writer.put_u8(1).unwrap();
        writer.reserve(2).unwrap();
        writer.put_varint(300).unwrap();
        let (buf, len) = writer.finish();
        assert_eq!(len, 5);
        assert_eq!(buf, &[1, 0xee, 0xee, 0xac, 0x02, 0xee]);
    }
}
