//! Compact unsigned integer encoding ("short vec").
//!
//! Seven bits per byte, least-significant group first. A set high bit means
//! another byte follows. Every count field of the wire format uses it.

use crate::error::{EncodingError, Result};

/// Longest encoding of a `u64`.
pub const MAX_ENCODING_LENGTH: usize = 10;

/// Number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Encode `value` into the front of `out`, returning the number of bytes written.
pub fn encode(value: u64, out: &mut [u8]) -> Result<usize> {
    let len = encoded_len(value);
    if out.len() < len {
        return Err(EncodingError::BufferOverflow {
            needed: len,
            remaining: out.len(),
        });
    }

    write_groups(value, &mut out[..len]);
    Ok(len)
}

// `out` must be exactly `encoded_len(value)` long
fn write_groups(mut rem: u64, out: &mut [u8]) {
    for byte in out.iter_mut() {
        *byte = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem != 0 {
            *byte |= 0x80;
        }
    }
}

/// Encode a signed value. Negative values have no encoding.
pub fn encode_signed(value: i64, out: &mut [u8]) -> Result<usize> {
    let value = u64::try_from(value).map_err(|_| EncodingError::InvalidEncoding)?;
    encode(value, out)
}

pub fn to_vec(value: u64) -> Vec<u8> {
    let mut out = vec![0u8; encoded_len(value)];
    write_groups(value, &mut out);
    out
}

/// Decode a value from the front of `bytes`, returning it with the number of
/// bytes consumed.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    for (position, byte) in bytes.iter().enumerate() {
        if position == MAX_ENCODING_LENGTH {
            return Err(EncodingError::MalformedVarint);
        }
        let group = u64::from(byte & 0x7f);
        let shift = 7 * position as u32;
        // the tenth byte only has room for the top bit of a u64
        if shift == 63 && group > 1 {
            return Err(EncodingError::MalformedVarint);
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            return Ok((value, position + 1));
        }
    }
    Err(EncodingError::Truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, &[0x00])]
    #[case(1, &[0x01])]
    #[case(127, &[0x7f])]
    #[case(128, &[0x80, 0x01])]
    #[case(255, &[0xff, 0x01])]
    #[case(16383, &[0xff, 0x7f])]
    #[case(16384, &[0x80, 0x80, 0x01])]
    #[case(65535, &[0xff, 0xff, 0x03])]
    fn test_known_encodings(#[case] value: u64, #[case] expected: &[u8]) {
        assert_eq!(to_vec(value), expected);
        assert_eq!(encoded_len(value), expected.len());
        assert_eq!(decode(expected).unwrap(), (value, expected.len()));
    }

    #[rstest]
    #[case(u64::from(u32::MAX))]
    #[case(u64::MAX)]
    #[case(1 << 35)]
    fn test_wide_values(#[case] value: u64) {
        let bytes = to_vec(value);
        assert!(bytes.len() <= MAX_ENCODING_LENGTH);
        assert_eq!(decode(&bytes).unwrap(), (value, bytes.len()));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        assert_eq!(decode(&[0x80, 0x01, 0xaa, 0xbb]).unwrap(), (128, 2));
    }

    #[test]
    fn test_negative_value_rejected() {
        let mut out = [0u8; 4];
        assert_eq!(
            encode_signed(-1, &mut out),
            Err(EncodingError::InvalidEncoding)
        );
        assert_eq!(encode_signed(300, &mut out), Ok(2));
        assert_eq!(&out[..2], &[0xac, 0x02]);
    }

    #[test]
    fn test_encode_overflow() {
        let mut out = [0u8; 1];
        assert_eq!(
            encode(128, &mut out),
            Err(EncodingError::BufferOverflow {
                needed: 2,
                remaining: 1
            })
        );
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(decode(&[]), Err(EncodingError::Truncated));
        assert_eq!(decode(&[0x80, 0x80]), Err(EncodingError::Truncated));
    }

    #[test]
    fn test_overlong_input() {
        assert_eq!(decode(&[0xff; 11]), Err(EncodingError::MalformedVarint));
        let mut too_wide = [0xffu8; 10];
        too_wide[9] = 0x02;
        assert_eq!(decode(&too_wide), Err(EncodingError::MalformedVarint));
    }
}
