//! Integer and string encodings from NIST SP 800-185 section 2.3
//!
//! Every variable-length field absorbed by cSHAKE and ParallelHash carries one
//! of these length prefixes or suffixes.

use crate::error::{HashError, Result};

/// Eight value bytes plus the length byte
const MAX_ENCODED_LEN: usize = 9;

/// An encoded integer held inline, so hot paths can absorb it without allocating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedInt {
    buf: [u8; MAX_ENCODED_LEN],
    len: usize,
}

impl EncodedInt {
    /// The encoding, length byte included
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl AsRef<[u8]> for EncodedInt {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Minimal number of bytes holding `x`, never less than one
#[inline]
fn value_len(x: u64) -> usize {
    let significant_bits = (u64::BITS - x.leading_zeros()) as usize;
    significant_bits.div_ceil(8).max(1)
}

/// `left_encode(x)`: the byte count `n` followed by `x` as `n` big-endian bytes
///
/// `left_encode(0)` is `01 00`. A `u64` never needs more than eight value
/// bytes, so the length byte is always in range.
pub fn left_encode(x: u64) -> EncodedInt {
    let n = value_len(x);
    let mut buf = [0u8; MAX_ENCODED_LEN];
    buf[0] = n as u8;
    buf[1..=n].copy_from_slice(&x.to_be_bytes()[8 - n..]);
    EncodedInt { buf, len: n + 1 }
}

/// `right_encode(x)`: `x` as `n` big-endian bytes followed by the byte count `n`
pub fn right_encode(x: u64) -> EncodedInt {
    let n = value_len(x);
    let mut buf = [0u8; MAX_ENCODED_LEN];
    buf[..n].copy_from_slice(&x.to_be_bytes()[8 - n..]);
    buf[n] = n as u8;
    EncodedInt { buf, len: n + 1 }
}

/// Convert a host size into an encodable integer
pub(crate) fn to_encodable(x: usize, what: &str) -> Result<u64> {
    u64::try_from(x)
        .map_err(|_| HashError::InvalidLength(format!("{what} ({x}) does not fit in 64 bits")))
}

/// Length of a byte string in bits, as absorbed by `encode_string`
pub(crate) fn bit_len(bytes: usize) -> Result<u64> {
    to_encodable(bytes, "string length")?
        .checked_mul(8)
        .ok_or_else(|| {
            HashError::InvalidLength(format!("bit length of a {bytes}-byte string overflows"))
        })
}

/// `encode_string(S)`: `left_encode(bit length of S) || S`
pub fn encode_string(s: &[u8]) -> Result<Vec<u8>> {
    let prefix = left_encode(bit_len(s.len())?);
    let mut out = Vec::with_capacity(prefix.as_bytes().len() + s.len());
    out.extend_from_slice(prefix.as_bytes());
    out.extend_from_slice(s);
    Ok(out)
}

/// `bytepad(X, w)`: `left_encode(w) || X`, zero-padded to a multiple of `w`
pub fn byte_pad(x: &[u8], w: usize) -> Result<Vec<u8>> {
    if w == 0 {
        return Err(HashError::InvalidParameter(
            "bytepad width must be at least 1".to_string(),
        ));
    }
    let prefix = left_encode(to_encodable(w, "bytepad width")?);
    let unpadded = prefix.as_bytes().len() + x.len();
    let mut out = Vec::with_capacity(unpadded.div_ceil(w) * w);
    out.extend_from_slice(prefix.as_bytes());
    out.extend_from_slice(x);
    out.resize(unpadded.div_ceil(w) * w, 0);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_left(enc: &[u8]) -> u64 {
        let n = enc[0] as usize;
        assert_eq!(enc.len(), n + 1);
        enc[1..].iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
    }

    fn decode_right(enc: &[u8]) -> u64 {
        let n = enc[enc.len() - 1] as usize;
        assert_eq!(enc.len(), n + 1);
        enc[..n].iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
    }

    #[test]
    fn test_left_encode_zero() {
        assert_eq!(left_encode(0).as_bytes(), &[0x01, 0x00]);
    }

    #[test]
    fn test_right_encode_zero() {
        assert_eq!(right_encode(0).as_bytes(), &[0x00, 0x01]);
    }

    #[test]
    fn test_known_encodings() {
        // Values used by cSHAKE128, cSHAKE256 and ParallelHash
        assert_eq!(left_encode(168).as_bytes(), &[0x01, 0xA8]);
        assert_eq!(left_encode(136).as_bytes(), &[0x01, 0x88]);
        assert_eq!(left_encode(256).as_bytes(), &[0x02, 0x01, 0x00]);
        assert_eq!(right_encode(256).as_bytes(), &[0x01, 0x00, 0x02]);
        assert_eq!(right_encode(65538).as_bytes(), &[0x01, 0x00, 0x02, 0x03]);
        assert_eq!(
            left_encode(u64::MAX).as_bytes(),
            &[0x08, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_roundtrip_and_minimality() {
        let values = [
            0u64,
            1,
            255,
            256,
            65535,
            65536,
            (1 << 24) - 1,
            1 << 24,
            1 << 40,
            u64::MAX - 1,
            u64::MAX,
        ];
        for &x in &values {
            let left = left_encode(x);
            let right = right_encode(x);
            assert_eq!(decode_left(left.as_bytes()), x);
            assert_eq!(decode_right(right.as_bytes()), x);

            // Smallest n with x < 256^n
            let n = left.as_bytes().len() - 1;
            assert!(n >= 1);
            if n < 8 {
                assert!(x < 1u64 << (8 * n));
            }
            if n > 1 {
                assert!(x >= 1u64 << (8 * (n - 1)));
            }
            assert_eq!(right.as_bytes().len(), left.as_bytes().len());
        }
    }

    #[test]
    fn test_encoded_int_holds_value_and_length_byte() {
        for x in [0u64, 1, 255, 256, u64::MAX] {
            let left = left_encode(x);
            let right = right_encode(x);
            assert!(left.as_bytes().len() >= 2);
            assert_eq!(left.as_ref(), left.as_bytes());
            assert_eq!(right.as_bytes().len(), left.as_bytes().len());
        }
        assert_eq!(left_encode(u64::MAX).as_bytes().len(), MAX_ENCODED_LEN);
    }

    #[test]
    fn test_encode_string_uses_bit_length() {
        assert_eq!(encode_string(b"").unwrap(), vec![0x01, 0x00]);
        let mut expected = vec![0x01, 0x60];
        expected.extend_from_slice(b"ParallelHash");
        assert_eq!(encode_string(b"ParallelHash").unwrap(), expected);

        let long = vec![0xAB; 40];
        let enc = encode_string(&long).unwrap();
        assert_eq!(&enc[..3], &[0x02, 0x01, 0x40]);
        assert_eq!(&enc[3..], &long[..]);
    }

    #[test]
    fn test_byte_pad_multiple_of_width() {
        for w in [1usize, 2, 7, 72, 136, 168, 300] {
            for len in [0usize, 1, 5, 135, 136, 167, 168, 500] {
                let x = vec![0x5Au8; len];
                let padded = byte_pad(&x, w).unwrap();
                let prefix = left_encode(w as u64);
                let prefix = prefix.as_bytes();
                assert_eq!(padded.len() % w, 0);
                assert!(padded.len() >= prefix.len() + len);
                assert!(padded.len() < prefix.len() + len + w);
                assert_eq!(&padded[..prefix.len()], prefix);
                assert_eq!(&padded[prefix.len()..prefix.len() + len], &x[..]);
                assert!(padded[prefix.len() + len..].iter().all(|&b| b == 0));
            }
        }
    }

    #[test]
    fn test_byte_pad_cshake_prefix() {
        // bytepad(encode_string("") || encode_string("Email Signature"), 168)
        let mut x = encode_string(b"").unwrap();
        x.extend(encode_string(b"Email Signature").unwrap());
        let padded = byte_pad(&x, 168).unwrap();
        assert_eq!(padded.len(), 168);
        assert_eq!(&padded[..6], &[0x01, 0xA8, 0x01, 0x00, 0x01, 0x78]);
    }

    #[test]
    fn test_byte_pad_rejects_zero_width() {
        assert!(matches!(
            byte_pad(b"abc", 0),
            Err(HashError::InvalidParameter(_))
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_bit_len_overflow() {
        assert_eq!(bit_len(3).unwrap(), 24);
        assert!(matches!(
            bit_len(usize::MAX),
            Err(HashError::InvalidLength(_))
        ));
    }
}
