//! Security levels shared by cSHAKE and ParallelHash

use serde::{Deserialize, Serialize};

use crate::error::{HashError, Result};

/// Security strength of a construction
///
/// The two levels differ only in sponge rate, the underlying SHAKE function
/// and the length of ParallelHash's per-block digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Security {
    /// cSHAKE128 / ParallelHash128: rate 168 bytes, 32-byte block digests
    Bits128,
    /// cSHAKE256 / ParallelHash256: rate 136 bytes, 64-byte block digests
    Bits256,
}

impl Security {
    /// Sponge rate in bytes
    pub const fn rate(self) -> usize {
        match self {
            Security::Bits128 => 168,
            Security::Bits256 => 136,
        }
    }

    /// Length in bytes of the intermediate digest of one ParallelHash block
    pub const fn digest_len(self) -> usize {
        match self {
            Security::Bits128 => 32,
            Security::Bits256 => 64,
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Security::Bits128 => 128,
            Security::Bits256 => 256,
        }
    }

    /// Select a level from its strength in bits
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            128 => Ok(Security::Bits128),
            256 => Ok(Security::Bits256),
            other => Err(HashError::InvalidParameter(format!(
                "security level must be 128 or 256 bits, got {other}"
            ))),
        }
    }
}

impl TryFrom<u32> for Security {
    type Error = HashError;

    fn try_from(bits: u32) -> Result<Self> {
        Self::from_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Security::Bits128.rate(), 168);
        assert_eq!(Security::Bits256.rate(), 136);
        assert_eq!(Security::Bits128.digest_len() * 8, 256);
        assert_eq!(Security::Bits256.digest_len() * 8, 512);
    }

    #[test]
    fn test_from_bits() {
        assert_eq!(Security::from_bits(128), Ok(Security::Bits128));
        assert_eq!(Security::try_from(256), Ok(Security::Bits256));
        for bad in [0, 64, 127, 192, 512] {
            assert!(matches!(
                Security::from_bits(bad),
                Err(HashError::InvalidParameter(_))
            ));
        }
    }
}
