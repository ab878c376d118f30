//! cSHAKE128 and cSHAKE256 (NIST SP 800-185 section 3)

use tracing::trace;

use crate::encoding::{byte_pad, encode_string};
use crate::error::{HashError, Result};
use crate::security::Security;
use crate::sponge::{KeccakSponge, CSHAKE_DOMAIN, SHAKE_DOMAIN};

/// Validate an output length given in bits and return it in bytes
pub(crate) fn output_len(output_bits: usize) -> Result<usize> {
    if output_bits == 0 || output_bits % 8 != 0 {
        return Err(HashError::InvalidLength(format!(
            "output length must be a positive multiple of 8 bits, got {output_bits}"
        )));
    }
    Ok(output_bits / 8)
}

/// Incremental cSHAKE hasher
///
/// With an empty function name and customization string this is plain
/// SHAKE128/SHAKE256: no prefix is absorbed and the SHAKE padding is used.
#[derive(Clone)]
pub struct CShake {
    sponge: KeccakSponge,
    security: Security,
}

impl CShake {
    /// Create a hasher for function name `name` and customization `custom`
    ///
    /// Absorbs `bytepad(encode_string(name) || encode_string(custom), rate)`
    /// unless both strings are empty.
    pub fn new(security: Security, name: &[u8], custom: &[u8]) -> Result<Self> {
        let rate = security.rate();
        if name.is_empty() && custom.is_empty() {
            return Ok(Self {
                sponge: KeccakSponge::new(rate, SHAKE_DOMAIN),
                security,
            });
        }

        let mut encoded = encode_string(name)?;
        encoded.extend_from_slice(&encode_string(custom)?);
        let prefix = byte_pad(&encoded, rate)?;
        trace!(
            ?security,
            name_len = name.len(),
            custom_len = custom.len(),
            prefix_len = prefix.len(),
            "absorbing cSHAKE prefix"
        );

        let mut sponge = KeccakSponge::new(rate, CSHAKE_DOMAIN);
        sponge.update(&prefix);
        Ok(Self { sponge, security })
    }

    /// Plain SHAKE of the given level
    pub fn shake(security: Security) -> Self {
        Self {
            sponge: KeccakSponge::new(security.rate(), SHAKE_DOMAIN),
            security,
        }
    }

    pub fn security(&self) -> Security {
        self.security
    }

    /// Absorb input data
    pub fn update(&mut self, data: &[u8]) {
        self.sponge.update(data);
    }

    /// Squeeze output; no more input can be absorbed afterwards
    pub fn squeeze(&mut self, output: &mut [u8]) {
        self.sponge.squeeze(output);
    }

    /// Finalize and squeeze output
    pub fn finalize(self, output: &mut [u8]) {
        self.sponge.finalize(output);
    }
}

/// `cSHAKE(X, L, N, S)` at the given security level
///
/// `output_bits` must be a positive multiple of 8; exactly `output_bits / 8`
/// bytes are returned.
pub fn cshake(
    data: &[u8],
    output_bits: usize,
    name: &[u8],
    custom: &[u8],
    security: Security,
) -> Result<Vec<u8>> {
    let len = output_len(output_bits)?;
    let mut hasher = CShake::new(security, name, custom)?;
    hasher.update(data);
    let mut output = vec![0u8; len];
    hasher.finalize(&mut output);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // NIST SP 800-185 cSHAKE samples
    const SAMPLE_SHORT: [u8; 4] = [0x00, 0x01, 0x02, 0x03];

    fn sample_long() -> Vec<u8> {
        (0u8..200).collect()
    }

    #[test]
    fn test_cshake128_sample_1() {
        let output = cshake(&SAMPLE_SHORT, 256, b"", b"Email Signature", Security::Bits128)
            .unwrap();
        assert_eq!(
            output,
            hex!("c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5")
        );
    }

    #[test]
    fn test_cshake128_sample_2() {
        let output = cshake(&sample_long(), 256, b"", b"Email Signature", Security::Bits128)
            .unwrap();
        assert_eq!(
            output,
            hex!("c5221d50e4f822d96a2e8881a961420f294b7b24fe3d2094baed2c6524cc166b")
        );
    }

    #[test]
    fn test_cshake256_sample_1() {
        let output = cshake(&SAMPLE_SHORT, 512, b"", b"Email Signature", Security::Bits256)
            .unwrap();
        assert_eq!(
            output,
            hex!(
                "d008828e2b80ac9d2218ffee1d070c48b8e4c87bff32c9699d5b6896eee0edd1"
                "64020e2be0560858d9c00c037e34a96937c561a74c412bb4c746469527281c8c"
            )
        );
    }

    #[test]
    fn test_cshake256_sample_2() {
        let output = cshake(&sample_long(), 512, b"", b"Email Signature", Security::Bits256)
            .unwrap();
        assert_eq!(
            output,
            hex!(
                "07dc27b11e51fbac75bc7b3c1d983e8b4b85fb1defaf218912ac864302730917"
                "27f42b17ed1df63e8ec118f04b23633c1dfb1574c8fb55cb45da8e25afb092bb"
            )
        );
    }

    #[test]
    fn test_empty_name_and_custom_is_shake() {
        let output = cshake(&[], 256, b"", b"", Security::Bits128).unwrap();
        assert_eq!(
            output,
            hex!("7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26")
        );

        let mut shake = CShake::shake(Security::Bits256);
        shake.update(b"abc");
        let mut expected = [0u8; 40];
        shake.finalize(&mut expected);
        assert_eq!(
            cshake(b"abc", 320, b"", b"", Security::Bits256).unwrap(),
            expected
        );
    }

    #[test]
    fn test_name_and_custom_separate_domains() {
        let data = b"domain separation";
        let plain = cshake(data, 256, b"", b"", Security::Bits128).unwrap();
        let named = cshake(data, 256, b"N", b"", Security::Bits128).unwrap();
        let custom = cshake(data, 256, b"", b"N", Security::Bits128).unwrap();
        assert_ne!(plain, named);
        assert_ne!(plain, custom);
        assert_ne!(named, custom);
    }

    #[test]
    fn test_output_length_validation() {
        for bad in [0, 1, 7, 12, 255] {
            assert!(matches!(
                cshake(b"x", bad, b"", b"S", Security::Bits128),
                Err(HashError::InvalidLength(_))
            ));
        }
        assert_eq!(cshake(b"x", 8, b"", b"S", Security::Bits128).unwrap().len(), 1);
        assert_eq!(
            cshake(b"x", 8 * 1000, b"", b"S", Security::Bits256).unwrap().len(),
            1000
        );
    }

    #[test]
    fn test_incremental_and_split_squeeze() {
        let data = sample_long();
        let expected = cshake(&data, 8 * 300, b"fn", b"custom", Security::Bits256).unwrap();

        let mut hasher = CShake::new(Security::Bits256, b"fn", b"custom").unwrap();
        hasher.update(&data[..77]);
        hasher.update(&data[77..]);
        let mut output = vec![0u8; 300];
        hasher.squeeze(&mut output[..150]);
        hasher.squeeze(&mut output[150..]);
        assert_eq!(output, expected);
    }
}
