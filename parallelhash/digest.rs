//! Fixed-output and plain XOF helpers
//!
//! SHA-256 comes from `sha2`; the SHA-3 and SHAKE functions run on the same
//! sponge as cSHAKE.

use sha2::{Digest, Sha256};

use crate::cshake::cshake;
use crate::error::Result;
use crate::security::Security;
use crate::sponge::{KeccakSponge, SHA3_DOMAIN};

/// SHA3-256 rate in bytes (1088 bits / 8)
const SHA3_256_RATE: usize = 136;
/// SHA3-512 rate in bytes (576 bits / 8)
const SHA3_512_RATE: usize = 72;

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut sponge = KeccakSponge::new(SHA3_256_RATE, SHA3_DOMAIN);
    sponge.update(data);
    let mut output = [0u8; 32];
    sponge.finalize(&mut output);
    output
}

pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    let mut sponge = KeccakSponge::new(SHA3_512_RATE, SHA3_DOMAIN);
    sponge.update(data);
    let mut output = [0u8; 64];
    sponge.finalize(&mut output);
    output
}

/// SHAKE128 with `output_bits` of output (a positive multiple of 8)
pub fn shake128(data: &[u8], output_bits: usize) -> Result<Vec<u8>> {
    cshake(data, output_bits, b"", b"", Security::Bits128)
}

/// SHAKE256 with `output_bits` of output (a positive multiple of 8)
pub fn shake256(data: &[u8], output_bits: usize) -> Result<Vec<u8>> {
    cshake(data, output_bits, b"", b"", Security::Bits256)
}
