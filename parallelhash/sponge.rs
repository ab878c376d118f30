//! Keccak[c] sponge as used by SHA-3, SHAKE and cSHAKE (FIPS 202)
//!
//! The permutation comes from the `keccak` crate. This module only handles
//! absorbing at a given rate, the domain-separation padding, and squeezing.

use core::mem;

// Compile-time check for little-endian architecture
// Keccak state interpretation assumes little-endian byte order
#[cfg(not(target_endian = "little"))]
compile_error!("This crate requires a little-endian architecture");

/// State size in bytes (1600 bits)
const STATE_SIZE: usize = 200;

/// Domain separation for SHAKE128/SHAKE256: suffix `1111` then the first pad bit
pub(crate) const SHAKE_DOMAIN: u8 = 0x1F;

/// Domain separation for cSHAKE: suffix `00` then the first pad bit
pub(crate) const CSHAKE_DOMAIN: u8 = 0x04;

/// Domain separation for SHA3-224..SHA3-512: suffix `01` then the first pad bit
pub(crate) const SHA3_DOMAIN: u8 = 0x06;

/// Get mutable reference to state as bytes using transmute (zero-copy)
///
/// # Safety
/// This is safe because:
/// - [u64; 25] and [u8; 200] have the same size (200 bytes)
/// - We require little-endian architecture (checked at compile time)
/// - The byte layout matches Keccak's expected lane ordering
#[inline(always)]
fn state_as_bytes_mut(state: &mut [u64; 25]) -> &mut [u8; STATE_SIZE] {
    // SAFETY: Size and alignment are compatible, and we enforce little-endian at compile time
    unsafe { mem::transmute(state) }
}

/// Get reference to state as bytes using transmute (zero-copy)
#[inline(always)]
fn state_as_bytes(state: &[u64; 25]) -> &[u8; STATE_SIZE] {
    // SAFETY: see `state_as_bytes_mut`
    unsafe { mem::transmute(state) }
}

#[inline(always)]
fn xor_into_state(state: &mut [u64; 25], data: &[u8], position: usize) {
    let state_bytes = state_as_bytes_mut(state);
    for (dst, &src) in state_bytes[position..position + data.len()]
        .iter_mut()
        .zip(data)
    {
        *dst ^= src;
    }
}

/// Keccak-f[1600] sponge with a configurable rate and domain separation byte
///
/// Absorbing and squeezing may be split across any number of calls; the
/// output only depends on the concatenation of absorbed bytes.
#[derive(Clone)]
pub(crate) struct KeccakSponge {
    state: [u64; 25],
    rate: usize,
    position: usize,
    domain_sep: u8,
    squeezing: bool,
}

impl KeccakSponge {
    /// `rate` is in bytes and must be a non-zero multiple of 8 below 200
    pub(crate) fn new(rate: usize, domain_sep: u8) -> Self {
        debug_assert!(
            rate > 0 && rate < STATE_SIZE && rate % 8 == 0,
            "rate must be a lane-aligned value below the state size"
        );
        debug_assert!(
            (0x01..=0x7F).contains(&domain_sep),
            "Domain separation byte must be in range 0x01..=0x7F"
        );
        Self {
            state: [0u64; 25],
            rate,
            position: 0,
            domain_sep,
            squeezing: false,
        }
    }

    /// Absorb input data
    #[inline]
    pub(crate) fn update(&mut self, data: &[u8]) {
        debug_assert!(!self.squeezing, "absorbing after squeezing has started");
        let mut offset = 0;
        while offset < data.len() {
            let to_copy = (data.len() - offset).min(self.rate - self.position);
            xor_into_state(&mut self.state, &data[offset..offset + to_copy], self.position);
            self.position += to_copy;
            offset += to_copy;

            if self.position == self.rate {
                keccak::f1600(&mut self.state);
                self.position = 0;
            }
        }
    }

    /// Apply the domain separation byte and pad10*1, then switch to squeezing
    fn pad(&mut self) {
        let state_bytes = state_as_bytes_mut(&mut self.state);
        state_bytes[self.position] ^= self.domain_sep;
        state_bytes[self.rate - 1] ^= 0x80;

        keccak::f1600(&mut self.state);
        self.position = 0;
        self.squeezing = true;
    }

    /// Squeeze output; successive calls continue the same output stream
    pub(crate) fn squeeze(&mut self, output: &mut [u8]) {
        if !self.squeezing {
            self.pad();
        }

        let mut offset = 0;
        while offset < output.len() {
            if self.position == self.rate {
                keccak::f1600(&mut self.state);
                self.position = 0;
            }
            let to_copy = (output.len() - offset).min(self.rate - self.position);
            let state_bytes = state_as_bytes(&self.state);
            output[offset..offset + to_copy]
                .copy_from_slice(&state_bytes[self.position..self.position + to_copy]);
            self.position += to_copy;
            offset += to_copy;
        }
    }

    /// Finalize and squeeze output
    pub(crate) fn finalize(mut self, output: &mut [u8]) {
        self.squeeze(output);
    }
}
