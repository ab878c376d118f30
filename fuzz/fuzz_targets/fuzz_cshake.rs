#![no_main]

use libfuzzer_sys::fuzz_target;
use parallelhash::{cshake, Security};
use sha3::digest::{ExtendableOutput, Update};
use sha3::{Shake128, Shake256};

fuzz_target!(|data: &[u8]| {
    // Empty name and customization must reduce to SHAKE
    let ours = cshake(data, 8 * 200, b"", b"", Security::Bits128).unwrap();
    let mut external = vec![0u8; 200];
    let mut shake = Shake128::default();
    shake.update(data);
    shake.finalize_xof_into(&mut external);
    assert_eq!(ours, external, "SHAKE128 conformance mismatch");

    // Customization separates domains
    let custom = cshake(data, 256, b"", b"fuzz", Security::Bits128).unwrap();
    assert_ne!(custom, ours[..32], "Customization had no effect");

    let ours = cshake(data, 8 * 200, b"", b"", Security::Bits256).unwrap();
    let mut shake = Shake256::default();
    shake.update(data);
    shake.finalize_xof_into(&mut external);
    assert_eq!(ours, external, "SHAKE256 conformance mismatch");
});
