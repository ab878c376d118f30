#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use parallelhash::{ParallelConfig, ParallelHasher, Security};

#[derive(Arbitrary, Debug)]
struct Input {
    data: Vec<u8>,
    custom: Vec<u8>,
    block_size: u16,
    output_bytes: u8,
    workers: u8,
    wide: bool,
}

fuzz_target!(|input: Input| {
    let security = if input.wide {
        Security::Bits256
    } else {
        Security::Bits128
    };
    let block_size = usize::from(input.block_size) + 1;
    let output_bits = (usize::from(input.output_bytes) + 1) * 8;
    let workers = usize::from(input.workers % 8) + 1;

    let sequential = ParallelHasher::with_config(security, ParallelConfig::sequential());
    let parallel = ParallelHasher::with_config(
        security,
        ParallelConfig::new()
            .with_workers(workers)
            .with_sequential_threshold(0),
    );

    // Worker count must never change the digest
    let expected = sequential
        .hash(&input.data, block_size, output_bits, &input.custom)
        .unwrap();
    let actual = parallel
        .hash(&input.data, block_size, output_bits, &input.custom)
        .unwrap();
    assert_eq!(expected, actual, "Parallel digest mismatch");
    assert_eq!(expected.len(), output_bits / 8);

    let expected_xof = sequential
        .hash_xof(&input.data, block_size, output_bits, &input.custom)
        .unwrap();
    let actual_xof = parallel
        .hash_xof(&input.data, block_size, output_bits, &input.custom)
        .unwrap();
    assert_eq!(expected_xof, actual_xof, "Parallel XOF mismatch");
});
