//! Mask generation function MGF1 from [RFC8017 § B.2.1].
//!
//! [RFC8017 § B.2.1]: https://datatracker.ietf.org/doc/html/rfc8017#appendix-B.2.1

use digest::{Digest, FixedOutputReset};

/// XOR `out` with the MGF1 mask of `seed`: the concatenation of
/// `H(seed || counter)` for counter = 0, 1, 2, ... truncated to `out.len()`.
pub(crate) fn mgf1_xor<D: Digest + FixedOutputReset>(out: &mut [u8], digest: &mut D, seed: &[u8]) {
    let mut counter = [0u8; 4];
    let mut i = 0;

    while i < out.len() {
        Digest::update(digest, seed);
        Digest::update(digest, counter);
        let block = digest.finalize_reset();

        let mut j = 0;
        while j < block.len() && i < out.len() {
            out[i] ^= block[j];
            j += 1;
            i += 1;
        }
        inc_counter(&mut counter);
    }
}

fn inc_counter(counter: &mut [u8; 4]) {
    for byte in counter.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}
