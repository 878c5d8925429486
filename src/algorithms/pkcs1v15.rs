//! PKCS#1 v1.5 block formatting as described in [RFC8017 § 7.2] and [§ 8.2].
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2
//! [§ 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use alloc::vec;
use alloc::vec::Vec;
use rand_core::CryptoRngCore;

use crate::errors::{Error, Result};
use crate::traits::BlockType;

/// Fills the provided slice with random values, which are guaranteed
/// to not be zero. A sampled zero becomes 0x01 so that no branch depends
/// on how often the generator produced one.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data {
        if *el == 0u8 {
            *el = 1;
        }
    }
}

/// Format one message block: `EM = 0x00 || BT || PS || 0x00 || M`.
///
/// The padding string PS is 0xFF bytes for signature blocks and nonzero
/// random bytes for encryption blocks, and is at least eight bytes long.
pub(crate) fn pkcs1v15_pad<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
    block_type: BlockType,
) -> Result<Vec<u8>> {
    if k < 11 || msg.len() > k - 11 {
        return Err(Error::MessageTooLong);
    }

    let mut em = vec![0u8; k];
    em[1] = block_type as u8;
    let ps = &mut em[2..k - msg.len() - 1];
    match block_type {
        BlockType::Signature => ps.fill(0xFF),
        BlockType::Encryption => non_zero_random_bytes(rng, ps),
    }
    em[k - msg.len() - 1] = 0;
    em[k - msg.len()..].copy_from_slice(msg);
    Ok(em)
}

/// Undo [`pkcs1v15_pad`]. Returns `None` on any formatting violation; the
/// caller maps that to its decode error without further detail.
pub(crate) fn pkcs1v15_unpad(em: &[u8], block_type: BlockType) -> Option<Vec<u8>> {
    let k = em.len();
    let start = em.iter().position(|&b| b != 0)?;
    if k - start != k - 1 {
        return None;
    }
    if em[start] != block_type as u8 {
        return None;
    }
    let sep = start + 1 + em[start + 1..].iter().position(|&b| b == 0)?;
    Some(em[sep + 1..].to_vec())
}
