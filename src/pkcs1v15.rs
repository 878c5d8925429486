//! PKCS#1 v1.5 padding as described in [RFC8017 § 7.2] and [§ 8.2].
//!
//! One scheme object serves both directions: encryption blocks carry the
//! type-2 tag with random nonzero padding, signature blocks the type-1 tag
//! with 0xFF padding.
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2
//! [§ 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use alloc::vec::Vec;
use rand_core::CryptoRngCore;

use crate::algorithms::pkcs1v15::{pkcs1v15_pad, pkcs1v15_unpad};
use crate::errors::{Error, Result};
use crate::traits::{BlockType, PaddingScheme};

/// PKCS#1 v1.5 block formatting.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pkcs1v15;

impl PaddingScheme for Pkcs1v15 {
    fn max_input_len(&self, k: usize) -> Option<usize> {
        Some(k.saturating_sub(11))
    }

    fn pad<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
        n_bits: usize,
        block_type: BlockType,
    ) -> Result<Vec<u8>> {
        pkcs1v15_pad(rng, msg, (n_bits + 7) / 8, block_type)
    }

    fn unpad(
        &self,
        em: &mut [u8],
        _n_bits: usize,
        block_type: BlockType,
        _original: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        // No detail on failure; a malformed block and a wrong key look
        // identical from the outside.
        pkcs1v15_unpad(em, block_type).ok_or(match block_type {
            BlockType::Encryption => Error::Decryption,
            BlockType::Signature => Error::Verification,
        })
    }
}
