//! Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
//! - `D` hashes the label and drives [MGF1]. The maximum possible plaintext
//!   length per block is `k - 2 * h_len - 2`, where `k` is the size of the
//!   RSA modulus.
//! - `label` is optional data bound into every block; it is not encrypted.
//!
//! [MGF1]: https://datatracker.ietf.org/doc/html/rfc8017#appendix-B.2

use alloc::vec::Vec;
use core::marker::PhantomData;

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;

use crate::algorithms::oaep::{oaep_decrypt, oaep_encrypt};
use crate::errors::Result;
use crate::traits::{BlockType, PaddingScheme};

/// OAEP padding over the digest `D`.
pub struct Oaep<D: Digest + FixedOutputReset> {
    /// Optional label whose hash is bound into every block.
    pub label: Option<Vec<u8>>,

    digest: PhantomData<D>,
}

impl<D: Digest + FixedOutputReset> Oaep<D> {
    /// OAEP with the default empty label.
    pub fn new() -> Self {
        Self {
            label: None,
            digest: PhantomData,
        }
    }

    /// OAEP with an associated label.
    pub fn new_with_label(label: impl Into<Vec<u8>>) -> Self {
        Self {
            label: Some(label.into()),
            digest: PhantomData,
        }
    }
}

impl<D: Digest + FixedOutputReset> Default for Oaep<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest + FixedOutputReset> Clone for Oaep<D> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            digest: PhantomData,
        }
    }
}

impl<D: Digest + FixedOutputReset> PaddingScheme for Oaep<D> {
    fn max_input_len(&self, k: usize) -> Option<usize> {
        Some(k.saturating_sub(2 * <D as Digest>::output_size() + 2))
    }

    fn pad<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
        n_bits: usize,
        _block_type: BlockType,
    ) -> Result<Vec<u8>> {
        let label = self.label.as_deref().unwrap_or_default();
        oaep_encrypt::<R, D>(rng, msg, label, (n_bits + 7) / 8)
    }

    fn unpad(
        &self,
        em: &mut [u8],
        n_bits: usize,
        _block_type: BlockType,
        _original: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let label = self.label.as_deref().unwrap_or_default();
        oaep_decrypt::<D>(em, label, (n_bits + 7) / 8)
    }
}
