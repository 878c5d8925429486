//! Support for the [Probabilistic Signature Scheme] (PSS) a.k.a. RSASSA-PSS.
//!
//! Designed by Mihir Bellare and Phillip Rogaway. Specified in [RFC8017 § 8.1].
//!
//! Signature-only: encryption requests are rejected. Verification needs the
//! original message, which is re-hashed and checked against the recovered
//! salt and hash.
//!
//! [Probabilistic Signature Scheme]: https://en.wikipedia.org/wiki/Probabilistic_signature_scheme
//! [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1

use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;

use crate::algorithms::pad::left_pad;
use crate::algorithms::pss::{emsa_pss_encode, emsa_pss_verify};
use crate::errors::{Error, Result};
use crate::traits::{BlockType, PaddingScheme};

/// PSS padding over the digest `D`.
pub struct Pss<D: Digest + FixedOutputReset> {
    /// Salt length in bytes.
    pub salt_len: usize,

    digest: PhantomData<D>,
}

impl<D: Digest + FixedOutputReset> Pss<D> {
    /// PSS with the conventional salt length: the digest size.
    pub fn new() -> Self {
        Self::new_with_salt_len(<D as Digest>::output_size())
    }

    /// PSS with an explicit salt length. A zero salt makes signatures
    /// deterministic.
    pub fn new_with_salt_len(salt_len: usize) -> Self {
        Self {
            salt_len,
            digest: PhantomData,
        }
    }
}

impl<D: Digest + FixedOutputReset> Default for Pss<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest + FixedOutputReset> Clone for Pss<D> {
    fn clone(&self) -> Self {
        Self {
            salt_len: self.salt_len,
            digest: PhantomData,
        }
    }
}

impl<D: Digest + FixedOutputReset> PaddingScheme for Pss<D> {
    fn max_input_len(&self, _k: usize) -> Option<usize> {
        // The message is hashed; a single block carries any length.
        None
    }

    fn pad<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
        n_bits: usize,
        block_type: BlockType,
    ) -> Result<Vec<u8>> {
        if block_type != BlockType::Signature {
            return Err(Error::InvalidPaddingScheme);
        }
        let m_hash = D::digest(msg);
        let mut salt = vec![0u8; self.salt_len];
        rng.fill_bytes(&mut salt);

        let em = emsa_pss_encode::<D>(&m_hash, n_bits - 1, &salt)?;
        left_pad(&em, (n_bits + 7) / 8)
    }

    fn unpad(
        &self,
        em: &mut [u8],
        n_bits: usize,
        block_type: BlockType,
        original: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        if block_type != BlockType::Signature {
            return Err(Error::InvalidPaddingScheme);
        }
        let original = original.ok_or(Error::InvalidArguments)?;
        let m_hash = D::digest(original);
        emsa_pss_verify::<D>(&m_hash, em, self.salt_len, n_bits)?;
        Ok(original.to_vec())
    }
}
