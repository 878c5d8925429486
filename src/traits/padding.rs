//! Supported padding schemes.

use alloc::vec::Vec;
use rand_core::CryptoRngCore;

use crate::errors::Result;

/// PKCS#1 v1.5 block-type octet. Also selects which key operation a block
/// driver applies; OAEP and PSS ignore the octet itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum BlockType {
    /// Private-key block formatting (type 1), used for signatures.
    Signature = 1,
    /// Public-key block formatting (type 2), used for encryption.
    Encryption = 2,
}

/// A reversible transform between messages and RSA-sized blocks.
///
/// `pad` must produce exactly `⌈n_bits/8⌉` bytes that read as a big-endian
/// integer smaller than the modulus; `unpad` reverses it.
pub trait PaddingScheme {
    /// Message capacity of a single `k`-byte block, or `None` when the
    /// scheme consumes the whole message in one block.
    fn max_input_len(&self, k: usize) -> Option<usize>;

    /// Encode one message block.
    fn pad<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
        n_bits: usize,
        block_type: BlockType,
    ) -> Result<Vec<u8>>;

    /// Decode one block, scribbling over `em` as needed. `original` is
    /// consulted only by schemes that verify against the caller-supplied
    /// message (PSS).
    fn unpad(
        &self,
        em: &mut [u8],
        n_bits: usize,
        block_type: BlockType,
        original: Option<&[u8]>,
    ) -> Result<Vec<u8>>;
}
