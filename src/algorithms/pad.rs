//! Special handling for converting the BigUint to u8 vectors

use alloc::vec;
use alloc::vec::Vec;
use zeroize::{Zeroize, Zeroizing};

use crate::biguint::BigUint;
use crate::errors::{Error, Result};

/// Returns a new vector of the given length, with 0s left padded.
#[inline]
pub(crate) fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::InvalidPadLen);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// Converts input to a new vector of the given length, using BE and with 0s left padded.
#[inline]
pub(crate) fn uint_to_be_pad(input: &BigUint, padded_len: usize) -> Result<Vec<u8>> {
    left_pad(&input.to_bytes_be(), padded_len)
}

/// Converts input to a new vector of the given length, using BE and with 0s left padded.
/// The input and all intermediate copies are zeroed.
#[inline]
pub(crate) fn uint_to_zeroizing_be_pad(mut input: BigUint, padded_len: usize) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = Zeroizing::new(input.to_bytes_be());
    input.zeroize();
    left_pad(&bytes, padded_len).map(Zeroizing::new)
}
