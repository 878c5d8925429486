//! Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).

use alloc::vec;
use alloc::vec::Vec;
use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};

/// Encode a message into a `k`-byte OAEP block.
///
/// The message must be no longer than `k - 2 * h_size - 2`; `digest` hashes
/// the label and drives MGF1.
pub(crate) fn oaep_encrypt<R: CryptoRngCore + ?Sized, D: Digest + FixedOutputReset>(
    rng: &mut R,
    msg: &[u8],
    label: &[u8],
    k: usize,
) -> Result<Vec<u8>> {
    let h_size = <D as Digest>::output_size();

    if msg.len() + 2 * h_size + 2 > k {
        return Err(Error::MessageTooLong);
    }

    let l_hash = D::digest(label);

    let mut em = vec![0u8; k];
    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);
    rng.fill_bytes(seed);

    // Data block DB = lHash || PS || 01 || M
    let db_len = k - h_size - 1;

    db[0..h_size].copy_from_slice(&l_hash);
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    let mut mgf_digest = D::new();
    mgf1_xor(db, &mut mgf_digest, seed);
    mgf1_xor(seed, &mut mgf_digest, db);

    Ok(em)
}

/// Decode a `k`-byte OAEP block in place.
///
/// Every structural check is accumulated as a [`Choice`] so that the
/// work done does not depend on where a malformed block first deviates;
/// any failure is reported as [`Error::Decryption`] with no detail.
pub(crate) fn oaep_decrypt<D: Digest + FixedOutputReset>(
    em: &mut [u8],
    label: &[u8],
    k: usize,
) -> Result<Vec<u8>> {
    let h_size = <D as Digest>::output_size();

    if em.len() != k || k < 2 * h_size + 2 {
        return Err(Error::Decryption);
    }

    let l_hash = D::digest(label);

    let first_byte_is_zero = em[0].ct_eq(&0u8);
    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);

    let mut mgf_digest = D::new();
    mgf1_xor(seed, &mut mgf_digest, db);
    mgf1_xor(db, &mut mgf_digest, seed);

    let hashes_are_equal = db[0..h_size].ct_eq(&l_hash);

    // Scan for the 0x01 boundary between PS and the message without
    // branching on block contents.
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut invalid = Choice::from(0u8);

    for (i, el) in db.iter().enumerate().skip(h_size) {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        invalid |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hashes_are_equal & !invalid & !looking_for_index;
    if valid.unwrap_u8() != 1 {
        return Err(Error::Decryption);
    }

    Ok(db[index as usize + 1..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use sha1::Sha1;

    #[test]
    fn test_encrypt_decrypt_block() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for msg in [&b""[..], b"hello", &[0xAA; 22]] {
            let mut em = oaep_encrypt::<_, Sha1>(&mut rng, msg, b"", 64).unwrap();
            assert_eq!(em.len(), 64);
            assert_eq!(em[0], 0);
            assert_eq!(oaep_decrypt::<Sha1>(&mut em, b"", 64).unwrap(), msg);
        }
    }

    #[test]
    fn test_message_too_long() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        // 64 - 2*20 - 2 = 22 bytes is the last size that fits.
        assert!(oaep_encrypt::<_, Sha1>(&mut rng, &[0xAA; 22], b"", 64).is_ok());
        assert_eq!(
            oaep_encrypt::<_, Sha1>(&mut rng, &[0xAA; 23], b"", 64),
            Err(Error::MessageTooLong)
        );
    }

    #[test]
    fn test_label_mismatch() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let mut em = oaep_encrypt::<_, Sha1>(&mut rng, b"hello", b"label-a", 64).unwrap();
        assert_eq!(
            oaep_decrypt::<Sha1>(&mut em, b"label-b", 64),
            Err(Error::Decryption)
        );
    }
}
