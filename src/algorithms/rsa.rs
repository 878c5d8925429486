//! Raw RSA operations.

use num_traits::One;
use subtle::Choice;

use crate::biguint::BigUint;
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Raw RSA public-key operation: `m^e mod n`. No padding is performed;
/// the padding layer guarantees `m < n` for blocks it produced.
#[inline]
pub(crate) fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if m >= key.n() {
        return Err(Error::MessageTooLong);
    }
    Ok(m.modpow_u32(key.e(), key.n()))
}

/// Raw RSA private-key operation.
///
/// Takes the CRT path when the prime factors are present, otherwise falls
/// back to `c^d mod n`. The CRT correction `xp += p` is applied through a
/// 0/1 mask multiply so that no branch depends on the compared values.
pub(crate) fn rsa_decrypt<K: PrivateKeyParts>(key: &K, c: &BigUint) -> Result<BigUint> {
    if c >= key.n() {
        return Err(Error::Decryption);
    }

    match (key.p(), key.q(), key.dp(), key.dq(), key.qinv()) {
        (Some(p), Some(q), Some(dp), Some(dq), Some(qinv)) => {
            let xp = (c % p).modpow(dp, p);
            let xq = (c % q).modpow(dq, q);

            let lifted = Choice::from((xp < xq) as u8);
            let mask = BigUint::from(lifted.unwrap_u8() as u32);
            let xp = &xp + &(p * &mask);

            let h = &(&(&xp - &xq) * qinv) % p;
            Ok(&(&h * q) + &xq)
        }
        _ => Ok(c.modpow(key.d(), key.n())),
    }
}

/// Consistency check after a private-key operation: re-encrypting the
/// result must reproduce the input.
pub(crate) fn rsa_decrypt_and_check<K: PrivateKeyParts>(key: &K, c: &BigUint) -> Result<BigUint> {
    let m = rsa_decrypt(key, c)?;
    let check = rsa_encrypt(key, &m)?;
    if &check != c {
        return Err(Error::Internal);
    }
    Ok(m)
}

/// Euler totient `(p-1)(q-1)` of a two-prime modulus.
pub(crate) fn totient(p: &BigUint, q: &BigUint) -> BigUint {
    let one = BigUint::one();
    &(p - &one) * &(q - &one)
}
