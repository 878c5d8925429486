//! Traits related to the key components

use crate::biguint::BigUint;

/// Components of an RSA public key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the public exponent of the key.
    fn e(&self) -> u32;

    /// Returns the modulus size in bytes. Raw signatures and ciphertexts for
    /// or by this public key will have the same size.
    fn size(&self) -> usize {
        (self.n().bits() + 7) / 8
    }
}

/// Components of an RSA private key.
///
/// The CRT accessors return `None` when the key was built from the private
/// exponent alone; private operations then fall back to `c^d mod n`.
pub trait PrivateKeyParts: PublicKeyParts {
    /// Returns the private exponent of the key.
    fn d(&self) -> &BigUint;

    /// Returns the larger prime factor of the modulus.
    fn p(&self) -> Option<&BigUint>;

    /// Returns the smaller prime factor of the modulus.
    fn q(&self) -> Option<&BigUint>;

    /// Returns the precomputed dp value, D mod (P-1)
    fn dp(&self) -> Option<&BigUint>;

    /// Returns the precomputed dq value, D mod (Q-1)
    fn dq(&self) -> Option<&BigUint>;

    /// Returns the precomputed qinv value, Q^-1 mod P.
    fn qinv(&self) -> Option<&BigUint>;
}
