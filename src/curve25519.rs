//! X25519 key agreement over Curve25519, following [RFC 7748].
//!
//! Scalars are clamped before use; the scalar multiplication is a
//! constant-time Montgomery ladder over the field mod 2^255 - 19.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748

mod field;

use subtle::Choice;

use crate::errors::{Error, Result};
use field::{FieldElement, A24, ONE, ZERO};

/// Length in bytes of X25519 scalars, points and shared secrets.
pub const KEY_SIZE: usize = 32;

/// u-coordinate of the base point.
const BASE_POINT: [u8; 32] = {
    let mut bytes = [0u8; 32];
    bytes[0] = 9;
    bytes
};

/// RFC 7748 scalar clamping: clear the low three bits, clear bit 255, set
/// bit 254.
fn clamp(scalar: &[u8; 32]) -> [u8; 32] {
    let mut z = *scalar;
    z[0] &= 248;
    z[31] = (z[31] & 127) | 64;
    z
}

fn scalar_mult(scalar: &[u8; 32], point: &[u8; 32]) -> [u8; 32] {
    let z = clamp(scalar);
    let x1 = FieldElement::from_bytes(point);

    let mut x2 = ONE;
    let mut z2 = ZERO;
    let mut x3 = x1;
    let mut z3 = ONE;

    // One ladder step per scalar bit, from bit 254 down. The swap flag
    // defers each conditional swap into the next iteration so that exactly
    // one pair of swaps runs per step regardless of the bit pattern.
    let mut swap = 0u8;
    for t in (0..255).rev() {
        let bit = (z[t >> 3] >> (t & 7)) & 1;
        swap ^= bit;
        let choice = Choice::from(swap);
        FieldElement::conditional_swap(&mut x2, &mut x3, choice);
        FieldElement::conditional_swap(&mut z2, &mut z3, choice);
        swap = bit;

        let a = x2 + z2;
        let aa = a.square();
        let b = x2 - z2;
        let bb = b.square();
        let e = aa - bb;
        let c = x3 + z3;
        let d = x3 - z3;
        let da = d * a;
        let cb = c * b;
        x3 = (da + cb).square();
        z3 = x1 * (da - cb).square();
        x2 = aa * bb;
        z2 = e * (aa + A24 * e);
    }
    let choice = Choice::from(swap);
    FieldElement::conditional_swap(&mut x2, &mut x3, choice);
    FieldElement::conditional_swap(&mut z2, &mut z3, choice);

    (x2 * z2.invert()).to_bytes()
}

fn as_key(bytes: &[u8]) -> Result<&[u8; 32]> {
    bytes.try_into().map_err(|_| Error::InvalidArguments)
}

/// Derive the public key `clamp(secret) * G` for a 32-byte secret scalar.
///
/// Deterministic in its input; any length other than 32 bytes is an
/// [`Error::InvalidArguments`].
pub fn public_key(secret: &[u8]) -> Result<[u8; 32]> {
    Ok(scalar_mult(as_key(secret)?, &BASE_POINT))
}

/// Derive the shared secret `clamp(secret) * peer_public` from a 32-byte
/// secret scalar and the peer's 32-byte public key.
pub fn diffie_hellman(secret: &[u8], peer_public: &[u8]) -> Result<[u8; 32]> {
    Ok(scalar_mult(as_key(secret)?, as_key(peer_public)?))
}
