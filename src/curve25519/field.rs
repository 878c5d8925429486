//! Field arithmetic modulo 2^255 - 19.
//!
//! Elements are 16 signed 64-bit limbs in radix 2^16, least significant
//! first. Limbs exceed 16 bits between carry passes; `carry` folds limb-16
//! overflow back into limb 0 with factor 38 (= 2 * 19, since
//! 2^256 ≡ 38 mod p).

use core::ops::{Add, Mul, Sub};

use subtle::Choice;

#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldElement(pub(crate) [i64; 16]);

pub(crate) const ZERO: FieldElement = FieldElement([0; 16]);

pub(crate) const ONE: FieldElement =
    FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

/// The curve constant 121665, used by the ladder's doubling formula.
pub(crate) const A24: FieldElement =
    FieldElement([0xDB41, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

impl FieldElement {
    /// Read 32 little-endian bytes, clearing the top bit of byte 31.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut o = [0i64; 16];
        for i in 0..16 {
            o[i] = bytes[2 * i] as i64 | ((bytes[2 * i + 1] as i64) << 8);
        }
        o[15] &= 0x7fff;
        FieldElement(o)
    }

    /// Canonicalize to 32 little-endian bytes: three carry passes, then two
    /// conditional subtractions of p selected on the sign of the top limb.
    pub(crate) fn to_bytes(mut self) -> [u8; 32] {
        self.carry();
        self.carry();
        self.carry();

        let mut m = ZERO;
        for _ in 0..2 {
            m.0[0] = self.0[0] - 0xffed;
            for i in 1..15 {
                m.0[i] = self.0[i] - 0xffff - ((m.0[i - 1] >> 16) & 1);
                m.0[i - 1] &= 0xffff;
            }
            m.0[15] = self.0[15] - 0x7fff - ((m.0[14] >> 16) & 1);
            let borrow = (m.0[15] >> 16) & 1;
            m.0[14] &= 0xffff;
            // Keep the subtracted copy unless it went negative.
            FieldElement::conditional_swap(&mut self, &mut m, Choice::from((1 - borrow) as u8));
        }

        let mut out = [0u8; 32];
        for i in 0..16 {
            out[2 * i] = (self.0[i] & 0xff) as u8;
            out[2 * i + 1] = ((self.0[i] >> 8) & 0xff) as u8;
        }
        out
    }

    /// One carry pass over all limbs.
    pub(crate) fn carry(&mut self) {
        for i in 0..15 {
            self.0[i] += 1 << 16;
            let c = self.0[i] >> 16;
            self.0[i + 1] += c - 1;
            self.0[i] -= c << 16;
        }
        self.0[15] += 1 << 16;
        let c = self.0[15] >> 16;
        self.0[0] += 38 * (c - 1);
        self.0[15] -= c << 16;
    }

    /// Swap `a` and `b` when `swap` is set, touching the same limbs either
    /// way.
    pub(crate) fn conditional_swap(a: &mut Self, b: &mut Self, swap: Choice) {
        let mask = -(swap.unwrap_u8() as i64);
        for i in 0..16 {
            let t = mask & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }

    pub(crate) fn square(self) -> Self {
        self * self
    }

    /// Multiplicative inverse: raise to p - 2 = 2^255 - 21 by the fixed
    /// chain of 254 squarings, multiplying in the base everywhere except
    /// positions 2 and 4.
    pub(crate) fn invert(self) -> Self {
        let mut c = self;
        for i in (0..=253).rev() {
            c = c.square();
            if i != 2 && i != 4 {
                c = c * self;
            }
        }
        c
    }
}

impl Add for FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: FieldElement) -> FieldElement {
        let mut o = [0i64; 16];
        for i in 0..16 {
            o[i] = self.0[i] + rhs.0[i];
        }
        FieldElement(o)
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: FieldElement) -> FieldElement {
        let mut o = [0i64; 16];
        for i in 0..16 {
            o[i] = self.0[i] - rhs.0[i];
        }
        FieldElement(o)
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: FieldElement) -> FieldElement {
        let mut t = [0i64; 31];
        for i in 0..16 {
            for j in 0..16 {
                t[i + j] += self.0[i] * rhs.0[j];
            }
        }
        for i in 0..15 {
            t[i] += 38 * t[i + 16];
        }
        let mut o = [0i64; 16];
        o.copy_from_slice(&t[..16]);
        let mut r = FieldElement(o);
        r.carry();
        r.carry();
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    // p - 1 = 2^255 - 20, little endian.
    const P_MINUS_ONE: [u8; 32] = [
        0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ];

    // p = 2^255 - 19, little endian.
    const P: [u8; 32] = [
        0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ];

    #[test]
    fn test_pack_unpack_roundtrip() {
        let mut rng = ChaCha8Rng::from_seed([3; 32]);
        for _ in 0..200 {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            // Keep the value below p; canonical packing reduces anything
            // larger.
            bytes[31] &= 0x3f;
            assert_eq!(FieldElement::from_bytes(&bytes).to_bytes(), bytes);
        }
        assert_eq!(FieldElement::from_bytes(&P_MINUS_ONE).to_bytes(), P_MINUS_ONE);
    }

    #[test]
    fn test_pack_reduces_p_to_zero() {
        assert_eq!(FieldElement::from_bytes(&P).to_bytes(), [0u8; 32]);
    }

    #[test]
    fn test_add_sub_mul() {
        let one = ONE;
        let two = one + one;
        assert_eq!((two - one).to_bytes(), one.to_bytes());

        // (p - 1) * (p - 1) = 1 mod p, since p - 1 = -1.
        let minus_one = FieldElement::from_bytes(&P_MINUS_ONE);
        assert_eq!((minus_one * minus_one).to_bytes(), one.to_bytes());

        // (p - 1) + 1 = 0 mod p.
        assert_eq!((minus_one + one).to_bytes(), [0u8; 32]);
    }

    #[test]
    fn test_invert() {
        let mut rng = ChaCha8Rng::from_seed([4; 32]);
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        bytes[31] &= 0x3f;
        let x = FieldElement::from_bytes(&bytes);
        assert_eq!((x * x.invert()).to_bytes(), ONE.to_bytes());
    }

    #[test]
    fn test_conditional_swap() {
        let mut a = ONE;
        let mut b = A24;
        FieldElement::conditional_swap(&mut a, &mut b, Choice::from(0));
        assert_eq!(a.to_bytes(), ONE.to_bytes());
        FieldElement::conditional_swap(&mut a, &mut b, Choice::from(1));
        assert_eq!(b.to_bytes(), ONE.to_bytes());
        assert_eq!(a.to_bytes(), A24.to_bytes());
    }
}
