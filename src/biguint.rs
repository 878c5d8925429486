//! Arbitrary-precision unsigned integer arithmetic.
//!
//! [`BigUint`] carries exactly the operations the RSA layer needs: modular
//! exponentiation, modular inverse, gcd and byte/hex conversions. Values are
//! immutable once constructed; every operation produces a new value.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Rem, Shl, Shr, Sub};

use num_traits::{Num, One, Zero};
use zeroize::Zeroize;

/// Non-negative integer of arbitrary magnitude.
///
/// Stored as base-2³² limbs, least significant first, with no high zero
/// limbs. An empty limb vector is zero.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigUint {
    limbs: Vec<u32>,
}

impl BigUint {
    fn from_limbs(mut limbs: Vec<u32>) -> Self {
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        BigUint { limbs }
    }

    /// Interpret `bytes` as an unsigned big-endian integer.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let significant = &bytes[first_nonzero..];

        let mut limbs = Vec::with_capacity((significant.len() + 3) / 4);
        for chunk in significant.rchunks(4) {
            let mut limb_bytes = [0u8; 4];
            limb_bytes[4 - chunk.len()..].copy_from_slice(chunk);
            limbs.push(u32::from_be_bytes(limb_bytes));
        }
        Self::from_limbs(limbs)
    }

    /// Serialize to the minimal big-endian byte representation.
    ///
    /// Zero serializes to an empty vector; callers that need a fixed width
    /// left-pad the result to the modulus size.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.limbs.len() * 4);
        for (i, limb) in self.limbs.iter().enumerate().rev() {
            let bytes = limb.to_be_bytes();
            if i == self.limbs.len() - 1 {
                let skip = limb.leading_zeros() as usize / 8;
                out.extend_from_slice(&bytes[skip..]);
            } else {
                out.extend_from_slice(&bytes);
            }
        }
        out
    }

    /// Number of significant bits.
    pub fn bits(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(top) => self.limbs.len() * 32 - top.leading_zeros() as usize,
        }
    }

    /// Value of bit `i` (bit 0 is the least significant).
    pub fn bit(&self, i: usize) -> bool {
        match self.limbs.get(i / 32) {
            Some(limb) => (limb >> (i % 32)) & 1 == 1,
            None => false,
        }
    }

    /// Set bit `i` to one, growing the magnitude as needed.
    pub fn set_bit(&mut self, i: usize) {
        let limb = i / 32;
        if limb >= self.limbs.len() {
            self.limbs.resize(limb + 1, 0);
        }
        self.limbs[limb] |= 1 << (i % 32);
    }

    /// Drop every bit at position `bits` and above.
    pub(crate) fn truncate_bits(&mut self, bits: usize) {
        let limbs = (bits + 31) / 32;
        self.limbs.truncate(limbs);
        if bits % 32 != 0 {
            if let Some(top) = self.limbs.last_mut() {
                *top &= (1u32 << (bits % 32)) - 1;
            }
        }
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }

    pub fn is_even(&self) -> bool {
        self.limbs.first().map_or(true, |limb| limb & 1 == 0)
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// The value as a `u32`, when it fits.
    pub fn to_u32(&self) -> Option<u32> {
        match self.limbs.len() {
            0 => Some(0),
            1 => Some(self.limbs[0]),
            _ => None,
        }
    }

    /// Subtraction that reports underflow instead of panicking.
    pub fn checked_sub(&self, rhs: &BigUint) -> Option<BigUint> {
        sub_limbs(&self.limbs, &rhs.limbs).map(Self::from_limbs)
    }

    /// Quotient and remainder in one pass.
    ///
    /// # Panics
    ///
    /// Panics when `divisor` is zero; that is a caller bug, not an input
    /// condition.
    pub fn div_rem(&self, divisor: &BigUint) -> (BigUint, BigUint) {
        assert!(!divisor.is_zero(), "division by zero");
        match self.cmp(divisor) {
            Ordering::Less => return (BigUint::zero(), self.clone()),
            Ordering::Equal => return (BigUint::one(), BigUint::zero()),
            Ordering::Greater => {}
        }
        if divisor.limbs.len() == 1 {
            let (q, r) = self.div_rem_limb(divisor.limbs[0]);
            return (q, BigUint::from(r));
        }
        self.div_rem_knuth(divisor)
    }

    fn div_rem_limb(&self, d: u32) -> (BigUint, u32) {
        let mut q = vec![0u32; self.limbs.len()];
        let mut rem: u64 = 0;
        for i in (0..self.limbs.len()).rev() {
            let cur = (rem << 32) | self.limbs[i] as u64;
            q[i] = (cur / d as u64) as u32;
            rem = cur % d as u64;
        }
        (Self::from_limbs(q), rem as u32)
    }

    /// Remainder of division by a single limb.
    pub(crate) fn rem_u32(&self, d: u32) -> u32 {
        let mut rem: u64 = 0;
        for limb in self.limbs.iter().rev() {
            rem = ((rem << 32) | *limb as u64) % d as u64;
        }
        rem as u32
    }

    // Knuth Algorithm D. `self > divisor` and the divisor has at least two
    // limbs when we get here.
    fn div_rem_knuth(&self, divisor: &BigUint) -> (BigUint, BigUint) {
        let shift = divisor.limbs.last().unwrap().leading_zeros() as usize;
        let v = divisor.shl_bits(shift);
        let mut u = self.shl_bits(shift);
        u.limbs.push(0);

        let n = v.limbs.len();
        let m = u.limbs.len() - n - 1;
        let mut q = vec![0u32; m + 1];

        let b: u64 = 1 << 32;
        let v_hi = v.limbs[n - 1] as u64;
        let v_next = v.limbs[n - 2] as u64;

        for j in (0..=m).rev() {
            let top = ((u.limbs[j + n] as u64) << 32) | u.limbs[j + n - 1] as u64;
            let mut qhat = top / v_hi;
            let mut rhat = top % v_hi;
            loop {
                if qhat >= b || qhat * v_next > (rhat << 32) + u.limbs[j + n - 2] as u64 {
                    qhat -= 1;
                    rhat += v_hi;
                    if rhat < b {
                        continue;
                    }
                }
                break;
            }

            // Multiply and subtract: u[j..j+n+1] -= qhat * v.
            let mut borrow: u64 = 0;
            for i in 0..n {
                let p = qhat * v.limbs[i] as u64;
                let t = u.limbs[i + j] as i64 - borrow as i64 - (p & 0xFFFF_FFFF) as i64;
                u.limbs[i + j] = t as u32;
                borrow = (p >> 32).wrapping_sub((t >> 32) as u64);
            }
            let t = u.limbs[j + n] as i64 - borrow as i64;
            u.limbs[j + n] = t as u32;
            q[j] = qhat as u32;

            // The estimate was one too large; add the divisor back.
            if t < 0 {
                q[j] = q[j].wrapping_sub(1);
                let mut carry: u64 = 0;
                for i in 0..n {
                    let t = u.limbs[i + j] as u64 + v.limbs[i] as u64 + carry;
                    u.limbs[i + j] = t as u32;
                    carry = t >> 32;
                }
                u.limbs[j + n] = u.limbs[j + n].wrapping_add(carry as u32);
            }
        }

        u.limbs.truncate(n);
        let rem = Self::from_limbs(u.limbs).shr_bits(shift);
        (Self::from_limbs(q), rem)
    }

    /// Greatest common divisor.
    pub fn gcd(&self, other: &BigUint) -> BigUint {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = &a % &b;
            a = b;
            b = r;
        }
        a
    }

    /// Multiplicative inverse modulo `modulus`, when `gcd(self, modulus) = 1`.
    pub fn mod_inverse(&self, modulus: &BigUint) -> Option<BigUint> {
        if modulus.is_zero() || modulus.is_one() {
            return None;
        }
        let mut r0 = modulus.clone();
        let mut r1 = self % modulus;
        if r1.is_zero() {
            return None;
        }
        // Extended Euclid on (r0, r1), tracking only the coefficient of
        // `self` as a sign-and-magnitude pair.
        let mut t0 = (false, BigUint::zero());
        let mut t1 = (false, BigUint::one());
        while !r1.is_zero() {
            let (quot, r2) = r0.div_rem(&r1);
            let qt = (t1.0, &quot * &t1.1);
            let t2 = signed_sub(&t0, &qt);
            r0 = r1;
            r1 = r2;
            t0 = t1;
            t1 = t2;
        }
        if !r0.is_one() {
            return None;
        }
        let (negative, magnitude) = t0;
        let magnitude = &magnitude % modulus;
        Some(if negative && !magnitude.is_zero() {
            modulus - &magnitude
        } else {
            magnitude
        })
    }

    /// `self^exponent mod modulus`.
    ///
    /// Square-and-multiply over the exponent bits with a full reduction per
    /// step.
    ///
    /// # Panics
    ///
    /// Panics when `modulus` is zero.
    pub fn modpow(&self, exponent: &BigUint, modulus: &BigUint) -> BigUint {
        assert!(!modulus.is_zero(), "modpow with zero modulus");
        if modulus.is_one() {
            return BigUint::zero();
        }
        let mut result = BigUint::one();
        let mut base = self % modulus;
        let nbits = exponent.bits();
        for i in 0..nbits {
            if exponent.bit(i) {
                result = &(&result * &base) % modulus;
            }
            if i + 1 < nbits {
                base = &(&base * &base) % modulus;
            }
        }
        result
    }

    /// `self^exponent mod modulus` for a small exponent.
    pub fn modpow_u32(&self, exponent: u32, modulus: &BigUint) -> BigUint {
        self.modpow(&BigUint::from(exponent), modulus)
    }

    fn shl_bits(&self, shift: usize) -> BigUint {
        if self.is_zero() {
            return BigUint::zero();
        }
        let limb_shift = shift / 32;
        let bit_shift = shift % 32;
        let mut limbs = vec![0u32; self.limbs.len() + limb_shift + 1];
        for (i, &limb) in self.limbs.iter().enumerate() {
            if bit_shift == 0 {
                limbs[i + limb_shift] = limb;
            } else {
                limbs[i + limb_shift] |= limb << bit_shift;
                limbs[i + limb_shift + 1] = limb >> (32 - bit_shift);
            }
        }
        Self::from_limbs(limbs)
    }

    fn shr_bits(&self, shift: usize) -> BigUint {
        let limb_shift = shift / 32;
        let bit_shift = shift % 32;
        if limb_shift >= self.limbs.len() {
            return BigUint::zero();
        }
        let mut limbs = vec![0u32; self.limbs.len() - limb_shift];
        for i in 0..limbs.len() {
            let lo = self.limbs[i + limb_shift];
            limbs[i] = if bit_shift == 0 {
                lo
            } else {
                let hi = self.limbs.get(i + limb_shift + 1).copied().unwrap_or(0);
                (lo >> bit_shift) | (hi << (32 - bit_shift))
            };
        }
        Self::from_limbs(limbs)
    }
}

fn add_limbs(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(longer.len() + 1);
    let mut carry: u64 = 0;
    for i in 0..longer.len() {
        let sum = longer[i] as u64 + shorter.get(i).copied().unwrap_or(0) as u64 + carry;
        out.push(sum as u32);
        carry = sum >> 32;
    }
    if carry != 0 {
        out.push(carry as u32);
    }
    out
}

fn sub_limbs(a: &[u32], b: &[u32]) -> Option<Vec<u32>> {
    if b.len() > a.len() {
        return None;
    }
    let mut out = Vec::with_capacity(a.len());
    let mut borrow: u64 = 0;
    for i in 0..a.len() {
        let rhs = b.get(i).copied().unwrap_or(0) as u64 + borrow;
        let lhs = a[i] as u64;
        if lhs >= rhs {
            out.push((lhs - rhs) as u32);
            borrow = 0;
        } else {
            out.push((lhs + (1 << 32) - rhs) as u32);
            borrow = 1;
        }
    }
    if borrow != 0 {
        return None;
    }
    Some(out)
}

fn mul_limbs(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u32; a.len() + b.len()];
    for (i, &ai) in a.iter().enumerate() {
        let mut carry: u64 = 0;
        for (j, &bj) in b.iter().enumerate() {
            let t = ai as u64 * bj as u64 + out[i + j] as u64 + carry;
            out[i + j] = t as u32;
            carry = t >> 32;
        }
        out[i + b.len()] = carry as u32;
    }
    out
}

// a - b over sign-and-magnitude pairs.
fn signed_sub(a: &(bool, BigUint), b: &(bool, BigUint)) -> (bool, BigUint) {
    match (a.0, b.0) {
        (false, true) => (false, &a.1 + &b.1),
        (true, false) => (true, &a.1 + &b.1),
        (a_neg, _) => {
            if a.1 >= b.1 {
                (a_neg, &a.1 - &b.1)
            } else {
                (!a_neg, &b.1 - &a.1)
            }
        }
    }
}

impl From<u32> for BigUint {
    fn from(value: u32) -> Self {
        Self::from_limbs(vec![value])
    }
}

impl From<u64> for BigUint {
    fn from(value: u64) -> Self {
        Self::from_limbs(vec![value as u32, (value >> 32) as u32])
    }
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.limbs.len() != other.limbs.len() {
            return self.limbs.len().cmp(&other.limbs.len());
        }
        for (a, b) in self.limbs.iter().rev().zip(other.limbs.iter().rev()) {
            if a != b {
                return a.cmp(b);
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<&BigUint> for &BigUint {
    type Output = BigUint;
    fn add(self, rhs: &BigUint) -> BigUint {
        BigUint::from_limbs(add_limbs(&self.limbs, &rhs.limbs))
    }
}

impl Add for BigUint {
    type Output = BigUint;
    fn add(self, rhs: BigUint) -> BigUint {
        &self + &rhs
    }
}

impl Sub<&BigUint> for &BigUint {
    type Output = BigUint;
    fn sub(self, rhs: &BigUint) -> BigUint {
        self.checked_sub(rhs)
            .expect("BigUint subtraction underflow")
    }
}

impl Sub for BigUint {
    type Output = BigUint;
    fn sub(self, rhs: BigUint) -> BigUint {
        &self - &rhs
    }
}

impl Mul<&BigUint> for &BigUint {
    type Output = BigUint;
    fn mul(self, rhs: &BigUint) -> BigUint {
        BigUint::from_limbs(mul_limbs(&self.limbs, &rhs.limbs))
    }
}

impl Mul for BigUint {
    type Output = BigUint;
    fn mul(self, rhs: BigUint) -> BigUint {
        &self * &rhs
    }
}

impl Div<&BigUint> for &BigUint {
    type Output = BigUint;
    fn div(self, rhs: &BigUint) -> BigUint {
        self.div_rem(rhs).0
    }
}

impl Div for BigUint {
    type Output = BigUint;
    fn div(self, rhs: BigUint) -> BigUint {
        &self / &rhs
    }
}

impl Rem<&BigUint> for &BigUint {
    type Output = BigUint;
    fn rem(self, rhs: &BigUint) -> BigUint {
        self.div_rem(rhs).1
    }
}

impl Rem for BigUint {
    type Output = BigUint;
    fn rem(self, rhs: BigUint) -> BigUint {
        &self % &rhs
    }
}

impl Shl<usize> for &BigUint {
    type Output = BigUint;
    fn shl(self, shift: usize) -> BigUint {
        self.shl_bits(shift)
    }
}

impl Shl<usize> for BigUint {
    type Output = BigUint;
    fn shl(self, shift: usize) -> BigUint {
        self.shl_bits(shift)
    }
}

impl Shr<usize> for &BigUint {
    type Output = BigUint;
    fn shr(self, shift: usize) -> BigUint {
        self.shr_bits(shift)
    }
}

impl Shr<usize> for BigUint {
    type Output = BigUint;
    fn shr(self, shift: usize) -> BigUint {
        self.shr_bits(shift)
    }
}

impl Zero for BigUint {
    fn zero() -> Self {
        BigUint { limbs: Vec::new() }
    }

    fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }
}

impl One for BigUint {
    fn one() -> Self {
        BigUint { limbs: vec![1] }
    }

    fn is_one(&self) -> bool {
        self.limbs == [1]
    }
}

/// Error parsing a [`BigUint`] from a digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBigUintError(());

impl fmt::Display for ParseBigUintError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid digit found in string")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseBigUintError {}

impl Num for BigUint {
    type FromStrRadixErr = ParseBigUintError;

    /// Parse an unsigned digit string of arbitrary length. Hexadecimal key
    /// material comes through here with `radix = 16`.
    fn from_str_radix(s: &str, radix: u32) -> core::result::Result<Self, ParseBigUintError> {
        assert!((2..=36).contains(&radix), "radix must be within 2..=36");
        if s.is_empty() {
            return Err(ParseBigUintError(()));
        }
        let radix_big = BigUint::from(radix);
        let mut acc = BigUint::zero();
        for c in s.chars() {
            let digit = c.to_digit(radix).ok_or(ParseBigUintError(()))?;
            acc = &(&acc * &radix_big) + &BigUint::from(digit);
        }
        Ok(acc)
    }
}

impl fmt::LowerHex for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.limbs.split_last() {
            None => f.write_str("0"),
            Some((top, rest)) => {
                write!(f, "{:x}", top)?;
                for limb in rest.iter().rev() {
                    write!(f, "{:08x}", limb)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for BigUint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self)
    }
}

impl Zeroize for BigUint {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
    }
}
