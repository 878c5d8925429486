//! Probabilistic primality testing and prime sampling.

use alloc::vec;

use num_traits::{One, Zero};
use rand_core::CryptoRngCore;

use crate::biguint::BigUint;

// Trial-division table; knocks out the bulk of composite candidates before
// any modular exponentiation runs.
const SMALL_PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293,
];

impl BigUint {
    /// Miller–Rabin with `rounds` random witnesses, preceded by trial
    /// division against [`SMALL_PRIMES`].
    ///
    /// A `true` result is wrong with probability at most 4^-rounds.
    pub fn is_probable_prime<R: CryptoRngCore + ?Sized>(&self, rounds: usize, rng: &mut R) -> bool {
        if self.bits() < 2 {
            return false;
        }
        for &small in SMALL_PRIMES {
            if self.rem_u32(small) == 0 {
                return *self == BigUint::from(small);
            }
        }

        // Write self - 1 as 2^s * d with d odd.
        let n_minus_one = self - &BigUint::one();
        let mut d = n_minus_one.clone();
        let mut s = 0usize;
        while d.is_even() {
            d = &d >> 1;
            s += 1;
        }

        'witness: for _ in 0..rounds {
            let a = random_witness(self, rng);
            let mut x = a.modpow(&d, self);
            if x.is_one() || x == n_minus_one {
                continue;
            }
            for _ in 1..s {
                x = &(&x * &x) % self;
                if x == n_minus_one {
                    continue 'witness;
                }
            }
            return false;
        }
        true
    }

    /// Force the value into a `bits`-bit odd number with the top bit set,
    /// then advance by +2 until `rounds` Miller–Rabin rounds pass.
    pub fn primify<R: CryptoRngCore + ?Sized>(
        mut self,
        bits: usize,
        rounds: usize,
        rng: &mut R,
    ) -> BigUint {
        assert!(bits >= 2, "prime candidates need at least two bits");
        self.truncate_bits(bits);
        self.set_bit(bits - 1);
        self.set_bit(0);
        let two = BigUint::from(2u32);
        while !self.is_probable_prime(rounds, rng) {
            self = &self + &two;
        }
        self
    }
}

/// Draw `⌈bits/8⌉` random bytes and primify the result with a single
/// Miller–Rabin round. Key generation re-tests the survivors properly.
pub(crate) fn random_probable_prime<R: CryptoRngCore + ?Sized>(
    bits: usize,
    rng: &mut R,
) -> BigUint {
    let mut bytes = vec![0u8; (bits + 7) / 8];
    rng.fill_bytes(&mut bytes);
    BigUint::from_bytes_be(&bytes).primify(bits, 1, rng)
}

// Witness in [2, n - 2]. The slight modulo bias is irrelevant for
// Miller-Rabin bases.
fn random_witness<R: CryptoRngCore + ?Sized>(n: &BigUint, rng: &mut R) -> BigUint {
    let span = n - &BigUint::from(3u32);
    let mut bytes = vec![0u8; (n.bits() + 7) / 8 + 8];
    rng.fill_bytes(&mut bytes);
    if span.is_zero() {
        return BigUint::from(2u32);
    }
    &(&BigUint::from_bytes_be(&bytes) % &span) + &BigUint::from(2u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Num;
    use rand_chacha::rand_core::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn hex(s: &str) -> BigUint {
        BigUint::from_str_radix(s, 16).unwrap()
    }

    #[test]
    fn test_small_numbers() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        for prime in [2u32, 3, 5, 7, 13, 293, 307, 65537] {
            assert!(
                BigUint::from(prime).is_probable_prime(10, &mut rng),
                "{} should be prime",
                prime
            );
        }
        for composite in [0u32, 1, 4, 9, 291, 295, 65535] {
            assert!(
                !BigUint::from(composite).is_probable_prime(10, &mut rng),
                "{} should be composite",
                composite
            );
        }
    }

    #[test]
    fn test_large_prime_and_composite() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        // 2^127 - 1 is a Mersenne prime; 2^128 - 1 factors.
        let mut mersenne = BigUint::zero();
        mersenne.set_bit(127);
        let mersenne = &mersenne - &BigUint::one();
        assert!(mersenne.is_probable_prime(10, &mut rng));

        let mut composite = BigUint::zero();
        composite.set_bit(128);
        let composite = &composite - &BigUint::one();
        assert!(!composite.is_probable_prime(10, &mut rng));

        let p = hex("ecd1140b2daa1abdc72f54f030ee60f3c592103a79b328d737943e680310f3c5");
        assert!(p.is_probable_prime(10, &mut rng));
    }

    #[test]
    fn test_primify_contract() {
        let mut rng = ChaCha8Rng::from_seed([9; 32]);
        let mut seed = alloc::vec![0u8; 16];
        rng.fill_bytes(&mut seed);
        let candidate = BigUint::from_bytes_be(&seed).primify(128, 10, &mut rng);
        assert_eq!(candidate.bits(), 128);
        assert!(candidate.is_odd());
        assert!(candidate.is_probable_prime(10, &mut rng));
    }

    #[test]
    fn test_random_probable_prime_bits() {
        let mut rng = ChaCha8Rng::from_seed([11; 32]);
        let p = random_probable_prime(96, &mut rng);
        assert_eq!(p.bits(), 96);
        assert!(p.is_odd());
    }
}
