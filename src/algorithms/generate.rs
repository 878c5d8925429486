//! RSA key generation.

use num_traits::One;
use rand_core::CryptoRngCore;

use super::rsa::totient;
use crate::biguint::BigUint;
use crate::key::{CrtComponents, RsaPrivateKey, RsaPublicKey};
use crate::prime::random_probable_prime;

// Rounds applied to every accepted prime; a candidate surviving these is
// composite with probability below 4^-10.
const MILLER_RABIN_ROUNDS: usize = 10;

/// Generate a `bits`-bit key pair for the public exponent `e`.
///
/// Candidate rejection (composites, `gcd(p-1, e) != 1`, `gcd(phi, e) != 1`)
/// loops internally and is never surfaced.
pub(crate) fn generate_key<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bits: usize,
    e: u32,
) -> RsaPrivateKey {
    let q_bits = bits / 2;
    let p_bits = bits - q_bits;
    let e_big = BigUint::from(e);

    loop {
        let mut p = sample_prime(rng, p_bits, &e_big);
        let mut q = sample_prime(rng, q_bits, &e_big);
        if p == q {
            continue;
        }
        if p < q {
            core::mem::swap(&mut p, &mut q);
        }

        let phi = totient(&p, &q);
        if !phi.gcd(&e_big).is_one() {
            continue;
        }

        let n = &p * &q;
        let d = e_big
            .mod_inverse(&phi)
            .expect("e is coprime to phi by construction");
        let one = BigUint::one();
        let dp = &d % &(&p - &one);
        let dq = &d % &(&q - &one);
        let qinv = q
            .mod_inverse(&p)
            .expect("distinct primes are coprime");

        let pubkey = RsaPublicKey::new_unchecked(n, e);
        return RsaPrivateKey::from_parts(pubkey, d, Some(CrtComponents { p, q, dp, dq, qinv }));
    }
}

// Sample until a prime with gcd(p-1, e) = 1 passes the full Miller-Rabin
// round count. `random_probable_prime` only applies a single round.
fn sample_prime<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: usize, e: &BigUint) -> BigUint {
    let one = BigUint::one();
    loop {
        let candidate = random_probable_prime(bits, rng);
        if !(&candidate - &one).gcd(e).is_one() {
            continue;
        }
        if candidate.is_probable_prime(MILLER_RABIN_ROUNDS, rng) {
            return candidate;
        }
    }
}
