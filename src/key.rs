use alloc::vec;
use alloc::vec::Vec;

use num_traits::{Num, One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithms::generate::generate_key;
use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::biguint::BigUint;
use crate::errors::{Error, Result};
use crate::traits::{BlockType, PaddingScheme, PrivateKeyParts, PublicKeyParts};

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: power to which a plaintext message is raised in
    /// order to encrypt it.
    ///
    /// Typically 0x10001 (65537)
    e: u32,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    d: BigUint,
    /// Prime factors and precomputed CRT values, when known.
    precomputed: Option<CrtComponents>,
}

impl Eq for RsaPrivateKey {}
impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.d == other.d
            && self.precomputed == other.precomputed
    }
}

impl AsRef<RsaPublicKey> for RsaPrivateKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.pubkey_components
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
        self.precomputed.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

/// The prime factors of the modulus together with the values that speed up
/// private operations through the CRT. Invariant: `n = p * q` and `p > q`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CrtComponents {
    /// Larger prime factor of N
    pub(crate) p: BigUint,
    /// Smaller prime factor of N
    pub(crate) q: BigUint,
    /// D mod (P-1)
    pub(crate) dp: BigUint,
    /// D mod (Q-1)
    pub(crate) dq: BigUint,
    /// Q^-1 mod P
    pub(crate) qinv: BigUint,
}

impl Zeroize for CrtComponents {
    fn zeroize(&mut self) {
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for CrtComponents {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> u32 {
        self.e
    }
}

impl RsaPublicKey {
    /// Minimum value of the public exponent `e`.
    pub const MIN_PUB_EXPONENT: u32 = 2;

    /// Maximum value of the public exponent `e`.
    pub const MAX_PUB_EXPONENT: u32 = (1 << 31) - 1;

    /// Maximum size of the modulus `n` in bits.
    pub const MAX_SIZE: usize = 4096;

    /// Create a new public key from its components.
    ///
    /// This function accepts public keys with a modulus size up to 4096-bits,
    /// i.e. [`RsaPublicKey::MAX_SIZE`].
    pub fn new(n: BigUint, e: u32) -> Result<Self> {
        Self::new_with_max_size(n, e, Self::MAX_SIZE)
    }

    /// Create a new public key from its components.
    pub fn new_with_max_size(n: BigUint, e: u32, max_size: usize) -> Result<Self> {
        let k = Self { n, e };
        check_public_with_max_size(&k, max_size)?;
        Ok(k)
    }

    /// Create a new public key, bypassing checks around the modulus and public
    /// exponent size.
    ///
    /// This method is not recommended, and only intended for unusual use cases.
    /// Most applications should use [`RsaPublicKey::new`] instead.
    pub fn new_unchecked(n: BigUint, e: u32) -> Self {
        Self { n, e }
    }

    /// Parse a public key from unsigned big-endian hex strings.
    pub fn from_hex(n_hex: &str, e_hex: &str) -> Result<Self> {
        let n = parse_hex(n_hex)?;
        let e = parse_hex_exponent(e_hex)?;
        Self::new(n, e)
    }

    /// Encrypt `msg` with the padding scheme's type-2 formatting.
    ///
    /// The message is split into blocks of the scheme's capacity; each block
    /// becomes exactly `self.size()` ciphertext bytes.
    pub fn encrypt<R: CryptoRngCore + ?Sized, P: PaddingScheme>(
        &self,
        rng: &mut R,
        padding: &P,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        check_public(self)?;
        let k = self.size();
        let mut out = Vec::new();
        for chunk in split_input(msg, padding.max_input_len(k))? {
            let em = padding.pad(rng, chunk, self.n.bits(), BlockType::Encryption)?;
            let m = BigUint::from_bytes_be(&em);
            let c = rsa_encrypt(self, &m)?;
            out.extend_from_slice(&uint_to_be_pad(&c, k)?);
        }
        Ok(out)
    }

    /// Verify `sig` against the padding scheme's type-1 formatting and
    /// return the recovered message.
    ///
    /// `msg` is the message being verified; it is required by PSS and
    /// ignored by PKCS#1 v1.5 (which recovers the message from the blocks
    /// themselves).
    pub fn verify<P: PaddingScheme>(
        &self,
        padding: &P,
        sig: &[u8],
        msg: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        check_public(self)?;
        let k = self.size();
        if sig.is_empty() || sig.len() % k != 0 {
            return Err(Error::Verification);
        }
        let mut out = Vec::new();
        for block in sig.chunks_exact(k) {
            let s = BigUint::from_bytes_be(block);
            if s >= self.n {
                return Err(Error::Verification);
            }
            let m = rsa_encrypt(self, &s)?;
            let mut em = uint_to_be_pad(&m, k)?;
            out.extend_from_slice(&padding.unpad(&mut em, self.n.bits(), BlockType::Signature, msg)?);
        }
        Ok(out)
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> u32 {
        self.pubkey_components.e
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn p(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|crt| &crt.p)
    }

    fn q(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|crt| &crt.q)
    }

    fn dp(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|crt| &crt.dp)
    }

    fn dq(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|crt| &crt.dq)
    }

    fn qinv(&self) -> Option<&BigUint> {
        self.precomputed.as_ref().map(|crt| &crt.qinv)
    }
}

impl RsaPrivateKey {
    /// Default exponent for RSA keys.
    const EXP: u32 = 65537;

    /// Generate a new random key pair of the given bit size, with the
    /// default public exponent 65537.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<Self> {
        Self::new_with_exp(rng, bit_size, Self::EXP)
    }

    /// Generate a new random key pair of the given bit size and public
    /// exponent.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
        e: u32,
    ) -> Result<Self> {
        if bit_size < 64 {
            return Err(Error::InvalidArguments);
        }
        if e % 2 == 0 {
            return Err(Error::InvalidExponent);
        }
        if e < RsaPublicKey::MIN_PUB_EXPONENT {
            return Err(Error::PublicExponentTooSmall);
        }
        if e > RsaPublicKey::MAX_PUB_EXPONENT {
            return Err(Error::PublicExponentTooLarge);
        }
        Ok(generate_key(rng, bit_size, e))
    }

    /// Constructs an RSA key pair from the modulus, public exponent and
    /// private exponent. Private operations will not use the CRT.
    pub fn from_components(n: BigUint, e: u32, d: BigUint) -> Result<Self> {
        let pubkey_components = RsaPublicKey::new(n, e)?;
        if d.is_zero() || &d >= pubkey_components.n() {
            return Err(Error::InvalidExponent);
        }
        Ok(Self {
            pubkey_components,
            d,
            precomputed: None,
        })
    }

    /// Parse a private key without CRT parameters from unsigned big-endian
    /// hex strings.
    pub fn from_hex(n_hex: &str, e_hex: &str, d_hex: &str) -> Result<Self> {
        Self::from_components(parse_hex(n_hex)?, parse_hex_exponent(e_hex)?, parse_hex(d_hex)?)
    }

    /// Parse a private key with full CRT parameters from unsigned
    /// big-endian hex strings, and validate their consistency.
    #[allow(clippy::too_many_arguments)]
    pub fn from_hex_crt(
        n_hex: &str,
        e_hex: &str,
        d_hex: &str,
        p_hex: &str,
        q_hex: &str,
        dmp1_hex: &str,
        dmq1_hex: &str,
        iqmp_hex: &str,
    ) -> Result<Self> {
        let mut key = Self::from_components(parse_hex(n_hex)?, parse_hex_exponent(e_hex)?, parse_hex(d_hex)?)?;
        key.precomputed = Some(CrtComponents {
            p: parse_hex(p_hex)?,
            q: parse_hex(q_hex)?,
            dp: parse_hex(dmp1_hex)?,
            dq: parse_hex(dmq1_hex)?,
            qinv: parse_hex(iqmp_hex)?,
        });
        key.validate()?;
        Ok(key)
    }

    pub(crate) fn from_parts(
        pubkey_components: RsaPublicKey,
        d: BigUint,
        precomputed: Option<CrtComponents>,
    ) -> Self {
        Self {
            pubkey_components,
            d,
            precomputed,
        }
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    ///
    /// Generally this is not needed since `RsaPrivateKey` exposes the public
    /// components through `AsRef`, but it can occasionally be useful to
    /// discard the private information entirely.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        let crt = match &self.precomputed {
            Some(crt) => crt,
            None => return Ok(()),
        };

        if crt.p <= crt.q {
            return Err(Error::InvalidPrime);
        }

        // Check that p * q == n.
        if &(&crt.p * &crt.q) != self.n() {
            return Err(Error::InvalidModulus);
        }

        // Check that de ≡ 1 mod p-1 and de ≡ 1 mod q-1. This implies that
        // e is coprime to each p-1 as e has a multiplicative inverse, and
        // that a^de ≡ a mod n for all a coprime to n, as required.
        let one = BigUint::one();
        let de = &BigUint::from(self.e()) * &self.d;
        for prime in [&crt.p, &crt.q] {
            let congruence = &de % &(prime - &one);
            if !congruence.is_one() {
                return Err(Error::InvalidExponent);
            }
        }

        // Check that q * qinv ≡ 1 mod p.
        if !(&(&crt.q * &crt.qinv) % &crt.p).is_one() {
            return Err(Error::InvalidCoefficient);
        }

        Ok(())
    }

    /// Decrypt `ciphertext` with the padding scheme's type-2 formatting.
    ///
    /// The input must be a whole number of `self.size()`-byte blocks.
    pub fn decrypt<P: PaddingScheme>(&self, padding: &P, ciphertext: &[u8]) -> Result<Vec<u8>> {
        check_public(self)?;
        let k = self.size();
        if ciphertext.is_empty() || ciphertext.len() % k != 0 {
            return Err(Error::Decryption);
        }
        let mut out = Vec::new();
        for block in ciphertext.chunks_exact(k) {
            let c = BigUint::from_bytes_be(block);
            let m = rsa_decrypt_and_check(self, &c)?;
            let mut em = uint_to_zeroizing_be_pad(m, k)?;
            out.extend_from_slice(&padding.unpad(
                &mut em,
                self.n().bits(),
                BlockType::Encryption,
                None,
            )?);
        }
        Ok(out)
    }

    /// Sign `msg` with the padding scheme's type-1 formatting.
    pub fn sign<R: CryptoRngCore + ?Sized, P: PaddingScheme>(
        &self,
        rng: &mut R,
        padding: &P,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        check_public(self)?;
        let k = self.size();
        let mut out = Vec::new();
        for chunk in split_input(msg, padding.max_input_len(k))? {
            let em = padding.pad(rng, chunk, self.n().bits(), BlockType::Signature)?;
            let m = BigUint::from_bytes_be(&em);
            let s = rsa_decrypt_and_check(self, &m)?;
            out.extend_from_slice(&uint_to_be_pad(&s, k)?);
        }
        Ok(out)
    }
}

// Cut the message into per-block chunks. An empty message is one empty
// block; every scheme accepts that.
fn split_input<'a>(msg: &'a [u8], max_len: Option<usize>) -> Result<Vec<&'a [u8]>> {
    Ok(match max_len {
        None => vec![msg],
        Some(_) if msg.is_empty() => vec![msg],
        Some(0) => return Err(Error::MessageTooLong),
        Some(max) => msg.chunks(max).collect(),
    })
}

fn parse_hex(s: &str) -> Result<BigUint> {
    BigUint::from_str_radix(s, 16).map_err(|_| Error::InvalidArguments)
}

fn parse_hex_exponent(s: &str) -> Result<u32> {
    parse_hex(s)?.to_u32().ok_or(Error::PublicExponentTooLarge)
}

/// Check that the public key is well formed and has an exponent within acceptable bounds.
#[inline]
pub fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    check_public_with_max_size(public_key, RsaPublicKey::MAX_SIZE)
}

/// Check that the public key is well formed and has an exponent within acceptable bounds.
#[inline]
fn check_public_with_max_size(public_key: &impl PublicKeyParts, max_size: usize) -> Result<()> {
    if public_key.n().bits() > max_size {
        return Err(Error::ModulusTooLarge);
    }

    let e = public_key.e();

    if &BigUint::from(e) >= public_key.n() || public_key.n().is_even() {
        return Err(Error::InvalidModulus);
    }

    if e % 2 == 0 {
        return Err(Error::InvalidExponent);
    }

    if e < RsaPublicKey::MIN_PUB_EXPONENT {
        return Err(Error::PublicExponentTooSmall);
    }

    if e > RsaPublicKey::MAX_PUB_EXPONENT {
        return Err(Error::PublicExponentTooLarge);
    }

    Ok(())
}
