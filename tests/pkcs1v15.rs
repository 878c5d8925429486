use asymcrypt::traits::{BlockType, PaddingScheme, PublicKeyParts};
use asymcrypt::{Error, Pkcs1v15, RsaPrivateKey};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

// 512-bit test key with full CRT parameters.
const N: &str = "d614a4577778dfb7045cd9f4ae8edb6a8264f67bc4e72a927af4a2c3af649c1fff4d0063a369923f8d2b0038d4bd60a16d704f0f0e3024cbe6a7523101d69a07";
const E: &str = "10001";
const D: &str = "9b681ab1201a901494c72eb5afee269c181260d812655983425ccab75160b0f0398463b3e811f01a2b83e30a6967b31af85c97257bea7976e9eba9601039ecd9";
const P: &str = "ecd1140b2daa1abdc72f54f030ee60f3c592103a79b328d737943e680310f3c5";
const Q: &str = "e76c1497fa6d71939622979255d9300476eb75583c6f230be7f6e9626f98575b";
const DMP1: &str = "228c6a092b734a8d6f36a784970edfd41079bba65c44d7eb75ef499f70fb1325";
const DMQ1: &str = "658bba5999ac6e5ad955227736ae4f709611e972a74a08f1cf7e3b9852e960e3";
const IQMP: &str = "4f1680dbf603287215fed16f50654e82abcd570685d52b1f1569fb1e23163d7b";

// Type-1 signature over the raw message "hi"; deterministic, so a fixed
// expected value pins down both the padding layout and the CRT math.
const SIG_HI: &str = "5642340957492f5c69ee4a6990a49471b918c37ee935385a234fab869ba6fd8b35cb458656ea3e7f5b47834e04dc39e793abe89b04577b99b9ce1471e1daa15f";

fn test_key() -> RsaPrivateKey {
    RsaPrivateKey::from_hex_crt(N, E, D, P, Q, DMP1, DMQ1, IQMP).unwrap()
}

#[test]
fn test_parse_and_validate() {
    let key = test_key();
    key.validate().unwrap();
    assert_eq!(key.size(), 64);

    // Swapped primes must be rejected.
    assert_eq!(
        RsaPrivateKey::from_hex_crt(N, E, D, Q, P, DMP1, DMQ1, IQMP).unwrap_err(),
        Error::InvalidPrime
    );
}

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    let ciphertext = public.encrypt(&mut rng, &Pkcs1v15, b"hi").unwrap();
    assert_eq!(ciphertext.len(), 64);
    assert_eq!(key.decrypt(&Pkcs1v15, &ciphertext).unwrap(), b"hi");
}

#[test]
fn test_sign_known_vector() {
    let key = test_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    let sig = key.sign(&mut rng, &Pkcs1v15, b"hi").unwrap();
    assert_eq!(sig, hex::decode(SIG_HI).unwrap());
}

#[test]
fn test_sign_known_vector_without_crt() {
    // The plain c^d path and the CRT path must agree.
    let key = RsaPrivateKey::from_hex(N, E, D).unwrap();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    let sig = key.sign(&mut rng, &Pkcs1v15, b"hi").unwrap();
    assert_eq!(sig, hex::decode(SIG_HI).unwrap());
}

#[test]
fn test_verify_recovers_message() {
    let key = test_key();
    let public = key.to_public_key();

    let sig = hex::decode(SIG_HI).unwrap();
    assert_eq!(public.verify(&Pkcs1v15, &sig, None).unwrap(), b"hi");
}

#[test]
fn test_verify_rejects_tampered_signature() {
    let key = test_key();
    let public = key.to_public_key();

    let mut sig = hex::decode(SIG_HI).unwrap();
    sig[20] ^= 0x01;
    assert_eq!(
        public.verify(&Pkcs1v15, &sig, None).unwrap_err(),
        Error::Verification
    );

    // Wrong length cannot even be split into blocks.
    assert_eq!(
        public.verify(&Pkcs1v15, &sig[..63], None).unwrap_err(),
        Error::Verification
    );
}

#[test]
fn test_block_capacity_boundary() {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    // k - 11 = 53 message bytes fit a single 64-byte block; 54 do not.
    assert!(Pkcs1v15
        .pad(&mut rng, &[0xAA; 53], 512, BlockType::Encryption)
        .is_ok());
    assert_eq!(
        Pkcs1v15
            .pad(&mut rng, &[0xAA; 54], 512, BlockType::Encryption)
            .unwrap_err(),
        Error::MessageTooLong
    );
}

#[test]
fn test_multi_block_roundtrip() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    let msg: Vec<u8> = (0u8..100).collect();
    let ciphertext = public.encrypt(&mut rng, &Pkcs1v15, &msg).unwrap();
    assert_eq!(ciphertext.len(), 128);
    assert_eq!(key.decrypt(&Pkcs1v15, &ciphertext).unwrap(), msg);
}

#[test]
fn test_zero_length_message() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    let ciphertext = public.encrypt(&mut rng, &Pkcs1v15, b"").unwrap();
    assert_eq!(ciphertext.len(), 64);
    assert_eq!(key.decrypt(&Pkcs1v15, &ciphertext).unwrap(), b"");
}

#[test]
fn test_decrypt_rejects_partial_blocks() {
    let key = test_key();
    assert_eq!(
        key.decrypt(&Pkcs1v15, &[0u8; 63]).unwrap_err(),
        Error::Decryption
    );
    assert_eq!(key.decrypt(&Pkcs1v15, &[]).unwrap_err(), Error::Decryption);
}
