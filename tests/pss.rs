use asymcrypt::traits::PublicKeyParts;
use asymcrypt::{Error, Pss, RsaPrivateKey};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha1::Sha1;
use sha2::Sha256;

const N: &str = "d614a4577778dfb7045cd9f4ae8edb6a8264f67bc4e72a927af4a2c3af649c1fff4d0063a369923f8d2b0038d4bd60a16d704f0f0e3024cbe6a7523101d69a07";
const E: &str = "10001";
const D: &str = "9b681ab1201a901494c72eb5afee269c181260d812655983425ccab75160b0f0398463b3e811f01a2b83e30a6967b31af85c97257bea7976e9eba9601039ecd9";
const P: &str = "ecd1140b2daa1abdc72f54f030ee60f3c592103a79b328d737943e680310f3c5";
const Q: &str = "e76c1497fa6d71939622979255d9300476eb75583c6f230be7f6e9626f98575b";
const DMP1: &str = "228c6a092b734a8d6f36a784970edfd41079bba65c44d7eb75ef499f70fb1325";
const DMQ1: &str = "658bba5999ac6e5ad955227736ae4f709611e972a74a08f1cf7e3b9852e960e3";
const IQMP: &str = "4f1680dbf603287215fed16f50654e82abcd570685d52b1f1569fb1e23163d7b";

fn test_key() -> RsaPrivateKey {
    RsaPrivateKey::from_hex_crt(N, E, D, P, Q, DMP1, DMQ1, IQMP).unwrap()
}

#[test]
fn test_sign_verify_roundtrip() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let padding = Pss::<Sha1>::new();

    let msg = b"selected message";
    let sig = key.sign(&mut rng, &padding, msg).unwrap();
    assert_eq!(sig.len(), public.size());
    assert_eq!(public.verify(&padding, &sig, Some(msg)).unwrap(), msg);
}

#[test]
fn test_verify_rejects_wrong_message() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let padding = Pss::<Sha1>::new();

    let sig = key.sign(&mut rng, &padding, b"signed").unwrap();
    assert_eq!(
        public
            .verify(&padding, &sig, Some(b"not what was signed"))
            .unwrap_err(),
        Error::Verification
    );
}

#[test]
fn test_verify_rejects_tampered_signature() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let padding = Pss::<Sha1>::new();

    let msg = b"signed";
    let mut sig = key.sign(&mut rng, &padding, msg).unwrap();
    sig[30] ^= 0x20;
    assert_eq!(
        public.verify(&padding, &sig, Some(msg)).unwrap_err(),
        Error::Verification
    );
}

#[test]
fn test_verify_requires_original_message() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let padding = Pss::<Sha1>::new();

    let sig = key.sign(&mut rng, &padding, b"signed").unwrap();
    assert_eq!(
        public.verify(&padding, &sig, None).unwrap_err(),
        Error::InvalidArguments
    );
}

#[test]
fn test_salted_signatures_differ() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let padding = Pss::<Sha1>::new();

    let msg = b"same message";
    let first = key.sign(&mut rng, &padding, msg).unwrap();
    let second = key.sign(&mut rng, &padding, msg).unwrap();
    assert_ne!(first, second);
    assert_eq!(public.verify(&padding, &first, Some(msg)).unwrap(), msg);
    assert_eq!(public.verify(&padding, &second, Some(msg)).unwrap(), msg);
}

#[test]
fn test_zero_salt_is_deterministic() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let padding = Pss::<Sha1>::new_with_salt_len(0);

    let msg = b"same message";
    let first = key.sign(&mut rng, &padding, msg).unwrap();
    let second = key.sign(&mut rng, &padding, msg).unwrap();
    assert_eq!(first, second);
    assert_eq!(public.verify(&padding, &first, Some(msg)).unwrap(), msg);
}

#[test]
fn test_sha256_with_short_salt() {
    // A 32-byte digest plus a 32-byte salt does not fit a 512-bit key;
    // a short salt does.
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    let full = Pss::<Sha256>::new();
    assert_eq!(
        key.sign(&mut rng, &full, b"message").unwrap_err(),
        Error::Internal
    );

    let short = Pss::<Sha256>::new_with_salt_len(8);
    let sig = key.sign(&mut rng, &short, b"message").unwrap();
    assert_eq!(public.verify(&short, &sig, Some(b"message")).unwrap(), b"message");
}

#[test]
fn test_long_messages_hash_into_one_block() {
    let key = test_key();
    let public = key.to_public_key();
    let mut rng = ChaCha8Rng::from_seed([42; 32]);
    let padding = Pss::<Sha1>::new();

    let msg: Vec<u8> = (0..1000u32).map(|i| i as u8).collect();
    let sig = key.sign(&mut rng, &padding, &msg).unwrap();
    assert_eq!(sig.len(), public.size());
    assert_eq!(public.verify(&padding, &sig, Some(&msg)).unwrap(), msg);
}
