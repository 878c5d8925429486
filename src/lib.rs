#![cfg_attr(not(feature = "std"), no_std)]

//! # Supported algorithms
//!
//! This crate implements the asymmetric half of a small cryptography stack:
//!
//! - RSA encryption and signatures over the schemes described in [RFC8017]:
//!   [OAEP](crate::oaep), [PKCS#1 v1.5](crate::pkcs1v15) (encryption and
//!   signatures) and [PSS](crate::pss), driven by an arbitrary-precision
//!   [`BigUint`] built for modular arithmetic.
//! - [X25519](crate::curve25519) key agreement over Curve25519 ([RFC7748]).
//!
//! Randomness comes in through [`rand_core::CryptoRngCore`]; hashes come in
//! through [`digest::Digest`]. Key material zeroizes on drop.
//!
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017
//! [RFC7748]: https://datatracker.ietf.org/doc/html/rfc7748

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use rand_core;

mod algorithms;
pub mod biguint;
pub mod curve25519;
pub mod errors;
mod key;
pub mod oaep;
pub mod pkcs1v15;
mod prime;
pub mod pss;
pub mod traits;

#[cfg(feature = "sha1")]
pub use sha1;
#[cfg(feature = "sha2")]
pub use sha2;

pub use crate::{
    biguint::BigUint,
    errors::{Error, Result},
    key::{RsaPrivateKey, RsaPublicKey},
    oaep::Oaep,
    pkcs1v15::Pkcs1v15,
    pss::Pss,
};
