//! Cryptographic primitives for Entitle license tokens.
//!
//! This crate provides the three building blocks the license engine
//! composes into its encrypt-then-sign envelope:
//!
//! - Symmetric key derivation from a shared secret ([`SecretKey::derive`])
//! - Authenticated symmetric encryption via ChaCha20-Poly1305 ([`encrypt`] / [`decrypt`])
//! - Ed25519 signing and verification ([`SigningKey`] / [`VerifyingKey`])
//!
//! The text encodings produced here (base64, standard alphabet) never
//! contain a literal `.`, which the envelope format relies on for its
//! dot-separated framing.

mod cipher;
mod error;
mod key;
mod signing;

pub use cipher::{decrypt, encrypt, CipherText, NONCE_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{SecretKey, KEY_SIZE};
pub use signing::{KeyPair, Signature, SigningKey, VerifyingKey};
