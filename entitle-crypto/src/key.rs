//! Symmetric key material derived from a shared secret.
//!
//! The issuer and verifier hold the same out-of-band secret string. It is
//! never used directly as key material: a one-way SHA-256 hash normalizes
//! arbitrary-length secrets to the fixed key size the cipher expects.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of symmetric keys in bytes (256 bits for ChaCha20).
pub const KEY_SIZE: usize = 32;

/// A symmetric encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; KEY_SIZE],
}

impl SecretKey {
    /// Derives a key from a shared secret string.
    ///
    /// Deterministic: the same secret always yields the same key, so
    /// issuer and verifier derive identical key material independently.
    #[must_use]
    pub fn derive(shared_secret: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(shared_secret.as_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&digest);
        Self { bytes }
    }

    /// Creates a key from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
