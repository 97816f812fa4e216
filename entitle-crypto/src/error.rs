//! Error types for the primitives layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed (wrong key or tampered data).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Invalid key length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Ed25519 signature did not verify.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// Public key bytes do not form a valid Ed25519 point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Signature bytes have the wrong length or encoding.
    #[error("invalid signature encoding: {0}")]
    InvalidSignature(String),
}
