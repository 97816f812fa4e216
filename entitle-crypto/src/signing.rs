//! Ed25519 signing and verification for license envelopes.
//!
//! The engine signs the transmitted form of the cipher text (its base64
//! encoding), so a verifier authenticates exactly the bytes it received.
//! Ed25519 fixes its digest internally, so issuer and verifier cannot
//! disagree on the hash algorithm.

use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{
    Signer as _, Verifier as _,
    Signature as DalekSignature,
    SigningKey as DalekSigningKey,
    VerifyingKey as DalekVerifyingKey,
};
use rand::rngs::OsRng;

use crate::error::{CryptoError, CryptoResult};

/// Ed25519 signing key (secret). Held by the license issuer.
pub struct SigningKey(DalekSigningKey);

/// Ed25519 verifying key (public). Distributed with the verifier.
pub struct VerifyingKey(DalekVerifyingKey);

/// Ed25519 signature bytes.
pub struct Signature(DalekSignature);

/// A keypair for issuance and verification.
pub struct KeyPair {
    pub signing_key: SigningKey,
    pub verifying_key: VerifyingKey,
}

impl KeyPair {
    /// Generates a new random Ed25519 keypair.
    pub fn generate() -> Self {
        let signing = DalekSigningKey::generate(&mut OsRng);
        let verifying = signing.verifying_key();
        Self {
            signing_key: SigningKey(signing),
            verifying_key: VerifyingKey(verifying),
        }
    }
}

impl SigningKey {
    /// Creates a signing key from raw 32-byte secret.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(DalekSigningKey::from_bytes(bytes))
    }

    /// Returns the raw 32-byte secret key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Signs a message and returns the signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign(message))
    }

    /// Returns the corresponding verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey(self.0.verifying_key())
    }
}

impl VerifyingKey {
    /// Creates a verifying key from raw 32-byte public key.
    pub fn from_bytes(bytes: &[u8; 32]) -> CryptoResult<Self> {
        DalekVerifyingKey::from_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Returns the raw 32-byte public key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Verifies a signature against a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> CryptoResult<()> {
        self.0
            .verify(message, &signature.0)
            .map_err(|_| CryptoError::SignatureInvalid)
    }
}

impl Signature {
    /// Creates a signature from raw 64-byte value.
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        Self(DalekSignature::from_bytes(bytes))
    }

    /// Returns the raw 64-byte signature.
    pub fn to_bytes(&self) -> [u8; 64] {
        self.0.to_bytes()
    }

    /// Encodes the signature as base64 (standard alphabet, no `.`).
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Decodes a signature from its base64 form.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::InvalidSignature(format!("invalid base64: {e}")))?;
        let bytes: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignature("signature must be 64 bytes".to_string()))?;
        Ok(Self::from_bytes(&bytes))
    }
}
