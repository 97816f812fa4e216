//! The three-part wire envelope.
//!
//! An issued token is `base64(nonce.cipherText.signature)`: a 16-character
//! random nonce, the base64 cipher text, and the base64 signature, joined
//! with literal `.` separators and base64-encoded as a whole. The nonce
//! only guarantees that two issuances of an identical record produce
//! different wire strings; it is not key material.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

use crate::error::{LicenseError, LicenseResult};

/// Length of the random nonce segment.
pub const NONCE_LEN: usize = 16;

/// A decoded three-part token.
///
/// The inner segments are text encodings guaranteed not to contain a
/// literal `.`, which is what makes the dot-separated framing sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Random alphanumeric nonce, unique per issuance.
    pub nonce: String,
    /// Base64 cipher text (nonce-prefixed ChaCha20-Poly1305 output).
    pub cipher_text: String,
    /// Base64 Ed25519 signature over the cipher-text segment.
    pub signature: String,
}

impl Envelope {
    /// Wraps cipher text and signature with a freshly generated nonce.
    #[must_use]
    pub fn seal(cipher_text: String, signature: String) -> Self {
        let nonce: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        Self {
            nonce,
            cipher_text,
            signature,
        }
    }

    /// Encodes the envelope to its wire string.
    #[must_use]
    pub fn encode(&self) -> String {
        let joined = format!("{}.{}.{}", self.nonce, self.cipher_text, self.signature);
        STANDARD.encode(joined.as_bytes())
    }

    /// Decodes a wire string back into its three parts.
    ///
    /// # Errors
    ///
    /// Fails with [`LicenseError::MalformedToken`] if the input is not
    /// valid base64, does not decode to UTF-8 text, or does not split
    /// into exactly three dot-separated fields.
    pub fn decode(wire: &str) -> LicenseResult<Self> {
        let bytes = STANDARD
            .decode(wire.trim())
            .map_err(|e| LicenseError::MalformedToken(format!("invalid base64: {e}")))?;

        let text = String::from_utf8(bytes)
            .map_err(|_| LicenseError::MalformedToken("token is not UTF-8".to_string()))?;

        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 3 {
            return Err(LicenseError::MalformedToken(format!(
                "expected 3 dot-separated parts, got {}",
                parts.len()
            )));
        }

        Ok(Self {
            nonce: parts[0].to_string(),
            cipher_text: parts[1].to_string(),
            signature: parts[2].to_string(),
        })
    }
}
