//! License issuance and verification for Entitle.
//!
//! This crate handles:
//! - Building entitlement records (authorized machines, service subscriptions, expiry)
//! - Issuing portable, tamper-evident license tokens
//! - Verifying tokens against the executing machine's identity
//! - Caching issued tokens in an external store (best-effort)
//!
//! # Design Principles
//!
//! - **Encrypt-then-sign**: the signature covers the transmitted cipher
//!   text, so a verifier without the shared secret cannot even probe
//!   authenticity — decrypt-then-verify is the mandated order of checks
//! - **Machine binding**: a correctly signed token is necessary but not
//!   sufficient; the local machine must be in the authorized set
//! - **Opaque rejection**: every format, key, or tampering failure
//!   collapses to [`LicenseError::UnknownLicense`] so callers cannot
//!   probe the scheme
//! - **Stateless engine**: issuance and verification operate purely on
//!   their inputs; the token cache is never read back during verification
//!
//! # Token Format
//!
//! Tokens are formatted as: `base64(random16.cipherText.signature)`
//! The cipher text is the ChaCha20-Poly1305 encryption of the JSON
//! record under a key derived from the shared secret; the Ed25519
//! signature covers the cipher-text segment as transmitted.

mod envelope;
mod error;
mod license;
mod machine;
mod store;

pub use envelope::{Envelope, NONCE_LEN};
pub use error::{LicenseError, LicenseResult};
pub use license::{verify, verify_with_identity, License, LicenseStatus, Subscription};
pub use machine::{FixedIdentity, HostIdentity, MachineIdentity};
pub use store::{cache_token, LicenseStore, MemoryStore, CACHE_KEY_PREFIX};
