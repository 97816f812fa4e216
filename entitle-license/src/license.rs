//! The License record and the issuance/verification engine.
//!
//! A License is built by the issuer through append operations, frozen at
//! the moment [`License::issue`] snapshots it into a token, and
//! reconstructed read-only on the verification side. The engine itself is
//! stateless: both operations work purely on their inputs.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use entitle_crypto::{decrypt, encrypt, CipherText, SecretKey, Signature, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::envelope::Envelope;
use crate::error::{LicenseError, LicenseResult};
use crate::machine::{HostIdentity, MachineIdentity};

/// A bound on a single service's usage.
///
/// Owned exclusively by the License that holds it; there is no sharing
/// and no independent lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Name of the subscribed service module.
    pub server_name: String,
    /// Human-readable description.
    pub desc: String,
    /// Call-rate limit for this service.
    pub limit: i64,
}

/// Whether a license is within its validity window.
///
/// Expiry is exposed as data and checked as an explicit, separate step;
/// [`verify`] enforces machine binding only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    /// The expiry instant has not passed.
    Active,
    /// The expiry instant has passed.
    Expired,
}

impl LicenseStatus {
    /// Returns true if the license allows usage.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// The entitlement record packaged into a token.
///
/// Field names are part of the wire format and round-trip exactly.
/// Ordered containers keep the canonical payload deterministic for a
/// given record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Machine identifiers authorized to activate this license. Must be
    /// populated before issuing; an empty set can never pass verification.
    legal_machines: BTreeSet<String>,
    /// Subscribed services, keyed by service name.
    subscriptions: BTreeMap<String, Subscription>,
    /// Instant after which the license is intended to be invalid.
    expire: DateTime<Utc>,
    /// Most recently issued wire string. In-memory convenience only,
    /// never part of the payload.
    #[serde(skip)]
    issued_token: Option<String>,
}

impl License {
    /// Creates an empty record expiring at the given instant.
    #[must_use]
    pub fn new(expire: DateTime<Utc>) -> Self {
        Self {
            legal_machines: BTreeSet::new(),
            subscriptions: BTreeMap::new(),
            expire,
            issued_token: None,
        }
    }

    /// Adds machine codes to the authorized set. Duplicates are no-ops.
    pub fn append_machines<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for code in codes {
            self.legal_machines.insert(code.into());
        }
    }

    /// Adds subscriptions, keyed by service name. First write wins: a
    /// second subscription with the same `server_name` is a no-op.
    pub fn append_subscriptions<I>(&mut self, subs: I)
    where
        I: IntoIterator<Item = Subscription>,
    {
        for sub in subs {
            self.subscriptions
                .entry(sub.server_name.clone())
                .or_insert(sub);
        }
    }

    /// Machine identifiers authorized to activate this license.
    #[must_use]
    pub fn legal_machines(&self) -> &BTreeSet<String> {
        &self.legal_machines
    }

    /// Subscribed services, keyed by service name.
    #[must_use]
    pub fn subscriptions(&self) -> &BTreeMap<String, Subscription> {
        &self.subscriptions
    }

    /// The expiry instant.
    #[must_use]
    pub fn expire(&self) -> DateTime<Utc> {
        self.expire
    }

    /// The most recently issued wire string, if any.
    #[must_use]
    pub fn issued_token(&self) -> Option<&str> {
        self.issued_token.as_deref()
    }

    /// Returns the license status relative to `now`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> LicenseStatus {
        if now > self.expire {
            LicenseStatus::Expired
        } else {
            LicenseStatus::Active
        }
    }

    /// Returns true if the expiry instant has passed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == LicenseStatus::Expired
    }

    /// Serializes the record to its canonical byte payload.
    ///
    /// # Errors
    ///
    /// Fails with [`LicenseError::Serialization`] if the record cannot be
    /// encoded or the payload would be empty.
    pub fn canonical_bytes(&self) -> LicenseResult<Vec<u8>> {
        let payload =
            serde_json::to_vec(self).map_err(|e| LicenseError::Serialization(e.to_string()))?;
        if payload.is_empty() {
            return Err(LicenseError::Serialization("empty payload".to_string()));
        }
        Ok(payload)
    }

    /// Issues a wire-format token snapshotting this record.
    ///
    /// The payload is encrypted under a key derived from `shared_secret`,
    /// the cipher text (as transmitted) is signed with the issuer's key,
    /// and the result is wrapped in the three-part envelope. The wire
    /// string is stored on the record for later caching and returned.
    ///
    /// Mutating the record afterwards does not affect the issued token.
    ///
    /// # Errors
    ///
    /// Fails with [`LicenseError::Serialization`] on an unencodable
    /// record or [`LicenseError::Encryption`] on a primitive failure.
    /// Neither is retried: retrying with identical inputs reproduces the
    /// same outcome.
    pub fn issue(
        &mut self,
        shared_secret: &str,
        signing_key: &SigningKey,
    ) -> LicenseResult<String> {
        let payload = self.canonical_bytes()?;

        let key = SecretKey::derive(shared_secret);
        let cipher_text = encrypt(&key, &payload)
            .map_err(|e| LicenseError::Encryption(e.to_string()))?
            .to_base64();

        let signature = signing_key.sign(cipher_text.as_bytes()).to_base64();

        let wire = Envelope::seal(cipher_text, signature).encode();
        debug!(machines = self.legal_machines.len(), "issued license token");

        self.issued_token = Some(wire.clone());
        Ok(wire)
    }

    /// Issues a token and writes the wire string to `path`.
    ///
    /// # Errors
    ///
    /// Issuance errors as in [`License::issue`];
    /// [`LicenseError::Storage`] if the file cannot be written.
    pub fn issue_to_file(
        &mut self,
        path: impl AsRef<Path>,
        shared_secret: &str,
        signing_key: &SigningKey,
    ) -> LicenseResult<String> {
        let wire = self.issue(shared_secret, signing_key)?;
        std::fs::write(path, &wire).map_err(|e| LicenseError::Storage(e.to_string()))?;
        Ok(wire)
    }
}

/// Verifies a wire string and binds it to the machine reported by
/// `identity`.
///
/// The order of checks is fixed: decode, decrypt, verify the signature
/// over the cipher text as transmitted, deserialize, then machine
/// binding. A caller without the shared secret cannot reach the
/// authenticity check at all.
///
/// # Errors
///
/// - [`LicenseError::UnknownLicense`] for any decode, decryption,
///   signature, or deserialization failure — the classes are not
///   distinguished to the caller.
/// - [`LicenseError::UnauthorizedMachine`] if the local machine identity
///   cannot be determined or is not in the authorized set.
pub fn verify_with_identity(
    wire: &str,
    shared_secret: &str,
    verifying_key: &VerifyingKey,
    identity: &dyn MachineIdentity,
) -> LicenseResult<License> {
    let envelope = Envelope::decode(wire).map_err(|_| LicenseError::UnknownLicense)?;

    let key = SecretKey::derive(shared_secret);

    let cipher_text =
        CipherText::from_base64(&envelope.cipher_text).map_err(|_| LicenseError::UnknownLicense)?;
    let payload = decrypt(&key, &cipher_text).map_err(|_| LicenseError::UnknownLicense)?;

    let signature =
        Signature::from_base64(&envelope.signature).map_err(|_| LicenseError::UnknownLicense)?;
    verifying_key
        .verify(envelope.cipher_text.as_bytes(), &signature)
        .map_err(|_| LicenseError::UnknownLicense)?;

    let license: License =
        serde_json::from_slice(&payload).map_err(|_| LicenseError::UnknownLicense)?;

    let machine_code = identity
        .machine_code()
        .map_err(|_| LicenseError::UnauthorizedMachine)?;
    if !license.legal_machines.contains(&machine_code) {
        debug!("license valid but machine not in authorized set");
        return Err(LicenseError::UnauthorizedMachine);
    }

    debug!(
        machines = license.legal_machines.len(),
        subscriptions = license.subscriptions.len(),
        "license verified"
    );
    Ok(license)
}

/// Verifies a wire string against the real hardware identity of the
/// executing machine.
///
/// # Errors
///
/// As [`verify_with_identity`].
pub fn verify(
    wire: &str,
    shared_secret: &str,
    verifying_key: &VerifyingKey,
) -> LicenseResult<License> {
    verify_with_identity(wire, shared_secret, verifying_key, &HostIdentity)
}
