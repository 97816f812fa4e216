//! Error types for the licensing engine.

use thiserror::Error;

/// Licensing-specific errors.
///
/// Verification deliberately collapses every format, key, and tampering
/// failure into [`LicenseError::UnknownLicense`]; only the machine-binding
/// outcome is surfaced distinctly, because it is actionable (request a new
/// license for this machine) rather than a corruption signal.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Record cannot be encoded (empty or invalid payload). Caller bug,
    /// non-retryable.
    #[error("license record cannot be serialized: {0}")]
    Serialization(String),

    /// Symmetric encryption failed during issuance.
    #[error("license encryption failed: {0}")]
    Encryption(String),

    /// Signing failed during issuance.
    #[error("license signing failed: {0}")]
    Signing(String),

    /// Wire string is not a well-formed envelope.
    #[error("malformed license token: {0}")]
    MalformedToken(String),

    /// Token is corrupt, tampered with, or was issued under different
    /// keys. Undifferentiated on purpose.
    #[error("unknown license")]
    UnknownLicense,

    /// Token is valid but this machine is not in the authorized set, or
    /// the machine identity could not be determined.
    #[error("unauthorized machine")]
    UnauthorizedMachine,

    /// Machine identity could not be derived from local signals.
    #[error("machine identity unavailable: {0}")]
    IdentityUnavailable(String),

    /// The external token cache rejected or failed the save.
    #[error("license store unavailable: {0}")]
    StoreUnavailable(String),

    /// Local file I/O failed while exporting a license file.
    #[error("license storage error: {0}")]
    Storage(String),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
