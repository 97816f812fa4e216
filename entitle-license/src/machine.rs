//! Machine identity for license binding.
//!
//! Derives a stable identifier for the executing machine from local
//! hardware and OS signals. The raw signals are hashed before use, so
//! their format is not part of the wire contract — only the hex digest
//! ever appears in a license record.

use sha2::{Digest, Sha256};
use std::env;

use crate::error::{LicenseError, LicenseResult};

/// Source of the local machine's stable identifier.
///
/// The identifier must be stable across restarts of the same machine and
/// distinct (with overwhelming probability) across different machines.
pub trait MachineIdentity {
    /// Returns the machine code for the executing machine.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::IdentityUnavailable`] if no machine-unique
    /// signal can be collected.
    fn machine_code(&self) -> LicenseResult<String>;
}

/// The production identity provider: hashes platform signals.
///
/// Combines the OS machine ID (or hostname where no machine ID exists)
/// with OS, architecture, and user name, and returns the SHA-256 digest
/// of the combined value as hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostIdentity;

impl MachineIdentity for HostIdentity {
    fn machine_code(&self) -> LicenseResult<String> {
        // os/arch alone are not machine-unique; require at least one
        // machine-specific signal before deriving a code.
        let unique = get_machine_id()
            .or_else(get_hostname)
            .ok_or_else(|| {
                LicenseError::IdentityUnavailable(
                    "no machine id or hostname available".to_string(),
                )
            })?;

        let mut components = vec![unique];
        components.push(env::consts::OS.to_string());
        components.push(env::consts::ARCH.to_string());
        if let Ok(user) = env::var("USER").or_else(|_| env::var("USERNAME")) {
            components.push(user);
        }

        let mut hasher = Sha256::new();
        hasher.update(components.join("|").as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Identity provider that reports a fixed machine code.
///
/// Simulates a machine with a chosen identity; used in tests to exercise
/// the binding check on both the authorized and unauthorized side.
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub String);

impl MachineIdentity for FixedIdentity {
    fn machine_code(&self) -> LicenseResult<String> {
        Ok(self.0.clone())
    }
}

/// Gets the machine hostname.
fn get_hostname() -> Option<String> {
    hostname::get().ok().and_then(|h| h.into_string().ok())
}

/// Gets the machine ID (platform-specific unique identifier).
fn get_machine_id() -> Option<String> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|output| {
                output
                    .lines()
                    .find(|l| l.contains("IOPlatformUUID"))
                    .and_then(|l| l.split('"').nth(3))
                    .map(String::from)
            })
    }

    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
    }

    #[cfg(target_os = "windows")]
    {
        // MachineGuid lives in the registry; not read here to avoid a
        // winreg dependency, hostname is the fallback signal.
        None
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_identity_is_stable() {
        let a = HostIdentity.machine_code().unwrap();
        let b = HostIdentity.machine_code().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn host_identity_is_hex_digest() {
        let code = HostIdentity.machine_code().unwrap();
        assert_eq!(code.len(), 64);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fixed_identity_reports_given_code() {
        let identity = FixedIdentity("machine-a".to_string());
        assert_eq!(identity.machine_code().unwrap(), "machine-a");
    }
}
