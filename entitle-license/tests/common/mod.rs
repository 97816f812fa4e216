//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use entitle_crypto::{SigningKey, VerifyingKey};
use entitle_license::{License, Subscription};

pub const SHARED_SECRET: &str = "out-of-band shared secret";

/// Returns a deterministic Ed25519 key pair from a fixed seed.
pub fn test_keypair() -> (SigningKey, VerifyingKey) {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key)
}

/// A second, unrelated key pair for wrong-key cases.
pub fn other_keypair() -> (SigningKey, VerifyingKey) {
    let seed: [u8; 32] = [
        32, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11,
        10, 9, 8, 7, 6, 5, 4, 3, 2, 1,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key)
}

/// A record authorized for the given machines, with two subscriptions,
/// expiring one year from now.
pub fn sample_license(machines: &[&str]) -> License {
    let mut license = License::new(Utc::now() + Duration::days(365));
    license.append_machines(machines.iter().copied());
    license.append_subscriptions([
        Subscription {
            server_name: "search".to_string(),
            desc: "full-text search".to_string(),
            limit: 1000,
        },
        Subscription {
            server_name: "export".to_string(),
            desc: "bulk export".to_string(),
            limit: 50,
        },
    ]);
    license
}
