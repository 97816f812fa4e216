//! Property-based tests for the primitives layer.
//!
//! These verify the properties the license engine depends on:
//! - Encryption is reversible with the correct key
//! - Wrong keys fail decryption
//! - Tampering is detected
//! - Key derivation is deterministic
//! - Text encodings never contain the envelope separator

use entitle_crypto::{decrypt, encrypt, CipherText, KeyPair, SecretKey};
use proptest::prelude::*;

fn plaintext_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..10000)
}

fn secret_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9!@#$%^&*()]{1,100}").unwrap()
}

proptest! {
    #[test]
    fn roundtrip_preserves_data(plaintext in plaintext_strategy(), secret in secret_strategy()) {
        let key = SecretKey::derive(&secret);
        let encrypted = encrypt(&key, &plaintext).unwrap();
        let decrypted = decrypt(&key, &encrypted).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn derivation_is_deterministic(secret in secret_strategy()) {
        let a = SecretKey::derive(&secret);
        let b = SecretKey::derive(&secret);
        prop_assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn distinct_secrets_fail_decryption(
        plaintext in plaintext_strategy(),
        secret_a in secret_strategy(),
        secret_b in secret_strategy(),
    ) {
        prop_assume!(secret_a != secret_b);
        let encrypted = encrypt(&SecretKey::derive(&secret_a), &plaintext).unwrap();
        prop_assert!(decrypt(&SecretKey::derive(&secret_b), &encrypted).is_err());
    }

    #[test]
    fn single_byte_tamper_detected(
        plaintext in plaintext_strategy(),
        secret in secret_strategy(),
        flip in any::<u8>(),
        pos in any::<prop::sample::Index>(),
    ) {
        prop_assume!(flip != 0);
        let key = SecretKey::derive(&secret);
        let mut encrypted = encrypt(&key, &plaintext).unwrap();
        let i = pos.index(encrypted.ciphertext.len());
        encrypted.ciphertext[i] ^= flip;
        prop_assert!(decrypt(&key, &encrypted).is_err());
    }

    #[test]
    fn cipher_text_base64_roundtrip(plaintext in plaintext_strategy(), secret in secret_strategy()) {
        let key = SecretKey::derive(&secret);
        let encrypted = encrypt(&key, &plaintext).unwrap();
        let encoded = encrypted.to_base64();
        prop_assert!(!encoded.contains('.'));
        let restored = CipherText::from_base64(&encoded).unwrap();
        prop_assert_eq!(decrypt(&key, &restored).unwrap(), plaintext);
    }

    #[test]
    fn signature_covers_exact_message(message in plaintext_strategy()) {
        let kp = KeyPair::generate();
        let sig = kp.signing_key.sign(&message);
        prop_assert!(kp.verifying_key.verify(&message, &sig).is_ok());

        let mut altered = message.clone();
        altered.push(0x01);
        prop_assert!(kp.verifying_key.verify(&altered, &sig).is_err());
    }
}
