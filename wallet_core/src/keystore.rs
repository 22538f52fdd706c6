//! Encrypted keystore for ed25519 secret seeds.
//!
//! Argon2id stretches the password with a random salt into a 32-byte key, and
//! AES-256-GCM seals the seed under a random nonce. The JSON file carries
//! every parameter needed to open it again plus the public `G...` address so
//! the account can be named without the password.

use std::path::Path;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use tipjar_crypto::{derive_address, keypair_from_private};
use tipjar_types::{AccountAddress, KeyPair, PrivateKey};

use crate::error::WalletError;

const KEYSTORE_VERSION: u32 = 1;

/// Argon2id parameters: 64 MiB memory, 3 passes, 1 lane.
const ARGON2_MEMORY_KIB: u32 = 65536;
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;

const SALT_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const SEED_LEN: usize = 32;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreFile {
    pub version: u32,
    /// Public account address of the sealed key. Not authenticated; the
    /// decrypted key is checked against it on open.
    pub address: AccountAddress,
    pub crypto: KeystoreCrypto,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreCrypto {
    pub cipher: String,
    pub kdf: String,
    pub kdf_params: KdfParams,
    /// Hex.
    pub salt: String,
    /// Hex.
    pub nonce: String,
    /// Hex.
    pub ciphertext: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KdfParams {
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Seal `keys` under `password`.
pub fn encrypt_keystore(keys: &KeyPair, password: &str) -> Result<KeystoreFile, WalletError> {
    let mut rng = rand::thread_rng();

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);

    let params = KdfParams {
        memory: ARGON2_MEMORY_KIB,
        iterations: ARGON2_ITERATIONS,
        parallelism: ARGON2_PARALLELISM,
    };
    let derived = derive_key(password, &salt, &params)?;
    let cipher = Aes256Gcm::new_from_slice(&derived[..])
        .map_err(|e| WalletError::Keystore(format!("AES key init failed: {e}")))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), keys.private.0.as_ref())
        .map_err(|e| WalletError::Keystore(format!("encryption failed: {e}")))?;

    Ok(KeystoreFile {
        version: KEYSTORE_VERSION,
        address: derive_address(&keys.public),
        crypto: KeystoreCrypto {
            cipher: "aes-256-gcm".to_string(),
            kdf: "argon2id".to_string(),
            kdf_params: params,
            salt: hex::encode(salt),
            nonce: hex::encode(nonce_bytes),
            ciphertext: hex::encode(ciphertext),
        },
    })
}

/// Open a keystore with `password`.
///
/// Fails on a wrong password, tampered data, or a key that does not match the
/// recorded address.
pub fn decrypt_keystore(keystore: &KeystoreFile, password: &str) -> Result<KeyPair, WalletError> {
    if keystore.version != KEYSTORE_VERSION {
        return Err(WalletError::Keystore(format!(
            "unsupported keystore version: {}",
            keystore.version
        )));
    }
    if keystore.crypto.cipher != "aes-256-gcm" || keystore.crypto.kdf != "argon2id" {
        return Err(WalletError::Keystore(format!(
            "unsupported scheme: {}/{}",
            keystore.crypto.kdf, keystore.crypto.cipher
        )));
    }

    let salt = hex::decode(&keystore.crypto.salt)
        .map_err(|e| WalletError::Keystore(format!("invalid salt hex: {e}")))?;
    let nonce_bytes = hex::decode(&keystore.crypto.nonce)
        .map_err(|e| WalletError::Keystore(format!("invalid nonce hex: {e}")))?;
    let ciphertext = hex::decode(&keystore.crypto.ciphertext)
        .map_err(|e| WalletError::Keystore(format!("invalid ciphertext hex: {e}")))?;

    if nonce_bytes.len() != NONCE_LEN {
        return Err(WalletError::Keystore(format!(
            "invalid nonce length: expected {NONCE_LEN}, got {}",
            nonce_bytes.len()
        )));
    }

    let derived = derive_key(password, &salt, &keystore.crypto.kdf_params)?;
    let cipher = Aes256Gcm::new_from_slice(&derived[..])
        .map_err(|e| WalletError::Keystore(format!("AES key init failed: {e}")))?;
    let plaintext = Zeroizing::new(
        cipher
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
            .map_err(|_| {
                WalletError::Keystore("decryption failed: wrong password or corrupted data".to_string())
            })?,
    );

    if plaintext.len() != SEED_LEN {
        return Err(WalletError::Keystore(format!(
            "decrypted key has wrong length: expected {SEED_LEN}, got {}",
            plaintext.len()
        )));
    }

    let mut seed = [0u8; SEED_LEN];
    seed.copy_from_slice(&plaintext);
    let keys = keypair_from_private(PrivateKey(seed));

    if derive_address(&keys.public) != keystore.address {
        return Err(WalletError::Keystore(
            "decrypted key does not match the keystore address".to_string(),
        ));
    }
    Ok(keys)
}

pub fn save_keystore(keystore: &KeystoreFile, path: &Path) -> Result<(), WalletError> {
    let json = serde_json::to_string_pretty(keystore)
        .map_err(|e| WalletError::Keystore(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| WalletError::Keystore(format!("failed to write {}: {e}", path.display())))
}

pub fn load_keystore(path: &Path) -> Result<KeystoreFile, WalletError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| WalletError::Keystore(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&json)
        .map_err(|e| WalletError::Keystore(format!("invalid keystore JSON: {e}")))
}

fn derive_key(
    password: &str,
    salt: &[u8],
    kdf: &KdfParams,
) -> Result<Zeroizing<[u8; 32]>, WalletError> {
    let params = Params::new(kdf.memory, kdf.iterations, kdf.parallelism, Some(32))
        .map_err(|e| WalletError::Keystore(format!("Argon2 params error: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut output[..])
        .map_err(|e| WalletError::Keystore(format!("Argon2 hashing failed: {e}")))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipjar_crypto::keypair_from_seed;

    fn keys() -> KeyPair {
        keypair_from_seed(&[42u8; 32])
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let keystore = encrypt_keystore(&keys(), "test-password-123").unwrap();
        let opened = decrypt_keystore(&keystore, "test-password-123").unwrap();
        assert_eq!(opened.public, keys().public);
        assert_eq!(opened.private.0, [42u8; 32]);
    }

    #[test]
    fn records_public_address() {
        let keystore = encrypt_keystore(&keys(), "pass").unwrap();
        assert_eq!(keystore.address, derive_address(&keys().public));
    }

    #[test]
    fn wrong_password_fails() {
        let keystore = encrypt_keystore(&keys(), "correct-password").unwrap();
        assert!(matches!(
            decrypt_keystore(&keystore, "wrong-password"),
            Err(WalletError::Keystore(_))
        ));
    }

    #[test]
    fn swapped_address_is_detected() {
        let mut keystore = encrypt_keystore(&keys(), "pass").unwrap();
        keystore.address = derive_address(&keypair_from_seed(&[1u8; 32]).public);
        assert!(decrypt_keystore(&keystore, "pass").is_err());
    }

    #[test]
    fn crypto_fields() {
        let keystore = encrypt_keystore(&keys(), "pass").unwrap();
        assert_eq!(keystore.version, 1);
        assert_eq!(keystore.crypto.cipher, "aes-256-gcm");
        assert_eq!(keystore.crypto.kdf, "argon2id");
        assert_eq!(keystore.crypto.kdf_params.memory, 65536);
        assert_eq!(keystore.crypto.kdf_params.iterations, 3);
        assert_eq!(keystore.crypto.kdf_params.parallelism, 1);
        assert_eq!(keystore.crypto.salt.len(), SALT_LEN * 2);
        assert_eq!(keystore.crypto.nonce.len(), NONCE_LEN * 2);
    }

    #[test]
    fn fresh_salt_every_time() {
        let a = encrypt_keystore(&keys(), "password").unwrap();
        let b = encrypt_keystore(&keys(), "password").unwrap();
        assert_ne!(a.crypto.salt, b.crypto.salt);
        assert_ne!(a.crypto.ciphertext, b.crypto.ciphertext);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tipjar-keystore.json");

        let keystore = encrypt_keystore(&keys(), "file-test").unwrap();
        save_keystore(&keystore, &path).unwrap();
        let loaded = load_keystore(&path).unwrap();
        let opened = decrypt_keystore(&loaded, "file-test").unwrap();
        assert_eq!(opened.public, keys().public);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_keystore(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn unsupported_version_rejected() {
        let mut keystore = encrypt_keystore(&keys(), "pass").unwrap();
        keystore.version = 99;
        assert!(decrypt_keystore(&keystore, "pass").is_err());
    }
}
