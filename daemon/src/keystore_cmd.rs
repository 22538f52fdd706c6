//! `tipjar keystore` subcommands.

use std::path::Path;

use anyhow::{bail, Context};

use tipjar_crypto::{derive_address, generate_keypair};
use tipjar_types::{AccountAddress, KeyPair};
use tipjar_wallet_core::{
    decrypt_keystore, encrypt_keystore, keypair_from_secret_seed, load_keystore, save_keystore,
};

/// Generate a fresh key and seal it at `out`.
pub fn create(out: &Path, password: &str, force: bool) -> anyhow::Result<AccountAddress> {
    seal(generate_keypair(), out, password, force)
}

/// Seal an existing `S...` secret seed at `out`.
pub fn import(out: &Path, seed: &str, password: &str, force: bool) -> anyhow::Result<AccountAddress> {
    let keys = keypair_from_secret_seed(seed.trim()).context("invalid secret seed")?;
    seal(keys, out, password, force)
}

/// Open the keystore at `path` and return the address it unlocks.
pub fn show(path: &Path, password: &str) -> anyhow::Result<AccountAddress> {
    let keystore = load_keystore(path)?;
    let keys = decrypt_keystore(&keystore, password)
        .with_context(|| format!("cannot unlock {}", path.display()))?;
    Ok(derive_address(&keys.public))
}

fn seal(keys: KeyPair, out: &Path, password: &str, force: bool) -> anyhow::Result<AccountAddress> {
    if password.is_empty() {
        bail!("keystore password must not be empty");
    }
    if out.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", out.display());
    }
    let keystore = encrypt_keystore(&keys, password)?;
    save_keystore(&keystore, out)?;
    tracing::info!(address = %keystore.address, path = %out.display(), "keystore written");
    Ok(keystore.address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipjar_crypto::keypair_from_seed;
    use tipjar_wallet_core::secret_seed_of;

    #[test]
    fn created_keystore_shows_its_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        let address = create(&path, "hunter2", false).unwrap();
        assert_eq!(show(&path, "hunter2").unwrap(), address);
    }

    #[test]
    fn import_keeps_the_seed_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        let keys = keypair_from_seed(&[3u8; 32]);
        let expected = derive_address(&keys.public);
        let seed = format!("  {}\n", secret_seed_of(&keys));
        assert_eq!(import(&path, &seed, "pw", false).unwrap(), expected);
        assert_eq!(show(&path, "pw").unwrap(), expected);
    }

    #[test]
    fn existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(create(&path, "pw", false).is_err());
        assert!(create(&path, "pw", true).is_ok());
    }

    #[test]
    fn wrong_password_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        create(&path, "right", false).unwrap();
        assert!(show(&path, "wrong").is_err());
    }

    #[test]
    fn empty_password_and_bad_seed_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        assert!(create(&path, "", false).is_err());
        assert!(import(&path, "SNOTASEED", "pw", false).is_err());
        assert!(!path.exists());
    }
}
