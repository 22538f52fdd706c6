//! Secret seed import and export.

use tipjar_crypto::{decode_secret_seed, encode_secret_seed, keypair_from_private};
use tipjar_types::KeyPair;

use crate::error::WalletError;

/// Restore a key pair from its `S...` secret seed.
pub fn keypair_from_secret_seed(seed: &str) -> Result<KeyPair, WalletError> {
    decode_secret_seed(seed)
        .map(keypair_from_private)
        .ok_or_else(|| WalletError::Key("invalid secret seed".to_string()))
}

/// Export a key pair's secret seed in `S...` form (for backup).
pub fn secret_seed_of(keys: &KeyPair) -> String {
    encode_secret_seed(&keys.private)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipjar_crypto::generate_keypair;

    #[test]
    fn seed_roundtrip_restores_same_public_key() {
        let keys = generate_keypair();
        let seed = secret_seed_of(&keys);
        assert!(seed.starts_with('S'));
        assert_eq!(seed.len(), 56);
        let restored = keypair_from_secret_seed(&seed).unwrap();
        assert_eq!(restored.public, keys.public);
    }

    #[test]
    fn account_address_is_not_a_seed() {
        let err = keypair_from_secret_seed(tipjar_types::TIP_JAR_ADDRESS).err();
        assert_eq!(err, Some(WalletError::Key("invalid secret seed".to_string())));
    }
}
