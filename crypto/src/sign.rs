//! Ed25519 signatures over 32-byte transaction hashes.
//!
//! The ledger never signs raw envelopes: the signer signs the transaction hash,
//! which already commits to the network id.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use tipjar_types::{PrivateKey, PublicKey, Signature};

/// Sign a transaction hash.
pub fn sign_hash(hash: &[u8; 32], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(hash).to_bytes())
}

/// Verify a signature over a transaction hash.
pub fn verify_hash(hash: &[u8; 32], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(hash, &dalek_sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;
    use crate::keys::{generate_keypair, keypair_from_seed};

    #[test]
    fn sign_and_verify() {
        let kp = generate_keypair();
        let hash = sha256(b"envelope bytes");
        let sig = sign_hash(&hash, &kp.private);
        assert!(verify_hash(&hash, &sig, &kp.public));
    }

    #[test]
    fn other_hash_fails() {
        let kp = generate_keypair();
        let sig = sign_hash(&sha256(b"one"), &kp.private);
        assert!(!verify_hash(&sha256(b"two"), &sig, &kp.public));
    }

    #[test]
    fn other_key_fails() {
        let kp1 = generate_keypair();
        let kp2 = generate_keypair();
        let hash = sha256(b"tip");
        let sig = sign_hash(&hash, &kp1.private);
        assert!(!verify_hash(&hash, &sig, &kp2.public));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = keypair_from_seed(&[9u8; 32]);
        let hash = sha256(b"same");
        assert_eq!(sign_hash(&hash, &kp.private), sign_hash(&hash, &kp.private));
    }
}
