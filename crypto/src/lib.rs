//! Cryptographic primitives for the tip jar.
//!
//! - **Ed25519** for signing transaction hashes
//! - **SHA-256** for network ids and transaction hashes
//! - **StrKey** encoding for `G...` account addresses and `S...` secret seeds

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{
    decode_address, decode_secret_seed, derive_address, encode_secret_seed, public_key_of,
    validate_address,
};
pub use hash::{network_id, sha256, sha256_multi};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_hash, verify_hash};
