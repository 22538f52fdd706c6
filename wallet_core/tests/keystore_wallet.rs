//! KeystoreWallet through the WalletProvider interface.

use tipjar_crypto::{derive_address, keypair_from_seed, public_key_of};
use tipjar_transactions::{Asset, Operation, TransactionBuilder, TransactionEnvelope};
use tipjar_types::{AccountAddress, Amount, Network, PublicKey, TIP_JAR_ADDRESS};
use tipjar_wallet_core::{
    encrypt_keystore, save_keystore, secret_seed_of, KeystoreWallet, WalletError, WalletProvider,
    INSTALL_WALLET_MESSAGE, LOCAL_SIGNING_MESSAGE, NO_SIGNING_KEY_MESSAGE,
};

fn unsigned_tip(source: PublicKey) -> TransactionEnvelope {
    let jar = public_key_of(&AccountAddress::new(TIP_JAR_ADDRESS)).unwrap();
    let tx = TransactionBuilder::new(source, 41, 100)
        .add_operation(Operation::payment(jar, Asset::Native, Amount::from_units(10)).unwrap())
        .set_timeout(30)
        .build()
        .unwrap();
    TransactionEnvelope::unsigned(tx)
}

#[tokio::test]
async fn empty_wallet_is_unavailable() {
    let wallet = KeystoreWallet::empty(Network::TESTNET);
    assert!(!wallet.is_available().await);
    assert_eq!(wallet.request_address().await, Err(WalletError::NoAddress));
    assert_eq!(wallet.unavailable_message(), NO_SIGNING_KEY_MESSAGE);
    assert_ne!(wallet.unavailable_message(), INSTALL_WALLET_MESSAGE);
}

#[tokio::test]
async fn messages_describe_the_local_signer() {
    let wallet = KeystoreWallet::empty(Network::TESTNET)
        .with_unavailable_message("No signing key loaded. Set TIPJAR_SECRET_SEED.");
    assert_eq!(
        wallet.unavailable_message(),
        "No signing key loaded. Set TIPJAR_SECRET_SEED."
    );
    assert_eq!(wallet.signing_message(), LOCAL_SIGNING_MESSAGE);
    assert!(!wallet.signing_message().contains("Freighter"));
}

#[tokio::test]
async fn seed_wallet_reports_its_address() {
    let keys = keypair_from_seed(&[5u8; 32]);
    let expected = derive_address(&keys.public);
    let wallet = KeystoreWallet::from_secret_seed(&secret_seed_of(&keys), Network::TESTNET).unwrap();
    assert!(wallet.is_available().await);
    assert_eq!(wallet.request_address().await.unwrap(), expected);
}

#[tokio::test]
async fn signature_verifies_against_payload_hash() {
    let keys = keypair_from_seed(&[5u8; 32]);
    let public = keys.public.clone();
    let wallet = KeystoreWallet::from_keypair(keys, Network::TESTNET);

    let unsigned = unsigned_tip(public.clone());
    let signed = wallet
        .sign(&unsigned, Network::TESTNET.passphrase)
        .await
        .unwrap();

    assert!(unsigned.signatures.is_empty());
    assert_eq!(signed.signatures.len(), 1);
    assert_eq!(signed.tx, unsigned.tx);
    assert!(signed.is_signed_by(Network::TESTNET.passphrase, &public));
}

#[tokio::test]
async fn refuses_other_networks() {
    let keys = keypair_from_seed(&[5u8; 32]);
    let public = keys.public.clone();
    let wallet = KeystoreWallet::from_keypair(keys, Network::TESTNET);
    let err = wallet
        .sign(&unsigned_tip(public), "Public Global Stellar Network ; September 2015")
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::NetworkMismatch { .. }));
}

#[tokio::test]
async fn refuses_foreign_source_account() {
    let wallet = KeystoreWallet::from_keypair(keypair_from_seed(&[5u8; 32]), Network::TESTNET);
    let stranger = keypair_from_seed(&[6u8; 32]).public;
    let err = wallet
        .sign(&unsigned_tip(stranger), Network::TESTNET.passphrase)
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::Rejected(_)));
}

#[tokio::test]
async fn opens_keystore_file() {
    let keys = keypair_from_seed(&[8u8; 32]);
    let expected = derive_address(&keys.public);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.json");
    save_keystore(&encrypt_keystore(&keys, "hunter2").unwrap(), &path).unwrap();

    let wallet = KeystoreWallet::from_keystore_file(&path, "hunter2", Network::TESTNET).unwrap();
    assert_eq!(wallet.request_address().await.unwrap(), expected);

    let wrong = KeystoreWallet::from_keystore_file(&path, "hunter3", Network::TESTNET);
    assert!(matches!(wrong, Err(WalletError::Keystore(_))));
}
