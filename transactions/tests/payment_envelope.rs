//! End-to-end envelope tests: build a tip, sign it, ship it as base64, read it back.

use proptest::prelude::*;

use tipjar_crypto::{keypair_from_seed, public_key_of};
use tipjar_transactions::{
    Asset, Operation, OperationBody, Preconditions, TransactionBuilder, TransactionEnvelope,
};
use tipjar_types::{AccountAddress, Amount, Network, Timestamp, TIP_JAR_ADDRESS};

fn tip_envelope(amount: Amount, sequence: i64, base_fee: u32) -> TransactionEnvelope {
    let destination = public_key_of(&AccountAddress::parse(TIP_JAR_ADDRESS).unwrap()).unwrap();
    let source = keypair_from_seed(&[11u8; 32]).public;
    let tx = TransactionBuilder::new(source, sequence, base_fee)
        .add_operation(Operation::payment(destination, Asset::Native, amount).unwrap())
        .set_timeout(30)
        .build_at(Timestamp::new(1_700_000_000))
        .unwrap();
    TransactionEnvelope::unsigned(tx)
}

#[test]
fn signed_tip_survives_base64_transport() {
    let kp = keypair_from_seed(&[11u8; 32]);
    let mut env = tip_envelope(Amount::from_units(5), 1234, 100);
    env.sign(Network::TESTNET.passphrase, &kp).unwrap();

    let wire = env.to_xdr_base64();
    let back = TransactionEnvelope::from_xdr_base64(&wire).unwrap();

    assert_eq!(back.tx.seq_num, 1235);
    assert_eq!(back.tx.fee, 100);
    assert!(matches!(back.tx.cond, Preconditions::Time(b) if b.max_time.as_secs() == 1_700_000_030));
    assert!(back.is_signed_by(Network::TESTNET.passphrase, &kp.public));
}

#[test]
fn tip_pays_the_jar_in_native_asset() {
    let env = tip_envelope(Amount::from_units(10), 0, 100);
    let jar = tipjar_crypto::decode_address(TIP_JAR_ADDRESS).unwrap();
    let [op] = env.tx.operations.as_slice() else {
        panic!("expected exactly one operation");
    };
    let OperationBody::Payment(payment) = &op.body;
    assert_eq!(payment.destination.0, jar);
    assert_eq!(payment.asset, Asset::Native);
    assert!(op.source_account.is_none());
}

#[test]
fn hash_changes_when_signed_bytes_change() {
    let a = tip_envelope(Amount::from_units(5), 1, 100);
    let b = tip_envelope(Amount::from_units(5), 2, 100);
    assert_ne!(
        a.tx.hash(Network::TESTNET.passphrase),
        b.tx.hash(Network::TESTNET.passphrase)
    );
}

proptest! {
    /// The payment amount on the wire is the requested amount at seven decimals.
    #[test]
    fn wire_amount_matches_seven_decimal_form(stroops in 1i64..i64::MAX) {
        let amount = Amount::from_stroops(stroops);
        let env = tip_envelope(amount, 7, 100);
        let back = TransactionEnvelope::from_xdr_base64(&env.to_xdr_base64()).unwrap();
        let OperationBody::Payment(payment) = &back.tx.operations[0].body;
        prop_assert_eq!(payment.amount.to_fixed(), amount.to_fixed());
    }

    /// Decoding arbitrary bytes never panics.
    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = TransactionEnvelope::from_xdr(&bytes);
    }
}
