#![no_main]

use libfuzzer_sys::fuzz_target;
use tipjar_transactions::TransactionEnvelope;

// Decoding arbitrary bytes never panics; anything that decodes re-encodes
// to the same envelope.
fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = TransactionEnvelope::from_xdr(data) {
        let again = TransactionEnvelope::from_xdr(&envelope.to_xdr());
        assert_eq!(again, Ok(envelope));
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = TransactionEnvelope::from_xdr_base64(text);
    }
});
