#![no_main]

use libfuzzer_sys::fuzz_target;
use tipjar_controller::{parse_tip_amount, MIN_TIP};
use tipjar_types::Amount;

// Amount text never panics the parser, and whatever it accepts prints back
// to the same value.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(amount) = Amount::parse_decimal(text) {
        let reparsed = Amount::parse_decimal(&amount.to_fixed());
        assert_eq!(reparsed, Ok(amount));
    }

    if let Ok(tip) = parse_tip_amount(text) {
        assert!(tip >= MIN_TIP);
    }
});
