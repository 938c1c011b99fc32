#![no_main]

#[macro_use]
extern crate libfuzzer_sys;

use exact_float::{parse_f64, DEFAULT_OPTIONS};

// Differential fuzzing against the standard library, which is also
// correctly rounded. The surface syntaxes differ, so only compare when
// both parsers accept: the standard library takes "3.", "inf" and "NaN"
// spellings with different bit guarantees, but on plain finite inputs the
// two must agree bit-for-bit.
fuzz_target!(|data: &[u8]| {
    let ours = parse_f64(data, DEFAULT_OPTIONS);
    if let (Ok(a), Ok(Some(b))) = (
        ours,
        core::str::from_utf8(data).map(|s| s.parse::<f64>().ok()),
    ) {
        if a.is_finite() && b.is_finite() {
            assert_eq!(a.to_bits(), b.to_bits(), "input: {:?}", data);
        }
    }
});
