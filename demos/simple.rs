//! A simple example on how to use exact-float within a larger parser.
//!
//! The parser works on input bytes. Since the accepted number syntax only
//! includes ASCII characters, it composes cleanly with UTF-8 encoded data:
//! slice out the candidate number, hand the bytes over, and branch on the
//! result.

use exact_float::{
    parse_f64, ALLOW_UNDERSCORES, DECIMAL_SEPARATOR_IS_A_COMMA, DEFAULT_OPTIONS,
    REJECT_INF_AND_NAN,
};

pub fn main() {
    let check = |s: &str, options: u32, expected: f64| {
        let value = parse_f64(s.as_bytes(), options).unwrap();
        assert_eq!(value.to_bits(), expected.to_bits());
        println!("{:>24} -> {}", s, value);
    };

    // Plain fixed and scientific notation.
    check("1.0e7", DEFAULT_OPTIONS, 1.0e7);
    check("12345.67", DEFAULT_OPTIONS, 12345.67);
    check("-0.004", DEFAULT_OPTIONS, -0.004);

    // Syntax extensions are opt-in.
    check("1_000_000.5", ALLOW_UNDERSCORES, 1000000.5);
    check("3,25", DECIMAL_SEPARATOR_IS_A_COMMA, 3.25);

    // Special values parse by default and can be refused.
    check("-Infinity", DEFAULT_OPTIONS, f64::NEG_INFINITY);
    assert!(parse_f64(b"1e999", REJECT_INF_AND_NAN).is_err());

    // Rejections are errors, not best-effort values.
    assert!(parse_f64(b"12345.67 narnia", DEFAULT_OPTIONS).is_err());
}
