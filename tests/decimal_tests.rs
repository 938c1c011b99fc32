use exact_float::decimal::Decimal;
use exact_float::{
    ALLOW_MULTIPLE_LEADING_ZEROES, ALLOW_UNDERSCORES, DECIMAL_SEPARATOR_IS_A_COMMA,
    DEFAULT_OPTIONS,
};

fn digits(h: &Decimal) -> &[u8] {
    &h.digits[..h.num_digits as usize]
}

#[test]
fn parse_forms() {
    let h = Decimal::parse(b"12345.678e+02", DEFAULT_OPTIONS).unwrap();
    assert_eq!(digits(&h), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(h.decimal_point, 7);
    assert!(!h.negative);
    assert!(!h.truncated);

    let h = Decimal::parse(b"0.000789", DEFAULT_OPTIONS).unwrap();
    assert_eq!(digits(&h), &[7, 8, 9]);
    assert_eq!(h.decimal_point, -3);

    let h = Decimal::parse(b"-42", DEFAULT_OPTIONS).unwrap();
    assert_eq!(digits(&h), &[4, 2]);
    assert_eq!(h.decimal_point, 2);
    assert!(h.negative);

    let h = Decimal::parse(b"+.5", DEFAULT_OPTIONS).unwrap();
    assert_eq!(digits(&h), &[5]);
    assert_eq!(h.decimal_point, 0);

    let h = Decimal::parse(b"789.", DEFAULT_OPTIONS).unwrap();
    assert_eq!(digits(&h), &[7, 8, 9]);
    assert_eq!(h.decimal_point, 3);

    // Trailing zeroes trim away; the decimal point carries the scale.
    let h = Decimal::parse(b"1.500", DEFAULT_OPTIONS).unwrap();
    assert_eq!(digits(&h), &[1, 5]);
    assert_eq!(h.decimal_point, 1);

    let h = Decimal::parse(b"-0", DEFAULT_OPTIONS).unwrap();
    assert_eq!(h.num_digits, 0);
    assert_eq!(h.decimal_point, 0);
    assert!(h.negative);
}

#[test]
fn parse_options() {
    assert!(Decimal::parse(b"00.7", DEFAULT_OPTIONS).is_err());
    let h = Decimal::parse(b"00.7", ALLOW_MULTIPLE_LEADING_ZEROES).unwrap();
    assert_eq!(digits(&h), &[7]);
    assert_eq!(h.decimal_point, 0);

    let h = Decimal::parse(b"0644", ALLOW_MULTIPLE_LEADING_ZEROES).unwrap();
    assert_eq!(digits(&h), &[6, 4, 4]);
    assert_eq!(h.decimal_point, 3);

    assert!(Decimal::parse(b"_1_2.5", DEFAULT_OPTIONS).is_err());
    let h = Decimal::parse(b"_1_2.5", ALLOW_UNDERSCORES).unwrap();
    assert_eq!(digits(&h), &[1, 2, 5]);
    assert_eq!(h.decimal_point, 2);

    let h = Decimal::parse(b"-_1e1_0", ALLOW_UNDERSCORES).unwrap();
    assert_eq!(digits(&h), &[1]);
    assert_eq!(h.decimal_point, 11);
    assert!(h.negative);

    let h = Decimal::parse(b"3,25", DECIMAL_SEPARATOR_IS_A_COMMA).unwrap();
    assert_eq!(digits(&h), &[3, 2, 5]);
    assert_eq!(h.decimal_point, 1);
    assert!(Decimal::parse(b"3.25", DECIMAL_SEPARATOR_IS_A_COMMA).is_err());
}

#[test]
fn parse_rejects() {
    assert!(Decimal::parse(b"", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b"+", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b"-", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b".", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b"e7", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b"1e", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b"1e+", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b"12a", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b"1.5 ", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b"00", DEFAULT_OPTIONS).is_err());
    assert!(Decimal::parse(b"_", ALLOW_UNDERSCORES).is_err());
    assert!(Decimal::parse(b"-_", ALLOW_UNDERSCORES).is_err());
    assert!(Decimal::parse(b"1e_", ALLOW_UNDERSCORES).is_err());
}

#[test]
fn parse_clamps_extreme_exponents() {
    // Saturation to the infinity sentinel, one past the representable
    // decimal-point range.
    let h = Decimal::parse(b"1e3000", DEFAULT_OPTIONS).unwrap();
    assert_eq!(h.decimal_point, 2048);

    let h = Decimal::parse(b"1e-3000", DEFAULT_OPTIONS).unwrap();
    assert_eq!(h.decimal_point, -2048);

    // Absurd exponent digits clamp instead of overflowing.
    let h = Decimal::parse(b"1e999999999999999999", DEFAULT_OPTIONS).unwrap();
    assert_eq!(h.decimal_point, 2048);
}

#[test]
fn parse_truncates_long_tails() {
    // 900 digits: the first 800 are kept, and the non-zero long tail sets
    // the truncated bit. The decimal point freezes with the last kept
    // digit, which is already far past the infinity threshold, so the
    // magnitude class survives the cap.
    let mut s = vec![b'7'; 900];
    let h = Decimal::parse(&s, DEFAULT_OPTIONS).unwrap();
    assert_eq!(h.num_digits, 800);
    assert_eq!(h.decimal_point, 800);
    assert!(h.truncated);

    // An all-zero tail is dropped silently.
    for b in s[800..].iter_mut() {
        *b = b'0';
    }
    let h = Decimal::parse(&s, DEFAULT_OPTIONS).unwrap();
    assert_eq!(h.num_digits, 800);
    assert_eq!(h.decimal_point, 800);
    assert!(!h.truncated);
}

#[test]
fn small_lshift_test() {
    // "234" << 3 is "1872".
    let mut h = Decimal::parse(b"234", DEFAULT_OPTIONS).unwrap();
    h.small_lshift(3);
    assert_eq!(digits(&h), &[1, 8, 7, 2]);
    assert_eq!(h.decimal_point, 4);

    // Lexicographic comparison against 5^4 = "625" decides between one and
    // two new digits: "624" << 4 is "9984" but "625" << 4 is "10000".
    let mut h = Decimal::parse(b"624", DEFAULT_OPTIONS).unwrap();
    h.small_lshift(4);
    assert_eq!(digits(&h), &[9, 9, 8, 4]);
    assert_eq!(h.decimal_point, 4);

    let mut h = Decimal::parse(b"625", DEFAULT_OPTIONS).unwrap();
    h.small_lshift(4);
    assert_eq!(digits(&h), &[1]);
    assert_eq!(h.decimal_point, 5);

    // Fractions shift the same way: 0.5 << 1 is 1.
    let mut h = Decimal::parse(b"0.5", DEFAULT_OPTIONS).unwrap();
    h.small_lshift(1);
    assert_eq!(digits(&h), &[1]);
    assert_eq!(h.decimal_point, 1);

    // The largest single step.
    let mut h = Decimal::parse(b"1", DEFAULT_OPTIONS).unwrap();
    h.small_lshift(60);
    assert_eq!(
        digits(&h),
        &[1, 1, 5, 2, 9, 2, 1, 5, 0, 4, 6, 0, 6, 8, 4, 6, 9, 7, 6]
    );
    assert_eq!(h.decimal_point, 19);
}

#[test]
fn small_rshift_test() {
    // "1872" >> 3 is "234".
    let mut h = Decimal::parse(b"1872", DEFAULT_OPTIONS).unwrap();
    h.small_rshift(3);
    assert_eq!(digits(&h), &[2, 3, 4]);
    assert_eq!(h.decimal_point, 3);

    // "1" >> 1 is "0.5".
    let mut h = Decimal::parse(b"1", DEFAULT_OPTIONS).unwrap();
    h.small_rshift(1);
    assert_eq!(digits(&h), &[5]);
    assert_eq!(h.decimal_point, 0);

    // Zero stays zero.
    let mut h = Decimal::parse(b"0", DEFAULT_OPTIONS).unwrap();
    h.small_rshift(17);
    assert_eq!(h.num_digits, 0);
    assert_eq!(h.decimal_point, 0);
}

#[test]
fn shift_round_trip() {
    // A left shift followed by the matching right shift preserves the
    // value when nothing truncates.
    let mut h = Decimal::parse(b"3.14159", DEFAULT_OPTIONS).unwrap();
    for shift in [1u32, 7, 22, 60] {
        h.small_lshift(shift);
        h.small_rshift(shift);
        assert_eq!(digits(&h), &[3, 1, 4, 1, 5, 9], "shift {}", shift);
        assert_eq!(h.decimal_point, 1, "shift {}", shift);
        assert!(!h.truncated, "shift {}", shift);
    }
}

#[test]
fn rounded_integer_test() {
    let round = |s: &[u8]| Decimal::parse(s, DEFAULT_OPTIONS).unwrap().rounded_integer();

    assert_eq!(round(b"0"), 0);
    assert_eq!(round(b"0.99"), 1);
    assert_eq!(round(b"7.4"), 7);
    assert_eq!(round(b"8.6"), 9);
    // The sign is ignored.
    assert_eq!(round(b"-8.6"), 9);

    // Ties round to even...
    assert_eq!(round(b"7.5"), 8);
    assert_eq!(round(b"8.5"), 8);
    // ...unless more (recorded or truncated) digits break the tie.
    assert_eq!(round(b"8.501"), 9);
    let mut h = Decimal::parse(b"6.5", DEFAULT_OPTIONS).unwrap();
    assert_eq!(h.rounded_integer(), 6);
    h.truncated = true;
    assert_eq!(h.rounded_integer(), 7);

    // Purely fractional values round to zero.
    assert_eq!(round(b"0.5"), 0);
    assert_eq!(round(b".037"), 0);

    // Nineteen or more integral digits saturate.
    assert_eq!(round(b"999999999999999999"), 999999999999999999);
    assert_eq!(round(b"9999999999999999999"), u64::MAX);
    assert_eq!(round(b"1e25"), u64::MAX);
}

#[test]
fn trim_invariant() {
    for s in [&b"1.500"[..], b"0.000", b"10.10", b"42e7"] {
        let h = Decimal::parse(s, DEFAULT_OPTIONS).unwrap();
        assert!(h.num_digits == 0 || h.digits[h.num_digits as usize - 1] != 0);
    }
}
