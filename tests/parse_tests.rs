use exact_float::{
    parse_f64, ParseFloatError, ALLOW_MULTIPLE_LEADING_ZEROES, ALLOW_UNDERSCORES,
    DECIMAL_SEPARATOR_IS_A_COMMA, DEFAULT_OPTIONS, REJECT_INF_AND_NAN,
};

fn ok_bits(s: &str, options: u32) -> u64 {
    parse_f64(s.as_bytes(), options).unwrap().to_bits()
}

fn bad(s: &str, options: u32) -> bool {
    parse_f64(s.as_bytes(), options) == Err(ParseFloatError::BadArgument)
}

#[test]
fn parse_values() {
    assert_eq!(ok_bits("3.14159e100", DEFAULT_OPTIONS), 0x54CCB9F42CDD2850);
    assert_eq!(ok_bits("1.5", DEFAULT_OPTIONS), 0x3FF8000000000000);
    assert_eq!(ok_bits("12345.67", DEFAULT_OPTIONS), 12345.67f64.to_bits());
    assert_eq!(ok_bits("-4", DEFAULT_OPTIONS), (-4.0f64).to_bits());
    assert_eq!(ok_bits("+4", DEFAULT_OPTIONS), 4.0f64.to_bits());
    assert_eq!(ok_bits(".5", DEFAULT_OPTIONS), 0.5f64.to_bits());
    assert_eq!(ok_bits("-.5", DEFAULT_OPTIONS), (-0.5f64).to_bits());
    assert_eq!(ok_bits("789.", DEFAULT_OPTIONS), 789.0f64.to_bits());
    assert_eq!(ok_bits("1e22", DEFAULT_OPTIONS), 1e22f64.to_bits());
    assert_eq!(ok_bits("123e45", DEFAULT_OPTIONS), 123e45f64.to_bits());
}

#[test]
fn parse_signed_zeros() {
    assert_eq!(ok_bits("0", DEFAULT_OPTIONS), 0x0000000000000000);
    assert_eq!(ok_bits("-0", DEFAULT_OPTIONS), 0x8000000000000000);
    assert_eq!(ok_bits("0.0", DEFAULT_OPTIONS), 0x0000000000000000);
    assert_eq!(ok_bits("-0.0", DEFAULT_OPTIONS), 0x8000000000000000);
    assert_eq!(ok_bits("0e0", DEFAULT_OPTIONS), 0x0000000000000000);
    // A zero mantissa with a huge exponent still normalizes to the signed
    // zero, through the comprehensive path.
    assert_eq!(ok_bits("0e99", DEFAULT_OPTIONS), 0x0000000000000000);
    assert_eq!(ok_bits("-0e99", DEFAULT_OPTIONS), 0x8000000000000000);
    assert_eq!(ok_bits("0e-99", DEFAULT_OPTIONS), 0x0000000000000000);
}

#[test]
fn parse_slow_path_values() {
    // Eisel-Lemire gives up on the three-part truncation check here; the
    // fallback must produce exactly 2^-24.
    assert_eq!(
        ok_bits("5.9604644775390625e-8", DEFAULT_OPTIONS),
        0x3E70000000000000
    );

    // Nineteen nines exercise the truncation-upgrade multiply; the value
    // is within one of 1e19 and rounds up to it.
    assert_eq!(
        ok_bits("9999999999999999999", DEFAULT_OPTIONS),
        0x43E158E460913D00
    );

    // Twenty nines force the two-run (man, man + 1) agreement check.
    assert_eq!(
        ok_bits("99999999999999999999", DEFAULT_OPTIONS),
        1e20f64.to_bits()
    );

    // A halfway value the approximation cannot separate.
    assert_eq!(ok_bits("1e23", DEFAULT_OPTIONS), 1e23f64.to_bits());
    assert_eq!(
        ok_bits("7.2057594037927933e16", DEFAULT_OPTIONS),
        7.2057594037927933e16f64.to_bits()
    );

    // More mantissa digits than the fast path will consider.
    assert_eq!(
        ok_bits("3.141592653589793238462643383279", DEFAULT_OPTIONS),
        core::f64::consts::PI.to_bits()
    );
}

#[test]
fn parse_boundaries() {
    assert_eq!(
        ok_bits("1.7976931348623157e308", DEFAULT_OPTIONS),
        f64::MAX.to_bits()
    );
    assert_eq!(
        ok_bits("2.2250738585072014e-308", DEFAULT_OPTIONS),
        f64::MIN_POSITIVE.to_bits()
    );

    // The smallest subnormal, and the values that round into or below it.
    assert_eq!(ok_bits("5e-324", DEFAULT_OPTIONS), 0x0000000000000001);
    assert_eq!(ok_bits("3e-324", DEFAULT_OPTIONS), 0x0000000000000001);
    assert_eq!(ok_bits("2e-324", DEFAULT_OPTIONS), 0x0000000000000000);
    assert_eq!(ok_bits("-3e-324", DEFAULT_OPTIONS), 0x8000000000000001);

    // Overflow saturates to the infinities by default.
    assert_eq!(ok_bits("1.8e308", DEFAULT_OPTIONS), 0x7FF0000000000000);
    assert_eq!(ok_bits("1e999", DEFAULT_OPTIONS), 0x7FF0000000000000);
    assert_eq!(ok_bits("-1e999", DEFAULT_OPTIONS), 0xFFF0000000000000);

    // Deep underflow is a signed zero, never an error.
    assert_eq!(ok_bits("1e-999", DEFAULT_OPTIONS), 0x0000000000000000);
    assert_eq!(ok_bits("-1e-999", DEFAULT_OPTIONS), 0x8000000000000000);
    assert_eq!(ok_bits("1e-999", REJECT_INF_AND_NAN), 0x0000000000000000);
}

#[test]
fn parse_specials() {
    assert_eq!(ok_bits("inf", DEFAULT_OPTIONS), 0x7FF0000000000000);
    assert_eq!(ok_bits("+inf", DEFAULT_OPTIONS), 0x7FF0000000000000);
    assert_eq!(ok_bits("-inf", DEFAULT_OPTIONS), 0xFFF0000000000000);
    assert_eq!(ok_bits("INFINITY", DEFAULT_OPTIONS), 0x7FF0000000000000);
    assert_eq!(ok_bits("-Infinity", DEFAULT_OPTIONS), 0xFFF0000000000000);
    assert_eq!(ok_bits("nan", DEFAULT_OPTIONS), 0x7FFFFFFFFFFFFFFF);
    assert_eq!(ok_bits("NaN", DEFAULT_OPTIONS), 0x7FFFFFFFFFFFFFFF);
    assert_eq!(ok_bits("-nan", DEFAULT_OPTIONS), 0xFFFFFFFFFFFFFFFF);

    // Underscores around the sign and after the keyword are separators,
    // accepted here without any option.
    assert_eq!(ok_bits("_inf", DEFAULT_OPTIONS), 0x7FF0000000000000);
    assert_eq!(ok_bits("-_nan_", DEFAULT_OPTIONS), 0xFFFFFFFFFFFFFFFF);
    assert_eq!(ok_bits("infinity_", DEFAULT_OPTIONS), 0x7FF0000000000000);

    // But not inside the keyword.
    assert!(bad("i_nf", DEFAULT_OPTIONS));
    assert!(bad("inf_inity", DEFAULT_OPTIONS));
    assert!(bad("infini", DEFAULT_OPTIONS));
    assert!(bad("nano", DEFAULT_OPTIONS));
}

#[test]
fn parse_reject_inf_and_nan() {
    assert!(bad("inf", REJECT_INF_AND_NAN));
    assert!(bad("-infinity", REJECT_INF_AND_NAN));
    assert!(bad("nan", REJECT_INF_AND_NAN));
    // Finite spellings that overflow are rejected the same way.
    assert!(bad("1e999", REJECT_INF_AND_NAN));
    assert!(bad("-1e999", REJECT_INF_AND_NAN));
    assert!(bad("1.8e308", REJECT_INF_AND_NAN));
    // Finite values still parse.
    assert_eq!(ok_bits("1.5", REJECT_INF_AND_NAN), 1.5f64.to_bits());
    assert_eq!(
        ok_bits("1.7976931348623157e308", REJECT_INF_AND_NAN),
        f64::MAX.to_bits()
    );
}

#[test]
fn parse_leading_zeroes() {
    assert!(bad("00", DEFAULT_OPTIONS));
    assert!(bad("0644", DEFAULT_OPTIONS));
    assert!(bad("00.7", DEFAULT_OPTIONS));

    let opts = ALLOW_MULTIPLE_LEADING_ZEROES;
    assert_eq!(ok_bits("00", opts), 0.0f64.to_bits());
    assert_eq!(ok_bits("0644", opts), 644.0f64.to_bits());
    assert_eq!(ok_bits("00.7", opts), 0.7f64.to_bits());
    assert_eq!(ok_bits("-0644e-2", opts), (-6.44f64).to_bits());
}

#[test]
fn parse_underscores() {
    assert!(bad("1__2", DEFAULT_OPTIONS));
    assert!(bad("_3.141_592", DEFAULT_OPTIONS));

    let opts = ALLOW_UNDERSCORES;
    assert_eq!(ok_bits("1__2", opts), 12.0f64.to_bits());
    assert_eq!(ok_bits("_3.141_592", opts), 3.141592f64.to_bits());
    assert_eq!(ok_bits("1_000_000.5", opts), 1000000.5f64.to_bits());
    assert_eq!(ok_bits("_-_5", opts), (-5.0f64).to_bits());
    assert_eq!(ok_bits("1_2e1_0", opts), 12e10f64.to_bits());
    assert_eq!(ok_bits("5_", opts), 5.0f64.to_bits());
    assert_eq!(ok_bits("5e1_", opts), 50.0f64.to_bits());

    // A trailing underscore where a digit is still owed is not a number.
    assert!(bad("_", opts));
    assert!(bad("-_", opts));
    assert!(bad("5e_", opts));
}

#[test]
fn parse_comma_separator() {
    assert_eq!(
        ok_bits("1,5", DECIMAL_SEPARATOR_IS_A_COMMA),
        0x3FF8000000000000
    );
    assert_eq!(
        ok_bits("-12,25e2", DECIMAL_SEPARATOR_IS_A_COMMA),
        (-1225.0f64).to_bits()
    );
    assert!(bad("1,5", DEFAULT_OPTIONS));
    assert!(bad("1.5", DECIMAL_SEPARATOR_IS_A_COMMA));
}

#[test]
fn parse_rejects() {
    assert!(bad("", DEFAULT_OPTIONS));
    assert!(bad("+", DEFAULT_OPTIONS));
    assert!(bad("-", DEFAULT_OPTIONS));
    assert!(bad(".", DEFAULT_OPTIONS));
    assert!(bad("e7", DEFAULT_OPTIONS));
    assert!(bad("1e", DEFAULT_OPTIONS));
    assert!(bad("1e+", DEFAULT_OPTIONS));
    assert!(bad("1..5", DEFAULT_OPTIONS));
    assert!(bad("1.5.0", DEFAULT_OPTIONS));
    assert!(bad(" 1.5", DEFAULT_OPTIONS));
    assert!(bad("1.5 ", DEFAULT_OPTIONS));
    assert!(bad("12345.67 narnia", DEFAULT_OPTIONS));
    assert!(bad("0x1p3", DEFAULT_OPTIONS));
    assert!(bad("\u{0}", DEFAULT_OPTIONS));
}

#[test]
fn parse_long_inputs() {
    // 256 bytes and beyond skip the optimistic lexer entirely but still
    // parse exactly.
    let mut s = String::from("0.");
    while s.len() < 300 {
        s.push('0');
    }
    s.push('1');
    let expected: f64 = s.parse().unwrap();
    assert_eq!(ok_bits(&s, DEFAULT_OPTIONS), expected.to_bits());

    // A kilodigit of nines rounds the same way the standard library
    // rounds it.
    let nines = "9".repeat(1000);
    let expected: f64 = nines.parse().unwrap();
    assert_eq!(ok_bits(&nines, DEFAULT_OPTIONS), expected.to_bits());
}

#[test]
fn parse_agrees_with_std() {
    // The standard library is also correctly rounded, so on the shared
    // plain syntax the two parsers must agree bit for bit.
    for s in [
        "0.1",
        "0.3",
        "4503599627370497",
        "4503599627370496.5",
        "2.47032822920623272e-324",
        "1.7976931348623158e308",
        "6929495644600919.5",
        "9214843084008499.0",
        "30078505129381147446200",
        "1777820000000000000001",
        "0.1e-308",
        "104308485241983990666713401708072175717074707016089",
        "1e-600",
        "1e600",
        "2.2250738585072011e-308",
        "2.2250738585072012e-308",
    ] {
        let expected: f64 = s.parse().unwrap();
        assert_eq!(
            ok_bits(s, DEFAULT_OPTIONS),
            expected.to_bits(),
            "input: {}",
            s
        );
    }
}
