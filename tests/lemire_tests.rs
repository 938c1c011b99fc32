use exact_float::lemire;

fn bits(f: f64) -> Option<u64> {
    Some(f.to_bits())
}

#[test]
fn mul_u64_test() {
    assert_eq!(lemire::mul_u64(0, 0), (0, 0));
    assert_eq!(lemire::mul_u64(1, 1), (1, 0));
    assert_eq!(lemire::mul_u64(u64::MAX, 1), (u64::MAX, 0));
    assert_eq!(lemire::mul_u64(1 << 32, 1 << 32), (0, 1));
    assert_eq!(
        lemire::mul_u64(u64::MAX, u64::MAX),
        (0x0000000000000001, 0xFFFFFFFFFFFFFFFE)
    );
    // Nineteen nines times the normalized mantissa of 1e0.
    assert_eq!(
        lemire::mul_u64(0x8AC7230489E7FFFF, 0x8000000000000000),
        (0x8000000000000000, 0x4563918244F3FFFF)
    );
}

#[test]
fn eisel_lemire_exact() {
    // Small integers are exact.
    assert_eq!(lemire::eisel_lemire(3, 0), bits(3.0));
    assert_eq!(lemire::eisel_lemire(314159, -5), bits(3.14159));
    assert_eq!(lemire::eisel_lemire(12345678, -1), bits(1234567.8));

    // Extremes of the tabulated exponent range.
    assert_eq!(lemire::eisel_lemire(1, -307), bits(1e-307));
    assert_eq!(lemire::eisel_lemire(1, 288), bits(1e288));
}

#[test]
fn eisel_lemire_halfway_round_down() {
    // 9007199254740993 is (1 << 53) + 1, the first integer an f64 cannot
    // represent: it is exactly halfway and the algorithm must give up
    // rather than guess.
    assert_eq!(
        lemire::eisel_lemire(9007199254740992, 0),
        bits(9007199254740992.0)
    );
    assert_eq!(lemire::eisel_lemire(9007199254740993, 0), None);
    assert_eq!(
        lemire::eisel_lemire(9007199254740994, 0),
        bits(9007199254740994.0)
    );

    // The same pattern at (1 << 63).
    assert_eq!(
        lemire::eisel_lemire(9223372036854775808, 0),
        bits(9223372036854775808.0)
    );
    assert_eq!(lemire::eisel_lemire(9223372036854776832, 0), None);
    assert_eq!(
        lemire::eisel_lemire(9223372036854777856, 0),
        bits(9223372036854777856.0)
    );

    // With a negative exponent the power of ten is inexact, so near-halfway
    // products cannot be decided here at all.
    assert_eq!(lemire::eisel_lemire(9007199254740992000, -3), None);
    assert_eq!(lemire::eisel_lemire(9007199254740993000, -3), None);
    assert_eq!(lemire::eisel_lemire(9007199254740994000, -3), None);
}

#[test]
fn eisel_lemire_halfway_round_up() {
    // Odd halfway values round away to the even neighbor.
    assert_eq!(
        lemire::eisel_lemire(9007199254740995, 0),
        bits(9007199254740996.0)
    );
    assert_eq!(
        lemire::eisel_lemire(9007199254740996, 0),
        bits(9007199254740996.0)
    );
    assert_eq!(
        lemire::eisel_lemire(18014398509481988, 0),
        bits(18014398509481988.0)
    );
    assert_eq!(
        lemire::eisel_lemire(18014398509481990, 0),
        bits(18014398509481992.0)
    );
    assert_eq!(
        lemire::eisel_lemire(18014398509481992, 0),
        bits(18014398509481992.0)
    );
    assert_eq!(
        lemire::eisel_lemire(9223372036854778880, 0),
        bits(9223372036854779904.0)
    );
}

#[test]
fn eisel_lemire_give_up_cases() {
    // "1e23" sits exactly between two representable values once scaled;
    // the halfway check fires.
    assert_eq!(lemire::eisel_lemire(1, 23), None);

    // "5.9604644775390625e-8" (2^-24 spelled out in decimal) overflows the
    // merged 192-bit truncation check.
    assert_eq!(lemire::eisel_lemire(59604644775390625, -24), None);
}

#[test]
fn eisel_lemire_truncation_upgrade() {
    // 19 nines force the 128-bit upgrade multiply, which then succeeds:
    // the value is within one of 1e19 and rounds up to it.
    assert_eq!(lemire::eisel_lemire(9999999999999999999, 0), bits(1e19));
}

#[test]
fn eisel_lemire_rounding_carry() {
    // Rounding up can overflow the 53-bit mantissa and bump the exponent.
    assert_eq!(
        lemire::eisel_lemire(72057594037927933, 0),
        bits(72057594037927936.0)
    );
}
