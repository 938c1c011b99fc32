//! Fixed-precision decimal used by the slow, comprehensive parsing path.
//!
//! Based off the Simple Decimal Conversion algorithm as implemented in
//! Wuffs and the Go standard library, described here:
//!     https://nigeltao.github.io/blog/2020/parse-number-f64-simple.html

#![doc(hidden)]

use crate::error::{ParseFloatError, Result};
use crate::lemire;
use crate::options::{
    ALLOW_MULTIPLE_LEADING_ZEROES, ALLOW_UNDERSCORES, DECIMAL_SEPARATOR_IS_A_COMMA,
    REJECT_INF_AND_NAN,
};
use crate::pow5::{LSHIFT_NEW_DIGITS, POWERS_OF_5};
use crate::powers::{MAX_EXP10, MIN_EXP10};

// DECIMAL
// -------

/// A fixed precision floating point decimal number, augmented with
/// ±infinity values. It cannot represent NaN (Not a Number).
///
/// "Fixed precision" means that the mantissa holds
/// [`Decimal::DIGITS_PRECISION`] decimal digits. A
/// `Decimal` isn't for general purpose arithmetic, only for conversions to
/// IEEE 754 double-precision floating point, where the largest and
/// smallest positive finite values are approximately 1.8e+308 and
/// 4.9e-324.
///
/// `digits[.. num_digits]` are the number's digits in big-endian order,
/// with values in the range `[0 ..= 9]`, not `['0' ..= '9']`.
///
/// `decimal_point` is the index (within `digits`) of the decimal point. It
/// may be negative or be larger than `num_digits`, in which case the
/// explicit digits are padded with implicit zeroes. For example, if
/// `num_digits` is 3 and `digits` is `[7, 8, 9]`:
///
///  - A `decimal_point` of -2 means ".00789"
///  - A `decimal_point` of -1 means ".0789"
///  - A `decimal_point` of +0 means ".789"
///  - A `decimal_point` of +1 means "7.89"
///  - A `decimal_point` of +2 means "78.9"
///  - A `decimal_point` of +3 means "789."
///  - A `decimal_point` of +4 means "7890."
///
/// A `decimal_point` higher than +[`Decimal::DECIMAL_POINT_RANGE`] means
/// that the overall value is infinity, lower than the negated range means
/// zero.
///
/// `negative` is a sign bit: a `Decimal` distinguishes positive and
/// negative zero.
///
/// `truncated` is whether more than `DIGITS_PRECISION` digits appeared and
/// at least one of the extra digits was non-zero. Long-tail digits can
/// affect rounding.
///
/// The all-fields-zero value is valid and represents +0.
#[derive(Clone)]
pub struct Decimal {
    pub num_digits: u32,
    pub decimal_point: i32,
    pub negative: bool,
    pub truncated: bool,
    pub digits: [u8; Decimal::DIGITS_PRECISION],
}

/// Continuation point after the integer-digit region of the input.
enum Region {
    End,
    Fraction,
    Exponent,
}

impl Decimal {
    /// Number of decimal digits the mantissa holds.
    pub const DIGITS_PRECISION: usize = 800;

    /// Decimal points beyond ±this bound saturate to the zero/infinity
    /// sentinels. The bound is further from zero than ±(324 + 800), the
    /// extremes reachable from a finite f64.
    pub const DECIMAL_POINT_RANGE: i32 = 2047;

    /// The largest N such that `(10 << N) < (1 << 64)`, bounding how far
    /// [`small_lshift`](Decimal::small_lshift) and
    /// [`small_rshift`](Decimal::small_rshift) may move in one step.
    pub const MAX_SHIFT: u32 = 60;

    /// Create a decimal representing +0.
    pub fn new() -> Decimal {
        Decimal {
            num_digits: 0,
            decimal_point: 0,
            negative: false,
            truncated: false,
            digits: [0; Decimal::DIGITS_PRECISION],
        }
    }

    /// Trim trailing zeroes from the `digits[.. num_digits]` slice. They
    /// carry no information, since `decimal_point` is tracked explicitly.
    #[inline]
    pub fn trim(&mut self) {
        while self.num_digits > 0 && self.digits[self.num_digits as usize - 1] == 0 {
            self.num_digits -= 1;
        }
    }

    // PARSE
    // -----

    /// Parse a byte slice into a decimal, honoring the syntactic options.
    ///
    /// This accepts the full surface syntax: optional '+' or '-' sign,
    /// multiple leading zeroes and underscores when the corresponding
    /// options are set, and a ',' separator under
    /// `DECIMAL_SEPARATOR_IS_A_COMMA`. Trailing bytes are rejected.
    pub fn parse(s: &[u8], options: u32) -> Result<Decimal> {
        let mut h = Decimal::new();
        let allow_underscores = options & ALLOW_UNDERSCORES != 0;
        let sep = if options & DECIMAL_SEPARATOR_IS_A_COMMA != 0 {
            b','
        } else {
            b'.'
        };

        let mut i = 0;
        if allow_underscores {
            while let Some(b'_') = s.get(i) {
                i += 1;
            }
            if i >= s.len() {
                return Err(ParseFloatError::BadArgument);
            }
        }

        // Parse the sign.
        let mut saw_sign = true;
        match s.get(i) {
            Some(b'+') => i += 1,
            Some(b'-') => {
                h.negative = true;
                i += 1;
            }
            _ => saw_sign = false,
        }
        if saw_sign && allow_underscores {
            while let Some(b'_') = s.get(i) {
                i += 1;
            }
            if i >= s.len() {
                return Err(ParseFloatError::BadArgument);
            }
        }

        // Parse digits, up to (and including) a separator, 'E' or 'e'.
        // Examples for each limb in this if-else chain:
        //  - "0.789"
        //  - "1002.789"
        //  - ".789"
        //  - Other (invalid input).
        let mut nd: usize = 0;
        let mut dp: i32 = 0;
        let mut no_digits_before_separator = false;
        let mut region = Region::End;

        if s.get(i) == Some(&b'0') && options & ALLOW_MULTIPLE_LEADING_ZEROES == 0 {
            i += 1;
            loop {
                match s.get(i) {
                    None => break,
                    Some(&c) if c == sep => {
                        i += 1;
                        region = Region::Fraction;
                        break;
                    }
                    Some(b'E') | Some(b'e') => {
                        i += 1;
                        region = Region::Exponent;
                        break;
                    }
                    Some(b'_') if allow_underscores => i += 1,
                    _ => return Err(ParseFloatError::BadArgument),
                }
            }
        } else if s.get(i).map_or(false, |c| c.is_ascii_digit()) {
            if s[i] == b'0' {
                while s.get(i) == Some(&b'0') {
                    i += 1;
                }
            } else {
                h.digits[nd] = s[i] - b'0';
                nd += 1;
                dp = nd as i32;
                i += 1;
            }

            loop {
                match s.get(i) {
                    None => break,
                    Some(&c) if c.is_ascii_digit() => {
                        if nd < Decimal::DIGITS_PRECISION {
                            h.digits[nd] = c - b'0';
                            nd += 1;
                            dp = nd as i32;
                        } else if c != b'0' {
                            // Long-tail non-zeroes set the truncated bit.
                            h.truncated = true;
                        }
                        i += 1;
                    }
                    Some(&c) if c == sep => {
                        i += 1;
                        region = Region::Fraction;
                        break;
                    }
                    Some(b'E') | Some(b'e') => {
                        i += 1;
                        region = Region::Exponent;
                        break;
                    }
                    Some(b'_') if allow_underscores => i += 1,
                    _ => return Err(ParseFloatError::BadArgument),
                }
            }
        } else if s.get(i) == Some(&sep) {
            i += 1;
            no_digits_before_separator = true;
            region = Region::Fraction;
        } else {
            return Err(ParseFloatError::BadArgument);
        }

        if let Region::Fraction = region {
            region = Region::End;
            loop {
                match s.get(i) {
                    None => break,
                    Some(b'0') => {
                        if nd == 0 {
                            // Track leading zeroes implicitly.
                            dp -= 1;
                        } else if nd < Decimal::DIGITS_PRECISION {
                            h.digits[nd] = 0;
                            nd += 1;
                        }
                        i += 1;
                    }
                    Some(&c) if (b'1'..=b'9').contains(&c) => {
                        if nd < Decimal::DIGITS_PRECISION {
                            h.digits[nd] = c - b'0';
                            nd += 1;
                        } else {
                            // Long-tail non-zeroes set the truncated bit.
                            h.truncated = true;
                        }
                        i += 1;
                    }
                    Some(b'E') | Some(b'e') => {
                        i += 1;
                        region = Region::Exponent;
                        break;
                    }
                    Some(b'_') if allow_underscores => i += 1,
                    _ => return Err(ParseFloatError::BadArgument),
                }
            }
        }

        if let Region::Exponent = region {
            if allow_underscores {
                loop {
                    match s.get(i) {
                        None => return Err(ParseFloatError::BadArgument),
                        Some(b'_') => i += 1,
                        _ => break,
                    }
                }
            }

            let mut exp_sign: i32 = 1;
            match s.get(i) {
                Some(b'+') => i += 1,
                Some(b'-') => {
                    exp_sign = -1;
                    i += 1;
                }
                _ => {}
            }

            // The exponent accumulator clamps early: anything at or above
            // this bound already saturates the decimal point below.
            let exp_large = Decimal::DECIMAL_POINT_RANGE + Decimal::DIGITS_PRECISION as i32;
            let mut exp: i32 = 0;
            let mut saw_exp_digits = false;
            while i < s.len() {
                let c = s[i];
                if c == b'_' && allow_underscores {
                    // No-op.
                } else if c.is_ascii_digit() {
                    saw_exp_digits = true;
                    if exp < exp_large {
                        exp = 10 * exp + (c - b'0') as i32;
                    }
                } else {
                    break;
                }
                i += 1;
            }
            if !saw_exp_digits {
                return Err(ParseFloatError::BadArgument);
            }
            dp += exp_sign * exp;
        }

        if i != s.len() {
            return Err(ParseFloatError::BadArgument);
        }
        h.num_digits = nd as u32;
        if nd == 0 {
            if no_digits_before_separator {
                return Err(ParseFloatError::BadArgument);
            }
            h.decimal_point = 0;
        } else if dp < -Decimal::DECIMAL_POINT_RANGE {
            h.decimal_point = -Decimal::DECIMAL_POINT_RANGE - 1;
        } else if dp > Decimal::DECIMAL_POINT_RANGE {
            h.decimal_point = Decimal::DECIMAL_POINT_RANGE + 1;
        } else {
            h.decimal_point = dp;
        }
        h.trim();
        Ok(h)
    }

    // SHIFTS
    // ------

    /// Number of additional decimal digits created by a left shift.
    ///
    /// Shifting by `shift` can add either N or N-1 new digits, depending on
    /// whether the digit string compares >= or < to the `shift`'th power of
    /// 5 (as 10 equals 2 * 5). Comparison is lexicographic, not numerical.
    fn lshift_num_new_digits(&self, shift: u32) -> u32 {
        // Masking with 0x3F should be unnecessary given the shift
        // preconditions, but it's cheap and keeps the table index in
        // bounds.
        let shift = (shift & 63) as usize;

        let x_a = LSHIFT_NEW_DIGITS[shift] as u32;
        let x_b = LSHIFT_NEW_DIGITS[shift + 1] as u32;
        let num_new_digits = x_a >> 11;
        let pow5_a = (0x7FF & x_a) as usize;
        let pow5_b = (0x7FF & x_b) as usize;

        for (i, &p5) in POWERS_OF_5[pow5_a..pow5_b].iter().enumerate() {
            if i >= self.num_digits as usize {
                return num_new_digits - 1;
            } else if self.digits[i] == p5 {
                continue;
            } else if self.digits[i] < p5 {
                return num_new_digits - 1;
            } else {
                return num_new_digits;
            }
        }
        num_new_digits
    }

    /// Multiply the number by `2^shift`.
    ///
    /// Preconditions: `decimal_point` within ±[`Decimal::DECIMAL_POINT_RANGE`],
    /// and `1 <= shift <=` [`Decimal::MAX_SHIFT`].
    pub fn small_lshift(&mut self, shift: u32) {
        if self.num_digits == 0 {
            return;
        }
        let num_new_digits = self.lshift_num_new_digits(shift);
        let mut rx = self.num_digits as i32 - 1; // Read  index.
        let mut wx = self.num_digits as i32 - 1 + num_new_digits as i32; // Write index.
        let mut n: u64 = 0;

        // Repeat: pick up a digit, put down a digit, right to left.
        while rx >= 0 {
            n += (self.digits[rx as usize] as u64) << shift;
            let quo = n / 10;
            let rem = n - 10 * quo;
            if (wx as usize) < Decimal::DIGITS_PRECISION {
                self.digits[wx as usize] = rem as u8;
            } else if rem > 0 {
                self.truncated = true;
            }
            n = quo;
            wx -= 1;
            rx -= 1;
        }

        // Put down leading digits, right to left.
        while n > 0 {
            let quo = n / 10;
            let rem = n - 10 * quo;
            if (wx as usize) < Decimal::DIGITS_PRECISION {
                self.digits[wx as usize] = rem as u8;
            } else if rem > 0 {
                self.truncated = true;
            }
            n = quo;
            wx -= 1;
        }

        self.num_digits += num_new_digits;
        if self.num_digits > Decimal::DIGITS_PRECISION as u32 {
            self.num_digits = Decimal::DIGITS_PRECISION as u32;
        }
        self.decimal_point += num_new_digits as i32;
        self.trim();
    }

    /// Divide the number by `2^shift`, rounding any long tail into the
    /// `truncated` bit.
    ///
    /// Same preconditions as [`small_lshift`](Decimal::small_lshift).
    pub fn small_rshift(&mut self, shift: u32) {
        let mut rx: usize = 0; // Read  index.
        let mut wx: usize = 0; // Write index.
        let mut n: u64 = 0;

        // Pick up enough leading digits to cover the first shift.
        while (n >> shift) == 0 {
            if rx < self.num_digits as usize {
                // Read a digit.
                n = 10 * n + self.digits[rx] as u64;
                rx += 1;
            } else if n == 0 {
                // The number used to be zero and remains zero.
                return;
            } else {
                // Read sufficient implicit trailing zeroes.
                while (n >> shift) == 0 {
                    n *= 10;
                    rx += 1;
                }
                break;
            }
        }
        self.decimal_point -= rx as i32 - 1;
        if self.decimal_point < -Decimal::DECIMAL_POINT_RANGE {
            // After the shift, the number is effectively zero.
            self.num_digits = 0;
            self.decimal_point = 0;
            self.truncated = false;
            return;
        }

        // Repeat: pick up a digit, put down a digit, left to right.
        let mask = (1u64 << shift) - 1;
        while rx < self.num_digits as usize {
            let new_digit = (n >> shift) as u8;
            n = 10 * (n & mask) + self.digits[rx] as u64;
            rx += 1;
            self.digits[wx] = new_digit;
            wx += 1;
        }

        // Put down trailing digits, left to right.
        while n > 0 {
            let new_digit = (n >> shift) as u8;
            n = 10 * (n & mask);
            if wx < Decimal::DIGITS_PRECISION {
                self.digits[wx] = new_digit;
                wx += 1;
            } else if new_digit > 0 {
                self.truncated = true;
            }
        }

        self.num_digits = wx as u32;
        self.trim();
    }

    // ROUNDED INTEGER
    // ---------------

    /// The integral (non-fractional) part of the number, rounded
    /// to-nearest with ties to-even: rounding 7.5 or 8.5 both give 8. The
    /// `truncated` bit breaks would-be ties upward.
    ///
    /// The sign is ignored: rounding -8.6 returns 9. For 19 or more
    /// integral digits, returns `u64::MAX` as a saturating sentinel. Note
    /// that:
    ///  - (1 << 53) is    9007199254740992, which has 16 decimal digits.
    ///  - (1 << 56) is   72057594037927936, which has 17 decimal digits.
    ///  - (1 << 59) is  576460752303423488, which has 18 decimal digits.
    ///  - (1 << 63) is 9223372036854775808, which has 19 decimal digits.
    /// and that IEEE 754 double precision has 52 mantissa bits.
    pub fn rounded_integer(&self) -> u64 {
        if self.num_digits == 0 || self.decimal_point < 0 {
            return 0;
        } else if self.decimal_point > 18 {
            return u64::MAX;
        }

        let dp = self.decimal_point as usize;
        let mut n: u64 = 0;
        for i in 0..dp {
            n = 10 * n
                + if i < self.num_digits as usize {
                    self.digits[i] as u64
                } else {
                    0
                };
        }

        let mut round_up = false;
        if dp < self.num_digits as usize {
            round_up = self.digits[dp] >= 5;
            if self.digits[dp] == 5 && dp + 1 == self.num_digits as usize {
                // Exactly halfway. If truncated, round up, otherwise round
                // to even.
                round_up = self.truncated || (dp > 0 && self.digits[dp - 1] & 1 != 0);
            }
        }
        if round_up {
            n += 1;
        }
        n
    }

    // TO F64
    // ------

    /// Convert to double precision via Simple Decimal Conversion, after one
    /// more attempt at the Eisel-Lemire fast path.
    ///
    /// Consumes the decimal destructively: the digit buffer is scaled in
    /// place by powers of two until the value sits in `[1 .. 2)`, then the
    /// 53-bit mantissa is read off with [`Decimal::rounded_integer`].
    pub fn to_f64(&mut self, options: u32) -> Result<f64> {
        // Handle zero and obvious extremes first. The largest and smallest
        // positive finite f64 values are approximately 1.8e+308 and
        // 4.9e-324.
        if self.num_digits == 0 || self.decimal_point < -326 {
            return Ok(self.signed_zero());
        } else if self.decimal_point > 310 {
            return self.signed_infinity(options);
        }

        // Try the fast Eisel-Lemire algorithm again. Calculating the
        // (man, exp10) pair from the decimal is more correct but slower
        // than the optimistic lexer in `parse`, which bails on the less
        // common syntax (underscores, a leading '+') rather than handle it.
        //
        // With 19 or fewer mantissa digits the pair is exact, so one run
        // settles it. With more, run twice to get a lower and an upper
        // bound; the result is still exact if both bounds agree.
        let i_max = (self.num_digits as usize).min(19);
        let exp10 = self.decimal_point - i_max as i32;
        if (MIN_EXP10..=MAX_EXP10).contains(&exp10) {
            let mut man: u64 = 0;
            for i in 0..i_max {
                man = 10 * man + self.digits[i] as u64;
            }
            if man != 0 {
                if let Some(r0) = lemire::eisel_lemire(man, exp10) {
                    let exact = self.num_digits <= 19
                        || lemire::eisel_lemire(man + 1, exp10) == Some(r0);
                    if exact {
                        return Ok(f64::from_bits(r0 | ((self.negative as u64) << 63)));
                    }
                }
            }
        }

        // Scale by powers of 2 until the value is in the range [0.1 .. 10],
        // equivalently until decimal_point is +0 or +1.
        //
        // First shift right while at or above 10...
        const F64_BIAS: i32 = -1023;
        let mut exp2: i32 = 0;
        while self.decimal_point > 1 {
            let n = self.decimal_point as usize;
            let shift = if n < DECIMAL_POINT_SHIFTS.len() {
                DECIMAL_POINT_SHIFTS[n] as u32
            } else {
                Decimal::MAX_SHIFT
            };
            self.small_rshift(shift);
            if self.decimal_point < -Decimal::DECIMAL_POINT_RANGE {
                return Ok(self.signed_zero());
            }
            exp2 += shift as i32;
        }
        // ...then shift left while below 0.1.
        while self.decimal_point < 0 {
            let n = (-self.decimal_point) as usize;
            let shift = if n < DECIMAL_POINT_SHIFTS.len() {
                // The +1 is per "when targeting a decimal_point of +0 or
                // +1 ... when left shifting" in the table comment below.
                DECIMAL_POINT_SHIFTS[n] as u32 + 1
            } else {
                Decimal::MAX_SHIFT
            };
            self.small_lshift(shift);
            if self.decimal_point > Decimal::DECIMAL_POINT_RANGE {
                return self.signed_infinity(options);
            }
            exp2 -= shift as i32;
        }

        // To get from "in the range [0.1 .. 10]" to "in the range [1 .. 2]"
        // (which gives the base-2 exponent), the mantissa's first 3 digits
        // determine the final left shift, equal to 52 (the number of
        // explicit f64 mantissa bits) plus an adjustment.
        let man3 = 100 * self.digits[0] as i32
            + if self.num_digits > 1 {
                10 * self.digits[1] as i32
            } else {
                0
            }
            + if self.num_digits > 2 {
                self.digits[2] as i32
            } else {
                0
            };
        let additional_lshift = if self.decimal_point == 0 {
            // The value is in [0.1 .. 1].
            if man3 < 125 {
                4
            } else if man3 < 250 {
                3
            } else if man3 < 500 {
                2
            } else {
                1
            }
        } else {
            // The value is in [1 .. 10].
            if man3 < 200 {
                0
            } else if man3 < 400 {
                -1
            } else if man3 < 800 {
                -2
            } else {
                -3
            }
        };
        exp2 -= additional_lshift;
        let final_lshift = (52 + additional_lshift) as u32;

        // The minimum normal exponent is (F64_BIAS + 1). Shift any further
        // precision out now so subnormals extract faithfully.
        while F64_BIAS + 1 > exp2 {
            let n = ((F64_BIAS + 1 - exp2) as u32).min(Decimal::MAX_SHIFT);
            self.small_rshift(n);
            exp2 += n as i32;
        }

        // Check for overflow.
        if exp2 - F64_BIAS >= 0x7FF {
            return self.signed_infinity(options);
        }

        // Extract 53 bits for the mantissa (in base-2).
        self.small_lshift(final_lshift);
        let mut man2 = self.rounded_integer();

        // Rounding might have added one bit. If so, shift and re-check
        // overflow.
        if man2 >> 53 != 0 {
            man2 >>= 1;
            exp2 += 1;
            if exp2 - F64_BIAS >= 0x7FF {
                return self.signed_infinity(options);
            }
        }

        // Handle subnormal numbers: a biased-exponent field of zero.
        if man2 >> 52 == 0 {
            exp2 = F64_BIAS;
        }

        // Pack the bits and return.
        let bits = (man2 & 0x000F_FFFF_FFFF_FFFF)
            | ((((exp2 - F64_BIAS) as u64) & 0x7FF) << 52)
            | ((self.negative as u64) << 63);
        Ok(f64::from_bits(bits))
    }

    #[inline]
    fn signed_zero(&self) -> f64 {
        f64::from_bits((self.negative as u64) << 63)
    }

    #[inline]
    fn signed_infinity(&self, options: u32) -> Result<f64> {
        if options & REJECT_INF_AND_NAN != 0 {
            Err(ParseFloatError::BadArgument)
        } else {
            Ok(f64::from_bits(
                0x7FF0_0000_0000_0000 | ((self.negative as u64) << 63),
            ))
        }
    }
}

impl Default for Decimal {
    fn default() -> Decimal {
        Decimal::new()
    }
}

/// Lower bounds for converting decimal powers of 10 to binary powers of 2:
/// `DECIMAL_POINT_SHIFTS[n]` is the largest s with `(1 << s) <= 10^n`. For
/// example, `(10000 >> 13) == 1`. The table stops before its elements
/// exceed [`Decimal::MAX_SHIFT`].
///
/// Adding 1 to an element gives an upper bound (`1 << 14` exceeds 1e4)
/// while staying at or below `MAX_SHIFT`.
///
/// When starting in the range [1e+1 .. 1e+2] (a decimal_point of +2),
/// `DECIMAL_POINT_SHIFTS[2] == 6` and so:
///  - Right shifting by 6+0 produces the range [10/64 .. 100/64] =
///    [0.156250 .. 1.56250], a resultant decimal_point of +0 or +1.
///  - Right shifting by 6+1 produces the range [10/128 .. 100/128] =
///    [0.078125 .. 0.78125], a resultant decimal_point of -1 or -0.
///
/// When starting in the range [1e-3 .. 1e-2] (a decimal_point of -2):
///  - Left shifting by 6+0 produces the range [0.001*64 .. 0.01*64] =
///    [0.064 .. 0.64], a resultant decimal_point of -1 or -0.
///  - Left shifting by 6+1 produces the range [0.001*128 .. 0.01*128] =
///    [0.128 .. 1.28], a resultant decimal_point of +0 or +1.
///
/// Thus, when targeting a decimal_point of +0 or +1, use the element as-is
/// when right shifting but add 1 when left shifting.
const DECIMAL_POINT_SHIFTS: [u8; 19] = [
    0, 3, 6, 9, 13, 16, 19, 23, 26, 29, //
    33, 36, 39, 43, 46, 49, 53, 56, 59, //
];
