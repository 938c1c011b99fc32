//! Parse byte slices to correctly rounded double precision floats.

#![doc(hidden)]

use crate::decimal::Decimal;
use crate::error::Result;
use crate::lemire;
use crate::options::DECIMAL_SEPARATOR_IS_A_COMMA;
use crate::powers::{F64_POWERS_OF_10, MAX_EXP10, MIN_EXP10};
use crate::special;

// Convert character to digit.
#[inline]
fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

// PARSE
// -----

/// Parse a byte slice as an IEEE 754 double-precision value, rounding
/// to-nearest with ties to-even.
///
/// The result is bit-exact: for every accepted input the returned value
/// has the same bit pattern as an infinite-precision conversion rounded
/// once. The accepted syntax is scientific or fixed notation plus the
/// literals "inf", "infinity" and "nan" (case-insensitive), modified by
/// the bits in `options` (see [`crate::options`]).
///
/// ```
/// let value = exact_float::parse_f64(b"3.14159e100", 0).unwrap();
/// assert_eq!(value.to_bits(), 0x54CCB9F42CDD2850);
/// ```
pub fn parse_f64(s: &[u8], options: u32) -> Result<f64> {
    // In practice, almost all "dd.ddddE±xxx" numbers can be represented
    // losslessly by a u64 mantissa "dddddd" and an i32 base-10 exponent,
    // adjusting "xxx" for the position (if present) of the decimal
    // separator.
    //
    // If the input fits in a (man, exp10) pair, parse that pair with the
    // Eisel-Lemire algorithm. If not, or if Eisel-Lemire gives up, parsing
    // with the fallback algorithm is slower but comprehensive.
    if let Some(f) = parse_fast(s, options) {
        return Ok(f);
    }
    match Decimal::parse(s, options) {
        Ok(mut h) => h.to_f64(options),
        Err(_) => special::parse_special(s, options),
    }
}

/// The optimistic hot path: a single-pass lexer feeding Eisel-Lemire.
///
/// `None` means "fall back", never "invalid": anything this lexer cannot
/// handle (underscores, a leading '+', repeated leading zeroes, inputs of
/// 256 bytes or more) is re-parsed comprehensively by the caller.
fn parse_fast(s: &[u8], options: u32) -> Option<f64> {
    // Work on a NUL-terminated stack copy of the input, so the scanner can
    // always test one byte past the digits it has consumed. The NUL byte
    // is not a valid part of "±dd.ddddE±xxx", and repeatedly checking "is
    // z[i] a digit" is faster than also checking "is i within bounds".
    if s.len() >= 256 {
        return None;
    }
    let mut z = [0u8; 256];
    z[..s.len()].copy_from_slice(s);
    let mut i = 0;

    // Look for a leading minus sign. A leading plus is legal but rare, and
    // handling it here slows the common path; the fallback catches it.
    let negative = z[i] == b'-';
    if negative {
        i += 1;
    }

    // After walking "dd.dddd", comparing i later with i now produces the
    // number of "d"s and "."s.
    let start_of_digits = i;

    // Walk the "d"s before a separator, 'E', NUL byte, etc. If it starts
    // with '0', it must be a single '0'. If it starts with a non-zero
    // decimal digit, it can be a sequence of decimal digits.
    //
    // It is fine for man to overflow during the walk; the digit-count
    // check below rejects any input that might have lost information.
    let mut man: u64;
    if z[i] == b'0' {
        man = 0;
        i += 1;
        if is_digit(z[i]) {
            return None;
        }
    } else if is_digit(z[i]) {
        man = (z[i] - b'0') as u64;
        i += 1;
        while is_digit(z[i]) {
            man = man.wrapping_mul(10).wrapping_add((z[i] - b'0') as u64);
            i += 1;
        }
    } else {
        return None;
    }

    // Walk the "d"s after the optional decimal separator, updating man and
    // exp10.
    let sep = if options & DECIMAL_SEPARATOR_IS_A_COMMA != 0 {
        b','
    } else {
        b'.'
    };
    let mut exp10: i32 = 0;
    if z[i] == sep {
        i += 1;
        let first_after_separator = i;
        if !is_digit(z[i]) {
            return None;
        }
        man = man.wrapping_mul(10).wrapping_add((z[i] - b'0') as u64);
        i += 1;
        while is_digit(z[i]) {
            man = man.wrapping_mul(10).wrapping_add((z[i] - b'0') as u64);
            i += 1;
        }
        exp10 = first_after_separator as i32 - i as i32;
    }

    // Count the number of digits:
    //  - for an input of "314159",  digit_count is 6.
    //  - for an input of "3.14159", digit_count is 7.
    //
    // This is off-by-one if there is a decimal separator. That is fine for
    // now; it is corrected below, where it matters.
    let mut digit_count = (i - start_of_digits) as u32;

    // Update exp10 for the optional exponent, starting with 'E' or 'e'.
    if (z[i] | 0x20) == b'e' {
        i += 1;
        let mut exp_sign: i32 = 1;
        if z[i] == b'-' {
            exp_sign = -1;
            i += 1;
        } else if z[i] == b'+' {
            i += 1;
        }
        if !is_digit(z[i]) {
            return None;
        }
        let mut exp_num: i32 = (z[i] - b'0') as i32;
        i += 1;
        while is_digit(z[i]) {
            if exp_num > 0x100_0000 {
                return None;
            }
            exp_num = 10 * exp_num + (z[i] - b'0') as i32;
            i += 1;
        }
        exp10 += exp_sign * exp_num;
    }

    // No trailing data. The full syntax also allows underscores, which
    // this lexer never consumes; they land here and fall back.
    if i != s.len() {
        return None;
    }

    // Check that the u64 man has not overflowed, based on digit_count. For
    // reference:
    //   - (1 << 63) is  9223372036854775808, which has 19 decimal digits.
    //   - (1 << 64) is 18446744073709551616, which has 20 decimal digits.
    if digit_count > 19 {
        // More than 19 pseudo-digits is not yet definitely an overflow:
        // digit_count may be one too large from the separator, and
        // over-reports the meaningful digits for inputs like "0.000dddExxx".
        // Discount leading '0's and '.'s and re-compare.
        let mut q = start_of_digits;
        while z[q] == b'0' || z[q] == b'.' {
            q += 1;
        }
        digit_count -= (q - start_of_digits) as u32;
        if digit_count > 19 {
            return None;
        }
    }

    // The eisel_lemire preconditions include the tabulated exp10 range.
    if exp10 < MIN_EXP10 || exp10 > MAX_EXP10 {
        return None;
    }

    // If both man and 10^exp10 are exactly representable as an f64, a
    // single multiply or divide is already correctly rounded.
    if (-22..=22).contains(&exp10) && (man >> 53) == 0 {
        let mut d = man as f64;
        if exp10 >= 0 {
            d *= F64_POWERS_OF_10[exp10 as usize];
        } else {
            d /= F64_POWERS_OF_10[(-exp10) as usize];
        }
        return Some(if negative { -d } else { d });
    }

    // The eisel_lemire preconditions include a non-zero man. Parsing "0"
    // is caught by the exact-representation branch above, but "0e99" is
    // not; the fallback normalizes those to a signed zero.
    if man == 0 {
        return None;
    }

    let r = lemire::eisel_lemire(man, exp10)?;
    Some(f64::from_bits(r | ((negative as u64) << 63)))
}
