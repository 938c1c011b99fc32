//! Fast estimation of the accurate representation of a float.
//!
//! Based off the Eisel-Lemire algorithm as implemented in Wuffs:
//!     https://github.com/google/wuffs/blob/main/internal/cgen/base/floatconv-submodule-code.c
//!
//! The original algorithm may be found here:
//!     https://github.com/lemire/fast_double_parser
//!
//! And an in-depth blogpost describing it may be found here:
//!     https://nigeltao.github.io/blog/2020/eisel-lemire.html
//!
//! # Magic Number Generation
//!
//! The base-10 to base-2 exponent scaling uses the ratio `217706 / 65536`,
//! which approximates `log(10) / log(2) ≈ 3.321928` closely enough that the
//! scaled value matches the exact power-of-2 over the full tabulated range:
//!
//! ```python
//! import math
//!
//! def check(max_exp, bitshift):
//!     den = 1 << bitshift
//!     num = int(math.ceil(math.log2(10) * den))
//!     for exp10 in range(0, max_exp):
//!         exp2_exact = int(math.log2(10**exp10))
//!         exp2_guess = num * exp10 // den
//!         if exp2_exact != exp2_guess:
//!             raise ValueError(f'{exp10}')
//!     return num, den
//! ```
//!
//! For 64-bit floats a bitshift of 16 suffices, so the magic number is
//! `217706`.

#![doc(hidden)]

use crate::powers::{MIN_EXP10, POWERS_OF_10};

// MUL
// ---

/// Multiply two unsigned, integral values, and return the lo and hi product.
///
/// The maximum inclusive output is `0xFFFFFFFFFFFFFFFE_0000000000000001`.
#[inline(always)]
pub fn mul_u64(x: u64, y: u64) -> (u64, u64) {
    let z = (x as u128) * (y as u128);
    (z as u64, (z >> 64) as u64)
}

// EISEL-LEMIRE
// ------------

/// Produce the packed IEEE 754 double-precision bits for an exact mantissa
/// and base-10 exponent. For example:
///  - when parsing "12345.678e+02", `man` is 12345678 and `exp10` is -1.
///  - when parsing "-12", `man` is 12 and `exp10` is 0. Processing the
///    leading minus sign is the responsibility of the caller, not this
///    function.
///
/// On success, the low 63 bits of the return value hold the 11-bit biased
/// exponent and the 52-bit mantissa; the sign bit is clear. `None` means the
/// algorithm could not decide the rounding and the caller must fall back to
/// the slow path. A `Some` result is always the correctly rounded value;
/// this function never returns a wrong answer.
///
/// Preconditions:
///  - `man` is non-zero.
///  - `exp10` is in the range `[-307 ..= 288]`, the range of
///    [`POWERS_OF_10`].
///
/// The `exp10` range (and `man` being at most about 1.85e+19) means that
/// `man * 10^exp10` is within `[1e-307 ..= 1.85e+307]`, entirely inside the
/// normal f64 range, so neither overflow nor subnormals can arise here.
pub fn eisel_lemire(man: u64, exp10: i32) -> Option<u64> {
    debug_assert!(man != 0);

    // Look up the (possibly truncated) base-2 representation of 10^exp10.
    // The table entry is already normalized: its mantissa's MSB is on.
    let (po10_lo, po10_hi) = POWERS_OF_10[(exp10 - MIN_EXP10) as usize];

    // Normalize the man argument. The (man != 0) precondition means that a
    // non-zero bit exists.
    let clz = man.leading_zeros() as i32;
    let man = man << clz;

    // Calculate the return value's base-2 exponent, tweaked by ±1 further
    // down. 1087 is 1023 (the f64 exponent bias) + 64 (the look-up table
    // uses 64-bit mantissas).
    let mut ret_exp2 = ((217706 * exp10) >> 16) + 1087 - clz;

    // Multiply the two mantissas. Both are at least 1<<63, so the 128-bit
    // product is at least 1<<126 and x_hi is at least 1<<62: x_hi has either
    // 0 or 1 leading zeroes.
    let (mut x_lo, mut x_hi) = mul_u64(man, po10_hi);

    // The look-up table entry was possibly truncated, so x is only a lower
    // bound for the product man * 10^exp10. The upper bound would add a
    // further man to the 128-bit product, which overflows the lower limb if
    // x_lo + man wraps. That carry can only change the result if the high
    // limb's low 9 bits are all on, since we shift right by at least 9 bits
    // below.
    //
    // For example, parsing "9999999999999999999" takes this branch, since:
    //  - x_hi = 0x4563918244F3FFFF
    //  - x_lo = 0x8000000000000000
    //  - man  = 0x8AC7230489E7FFFF
    if (x_hi & 0x1FF) == 0x1FF && x_lo.wrapping_add(man) < man {
        // Refine the approximation of 10^exp10 from a 64-bit mantissa to a
        // 128-bit one: y is man times the low limb of the table entry. The
        // 128-bit x and y overlap by 64 bits; merged is the high 128 bits
        // of the 192-bit product.
        //
        // For example, parsing "1.234e-45" takes this branch, since:
        //  - x_hi = 0x70B7E3696DB29FFF
        //  - x_lo = 0xE040000000000000
        //  - y_hi = 0x33718BBEAB0E0D7A
        //  - y_lo = 0xA880000000000000
        let (y_lo, y_hi) = mul_u64(man, po10_lo);
        let mut merged_hi = x_hi;
        let merged_lo = x_lo.wrapping_add(y_hi);
        if merged_lo < x_lo {
            merged_hi += 1;
        }

        // The higher-resolution approximation is still a lower bound. If
        // the upper bound could again produce a different result, give up
        // instead of reaching for yet more precision. This three-part check
        // extends the two-part check above with a term for the middle 64
        // bits: adding 1 to merged_lo must overflow.
        //
        // For example, parsing "5.9604644775390625e-8" takes this branch,
        // since:
        //  - merged_hi = 0x7FFFFFFFFFFFFFFF
        //  - merged_lo = 0xFFFFFFFFFFFFFFFF
        //  - y_lo      = 0x4DB3FFC120988200
        //  - man       = 0xD3C21BCECCEDA100
        if (merged_hi & 0x1FF) == 0x1FF
            && merged_lo.wrapping_add(1) == 0
            && y_lo.wrapping_add(man) < man
        {
            return None;
        }

        x_hi = merged_hi;
        x_lo = merged_lo;
    }

    // Shift x_hi right by 9 or 10 bits, depending on its MSB, leaving the
    // top 10 bits off and bit 53 on: ret_mantissa is a 54-bit number.
    let msb = x_hi >> 63;
    let mut ret_mantissa = x_hi >> (msb + 9);
    ret_exp2 -= 1 ^ msb as i32;

    // IEEE 754 rounds to-nearest with ties to-even. If we are exactly
    // half-way between two representable numbers (x's low 73 bits are zero
    // and the next 2 bits that matter are "01"), give up instead of trying
    // to pick the winner.
    //
    // For example, parsing "1e+23" takes this branch, since:
    //  - x_hi         = 0x54B40B1F852BDA00
    //  - ret_mantissa = 0x002A5A058FC295ED
    if x_lo == 0 && (x_hi & 0x1FF) == 0 && (ret_mantissa & 3) == 1 {
        return None;
    }

    // Round to-nearest: carry the low bit up, then shift right by one,
    // producing a 53-bit number. If carrying up overflowed, shift again.
    //
    // For example, parsing "7.2057594037927933e+16" takes the overflow
    // branch, since:
    //  - x_hi         = 0x7FFFFFFFFFFFFE80
    //  - ret_mantissa = 0x0020000000000000
    ret_mantissa += ret_mantissa & 1;
    ret_mantissa >>= 1;
    if (ret_mantissa >> 53) > 0 {
        ret_mantissa >>= 1;
        ret_exp2 += 1;
    }

    // Mask away the implicit mantissa bit, pack and return.
    ret_mantissa &= 0x000F_FFFF_FFFF_FFFF;
    Some(ret_mantissa | ((ret_exp2 as u64) << 52))
}
