//! Recognizer for the non-finite literals: ±inf, ±infinity and ±nan.

#![doc(hidden)]

use crate::error::{ParseFloatError, Result};
use crate::options::REJECT_INF_AND_NAN;

/// Quiet NaN payload produced for the "nan" literal.
const NAN_BITS: u64 = 0x7FFF_FFFF_FFFF_FFFF;

/// Positive infinity.
const INF_BITS: u64 = 0x7FF0_0000_0000_0000;

/// Parse a special (non-finite) value.
///
/// Case-insensitive "inf", "infinity" and "nan" with an optional leading
/// sign. Underscores are accepted around the sign and after the keyword
/// regardless of `ALLOW_UNDERSCORES`: they are digit-group separators and
/// there are no digit groups to separate here.
///
/// With `REJECT_INF_AND_NAN` set, this rejects without examining the
/// content.
pub fn parse_special(s: &[u8], options: u32) -> Result<f64> {
    if options & REJECT_INF_AND_NAN != 0 {
        return Err(ParseFloatError::BadArgument);
    }

    let mut i = 0;
    while s.get(i) == Some(&b'_') {
        i += 1;
    }
    if i >= s.len() {
        return Err(ParseFloatError::BadArgument);
    }

    // Parse the sign.
    let mut negative = false;
    match s[i] {
        b'+' => i += 1,
        b'-' => {
            negative = true;
            i += 1;
        }
        _ => {}
    }
    while s.get(i) == Some(&b'_') {
        i += 1;
    }
    if i >= s.len() {
        return Err(ParseFloatError::BadArgument);
    }

    let nan = match s[i] {
        b'I' | b'i' => {
            if s.len() - i < 3 || !s[i..i + 3].eq_ignore_ascii_case(b"inf") {
                return Err(ParseFloatError::BadArgument);
            }
            i += 3;

            // "inf" may continue as "infinity", but nothing in between.
            if i < s.len() && s[i] != b'_' {
                if s.len() - i < 5 || !s[i..i + 5].eq_ignore_ascii_case(b"inity") {
                    return Err(ParseFloatError::BadArgument);
                }
                i += 5;
                if i < s.len() && s[i] != b'_' {
                    return Err(ParseFloatError::BadArgument);
                }
            }
            false
        }
        b'N' | b'n' => {
            if s.len() - i < 3 || !s[i..i + 3].eq_ignore_ascii_case(b"nan") {
                return Err(ParseFloatError::BadArgument);
            }
            i += 3;
            if i < s.len() && s[i] != b'_' {
                return Err(ParseFloatError::BadArgument);
            }
            true
        }
        _ => return Err(ParseFloatError::BadArgument),
    };

    // Only trailing underscores may remain.
    while s.get(i) == Some(&b'_') {
        i += 1;
    }
    if i != s.len() {
        return Err(ParseFloatError::BadArgument);
    }

    let bits = if nan { NAN_BITS } else { INF_BITS };
    Ok(f64::from_bits(bits | ((negative as u64) << 63)))
}
