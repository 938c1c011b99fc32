//! Option bits accepted by [`parse_f64`](crate::parse_f64).
//!
//! Options combine by bitwise or. A plain `u32` keeps combining cheap and
//! keeps the ABI trivial for callers binding the parser from other code.

/// Accept only the default syntax.
pub const DEFAULT_OPTIONS: u32 = 0x0000_0000;

/// Accept inputs like "00", "0644" and "00.7". By default, they are
/// rejected.
pub const ALLOW_MULTIPLE_LEADING_ZEROES: u32 = 0x0000_0001;

/// Accept inputs like "1__2" and "_3.141_592". By default, they are
/// rejected.
///
/// Underscores may appear around the sign, around the exponent marker, and
/// between digits. The input must still end in a context where a digit (or
/// a trailing underscore run) is acceptable.
pub const ALLOW_UNDERSCORES: u32 = 0x0000_0002;

/// Accept "1,5" and not "1.5" as one-and-a-half.
///
/// A caller wanting to accept either is responsible for canonicalizing the
/// input first; it also has more context on how to treat something like
/// "$1,234".
pub const DECIMAL_SEPARATOR_IS_A_COMMA: u32 = 0x0000_0010;

/// Reject inputs that would produce an infinite or Not-a-Number value. By
/// default, they are accepted.
///
/// This affects the literals "inf" and "nan", but also finite inputs like
/// "1e999" whose magnitude overflows double precision.
pub const REJECT_INF_AND_NAN: u32 = 0x0000_0020;
