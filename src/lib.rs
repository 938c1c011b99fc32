//! Correctly rounded decimal to binary floating-point parsing.
//!
//! Given a byte slice that textually represents a decimal number, produce
//! the IEEE 754 double-precision value that is the correctly rounded
//! (round-to-nearest, ties-to-even) conversion of that decimal. Scientific,
//! fixed, and special-value (inf/nan) syntaxes are accepted, modified by a
//! small option bitmask, and the conversion is bit-exact.
//!
//! The hot path is the Eisel-Lemire algorithm: multiply the mantissa by a
//! precomputed 128-bit approximation of a power of ten and inspect the
//! product to decide the rounding. Whenever that cannot decide (long
//! inputs, exotic syntax, or a genuine near-halfway value), a slow path
//! re-parses into an 800-digit fixed-precision decimal and scales it by
//! powers of two until the 53-bit mantissa can be read off exactly.
//!
//! # Getting Started
//!
//! ```rust
//! use exact_float::{parse_f64, ALLOW_UNDERSCORES, DEFAULT_OPTIONS};
//!
//! assert_eq!(parse_f64(b"12345.67", DEFAULT_OPTIONS), Ok(12345.67));
//! assert_eq!(parse_f64(b"1_000.5", ALLOW_UNDERSCORES), Ok(1000.5));
//! assert!(parse_f64(b"narnia", DEFAULT_OPTIONS).is_err());
//! ```

// FEATURES

// Require core-only operation in a no_std context.
#![cfg_attr(not(feature = "std"), no_std)]

// MODULES
pub mod bits;
pub mod decimal;
pub mod error;
pub mod lemire;
pub mod options;
pub mod parse;
pub mod pow5;
pub mod powers;
pub mod special;

// API
pub use self::bits::{f64_from_u16_bits, f64_from_u32_bits};
pub use self::error::{ParseFloatError, Result};
pub use self::options::{
    ALLOW_MULTIPLE_LEADING_ZEROES, ALLOW_UNDERSCORES, DECIMAL_SEPARATOR_IS_A_COMMA,
    DEFAULT_OPTIONS, REJECT_INF_AND_NAN,
};
pub use self::parse::parse_f64;
