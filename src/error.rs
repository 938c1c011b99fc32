//! Error type for the parsing API.

use thiserror::Error;

/// The error returned when a byte slice does not spell a parsable number.
///
/// There is deliberately a single variant: callers either get a
/// correctly rounded value or a rejection, and the rejection carries no
/// position information (the input is typically short enough to inspect
/// whole).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseFloatError {
    /// The input is not an accepted number under the given options, or it
    /// would overflow to an infinity while `REJECT_INF_AND_NAN` is set.
    #[error("bad argument")]
    BadArgument,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ParseFloatError>;
