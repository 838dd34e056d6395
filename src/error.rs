//! Error types.

use core::fmt;

/// Result type with the `primecurve` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Elliptic curve errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Input bytes do not encode a valid field element, scalar, or point.
    Decode,

    /// No curve with the requested name or identifier is available.
    CurveNotSupported,

    /// A value created by one curve instance was passed to another.
    CurveMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decode => f.write_str("decoding error"),
            Error::CurveNotSupported => f.write_str("curve not supported"),
            Error::CurveMismatch => f.write_str("value belongs to a different curve"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
