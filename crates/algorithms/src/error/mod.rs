//! Error handling for curve and pairing primitives

#[cfg(feature = "alloc")]
use alloc::borrow::Cow;

use core::fmt;

use bls381_api::{Error as CoreError, Result as CoreResult};

/// The error type for curve and pairing primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Encoded integer is not reduced modulo the field or group order
    NonCanonical {
        /// Element being decoded
        context: &'static str,
    },

    /// Decoded coordinates do not satisfy the curve equation
    NotOnCurve {
        /// Group the point was decoded for
        group: &'static str,
    },

    /// Point lies on the curve but outside the prime-order subgroup
    NotInSubgroup {
        /// Group the point was decoded for
        group: &'static str,
    },

    /// Value has no square root in the field
    NotSquare {
        /// Operation that required the square root
        context: &'static str,
    },

    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        #[cfg(feature = "alloc")]
        name: Cow<'static, str>,
        /// Name of the invalid parameter
        #[cfg(not(feature = "alloc"))]
        name: &'static str,
        /// Reason why the parameter is invalid
        #[cfg(feature = "alloc")]
        reason: Cow<'static, str>,
        /// Reason why the parameter is invalid
        #[cfg(not(feature = "alloc"))]
        reason: &'static str,
    },

    /// Processing error during an arithmetic operation
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    #[cfg(feature = "alloc")]
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand to create a Parameter error
    #[cfg(not(feature = "alloc"))]
    pub fn param(name: &'static str, reason: &'static str) -> Self {
        Error::Parameter { name, reason }
    }
}

/// Result type for curve and pairing primitives
pub type Result<T> = core::result::Result<T, Error>;

/// Result type for point decoding
pub type DecodeResult<T> = Result<T>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Length {
                context,
                expected,
                actual,
            } => write!(
                f,
                "Invalid length for {}: expected {}, got {}",
                context, expected, actual
            ),
            Error::NonCanonical { context } => {
                write!(f, "Non-canonical encoding for {}: value not reduced", context)
            }
            Error::NotOnCurve { group } => write!(f, "{} point is not on the curve", group),
            Error::NotInSubgroup { group } => {
                write!(f, "{} point is not in the prime-order subgroup", group)
            }
            Error::NotSquare { context } => write!(f, "No square root exists in {}", context),
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Processing { operation, details } => {
                write!(f, "Processing error in {}: {}", operation, details)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::NonCanonical { context } => CoreError::SerializationError {
                context,
                #[cfg(feature = "std")]
                message: "value is not canonical".to_string(),
            },
            Error::NotOnCurve { group } => CoreError::InvalidPoint {
                context: group,
                #[cfg(feature = "std")]
                message: "not on curve".to_string(),
            },
            Error::NotInSubgroup { group } => CoreError::InvalidPoint {
                context: group,
                #[cfg(feature = "std")]
                message: "not in correct subgroup".to_string(),
            },
            Error::NotSquare { context } => CoreError::SerializationError {
                context,
                #[cfg(feature = "std")]
                message: "no square root exists".to_string(),
            },
            #[cfg(feature = "std")]
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: parameter_context(&name),
                message: reason.into_owned(),
            },
            #[cfg(not(feature = "std"))]
            Error::Parameter { name, .. } => CoreError::InvalidParameter {
                context: parameter_context(&name),
            },
            #[cfg(feature = "std")]
            Error::Processing { operation, details } => CoreError::Other {
                context: operation,
                message: details.to_string(),
            },
            #[cfg(not(feature = "std"))]
            Error::Processing { operation, .. } => CoreError::Other { context: operation },
        }
    }
}

#[cfg(feature = "alloc")]
fn parameter_context(name: &Cow<'static, str>) -> &'static str {
    match name {
        Cow::Borrowed(s) => s,
        Cow::Owned(_) => "parameter",
    }
}

#[cfg(not(feature = "alloc"))]
fn parameter_context(name: &&'static str) -> &'static str {
    name
}

/// Convert a primitives result to a core result with additional context
#[inline]
pub fn to_core_result<T>(r: Result<T>, ctx: &'static str) -> CoreResult<T> {
    r.map_err(|e| CoreError::from(e).with_context(ctx))
}

pub use bls381_api::error::ResultExt;

pub mod validate;
