//! Error type definitions for curve and pairing operations

#[cfg(feature = "std")]
use std::string::String;

/// Primary error type for bls381 operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum Error {
    /// Invalid length error with context
    #[cfg_attr(
        feature = "std",
        error("{context}: invalid length (expected {expected}, got {actual})")
    )]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    #[cfg_attr(feature = "std", error("{context}: invalid parameter: {message}"))]
    InvalidParameter {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Encoding could not be decoded into a field element or point
    #[cfg_attr(feature = "std", error("{context}: serialization error: {message}"))]
    SerializationError {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Decoded coordinates do not describe a valid group element
    #[cfg_attr(feature = "std", error("{context}: invalid point: {message}"))]
    InvalidPoint {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },

    /// Other error
    #[cfg_attr(feature = "std", error("{context}: {message}"))]
    Other {
        context: &'static str,
        #[cfg(feature = "std")]
        message: String,
    },
}

/// Result type for bls381 operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its details
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            #[cfg(feature = "std")]
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            #[cfg(not(feature = "std"))]
            Self::InvalidParameter { .. } => Self::InvalidParameter { context },
            #[cfg(feature = "std")]
            Self::SerializationError { message, .. } => {
                Self::SerializationError { context, message }
            }
            #[cfg(not(feature = "std"))]
            Self::SerializationError { .. } => Self::SerializationError { context },
            #[cfg(feature = "std")]
            Self::InvalidPoint { message, .. } => Self::InvalidPoint { context, message },
            #[cfg(not(feature = "std"))]
            Self::InvalidPoint { .. } => Self::InvalidPoint { context },
            #[cfg(feature = "std")]
            Self::Other { message, .. } => Self::Other { context, message },
            #[cfg(not(feature = "std"))]
            Self::Other { .. } => Self::Other { context },
        }
    }

    /// Replace the message of an existing error
    #[cfg(feature = "std")]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::InvalidLength { context, expected, actual } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::SerializationError { context, .. } => {
                Self::SerializationError { context, message }
            }
            Self::InvalidPoint { context, .. } => Self::InvalidPoint { context, message },
            Self::Other { context, .. } => Self::Other { context, message },
        }
    }

    /// Context string attached to the error
    pub fn context(&self) -> &'static str {
        match self {
            Self::InvalidLength { context, .. }
            | Self::InvalidParameter { context, .. }
            | Self::SerializationError { context, .. }
            | Self::InvalidPoint { context, .. }
            | Self::Other { context, .. } => context,
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidLength { context, expected, actual } => write!(
                f,
                "{}: invalid length (expected {}, got {})",
                context, expected, actual
            ),
            Error::InvalidParameter { context } => write!(f, "{}: invalid parameter", context),
            Error::SerializationError { context } => write!(f, "{}: serialization error", context),
            Error::InvalidPoint { context } => write!(f, "{}: invalid point", context),
            Error::Other { context } => write!(f, "{}: error", context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_keeps_lengths() {
        let err = Error::InvalidLength {
            context: "inner",
            expected: 48,
            actual: 47,
        }
        .with_context("G1Affine::from_bytes");

        assert_eq!(
            err,
            Error::InvalidLength {
                context: "G1Affine::from_bytes",
                expected: 48,
                actual: 47,
            }
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_display_includes_message() {
        let err = Error::InvalidPoint {
            context: "G2Affine",
            message: "not in correct subgroup".to_string(),
        };
        assert_eq!(err.to_string(), "G2Affine: invalid point: not in correct subgroup");
    }
}
