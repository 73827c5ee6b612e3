//! Error handling for the bls381 ecosystem

pub mod traits;
pub mod types;

pub use traits::ResultExt;
pub use types::{Error, Result};

#[cfg(feature = "std")]
impl From<std::array::TryFromSliceError> for Error {
    fn from(_: std::array::TryFromSliceError) -> Self {
        Self::InvalidLength {
            context: "array conversion",
            expected: 0,
            actual: 0,
        }
    }
}

/// Result type for point decoding
pub type PointResult<T> = Result<T>;
/// Result type for pairing operations
pub type PairingResult<T> = Result<T>;
