//! Traits for byte serialization of curve and field types.

use crate::Result;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

/// A trait for public types that can be serialized to and from bytes.
///
/// Implementations use their canonical wire encoding: compressed points,
/// big-endian field and scalar elements.
pub trait Serialize: Sized {
    /// Creates an object from a byte slice, validating length and content.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
    /// Converts the object to a byte vector.
    #[cfg(feature = "alloc")]
    fn to_bytes(&self) -> Vec<u8>;
}
