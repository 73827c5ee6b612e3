//! Public API traits and types for the bls381 library
//!
//! This crate provides the public error type and the byte serialization trait
//! shared by every bls381 crate.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod error;
pub mod traits;

pub use error::{Error, Result, ResultExt};
pub use traits::Serialize;

pub use traits::serialize;
