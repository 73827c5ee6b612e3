//! Traits implemented by the bls381 public types

pub mod serialize;

pub use serialize::Serialize;
