//! Validation utilities for curve and pairing primitives

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate that two paired inputs have the same number of entries
#[inline(always)]
pub fn same_length(name: &'static str, left: usize, right: usize) -> Result<()> {
    parameter(left == right, name, "input slices must have the same length")
}

/// Validate a minimum value such as a window width
#[inline(always)]
pub fn at_least(name: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::param(name, "value below the supported minimum"));
    }
    Ok(())
}
