//! Flag byte shared by the G1 and G2 point encodings.
//!
//! The three most significant bits of the first byte carry, from the top:
//! compression, point at infinity and the sign of `y`. The remaining bits
//! hold the big-endian `x` coordinate.

use crate::error::Error;

const COMPRESSED: u8 = 1 << 7;
const INFINITY: u8 = 1 << 6;
const SIGN: u8 = 1 << 5;

/// Mask clearing the flag bits from the first byte
pub(crate) const COORDINATE_MASK: u8 = 0b0001_1111;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Flags {
    pub compressed: bool,
    pub infinity: bool,
    pub sign: bool,
}

impl Flags {
    pub(crate) fn decode(byte: u8) -> Flags {
        Flags {
            compressed: byte & COMPRESSED != 0,
            infinity: byte & INFINITY != 0,
            sign: byte & SIGN != 0,
        }
    }

    pub(crate) fn encode(self) -> u8 {
        let mut byte = 0;
        if self.compressed {
            byte |= COMPRESSED;
        }
        if self.infinity {
            byte |= INFINITY;
        }
        if self.sign {
            byte |= SIGN;
        }
        byte
    }

    /// Validate the flags against the expected form.
    ///
    /// `payload` is the encoding with the flag bits cleared; it must be all
    /// zero when the infinity flag is set.
    pub(crate) fn check(self, compressed: bool, payload: &[u8]) -> Result<Flags, Error> {
        if self.compressed != compressed {
            return Err(Error::param(
                "flags",
                if compressed {
                    "compression bit not set"
                } else {
                    "compression bit set on an uncompressed encoding"
                },
            ));
        }
        if self.sign && (self.infinity || !compressed) {
            return Err(Error::param("flags", "sign bit not allowed here"));
        }
        if self.infinity && payload.iter().any(|&b| b != 0) {
            return Err(Error::param(
                "flags",
                "point at infinity with non-zero coordinates",
            ));
        }
        Ok(self)
    }
}

/// Log a rejected point encoding and pass the error through
pub(crate) fn rejected(group: &'static str, err: Error) -> Error {
    tracing::debug!(group, error = %err, "rejected point encoding");
    err
}
