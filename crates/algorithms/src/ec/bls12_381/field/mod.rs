//! The BLS12-381 field tower.
//!
//! `Fp` is the 381-bit prime field. The extensions are built as
//! `Fp2 = Fp[u] / (u^2 + 1)`, `Fp6 = Fp2[v] / (v^3 - (u + 1))` and
//! `Fp12 = Fp6[w] / (w^2 - v)`. The `*Wide` types hold unreduced products for
//! the lazy-reduction multiplication path.

pub mod fp;
pub mod fp12;
pub mod fp2;
pub mod fp6;

pub use fp::{Fp, FpWide};
pub use fp12::Fp12;
pub use fp2::{Fp2, Fp2Wide};
pub use fp6::{Fp6, Fp6Wide};
