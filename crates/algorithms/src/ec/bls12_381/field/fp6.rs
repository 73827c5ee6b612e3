//! Cubic extension `Fp6 = Fp2[v] / (v^3 - (u + 1))`.

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use super::fp2::{Fp2, Fp2Wide};

/// (u + 1)^((p^k - 1) / 3) for k = 0..5, multiplies `c1` under the Frobenius
const FROBENIUS_COEFF_FP6_C1: [Fp2; 6] = [
    // k = 0
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x7609_0000_0002_fffd,
            0xebf4_000b_c40c_0002,
            0x5f48_9857_53c7_58ba,
            0x77ce_5853_7052_5745,
            0x5c07_1a97_a256_ec6d,
            0x15f6_5ec3_fa80_e493,
        ]),
        c1: Fp::zero(),
    },
    // k = 1
    Fp2 {
        c0: Fp::zero(),
        c1: Fp::from_raw_unchecked([
            0xcd03_c9e4_8671_f071,
            0x5dab_2246_1fcd_a5d2,
            0x5870_42af_d385_1b95,
            0x8eb6_0ebe_01ba_cb9e,
            0x03f9_7d6e_83d0_50d2,
            0x18f0_2065_5463_8741,
        ]),
    },
    // k = 2
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x30f1_361b_798a_64e8,
            0xf3b8_ddab_7ece_5a2a,
            0x16a8_ca3a_c615_77f7,
            0xc26a_2ff8_74fd_029b,
            0x3636_b766_6070_1c6e,
            0x051b_a4ab_241b_6160,
        ]),
        c1: Fp::zero(),
    },
    // k = 3
    Fp2 {
        c0: Fp::zero(),
        c1: Fp::from_raw_unchecked([
            0x7609_0000_0002_fffd,
            0xebf4_000b_c40c_0002,
            0x5f48_9857_53c7_58ba,
            0x77ce_5853_7052_5745,
            0x5c07_1a97_a256_ec6d,
            0x15f6_5ec3_fa80_e493,
        ]),
    },
    // k = 4
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0xcd03_c9e4_8671_f071,
            0x5dab_2246_1fcd_a5d2,
            0x5870_42af_d385_1b95,
            0x8eb6_0ebe_01ba_cb9e,
            0x03f9_7d6e_83d0_50d2,
            0x18f0_2065_5463_8741,
        ]),
        c1: Fp::zero(),
    },
    // k = 5
    Fp2 {
        c0: Fp::zero(),
        c1: Fp::from_raw_unchecked([
            0x30f1_361b_798a_64e8,
            0xf3b8_ddab_7ece_5a2a,
            0x16a8_ca3a_c615_77f7,
            0xc26a_2ff8_74fd_029b,
            0x3636_b766_6070_1c6e,
            0x051b_a4ab_241b_6160,
        ]),
    },
];

/// (u + 1)^((2p^k - 2) / 3) for k = 0..5, multiplies `c2` under the Frobenius.
/// All entries lie in the base field.
const FROBENIUS_COEFF_FP6_C2: [Fp; 6] = [
    // k = 0
    Fp::from_raw_unchecked([
        0x7609_0000_0002_fffd,
        0xebf4_000b_c40c_0002,
        0x5f48_9857_53c7_58ba,
        0x77ce_5853_7052_5745,
        0x5c07_1a97_a256_ec6d,
        0x15f6_5ec3_fa80_e493,
    ]),
    // k = 1
    Fp::from_raw_unchecked([
        0x890d_c9e4_8675_45c3,
        0x2af3_2253_3285_a5d5,
        0x5088_0866_309b_7e2c,
        0xa20d_1b8c_7e88_1024,
        0x14e4_f04f_e2db_9068,
        0x14e5_6d3f_1564_853a,
    ]),
    // k = 2
    Fp::from_raw_unchecked([
        0xcd03_c9e4_8671_f071,
        0x5dab_2246_1fcd_a5d2,
        0x5870_42af_d385_1b95,
        0x8eb6_0ebe_01ba_cb9e,
        0x03f9_7d6e_83d0_50d2,
        0x18f0_2065_5463_8741,
    ]),
    // k = 3
    Fp::from_raw_unchecked([
        0x43f5_ffff_fffc_aaae,
        0x32b7_fff2_ed47_fffd,
        0x07e8_3a49_a2e9_9d69,
        0xeca8_f331_8332_bb7a,
        0xef14_8d1e_a0f4_c069,
        0x040a_b326_3eff_0206,
    ]),
    // k = 4
    Fp::from_raw_unchecked([
        0x30f1_361b_798a_64e8,
        0xf3b8_ddab_7ece_5a2a,
        0x16a8_ca3a_c615_77f7,
        0xc26a_2ff8_74fd_029b,
        0x3636_b766_6070_1c6e,
        0x051b_a4ab_241b_6160,
    ]),
    // k = 5
    Fp::from_raw_unchecked([
        0xecfb_361b_798d_ba3a,
        0xc100_ddb8_9186_5a2c,
        0x0ec0_8ff1_232b_da8e,
        0xd5c1_3cc6_f1ca_4721,
        0x4722_2a47_bf7b_5c04,
        0x0110_f184_e51c_5f59,
    ]),
];

/// Element `c0 + c1 * v + c2 * v^2` of the cubic extension
#[derive(Copy, Clone)]
pub struct Fp6 {
    /// Constant coefficient
    pub c0: Fp2,
    /// Coefficient of `v`
    pub c1: Fp2,
    /// Coefficient of `v^2`
    pub c2: Fp2,
}

impl From<Fp> for Fp6 {
    fn from(f: Fp) -> Fp6 {
        Fp6::from(Fp2::from(f))
    }
}

impl From<Fp2> for Fp6 {
    fn from(f: Fp2) -> Fp6 {
        Fp6 {
            c0: f,
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }
}

impl PartialEq for Fp6 {
    fn eq(&self, other: &Fp6) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fp6 {}

impl Default for Fp6 {
    fn default() -> Self {
        Fp6::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp6 {}

impl fmt::Debug for Fp6 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} + ({:?})*v + ({:?})*v^2", self.c0, self.c1, self.c2)
    }
}

impl ConditionallySelectable for Fp6 {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp6 {
            c0: Fp2::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp2::conditional_select(&a.c1, &b.c1, choice),
            c2: Fp2::conditional_select(&a.c2, &b.c2, choice),
        }
    }
}

impl ConstantTimeEq for Fp6 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}

impl Fp6 {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Self {
        Fp6 {
            c0: Fp2::zero(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Self {
        Fp6 {
            c0: Fp2::one(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    /// Random element
    pub fn random(mut rng: impl RngCore) -> Self {
        Fp6 {
            c0: Fp2::random(&mut rng),
            c1: Fp2::random(&mut rng),
            c2: Fp2::random(&mut rng),
        }
    }

    /// Check if element is zero
    #[inline(always)]
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero() & self.c2.is_zero()
    }

    /// Sparse multiplication by `c1 * v`
    pub fn mul_by_1(&self, c1: &Fp2) -> Fp6 {
        let b_b = self.c1 * c1;

        let t1 = (self.c1 + self.c2) * c1 - b_b;
        let t1 = t1.mul_by_nonresidue();

        let t2 = (self.c0 + self.c1) * c1 - b_b;

        Fp6 {
            c0: t1,
            c1: t2,
            c2: b_b,
        }
    }

    /// Sparse multiplication by `c0 + c1 * v`
    pub fn mul_by_01(&self, c0: &Fp2, c1: &Fp2) -> Fp6 {
        let a_a = self.c0 * c0;
        let b_b = self.c1 * c1;

        let t1 = (self.c1 + self.c2) * c1 - b_b;
        let t1 = t1.mul_by_nonresidue() + a_a;

        let t3 = (self.c0 + self.c2) * c0 - a_a + b_b;

        let t2 = (c0 + c1) * (self.c0 + self.c1) - a_a - b_b;

        Fp6 {
            c0: t1,
            c1: t2,
            c2: t3,
        }
    }

    /// Multiply every coefficient by an `Fp2` element
    pub fn mul_by_fp2(&self, b: &Fp2) -> Fp6 {
        Fp6 {
            c0: self.c0 * b,
            c1: self.c1 * b,
            c2: self.c2 * b,
        }
    }

    /// Multiply by the quadratic non-residue `v`
    pub fn mul_by_nonresidue(&self) -> Self {
        // (a + bv + cv^2)v = cv^3 + av + bv^2 = c(u + 1) + av + bv^2
        Fp6 {
            c0: self.c2.mul_by_nonresidue(),
            c1: self.c0,
            c2: self.c1,
        }
    }

    /// Negate the `v` coefficient
    #[inline]
    pub fn conjugate(&self) -> Self {
        Fp6 {
            c0: self.c0,
            c1: -self.c1,
            c2: self.c2,
        }
    }

    /// Raise to the p^power Frobenius
    #[inline(always)]
    pub fn frobenius_map(&self, power: usize) -> Self {
        let c0 = self.c0.frobenius_map(power);
        let c1 = self.c1.frobenius_map(power) * FROBENIUS_COEFF_FP6_C1[power % 6];
        let c2 = self.c2.frobenius_map(power).mul_by_fp(&FROBENIUS_COEFF_FP6_C2[power % 6]);

        Fp6 { c0, c1, c2 }
    }

    /// Inverse, none for zero
    #[inline]
    pub fn invert(&self) -> CtOption<Self> {
        let c0 = (self.c1 * self.c2).mul_by_nonresidue();
        let c0 = self.c0.square() - c0;

        let c1 = self.c2.square().mul_by_nonresidue();
        let c1 = c1 - (self.c0 * self.c1);

        let c2 = self.c1.square();
        let c2 = c2 - (self.c0 * self.c2);

        let tmp = ((self.c1 * c2) + (self.c2 * c1)).mul_by_nonresidue();
        let tmp = tmp + (self.c0 * c0);

        tmp.invert().map(|t| Fp6 {
            c0: t * c0,
            c1: t * c1,
            c2: t * c2,
        })
    }

    /// Multiply with the reduction strategy selected at compile time
    #[inline]
    pub fn mul(&self, other: &Fp6) -> Fp6 {
        #[cfg(feature = "lazy-reduction")]
        {
            self.mul_lazy(other)
        }
        #[cfg(not(feature = "lazy-reduction"))]
        {
            self.mul_interleaved(other)
        }
    }

    /// Karatsuba multiplication over reduced `Fp2` products
    pub fn mul_interleaved(&self, b: &Fp6) -> Fp6 {
        let v0 = self.c0 * b.c0;
        let v1 = self.c1 * b.c1;
        let v2 = self.c2 * b.c2;

        let c0 = ((self.c1 + self.c2) * (b.c1 + b.c2) - v1 - v2).mul_by_nonresidue() + v0;
        let c1 = (self.c0 + self.c1) * (b.c0 + b.c1) - v0 - v1 + v2.mul_by_nonresidue();
        let c2 = (self.c0 + self.c2) * (b.c0 + b.c2) - v0 - v2 + v1;

        Fp6 { c0, c1, c2 }
    }

    /// Karatsuba multiplication reduced once per base-field coefficient
    pub fn mul_lazy(&self, b: &Fp6) -> Fp6 {
        self.mul_wide(b).reduce()
    }

    /// Unreduced Karatsuba product
    pub fn mul_wide(&self, b: &Fp6) -> Fp6Wide {
        let v0 = self.c0.mul_wide(&b.c0);
        let v1 = self.c1.mul_wide(&b.c1);
        let v2 = self.c2.mul_wide(&b.c2);

        let c0 = ((self.c1 + self.c2).mul_wide(&(b.c1 + b.c2)) - v1 - v2).mul_by_nonresidue() + v0;
        let c1 = (self.c0 + self.c1).mul_wide(&(b.c0 + b.c1)) - v0 - v1 + v2.mul_by_nonresidue();
        let c2 = (self.c0 + self.c2).mul_wide(&(b.c0 + b.c2)) - v0 - v2 + v1;

        Fp6Wide { c0, c1, c2 }
    }

    /// Chung-Hasan squaring (SQR2)
    pub fn square(&self) -> Self {
        let s0 = self.c0.square();
        let ab = self.c0 * self.c1;
        let s1 = ab + ab;
        let s2 = (self.c0 - self.c1 + self.c2).square();
        let bc = self.c1 * self.c2;
        let s3 = bc + bc;
        let s4 = self.c2.square();

        Fp6 {
            c0: s3.mul_by_nonresidue() + s0,
            c1: s4.mul_by_nonresidue() + s1,
            c2: s1 + s2 + s3 - s0 - s4,
        }
    }

    /// Variable-time exponentiation by a little-endian limb exponent
    pub fn pow_vartime(&self, by: &[u64]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((*e >> i) & 1) == 1 {
                    res *= self;
                }
            }
        }
        res
    }

    /// Decode `c2 || c1 || c0`
    pub fn from_bytes(bytes: &[u8; 288]) -> CtOption<Fp6> {
        let coeff = |i: usize| {
            let mut tmp = [0u8; 96];
            tmp.copy_from_slice(&bytes[i * 96..(i + 1) * 96]);
            Fp2::from_bytes(&tmp)
        };

        coeff(0).and_then(|c2| coeff(1).and_then(|c1| coeff(2).map(|c0| Fp6 { c0, c1, c2 })))
    }

    /// Encode as `c2 || c1 || c0`
    pub fn to_bytes(&self) -> [u8; 288] {
        let mut res = [0u8; 288];
        res[0..96].copy_from_slice(&self.c2.to_bytes());
        res[96..192].copy_from_slice(&self.c1.to_bytes());
        res[192..288].copy_from_slice(&self.c0.to_bytes());
        res
    }
}

/// Unreduced `Fp6` value with widened coefficients
#[derive(Copy, Clone, Debug)]
pub struct Fp6Wide {
    /// Constant coefficient
    pub c0: Fp2Wide,
    /// Coefficient of `v`
    pub c1: Fp2Wide,
    /// Coefficient of `v^2`
    pub c2: Fp2Wide,
}

impl Fp6Wide {
    /// Sum of two accumulators
    #[inline]
    pub fn add(&self, rhs: &Fp6Wide) -> Fp6Wide {
        Fp6Wide {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
            c2: self.c2 + rhs.c2,
        }
    }

    /// Difference of two accumulators
    #[inline]
    pub fn sub(&self, rhs: &Fp6Wide) -> Fp6Wide {
        Fp6Wide {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
            c2: self.c2 - rhs.c2,
        }
    }

    /// Multiply by `v` without reducing
    #[inline]
    pub fn mul_by_nonresidue(&self) -> Fp6Wide {
        Fp6Wide {
            c0: self.c2.mul_by_nonresidue(),
            c1: self.c0,
            c2: self.c1,
        }
    }

    /// Reduce every coefficient
    #[inline]
    pub fn reduce(&self) -> Fp6 {
        Fp6 {
            c0: self.c0.reduce(),
            c1: self.c1.reduce(),
            c2: self.c2.reduce(),
        }
    }
}

impl<'a, 'b> Add<&'b Fp6Wide> for &'a Fp6Wide {
    type Output = Fp6Wide;
    #[inline]
    fn add(self, rhs: &'b Fp6Wide) -> Fp6Wide {
        Fp6Wide::add(self, rhs)
    }
}

impl<'a, 'b> Sub<&'b Fp6Wide> for &'a Fp6Wide {
    type Output = Fp6Wide;
    #[inline]
    fn sub(self, rhs: &'b Fp6Wide) -> Fp6Wide {
        Fp6Wide::sub(self, rhs)
    }
}

impl_binops_additive!(Fp6Wide, Fp6Wide);

impl<'a, 'b> Mul<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn mul(self, other: &'b Fp6) -> Self::Output {
        Fp6::mul(self, other)
    }
}

impl<'a, 'b> Add<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn add(self, rhs: &'b Fp6) -> Self::Output {
        Fp6 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
            c2: self.c2 + rhs.c2,
        }
    }
}

impl<'a> Neg for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn neg(self) -> Self::Output {
        Fp6 {
            c0: -self.c0,
            c1: -self.c1,
            c2: -self.c2,
        }
    }
}

impl_neg_by_value!(Fp6);

impl<'a, 'b> Sub<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn sub(self, rhs: &'b Fp6) -> Self::Output {
        Fp6 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
            c2: self.c2 - rhs.c2,
        }
    }
}

impl_binops_additive!(Fp6, Fp6);
impl_binops_multiplicative!(Fp6, Fp6);

impl Fp6 {
    /// Twice this element
    #[inline]
    pub fn double(&self) -> Fp6 {
        self + self
    }
}
