//! Target field `Fp12 = Fp6[w] / (w^2 - v)`.

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use super::fp2::Fp2;
use super::fp6::Fp6;

/// (u + 1)^((p^k - 1) / 6) for k = 0..11
const FROBENIUS_COEFF_FP12_C1: [Fp2; 12] = [
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
        c0: Fp::from_raw_unchecked([
            0x0708_9552_b319_d465,
            0xc669_5f92_b50a_8313,
            0x97e8_3ccc_d117_228f,
            0xa35b_aeca_b2dc_29ee,
            0x1ce3_93ea_5daa_ce4d,
            0x08f2_220f_b0fb_66eb,
        ]),
        c1: Fp::from_raw_unchecked([
            0xb2f6_6aad_4ce5_d646,
            0x5842_a06b_fc49_7cec,
            0xcf48_95d4_2599_d394,
            0xc11b_9cba_40a8_e8d0,
            0x2e38_13cb_e5a0_de89,
            0x110e_efda_8884_7faf,
        ]),
    },
    // k = 2
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0xecfb_361b_798d_ba3a,
            0xc100_ddb8_9186_5a2c,
            0x0ec0_8ff1_232b_da8e,
            0xd5c1_3cc6_f1ca_4721,
            0x4722_2a47_bf7b_5c04,
            0x0110_f184_e51c_5f59,
        ]),
        c1: Fp::zero(),
    },
    // k = 3
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x3e2f_585d_a55c_9ad1,
            0x4294_213d_86c1_8183,
            0x3828_44c8_8b62_3732,
            0x92ad_2afd_1910_3e18,
            0x1d79_4e4f_ac7c_f0b9,
            0x0bd5_92fc_7d82_5ec8,
        ]),
        c1: Fp::from_raw_unchecked([
            0x7bcf_a7a2_5aa3_0fda,
            0xdc17_dec1_2a92_7e7c,
            0x2f08_8dd8_6b4e_bef1,
            0xd1ca_2087_da74_d4a7,
            0x2da2_5966_96ce_bc1d,
            0x0e2b_7eed_bbfd_87d2,
        ]),
    },
    // k = 4
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
    // k = 5
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x3726_c30a_f242_c66c,
            0x7c2a_c1aa_d1b6_fe70,
            0xa040_07fb_ba4b_14a2,
            0xef51_7c32_6634_1429,
            0x0095_ba65_4ed2_226b,
            0x02e3_70ec_cc86_f7dd,
        ]),
        c1: Fp::from_raw_unchecked([
            0x82d8_3cf5_0dbc_e43f,
            0xa281_3e53_df9d_018f,
            0xc6f0_caa5_3c65_e181,
            0x7525_cf52_8d50_fe95,
            0x4a85_ed50_f479_8a6b,
            0x171d_a0fd_6cf8_eebd,
        ]),
    },
    // k = 6
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x43f5_ffff_fffc_aaae,
            0x32b7_fff2_ed47_fffd,
            0x07e8_3a49_a2e9_9d69,
            0xeca8_f331_8332_bb7a,
            0xef14_8d1e_a0f4_c069,
            0x040a_b326_3eff_0206,
        ]),
        c1: Fp::zero(),
    },
    // k = 7
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0xb2f6_6aad_4ce5_d646,
            0x5842_a06b_fc49_7cec,
            0xcf48_95d4_2599_d394,
            0xc11b_9cba_40a8_e8d0,
            0x2e38_13cb_e5a0_de89,
            0x110e_efda_8884_7faf,
        ]),
        c1: Fp::from_raw_unchecked([
            0x0708_9552_b319_d465,
            0xc669_5f92_b50a_8313,
            0x97e8_3ccc_d117_228f,
            0xa35b_aeca_b2dc_29ee,
            0x1ce3_93ea_5daa_ce4d,
            0x08f2_220f_b0fb_66eb,
        ]),
    },
    // k = 8
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
    // k = 9
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x7bcf_a7a2_5aa3_0fda,
            0xdc17_dec1_2a92_7e7c,
            0x2f08_8dd8_6b4e_bef1,
            0xd1ca_2087_da74_d4a7,
            0x2da2_5966_96ce_bc1d,
            0x0e2b_7eed_bbfd_87d2,
        ]),
        c1: Fp::from_raw_unchecked([
            0x3e2f_585d_a55c_9ad1,
            0x4294_213d_86c1_8183,
            0x3828_44c8_8b62_3732,
            0x92ad_2afd_1910_3e18,
            0x1d79_4e4f_ac7c_f0b9,
            0x0bd5_92fc_7d82_5ec8,
        ]),
    },
    // k = 10
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x890d_c9e4_8675_45c3,
            0x2af3_2253_3285_a5d5,
            0x5088_0866_309b_7e2c,
            0xa20d_1b8c_7e88_1024,
            0x14e4_f04f_e2db_9068,
            0x14e5_6d3f_1564_853a,
        ]),
        c1: Fp::zero(),
    },
    // k = 11
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x82d8_3cf5_0dbc_e43f,
            0xa281_3e53_df9d_018f,
            0xc6f0_caa5_3c65_e181,
            0x7525_cf52_8d50_fe95,
            0x4a85_ed50_f479_8a6b,
            0x171d_a0fd_6cf8_eebd,
        ]),
        c1: Fp::from_raw_unchecked([
            0x3726_c30a_f242_c66c,
            0x7c2a_c1aa_d1b6_fe70,
            0xa040_07fb_ba4b_14a2,
            0xef51_7c32_6634_1429,
            0x0095_ba65_4ed2_226b,
            0x02e3_70ec_cc86_f7dd,
        ]),
    },
];

/// Element `c0 + c1 * w` of the degree-12 extension.
///
/// Pairing values live in the order-r subgroup of its multiplicative group,
/// where the cyclotomic squaring and exponentiation below are valid.
#[derive(Copy, Clone)]
pub struct Fp12 {
    /// Constant coefficient
    pub c0: Fp6,
    /// Coefficient of `w`
    pub c1: Fp6,
}

impl From<Fp> for Fp12 {
    fn from(f: Fp) -> Fp12 {
        Fp12::from(Fp6::from(f))
    }
}

impl From<Fp2> for Fp12 {
    fn from(f: Fp2) -> Fp12 {
        Fp12::from(Fp6::from(f))
    }
}

impl From<Fp6> for Fp12 {
    fn from(f: Fp6) -> Fp12 {
        Fp12 {
            c0: f,
            c1: Fp6::zero(),
        }
    }
}

impl PartialEq for Fp12 {
    fn eq(&self, other: &Fp12) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Fp12 {}

impl Default for Fp12 {
    fn default() -> Self {
        Fp12::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp12 {}

impl fmt::Debug for Fp12 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} + ({:?})*w", self.c0, self.c1)
    }
}

impl ConditionallySelectable for Fp12 {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp12 {
            c0: Fp6::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp6::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl ConstantTimeEq for Fp12 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

/// Square of `a + b * s` in `Fp4 = Fp2[s] / (s^2 - (u + 1))`
#[inline(always)]
fn fp4_square(a: Fp2, b: Fp2) -> (Fp2, Fp2) {
    let ab = a * b;
    let t = (a + b) * (b.mul_by_nonresidue() + a) - ab;

    (t - ab.mul_by_nonresidue(), ab.double())
}

impl Fp12 {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Self {
        Fp12 {
            c0: Fp6::zero(),
            c1: Fp6::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Self {
        Fp12 {
            c0: Fp6::one(),
            c1: Fp6::zero(),
        }
    }

    /// Random element
    pub fn random(mut rng: impl RngCore) -> Self {
        Fp12 {
            c0: Fp6::random(&mut rng),
            c1: Fp6::random(&mut rng),
        }
    }

    /// Check if element is zero
    #[inline(always)]
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Check if element is one
    #[inline(always)]
    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Fp12::one())
    }

    /// Sparse multiplication by a line `c0 + c1 * v + c4 * v * w`
    pub fn mul_by_014(&self, c0: &Fp2, c1: &Fp2, c4: &Fp2) -> Fp12 {
        let aa = self.c0.mul_by_01(c0, c1);
        let bb = self.c1.mul_by_1(c4);
        let o = c1 + c4;
        let c1 = (self.c1 + self.c0).mul_by_01(c0, &o) - aa - bb;
        let c0 = bb.mul_by_nonresidue() + aa;

        Fp12 { c0, c1 }
    }

    /// Sparse multiplication by a line `c0 + c3 * w + c4 * v * w`
    pub fn mul_by_034(&self, c0: &Fp2, c3: &Fp2, c4: &Fp2) -> Fp12 {
        let aa = self.c0.mul_by_fp2(c0);
        let bb = self.c1.mul_by_01(c3, c4);
        let o = c0 + c3;
        let c1 = (self.c1 + self.c0).mul_by_01(&o, c4) - aa - bb;
        let c0 = bb.mul_by_nonresidue() + aa;

        Fp12 { c0, c1 }
    }

    /// `c0 - c1 * w`, the inverse on the cyclotomic subgroup
    #[inline(always)]
    pub fn conjugate(&self) -> Self {
        Fp12 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Raise to the p^power Frobenius
    #[inline(always)]
    pub fn frobenius_map(&self, power: usize) -> Self {
        let c0 = self.c0.frobenius_map(power);
        let c1 = self
            .c1
            .frobenius_map(power)
            .mul_by_fp2(&FROBENIUS_COEFF_FP12_C1[power % 12]);

        Fp12 { c0, c1 }
    }

    /// Multiply with the reduction strategy selected at compile time
    #[inline]
    pub fn mul(&self, other: &Fp12) -> Fp12 {
        #[cfg(feature = "lazy-reduction")]
        {
            self.mul_lazy(other)
        }
        #[cfg(not(feature = "lazy-reduction"))]
        {
            self.mul_interleaved(other)
        }
    }

    /// Karatsuba over reduced `Fp6` products
    pub fn mul_interleaved(&self, other: &Fp12) -> Fp12 {
        let aa = self.c0 * other.c0;
        let bb = self.c1 * other.c1;
        let c1 = (self.c0 + self.c1) * (other.c0 + other.c1) - aa - bb;
        let c0 = bb.mul_by_nonresidue() + aa;

        Fp12 { c0, c1 }
    }

    /// Karatsuba with the three `Fp6` products kept wide until the end
    pub fn mul_lazy(&self, other: &Fp12) -> Fp12 {
        let aa = self.c0.mul_wide(&other.c0);
        let bb = self.c1.mul_wide(&other.c1);
        let cc = (self.c0 + self.c1).mul_wide(&(other.c0 + other.c1));

        Fp12 {
            c0: (bb.mul_by_nonresidue() + aa).reduce(),
            c1: (cc - (aa + bb)).reduce(),
        }
    }

    /// Generic squaring
    pub fn square(&self) -> Self {
        let ab = self.c0 * self.c1;
        let c0c1 = self.c0 + self.c1;
        let c0 = self.c1.mul_by_nonresidue() + self.c0;
        let c0 = c0 * c0c1 - ab - ab.mul_by_nonresidue();

        Fp12 {
            c0,
            c1: ab.double(),
        }
    }

    /// Granger-Scott squaring, valid only on the cyclotomic subgroup
    pub fn cyclotomic_square(&self) -> Self {
        let (t3, t4) = fp4_square(self.c0.c0, self.c1.c1);
        let z0 = (t3 - self.c0.c0).double() + t3;
        let z4 = (t4 + self.c1.c1).double() + t4;

        let (t3, t4) = fp4_square(self.c1.c0, self.c0.c2);
        let (t5, t6) = fp4_square(self.c0.c1, self.c1.c2);

        let z1 = (t3 - self.c0.c1).double() + t3;
        let z5 = (t4 + self.c1.c2).double() + t4;

        let t3 = t6.mul_by_nonresidue();
        let z3 = (t3 + self.c1.c0).double() + t3;
        let z2 = (t5 - self.c0.c2).double() + t5;

        Fp12 {
            c0: Fp6 {
                c0: z0,
                c1: z1,
                c2: z2,
            },
            c1: Fp6 {
                c0: z3,
                c1: z4,
                c2: z5,
            },
        }
    }

    /// Square-and-multiply using cyclotomic squarings; variable time in `by`
    pub fn cyclotomic_exp(&self, by: u64) -> Self {
        let mut res = Fp12::one();
        if by == 0 {
            return res;
        }
        let bits = 64 - by.leading_zeros();
        for i in (0..bits).rev() {
            res = res.cyclotomic_square();
            if (by >> i) & 1 == 1 {
                res *= self;
            }
        }
        res
    }

    /// Inverse, none for zero
    pub fn invert(&self) -> CtOption<Self> {
        (self.c0.square() - self.c1.square().mul_by_nonresidue())
            .invert()
            .map(|t| Fp12 {
                c0: self.c0 * t,
                c1: self.c1 * -t,
            })
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

    /// Decode `c1 || c0`
    pub fn from_bytes(bytes: &[u8; 576]) -> CtOption<Fp12> {
        let mut c1 = [0u8; 288];
        let mut c0 = [0u8; 288];
        c1.copy_from_slice(&bytes[0..288]);
        c0.copy_from_slice(&bytes[288..576]);

        Fp6::from_bytes(&c1).and_then(|c1| Fp6::from_bytes(&c0).map(|c0| Fp12 { c0, c1 }))
    }

    /// Encode as `c1 || c0`
    pub fn to_bytes(&self) -> [u8; 576] {
        let mut res = [0u8; 576];
        res[0..288].copy_from_slice(&self.c1.to_bytes());
        res[288..576].copy_from_slice(&self.c0.to_bytes());
        res
    }
}

impl<'a, 'b> Mul<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn mul(self, other: &'b Fp12) -> Self::Output {
        Fp12::mul(self, other)
    }
}

impl<'a, 'b> Add<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn add(self, rhs: &'b Fp12) -> Self::Output {
        Fp12 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }
}

impl<'a> Neg for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn neg(self) -> Self::Output {
        Fp12 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }
}

impl_neg_by_value!(Fp12);

impl<'a, 'b> Sub<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn sub(self, rhs: &'b Fp12) -> Self::Output {
        Fp12 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }
}

impl_binops_additive!(Fp12, Fp12);
impl_binops_multiplicative!(Fp12, Fp12);
