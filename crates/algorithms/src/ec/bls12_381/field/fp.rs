//! BLS12-381 base field `GF(p)` where p = 0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use byteorder::{BigEndian, ByteOrder};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::super::arith::{
    adc, add_assign_limbs, gt_limbs, mac, sbb, shl1_limbs, shr1_limbs, sub_assign_limbs,
};

// ============================================================================
// Field Constants
// ============================================================================

/// Field modulus p
pub(crate) const MODULUS: [u64; 6] = [
    0xb9fe_ffff_ffff_aaab,
    0x1eab_fffe_b153_ffff,
    0x6730_d2a0_f6b0_f624,
    0x6477_4b84_f385_12bf,
    0x4b1b_a7b6_434b_acd7,
    0x1a01_11ea_397f_e69a,
];

/// Montgomery parameter INV = -(p^{-1} mod 2^64) mod 2^64
const INV: u64 = 0x89f3_fffc_fffc_fffd;

/// Montgomery R = 2^384 mod p
const R: Fp = Fp([
    0x7609_0000_0002_fffd,
    0xebf4_000b_c40c_0002,
    0x5f48_9857_53c7_58ba,
    0x77ce_5853_7052_5745,
    0x5c07_1a97_a256_ec6d,
    0x15f6_5ec3_fa80_e493,
]);

/// Montgomery R^2 = 2^768 mod p
const R2: Fp = Fp([
    0xf4df_1f34_1c34_1746,
    0x0a76_e6a6_09d1_04f1,
    0x8de5_476c_4c95_b6d5,
    0x67eb_88a9_939d_83c0,
    0x9a79_3e85_b519_952d,
    0x1198_8fe5_92ca_e3aa,
]);

/// Montgomery R^3 = 2^1152 mod p
const R3: Fp = Fp([
    0xed48_ac6b_d94c_a1e0,
    0x315f_831e_03a7_adf8,
    0x9a53_352a_615e_29dd,
    0x34c0_4e5e_921e_1761,
    0x2512_d435_6572_4728,
    0x0aa6_3460_9175_5d4d,
]);

/// 2^256 in Montgomery form, used to fold the high half of a 512-bit input
const TWO_POW_256: Fp = Fp([
    0x075b_3cd7_c5ce_820f,
    0x3ec6_ba62_1c3e_db0b,
    0x168a_13d8_2bff_6bce,
    0x8766_3c4b_f8c4_49d2,
    0x15f3_4c83_ddc8_d830,
    0x0f96_28b4_9caa_2e85,
]);

/// (p + 1) / 4
const P_PLUS_1_OVER_4: [u64; 6] = [
    0xee7f_bfff_ffff_eaab,
    0x07aa_ffff_ac54_ffff,
    0xd9cc_34a8_3dac_3d89,
    0xd91d_d2e1_3ce1_44af,
    0x92c6_e9ed_90d2_eb35,
    0x0680_447a_8e5f_f9a6,
];

/// (p - 1) / 2
pub(crate) const P_MINUS_1_OVER_2: [u64; 6] = [
    0xdcff_7fff_ffff_d555,
    0x0f55_ffff_58a9_ffff,
    0xb398_6950_7b58_7b12,
    0xb23b_a5c2_79c2_895f,
    0x258d_d3db_21a5_d66b,
    0x0d00_88f5_1cbf_f34d,
];

/// (p - 3) / 4
pub(crate) const P_MINUS_3_OVER_4: [u64; 6] = [
    0xee7f_bfff_ffff_eaaa,
    0x07aa_ffff_ac54_ffff,
    0xd9cc_34a8_3dac_3d89,
    0xd91d_d2e1_3ce1_44af,
    0x92c6_e9ed_90d2_eb35,
    0x0680_447a_8e5f_f9a6,
];

/// Iteration cap for the binary inversion, 2 * 384
const INVERSE_MAX_ITERATIONS: usize = 768;

/// Smallest admissible almost-inverse exponent, the bit length of p
const INVERSE_MIN_K: usize = 381;

// ============================================================================
// Field Element Type
// ============================================================================

/// Element in Montgomery form: Fp(a) = aR mod p, with R = 2^384
#[derive(Copy, Clone)]
pub struct Fp(pub(crate) [u64; 6]);

impl Fp {
    /// Performs modular reduction after addition
    #[inline]
    const fn subtract_p(&self) -> Fp {
        let (r0, borrow) = sbb(self.0[0], MODULUS[0], 0);
        let (r1, borrow) = sbb(self.0[1], MODULUS[1], borrow);
        let (r2, borrow) = sbb(self.0[2], MODULUS[2], borrow);
        let (r3, borrow) = sbb(self.0[3], MODULUS[3], borrow);
        let (r4, borrow) = sbb(self.0[4], MODULUS[4], borrow);
        let (r5, borrow) = sbb(self.0[5], MODULUS[5], borrow);

        // Use borrow as mask for conditional select
        let r0 = (self.0[0] & borrow) | (r0 & !borrow);
        let r1 = (self.0[1] & borrow) | (r1 & !borrow);
        let r2 = (self.0[2] & borrow) | (r2 & !borrow);
        let r3 = (self.0[3] & borrow) | (r3 & !borrow);
        let r4 = (self.0[4] & borrow) | (r4 & !borrow);
        let r5 = (self.0[5] & borrow) | (r5 & !borrow);

        Fp([r0, r1, r2, r3, r4, r5])
    }

    /// Schoolbook 6x6 limb product, unreduced
    #[inline]
    const fn multiply_impl(&self, rhs: &Fp) -> [u64; 12] {
        let (t0, carry) = mac(0, self.0[0], rhs.0[0], 0);
        let (t1, carry) = mac(0, self.0[0], rhs.0[1], carry);
        let (t2, carry) = mac(0, self.0[0], rhs.0[2], carry);
        let (t3, carry) = mac(0, self.0[0], rhs.0[3], carry);
        let (t4, carry) = mac(0, self.0[0], rhs.0[4], carry);
        let (t5, t6) = mac(0, self.0[0], rhs.0[5], carry);

        let (t1, carry) = mac(t1, self.0[1], rhs.0[0], 0);
        let (t2, carry) = mac(t2, self.0[1], rhs.0[1], carry);
        let (t3, carry) = mac(t3, self.0[1], rhs.0[2], carry);
        let (t4, carry) = mac(t4, self.0[1], rhs.0[3], carry);
        let (t5, carry) = mac(t5, self.0[1], rhs.0[4], carry);
        let (t6, t7) = mac(t6, self.0[1], rhs.0[5], carry);

        let (t2, carry) = mac(t2, self.0[2], rhs.0[0], 0);
        let (t3, carry) = mac(t3, self.0[2], rhs.0[1], carry);
        let (t4, carry) = mac(t4, self.0[2], rhs.0[2], carry);
        let (t5, carry) = mac(t5, self.0[2], rhs.0[3], carry);
        let (t6, carry) = mac(t6, self.0[2], rhs.0[4], carry);
        let (t7, t8) = mac(t7, self.0[2], rhs.0[5], carry);

        let (t3, carry) = mac(t3, self.0[3], rhs.0[0], 0);
        let (t4, carry) = mac(t4, self.0[3], rhs.0[1], carry);
        let (t5, carry) = mac(t5, self.0[3], rhs.0[2], carry);
        let (t6, carry) = mac(t6, self.0[3], rhs.0[3], carry);
        let (t7, carry) = mac(t7, self.0[3], rhs.0[4], carry);
        let (t8, t9) = mac(t8, self.0[3], rhs.0[5], carry);

        let (t4, carry) = mac(t4, self.0[4], rhs.0[0], 0);
        let (t5, carry) = mac(t5, self.0[4], rhs.0[1], carry);
        let (t6, carry) = mac(t6, self.0[4], rhs.0[2], carry);
        let (t7, carry) = mac(t7, self.0[4], rhs.0[3], carry);
        let (t8, carry) = mac(t8, self.0[4], rhs.0[4], carry);
        let (t9, t10) = mac(t9, self.0[4], rhs.0[5], carry);

        let (t5, carry) = mac(t5, self.0[5], rhs.0[0], 0);
        let (t6, carry) = mac(t6, self.0[5], rhs.0[1], carry);
        let (t7, carry) = mac(t7, self.0[5], rhs.0[2], carry);
        let (t8, carry) = mac(t8, self.0[5], rhs.0[3], carry);
        let (t9, carry) = mac(t9, self.0[5], rhs.0[4], carry);
        let (t10, t11) = mac(t10, self.0[5], rhs.0[5], carry);

        [t0, t1, t2, t3, t4, t5, t6, t7, t8, t9, t10, t11]
    }

    /// Dedicated squaring: cross products once, doubled, plus the diagonal
    #[inline]
    const fn square_impl(&self) -> [u64; 12] {
        let (t1, carry) = mac(0, self.0[0], self.0[1], 0);
        let (t2, carry) = mac(0, self.0[0], self.0[2], carry);
        let (t3, carry) = mac(0, self.0[0], self.0[3], carry);
        let (t4, carry) = mac(0, self.0[0], self.0[4], carry);
        let (t5, t6) = mac(0, self.0[0], self.0[5], carry);

        let (t3, carry) = mac(t3, self.0[1], self.0[2], 0);
        let (t4, carry) = mac(t4, self.0[1], self.0[3], carry);
        let (t5, carry) = mac(t5, self.0[1], self.0[4], carry);
        let (t6, t7) = mac(t6, self.0[1], self.0[5], carry);

        let (t5, carry) = mac(t5, self.0[2], self.0[3], 0);
        let (t6, carry) = mac(t6, self.0[2], self.0[4], carry);
        let (t7, t8) = mac(t7, self.0[2], self.0[5], carry);

        let (t7, carry) = mac(t7, self.0[3], self.0[4], 0);
        let (t8, t9) = mac(t8, self.0[3], self.0[5], carry);

        let (t9, t10) = mac(t9, self.0[4], self.0[5], 0);

        let t11 = t10 >> 63;
        let t10 = (t10 << 1) | (t9 >> 63);
        let t9 = (t9 << 1) | (t8 >> 63);
        let t8 = (t8 << 1) | (t7 >> 63);
        let t7 = (t7 << 1) | (t6 >> 63);
        let t6 = (t6 << 1) | (t5 >> 63);
        let t5 = (t5 << 1) | (t4 >> 63);
        let t4 = (t4 << 1) | (t3 >> 63);
        let t3 = (t3 << 1) | (t2 >> 63);
        let t2 = (t2 << 1) | (t1 >> 63);
        let t1 = t1 << 1;

        let (t0, carry) = mac(0, self.0[0], self.0[0], 0);
        let (t1, carry) = adc(t1, 0, carry);
        let (t2, carry) = mac(t2, self.0[1], self.0[1], carry);
        let (t3, carry) = adc(t3, 0, carry);
        let (t4, carry) = mac(t4, self.0[2], self.0[2], carry);
        let (t5, carry) = adc(t5, 0, carry);
        let (t6, carry) = mac(t6, self.0[3], self.0[3], carry);
        let (t7, carry) = adc(t7, 0, carry);
        let (t8, carry) = mac(t8, self.0[4], self.0[4], carry);
        let (t9, carry) = adc(t9, 0, carry);
        let (t10, carry) = mac(t10, self.0[5], self.0[5], carry);
        let (t11, _) = adc(t11, 0, carry);

        [t0, t1, t2, t3, t4, t5, t6, t7, t8, t9, t10, t11]
    }

    /// Check if the canonical value is greater than (p-1)/2
    fn is_lexicographically_largest(&self) -> bool {
        let tmp = self.from_montgomery();

        // tmp >= (p+1)/2
        let (_, borrow) = sbb(tmp[0], 0xdcff_7fff_ffff_d556, 0);
        let (_, borrow) = sbb(tmp[1], 0x0f55_ffff_58a9_ffff, borrow);
        let (_, borrow) = sbb(tmp[2], 0xb398_6950_7b58_7b12, borrow);
        let (_, borrow) = sbb(tmp[3], 0xb23b_a5c2_79c2_895f, borrow);
        let (_, borrow) = sbb(tmp[4], 0x258d_d3db_21a5_d66b, borrow);
        let (_, borrow) = sbb(tmp[5], 0x0d00_88f5_1cbf_f34d, borrow);

        borrow == 0
    }
}

// ============================================================================
// Core Field Operations
// ============================================================================

impl Fp {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Fp {
        Fp([0, 0, 0, 0, 0, 0])
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp {
        R
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Fp::zero())
    }

    /// Check if element is one
    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Fp::one())
    }

    /// Wrap limbs that are already in Montgomery form
    pub const fn from_raw_unchecked(v: [u64; 6]) -> Fp {
        Fp(v)
    }

    /// Convert canonical little-endian limbs into Montgomery form
    pub const fn to_montgomery(limbs: &[u64; 6]) -> Fp {
        Fp::mul(&Fp(*limbs), &R2)
    }

    /// Canonical little-endian limbs of this element
    pub const fn from_montgomery(&self) -> [u64; 6] {
        Fp::montgomery_reduce(&[
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5], 0, 0, 0, 0, 0, 0,
        ])
        .0
    }

    /// Add two field elements
    #[inline]
    pub const fn add(&self, rhs: &Fp) -> Fp {
        let (d0, carry) = adc(self.0[0], rhs.0[0], 0);
        let (d1, carry) = adc(self.0[1], rhs.0[1], carry);
        let (d2, carry) = adc(self.0[2], rhs.0[2], carry);
        let (d3, carry) = adc(self.0[3], rhs.0[3], carry);
        let (d4, carry) = adc(self.0[4], rhs.0[4], carry);
        let (d5, _) = adc(self.0[5], rhs.0[5], carry);

        (&Fp([d0, d1, d2, d3, d4, d5])).subtract_p()
    }

    /// Double a field element
    #[inline]
    pub const fn double(&self) -> Fp {
        self.add(self)
    }

    /// Subtract two field elements
    #[inline]
    pub const fn sub(&self, rhs: &Fp) -> Fp {
        (&rhs.neg()).add(self)
    }

    /// Negate a field element
    #[inline]
    pub const fn neg(&self) -> Fp {
        let (d0, borrow) = sbb(MODULUS[0], self.0[0], 0);
        let (d1, borrow) = sbb(MODULUS[1], self.0[1], borrow);
        let (d2, borrow) = sbb(MODULUS[2], self.0[2], borrow);
        let (d3, borrow) = sbb(MODULUS[3], self.0[3], borrow);
        let (d4, borrow) = sbb(MODULUS[4], self.0[4], borrow);
        let (d5, _) = sbb(MODULUS[5], self.0[5], borrow);

        // Mask if zero
        let mask = (((self.0[0] | self.0[1] | self.0[2] | self.0[3] | self.0[4] | self.0[5]) == 0)
            as u64)
            .wrapping_sub(1);

        Fp([
            d0 & mask,
            d1 & mask,
            d2 & mask,
            d3 & mask,
            d4 & mask,
            d5 & mask,
        ])
    }

    /// Multiply two field elements
    #[inline]
    pub const fn mul(&self, rhs: &Fp) -> Fp {
        Self::montgomery_reduce(&self.multiply_impl(rhs))
    }

    /// Square this element
    #[inline]
    pub const fn square(&self) -> Self {
        Self::montgomery_reduce(&self.square_impl())
    }

    /// Unreduced product, reduced later with [`FpWide::reduce`]
    #[inline]
    pub const fn mul_wide(&self, rhs: &Fp) -> FpWide {
        FpWide(self.multiply_impl(rhs))
    }

    /// Unreduced square, reduced later with [`FpWide::reduce`]
    #[inline]
    pub const fn square_wide(&self) -> FpWide {
        FpWide(self.square_impl())
    }

    /// Sum of products using interleaved multiplication and reduction
    #[inline]
    pub(crate) fn sum_of_products<const T: usize>(a: [Fp; T], b: [Fp; T]) -> Fp {
        let (u0, u1, u2, u3, u4, u5) =
            (0..6).fold((0, 0, 0, 0, 0, 0), |(u0, u1, u2, u3, u4, u5), j| {
                // Accumulate products for digit j
                let (t0, t1, t2, t3, t4, t5, t6) = (0..T).fold(
                    (u0, u1, u2, u3, u4, u5, 0),
                    |(t0, t1, t2, t3, t4, t5, t6), i| {
                        let (t0, carry) = mac(t0, a[i].0[j], b[i].0[0], 0);
                        let (t1, carry) = mac(t1, a[i].0[j], b[i].0[1], carry);
                        let (t2, carry) = mac(t2, a[i].0[j], b[i].0[2], carry);
                        let (t3, carry) = mac(t3, a[i].0[j], b[i].0[3], carry);
                        let (t4, carry) = mac(t4, a[i].0[j], b[i].0[4], carry);
                        let (t5, carry) = mac(t5, a[i].0[j], b[i].0[5], carry);
                        let (t6, _) = adc(t6, 0, carry);

                        (t0, t1, t2, t3, t4, t5, t6)
                    },
                );

                let k = t0.wrapping_mul(INV);
                let (_, carry) = mac(t0, k, MODULUS[0], 0);
                let (r1, carry) = mac(t1, k, MODULUS[1], carry);
                let (r2, carry) = mac(t2, k, MODULUS[2], carry);
                let (r3, carry) = mac(t3, k, MODULUS[3], carry);
                let (r4, carry) = mac(t4, k, MODULUS[4], carry);
                let (r5, carry) = mac(t5, k, MODULUS[5], carry);
                let (r6, _) = adc(t6, 0, carry);

                (r1, r2, r3, r4, r5, r6)
            });

        (&Fp([u0, u1, u2, u3, u4, u5])).subtract_p()
    }

    /// Montgomery reduction (REDC) of a 768-bit value `t < p * 2^384`
    #[inline(always)]
    pub(crate) const fn montgomery_reduce(t: &[u64; 12]) -> Self {
        // Round 1
        let k = t[0].wrapping_mul(INV);
        let (_, carry) = mac(t[0], k, MODULUS[0], 0);
        let (r1, carry) = mac(t[1], k, MODULUS[1], carry);
        let (r2, carry) = mac(t[2], k, MODULUS[2], carry);
        let (r3, carry) = mac(t[3], k, MODULUS[3], carry);
        let (r4, carry) = mac(t[4], k, MODULUS[4], carry);
        let (r5, carry) = mac(t[5], k, MODULUS[5], carry);
        let (r6, r7) = adc(t[6], 0, carry);

        // Round 2
        let k = r1.wrapping_mul(INV);
        let (_, carry) = mac(r1, k, MODULUS[0], 0);
        let (r2, carry) = mac(r2, k, MODULUS[1], carry);
        let (r3, carry) = mac(r3, k, MODULUS[2], carry);
        let (r4, carry) = mac(r4, k, MODULUS[3], carry);
        let (r5, carry) = mac(r5, k, MODULUS[4], carry);
        let (r6, carry) = mac(r6, k, MODULUS[5], carry);
        let (r7, r8) = adc(t[7], r7, carry);

        // Round 3
        let k = r2.wrapping_mul(INV);
        let (_, carry) = mac(r2, k, MODULUS[0], 0);
        let (r3, carry) = mac(r3, k, MODULUS[1], carry);
        let (r4, carry) = mac(r4, k, MODULUS[2], carry);
        let (r5, carry) = mac(r5, k, MODULUS[3], carry);
        let (r6, carry) = mac(r6, k, MODULUS[4], carry);
        let (r7, carry) = mac(r7, k, MODULUS[5], carry);
        let (r8, r9) = adc(t[8], r8, carry);

        // Round 4
        let k = r3.wrapping_mul(INV);
        let (_, carry) = mac(r3, k, MODULUS[0], 0);
        let (r4, carry) = mac(r4, k, MODULUS[1], carry);
        let (r5, carry) = mac(r5, k, MODULUS[2], carry);
        let (r6, carry) = mac(r6, k, MODULUS[3], carry);
        let (r7, carry) = mac(r7, k, MODULUS[4], carry);
        let (r8, carry) = mac(r8, k, MODULUS[5], carry);
        let (r9, r10) = adc(t[9], r9, carry);

        // Round 5
        let k = r4.wrapping_mul(INV);
        let (_, carry) = mac(r4, k, MODULUS[0], 0);
        let (r5, carry) = mac(r5, k, MODULUS[1], carry);
        let (r6, carry) = mac(r6, k, MODULUS[2], carry);
        let (r7, carry) = mac(r7, k, MODULUS[3], carry);
        let (r8, carry) = mac(r8, k, MODULUS[4], carry);
        let (r9, carry) = mac(r9, k, MODULUS[5], carry);
        let (r10, r11) = adc(t[10], r10, carry);

        // Round 6
        let k = r5.wrapping_mul(INV);
        let (_, carry) = mac(r5, k, MODULUS[0], 0);
        let (r6, carry) = mac(r6, k, MODULUS[1], carry);
        let (r7, carry) = mac(r7, k, MODULUS[2], carry);
        let (r8, carry) = mac(r8, k, MODULUS[3], carry);
        let (r9, carry) = mac(r9, k, MODULUS[4], carry);
        let (r10, carry) = mac(r10, k, MODULUS[5], carry);
        let (r11, _) = adc(t[11], r11, carry);

        (&Fp([r6, r7, r8, r9, r10, r11])).subtract_p()
    }
}

// ============================================================================
// Advanced Field Operations
// ============================================================================

impl Fp {
    /// Variable-time exponentiation
    pub fn pow_vartime(&self, by: &[u64; 6]) -> Self {
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

    /// Compute square root if it exists
    #[inline]
    pub fn sqrt(&self) -> CtOption<Self> {
        // p ≡ 3 (mod 4), compute a^((p+1)/4)
        let sqrt = self.pow_vartime(&P_PLUS_1_OVER_4);

        CtOption::new(sqrt, sqrt.square().ct_eq(self))
    }

    /// Euler's criterion: true when `a^((p-1)/2) != 1`.
    ///
    /// Zero is reported as a non-residue.
    pub fn is_quadratic_non_residue(&self) -> bool {
        !bool::from(self.pow_vartime(&P_MINUS_1_OVER_2).is_one())
    }

    /// Multiplicative inverse by the binary (Kaliski) almost-inverse method.
    ///
    /// Returns zero for zero input, and zero if phase 1 does not finish inside
    /// 768 iterations or finishes with `k` outside `[381, 765]`. Not constant time.
    pub fn inverse(&self) -> Fp {
        if bool::from(self.is_zero()) {
            return Fp::zero();
        }

        let mut u = MODULUS;
        let mut v = self.0;
        let mut s = [1u64, 0, 0, 0, 0, 0];
        let mut r = [0u64; 6];
        let mut k = 0usize;
        let mut overflow = 0u64;
        let mut found = false;

        // Phase 1: r = a^-1 * 2^k mod p, up to sign
        for _ in 0..INVERSE_MAX_ITERATIONS {
            if v.iter().all(|&l| l == 0) {
                found = true;
                break;
            }
            if u[0] & 1 == 0 {
                shr1_limbs(&mut u, 0);
                shl1_limbs(&mut s);
            } else if v[0] & 1 == 0 {
                shr1_limbs(&mut v, 0);
                overflow += shl1_limbs(&mut r);
            } else if gt_limbs(&u, &v) {
                sub_assign_limbs(&mut u, &v);
                shr1_limbs(&mut u, 0);
                add_assign_limbs(&mut r, &s);
                shl1_limbs(&mut s);
            } else {
                sub_assign_limbs(&mut v, &u);
                shr1_limbs(&mut v, 0);
                add_assign_limbs(&mut s, &r);
                overflow += shl1_limbs(&mut r);
            }
            k += 1;
        }

        if !found || k < INVERSE_MIN_K || k > INVERSE_MIN_K + 384 {
            return Fp::zero();
        }

        if !gt_limbs(&MODULUS, &r) || overflow > 0 {
            sub_assign_limbs(&mut r, &MODULUS);
        }
        let mut u = MODULUS;
        sub_assign_limbs(&mut u, &r);

        // Phase 2: scale 2^k back up to R^2 / (aR) = a^-1 R
        let mut inv = Fp(u);
        for _ in k..INVERSE_MAX_ITERATIONS {
            inv = inv.double();
        }
        inv
    }

    /// Multiplicative inverse, none for zero
    #[inline]
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.inverse(), !self.is_zero())
    }

    /// Check if element > (p-1)/2
    pub fn lexicographically_largest(&self) -> Choice {
        Choice::from(self.is_lexicographically_largest() as u8)
    }
}

// ============================================================================
// Serialization
// ============================================================================

impl Fp {
    /// Decode from big-endian bytes, rejecting values `>= p`
    pub fn from_bytes(bytes: &[u8; 48]) -> CtOption<Fp> {
        let tmp = Fp([
            BigEndian::read_u64(&bytes[40..48]),
            BigEndian::read_u64(&bytes[32..40]),
            BigEndian::read_u64(&bytes[24..32]),
            BigEndian::read_u64(&bytes[16..24]),
            BigEndian::read_u64(&bytes[8..16]),
            BigEndian::read_u64(&bytes[0..8]),
        ]);

        // Check if < modulus
        let (_, borrow) = sbb(tmp.0[0], MODULUS[0], 0);
        let (_, borrow) = sbb(tmp.0[1], MODULUS[1], borrow);
        let (_, borrow) = sbb(tmp.0[2], MODULUS[2], borrow);
        let (_, borrow) = sbb(tmp.0[3], MODULUS[3], borrow);
        let (_, borrow) = sbb(tmp.0[4], MODULUS[4], borrow);
        let (_, borrow) = sbb(tmp.0[5], MODULUS[5], borrow);

        let is_some = (borrow as u8) & 1;

        CtOption::new(tmp * R2, Choice::from(is_some))
    }

    /// Encode to big-endian bytes
    pub fn to_bytes(self) -> [u8; 48] {
        let tmp = self.from_montgomery();

        let mut res = [0; 48];
        BigEndian::write_u64(&mut res[0..8], tmp[5]);
        BigEndian::write_u64(&mut res[8..16], tmp[4]);
        BigEndian::write_u64(&mut res[16..24], tmp[3]);
        BigEndian::write_u64(&mut res[24..32], tmp[2]);
        BigEndian::write_u64(&mut res[32..40], tmp[1]);
        BigEndian::write_u64(&mut res[40..48], tmp[0]);

        res
    }

    /// Reduce a 512-bit big-endian integer modulo p.
    ///
    /// The input is split into two 256-bit halves `hi || lo` and folded as
    /// `hi * 2^256 + lo`.
    pub fn from_bytes_wide(bytes: &[u8; 64]) -> Fp {
        let half = |b: &[u8]| {
            Fp::to_montgomery(&[
                BigEndian::read_u64(&b[24..32]),
                BigEndian::read_u64(&b[16..24]),
                BigEndian::read_u64(&b[8..16]),
                BigEndian::read_u64(&b[0..8]),
                0,
                0,
            ])
        };
        let hi = half(&bytes[0..32]);
        let lo = half(&bytes[32..64]);
        hi * TWO_POW_256 + lo
    }

    /// Create random field element
    pub fn random(mut rng: impl RngCore) -> Fp {
        let mut bytes = [0u8; 96];
        rng.fill_bytes(&mut bytes);

        let mut limbs = [0u64; 12];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = BigEndian::read_u64(&bytes[i * 8..i * 8 + 8]);
        }
        Fp::from_u768(limbs)
    }

    /// Reduce a 768-bit number modulo p
    fn from_u768(limbs: [u64; 12]) -> Fp {
        let d1 = Fp([limbs[11], limbs[10], limbs[9], limbs[8], limbs[7], limbs[6]]);
        let d0 = Fp([limbs[5], limbs[4], limbs[3], limbs[2], limbs[1], limbs[0]]);
        d0 * R2 + d1 * R3
    }
}

impl From<u64> for Fp {
    fn from(val: u64) -> Fp {
        Fp::to_montgomery(&[val, 0, 0, 0, 0, 0])
    }
}

// ============================================================================
// Widened accumulator for lazy reduction
// ============================================================================

/// Unreduced 768-bit accumulator.
///
/// Values are kept in `[0, p * 2^384)`, the input range of Montgomery
/// reduction. Subtraction borrows are repaired by adding `p * 2^384`, which
/// vanishes modulo p after reduction.
#[derive(Copy, Clone, Debug)]
pub struct FpWide(pub(crate) [u64; 12]);

impl FpWide {
    /// The zero accumulator
    pub const fn zero() -> FpWide {
        FpWide([0; 12])
    }

    /// Conditionally subtract `p * 2^384` from the high half
    #[inline]
    fn reduce_high(&mut self, carry: u64) {
        let mut high = [0u64; 6];
        high.copy_from_slice(&self.0[6..12]);
        let mut reduced = high;
        let borrow = sub_assign_limbs(&mut reduced, &MODULUS);
        // keep the original only if it was below p and nothing carried out
        let keep = borrow & !carry.wrapping_neg();
        for i in 0..6 {
            self.0[6 + i] = (high[i] & keep) | (reduced[i] & !keep);
        }
    }

    /// Sum of two accumulators
    #[inline]
    pub fn add(&self, rhs: &FpWide) -> FpWide {
        let mut out = *self;
        let carry = add_assign_limbs(&mut out.0, &rhs.0);
        out.reduce_high(carry);
        out
    }

    /// Twice this accumulator
    #[inline]
    pub fn double(&self) -> FpWide {
        self.add(self)
    }

    /// Difference of two accumulators
    #[inline]
    pub fn sub(&self, rhs: &FpWide) -> FpWide {
        let mut out = *self;
        let borrow = sub_assign_limbs(&mut out.0, &rhs.0);
        let mut correction = [0u64; 6];
        for i in 0..6 {
            correction[i] = MODULUS[i] & borrow;
        }
        add_assign_limbs(&mut out.0[6..12], &correction);
        out
    }

    /// Reduce into a field element with one Montgomery reduction
    #[inline]
    pub const fn reduce(&self) -> Fp {
        Fp::montgomery_reduce(&self.0)
    }
}

impl<'a, 'b> Add<&'b FpWide> for &'a FpWide {
    type Output = FpWide;
    #[inline]
    fn add(self, rhs: &'b FpWide) -> FpWide {
        FpWide::add(self, rhs)
    }
}

impl<'a, 'b> Sub<&'b FpWide> for &'a FpWide {
    type Output = FpWide;
    #[inline]
    fn sub(self, rhs: &'b FpWide) -> FpWide {
        FpWide::sub(self, rhs)
    }
}

impl_binops_additive!(FpWide, FpWide);

// ============================================================================
// Trait Implementations
// ============================================================================

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tmp = self.to_bytes();
        write!(f, "0x")?;
        for &b in tmp.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Default for Fp {
    fn default() -> Self {
        Fp::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp {}

impl ConstantTimeEq for Fp {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
            & self.0[4].ct_eq(&other.0[4])
            & self.0[5].ct_eq(&other.0[5])
    }
}

impl Eq for Fp {}
impl PartialEq for Fp {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
            u64::conditional_select(&a.0[5], &b.0[5], choice),
        ])
    }
}

impl<'a> Neg for &'a Fp {
    type Output = Fp;
    #[inline]
    fn neg(self) -> Fp {
        Fp::neg(self)
    }
}

impl_neg_by_value!(Fp);

impl<'a, 'b> Sub<&'b Fp> for &'a Fp {
    type Output = Fp;
    #[inline]
    fn sub(self, rhs: &'b Fp) -> Fp {
        Fp::sub(self, rhs)
    }
}

impl<'a, 'b> Add<&'b Fp> for &'a Fp {
    type Output = Fp;
    #[inline]
    fn add(self, rhs: &'b Fp) -> Fp {
        Fp::add(self, rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp> for &'a Fp {
    type Output = Fp;
    #[inline]
    fn mul(self, rhs: &'b Fp) -> Fp {
        Fp::mul(self, rhs)
    }
}

impl_binops_additive!(Fp, Fp);
impl_binops_multiplicative!(Fp, Fp);
