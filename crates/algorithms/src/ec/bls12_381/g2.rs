//! G₂ group implementation for BLS12-381.
//!
//! Points live on the sextic twist `y^2 = x^3 + 4(u + 1)` over `Fp2`, in
//! Jacobian coordinates like G₁.

use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::encoding::{rejected, Flags, COORDINATE_MASK};
use super::field::fp::Fp;
use super::field::fp2::Fp2;
use super::msm::CurveGroup;
use super::scalar::{self, Scalar, NUM_BITS};
use crate::error::{validate, Error, Result};

const GROUP: &str = "G2";

/// G₂ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Affine {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) infinity: Choice,
}

impl Default for G2Affine {
    fn default() -> G2Affine {
        G2Affine::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for G2Affine {}

impl fmt::Display for G2Affine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G2Projective> for G2Affine {
    fn from(p: &'a G2Projective) -> G2Affine {
        p.to_affine()
    }
}

impl From<G2Projective> for G2Affine {
    fn from(p: G2Projective) -> G2Affine {
        p.to_affine()
    }
}

impl ConstantTimeEq for G2Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl ConditionallySelectable for G2Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G2Affine {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl Eq for G2Affine {}
impl PartialEq for G2Affine {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G2Affine {
    type Output = G2Affine;

    #[inline]
    fn neg(self) -> G2Affine {
        G2Affine {
            x: self.x,
            y: Fp2::conditional_select(&-self.y, &Fp2::one(), self.infinity),
            infinity: self.infinity,
        }
    }
}

impl_neg_by_value!(G2Affine);

impl<'a, 'b> Add<&'b G2Projective> for &'a G2Affine {
    type Output = G2Projective;

    #[inline]
    fn add(self, rhs: &'b G2Projective) -> G2Projective {
        rhs.add_mixed(self)
    }
}

impl<'a, 'b> Add<&'b G2Affine> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn add(self, rhs: &'b G2Affine) -> G2Projective {
        self.add_mixed(rhs)
    }
}

impl<'a, 'b> Sub<&'b G2Projective> for &'a G2Affine {
    type Output = G2Projective;

    #[inline]
    fn sub(self, rhs: &'b G2Projective) -> G2Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Sub<&'b G2Affine> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn sub(self, rhs: &'b G2Affine) -> G2Projective {
        self + &(-rhs)
    }
}

impl<T> Sum<T> for G2Projective
where
    T: Borrow<G2Projective>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

impl_binops_additive!(G2Projective, G2Affine);
impl_binops_additive_specify_output!(G2Affine, G2Projective, G2Projective);

/// Curve constant b' = 4(u + 1)
const B: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]),
    c1: Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]),
};

/// Cube root of unity in Fp with `(x, y) -> (BETA * x, y)` acting as
/// `[x^2 - 1]` on G₂
pub const BETA: Fp = Fp::from_raw_unchecked([
    0x30f1_361b_798a_64e8,
    0xf3b8_ddab_7ece_5a2a,
    0x16a8_ca3a_c615_77f7,
    0xc26a_2ff8_74fd_029b,
    0x3636_b766_6070_1c6e,
    0x051b_a4ab_241b_6160,
]);

/// 1 / (u + 1)^((p - 1) / 3)
const PSI_COEFF_X: Fp2 = Fp2 {
    c0: Fp::zero(),
    c1: Fp::from_raw_unchecked([
        0x890d_c9e4_8675_45c3,
        0x2af3_2253_3285_a5d5,
        0x5088_0866_309b_7e2c,
        0xa20d_1b8c_7e88_1024,
        0x14e4_f04f_e2db_9068,
        0x14e5_6d3f_1564_853a,
    ]),
};

/// 1 / (u + 1)^((p - 1) / 2)
const PSI_COEFF_Y: Fp2 = Fp2 {
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
};

/// 1 / 2^((p - 1) / 3)
const PSI2_COEFF_X: Fp = Fp::from_raw_unchecked([
    0xcd03_c9e4_8671_f071,
    0x5dab_2246_1fcd_a5d2,
    0x5870_42af_d385_1b95,
    0x8eb6_0ebe_01ba_cb9e,
    0x03f9_7d6e_83d0_50d2,
    0x18f0_2065_5463_8741,
]);

/// Order of the twist divided by `r`, little-endian limbs
const COFACTOR: [u64; 8] = [
    0xcf1c_38e3_1c72_38e5,
    0x1616_ec6e_786f_0c70,
    0x2153_7e29_3a66_91ae,
    0xa628_f1cb_4d9e_82ef,
    0xa68a_205b_2e5a_7ddf,
    0xcd91_de45_4708_5aba,
    0x091d_5079_2876_a202,
    0x05d5_43a9_5414_e7f1,
];

impl G2Affine {
    /// Point at infinity.
    pub fn identity() -> G2Affine {
        G2Affine {
            x: Fp2::zero(),
            y: Fp2::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G2Affine {
        G2Affine {
            x: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0xf5f2_8fa2_0294_0a10,
                    0xb3f5_fb26_87b4_961a,
                    0xa1a8_93b5_3e2a_e580,
                    0x9894_999d_1a3c_aee9,
                    0x6f67_b763_1863_366b,
                    0x0581_9192_4350_bcd7,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xa5a9_c075_9e23_f606,
                    0xaaa0_c59d_bccd_60c3,
                    0x3bb1_7e18_e286_7806,
                    0x1b1a_b6cc_8541_b367,
                    0xc2b6_ed0e_f215_8547,
                    0x1192_2a09_7360_edf3,
                ]),
            },
            y: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x4c73_0af8_6049_4c4a,
                    0x597c_fa1f_5e36_9c5a,
                    0xe7e6_856c_aa0a_635a,
                    0xbbef_b5e9_6e0d_495f,
                    0x07d3_a975_f0ef_25a2,
                    0x0083_fd8e_7e80_dae5,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xadc0_fc92_df64_b05d,
                    0x18aa_270a_2b14_61dc,
                    0x86ad_ac6a_3be4_eba0,
                    0x7949_5c4e_c93d_a33a,
                    0xe717_5850_a43c_caed,
                    0x0b2b_c2a1_63de_1bf2,
                ]),
            },
            infinity: Choice::from(0u8),
        }
    }

    /// Affine `x` coordinate; zero for the identity.
    pub fn x(&self) -> Fp2 {
        Fp2::conditional_select(&self.x, &Fp2::zero(), self.infinity)
    }

    /// Affine `y` coordinate; zero for the identity.
    pub fn y(&self) -> Fp2 {
        Fp2::conditional_select(&self.y, &Fp2::zero(), self.infinity)
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Check if on curve y² = x³ + b'.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() - (self.x.square() * self.x)).ct_eq(&B) | self.infinity
    }

    /// Prime-order subgroup check.
    pub fn is_torsion_free(&self) -> Choice {
        G2Projective::from(self).is_torsion_free()
    }

    /// Compress to 96 bytes, `x.c1 || x.c0`.
    pub fn to_compressed(&self) -> [u8; 96] {
        let mut res = self.x().to_bytes();
        res[0] |= Flags {
            compressed: true,
            infinity: bool::from(self.infinity),
            sign: bool::from((!self.infinity) & self.y.lexicographically_largest()),
        }
        .encode();
        res
    }

    /// Serialize to 192 bytes uncompressed.
    pub fn to_uncompressed(&self) -> [u8; 192] {
        let mut res = [0; 192];
        res[0..96].copy_from_slice(&self.x().to_bytes()[..]);
        res[96..192].copy_from_slice(&self.y().to_bytes()[..]);
        res[0] |= Flags {
            compressed: false,
            infinity: bool::from(self.infinity),
            sign: false,
        }
        .encode();
        res
    }

    /// Decode an uncompressed point, checking curve and subgroup membership.
    pub fn from_uncompressed(bytes: &[u8; 192]) -> Result<Self> {
        Self::from_uncompressed_unchecked(bytes).and_then(Self::check_subgroup)
    }

    /// Decode an uncompressed point without the subgroup check.
    ///
    /// The curve equation is still enforced.
    pub fn from_uncompressed_unchecked(bytes: &[u8; 192]) -> Result<Self> {
        let mut payload = *bytes;
        payload[0] &= COORDINATE_MASK;

        let flags = Flags::decode(bytes[0])
            .check(false, &payload)
            .map_err(|e| rejected(GROUP, e))?;

        if flags.infinity {
            return Ok(G2Affine::identity());
        }

        let mut x_bytes = [0u8; 96];
        let mut y_bytes = [0u8; 96];
        x_bytes.copy_from_slice(&payload[0..96]);
        y_bytes.copy_from_slice(&payload[96..192]);

        let p = G2Affine {
            x: decode_fp2(&x_bytes)?,
            y: decode_fp2(&y_bytes)?,
            infinity: Choice::from(0u8),
        };

        if !bool::from(p.is_on_curve()) {
            return Err(rejected(GROUP, Error::NotOnCurve { group: GROUP }));
        }
        Ok(p)
    }

    /// Decode a compressed point, checking subgroup membership.
    pub fn from_compressed(bytes: &[u8; 96]) -> Result<Self> {
        Self::from_compressed_unchecked(bytes).and_then(Self::check_subgroup)
    }

    /// Decode a compressed point without the subgroup check.
    pub fn from_compressed_unchecked(bytes: &[u8; 96]) -> Result<Self> {
        let mut x_bytes = *bytes;
        x_bytes[0] &= COORDINATE_MASK;

        let flags = Flags::decode(bytes[0])
            .check(true, &x_bytes)
            .map_err(|e| rejected(GROUP, e))?;

        if flags.infinity {
            return Ok(G2Affine::identity());
        }

        let x = decode_fp2(&x_bytes)?;
        let y = Option::<Fp2>::from(((x.square() * x) + B).sqrt()).ok_or_else(|| {
            rejected(
                GROUP,
                Error::NotSquare {
                    context: "G2 decompression",
                },
            )
        })?;

        let sign = Choice::from(flags.sign as u8);
        Ok(G2Affine {
            x,
            y: Fp2::conditional_select(&y, &-y, y.lexicographically_largest() ^ sign),
            infinity: Choice::from(0u8),
        })
    }

    /// Map 96 bytes (`x.c1 || x.c0`) onto G₂ by try-and-increment.
    ///
    /// `x` is stepped by one until `x^3 + b'` is square, the lexicographically
    /// largest root is taken for `y`, and the point is multiplied by the full
    /// cofactor. Runs in time dependent on the input.
    pub fn map_to_point(bytes: &[u8; 96]) -> Result<G2Projective> {
        let mut x = decode_fp2(bytes)?;
        loop {
            let rhs = (x.square() * x) + B;
            if let Some(y) = Option::<Fp2>::from(rhs.sqrt()) {
                let p = G2Affine {
                    x,
                    y: Fp2::conditional_select(&-y, &y, y.lexicographically_largest()),
                    infinity: Choice::from(0u8),
                };
                return Ok(G2Projective::from(p).mul_vartime(&COFACTOR));
            }
            x += Fp2::one();
        }
    }

    fn check_subgroup(p: Self) -> Result<Self> {
        if bool::from(p.is_torsion_free()) {
            Ok(p)
        } else {
            Err(rejected(GROUP, Error::NotInSubgroup { group: GROUP }))
        }
    }
}

fn decode_fp2(bytes: &[u8; 96]) -> Result<Fp2> {
    Option::<Fp2>::from(Fp2::from_bytes(bytes))
        .ok_or_else(|| rejected(GROUP, Error::NonCanonical { context: "Fp2" }))
}

impl bls381_api::Serialize for G2Affine {
    fn from_bytes(bytes: &[u8]) -> bls381_api::Result<Self> {
        validate::length("G2Affine::from_bytes", bytes.len(), 96)?;
        let mut array = [0u8; 96];
        array.copy_from_slice(bytes);
        Ok(G2Affine::from_compressed(&array)?)
    }

    #[cfg(feature = "alloc")]
    fn to_bytes(&self) -> alloc::vec::Vec<u8> {
        self.to_compressed().to_vec()
    }
}

/// G₂ point in Jacobian coordinates.
#[derive(Copy, Clone, Debug)]
pub struct G2Projective {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) z: Fp2,
}

impl Default for G2Projective {
    fn default() -> G2Projective {
        G2Projective::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for G2Projective {}

impl fmt::Display for G2Projective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G2Affine> for G2Projective {
    fn from(p: &'a G2Affine) -> G2Projective {
        G2Projective {
            x: p.x,
            y: p.y,
            z: Fp2::conditional_select(&Fp2::one(), &Fp2::zero(), p.infinity),
        }
    }
}

impl From<G2Affine> for G2Projective {
    fn from(p: G2Affine) -> G2Projective {
        G2Projective::from(&p)
    }
}

impl ConstantTimeEq for G2Projective {
    fn ct_eq(&self, other: &Self) -> Choice {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let x1 = self.x * z2z2;
        let x2 = other.x * z1z1;
        let y1 = self.y * z2z2 * other.z;
        let y2 = other.y * z1z1 * self.z;

        let self_is_zero = self.z.is_zero();
        let other_is_zero = other.z.is_zero();

        (self_is_zero & other_is_zero)
            | ((!self_is_zero) & (!other_is_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
    }
}

impl ConditionallySelectable for G2Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G2Projective {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            z: Fp2::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl Eq for G2Projective {}
impl PartialEq for G2Projective {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn neg(self) -> G2Projective {
        G2Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl_neg_by_value!(G2Projective);

impl<'a, 'b> Add<&'b G2Projective> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn add(self, rhs: &'b G2Projective) -> G2Projective {
        G2Projective::add(self, rhs)
    }
}

impl<'a, 'b> Sub<&'b G2Projective> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn sub(self, rhs: &'b G2Projective) -> G2Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G2Projective {
    type Output = G2Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        self.multiply(other)
    }
}

impl<'a, 'b> Mul<&'b G2Projective> for &'a Scalar {
    type Output = G2Projective;

    #[inline]
    fn mul(self, rhs: &'b G2Projective) -> Self::Output {
        rhs * self
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G2Affine {
    type Output = G2Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        G2Projective::from(self).multiply(other)
    }
}

impl<'a, 'b> Mul<&'b G2Affine> for &'a Scalar {
    type Output = G2Projective;

    #[inline]
    fn mul(self, rhs: &'b G2Affine) -> Self::Output {
        rhs * self
    }
}

impl_binops_additive!(G2Projective, G2Projective);
impl_binops_multiplicative!(G2Projective, Scalar);
impl_binops_multiplicative_mixed!(G2Affine, Scalar, G2Projective);
impl_binops_multiplicative_mixed!(Scalar, G2Affine, G2Projective);
impl_binops_multiplicative_mixed!(Scalar, G2Projective, G2Projective);

impl G2Projective {
    /// Point at infinity.
    pub const fn identity() -> G2Projective {
        G2Projective {
            x: Fp2::zero(),
            y: Fp2::one(),
            z: Fp2::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G2Projective {
        G2Projective::from(G2Affine::generator())
    }

    /// Random point of the prime-order subgroup.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = Fp2::random(&mut rng);
            let flip_sign = rng.next_u32() % 2 != 0;

            let p = ((x.square() * x) + B).sqrt().map(|y| G2Affine {
                x,
                y: if flip_sign { -y } else { y },
                infinity: 0.into(),
            });

            if let Some(p) = Option::<G2Affine>::from(p) {
                let p = G2Projective::from(p).clear_cofactor();
                if !bool::from(p.is_identity()) {
                    return p;
                }
            }
        }
    }

    /// Point doubling.
    pub fn double(&self) -> G2Projective {
        // dbl-2009-l for a = 0
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let e = a.double() + a;
        let f = e.square();

        let x3 = f - d.double();
        let y3 = e * (d - x3) - c.double().double().double();
        let z3 = (self.y * self.z).double();

        let tmp = G2Projective { x: x3, y: y3, z: z3 };
        G2Projective::conditional_select(&tmp, &G2Projective::identity(), self.is_identity())
    }

    /// Point addition with the same fallbacks as G₁.
    pub fn add(&self, rhs: &G2Projective) -> G2Projective {
        // add-2007-bl
        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let s1 = self.y * rhs.z * z2z2;
        let s2 = rhs.y * self.z * z1z1;

        let h = u2 - u1;
        let r = s2 - s1;
        let i = h.double().square();
        let j = h * i;
        let rr = r.double();
        let v = u1 * i;

        let x3 = rr.square() - j - v.double();
        let y3 = rr * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + rhs.z).square() - z1z1 - z2z2) * h;

        let sum = G2Projective { x: x3, y: y3, z: z3 };
        self.select_special(rhs, sum, h.is_zero(), r.is_zero())
    }

    /// Mixed addition with affine point.
    pub fn add_mixed(&self, rhs: &G2Affine) -> G2Projective {
        // madd-2007-bl
        let z1z1 = self.z.square();
        let u2 = rhs.x * z1z1;
        let s2 = rhs.y * self.z * z1z1;

        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = s2 - self.y;
        let rr = r.double();
        let v = self.x * i;

        let x3 = rr.square() - j - v.double();
        let y3 = rr * (v - x3) - (self.y * j).double();
        let z3 = (self.z + h).square() - z1z1 - hh;

        let sum = G2Projective { x: x3, y: y3, z: z3 };
        let rhs_proj = G2Projective::from(rhs);
        let res = self.select_special(&rhs_proj, sum, h.is_zero(), r.is_zero());
        G2Projective::conditional_select(&res, self, rhs.is_identity())
    }

    fn select_special(
        &self,
        rhs: &G2Projective,
        sum: G2Projective,
        h_zero: Choice,
        r_zero: Choice,
    ) -> G2Projective {
        let res = G2Projective::conditional_select(
            &sum,
            &G2Projective::identity(),
            h_zero & !r_zero,
        );
        let res = G2Projective::conditional_select(&res, &self.double(), h_zero & r_zero);
        let res = G2Projective::conditional_select(&res, rhs, self.is_identity());
        G2Projective::conditional_select(&res, self, rhs.is_identity())
    }

    fn multiply(&self, by: &Scalar) -> G2Projective {
        let limbs = by.to_canonical_limbs();
        let mut acc = G2Projective::identity();
        for i in (0..NUM_BITS as usize).rev() {
            acc = acc.double();
            let bit = Choice::from(((limbs[i / 64] >> (i % 64)) & 1) as u8);
            acc = G2Projective::conditional_select(&acc, &(acc + self), bit);
        }
        acc
    }

    /// Double-and-add over an exponent of little-endian limbs.
    ///
    /// Runs in time dependent on `by`.
    pub fn mul_vartime(&self, by: &[u64]) -> G2Projective {
        let mut acc = G2Projective::identity();
        let mut started = false;
        for limb in by.iter().rev() {
            for i in (0..64).rev() {
                if started {
                    acc = acc.double();
                }
                if (limb >> i) & 1 == 1 {
                    acc += self;
                    started = true;
                }
            }
        }
        acc
    }

    /// Scalar multiplication through the GLV endomorphism.
    #[cfg(feature = "alloc")]
    pub fn mul_glv(&self, by: &Scalar) -> G2Projective {
        super::msm::mul_glv(self, by)
    }

    /// Multi-scalar multiplication with the Pippenger bucket method.
    #[cfg(feature = "alloc")]
    pub fn msm(points: &[G2Affine], scalars: &[Scalar]) -> Result<Self> {
        super::msm::multi_exp(points, scalars)
    }

    /// The endomorphism `(x, y) -> (BETA * x, y)`, equal to `[x^2 - 1]`.
    pub fn endomorphism(&self) -> G2Projective {
        G2Projective {
            x: self.x.mul_by_fp(&BETA),
            y: self.y,
            z: self.z,
        }
    }

    /// Multiply by the curve parameter `x`.
    pub fn mul_by_x(&self) -> G2Projective {
        let mut xself = G2Projective::identity();
        let mut x = super::BLS_X >> 1;
        let mut acc = *self;
        while x != 0 {
            acc = acc.double();
            if x % 2 == 1 {
                xself += acc;
            }
            x >>= 1;
        }
        if super::BLS_X_IS_NEGATIVE {
            xself = -xself;
        }
        xself
    }

    /// Untwist-Frobenius-twist endomorphism.
    pub fn psi(&self) -> G2Projective {
        G2Projective {
            x: self.x.frobenius_map(1) * PSI_COEFF_X,
            y: self.y.frobenius_map(1) * PSI_COEFF_Y,
            z: self.z.frobenius_map(1),
        }
    }

    /// `psi` applied twice.
    pub fn psi2(&self) -> G2Projective {
        G2Projective {
            x: self.x.mul_by_fp(&PSI2_COEFF_X),
            y: -self.y,
            z: self.z,
        }
    }

    /// Clear the cofactor (Budroni-Pintore).
    pub fn clear_cofactor(&self) -> G2Projective {
        let t1 = self.mul_by_x();
        let t2 = self.psi();
        self.double().psi2() + (t1 + t2).mul_by_x() - t1 - t2 - *self
    }

    /// Affine form via one field inversion.
    pub fn to_affine(&self) -> G2Affine {
        let zinv = self.z.invert().unwrap_or(Fp2::zero());
        let zinv2 = zinv.square();

        let tmp = G2Affine {
            x: self.x * zinv2,
            y: self.y * zinv2 * zinv,
            infinity: Choice::from(0u8),
        };

        G2Affine::conditional_select(&tmp, &G2Affine::identity(), self.is_identity())
    }

    /// Batch affine conversion sharing a single inversion.
    pub fn batch_normalize(p: &[Self], q: &mut [G2Affine]) -> Result<()> {
        validate::same_length("points/affine", p.len(), q.len())?;

        let mut acc = Fp2::one();
        for (p, q) in p.iter().zip(q.iter_mut()) {
            q.x = acc;
            acc = Fp2::conditional_select(&(acc * p.z), &acc, p.is_identity());
        }

        // non-zero by construction
        acc = acc.invert().unwrap_or(Fp2::zero());

        for (p, q) in p.iter().rev().zip(q.iter_mut().rev()) {
            let skip = p.is_identity();
            let zinv = q.x * acc;
            acc = Fp2::conditional_select(&(acc * p.z), &acc, skip);
            let zinv2 = zinv.square();
            q.x = p.x * zinv2;
            q.y = p.y * zinv2 * zinv;
            q.infinity = Choice::from(0u8);
            *q = G2Affine::conditional_select(q, &G2Affine::identity(), skip);
        }
        Ok(())
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// `Z == 1`
    pub fn is_affine(&self) -> Choice {
        self.z.ct_eq(&Fp2::one())
    }

    /// Curve membership check on `Y^2 = X^3 + b' * Z^6`.
    pub fn is_on_curve(&self) -> Choice {
        let z2 = self.z.square();
        let z6 = z2.square() * z2;
        self.y.square().ct_eq(&(self.x.square() * self.x + z6 * B)) | self.z.is_zero()
    }

    /// Prime-order subgroup check, `[r]P == O`.
    pub fn is_torsion_free(&self) -> Choice {
        self.mul_vartime(&scalar::MODULUS.0).is_identity()
    }
}

impl CurveGroup for G2Projective {
    type Affine = G2Affine;

    fn identity() -> Self {
        G2Projective::identity()
    }

    fn double(&self) -> Self {
        G2Projective::double(self)
    }

    fn add_affine(&self, rhs: &G2Affine) -> Self {
        self.add_mixed(rhs)
    }

    fn endomorphism(&self) -> Self {
        G2Projective::endomorphism(self)
    }
}
