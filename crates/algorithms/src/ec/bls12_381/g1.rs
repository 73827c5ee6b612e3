//! G₁ group implementation for BLS12-381.
//!
//! Points live on `y^2 = x^3 + 4` over `Fp`. Projective points use Jacobian
//! coordinates `(X, Y, Z)` standing for `(X / Z^2, Y / Z^3)`; `Z = 0` is the
//! point at infinity.

use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::encoding::{rejected, Flags, COORDINATE_MASK};
use super::field::fp::Fp;
use super::msm::CurveGroup;
use super::scalar::{self, Scalar, NUM_BITS};
use crate::error::{validate, Error, Result};

const GROUP: &str = "G1";

/// G₁ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Affine {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) infinity: Choice,
}

impl Default for G1Affine {
    fn default() -> G1Affine {
        G1Affine::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for G1Affine {}

impl fmt::Display for G1Affine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G1Projective> for G1Affine {
    fn from(p: &'a G1Projective) -> G1Affine {
        p.to_affine()
    }
}

impl From<G1Projective> for G1Affine {
    fn from(p: G1Projective) -> G1Affine {
        p.to_affine()
    }
}

impl ConstantTimeEq for G1Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl ConditionallySelectable for G1Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Affine {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl Eq for G1Affine {}
impl PartialEq for G1Affine {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G1Affine {
    type Output = G1Affine;

    #[inline]
    fn neg(self) -> G1Affine {
        G1Affine {
            x: self.x,
            y: Fp::conditional_select(&-self.y, &Fp::one(), self.infinity),
            infinity: self.infinity,
        }
    }
}

impl_neg_by_value!(G1Affine);

impl<'a, 'b> Add<&'b G1Projective> for &'a G1Affine {
    type Output = G1Projective;

    #[inline]
    fn add(self, rhs: &'b G1Projective) -> G1Projective {
        rhs.add_mixed(self)
    }
}

impl<'a, 'b> Add<&'b G1Affine> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn add(self, rhs: &'b G1Affine) -> G1Projective {
        self.add_mixed(rhs)
    }
}

impl<'a, 'b> Sub<&'b G1Projective> for &'a G1Affine {
    type Output = G1Projective;

    #[inline]
    fn sub(self, rhs: &'b G1Projective) -> G1Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Sub<&'b G1Affine> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn sub(self, rhs: &'b G1Affine) -> G1Projective {
        self + &(-rhs)
    }
}

impl<T> Sum<T> for G1Projective
where
    T: Borrow<G1Projective>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

impl_binops_additive!(G1Projective, G1Affine);
impl_binops_additive_specify_output!(G1Affine, G1Projective, G1Projective);

/// Curve constant b = 4
const B: Fp = Fp::from_raw_unchecked([
    0xaa27_0000_000c_fff3,
    0x53cc_0032_fc34_000a,
    0x478f_e97a_6b0a_807f,
    0xb1d3_7ebe_e6ba_24d7,
    0x8ec9_733b_bf78_ab2f,
    0x09d6_4551_3d83_de7e,
]);

/// Primitive cube root of unity in Fp; `(x, y) -> (PHI * x, y)` acts as
/// `[x^2 - 1]` on G₁
pub const PHI: Fp = Fp::from_raw_unchecked([
    0xcd03_c9e4_8671_f071,
    0x5dab_2246_1fcd_a5d2,
    0x5870_42af_d385_1b95,
    0x8eb6_0ebe_01ba_cb9e,
    0x03f9_7d6e_83d0_50d2,
    0x18f0_2065_5463_8741,
]);

impl G1Affine {
    /// Point at infinity.
    pub fn identity() -> G1Affine {
        G1Affine {
            x: Fp::zero(),
            y: Fp::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G1Affine {
        G1Affine {
            x: Fp::from_raw_unchecked([
                0x5cb3_8790_fd53_0c16,
                0x7817_fc67_9976_fff5,
                0x154f_95c7_143b_a1c1,
                0xf0ae_6acd_f3d0_e747,
                0xedce_6ecc_21db_f440,
                0x1201_7741_9e0b_fb75,
            ]),
            y: Fp::from_raw_unchecked([
                0xbaac_93d5_0ce7_2271,
                0x8c22_631a_7918_fd8e,
                0xdd59_5f13_5707_25ce,
                0x51ac_5829_5040_5194,
                0x0e1c_8c3f_ad00_59c0,
                0x0bbc_3efc_5008_a26a,
            ]),
            infinity: Choice::from(0u8),
        }
    }

    /// Affine `x` coordinate; zero for the identity.
    pub fn x(&self) -> Fp {
        Fp::conditional_select(&self.x, &Fp::zero(), self.infinity)
    }

    /// Affine `y` coordinate; zero for the identity.
    pub fn y(&self) -> Fp {
        Fp::conditional_select(&self.y, &Fp::zero(), self.infinity)
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Curve membership check.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() - (self.x.square() * self.x)).ct_eq(&B) | self.infinity
    }

    /// Prime-order subgroup check.
    pub fn is_torsion_free(&self) -> Choice {
        G1Projective::from(self).is_torsion_free()
    }

    /// Compress to 48 bytes.
    pub fn to_compressed(&self) -> [u8; 48] {
        let mut res = self.x().to_bytes();
        res[0] |= Flags {
            compressed: true,
            infinity: bool::from(self.infinity),
            sign: bool::from((!self.infinity) & self.y.lexicographically_largest()),
        }
        .encode();
        res
    }

    /// Serialize to 96 bytes uncompressed.
    pub fn to_uncompressed(&self) -> [u8; 96] {
        let mut res = [0; 96];
        res[0..48].copy_from_slice(&self.x().to_bytes()[..]);
        res[48..96].copy_from_slice(&self.y().to_bytes()[..]);
        res[0] |= Flags {
            compressed: false,
            infinity: bool::from(self.infinity),
            sign: false,
        }
        .encode();
        res
    }

    /// Decode an uncompressed point, checking curve and subgroup membership.
    pub fn from_uncompressed(bytes: &[u8; 96]) -> Result<Self> {
        Self::from_uncompressed_unchecked(bytes).and_then(Self::check_subgroup)
    }

    /// Decode an uncompressed point without the subgroup check.
    ///
    /// The curve equation is still enforced.
    pub fn from_uncompressed_unchecked(bytes: &[u8; 96]) -> Result<Self> {
        let flags = Flags::decode(bytes[0]);

        let mut x_bytes = [0u8; 48];
        let mut y_bytes = [0u8; 48];
        x_bytes.copy_from_slice(&bytes[0..48]);
        y_bytes.copy_from_slice(&bytes[48..96]);
        x_bytes[0] &= COORDINATE_MASK;

        let mut payload = [0u8; 96];
        payload[..48].copy_from_slice(&x_bytes);
        payload[48..].copy_from_slice(&y_bytes);
        let flags = flags
            .check(false, &payload)
            .map_err(|e| rejected(GROUP, e))?;

        if flags.infinity {
            return Ok(G1Affine::identity());
        }

        let x = decode_fp(&x_bytes)?;
        let y = decode_fp(&y_bytes)?;
        let p = G1Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };

        if !bool::from(p.is_on_curve()) {
            return Err(rejected(GROUP, Error::NotOnCurve { group: GROUP }));
        }
        Ok(p)
    }

    /// Decode a compressed point, checking subgroup membership.
    pub fn from_compressed(bytes: &[u8; 48]) -> Result<Self> {
        Self::from_compressed_unchecked(bytes).and_then(Self::check_subgroup)
    }

    /// Decode a compressed point without the subgroup check.
    pub fn from_compressed_unchecked(bytes: &[u8; 48]) -> Result<Self> {
        let mut x_bytes = *bytes;
        x_bytes[0] &= COORDINATE_MASK;

        let flags = Flags::decode(bytes[0])
            .check(true, &x_bytes)
            .map_err(|e| rejected(GROUP, e))?;

        if flags.infinity {
            return Ok(G1Affine::identity());
        }

        let x = decode_fp(&x_bytes)?;
        let y = Option::<Fp>::from(((x.square() * x) + B).sqrt()).ok_or_else(|| {
            rejected(
                GROUP,
                Error::NotSquare {
                    context: "G1 decompression",
                },
            )
        })?;

        let sign = Choice::from(flags.sign as u8);
        Ok(G1Affine {
            x,
            y: Fp::conditional_select(&y, &-y, y.lexicographically_largest() ^ sign),
            infinity: Choice::from(0u8),
        })
    }

    fn check_subgroup(p: Self) -> Result<Self> {
        if bool::from(p.is_torsion_free()) {
            Ok(p)
        } else {
            Err(rejected(GROUP, Error::NotInSubgroup { group: GROUP }))
        }
    }
}

fn decode_fp(bytes: &[u8; 48]) -> Result<Fp> {
    Option::<Fp>::from(Fp::from_bytes(bytes))
        .ok_or_else(|| rejected(GROUP, Error::NonCanonical { context: "Fp" }))
}

impl bls381_api::Serialize for G1Affine {
    fn from_bytes(bytes: &[u8]) -> bls381_api::Result<Self> {
        validate::length("G1Affine::from_bytes", bytes.len(), 48)?;
        let mut array = [0u8; 48];
        array.copy_from_slice(bytes);
        Ok(G1Affine::from_compressed(&array)?)
    }

    #[cfg(feature = "alloc")]
    fn to_bytes(&self) -> alloc::vec::Vec<u8> {
        self.to_compressed().to_vec()
    }
}

/// G₁ point in Jacobian coordinates.
#[derive(Copy, Clone, Debug)]
pub struct G1Projective {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) z: Fp,
}

impl Default for G1Projective {
    fn default() -> G1Projective {
        G1Projective::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for G1Projective {}

impl fmt::Display for G1Projective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G1Affine> for G1Projective {
    fn from(p: &'a G1Affine) -> G1Projective {
        G1Projective {
            x: p.x,
            y: p.y,
            z: Fp::conditional_select(&Fp::one(), &Fp::zero(), p.infinity),
        }
    }
}

impl From<G1Affine> for G1Projective {
    fn from(p: G1Affine) -> G1Projective {
        G1Projective::from(&p)
    }
}

impl ConstantTimeEq for G1Projective {
    fn ct_eq(&self, other: &Self) -> Choice {
        // X1 * Z2^2 == X2 * Z1^2 and Y1 * Z2^3 == Y2 * Z1^3
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

impl ConditionallySelectable for G1Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Projective {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            z: Fp::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl Eq for G1Projective {}
impl PartialEq for G1Projective {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn neg(self) -> G1Projective {
        G1Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl_neg_by_value!(G1Projective);

impl<'a, 'b> Add<&'b G1Projective> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn add(self, rhs: &'b G1Projective) -> G1Projective {
        G1Projective::add(self, rhs)
    }
}

impl<'a, 'b> Sub<&'b G1Projective> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn sub(self, rhs: &'b G1Projective) -> G1Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G1Projective {
    type Output = G1Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        self.multiply(other)
    }
}

impl<'a, 'b> Mul<&'b G1Projective> for &'a Scalar {
    type Output = G1Projective;

    #[inline]
    fn mul(self, rhs: &'b G1Projective) -> Self::Output {
        rhs * self
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G1Affine {
    type Output = G1Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        G1Projective::from(self).multiply(other)
    }
}

impl<'a, 'b> Mul<&'b G1Affine> for &'a Scalar {
    type Output = G1Projective;

    #[inline]
    fn mul(self, rhs: &'b G1Affine) -> Self::Output {
        rhs * self
    }
}

impl_binops_additive!(G1Projective, G1Projective);
impl_binops_multiplicative!(G1Projective, Scalar);
impl_binops_multiplicative_mixed!(G1Affine, Scalar, G1Projective);
impl_binops_multiplicative_mixed!(Scalar, G1Affine, G1Projective);
impl_binops_multiplicative_mixed!(Scalar, G1Projective, G1Projective);

impl G1Projective {
    /// Point at infinity.
    pub const fn identity() -> G1Projective {
        G1Projective {
            x: Fp::zero(),
            y: Fp::one(),
            z: Fp::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G1Projective {
        G1Projective::from(G1Affine::generator())
    }

    /// Random point of the prime-order subgroup.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = Fp::random(&mut rng);
            let flip_sign = rng.next_u32() % 2 != 0;

            let p = ((x.square() * x) + B).sqrt().map(|y| G1Affine {
                x,
                y: if flip_sign { -y } else { y },
                infinity: 0.into(),
            });

            if let Some(p) = Option::<G1Affine>::from(p) {
                let p = G1Projective::from(p).clear_cofactor();
                if !bool::from(p.is_identity()) {
                    return p;
                }
            }
        }
    }

    /// Point doubling.
    pub fn double(&self) -> G1Projective {
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

        let tmp = G1Projective { x: x3, y: y3, z: z3 };
        G1Projective::conditional_select(&tmp, &G1Projective::identity(), self.is_identity())
    }

    /// Point addition.
    ///
    /// Falls back to doubling when the operands are equal and to the identity
    /// when they are inverses; every branch is evaluated and selected.
    pub fn add(&self, rhs: &G1Projective) -> G1Projective {
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

        let sum = G1Projective { x: x3, y: y3, z: z3 };
        self.select_special(rhs, sum, h.is_zero(), r.is_zero())
    }

    /// Mixed addition with affine point.
    pub fn add_mixed(&self, rhs: &G1Affine) -> G1Projective {
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

        let sum = G1Projective { x: x3, y: y3, z: z3 };
        let rhs_proj = G1Projective::from(rhs);
        let res = self.select_special(&rhs_proj, sum, h.is_zero(), r.is_zero());
        G1Projective::conditional_select(&res, self, rhs.is_identity())
    }

    fn select_special(
        &self,
        rhs: &G1Projective,
        sum: G1Projective,
        h_zero: Choice,
        r_zero: Choice,
    ) -> G1Projective {
        let res = G1Projective::conditional_select(
            &sum,
            &G1Projective::identity(),
            h_zero & !r_zero,
        );
        let res = G1Projective::conditional_select(&res, &self.double(), h_zero & r_zero);
        let res = G1Projective::conditional_select(&res, rhs, self.is_identity());
        G1Projective::conditional_select(&res, self, rhs.is_identity())
    }

    /// Constant iteration count over all 255 scalar bits.
    fn multiply(&self, by: &Scalar) -> G1Projective {
        let limbs = by.to_canonical_limbs();
        let mut acc = G1Projective::identity();
        for i in (0..NUM_BITS as usize).rev() {
            acc = acc.double();
            let bit = Choice::from(((limbs[i / 64] >> (i % 64)) & 1) as u8);
            acc = G1Projective::conditional_select(&acc, &(acc + self), bit);
        }
        acc
    }

    /// Double-and-add over an exponent of little-endian limbs.
    ///
    /// Runs in time dependent on `by`.
    pub fn mul_vartime(&self, by: &[u64]) -> G1Projective {
        let mut acc = G1Projective::identity();
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
    pub fn mul_glv(&self, by: &Scalar) -> G1Projective {
        super::msm::mul_glv(self, by)
    }

    /// Multi-scalar multiplication with the Pippenger bucket method.
    ///
    /// Variable time in the scalars.
    #[cfg(feature = "alloc")]
    pub fn msm(points: &[G1Affine], scalars: &[Scalar]) -> Result<Self> {
        super::msm::multi_exp(points, scalars)
    }

    /// The endomorphism `(x, y) -> (PHI * x, y)`, equal to `[x^2 - 1]`.
    pub fn endomorphism(&self) -> G1Projective {
        G1Projective {
            x: self.x * PHI,
            y: self.y,
            z: self.z,
        }
    }

    /// Multiply by the curve parameter `x`.
    pub fn mul_by_x(&self) -> G1Projective {
        let mut xself = G1Projective::identity();
        let mut x = super::BLS_X >> 1;
        let mut tmp = *self;
        while x != 0 {
            tmp = tmp.double();
            if x % 2 == 1 {
                xself += tmp;
            }
            x >>= 1;
        }
        if super::BLS_X_IS_NEGATIVE {
            xself = -xself;
        }
        xself
    }

    /// Clear the cofactor by multiplying with `1 - x`.
    pub fn clear_cofactor(&self) -> G1Projective {
        self - self.mul_by_x()
    }

    /// Affine form via one field inversion.
    pub fn to_affine(&self) -> G1Affine {
        let zinv = self.z.inverse();
        let zinv2 = zinv.square();

        let tmp = G1Affine {
            x: self.x * zinv2,
            y: self.y * zinv2 * zinv,
            infinity: Choice::from(0u8),
        };

        G1Affine::conditional_select(&tmp, &G1Affine::identity(), self.is_identity())
    }

    /// Batch affine conversion sharing a single inversion.
    ///
    /// Fails when the slices differ in length.
    pub fn batch_normalize(p: &[Self], q: &mut [G1Affine]) -> Result<()> {
        validate::same_length("points/affine", p.len(), q.len())?;

        let mut acc = Fp::one();
        for (p, q) in p.iter().zip(q.iter_mut()) {
            // prefix product of the non-zero z coordinates
            q.x = acc;
            acc = Fp::conditional_select(&(acc * p.z), &acc, p.is_identity());
        }

        acc = acc.inverse();

        for (p, q) in p.iter().rev().zip(q.iter_mut().rev()) {
            let skip = p.is_identity();
            let zinv = q.x * acc;
            acc = Fp::conditional_select(&(acc * p.z), &acc, skip);
            let zinv2 = zinv.square();
            q.x = p.x * zinv2;
            q.y = p.y * zinv2 * zinv;
            q.infinity = Choice::from(0u8);
            *q = G1Affine::conditional_select(q, &G1Affine::identity(), skip);
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
        self.z.ct_eq(&Fp::one())
    }

    /// Curve membership check on `Y^2 = X^3 + b * Z^6`.
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

impl CurveGroup for G1Projective {
    type Affine = G1Affine;

    fn identity() -> Self {
        G1Projective::identity()
    }

    fn double(&self) -> Self {
        G1Projective::double(self)
    }

    fn add_affine(&self, rhs: &G1Affine) -> Self {
        self.add_mixed(rhs)
    }

    fn endomorphism(&self) -> Self {
        G1Projective::endomorphism(self)
    }
}
