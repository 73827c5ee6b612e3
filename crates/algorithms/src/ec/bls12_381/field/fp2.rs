//! Quadratic extension `Fp2 = Fp[u] / (u^2 + 1)`.

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::{Fp, FpWide, P_MINUS_1_OVER_2, P_MINUS_3_OVER_4};

/// Element `c0 + c1 * u` of the quadratic extension
#[derive(Copy, Clone)]
pub struct Fp2 {
    /// Constant coefficient
    pub c0: Fp,
    /// Coefficient of `u`
    pub c1: Fp,
}

impl fmt::Debug for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} + {:?}*u", self.c0, self.c1)
    }
}

impl Default for Fp2 {
    fn default() -> Self {
        Fp2::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp2 {}

impl From<Fp> for Fp2 {
    fn from(f: Fp) -> Fp2 {
        Fp2 {
            c0: f,
            c1: Fp::zero(),
        }
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Eq for Fp2 {}
impl PartialEq for Fp2 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<'a> Neg for &'a Fp2 {
    type Output = Fp2;
    #[inline]
    fn neg(self) -> Fp2 {
        Fp2::neg(self)
    }
}

impl_neg_by_value!(Fp2);

impl<'a, 'b> Sub<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    #[inline]
    fn sub(self, rhs: &'b Fp2) -> Fp2 {
        Fp2::sub(self, rhs)
    }
}

impl<'a, 'b> Add<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    #[inline]
    fn add(self, rhs: &'b Fp2) -> Fp2 {
        Fp2::add(self, rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    #[inline]
    fn mul(self, rhs: &'b Fp2) -> Fp2 {
        Fp2::mul(self, rhs)
    }
}

impl_binops_additive!(Fp2, Fp2);
impl_binops_multiplicative!(Fp2, Fp2);

impl Fp2 {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Fp2 {
        Fp2 {
            c0: Fp::zero(),
            c1: Fp::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp2 {
        Fp2 {
            c0: Fp::one(),
            c1: Fp::zero(),
        }
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Check if element is one
    pub fn is_one(&self) -> Choice {
        self.c0.is_one() & self.c1.is_zero()
    }

    /// Random element
    pub fn random(mut rng: impl RngCore) -> Fp2 {
        Fp2 {
            c0: Fp::random(&mut rng),
            c1: Fp::random(&mut rng),
        }
    }

    /// Raise to the p^power Frobenius; conjugation for odd powers
    #[inline(always)]
    pub fn frobenius_map(&self, power: usize) -> Self {
        if power % 2 == 1 {
            self.conjugate()
        } else {
            *self
        }
    }

    /// `c0 - c1 * u`
    #[inline(always)]
    pub fn conjugate(&self) -> Self {
        Fp2 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Multiply by the cubic non-residue `u + 1`
    #[inline(always)]
    pub fn mul_by_nonresidue(&self) -> Fp2 {
        // (a + bu)(u + 1) = (a - b) + (a + b)u
        Fp2 {
            c0: self.c0 - self.c1,
            c1: self.c0 + self.c1,
        }
    }

    /// Multiply both coefficients by a base field element
    #[inline]
    pub fn mul_by_fp(&self, b: &Fp) -> Fp2 {
        Fp2 {
            c0: self.c0 * b,
            c1: self.c1 * b,
        }
    }

    /// Lexicographic order for compression: compare `c1`, then `c0` when `c1 == 0`
    #[inline]
    pub fn lexicographically_largest(&self) -> Choice {
        self.c1.lexicographically_largest()
            | (self.c1.is_zero() & self.c0.lexicographically_largest())
    }

    /// Complex squaring: `(a + b)(a - b) + 2ab * u`
    pub const fn square(&self) -> Fp2 {
        let a = (&self.c0).add(&self.c1);
        let b = (&self.c0).sub(&self.c1);
        let c = (&self.c0).add(&self.c0);

        Fp2 {
            c0: (&a).mul(&b),
            c1: (&c).mul(&self.c1),
        }
    }

    /// Multiply with the reduction strategy selected at compile time
    #[inline]
    pub fn mul(&self, rhs: &Fp2) -> Fp2 {
        #[cfg(feature = "lazy-reduction")]
        {
            self.mul_lazy(rhs)
        }
        #[cfg(not(feature = "lazy-reduction"))]
        {
            self.mul_interleaved(rhs)
        }
    }

    /// Multiplication with one interleaved reduction per coefficient
    pub fn mul_interleaved(&self, rhs: &Fp2) -> Fp2 {
        // (a0 + a1 u)(b0 + b1 u) = (a0 b0 - a1 b1) + (a0 b1 + a1 b0) u
        Fp2 {
            c0: Fp::sum_of_products([self.c0, -self.c1], [rhs.c0, rhs.c1]),
            c1: Fp::sum_of_products([self.c0, self.c1], [rhs.c1, rhs.c0]),
        }
    }

    /// Karatsuba multiplication over widened products, reduced once per coefficient
    pub fn mul_lazy(&self, rhs: &Fp2) -> Fp2 {
        self.mul_wide(rhs).reduce()
    }

    /// Unreduced Karatsuba product
    pub fn mul_wide(&self, rhs: &Fp2) -> Fp2Wide {
        let t0 = self.c0.mul_wide(&rhs.c0);
        let t1 = self.c1.mul_wide(&rhs.c1);
        let t2 = (self.c0 + self.c1).mul_wide(&(rhs.c0 + rhs.c1));

        Fp2Wide {
            c0: t0 - t1,
            c1: t2 - t0 - t1,
        }
    }

    /// Unreduced complex square
    pub fn square_wide(&self) -> Fp2Wide {
        let a = self.c0 + self.c1;
        let b = self.c0 - self.c1;
        let c = self.c0.double();

        Fp2Wide {
            c0: a.mul_wide(&b),
            c1: c.mul_wide(&self.c1),
        }
    }

    /// Sum of two elements
    pub const fn add(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: (&self.c0).add(&rhs.c0),
            c1: (&self.c1).add(&rhs.c1),
        }
    }

    /// Twice this element
    pub const fn double(&self) -> Fp2 {
        self.add(self)
    }

    /// Difference of two elements
    pub const fn sub(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: (&self.c0).sub(&rhs.c0),
            c1: (&self.c1).sub(&rhs.c1),
        }
    }

    /// Additive inverse
    pub const fn neg(&self) -> Fp2 {
        Fp2 {
            c0: (&self.c0).neg(),
            c1: (&self.c1).neg(),
        }
    }

    /// Square root, none when `self` is a non-residue.
    ///
    /// Algorithm 9 of <https://eprint.iacr.org/2012/685.pdf>, specialised to
    /// p = 3 mod 4.
    pub fn sqrt(&self) -> CtOption<Self> {
        let a1 = self.pow_vartime(&P_MINUS_3_OVER_4);
        let alpha = a1.square() * self;
        let x0 = a1 * self;

        // alpha == -1 means the root is x0 * u
        let minus_one = Fp2::one().neg();
        if alpha == minus_one {
            let root = Fp2 {
                c0: -x0.c1,
                c1: x0.c0,
            };
            return CtOption::new(root, Choice::from(1u8));
        }

        let b = (alpha + Fp2::one()).pow_vartime(&P_MINUS_1_OVER_2);
        let root = b * x0;
        CtOption::new(root, root.square().ct_eq(self))
    }

    /// Inverse through the norm `c0^2 + c1^2`, none for zero
    pub fn invert(&self) -> CtOption<Self> {
        self.c0
            .square()
            .add(&self.c1.square())
            .invert()
            .map(|t| Fp2 {
                c0: self.c0 * t,
                c1: self.c1 * -t,
            })
    }

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

    /// Variable-time exponentiation by an arbitrary little-endian limb exponent
    pub fn pow_vartime_extended(&self, by: &[u64]) -> Self {
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

    /// Decode `c1 || c0` big-endian
    pub fn from_bytes(bytes: &[u8; 96]) -> CtOption<Fp2> {
        let mut c1 = [0u8; 48];
        let mut c0 = [0u8; 48];
        c1.copy_from_slice(&bytes[0..48]);
        c0.copy_from_slice(&bytes[48..96]);

        Fp::from_bytes(&c1).and_then(|c1| Fp::from_bytes(&c0).map(|c0| Fp2 { c0, c1 }))
    }

    /// Encode as `c1 || c0` big-endian
    pub fn to_bytes(&self) -> [u8; 96] {
        let mut res = [0u8; 96];
        res[0..48].copy_from_slice(&self.c1.to_bytes());
        res[48..96].copy_from_slice(&self.c0.to_bytes());
        res
    }
}

/// Unreduced `Fp2` value with widened coefficients
#[derive(Copy, Clone, Debug)]
pub struct Fp2Wide {
    /// Constant coefficient
    pub c0: FpWide,
    /// Coefficient of `u`
    pub c1: FpWide,
}

impl Fp2Wide {
    /// Sum of two accumulators
    #[inline]
    pub fn add(&self, rhs: &Fp2Wide) -> Fp2Wide {
        Fp2Wide {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }

    /// Difference of two accumulators
    #[inline]
    pub fn sub(&self, rhs: &Fp2Wide) -> Fp2Wide {
        Fp2Wide {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }

    /// Multiply by `u + 1` without reducing
    #[inline]
    pub fn mul_by_nonresidue(&self) -> Fp2Wide {
        Fp2Wide {
            c0: self.c0 - self.c1,
            c1: self.c0 + self.c1,
        }
    }

    /// Reduce both coefficients
    #[inline]
    pub fn reduce(&self) -> Fp2 {
        Fp2 {
            c0: self.c0.reduce(),
            c1: self.c1.reduce(),
        }
    }
}

impl<'a, 'b> Add<&'b Fp2Wide> for &'a Fp2Wide {
    type Output = Fp2Wide;
    #[inline]
    fn add(self, rhs: &'b Fp2Wide) -> Fp2Wide {
        Fp2Wide::add(self, rhs)
    }
}

impl<'a, 'b> Sub<&'b Fp2Wide> for &'a Fp2Wide {
    type Output = Fp2Wide;
    #[inline]
    fn sub(self, rhs: &'b Fp2Wide) -> Fp2Wide {
        Fp2Wide::sub(self, rhs)
    }
}

impl_binops_additive!(Fp2Wide, Fp2Wide);
