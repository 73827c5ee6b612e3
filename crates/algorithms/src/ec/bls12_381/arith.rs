//! Multi-precision limb helpers shared by `Fp` and `Scalar`.

/// Compute a + b + carry, returning (result, carry)
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a - (b + borrow), returning (result, borrow)
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a + (b * c) + carry, returning (result, carry)
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Returns true when `a > b` for little-endian limb slices of equal length.
#[inline]
pub(crate) fn gt_limbs(a: &[u64], b: &[u64]) -> bool {
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        if x != y {
            return x > y;
        }
    }
    false
}

/// In-place `a += b`, returning the carry out of the top limb.
#[inline]
pub(crate) fn add_assign_limbs(a: &mut [u64], b: &[u64]) -> u64 {
    let mut carry = 0;
    for (x, y) in a.iter_mut().zip(b.iter()) {
        let (r, c) = adc(*x, *y, carry);
        *x = r;
        carry = c;
    }
    carry
}

/// In-place `a -= b`, returning the borrow mask (all ones on underflow).
#[inline]
pub(crate) fn sub_assign_limbs(a: &mut [u64], b: &[u64]) -> u64 {
    let mut borrow = 0;
    for (x, y) in a.iter_mut().zip(b.iter()) {
        let (r, bw) = sbb(*x, *y, borrow);
        *x = r;
        borrow = bw;
    }
    borrow
}

/// In-place right shift by one bit, shifting `top` into the most significant bit.
#[inline]
pub(crate) fn shr1_limbs(a: &mut [u64], top: u64) {
    let n = a.len();
    for i in 0..n - 1 {
        a[i] = (a[i] >> 1) | (a[i + 1] << 63);
    }
    a[n - 1] = (a[n - 1] >> 1) | (top << 63);
}

/// In-place left shift by one bit, returning the bit shifted out.
#[inline]
pub(crate) fn shl1_limbs(a: &mut [u64]) -> u64 {
    let mut carry = 0;
    for x in a.iter_mut() {
        let next = *x >> 63;
        *x = (*x << 1) | carry;
        carry = next;
    }
    carry
}
