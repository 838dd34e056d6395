//! Projective curve points.

#![allow(clippy::needless_range_loop, clippy::op_ref)]

use crate::{
    point_arithmetic::PointArithmetic, AffinePoint, FieldElement, PrimeCurveParams, Scalar,
};
use core::{
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

/// Point on a Weierstrass curve in projective coordinates.
///
/// Uses the complete formulas, so every operation is defined for every
/// input, including the identity.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint<C: PrimeCurveParams> {
    pub(crate) x: FieldElement<C>,
    pub(crate) y: FieldElement<C>,
    pub(crate) z: FieldElement<C>,
}

impl<C> ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        z: FieldElement::ONE,
    };

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Returns the affine representation of this point, or the affine
    /// identity if it is the point at infinity.
    pub fn to_affine(&self) -> AffinePoint<C> {
        C::fe_invert(&self.z)
            .map(|zinv| self.to_affine_internal(zinv))
            .unwrap_or(AffinePoint::IDENTITY)
    }

    pub(super) fn to_affine_internal(self, zinv: FieldElement<C>) -> AffinePoint<C> {
        AffinePoint {
            x: self.x * &zinv,
            y: self.y * &zinv,
            infinity: 0,
        }
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        C::PointArithmetic::add(self, other)
    }

    /// Returns `self + other`.
    fn add_mixed(&self, other: &AffinePoint<C>) -> Self {
        C::PointArithmetic::add_mixed(self, other)
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `self - other`.
    fn sub_mixed(&self, other: &AffinePoint<C>) -> Self {
        self.add_mixed(&other.neg())
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        C::PointArithmetic::double(self)
    }

    /// Returns `[k] self`, in constant time with respect to `k`.
    ///
    /// Fixed 4-bit windows over the 256-bit scalar: a 16-entry table of
    /// small multiples is built once, then each of the 64 windows performs
    /// four doublings, a masked scan of the whole table, and one addition,
    /// independent of the scalar's value.
    pub fn mul(&self, k: &Scalar<C>) -> Self {
        let k = k.to_le_bytes();

        let mut pc = [Self::default(); 16];
        pc[0] = Self::IDENTITY;
        pc[1] = *self;

        for i in 2..16 {
            pc[i] = if i % 2 == 0 {
                pc[i / 2].double()
            } else {
                pc[i - 1].add(self)
            };
        }

        let mut q = Self::IDENTITY;
        let mut pos = 256 - 4;

        loop {
            let slot = (k[pos >> 3] >> (pos & 7)) & 0xf;

            let mut t = ProjectivePoint::IDENTITY;

            for i in 1..16 {
                t.conditional_assign(
                    &pc[i],
                    Choice::from(((slot as usize ^ i).wrapping_sub(1) >> 8) as u8 & 1),
                );
            }

            q = q.add(&t);

            if pos == 0 {
                break;
            }

            q = q.double().double().double().double();
            pos -= 4;
        }

        q
    }

    /// Returns `[k] G` for the curve generator `G`.
    pub fn mul_base(k: &Scalar<C>) -> Self {
        Self::GENERATOR.mul(k)
    }
}

impl<C> ConditionallySelectable for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<C> ConstantTimeEq for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_affine().ct_eq(&other.to_affine())
    }
}

impl<C> PartialEq for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> Eq for ProjectivePoint<C> where C: PrimeCurveParams {}

impl<C> Default for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> DefaultIsZeroes for ProjectivePoint<C> where C: PrimeCurveParams {}

impl<C> From<AffinePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn from(p: AffinePoint<C>) -> Self {
        let projective = ProjectivePoint {
            x: p.x,
            y: p.y,
            z: FieldElement::ONE,
        };
        Self::conditional_select(&projective, &Self::IDENTITY, p.is_identity())
    }
}

impl<C> From<&AffinePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn from(p: &AffinePoint<C>) -> Self {
        Self::from(*p)
    }
}

impl<C> Add for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn add(self, other: Self) -> Self {
        ProjectivePoint::add(&self, &other)
    }
}

impl<C> Add<&ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn add(self, other: &Self) -> Self {
        ProjectivePoint::add(&self, other)
    }
}

impl<C> Add for &ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = ProjectivePoint<C>;

    fn add(self, other: Self) -> ProjectivePoint<C> {
        ProjectivePoint::add(self, other)
    }
}

impl<C> AddAssign for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn add_assign(&mut self, rhs: Self) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl<C> Add<AffinePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn add(self, other: AffinePoint<C>) -> Self {
        self.add_mixed(&other)
    }
}

impl<C> Add<&AffinePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn add(self, other: &AffinePoint<C>) -> Self {
        self.add_mixed(other)
    }
}

impl<C> AddAssign<AffinePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn add_assign(&mut self, rhs: AffinePoint<C>) {
        *self = self.add_mixed(&rhs);
    }
}

impl<C> Sub for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        ProjectivePoint::sub(&self, &other)
    }
}

impl<C> Sub<&ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn sub(self, other: &Self) -> Self {
        ProjectivePoint::sub(&self, other)
    }
}

impl<C> SubAssign for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn sub_assign(&mut self, rhs: Self) {
        *self = ProjectivePoint::sub(self, &rhs);
    }
}

impl<C> Sub<AffinePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn sub(self, other: AffinePoint<C>) -> Self {
        self.sub_mixed(&other)
    }
}

impl<C> SubAssign<AffinePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn sub_assign(&mut self, rhs: AffinePoint<C>) {
        *self = self.sub_mixed(&rhs);
    }
}

impl<C> Mul<Scalar<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn mul(self, scalar: Scalar<C>) -> Self {
        ProjectivePoint::mul(&self, &scalar)
    }
}

impl<C> Mul<&Scalar<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn mul(self, scalar: &Scalar<C>) -> Self {
        ProjectivePoint::mul(&self, scalar)
    }
}

impl<C> Mul<&Scalar<C>> for &ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = ProjectivePoint<C>;

    fn mul(self, scalar: &Scalar<C>) -> ProjectivePoint<C> {
        ProjectivePoint::mul(self, scalar)
    }
}

impl<C> MulAssign<Scalar<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn mul_assign(&mut self, scalar: Scalar<C>) {
        *self = ProjectivePoint::mul(self, &scalar);
    }
}

impl<C> Neg for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn neg(self) -> Self {
        ProjectivePoint::neg(&self)
    }
}

impl<C> Neg for &ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = ProjectivePoint<C>;

    fn neg(self) -> ProjectivePoint<C> {
        ProjectivePoint::neg(self)
    }
}

impl<C> Sum for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |acc, p| acc + p)
    }
}

impl<'a, C> Sum<&'a ProjectivePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn sum<I: Iterator<Item = &'a ProjectivePoint<C>>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
