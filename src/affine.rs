//! Affine curve points.

#![allow(clippy::op_ref)]

use crate::{
    sec1::{Coordinates, EncodedPoint},
    FieldElement, PrimeCurveParams, ProjectivePoint,
};
use core::ops::Neg;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// Point on a Weierstrass curve in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint<C: PrimeCurveParams> {
    /// x-coordinate
    pub(crate) x: FieldElement<C>,

    /// y-coordinate
    pub(crate) y: FieldElement<C>,

    /// Is this point the point at infinity? 0 = no, 1 = yes
    ///
    /// This is a proxy for [`Choice`], but uses `u8` instead to permit `const`
    /// constructors for `IDENTITY` and `GENERATOR`.
    pub(crate) infinity: u8,
}

impl<C> AffinePoint<C>
where
    C: PrimeCurveParams,
{
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: 1,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        infinity: 0,
    };

    /// x-coordinate of this point.
    ///
    /// The coordinates of the identity are not meaningful.
    pub fn x(&self) -> FieldElement<C> {
        self.x
    }

    /// y-coordinate of this point.
    pub fn y(&self) -> FieldElement<C> {
        self.y
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }

    /// Returns whether the coordinates satisfy the curve equation
    /// `y² = x³ + ax + b`. The identity counts as on the curve.
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y * &self.y;
        let rhs = self.x * &self.x * &self.x + &(C::EQUATION_A * &self.x) + &C::EQUATION_B;
        lhs.ct_eq(&rhs) | self.is_identity()
    }

    /// Recovers a point from an x-coordinate and the parity of its
    /// y-coordinate.
    ///
    /// Returns `None` if `x_bytes` is out of range or `x` is not the
    /// abscissa of a curve point.
    pub fn decompress(x_bytes: &[u8; 32], y_is_odd: Choice) -> CtOption<Self> {
        FieldElement::from_bytes(x_bytes).and_then(|x| {
            let alpha = x * &x * &x + &(C::EQUATION_A * &x) + &C::EQUATION_B;
            let beta = alpha.sqrt();

            beta.map(|beta| {
                let y = FieldElement::conditional_select(
                    &-beta,
                    &beta,
                    beta.is_odd().ct_eq(&y_is_odd),
                );

                Self { x, y, infinity: 0 }
            })
        })
    }

    /// Attempts to parse the given [`EncodedPoint`] as an SEC1-encoded
    /// [`AffinePoint`].
    ///
    /// # Returns
    ///
    /// `None` if the coordinates are out of range or do not name a point
    /// on this curve.
    pub fn from_encoded_point(encoded_point: &EncodedPoint) -> CtOption<Self> {
        match encoded_point.coordinates() {
            Coordinates::Identity => CtOption::new(Self::IDENTITY, 1.into()),
            Coordinates::Compressed { x, y_is_odd } => {
                Self::decompress(&x, Choice::from(y_is_odd as u8))
            }
            Coordinates::Uncompressed { x, y } => FieldElement::from_bytes(&y).and_then(|y| {
                FieldElement::from_bytes(&x).and_then(|x| {
                    let point = Self { x, y, infinity: 0 };
                    CtOption::new(point, point.is_on_curve())
                })
            }),
        }
    }

    /// Serializes this point in SEC1 form, compressed or uncompressed.
    ///
    /// The identity serializes as the single-byte identity encoding either
    /// way.
    pub fn to_encoded_point(&self, compress: bool) -> EncodedPoint {
        if self.is_identity().into() {
            return EncodedPoint::identity();
        }

        if compress {
            EncodedPoint::from_compressed(&self.x.to_bytes(), self.y.is_odd().into())
        } else {
            EncodedPoint::from_uncompressed(&self.x.to_bytes(), &self.y.to_bytes())
        }
    }
}

impl<C> ConditionallySelectable for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<C> ConstantTimeEq for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y) & self.infinity.ct_eq(&other.infinity)
    }
}

impl<C> PartialEq for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> Eq for AffinePoint<C> where C: PrimeCurveParams {}

impl<C> Default for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> DefaultIsZeroes for AffinePoint<C> where C: PrimeCurveParams {}

impl<C> From<ProjectivePoint<C>> for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    fn from(p: ProjectivePoint<C>) -> AffinePoint<C> {
        p.to_affine()
    }
}

impl<C> From<&ProjectivePoint<C>> for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    fn from(p: &ProjectivePoint<C>) -> AffinePoint<C> {
        p.to_affine()
    }
}

impl<C> Neg for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }
}

impl<C> Neg for &AffinePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = AffinePoint<C>;

    fn neg(self) -> AffinePoint<C> {
        -(*self)
    }
}
