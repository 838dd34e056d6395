#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "std")]
extern crate std;

mod affine;
mod arithmetic;
mod error;
mod field;
mod projective;
mod scalar;
mod sm2p256v1;

#[cfg(feature = "std")]
pub mod instance;
pub mod point_arithmetic;
pub mod sec1;

pub use crate::{
    affine::AffinePoint,
    arithmetic::util::{WideWords, Word, Words, LIMBS, WIDE_LIMBS},
    error::{Error, Result},
    field::{FieldElement, FieldRep},
    projective::ProjectivePoint,
    scalar::Scalar,
    sm2p256v1::Sm2P256V1,
};

#[cfg(feature = "std")]
pub use crate::instance::{curve, curve_by_name, CurveId, PrimeOrderCurve};

use crate::arithmetic::util::wsub;
use subtle::CtOption;

/// Parameters for elliptic curves of prime order which can be described by the
/// short Weierstrass equation.
///
/// Implemented on a marker type that also carries the base field's
/// [`FieldRep`].
pub trait PrimeCurveParams: FieldRep {
    /// Point arithmetic formulas matching the curve's 𝒂-coefficient.
    type PointArithmetic: point_arithmetic::PointArithmetic<Self>;

    /// Coefficient `a` in the curve equation.
    const EQUATION_A: FieldElement<Self>;

    /// Coefficient `b` in the curve equation.
    const EQUATION_B: FieldElement<Self>;

    /// Coordinates of the base point.
    const GENERATOR: (FieldElement<Self>, FieldElement<Self>);

    /// The group order `n`, as little-endian words.
    const ORDER: Words;

    /// Canonical lowercase name of the curve.
    const NAME: &'static str;

    /// Returns `x^(p - 3)`, i.e. `1 / x²` for nonzero `x` (and zero for
    /// zero).
    ///
    /// Curves override this with a fixed addition chain tuned to their
    /// prime; the default is a uniform exponentiation.
    fn fe_invert2(x: &FieldElement<Self>) -> FieldElement<Self> {
        x.pow(&wsub(&Self::MODULUS, 3))
    }

    /// Returns `1 / x`, or `None` if `x` is zero.
    fn fe_invert(x: &FieldElement<Self>) -> CtOption<FieldElement<Self>> {
        CtOption::new(Self::fe_invert2(x).multiply(x), !x.is_zero())
    }
}
