//! Runtime curve registry and curve-erased value handles.
//!
//! Callers that know the curve at compile time should use the generic
//! point and scalar types directly. This module serves protocol stacks
//! that select the curve at runtime, by name or identifier: each curve is
//! backed by a process-wide singleton implementing [`PrimeOrderCurve`],
//! and values produced by one instance are tagged so that mixing curves
//! is caught as [`Error::CurveMismatch`] rather than computing nonsense.

use crate::{
    arithmetic::util::words_to_be_bytes,
    field::FieldElement as CurveFieldElement,
    scalar::Scalar as CurveScalar,
    sec1::EncodedPoint,
    AffinePoint, Error, PrimeCurveParams, ProjectivePoint, Result, Sm2P256V1,
};
use core::marker::PhantomData;
use std::sync::LazyLock;

/// Identifies a supported curve.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum CurveId {
    /// sm2p256v1 (GB/T 32918.5-2017)
    Sm2P256V1,
}

impl CurveId {
    /// Canonical lowercase name of the curve.
    pub fn name(self) -> &'static str {
        match self {
            CurveId::Sm2P256V1 => Sm2P256V1::NAME,
        }
    }

    /// Looks up a curve identifier by its canonical name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "sm2p256v1" => Ok(CurveId::Sm2P256V1),
            _ => Err(Error::CurveNotSupported),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum PointInner {
    Sm2P256V1(ProjectivePoint<Sm2P256V1>),
}

/// A curve point tied to the instance that created it.
#[derive(Clone, Copy, Debug)]
pub struct Point(PointInner);

impl Point {
    /// The curve this point belongs to.
    pub fn curve_id(&self) -> CurveId {
        match self.0 {
            PointInner::Sm2P256V1(_) => CurveId::Sm2P256V1,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum ScalarInner {
    Sm2P256V1(CurveScalar<Sm2P256V1>),
}

/// A scalar tied to the instance that created it.
#[derive(Clone, Copy, Debug)]
pub struct Scalar(ScalarInner);

impl Scalar {
    /// The curve this scalar belongs to.
    pub fn curve_id(&self) -> CurveId {
        match self.0 {
            ScalarInner::Sm2P256V1(_) => CurveId::Sm2P256V1,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum FieldElementInner {
    Sm2P256V1(CurveFieldElement<Sm2P256V1>),
}

/// A base-field element tied to the instance that created it.
#[derive(Clone, Copy, Debug)]
pub struct FieldElement(FieldElementInner);

impl FieldElement {
    /// The curve this field element belongs to.
    pub fn curve_id(&self) -> CurveId {
        match self.0 {
            FieldElementInner::Sm2P256V1(_) => CurveId::Sm2P256V1,
        }
    }
}

/// A prime-order elliptic curve selected at runtime.
///
/// All point and scalar operations run in constant time with respect to
/// the values involved; only encoding structure and curve identity are
/// treated as public.
pub trait PrimeOrderCurve: Send + Sync {
    /// Identifier of this curve.
    fn id(&self) -> CurveId;

    /// Canonical lowercase name of this curve.
    fn name(&self) -> &'static str;

    /// The field prime `p`, big-endian.
    fn prime(&self) -> [u8; 32];

    /// The group order `n`, big-endian.
    fn order(&self) -> [u8; 32];

    /// Decodes a scalar from its canonical big-endian encoding.
    fn scalar_from_bytes(&self, bytes: &[u8; 32]) -> Result<Scalar>;

    /// Encodes a scalar in canonical big-endian form.
    fn scalar_to_bytes(&self, scalar: &Scalar) -> Result<[u8; 32]>;

    /// Decodes a base-field element from its canonical big-endian
    /// encoding.
    fn field_element_from_bytes(&self, bytes: &[u8; 32]) -> Result<FieldElement>;

    /// Encodes a base-field element in canonical big-endian form.
    fn field_element_to_bytes(&self, fe: &FieldElement) -> Result<[u8; 32]>;

    /// Returns the base point of the curve.
    fn generator(&self) -> Point;

    /// Returns the identity (point at infinity).
    fn identity(&self) -> Point;

    /// Returns `[k] G` for the curve generator `G`.
    fn mul_base(&self, k: &Scalar) -> Result<Point>;

    /// Returns `[k] p`.
    fn mul(&self, p: &Point, k: &Scalar) -> Result<Point>;

    /// Returns `a + b`.
    fn add(&self, a: &Point, b: &Point) -> Result<Point>;

    /// Returns `-p`.
    fn negate(&self, p: &Point) -> Result<Point>;

    /// Compares two points for equality as group elements.
    fn eq_points(&self, a: &Point, b: &Point) -> Result<bool>;

    /// Serializes a point in SEC1 form.
    fn serialize(&self, p: &Point, compress: bool) -> Result<EncodedPoint>;

    /// Deserializes a SEC1 encoding, validating that it names a point on
    /// this curve.
    fn deserialize(&self, encoded: &EncodedPoint) -> Result<Point>;
}

/// Wrapping and unwrapping of curve-erased handles for a concrete curve.
pub(crate) trait CurveValues: PrimeCurveParams {
    const ID: CurveId;

    fn wrap_point(p: ProjectivePoint<Self>) -> Point;
    fn unwrap_point(p: &Point) -> Result<ProjectivePoint<Self>>;
    fn wrap_scalar(k: CurveScalar<Self>) -> Scalar;
    fn unwrap_scalar(k: &Scalar) -> Result<CurveScalar<Self>>;
    fn wrap_fe(fe: CurveFieldElement<Self>) -> FieldElement;
    fn unwrap_fe(fe: &FieldElement) -> Result<CurveFieldElement<Self>>;
}

impl CurveValues for Sm2P256V1 {
    const ID: CurveId = CurveId::Sm2P256V1;

    fn wrap_point(p: ProjectivePoint<Self>) -> Point {
        Point(PointInner::Sm2P256V1(p))
    }

    fn unwrap_point(p: &Point) -> Result<ProjectivePoint<Self>> {
        match p.0 {
            PointInner::Sm2P256V1(inner) => Ok(inner),
        }
    }

    fn wrap_scalar(k: CurveScalar<Self>) -> Scalar {
        Scalar(ScalarInner::Sm2P256V1(k))
    }

    fn unwrap_scalar(k: &Scalar) -> Result<CurveScalar<Self>> {
        match k.0 {
            ScalarInner::Sm2P256V1(inner) => Ok(inner),
        }
    }

    fn wrap_fe(fe: CurveFieldElement<Self>) -> FieldElement {
        FieldElement(FieldElementInner::Sm2P256V1(fe))
    }

    fn unwrap_fe(fe: &FieldElement) -> Result<CurveFieldElement<Self>> {
        match fe.0 {
            FieldElementInner::Sm2P256V1(inner) => Ok(inner),
        }
    }
}

/// Adapts a concrete curve's generic types to the object-safe surface.
struct CurveInstance<C: CurveValues>(PhantomData<C>);

impl<C: CurveValues> PrimeOrderCurve for CurveInstance<C> {
    fn id(&self) -> CurveId {
        C::ID
    }

    fn name(&self) -> &'static str {
        C::NAME
    }

    fn prime(&self) -> [u8; 32] {
        words_to_be_bytes(&C::MODULUS)
    }

    fn order(&self) -> [u8; 32] {
        words_to_be_bytes(&C::ORDER)
    }

    fn scalar_from_bytes(&self, bytes: &[u8; 32]) -> Result<Scalar> {
        Option::from(CurveScalar::<C>::from_bytes(bytes))
            .map(C::wrap_scalar)
            .ok_or(Error::Decode)
    }

    fn scalar_to_bytes(&self, scalar: &Scalar) -> Result<[u8; 32]> {
        Ok(C::unwrap_scalar(scalar)?.to_bytes())
    }

    fn field_element_from_bytes(&self, bytes: &[u8; 32]) -> Result<FieldElement> {
        Option::from(CurveFieldElement::<C>::from_bytes(bytes))
            .map(C::wrap_fe)
            .ok_or(Error::Decode)
    }

    fn field_element_to_bytes(&self, fe: &FieldElement) -> Result<[u8; 32]> {
        Ok(C::unwrap_fe(fe)?.to_bytes())
    }

    fn generator(&self) -> Point {
        C::wrap_point(ProjectivePoint::GENERATOR)
    }

    fn identity(&self) -> Point {
        C::wrap_point(ProjectivePoint::IDENTITY)
    }

    fn mul_base(&self, k: &Scalar) -> Result<Point> {
        let k = C::unwrap_scalar(k)?;
        Ok(C::wrap_point(ProjectivePoint::mul_base(&k)))
    }

    fn mul(&self, p: &Point, k: &Scalar) -> Result<Point> {
        let p = C::unwrap_point(p)?;
        let k = C::unwrap_scalar(k)?;
        Ok(C::wrap_point(p.mul(&k)))
    }

    fn add(&self, a: &Point, b: &Point) -> Result<Point> {
        let a = C::unwrap_point(a)?;
        let b = C::unwrap_point(b)?;
        Ok(C::wrap_point(a.add(&b)))
    }

    fn negate(&self, p: &Point) -> Result<Point> {
        Ok(C::wrap_point(C::unwrap_point(p)?.neg()))
    }

    fn eq_points(&self, a: &Point, b: &Point) -> Result<bool> {
        Ok(C::unwrap_point(a)? == C::unwrap_point(b)?)
    }

    fn serialize(&self, p: &Point, compress: bool) -> Result<EncodedPoint> {
        Ok(C::unwrap_point(p)?.to_affine().to_encoded_point(compress))
    }

    fn deserialize(&self, encoded: &EncodedPoint) -> Result<Point> {
        Option::from(AffinePoint::<C>::from_encoded_point(encoded))
            .map(|affine: AffinePoint<C>| C::wrap_point(affine.into()))
            .ok_or(Error::Decode)
    }
}

static SM2P256V1: LazyLock<CurveInstance<Sm2P256V1>> =
    LazyLock::new(|| CurveInstance(PhantomData));

/// Returns the process-wide instance of the identified curve.
pub fn curve(id: CurveId) -> &'static dyn PrimeOrderCurve {
    match id {
        CurveId::Sm2P256V1 => &*SM2P256V1,
    }
}

/// Returns the process-wide instance of the named curve.
pub fn curve_by_name(name: &str) -> Result<&'static dyn PrimeOrderCurve> {
    Ok(curve(CurveId::from_name(name)?))
}
