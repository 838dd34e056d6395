//! Scalars modulo the curve group order.

use crate::{
    arithmetic::util::{
        add_mod, sub_mod, sub_words, words_from_be_bytes, words_to_be_bytes, words_to_le_bytes,
        Word, Words, LIMBS,
    },
    PrimeCurveParams,
};
use core::{
    fmt::{self, Debug},
    marker::PhantomData,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// An integer modulo the curve's group order `n`, stored in canonical
/// form.
///
/// Scalars serve as multipliers for curve points. Only additive
/// arithmetic is provided; the group order is prime, so any protocol
/// needing scalar inversion or multiplication should build it atop this
/// type's byte codec.
#[derive(Clone, Copy)]
pub struct Scalar<C: PrimeCurveParams>(Words, PhantomData<C>);

impl<C: PrimeCurveParams> Scalar<C> {
    /// Zero.
    pub const ZERO: Self = Self([0; LIMBS], PhantomData);

    /// One.
    pub const ONE: Self = Self(
        {
            let mut w = [0; LIMBS];
            w[0] = 1;
            w
        },
        PhantomData,
    );

    /// Decodes a canonical 32-byte big-endian encoding.
    ///
    /// Returns `None` if the value is not less than the group order.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let w = words_from_be_bytes(bytes);
        let (_, borrow) = sub_words(&w, &C::ORDER);
        let in_range = Choice::from((borrow & 1) as u8);
        CtOption::new(Self(w, PhantomData), in_range)
    }

    /// Returns the canonical 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        words_to_be_bytes(&self.0)
    }

    /// Returns the canonical little-endian encoding, as used for window
    /// extraction during scalar multiplication.
    pub fn to_le_bytes(&self) -> [u8; 32] {
        words_to_le_bytes(&self.0)
    }

    /// Converts a small integer into a scalar.
    pub fn from_u64(n: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        Self(words_from_be_bytes(&bytes), PhantomData)
    }

    /// Samples a uniformly random scalar by rejection sampling.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);

            if let Some(scalar) = Self::from_bytes(&bytes).into() {
                return scalar;
            }
        }
    }

    /// Returns `self + rhs (mod n)`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self(add_mod(&self.0, &rhs.0, &C::ORDER), PhantomData)
    }

    /// Returns `self - rhs (mod n)`.
    pub fn subtract(&self, rhs: &Self) -> Self {
        Self(sub_mod(&self.0, &rhs.0, &C::ORDER), PhantomData)
    }

    /// Returns `-self (mod n)`.
    pub fn negate(&self) -> Self {
        Self(sub_mod(&[0; LIMBS], &self.0, &C::ORDER), PhantomData)
    }

    /// Returns whether this scalar is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }
}

impl<C: PrimeCurveParams> ConstantTimeEq for Scalar<C> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut eq = Choice::from(1);
        for i in 0..LIMBS {
            eq &= self.0[i].ct_eq(&other.0[i]);
        }
        eq
    }
}

impl<C: PrimeCurveParams> ConditionallySelectable for Scalar<C> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut w = [0; LIMBS];
        for i in 0..LIMBS {
            w[i] = Word::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(w, PhantomData)
    }
}

impl<C: PrimeCurveParams> PartialEq for Scalar<C> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C: PrimeCurveParams> Eq for Scalar<C> {}

impl<C: PrimeCurveParams> Default for Scalar<C> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<C: PrimeCurveParams> DefaultIsZeroes for Scalar<C> {}

impl<C: PrimeCurveParams> Debug for Scalar<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(0x")?;
        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }
        f.write_str(")")
    }
}

impl<C: PrimeCurveParams> Add for Scalar<C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Scalar::add(&self, &rhs)
    }
}

impl<C: PrimeCurveParams> Add<&Scalar<C>> for Scalar<C> {
    type Output = Self;

    fn add(self, rhs: &Self) -> Self {
        Scalar::add(&self, rhs)
    }
}

impl<C: PrimeCurveParams> AddAssign for Scalar<C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = Scalar::add(self, &rhs);
    }
}

impl<C: PrimeCurveParams> Sub for Scalar<C> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(&rhs)
    }
}

impl<C: PrimeCurveParams> Sub<&Scalar<C>> for Scalar<C> {
    type Output = Self;

    fn sub(self, rhs: &Self) -> Self {
        self.subtract(rhs)
    }
}

impl<C: PrimeCurveParams> SubAssign for Scalar<C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract(&rhs);
    }
}

impl<C: PrimeCurveParams> Neg for Scalar<C> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl<C: PrimeCurveParams> Neg for &Scalar<C> {
    type Output = Scalar<C>;

    fn neg(self) -> Scalar<C> {
        self.negate()
    }
}
