//! Generic base-field elements parameterized by a reduction strategy.

use crate::arithmetic::util::{
    self, add_mod, mul_wide, square_wide, sub_mod, sub_words, wide_words_from_be_bytes,
    words_from_be_bytes, words_to_be_bytes, WideWords, Word, Words, LIMBS,
};
use core::{
    fmt::{self, Debug},
    marker::PhantomData,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use crypto_bigint::U256;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// Internal representation strategy for elements of a prime field.
///
/// A representation fixes the modulus, how elements are stored in words,
/// and how double-width products are reduced. Curves with a Solinas-form
/// prime implement [`FieldRep::redc`] with the curve's dedicated partial
/// sums and keep `to_rep`/`from_rep` as the identity; a Montgomery-form
/// representation would map through the Montgomery domain instead.
///
/// All methods must run in constant time for a fixed word width.
pub trait FieldRep:
    Copy + Clone + Debug + Default + Eq + PartialEq + Send + Sync + 'static
{
    /// The field modulus `p`, as little-endian words.
    const MODULUS: Words;

    /// The multiplicative identity, already in representation form.
    const ONE: Words;

    /// Reduces a double-width product into `[0, p)`, in representation
    /// form.
    fn redc(w: &WideWords) -> Words;

    /// Converts a canonical integer in `[0, p)` into representation form.
    fn to_rep(w: &Words) -> Words;

    /// Converts representation form back to a canonical integer in
    /// `[0, p)`.
    fn from_rep(w: &Words) -> Words;

    /// Reduces an arbitrary 512-bit integer into representation form.
    ///
    /// Used for deriving field elements from wide random or hash output,
    /// where the input is not a product of two reduced elements.
    fn wide_to_rep(w: &WideWords) -> Words {
        Self::redc(w)
    }
}

/// An element of the prime field described by the representation `R`.
///
/// Values are always stored reduced. Arithmetic runs in constant time;
/// only [`FieldElement::from_hex`] and the `Debug` impl are exempt.
#[derive(Clone, Copy)]
pub struct FieldElement<R: FieldRep>(pub(crate) Words, PhantomData<R>);

impl<R: FieldRep> FieldElement<R> {
    /// Additive identity.
    pub const ZERO: Self = Self([0; LIMBS], PhantomData);

    /// Multiplicative identity.
    pub const ONE: Self = Self(R::ONE, PhantomData);

    /// Parses a big-endian hex constant, taken as already being in
    /// representation form.
    ///
    /// Intended for curve parameter constants; panics in const evaluation
    /// on malformed input.
    pub const fn from_hex(hex: &str) -> Self {
        Self(U256::from_be_hex(hex).to_words(), PhantomData)
    }

    /// Converts a small integer into a field element.
    pub fn from_u64(n: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        Self(R::to_rep(&words_from_be_bytes(&bytes)), PhantomData)
    }

    /// Decodes a canonical 32-byte big-endian encoding.
    ///
    /// Returns `None` if the value is not fully reduced.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let w = words_from_be_bytes(bytes);
        let (_, borrow) = sub_words(&w, &R::MODULUS);
        let in_range = Choice::from((borrow & 1) as u8);
        CtOption::new(Self(R::to_rep(&w), PhantomData), in_range)
    }

    /// Reduces 64 big-endian bytes into a field element.
    ///
    /// The bias of the resulting distribution is negligible for a 256-bit
    /// modulus, so this is the preferred way to derive elements from
    /// random or hash output.
    pub fn from_bytes_wide(bytes: &[u8; 64]) -> Self {
        Self(R::wide_to_rep(&wide_words_from_be_bytes(bytes)), PhantomData)
    }

    /// Returns the canonical 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        words_to_be_bytes(&R::from_rep(&self.0))
    }

    /// Samples a uniformly random field element.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let mut bytes = [0u8; 64];
        rng.fill_bytes(&mut bytes);
        Self::from_bytes_wide(&bytes)
    }

    /// Returns `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self(add_mod(&self.0, &rhs.0, &R::MODULUS), PhantomData)
    }

    /// Returns `self - rhs`.
    pub fn subtract(&self, rhs: &Self) -> Self {
        Self(sub_mod(&self.0, &rhs.0, &R::MODULUS), PhantomData)
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        Self(sub_mod(&[0; LIMBS], &self.0, &R::MODULUS), PhantomData)
    }

    /// Returns `self * rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self(R::redc(&mul_wide(&self.0, &rhs.0)), PhantomData)
    }

    /// Returns `self * self`.
    pub fn square(&self) -> Self {
        Self(R::redc(&square_wide(&self.0)), PhantomData)
    }

    /// Returns `self^(2^n)` by `n` repeated squarings.
    pub fn sqn(&self, n: usize) -> Self {
        let mut x = *self;
        for _ in 0..n {
            x = x.square();
        }
        x
    }

    /// Returns `2 * self`.
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Raises `self` to a fixed 256-bit exponent.
    ///
    /// Square-and-always-multiply over every exponent bit; the sequence of
    /// field operations does not depend on the base. The exponent itself
    /// must be public.
    pub fn pow(&self, exp: &Words) -> Self {
        let mut acc = Self::ONE;
        for i in (0..LIMBS * Word::BITS as usize).rev() {
            acc = acc.square();
            let bit = (exp[i / Word::BITS as usize] >> (i % Word::BITS as usize)) & 1;
            let product = acc.multiply(self);
            acc.conditional_assign(&product, Choice::from(bit as u8));
        }
        acc
    }

    /// Computes a square root, if one exists.
    ///
    /// Requires `p ≡ 3 (mod 4)`, where the root is `self^((p + 1) / 4)`.
    pub fn sqrt(&self) -> CtOption<Self> {
        let exp = util::wadd1(&util::shr2(&R::MODULUS));
        let candidate = self.pow(&exp);
        CtOption::new(candidate, candidate.square().ct_eq(self))
    }

    /// Returns whether this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Returns whether the canonical integer form of this element is odd.
    pub fn is_odd(&self) -> Choice {
        Choice::from((R::from_rep(&self.0)[0] & 1) as u8)
    }
}

impl<R: FieldRep> ConstantTimeEq for FieldElement<R> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut eq = Choice::from(1);
        for i in 0..LIMBS {
            eq &= self.0[i].ct_eq(&other.0[i]);
        }
        eq
    }
}

impl<R: FieldRep> ConditionallySelectable for FieldElement<R> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut w = [0; LIMBS];
        for i in 0..LIMBS {
            w[i] = Word::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(w, PhantomData)
    }
}

impl<R: FieldRep> PartialEq for FieldElement<R> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<R: FieldRep> Eq for FieldElement<R> {}

impl<R: FieldRep> Default for FieldElement<R> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<R: FieldRep> DefaultIsZeroes for FieldElement<R> {}

impl<R: FieldRep> Debug for FieldElement<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldElement(0x")?;
        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }
        f.write_str(")")
    }
}

impl<R: FieldRep> Add for FieldElement<R> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        FieldElement::add(&self, &rhs)
    }
}

impl<R: FieldRep> Add<&FieldElement<R>> for FieldElement<R> {
    type Output = Self;

    fn add(self, rhs: &Self) -> Self {
        FieldElement::add(&self, rhs)
    }
}

impl<R: FieldRep> Add for &FieldElement<R> {
    type Output = FieldElement<R>;

    fn add(self, rhs: Self) -> FieldElement<R> {
        FieldElement::add(self, rhs)
    }
}

impl<R: FieldRep> AddAssign for FieldElement<R> {
    fn add_assign(&mut self, rhs: Self) {
        *self = FieldElement::add(self, &rhs);
    }
}

impl<R: FieldRep> Sub for FieldElement<R> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(&rhs)
    }
}

impl<R: FieldRep> Sub<&FieldElement<R>> for FieldElement<R> {
    type Output = Self;

    fn sub(self, rhs: &Self) -> Self {
        self.subtract(rhs)
    }
}

impl<R: FieldRep> Sub for &FieldElement<R> {
    type Output = FieldElement<R>;

    fn sub(self, rhs: Self) -> FieldElement<R> {
        self.subtract(rhs)
    }
}

impl<R: FieldRep> SubAssign for FieldElement<R> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract(&rhs);
    }
}

impl<R: FieldRep> Mul for FieldElement<R> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl<R: FieldRep> Mul<&FieldElement<R>> for FieldElement<R> {
    type Output = Self;

    fn mul(self, rhs: &Self) -> Self {
        self.multiply(rhs)
    }
}

impl<R: FieldRep> Mul for &FieldElement<R> {
    type Output = FieldElement<R>;

    fn mul(self, rhs: Self) -> FieldElement<R> {
        self.multiply(rhs)
    }
}

impl<R: FieldRep> MulAssign for FieldElement<R> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl<R: FieldRep> Neg for FieldElement<R> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl<R: FieldRep> Neg for &FieldElement<R> {
    type Output = FieldElement<R>;

    fn neg(self) -> FieldElement<R> {
        self.negate()
    }
}
