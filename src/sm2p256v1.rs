//! sm2p256v1 curve parameters (GB/T 32918.5-2017, a.k.a. SM2).
//!
//! The field prime has Solinas form, so products are reduced with eight
//! signed partial sums over the 32-bit limbs of the product rather than
//! Montgomery arithmetic. Field elements are therefore stored as plain
//! canonical integers.

use crate::{
    arithmetic::{
        solinas::SolinasAccum,
        util::{cnd_add, get_u32, sub_words, WideWords, Word, Words, LIMBS},
    },
    point_arithmetic::EquationAIsMinusThree,
    FieldElement, FieldRep, PrimeCurveParams,
};
use crypto_bigint::U256;

const MODULUS_HEX: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF";
const ORDER_HEX: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123";

/// The sm2p256v1 elliptic curve.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sm2P256V1;

/// Returns `((i + 1) * p) mod 2^256` for small `i`.
///
/// Multiples of this prime have a simple word structure, so the value is
/// computed directly instead of via a table lookup.
fn sm2_mul_mod_256(i: Word) -> Words {
    let mut r = Sm2P256V1::MODULUS;

    #[cfg(target_pointer_width = "32")]
    {
        r[7] = r[7].wrapping_sub(i);
        r[3] = r[3].wrapping_sub(i);
        r[2] = r[2].wrapping_add(i);
        r[0] = r[0].wrapping_sub(i);
    }

    #[cfg(target_pointer_width = "64")]
    {
        let i32 = i << 32;
        r[3] = r[3].wrapping_sub(i32);
        r[1] = r[1].wrapping_sub(i32);
        r[1] = r[1].wrapping_add(i);
        r[0] = r[0].wrapping_sub(i);
    }

    r
}

impl FieldRep for Sm2P256V1 {
    const MODULUS: Words = U256::from_be_hex(MODULUS_HEX).to_words();
    const ONE: Words = {
        let mut w = [0; LIMBS];
        w[0] = 1;
        w
    };

    fn redc(z: &WideWords) -> Words {
        let x00 = get_u32(z, 0) as i64;
        let x01 = get_u32(z, 1) as i64;
        let x02 = get_u32(z, 2) as i64;
        let x03 = get_u32(z, 3) as i64;
        let x04 = get_u32(z, 4) as i64;
        let x05 = get_u32(z, 5) as i64;
        let x06 = get_u32(z, 6) as i64;
        let x07 = get_u32(z, 7) as i64;
        let x08 = get_u32(z, 8) as i64;
        let x09 = get_u32(z, 9) as i64;
        let x10 = get_u32(z, 10) as i64;
        let x11 = get_u32(z, 11) as i64;
        let x12 = get_u32(z, 12) as i64;
        let x13 = get_u32(z, 13) as i64;
        let x14 = get_u32(z, 14) as i64;
        let x15 = get_u32(z, 15) as i64;

        let s0 = x00 + x08 + x09 + x10 + x11 + x12 + 2 * (x13 + x14 + x15);
        let s1 = x01 + x09 + x10 + x11 + x12 + x13 + 2 * (x14 + x15);
        let s2 = x02 - (x08 + x09 + x13 + x14);
        let s3 = x03 + x08 + x11 + x12 + 2 * x13 + x14 + x15;
        let s4 = x04 + x09 + x12 + x13 + 2 * x14 + x15;
        let s5 = x05 + x10 + x13 + x14 + 2 * x15;
        let s6 = x06 + x11 + x14 + x15;
        let s7 = x07 + x08 + x09 + x10 + x11 + 2 * (x12 + x13 + x14 + x15) + x15;

        let mut r = [0; LIMBS];

        let mut sum = SolinasAccum::new(&mut r);
        sum.accum(s0);
        sum.accum(s1);
        sum.accum(s2);
        sum.accum(s3);
        sum.accum(s4);
        sum.accum(s5);
        sum.accum(s6);
        sum.accum(s7);
        let s = sum.final_carry(0);

        // The accumulated value is r + s*2^256 and lies below (s + 2)*p.
        // Subtracting (s + 1)*p (mod 2^256) leaves a value in (-p, p);
        // adding p back on borrow lands in [0, p).
        let correction = sm2_mul_mod_256(s);
        let (r, borrow) = sub_words(&r, &correction);
        cnd_add(&r, &Self::MODULUS, borrow)
    }

    fn to_rep(w: &Words) -> Words {
        *w
    }

    fn from_rep(w: &Words) -> Words {
        *w
    }
}

impl PrimeCurveParams for Sm2P256V1 {
    type PointArithmetic = EquationAIsMinusThree;

    const EQUATION_A: FieldElement<Self> =
        FieldElement::from_hex("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFC");
    const EQUATION_B: FieldElement<Self> =
        FieldElement::from_hex("28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93");
    const GENERATOR: (FieldElement<Self>, FieldElement<Self>) = (
        FieldElement::from_hex("32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7"),
        FieldElement::from_hex("BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0"),
    );
    const ORDER: Words = U256::from_be_hex(ORDER_HEX).to_words();
    const NAME: &'static str = "sm2p256v1";

    /// Returns `x^(p - 3)`, i.e. `1 / x²` for nonzero `x`.
    ///
    /// Fixed addition chain generated by
    /// <https://github.com/mmcloughlin/addchain>: builds the runs of ones
    /// in the exponent (2^k - 1 for k = 6, 7, 12, 24, 31, 62) and stitches
    /// them together with shifts.
    fn fe_invert2(x: &FieldElement<Self>) -> FieldElement<Self> {
        let z = x.square();
        let t0 = *x * z;
        let z = t0.square();
        let z = z * x;
        let t1 = z.sqn(3);
        let t1 = t1 * z;
        let t2 = t1.square();
        let z = t2 * x;
        let t2 = t2.sqn(5);
        let t1 = t1 * t2;
        let t2 = t1.sqn(12);
        let t1 = t1 * t2;
        let t1 = t1.sqn(7);
        let z = z * t1;
        let t2 = z.sqn(2);
        let t1 = t2.sqn(29);
        let z = z * t1;
        let t1 = t1.sqn(2);
        let t2 = t2 * t1;
        let t0 = t0 * t2;
        let t1 = t1.sqn(32);
        let t1 = t1 * t0;
        let t1 = t1.sqn(64);
        let t0 = t0 * t1;
        let t0 = t0.sqn(94);
        let z = z * t0;
        z.sqn(2)
    }
}
