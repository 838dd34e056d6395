//! Base field tests for sm2p256v1.

use hex_literal::hex;
use primecurve::{FieldElement, FieldRep, PrimeCurveParams, Sm2P256V1};
use proptest::prelude::*;

type Fe = FieldElement<Sm2P256V1>;

const MODULUS_BYTES: [u8; 32] =
    hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF");

/// Bit-by-bit reference reduction of a 512-bit big-endian value mod p.
///
/// Deliberately shares no code with the Solinas path: the value is folded
/// in one bit at a time with shift, compare, and subtract over u64 limbs.
fn naive_mod_p(bytes: &[u8; 64]) -> [u8; 32] {
    let p = limbs_from_be(&MODULUS_BYTES);

    // r is one limb wider than p so the shift never overflows.
    let mut r = [0u64; 5];

    for byte in bytes {
        for bit in (0..8).rev() {
            // r <<= 1
            for i in (1..5).rev() {
                r[i] = (r[i] << 1) | (r[i - 1] >> 63);
            }
            r[0] <<= 1;
            r[0] |= u64::from((byte >> bit) & 1);

            if geq(&r, &p) {
                sub_in_place(&mut r, &p);
            }
        }
    }

    let mut out = [0u8; 32];
    for i in 0..4 {
        out[i * 8..(i + 1) * 8].copy_from_slice(&r[3 - i].to_be_bytes());
    }
    out
}

fn limbs_from_be(bytes: &[u8; 32]) -> [u64; 5] {
    let mut limbs = [0u64; 5];
    for i in 0..4 {
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
        limbs[3 - i] = u64::from_be_bytes(chunk);
    }
    limbs
}

fn geq(a: &[u64; 5], b: &[u64; 5]) -> bool {
    for i in (0..5).rev() {
        if a[i] != b[i] {
            return a[i] > b[i];
        }
    }
    true
}

fn sub_in_place(a: &mut [u64; 5], b: &[u64; 5]) {
    let mut borrow = 0u64;
    for i in 0..5 {
        let (d, b1) = a[i].overflowing_sub(b[i]);
        let (d, b2) = d.overflowing_sub(borrow);
        a[i] = d;
        borrow = u64::from(b1) + u64::from(b2);
    }
    assert_eq!(borrow, 0);
}

fn fe(bytes: &[u8; 64]) -> Fe {
    Fe::from_bytes_wide(bytes)
}

#[test]
fn modulus_is_not_a_field_element() {
    assert!(bool::from(Fe::from_bytes(&MODULUS_BYTES).is_none()));

    // 2^256 - 1 > p
    assert!(bool::from(Fe::from_bytes(&[0xff; 32]).is_none()));

    let mut below = MODULUS_BYTES;
    below[31] -= 1;
    let x = Fe::from_bytes(&below).unwrap();
    assert_eq!(x.to_bytes(), below);
    assert_eq!(x, -Fe::ONE);
}

#[test]
fn zero_and_one() {
    assert_eq!(Fe::ZERO + Fe::ZERO, Fe::ZERO);
    assert_eq!(Fe::ONE * Fe::ONE, Fe::ONE);
    assert_eq!(Fe::ZERO - Fe::ONE, -Fe::ONE);
    assert!(bool::from(Fe::ZERO.is_zero()));
    assert!(!bool::from(Fe::ONE.is_zero()));
    assert!(bool::from(Fe::ONE.is_odd()));
    assert_eq!(Fe::from_u64(0), Fe::ZERO);
    assert_eq!(Fe::from_u64(1), Fe::ONE);
}

#[test]
fn representation_round_trip() {
    let x = Fe::from_u64(0xdead_beef);
    let bytes = x.to_bytes();
    assert_eq!(Fe::from_bytes(&bytes).unwrap(), x);

    // to_rep and from_rep are inverses on canonical values
    let canonical = Sm2P256V1::from_rep(&Sm2P256V1::to_rep(&Sm2P256V1::MODULUS.map(|_| 7)));
    assert_eq!(canonical, Sm2P256V1::MODULUS.map(|_| 7));
}

#[test]
fn reduction_boundary_values() {
    // zero, the largest 512-bit value, p itself, and p - 1
    let p_wide = {
        let mut bytes = [0u8; 64];
        bytes[32..].copy_from_slice(&MODULUS_BYTES);
        bytes
    };
    let p_minus_1_wide = {
        let mut bytes = p_wide;
        bytes[63] -= 1;
        bytes
    };
    let cases: &[[u8; 64]] = &[[0u8; 64], [0xff; 64], p_wide, p_minus_1_wide];

    for bytes in cases {
        assert_eq!(fe(bytes).to_bytes(), naive_mod_p(bytes));
    }
}

proptest! {
    #[test]
    fn reduction_matches_reference(bytes in any::<[u8; 64]>()) {
        let reduced = fe(&bytes);
        prop_assert_eq!(reduced.to_bytes(), naive_mod_p(&bytes));
    }

    #[test]
    fn addition_is_commutative(a in any::<[u8; 64]>(), b in any::<[u8; 64]>()) {
        let (a, b) = (fe(&a), fe(&b));
        prop_assert_eq!(a + b, b + a);
    }

    #[test]
    fn multiplication_is_commutative(a in any::<[u8; 64]>(), b in any::<[u8; 64]>()) {
        let (a, b) = (fe(&a), fe(&b));
        prop_assert_eq!(a * b, b * a);
    }

    #[test]
    fn multiplication_is_associative(
        a in any::<[u8; 64]>(),
        b in any::<[u8; 64]>(),
        c in any::<[u8; 64]>(),
    ) {
        let (a, b, c) = (fe(&a), fe(&b), fe(&c));
        prop_assert_eq!((a * b) * c, a * (b * c));
    }

    #[test]
    fn multiplication_distributes_over_addition(
        a in any::<[u8; 64]>(),
        b in any::<[u8; 64]>(),
        c in any::<[u8; 64]>(),
    ) {
        let (a, b, c) = (fe(&a), fe(&b), fe(&c));
        prop_assert_eq!(a * (b + c), a * b + a * c);
    }

    #[test]
    fn additive_inverse(a in any::<[u8; 64]>()) {
        let a = fe(&a);
        prop_assert_eq!(a + (-a), Fe::ZERO);
        prop_assert_eq!(a - a, Fe::ZERO);
    }

    #[test]
    fn square_matches_self_multiplication(a in any::<[u8; 64]>()) {
        let a = fe(&a);
        prop_assert_eq!(a.square(), a * a);
        prop_assert_eq!(a.sqn(3), a.square().square().square());
    }

    #[test]
    fn multiplicative_inverse(a in any::<[u8; 64]>()) {
        let a = fe(&a);
        prop_assume!(!bool::from(a.is_zero()));
        let inv = Sm2P256V1::fe_invert(&a).unwrap();
        prop_assert_eq!(a * inv, Fe::ONE);
        prop_assert_eq!(Sm2P256V1::fe_invert2(&a), inv.square());
    }

    #[test]
    fn sqrt_of_square_is_plus_minus_self(a in any::<[u8; 64]>()) {
        let a = fe(&a);
        let root = a.square().sqrt().unwrap();
        prop_assert!(root == a || root == -a);
    }

    #[test]
    fn byte_codec_round_trip(a in any::<[u8; 64]>()) {
        let a = fe(&a);
        prop_assert_eq!(Fe::from_bytes(&a.to_bytes()).unwrap(), a);
    }
}
