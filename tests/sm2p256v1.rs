//! Group law, encoding, and registry tests for sm2p256v1.

use hex_literal::hex;
use primecurve::{
    sec1::EncodedPoint, AffinePoint, Error, ProjectivePoint, Scalar, Sm2P256V1,
};
use proptest::prelude::*;

type Point = ProjectivePoint<Sm2P256V1>;
type Affine = AffinePoint<Sm2P256V1>;
type K = Scalar<Sm2P256V1>;

const ORDER_BYTES: [u8; 32] =
    hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123");
const ORDER_MINUS_ONE: [u8; 32] =
    hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54122");

/// Masks the top bit so the value is below 2^255 < n, giving a valid
/// scalar from arbitrary bytes.
fn scalar(mut bytes: [u8; 32]) -> K {
    bytes[0] &= 0x7f;
    K::from_bytes(&bytes).unwrap()
}

#[test]
fn generator_is_on_curve() {
    assert!(bool::from(Affine::GENERATOR.is_on_curve()));
    assert!(bool::from(Affine::IDENTITY.is_on_curve()));
}

#[test]
fn identity_and_generator_multiples() {
    assert_eq!(Point::mul_base(&K::ZERO), Point::IDENTITY);
    assert_eq!(Point::mul_base(&K::ONE), Point::GENERATOR);
    assert_eq!(Point::mul_base(&K::from_u64(2)), Point::GENERATOR.double());
}

#[test]
fn doubling_matches_addition() {
    let g = Point::GENERATOR;
    assert_eq!(g.double(), g + g);
    assert_eq!(g.double().double(), g + g + g + g);
    assert_eq!(Point::IDENTITY.double(), Point::IDENTITY);
}

#[test]
fn mixed_addition_matches_projective() {
    let g = Point::GENERATOR;
    let g_affine = Affine::GENERATOR;
    assert_eq!(g + g_affine, g.double());
    assert_eq!(g + Affine::IDENTITY, g);
    assert_eq!(Point::IDENTITY + g_affine, g);
}

#[test]
fn additive_identity_and_inverse() {
    let g = Point::GENERATOR;
    assert_eq!(g + Point::IDENTITY, g);
    assert_eq!(g - g, Point::IDENTITY);
    assert_eq!(g + (-g), Point::IDENTITY);
}

#[test]
fn order_minus_one_times_generator_is_minus_generator() {
    let n_minus_1 = K::from_bytes(&ORDER_MINUS_ONE).unwrap();
    let p = Point::mul_base(&n_minus_1);
    assert_eq!(p, -Point::GENERATOR);
    assert_eq!(p + Point::GENERATOR, Point::IDENTITY);
}

#[test]
fn scalar_codec_rejects_order() {
    assert!(bool::from(K::from_bytes(&ORDER_BYTES).is_none()));

    let n_minus_1 = K::from_bytes(&ORDER_MINUS_ONE).unwrap();
    assert_eq!(n_minus_1.to_bytes(), ORDER_MINUS_ONE);
    assert_eq!(n_minus_1 + K::ONE, K::ZERO);
    assert_eq!(-K::ONE, n_minus_1);
}

#[test]
fn extreme_window_patterns() {
    // Every window slot equal, plus alternating patterns, to exercise all
    // table entries of the fixed-window multiplier.
    for fill in [0x00u8, 0x0f, 0x55, 0xaa, 0x7f] {
        let mut bytes = [fill; 32];
        bytes[0] &= 0x7f;
        let k = K::from_bytes(&bytes).unwrap();
        if bool::from(k.is_zero()) {
            assert_eq!(Point::mul_base(&k), Point::IDENTITY);
            continue;
        }
        // [k]G == [k-1]G + G
        assert_eq!(
            Point::mul_base(&k),
            Point::mul_base(&(k - K::ONE)) + Point::GENERATOR
        );
    }
}

#[test]
fn point_sum_iterator() {
    let g = Point::GENERATOR;
    let points = [g, g.double(), g.double() + g];
    let sum: Point = points.iter().sum();
    assert_eq!(sum, Point::mul_base(&K::from_u64(6)));
}

#[test]
fn serialize_round_trips() {
    let p = Point::mul_base(&K::from_u64(7)).to_affine();

    let uncompressed = p.to_encoded_point(false);
    assert_eq!(uncompressed.len(), 65);
    let decoded = Affine::from_encoded_point(&uncompressed).unwrap();
    assert_eq!(decoded, p);

    let compressed = p.to_encoded_point(true);
    assert_eq!(compressed.len(), 33);
    let decoded = Affine::from_encoded_point(&compressed).unwrap();
    assert_eq!(decoded, p);
}

#[test]
fn identity_serializes_as_single_byte() {
    let encoded = Affine::IDENTITY.to_encoded_point(false);
    assert_eq!(encoded.as_bytes(), &[0]);
    let decoded = Affine::from_encoded_point(&encoded).unwrap();
    assert!(bool::from(decoded.is_identity()));
}

#[test]
fn rejects_off_curve_points() {
    let g = Affine::GENERATOR;
    let x = g.x().to_bytes();
    let mut y = g.y().to_bytes();
    y[31] ^= 1;

    let tampered = EncodedPoint::from_uncompressed(&x, &y);
    assert!(bool::from(Affine::from_encoded_point(&tampered).is_none()));
}

#[test]
fn decompression_picks_requested_parity() {
    for k in [2u64, 3, 5, 7, 11] {
        let p = Point::mul_base(&K::from_u64(k)).to_affine();
        let compressed = p.to_encoded_point(true);
        let decoded = Affine::from_encoded_point(&compressed).unwrap();
        assert_eq!(decoded.y(), p.y());
    }
}

proptest! {
    // Scalar multiplication is expensive, so keep the case counts low.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn mul_base_is_homomorphic(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let (a, b) = (scalar(a), scalar(b));
        let lhs = Point::mul_base(&a) + Point::mul_base(&b);
        let rhs = Point::mul_base(&(a + b));
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn mul_distributes_over_point_addition(k in any::<[u8; 32]>()) {
        let k = scalar(k);
        let g2 = Point::GENERATOR.double();
        prop_assert_eq!(
            (Point::GENERATOR + g2).mul(&k),
            Point::GENERATOR.mul(&k) + g2.mul(&k)
        );
    }

    #[test]
    fn scalar_negation_mirrors_point_negation(k in any::<[u8; 32]>()) {
        let k = scalar(k);
        prop_assert_eq!(Point::mul_base(&(-k)), -Point::mul_base(&k));
    }

    #[test]
    fn encoded_round_trip(k in any::<[u8; 32]>(), compress in any::<bool>()) {
        let p = Point::mul_base(&scalar(k)).to_affine();
        let encoded = p.to_encoded_point(compress);
        let reparsed = EncodedPoint::from_bytes(encoded.as_bytes()).unwrap();
        let decoded = Affine::from_encoded_point(&reparsed).unwrap();
        prop_assert_eq!(decoded, p);
    }
}

mod registry {
    use super::*;
    use primecurve::{curve, curve_by_name, CurveId};

    #[test]
    fn lookup_by_name_and_id() {
        let instance = curve_by_name("sm2p256v1").unwrap();
        assert_eq!(instance.id(), CurveId::Sm2P256V1);
        assert_eq!(instance.name(), "sm2p256v1");
        assert_eq!(CurveId::Sm2P256V1.name(), "sm2p256v1");
        assert_eq!(curve(CurveId::Sm2P256V1).id(), CurveId::Sm2P256V1);

        assert!(matches!(
            curve_by_name("p256"),
            Err(Error::CurveNotSupported)
        ));
        assert!(matches!(
            CurveId::from_name("nistp256"),
            Err(Error::CurveNotSupported)
        ));
    }

    #[test]
    fn parameters_match_curve_constants() {
        let instance = curve(CurveId::Sm2P256V1);
        assert_eq!(
            instance.prime(),
            hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF")
        );
        assert_eq!(instance.order(), ORDER_BYTES);
    }

    #[test]
    fn erased_operations_match_generic() {
        let instance = curve(CurveId::Sm2P256V1);

        let mut k_bytes = [0u8; 32];
        k_bytes[31] = 42;
        let k = instance.scalar_from_bytes(&k_bytes).unwrap();
        assert_eq!(instance.scalar_to_bytes(&k).unwrap(), k_bytes);

        let p = instance.mul_base(&k).unwrap();
        let generic = Point::mul_base(&K::from_u64(42)).to_affine();

        let encoded = instance.serialize(&p, false).unwrap();
        assert_eq!(encoded, generic.to_encoded_point(false));

        let decoded = instance.deserialize(&encoded).unwrap();
        assert!(instance.eq_points(&p, &decoded).unwrap());

        let doubled = instance.add(&p, &p).unwrap();
        let k2 = instance.scalar_from_bytes(&{
            let mut b = [0u8; 32];
            b[31] = 84;
            b
        }).unwrap();
        let expected = instance.mul_base(&k2).unwrap();
        assert!(instance.eq_points(&doubled, &expected).unwrap());
    }

    #[test]
    fn scalar_decode_rejects_order() {
        let instance = curve(CurveId::Sm2P256V1);
        assert!(instance.scalar_from_bytes(&ORDER_BYTES).is_err());
    }

    #[test]
    fn deserialize_rejects_garbage() {
        let instance = curve(CurveId::Sm2P256V1);
        // 2^256 - 1 exceeds p, so the x-coordinate is out of range
        let garbage = EncodedPoint::from_compressed(&[0xff; 32], false);
        assert!(instance.deserialize(&garbage).is_err());
    }
}
