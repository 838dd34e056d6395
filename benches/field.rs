//! sm2p256v1 field and point benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use primecurve::{FieldElement, PrimeCurveParams, ProjectivePoint, Scalar, Sm2P256V1};
use std::hint::black_box;

type Fe = FieldElement<Sm2P256V1>;

const FE_A: Fe =
    Fe::from_hex("32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7");
const FE_B: Fe =
    Fe::from_hex("BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0");

fn bench_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("FieldElement");

    group.bench_function("add", |b| b.iter(|| black_box(FE_A) + black_box(FE_B)));
    group.bench_function("sub", |b| b.iter(|| black_box(FE_A) - black_box(FE_B)));
    group.bench_function("multiply", |b| b.iter(|| black_box(FE_A) * black_box(FE_B)));
    group.bench_function("square", |b| b.iter(|| black_box(FE_A).square()));
    group.bench_function("invert", |b| {
        b.iter(|| Sm2P256V1::fe_invert(black_box(&FE_A)))
    });
    group.bench_function("sqrt", |b| b.iter(|| black_box(FE_A).sqrt()));

    group.finish();
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("ProjectivePoint");

    let k = Scalar::<Sm2P256V1>::from_u64(0x1234_5678_9abc_def0);
    let g = ProjectivePoint::<Sm2P256V1>::GENERATOR;

    group.bench_function("add", |b| b.iter(|| black_box(g) + black_box(g)));
    group.bench_function("double", |b| b.iter(|| black_box(g).double()));
    group.bench_function("mul", |b| b.iter(|| black_box(g).mul(black_box(&k))));
    group.bench_function("to_affine", |b| b.iter(|| black_box(g).to_affine()));

    group.finish();
}

criterion_group!(benches, bench_field, bench_point);
criterion_main!(benches);
