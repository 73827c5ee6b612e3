//! Benchmarks for BLS12-381 field, group and pairing operations

use bls381_algorithms::bls12_381::{
    multi_exp, multi_miller_loop, pairing, Fp, Fp12, Fp2, G1Affine, G1Projective, G2Affine,
    G2Prepared, G2Projective, Scalar,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::OsRng;

fn bench_field_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381_field");

    let a = Fp::random(OsRng);
    let b = Fp::random(OsRng);

    group.bench_function("fp_mul", |bench| {
        bench.iter(|| black_box(&a).mul(black_box(&b)));
    });

    group.bench_function("fp_square", |bench| {
        bench.iter(|| black_box(&a).square());
    });

    group.bench_function("fp_inverse", |bench| {
        bench.iter(|| black_box(&a).inverse());
    });

    group.bench_function("fp_sqrt", |bench| {
        let sq = a.square();
        bench.iter(|| black_box(&sq).sqrt());
    });

    let x = Fp2::random(OsRng);
    let y = Fp2::random(OsRng);

    group.bench_function("fp2_mul_interleaved", |bench| {
        bench.iter(|| black_box(&x).mul_interleaved(black_box(&y)));
    });

    group.bench_function("fp2_mul_lazy", |bench| {
        bench.iter(|| black_box(&x).mul_lazy(black_box(&y)));
    });

    let f = Fp12::random(OsRng);
    let g = Fp12::random(OsRng);

    group.bench_function("fp12_mul_interleaved", |bench| {
        bench.iter(|| black_box(&f).mul_interleaved(black_box(&g)));
    });

    group.bench_function("fp12_mul_lazy", |bench| {
        bench.iter(|| black_box(&f).mul_lazy(black_box(&g)));
    });

    group.bench_function("fp12_square", |bench| {
        bench.iter(|| black_box(&f).square());
    });

    group.bench_function("fp12_invert", |bench| {
        bench.iter(|| black_box(&f).invert());
    });

    group.finish();
}

fn bench_point_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381_points");

    let p = G1Projective::random(OsRng);
    let q = G1Projective::random(OsRng);
    let q_affine = q.to_affine();

    group.bench_function("g1_add", |bench| {
        bench.iter(|| black_box(&p).add(black_box(&q)));
    });

    group.bench_function("g1_add_mixed", |bench| {
        bench.iter(|| black_box(&p).add_mixed(black_box(&q_affine)));
    });

    group.bench_function("g1_double", |bench| {
        bench.iter(|| black_box(&p).double());
    });

    let r = G2Projective::random(OsRng);
    let s = G2Projective::random(OsRng);

    group.bench_function("g2_add", |bench| {
        bench.iter(|| black_box(&r).add(black_box(&s)));
    });

    group.bench_function("g2_double", |bench| {
        bench.iter(|| black_box(&r).double());
    });

    group.bench_function("g1_to_affine", |bench| {
        bench.iter(|| black_box(&p).to_affine());
    });

    group.bench_function("g1_compress", |bench| {
        bench.iter(|| black_box(&q_affine).to_compressed());
    });

    let compressed = q_affine.to_compressed();
    group.bench_function("g1_decompress", |bench| {
        bench.iter(|| G1Affine::from_compressed(black_box(&compressed)));
    });

    group.finish();
}

fn bench_scalar_multiplication(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381_scalar_mul");

    let k = Scalar::random(OsRng);
    let p = G1Projective::random(OsRng);
    let q = G2Projective::random(OsRng);

    group.bench_function("g1_double_and_add", |bench| {
        bench.iter(|| black_box(&p) * black_box(&k));
    });

    group.bench_function("g1_glv", |bench| {
        bench.iter(|| black_box(&p).mul_glv(black_box(&k)));
    });

    group.bench_function("g2_double_and_add", |bench| {
        bench.iter(|| black_box(&q) * black_box(&k));
    });

    group.bench_function("g2_glv", |bench| {
        bench.iter(|| black_box(&q).mul_glv(black_box(&k)));
    });

    group.finish();
}

fn bench_msm(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381_msm");
    group.sample_size(10);

    for size in [16usize, 128, 1024].iter() {
        let points: Vec<G1Affine> = (0..*size)
            .map(|_| G1Projective::random(OsRng).to_affine())
            .collect();
        let scalars: Vec<Scalar> = (0..*size).map(|_| Scalar::random(OsRng)).collect();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("g1", size), size, |b, _| {
            b.iter(|| {
                multi_exp::<G1Projective>(black_box(&points), black_box(&scalars))
                    .expect("lengths match")
            });
        });
    }

    group.finish();
}

fn bench_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381_pairing");

    let p = G1Affine::generator();
    let q = G2Affine::generator();
    let prepared = G2Prepared::from(q);

    group.bench_function("g2_prepare", |bench| {
        bench.iter(|| G2Prepared::from(black_box(&q)));
    });

    group.bench_function("miller_loop", |bench| {
        bench.iter(|| multi_miller_loop(&[(black_box(&p), black_box(&prepared))]));
    });

    let f = multi_miller_loop(&[(&p, &prepared)]);
    group.bench_function("final_exponentiation", |bench| {
        bench.iter(|| black_box(&f).final_exponentiation());
    });

    group.bench_function("full_pairing", |bench| {
        bench.iter(|| pairing(black_box(&p), black_box(&q)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_field_arithmetic,
    bench_point_operations,
    bench_scalar_multiplication,
    bench_msm,
    bench_pairing
);
criterion_main!(benches);
