//! Pairing tests for BLS12-381

use super::super::pairings::{
    multi_miller_loop, pairing, G2Prepared, Gt, MillerLoopResult, ELL_COEFFS,
};
use super::super::{Fp12, G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use super::rng;
use crate::error::Error;

use rand_core::OsRng;

/// e(G1, G2) serialized coefficient by coefficient, most significant first
const GENERATOR_PAIRING: [&str; 12] = [
    "0f41e58663bf08cf068672cbd01a7ec73baca4d72ca93544deff686bfd6df543d48eaa24afe47e1efde449383b676631",
    "04c581234d086a9902249b64728ffd21a189e87935a954051c7cdba7b3872629a4fafc05066245cb9108f0242d0fe3ef",
    "03350f55a7aefcd3c31b4fcb6ce5771cc6a0e9786ab5973320c806ad360829107ba810c5a09ffdd9be2291a0c25a99a2",
    "11b8b424cd48bf38fcef68083b0b0ec5c81a93b330ee1a677d0d15ff7b984e8978ef48881e32fac91b93b47333e2ba57",
    "06fba23eb7c5af0d9f80940ca771b6ffd5857baaf222eb95a7d2809d61bfe02e1bfd1b68ff02f0b8102ae1c2d5d5ab1a",
    "19f26337d205fb469cd6bd15c3d5a04dc88784fbb3d0b2dbdea54d43b2b73f2cbb12d58386a8703e0f948226e47ee89d",
    "018107154f25a764bd3c79937a45b84546da634b8f6be14a8061e55cceba478b23f7dacaa35c8ca78beae9624045b4b6",
    "01b2f522473d171391125ba84dc4007cfbf2f8da752f7c74185203fcca589ac719c34dffbbaad8431dad1c1fb597aaa5",
    "193502b86edb8857c273fa075a50512937e0794e1e65a7617c90d8bd66065b1fffe51d7a579973b1315021ec3c19934f",
    "1368bb445c7c2d209703f239689ce34c0378a68e72a6b3b216da0e22a5031b54ddff57309396b38c881c4c849ec23e87",
    "089a1c5b46e5110b86750ec6a532348868a84045483c92b7af5af689452eafabf1a8943e50439f1d59882a98eaa0170f",
    "1250ebd871fc0a92a7b2d83168d0d727272d441befa15c503dd8e90ce98db3e7b6d194f60839c508a84305aaca1789b6",
];

fn generator_pairing_bytes() -> [u8; 576] {
    let mut out = [0u8; 576];
    for (chunk, h) in out.chunks_mut(48).zip(GENERATOR_PAIRING.iter()) {
        chunk.copy_from_slice(&hex::decode(h).unwrap());
    }
    out
}

// ============================================================================
// Known answers
// ============================================================================

#[test]
fn test_generator_pairing_vector() {
    let expected = Gt::from_bytes(&generator_pairing_bytes()).unwrap();
    let got = pairing(&G1Affine::generator(), &G2Affine::generator());
    assert_eq!(got, expected);
    assert_eq!(got, Gt::generator());
    assert_eq!(got.to_bytes(), generator_pairing_bytes());
}

#[test]
fn test_empty_loop_is_one() {
    let f = multi_miller_loop(&[]);
    assert_eq!(f, MillerLoopResult::default());
    assert_eq!(f.final_exponentiation(), Gt::identity());
}

// ============================================================================
// Bilinearity
// ============================================================================

#[test]
fn test_pairing_bilinearity() {
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();

    let p1 = G1Affine::from(g1 * Scalar::from(2u64));
    let p2 = G1Affine::from(g1 * Scalar::from(3u64));
    let q1 = G2Affine::from(g2 * Scalar::from(5u64));
    let q2 = G2Affine::from(g2 * Scalar::from(7u64));

    let left = pairing(&G1Affine::from(p1 + G1Projective::from(p2)), &q1);
    assert_eq!(left, pairing(&p1, &q1) * pairing(&p2, &q1));

    let left = pairing(&p1, &G2Affine::from(q1 + G2Projective::from(q2)));
    assert_eq!(left, pairing(&p1, &q1) * pairing(&p1, &q2));
}

#[test]
fn test_pairing_scalar_exponent() {
    let mut rng = rng(60);
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);

    let p = G1Affine::from(G1Projective::generator() * a);
    let q = G2Affine::from(G2Projective::generator() * b);
    let base = Gt::generator();

    assert_eq!(pairing(&p, &q), base.pow(&(a * b)));
    assert_eq!(
        pairing(&p, &G2Affine::generator()),
        pairing(&G1Affine::generator(), &G2Affine::from(G2Projective::generator() * a))
    );
}

#[test]
fn test_pairing_with_negation_cancels() {
    let g1 = G1Affine::generator();
    let g2 = G2Affine::generator();
    let prepared = G2Prepared::from(g2);
    let neg = -g1;

    let f = multi_miller_loop(&[(&g1, &prepared), (&neg, &prepared)]);
    assert!(bool::from(f.final_exponentiation().is_identity()));
    assert_eq!(pairing(&g1, &g2) * pairing(&neg, &g2), Gt::identity());
    assert_eq!(pairing(&neg, &g2), pairing(&g1, &g2).invert());
}

#[test]
fn test_identity_inputs() {
    let g1 = G1Affine::generator();
    let g2 = G2Affine::generator();

    assert_eq!(pairing(&G1Affine::identity(), &g2), Gt::identity());
    assert_eq!(pairing(&g1, &G2Affine::identity()), Gt::identity());

    // identity pairs do not disturb the other terms
    let prepared = G2Prepared::from(g2);
    let empty = G2Prepared::from(G2Affine::identity());
    assert!(empty.is_identity());
    let id = G1Affine::identity();
    let f = multi_miller_loop(&[(&g1, &empty), (&g1, &prepared), (&id, &prepared)]);
    assert_eq!(f.final_exponentiation(), Gt::generator());
}

#[test]
fn test_multi_miller_loop_matches_product() {
    let mut rng = rng(61);
    let ps: Vec<G1Affine> = (0..4)
        .map(|_| G1Projective::random(&mut rng).to_affine())
        .collect();
    let qs: Vec<G2Affine> = (0..4)
        .map(|_| G2Projective::random(&mut rng).to_affine())
        .collect();
    let prepared: Vec<G2Prepared> = qs.iter().map(G2Prepared::from).collect();
    let terms: Vec<(&G1Affine, &G2Prepared)> = ps.iter().zip(prepared.iter()).collect();

    let expected = ps
        .iter()
        .zip(qs.iter())
        .fold(Gt::identity(), |acc, (p, q)| acc * pairing(p, q));
    assert_eq!(multi_miller_loop(&terms).final_exponentiation(), expected);

    // products of loop outputs commute with the final exponentiation
    let split = multi_miller_loop(&terms[..2]) * multi_miller_loop(&terms[2..]);
    assert_eq!(split.final_exponentiation(), expected);
}

#[test]
fn test_prepared_coefficients() {
    let prepared = G2Prepared::from(&G2Affine::generator());
    assert_eq!(prepared.coefficients().len(), 68);
    assert!(prepared.coefficients().len() <= ELL_COEFFS);
    assert!(!prepared.is_identity());
}

#[cfg(feature = "alloc")]
#[test]
fn test_multi_pairing_and_check() {
    use super::super::pairings::{multi_pairing, pairing_check};

    let mut rng = rng(62);
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();

    // e(aG1, bG2) * e(-abG1, G2) == 1
    let ps = [
        G1Affine::from(g1 * a),
        G1Affine::from(-(g1 * (a * b))),
    ];
    let qs = [G2Affine::from(g2 * b), G2Affine::generator()];
    assert!(pairing_check(&ps, &qs).unwrap());
    assert_eq!(multi_pairing(&ps, &qs).unwrap(), Gt::identity());

    let bad = [G1Affine::from(g1 * a), G1Affine::generator()];
    assert!(!pairing_check(&bad, &qs).unwrap());

    let err = multi_pairing(&ps, &qs[..1]).unwrap_err();
    assert!(matches!(err, Error::Parameter { .. }));
    assert!(pairing_check(&[], &[]).unwrap());
}

// ============================================================================
// Gt
// ============================================================================

#[test]
fn test_gt_group_operations() {
    let g = Gt::generator();
    assert!(bool::from(g.is_valid()));
    assert!(!bool::from(g.is_identity()));
    assert_eq!(g * g, g.square());
    assert_eq!(g * g.invert(), Gt::identity());
    assert_eq!(g.pow(&Scalar::zero()), Gt::identity());
    assert_eq!(g.pow(&Scalar::from(3u64)), g * g * g);
    assert_eq!(g.pow(&-Scalar::one()), g.invert());
    assert_eq!(Gt::default(), Gt::identity());

    let r = Gt::random(&mut OsRng);
    assert!(bool::from(r.is_valid()));
}

#[test]
fn test_gt_bytes() {
    let g = Gt::generator();
    assert_eq!(Gt::from_bytes(&g.to_bytes()).unwrap(), g);

    // non-zero field element outside the subgroup
    let outside = Fp12::one() + Fp12::one();
    let err = Gt::from_bytes(&outside.to_bytes()).unwrap_err();
    assert!(matches!(err, Error::NotInSubgroup { .. }));
    assert!(Gt::from_bytes_unchecked(&outside.to_bytes()).is_ok());

    let err = Gt::from_bytes(&[0xff; 576]).unwrap_err();
    assert!(matches!(err, Error::NonCanonical { .. }));
}

#[test]
fn test_zero_conventions() {
    // zero is not a GT element but decodes unchecked and inverts to zero
    let zero = Gt::from_bytes_unchecked(&[0u8; 576]).unwrap();
    assert!(!bool::from(zero.is_valid()));
    assert_eq!(zero.invert(), zero);

    let f = MillerLoopResult(Fp12::zero());
    assert_eq!(f.final_exponentiation().as_fp12(), &Fp12::zero());
}
