//! End-to-end checks of the public bls381 API against published values

use bls381_algorithms::bls12_381::{
    multi_exp, multi_miller_loop, multi_pairing, pairing, pairing_check, Fp12, G1Affine,
    G1Projective, G2Affine, G2Prepared, G2Projective, Gt, Scalar,
};
use bls381_algorithms::Error;
use bls381_tests::vectors::{concat, G1_GENERATOR, G2_GENERATOR, GENERATOR_PAIRING};
use bls381_tests::seeded;

#[test]
fn generators_match_published_encodings() {
    let g1: [u8; 96] = concat(&G1_GENERATOR);
    assert_eq!(G1Affine::generator().to_uncompressed(), g1);
    assert_eq!(G1Affine::from_uncompressed(&g1).unwrap(), G1Affine::generator());

    let g2: [u8; 192] = concat(&G2_GENERATOR);
    assert_eq!(G2Affine::generator().to_uncompressed(), g2);
    assert_eq!(G2Affine::from_uncompressed(&g2).unwrap(), G2Affine::generator());
}

#[test]
fn generator_pairing_matches_published_value() {
    let bytes: [u8; 576] = concat(&GENERATOR_PAIRING);
    let expected = Gt::from_bytes(&bytes).unwrap();
    assert_eq!(pairing(&G1Affine::generator(), &G2Affine::generator()), expected);

    let raw = Fp12::from_bytes(&bytes).unwrap();
    assert_eq!(Gt::generator().as_fp12(), &raw);
}

#[test]
fn empty_pairing_is_one() {
    assert_eq!(multi_miller_loop(&[]).final_exponentiation(), Gt::identity());
    assert_eq!(multi_pairing(&[], &[]).unwrap(), Gt::identity());
}

#[test]
fn multi_pairing_accumulates_exponents() {
    let mut rng = seeded(7);
    let mut ps = Vec::new();
    let mut qs = Vec::new();
    let mut acc = Scalar::zero();
    for _ in 0..10 {
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        ps.push(G1Affine::from(G1Projective::generator() * a));
        qs.push(G2Affine::from(G2Projective::generator() * b));
        acc += a * b;
    }

    let got = multi_pairing(&ps, &qs).unwrap();
    assert_eq!(got, Gt::generator().pow(&acc));

    let prepared: Vec<G2Prepared> = qs.iter().map(G2Prepared::from).collect();
    let terms: Vec<(&G1Affine, &G2Prepared)> = ps.iter().zip(prepared.iter()).collect();
    assert_eq!(multi_miller_loop(&terms).final_exponentiation(), got);
}

#[test]
fn signature_style_check() {
    // e(sk * G1, H) == e(G1, sk * H)
    let mut rng = seeded(8);
    let sk = Scalar::random(&mut rng);
    let h = G2Projective::random(&mut rng).to_affine();
    let pk = G1Affine::from(G1Projective::generator() * sk);
    let sig = G2Affine::from(h * sk);

    assert!(pairing_check(&[pk, -G1Affine::generator()], &[h, sig]).unwrap());

    let wrong = G2Affine::from(h * (sk + Scalar::one()));
    assert!(!pairing_check(&[pk, -G1Affine::generator()], &[h, wrong]).unwrap());
}

#[test]
fn msm_matches_published_scenario() {
    let g = G1Affine::generator();
    let got = multi_exp::<G1Projective>(&[g, g], &[Scalar::from(2u64), Scalar::from(3u64)]).unwrap();
    assert_eq!(got, G1Projective::generator() * Scalar::from(5u64));

    let err = multi_exp::<G1Projective>(&[g], &[]).unwrap_err();
    assert!(matches!(err, Error::Parameter { .. }));
}

#[test]
fn errors_cross_into_api_error() {
    use bls381_api::Serialize;

    let err = <G2Affine as Serialize>::from_bytes(&[0u8; 95]).unwrap_err();
    assert!(matches!(err, bls381_api::Error::InvalidLength { .. }));

    let err = <Gt as Serialize>::from_bytes(&[0u8; 576]).unwrap_err();
    assert!(matches!(err, bls381_api::Error::InvalidPoint { .. }));

    let g = Gt::generator();
    assert_eq!(<Gt as Serialize>::from_bytes(&Serialize::to_bytes(&g)).unwrap(), g);
}
