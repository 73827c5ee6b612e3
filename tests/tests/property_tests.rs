//! Property-based tests for the BLS12-381 field tower, groups and pairing

use bls381_algorithms::bls12_381::{
    multi_exp, pairing, Fp, Fp2, G1Affine, G1Projective, G2Affine, G2Projective,
    GlvDecomposition, Gt, Scalar,
};
use bls381_tests::scalar_from_seed;
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Scalar> {
    prop::array::uniform32(any::<u8>())
        .prop_flat_map(|lo| {
            prop::array::uniform32(any::<u8>()).prop_map(move |hi| {
                let mut wide = [0u8; 64];
                wide[..32].copy_from_slice(&lo);
                wide[32..].copy_from_slice(&hi);
                scalar_from_seed(&wide)
            })
        })
}

fn fp() -> impl Strategy<Value = Fp> {
    prop::array::uniform32(any::<u8>()).prop_map(|seed| {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&seed);
        wide[32..].copy_from_slice(&seed);
        Fp::from_bytes_wide(&wide)
    })
}

fn fp2() -> impl Strategy<Value = Fp2> {
    (fp(), fp()).prop_map(|(c0, c1)| Fp2 { c0, c1 })
}

proptest! {
    #[test]
    fn fp_ring_axioms(a in fp(), b in fp(), c in fp()) {
        prop_assert_eq!(a * (b + c), a * b + a * c);
        prop_assert_eq!(a * b, b * a);
        prop_assert_eq!(a - a, Fp::zero());
        prop_assert_eq!(a.square(), a * a);
    }

    #[test]
    fn fp_inverse_and_bytes(a in fp()) {
        if !bool::from(a.is_zero()) {
            prop_assert_eq!(a * a.inverse(), Fp::one());
        }
        prop_assert_eq!(Fp::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn fp2_mul_strategies_agree(a in fp2(), b in fp2()) {
        prop_assert_eq!(a.mul_lazy(&b), a.mul_interleaved(&b));
        prop_assert_eq!(a.square(), a.mul_interleaved(&a));
        prop_assert_eq!(Fp2::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn scalar_bytes_round_trip(s in scalar()) {
        prop_assert_eq!(Scalar::from_bytes(&s.to_bytes()).unwrap(), s);
    }

    #[test]
    fn glv_recombines(s in scalar()) {
        let d = GlvDecomposition::new(&s);
        prop_assert_eq!(d.recombine(), s);
        let k1 = d.k1.to_canonical_limbs();
        let k2 = d.k2.to_canonical_limbs();
        prop_assert!(k1[2] == 0 && k1[3] == 0);
        prop_assert!(k2[2] == 0 && k2[3] == 0);
    }

    #[test]
    fn wnaf_recombines(s in scalar(), w in 2usize..=16) {
        let naf = s.to_wnaf(w).unwrap();
        prop_assert_eq!(Scalar::from_wnaf(&naf), s);
        for window in naf.windows(w) {
            prop_assert!(window.iter().filter(|&&d| d != 0).count() <= 1);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn g1_glv_matches_ladder(s in scalar()) {
        let g = G1Projective::generator();
        prop_assert_eq!(g.mul_glv(&s), g * s);
    }

    #[test]
    fn g1_encoding_round_trip(s in scalar()) {
        let p = G1Affine::from(G1Projective::generator() * s);
        prop_assert_eq!(G1Affine::from_compressed(&p.to_compressed()).unwrap(), p);
        prop_assert_eq!(G1Affine::from_uncompressed(&p.to_uncompressed()).unwrap(), p);
    }

    #[test]
    fn g2_encoding_round_trip(s in scalar()) {
        let p = G2Affine::from(G2Projective::generator() * s);
        prop_assert_eq!(G2Affine::from_compressed(&p.to_compressed()).unwrap(), p);
    }

    #[test]
    fn msm_is_linear(a in scalar(), b in scalar(), c in scalar()) {
        let g = G1Projective::generator();
        let points = [
            G1Affine::from(g),
            G1Affine::from(g.double()),
            G1Affine::from(g * c),
        ];
        let got = multi_exp::<G1Projective>(&points, &[a, b, Scalar::one()]).unwrap();
        prop_assert_eq!(got, g * (a + b.double() + c));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn pairing_is_bilinear(a in scalar(), b in scalar()) {
        let p = G1Affine::from(G1Projective::generator() * a);
        let q = G2Affine::from(G2Projective::generator() * b);
        prop_assert_eq!(pairing(&p, &q), Gt::generator().pow(&(a * b)));
    }
}
