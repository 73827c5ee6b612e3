//! Serialization and deserialization tests for BLS12-381

use super::super::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use crate::error::Error;

const G1_GENERATOR_COMPRESSED: &str = "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb";

const G1_GENERATOR_UNCOMPRESSED: &str = "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1";

const G2_GENERATOR_COMPRESSED: &str = "93e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8";

fn array<const N: usize>(h: &str) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&hex::decode(h).unwrap());
    out
}

/// `p` as 48 big-endian bytes
const P_BYTES: [u8; 48] = [
    0x1a, 0x01, 0x11, 0xea, 0x39, 0x7f, 0xe6, 0x9a, 0x4b, 0x1b, 0xa7, 0xb6, 0x43, 0x4b, 0xac,
    0xd7, 0x64, 0x77, 0x4b, 0x84, 0xf3, 0x85, 0x12, 0xbf, 0x67, 0x30, 0xd2, 0xa0, 0xf6, 0xb0,
    0xf6, 0x24, 0x1e, 0xab, 0xff, 0xfe, 0xb1, 0x53, 0xff, 0xff, 0xb9, 0xfe, 0xff, 0xff, 0xff,
    0xff, 0xaa, 0xab,
];

// ============================================================================
// G1
// ============================================================================

#[test]
fn test_g1_generator_vectors() {
    let g = G1Affine::generator();
    assert_eq!(hex::encode(g.to_compressed()), G1_GENERATOR_COMPRESSED);
    assert_eq!(hex::encode(g.to_uncompressed()), G1_GENERATOR_UNCOMPRESSED);

    assert_eq!(
        G1Affine::from_compressed(&array(G1_GENERATOR_COMPRESSED)).unwrap(),
        g
    );
    assert_eq!(
        G1Affine::from_uncompressed(&array(G1_GENERATOR_UNCOMPRESSED)).unwrap(),
        g
    );
}

#[test]
fn test_g1_identity_encoding() {
    let id = G1Affine::identity();
    let compressed = id.to_compressed();
    assert_eq!(compressed[0], 0xc0);
    assert!(compressed[1..].iter().all(|&b| b == 0));

    let uncompressed = id.to_uncompressed();
    assert_eq!(uncompressed[0], 0x40);
    assert!(uncompressed[1..].iter().all(|&b| b == 0));

    assert_eq!(G1Affine::from_compressed(&compressed).unwrap(), id);
    assert_eq!(G1Affine::from_uncompressed(&uncompressed).unwrap(), id);
}

#[test]
fn test_g1_round_trips() {
    let g = G1Projective::generator();
    for i in 1..=20u64 {
        let original = G1Affine::from(g * Scalar::from(i));
        assert_eq!(
            G1Affine::from_compressed(&original.to_compressed()).unwrap(),
            original
        );
        assert_eq!(
            G1Affine::from_uncompressed(&original.to_uncompressed()).unwrap(),
            original
        );
    }

    // the sign bit separates P from -P
    let neg = -G1Affine::generator();
    let a = G1Affine::generator().to_compressed();
    let b = neg.to_compressed();
    assert_eq!(a[0] ^ b[0], 0x20);
    assert_eq!(a[1..], b[1..]);
    assert_eq!(G1Affine::from_compressed(&b).unwrap(), neg);
}

#[test]
fn test_g1_flag_errors() {
    let g = G1Affine::generator().to_compressed();

    let mut bytes = g;
    bytes[0] &= 0x7f;
    assert!(matches!(
        G1Affine::from_compressed(&bytes),
        Err(Error::Parameter { .. })
    ));

    // infinity with a non-zero payload
    let mut bytes = [0u8; 48];
    bytes[0] = 0xc0;
    bytes[47] = 1;
    assert!(matches!(
        G1Affine::from_compressed(&bytes),
        Err(Error::Parameter { .. })
    ));

    // sign on the point at infinity
    let mut bytes = [0u8; 48];
    bytes[0] = 0xe0;
    assert!(matches!(
        G1Affine::from_compressed(&bytes),
        Err(Error::Parameter { .. })
    ));

    let mut bytes = G1Affine::generator().to_uncompressed();
    bytes[0] |= 0x80;
    assert!(matches!(
        G1Affine::from_uncompressed(&bytes),
        Err(Error::Parameter { .. })
    ));
}

#[test]
fn test_g1_coordinate_errors() {
    // x = p
    let mut bytes = P_BYTES;
    bytes[0] |= 0x80;
    assert!(matches!(
        G1Affine::from_compressed(&bytes),
        Err(Error::NonCanonical { .. })
    ));

    // x = 1 gives 5, a non-residue
    let mut bytes = [0u8; 48];
    bytes[0] = 0x80;
    bytes[47] = 1;
    assert!(matches!(
        G1Affine::from_compressed(&bytes),
        Err(Error::NotSquare { .. })
    ));

    // (1, 2) is not on the curve
    let mut bytes = [0u8; 96];
    bytes[47] = 1;
    bytes[95] = 2;
    assert!(matches!(
        G1Affine::from_uncompressed(&bytes),
        Err(Error::NotOnCurve { .. })
    ));
    assert!(matches!(
        G1Affine::from_uncompressed_unchecked(&bytes),
        Err(Error::NotOnCurve { .. })
    ));
}

#[test]
fn test_g1_subgroup_errors() {
    // x = 4 is on the curve but outside the order-r subgroup
    let mut bytes = [0u8; 48];
    bytes[0] = 0x80;
    bytes[47] = 4;
    assert!(matches!(
        G1Affine::from_compressed(&bytes),
        Err(Error::NotInSubgroup { .. })
    ));

    let p = G1Affine::from_compressed_unchecked(&bytes).unwrap();
    assert!(bool::from(p.is_on_curve()));
    assert!(!bool::from(p.is_torsion_free()));

    let uncompressed = p.to_uncompressed();
    assert!(matches!(
        G1Affine::from_uncompressed(&uncompressed),
        Err(Error::NotInSubgroup { .. })
    ));
    assert_eq!(
        G1Affine::from_uncompressed_unchecked(&uncompressed).unwrap(),
        p
    );
}

// ============================================================================
// G2
// ============================================================================

#[test]
fn test_g2_generator_vectors() {
    let g = G2Affine::generator();
    assert_eq!(hex::encode(g.to_compressed()), G2_GENERATOR_COMPRESSED);
    assert_eq!(
        G2Affine::from_compressed(&array(G2_GENERATOR_COMPRESSED)).unwrap(),
        g
    );
    assert_eq!(
        G2Affine::from_uncompressed(&g.to_uncompressed()).unwrap(),
        g
    );
}

#[test]
fn test_g2_round_trips() {
    let g = G2Projective::generator();
    for i in 1..=10u64 {
        let original = G2Affine::from(g * Scalar::from(i));
        assert_eq!(
            G2Affine::from_compressed(&original.to_compressed()).unwrap(),
            original
        );
        assert_eq!(
            G2Affine::from_uncompressed(&original.to_uncompressed()).unwrap(),
            original
        );
    }

    let id = G2Affine::identity();
    assert_eq!(G2Affine::from_compressed(&id.to_compressed()).unwrap(), id);
    assert_eq!(
        G2Affine::from_uncompressed(&id.to_uncompressed()).unwrap(),
        id
    );

    let neg = -G2Affine::generator();
    assert_eq!(G2Affine::from_compressed(&neg.to_compressed()).unwrap(), neg);
}

#[test]
fn test_g2_decoding_errors() {
    let mut bytes = G2Affine::generator().to_compressed();
    bytes[0] &= 0x7f;
    assert!(matches!(
        G2Affine::from_compressed(&bytes),
        Err(Error::Parameter { .. })
    ));

    // x.c1 = p
    let mut bytes = [0u8; 96];
    bytes[..48].copy_from_slice(&P_BYTES);
    bytes[0] |= 0x80;
    assert!(matches!(
        G2Affine::from_compressed(&bytes),
        Err(Error::NonCanonical { .. })
    ));

    // x = 1 has no y
    let mut bytes = [0u8; 96];
    bytes[0] = 0x80;
    bytes[95] = 1;
    assert!(matches!(
        G2Affine::from_compressed(&bytes),
        Err(Error::NotSquare { .. })
    ));

    // x = 2 lies on the twist outside the subgroup
    bytes[95] = 2;
    assert!(matches!(
        G2Affine::from_compressed(&bytes),
        Err(Error::NotInSubgroup { .. })
    ));
    assert!(G2Affine::from_compressed_unchecked(&bytes).is_ok());

    let mut bytes = [0u8; 192];
    bytes[95] = 1;
    bytes[191] = 2;
    assert!(matches!(
        G2Affine::from_uncompressed(&bytes),
        Err(Error::NotOnCurve { .. })
    ));
}

// ============================================================================
// Byte-slice trait
// ============================================================================

#[test]
fn test_serialize_trait() {
    use bls381_api::Serialize;

    let g1 = G1Affine::generator();
    assert_eq!(<G1Affine as Serialize>::from_bytes(&g1.to_compressed()).unwrap(), g1);

    let g2 = G2Affine::generator();
    assert_eq!(<G2Affine as Serialize>::from_bytes(&g2.to_compressed()).unwrap(), g2);

    let err = <G1Affine as Serialize>::from_bytes(&[0u8; 47]).unwrap_err();
    assert!(matches!(err, bls381_api::Error::InvalidLength { .. }));

    let mut bytes = [0u8; 48];
    bytes[0] = 0x80;
    bytes[47] = 4;
    let err = <G1Affine as Serialize>::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, bls381_api::Error::InvalidPoint { .. }));

    #[cfg(feature = "alloc")]
    {
        assert_eq!(Serialize::to_bytes(&g1), g1.to_compressed().to_vec());
        assert_eq!(Serialize::to_bytes(&g2).len(), 96);
    }
}
