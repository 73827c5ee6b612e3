// This example demonstrates how the curve arithmetic can be used in a no_std environment
// even though it's being compiled with std available for testing purposes
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use bls381_algorithms::bls12_381::{
    multi_miller_loop, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt, Scalar,
};
use bls381_algorithms::Error;

// Function to demonstrate point compression
fn compression_example() -> Result<[u8; 48], Error> {
    let p = G1Affine::from(G1Projective::generator() * Scalar::from(42u64));
    let bytes = p.to_compressed();
    let decoded = G1Affine::from_compressed(&bytes)?;
    assert_eq!(decoded, p);
    Ok(bytes)
}

// Function to demonstrate a pairing product check without a Vec
fn pairing_example() -> bool {
    let sk = Scalar::from(7u64);
    let pk = G1Affine::from(G1Projective::generator() * sk);
    let h = G2Affine::from(G2Projective::generator() * Scalar::from(11u64));
    let sig = G2Affine::from(G2Projective::from(h) * sk);

    let h_prepared = G2Prepared::from(h);
    let sig_prepared = G2Prepared::from(sig);
    let neg_g1 = -G1Affine::generator();

    let f = multi_miller_loop(&[(&pk, &h_prepared), (&neg_g1, &sig_prepared)]);
    f.final_exponentiation() == Gt::identity()
}

// Function to demonstrate multi-scalar multiplication
fn msm_example() -> Result<Vec<u8>, Error> {
    let g = G1Affine::generator();
    let sum = G1Projective::msm(&[g, g], &[Scalar::from(2u64), Scalar::from(3u64)])?;
    Ok(G1Affine::from(sum).to_compressed().to_vec())
}

fn main() {
    println!("bls381 Algorithms no_std Usage Example");
    println!("======================================");

    match compression_example() {
        Ok(bytes) => println!("[42]G1 compressed: {}", hex::encode(bytes)),
        Err(e) => println!("Compression error: {:?}", e),
    }

    println!("Pairing check holds: {}", pairing_example());

    match msm_example() {
        Ok(bytes) => println!("[2]G + [3]G: {}", hex::encode(&bytes)),
        Err(e) => println!("MSM error: {:?}", e),
    }
}
