//! Non-interactive proof of knowledge of an exponent (NI-PoKE2).
//!
//! Convinces a verifier that the prover knows `exp` with
//! `base^exp = result (mod n)` without revealing it. The protocol commits
//! to the exponent over a fixed element of presumed unknown order before
//! the challenges are derived, which is what makes it an argument of
//! knowledge rather than a bare exponentiation check.

use crate::accumulator::UNKNOWN_ORDER_GENERATOR;
use crate::error::AccError;
use crate::hash::{even_hex, hash_to_integer, hash_to_prime};
use crate::math::mod_pow;
use core::fmt::{self, Display, Formatter};
use rug::Integer;
use serde::{Deserialize, Serialize};

/// A proof of knowledge of an exponent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Poke2Proof {
    /// Commitment to the exponent over the fixed generator.
    pub z: Integer,
    /// Quotient witness for the blinded base.
    pub q: Integer,
    /// The exponent reduced modulo the challenge prime.
    pub r: Integer,
}

impl Poke2Proof {
    /// Assemble a proof from its parts.
    pub fn new(z: Integer, q: Integer, r: Integer) -> Self {
        Self { z, q, r }
    }
}

impl Display for Poke2Proof {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Poke2Proof {{ z: {}, q: {}, r: {} }}", self.z, self.q, self.r)
    }
}

// Fiat-Shamir challenge prime over the statement and the commitment.
fn challenge(base: &Integer, result: &Integer, z: &Integer) -> Integer {
    let mut preimage = even_hex(base);
    preimage.push_str(&even_hex(result));
    preimage.push_str(&even_hex(z));
    hash_to_prime(preimage.as_bytes())
}

/// Prove knowledge of `exp` such that `base^exp = result (mod modulus)`.
///
/// Negative exponents are supported transparently via modular inversion.
pub fn prove(
    base: &Integer,
    exp: &Integer,
    result: &Integer,
    modulus: &Integer,
) -> Result<Poke2Proof, AccError> {
    let g = Integer::from(UNKNOWN_ORDER_GENERATOR);
    let z = mod_pow(&g, exp, modulus)?;
    let l = challenge(base, result, &z);
    let alpha = hash_to_integer(&[base, result, &z, &l]);
    let (quot, r) = Integer::from(exp).div_rem_euc(Integer::from(&l));
    let ga = mod_pow(&g, &alpha, modulus).expect("challenge is non-negative");
    let blinded = Integer::from(base * &ga) % modulus;
    let q = mod_pow(&blinded, &quot, modulus)?;
    Ok(Poke2Proof { z, q, r })
}

/// Verify a proof of knowledge of the exponent behind `result`.
pub fn verify(base: &Integer, result: &Integer, proof: &Poke2Proof, modulus: &Integer) -> bool {
    let g = Integer::from(UNKNOWN_ORDER_GENERATOR);
    let l = challenge(base, result, &proof.z);
    let alpha = hash_to_integer(&[base, result, &proof.z, &l]);
    let ga = mod_pow(&g, &alpha, modulus).expect("challenge is non-negative");
    let blinded = Integer::from(base * &ga) % modulus;
    let lifted = mod_pow(&proof.q, &l, modulus).expect("challenge prime is positive");
    // a malformed proof may carry a negative, non-invertible residue
    let residue = match mod_pow(&blinded, &proof.r, modulus) {
        Ok(residue) => residue,
        Err(_) => return false,
    };
    let lhs = lifted * residue % modulus;
    let za = mod_pow(&proof.z, &alpha, modulus).expect("challenge is non-negative");
    let rhs = Integer::from(result * &za) % modulus;
    lhs == rhs
}
