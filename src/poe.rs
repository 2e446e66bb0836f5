//! Non-interactive proof of exponentiation (NI-PoE).
//!
//! Convinces a verifier that `base^exp = result (mod n)` at the cost of
//! two small exponentiations instead of one of full `exp` size. The
//! challenge prime is derived from the statement itself (Fiat-Shamir), so
//! no interaction is required.

use crate::hash::{even_hex, hash_to_prime};
use crate::math::mod_pow;
use core::fmt::{self, Display, Formatter};
use rug::Integer;
use serde::{Deserialize, Serialize};

/// A proof of exponentiation: the base raised to the quotient of the
/// exponent by the challenge prime.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoeProof(pub Integer);

impl Display for PoeProof {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PoeProof {{ {} }}", self.0)
    }
}

// Fiat-Shamir challenge prime binding the full statement.
fn challenge(base: &Integer, exp: &Integer, result: &Integer) -> Integer {
    let mut preimage = even_hex(base);
    preimage.push_str(&even_hex(exp));
    preimage.push_str(&even_hex(result));
    hash_to_prime(preimage.as_bytes())
}

/// Prove that `base^exp = result (mod modulus)` for a non-negative `exp`.
pub fn prove(base: &Integer, exp: &Integer, result: &Integer, modulus: &Integer) -> PoeProof {
    let l = challenge(base, exp, result);
    let (quot, _) = Integer::from(exp).div_rem_euc(l);
    PoeProof(mod_pow(base, &quot, modulus).expect("quotient of a non-negative exponent"))
}

/// Verify a proof that `base^exp = result (mod modulus)`.
///
/// Writes `exp = q·l + r` for the recomputed challenge `l` and accepts
/// iff `proof^l · base^r = result`.
pub fn verify(
    base: &Integer,
    exp: &Integer,
    result: &Integer,
    proof: &PoeProof,
    modulus: &Integer,
) -> bool {
    let l = challenge(base, exp, result);
    let (_, rem) = Integer::from(exp).div_rem_euc(Integer::from(&l));
    let lifted = mod_pow(&proof.0, &l, modulus).expect("challenge prime is positive");
    let residue = mod_pow(base, &rem, modulus).expect("euclidean remainder is non-negative");
    lifted * residue % modulus == *result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::RSA2048_MODULUS;

    #[test]
    fn small_exponents_prove_and_verify() {
        let n = &*RSA2048_MODULUS;
        let base = Integer::from(2);

        // 2^20 = 1048576; the challenge prime dwarfs the exponent so the
        // quotient witness collapses to 1
        let exp = Integer::from(20);
        let result = Integer::from(1_048_576);
        let proof = prove(&base, &exp, &result, n);
        assert_eq!(proof.0, 1);
        assert!(verify(&base, &exp, &result, &proof, n));

        // 2^35 = 34359738368
        let exp = Integer::from(35);
        let result = Integer::from(34_359_738_368u64);
        let proof = prove(&base, &exp, &result, n);
        assert_eq!(proof.0, 1);
        assert!(verify(&base, &exp, &result, &proof, n));
    }

    #[test]
    fn tampered_statements_are_rejected() {
        let n = &*RSA2048_MODULUS;
        let base = Integer::from(2);
        let exp = Integer::from(20);
        let result = Integer::from(1_048_576);
        let proof = prove(&base, &exp, &result, n);

        assert!(!verify(&base, &exp, &Integer::from(1_048_577), &proof, n));
        assert!(!verify(&base, &Integer::from(21), &result, &proof, n));
        assert!(!verify(&Integer::from(3), &exp, &result, &proof, n));
    }

    #[test]
    fn large_exponents_verify_without_full_recomputation() {
        let n = &*RSA2048_MODULUS;
        let base = Integer::from(7);
        let exp = hash_to_prime(b"a") * hash_to_prime(b"b");
        let result = mod_pow(&base, &exp, n).unwrap();
        let proof = prove(&base, &exp, &result, n);
        assert!(verify(&base, &exp, &result, &proof, n));
    }
}
