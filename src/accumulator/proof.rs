use super::acc::Element;
use crate::hash::elements_to_prime;
use crate::poe::PoeProof;
use crate::poke2::Poke2Proof;
use core::fmt::{self, Display, Formatter};
use rug::Integer;
use serde::{Deserialize, Serialize};

/// Proof that a batch of elements is contained in an accumulator.
///
/// The witness is an `x`-th root of `acc_value` for the batch's prime
/// product `x`; the embedded PoE proof lets a verifier check that root
/// relation without computing the full exponentiation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MembershipProof {
    /// The attested elements, in the order they were supplied.
    pub elements: Vec<Element>,
    /// An `element_prime()`-th root of `acc_value`.
    pub witness: Integer,
    /// The accumulator value the witness is evaluated against.
    pub acc_value: Integer,
    /// PoE proof binding witness, element exponent and value.
    pub proof: PoeProof,
}

impl MembershipProof {
    /// Assemble a proof from its parts.
    pub fn new(
        elements: Vec<Element>,
        witness: Integer,
        acc_value: Integer,
        proof: PoeProof,
    ) -> Self {
        Self {
            elements,
            witness,
            acc_value,
            proof,
        }
    }

    /// The product of the attested elements' prime representatives,
    /// 1 for the empty batch.
    pub fn element_prime(&self) -> Integer {
        elements_to_prime(&self.elements)
    }
}

impl Display for MembershipProof {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MembershipProof {{ elements: {}, witness: {}, acc_value: {} }}",
            self.elements.len(),
            self.witness,
            self.acc_value
        )
    }
}

/// Proof that a batch of elements is absent from an accumulator.
///
/// Built from Bézout coefficients `(a, b)` of the member-set product `s`
/// and the absent batch's product `x`: validity hinges on
/// `a·s + b·x = 1`, which cannot hold if any absent element divides `s`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NonMembershipProof {
    /// `g^b (mod n)`.
    pub d: Integer,
    /// The accumulator value raised to the Bézout coefficient `a`.
    pub v: Integer,
    /// `g · v⁻¹ (mod n)`.
    pub gv_inv: Integer,
    /// Proof of knowledge of the exponent behind `v`.
    pub poke2_proof: Poke2Proof,
    /// Proof that `d` raised to the absent batch's product gives `gv_inv`.
    pub poe_proof: PoeProof,
}

impl Display for NonMembershipProof {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NonMembershipProof {{ d: {}, v: {}, gv_inv: {} }}",
            self.d, self.v, self.gv_inv
        )
    }
}
