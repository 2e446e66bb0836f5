use super::proof::{MembershipProof, NonMembershipProof};
use super::setup::{generate_modulus, random_below, RSA2048_MODULUS, UNKNOWN_ORDER_GENERATOR};
use crate::error::AccError;
use crate::hash::{elements_to_prime, hash_to_prime};
use crate::math::{bezout, mod_inverse, mod_pow, shamir_trick};
use crate::{poe, poke2};
use core::fmt::{self, Display, Formatter};
use rug::Integer;
use serde::{Deserialize, Serialize};
use std::mem;

/// An element accumulated by value: an opaque byte string that enters the
/// group arithmetic through its prime representative.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Element(Vec<u8>);

impl Element {
    /// Wrap raw bytes as an element.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The element's raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The element's prime representative.
    pub fn to_prime(&self) -> Integer {
        hash_to_prime(&self.0)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Element {
    fn from(b: &[u8]) -> Self {
        Self(b.to_vec())
    }
}

impl From<Vec<u8>> for Element {
    fn from(b: Vec<u8>) -> Self {
        Self(b)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Element {{ {} }}", String::from_utf8_lossy(&self.0))
    }
}

/// A dynamic universal RSA accumulator.
///
/// Holds the modulus `n`, the current value and the generator fixed at
/// construction. When element tracking is enabled the running product of
/// every member's prime representative is kept alongside the value, and
/// the two are only ever updated together.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Accumulator {
    n: Integer,
    value: Integer,
    g: Integer,
    products: Option<Integer>,
}

impl PartialEq for Accumulator {
    // accumulators agree when they agree on the group and the value;
    // tracking is a local convenience and does not affect identity
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.value == other.value
    }
}

impl Eq for Accumulator {}

impl Display for Accumulator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Accumulator {{ value: {}, n: {} }}", self.value, self.n)
    }
}

impl Accumulator {
    /// Accumulator over the RSA-2048 challenge modulus, starting from the
    /// conventional generator 2.
    ///
    /// With `hold_elements` the accumulator additionally tracks the
    /// product of its members' primes, enabling [`Self::prove_membership`].
    pub fn new_rsa2048(hold_elements: bool) -> Self {
        let g = Integer::from(UNKNOWN_ORDER_GENERATOR);
        Self {
            n: RSA2048_MODULUS.clone(),
            value: g.clone(),
            g,
            products: hold_elements.then(|| Integer::from(1)),
        }
    }

    /// Accumulator over a freshly generated `bit_length`-bit modulus with
    /// a uniformly random starting value, which also becomes the
    /// generator.
    pub fn random(bit_length: u32, hold_elements: bool) -> Self {
        let n = generate_modulus(bit_length);
        let value = loop {
            let candidate = random_below(&n);
            // exclude the fixed points 0 and 1
            if candidate > 1 {
                break candidate;
            }
        };
        Self {
            g: value.clone(),
            n,
            value,
            products: hold_elements.then(|| Integer::from(1)),
        }
    }

    /// The modulus.
    pub fn modulus(&self) -> &Integer {
        &self.n
    }

    /// The current accumulated value.
    pub fn value(&self) -> &Integer {
        &self.value
    }

    /// The generator the accumulator started from.
    pub fn generator(&self) -> &Integer {
        &self.g
    }

    /// Whether the accumulator tracks the product of its members' primes.
    pub fn holds_elements(&self) -> bool {
        self.products.is_some()
    }

    /// Add a batch of elements.
    ///
    /// The value is raised to the batch's prime product; the pre-add
    /// value becomes the batch's membership witness. When tracking is
    /// enabled, primes already present are not multiplied in again.
    pub fn add(&mut self, elements: &[Element]) -> MembershipProof {
        let exponent = elements_to_prime(elements);
        let updated =
            mod_pow(&self.value, &exponent, &self.n).expect("prime product is non-negative");
        let previous = mem::replace(&mut self.value, updated);
        if let Some(products) = self.products.as_mut() {
            for element in elements {
                let prime = element.to_prime();
                if !products.is_divisible(&prime) {
                    *products *= prime;
                }
            }
        }
        let proof = poe::prove(&previous, &exponent, &self.value, &self.n);
        MembershipProof::new(elements.to_vec(), previous, self.value.clone(), proof)
    }

    /// Check a membership proof against the current value.
    pub fn verify_membership(&self, proof: &MembershipProof) -> bool {
        poe::verify(
            &proof.witness,
            &proof.element_prime(),
            &self.value,
            &proof.proof,
            &self.n,
        )
    }

    /// Delete the elements attested by `proofs` and return a proof that
    /// the pre-delete value contained them.
    ///
    /// Every witness is validated against the current value before any
    /// state changes; a stale or forged proof fails with
    /// [`AccError::BadWitness`] and leaves the accumulator untouched.
    /// The witnesses are folded pairwise with Shamir's trick into a
    /// single root, which becomes the new value. An empty batch is a
    /// no-op attested by the current value itself.
    pub fn delete(&mut self, proofs: &[MembershipProof]) -> Result<MembershipProof, AccError> {
        if proofs.is_empty() {
            let one = Integer::from(1);
            let proof = poe::prove(&self.value, &one, &self.value, &self.n);
            return Ok(MembershipProof::new(
                Vec::new(),
                self.value.clone(),
                self.value.clone(),
                proof,
            ));
        }

        let mut witnesses = Vec::with_capacity(proofs.len());
        for proof in proofs {
            let prime = proof.element_prime();
            let restored =
                mod_pow(&proof.witness, &prime, &self.n).expect("prime product is non-negative");
            if restored != self.value {
                return Err(AccError::BadWitness);
            }
            witnesses.push((proof.witness.clone(), prime));
        }

        let mut remaining = witnesses.into_iter();
        let (mut root, mut product) = remaining.next().expect("batch checked non-empty");
        for (witness, prime) in remaining {
            root = shamir_trick(&root, &witness, &product, &prime, &self.n)?;
            product *= prime;
        }

        if let Some(products) = self.products.as_ref() {
            if !products.is_divisible(&product) {
                return Err(AccError::InexactDivision);
            }
        }

        let previous = mem::replace(&mut self.value, root);
        if let Some(products) = self.products.as_mut() {
            products.div_exact_mut(&product);
        }

        let elements = proofs
            .iter()
            .flat_map(|p| p.elements.iter().cloned())
            .collect();
        let proof = poe::prove(&self.value, &product, &previous, &self.n);
        Ok(MembershipProof::new(
            elements,
            self.value.clone(),
            previous,
            proof,
        ))
    }

    /// Produce a membership proof for `elements` from the tracked
    /// product, witnessed by the generator raised to everything else.
    ///
    /// Requires element tracking ([`AccError::ElementsNotHeld`]
    /// otherwise). Returns `Ok(None)` when the elements are not all
    /// present: absence is an answer here, not a fault.
    pub fn prove_membership(
        &self,
        elements: &[Element],
    ) -> Result<Option<MembershipProof>, AccError> {
        let products = self.products.as_ref().ok_or(AccError::ElementsNotHeld)?;
        let exponent = elements_to_prime(elements);
        if !products.is_divisible(&exponent) {
            return Ok(None);
        }
        let complement = Integer::from(products.div_exact_ref(&exponent));
        let witness =
            mod_pow(&self.g, &complement, &self.n).expect("prime product is non-negative");
        let proof = poe::prove(&witness, &exponent, &self.value, &self.n);
        Ok(Some(MembershipProof::new(
            elements.to_vec(),
            witness,
            self.value.clone(),
            proof,
        )))
    }

    /// Prove that `non_members` are absent, relative to the complete
    /// member set `members`.
    ///
    /// Fails with [`AccError::InputsNotCoprime`] when the two prime
    /// products share a factor, i.e. when a claimed non-member is in the
    /// member set.
    pub fn prove_non_membership(
        &self,
        members: &[Element],
        non_members: &[Element],
    ) -> Result<NonMembershipProof, AccError> {
        let s = elements_to_prime(members);
        let x = elements_to_prime(non_members);
        let (a, b) = bezout(&s, &x);
        if Integer::from(&a * &s) + Integer::from(&b * &x) != 1 {
            return Err(AccError::InputsNotCoprime);
        }
        let v = mod_pow(&self.value, &a, &self.n)?;
        let d = mod_pow(&self.g, &b, &self.n)?;
        let v_inv = mod_inverse(&v, &self.n)?;
        let gv_inv = Integer::from(&self.g * &v_inv) % &self.n;
        let poke2_proof = poke2::prove(&self.value, &a, &v, &self.n)?;
        let poe_proof = poe::prove(&d, &x, &gv_inv, &self.n);
        Ok(NonMembershipProof {
            d,
            v,
            gv_inv,
            poke2_proof,
            poe_proof,
        })
    }

    /// Check a non-membership proof for `elements` against the current
    /// value.
    pub fn verify_non_membership(&self, elements: &[Element], proof: &NonMembershipProof) -> bool {
        let x = elements_to_prime(elements);
        poke2::verify(&self.value, &proof.v, &proof.poke2_proof, &self.n)
            && poe::verify(&proof.d, &x, &proof.gv_inv, &proof.poe_proof, &self.n)
    }

    /// All `exponents[i]`-th roots of `value^(Π exponents)` at once:
    /// entry `i` is the current value raised to every exponent except
    /// `exponents[i]`.
    ///
    /// Divide-and-conquer over index ranges costs `O(k log k)` modular
    /// exponentiations for `k` exponents instead of the quadratic naive
    /// schedule. The receiver is not mutated.
    pub fn root_factor(&self, exponents: &[Integer]) -> Vec<Integer> {
        if exponents.is_empty() {
            return Vec::new();
        }
        self.root_factor_split(self.value.clone(), exponents)
    }

    fn root_factor_split(&self, base: Integer, exponents: &[Integer]) -> Vec<Integer> {
        if exponents.len() == 1 {
            return vec![base];
        }
        let (left, right) = exponents.split_at(exponents.len() / 2);
        let base_left = left.iter().fold(base.clone(), |acc, e| {
            mod_pow(&acc, e, &self.n).expect("exponents are non-negative")
        });
        let base_right = right.iter().fold(base, |acc, e| {
            mod_pow(&acc, e, &self.n).expect("exponents are non-negative")
        });
        let mut roots = self.root_factor_split(base_right, left);
        roots.extend(self.root_factor_split(base_left, right));
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_raises_value_to_the_prime_product() {
        let mut acc = Accumulator::new_rsa2048(false);
        let initial = acc.value().clone();
        acc.add(&["a".into()]);
        acc.add(&["b".into()]);
        acc.add(&["c".into()]);
        acc.add(&["d".into()]);
        let p = hash_to_prime(b"a") * hash_to_prime(b"b") * hash_to_prime(b"c")
            * hash_to_prime(b"d");
        assert_eq!(*acc.value(), mod_pow(&initial, &p, acc.modulus()).unwrap());
    }

    #[test]
    fn batched_and_sequential_adds_agree() {
        let mut one_at_a_time = Accumulator::new_rsa2048(false);
        one_at_a_time.add(&["a".into()]);
        one_at_a_time.add(&["b".into()]);
        one_at_a_time.add(&["c".into()]);
        let mut batched = Accumulator::new_rsa2048(false);
        batched.add(&["a".into(), "b".into(), "c".into()]);
        assert_eq!(one_at_a_time, batched);
    }

    #[test]
    fn tracked_product_ignores_duplicate_adds() {
        let mut acc = Accumulator::new_rsa2048(true);
        acc.add(&["a".into()]);
        acc.add(&["a".into()]);
        assert_eq!(acc.products, Some(hash_to_prime(b"a")));
    }

    #[test]
    fn equality_is_group_and_value_only() {
        let mut holding = Accumulator::new_rsa2048(true);
        let mut plain = Accumulator::new_rsa2048(false);
        holding.add(&["a".into(), "b".into()]);
        plain.add(&["a".into(), "b".into()]);
        assert_eq!(holding, plain);
        plain.add(&["c".into()]);
        assert_ne!(holding, plain);
    }

    #[test]
    fn root_factor_yields_simultaneous_roots() {
        let acc = Accumulator::new_rsa2048(false);
        let exponents: Vec<Integer> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|e| hash_to_prime(e.as_bytes()))
            .collect();
        let full = exponents.iter().fold(Integer::from(1), |p, e| p * e);
        let value = mod_pow(acc.value(), &full, acc.modulus()).unwrap();

        let roots = acc.root_factor(&exponents);
        assert_eq!(roots.len(), exponents.len());
        for (root, exponent) in roots.iter().zip(&exponents) {
            assert_eq!(mod_pow(root, exponent, acc.modulus()).unwrap(), value);
        }
        assert!(acc.root_factor(&[]).is_empty());
    }

    #[test]
    fn root_factor_matches_the_naive_schedule() {
        let acc = Accumulator::new_rsa2048(false);
        let exponents: Vec<Integer> =
            vec![Integer::from(3), Integer::from(5), Integer::from(7)];
        let naive: Vec<Integer> = (0..exponents.len())
            .map(|i| {
                exponents
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .fold(acc.value().clone(), |v, (_, e)| {
                        mod_pow(&v, e, acc.modulus()).unwrap()
                    })
            })
            .collect();
        assert_eq!(acc.root_factor(&exponents), naive);
    }
}
