use thiserror::Error;

/// The distinguishable failure modes of accumulator operations.
///
/// Every fault is synchronous and leaves the accumulator exactly as it
/// was: state is committed only after all validation has passed.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum AccError {
    /// A deletion was attempted with a witness that does not reproduce the
    /// current accumulator value. The caller's view of the accumulator is
    /// out of date or the proof is forged.
    #[error("bad witness")]
    BadWitness,

    /// Exponents required to be co-prime were not. Prime products of
    /// distinct elements are co-prime by construction, so this signals a
    /// caller-side precondition violation.
    #[error("inputs not co-prime")]
    InputsNotCoprime,

    /// A membership proof was requested from an accumulator that was not
    /// constructed to track its elements.
    #[error("accumulator does not hold its elements")]
    ElementsNotHeld,

    /// An element product did not divide the tracked product exactly.
    #[error("inexact division of the element product")]
    InexactDivision,

    /// A modular inverse was requested for a residue that has none. With
    /// the factorization of the modulus unknown this cannot occur in
    /// normal operation.
    #[error("residue is not invertible")]
    NotInvertible,
}
