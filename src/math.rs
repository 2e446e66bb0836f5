use crate::error::AccError;
use core::cmp::Ordering;
use rug::{integer::IsPrime, Integer};

// Miller-Rabin repetitions; error probability at most 4^-30.
const MILLER_RABIN_REPS: u32 = 30;

/// Probabilistic primality check with negligible false-positive rate.
pub fn is_probable_prime(candidate: &Integer) -> bool {
    candidate.is_probably_prime(MILLER_RABIN_REPS) != IsPrime::No
}

/// Modular exponentiation accepting negative exponents.
///
/// A negative exponent raises the modular inverse of `base` to `-exp`.
/// [`AccError::NotInvertible`] is returned when no inverse exists, which
/// for an RSA modulus would imply knowledge of a factor.
pub fn mod_pow(base: &Integer, exp: &Integer, modulus: &Integer) -> Result<Integer, AccError> {
    if exp.cmp0() == Ordering::Less {
        let inverse = mod_inverse(base, modulus)?;
        let positive = Integer::from(-exp);
        Ok(inverse
            .pow_mod(&positive, modulus)
            .expect("exponent is non-negative"))
    } else {
        Ok(Integer::from(base)
            .pow_mod(exp, modulus)
            .expect("exponent is non-negative"))
    }
}

/// The multiplicative inverse of `x` modulo `modulus`.
pub fn mod_inverse(x: &Integer, modulus: &Integer) -> Result<Integer, AccError> {
    Integer::from(x)
        .invert(modulus)
        .map_err(|_| AccError::NotInvertible)
}

/// Bézout coefficients `(a, b)` with `a·x + b·y = gcd(x, y)`.
///
/// Recursive Euclid: when `y` divides `x` the pair is `(0, 1)`, otherwise
/// the coefficients of `(y, x mod y)` are combined one level up.
/// Coefficients are signed and frequently negative.
pub fn bezout(x: &Integer, y: &Integer) -> (Integer, Integer) {
    let rem = Integer::from(x % y);
    if rem.cmp0() == Ordering::Equal {
        (Integer::new(), Integer::from(1))
    } else {
        let (a, b) = bezout(y, &rem);
        let quot = Integer::from(x / y);
        let combined = a - Integer::from(&b * &quot);
        (b, combined)
    }
}

/// Shamir's trick: combine an `x`-th root `w1` and a `y`-th root `w2` of
/// the same value into an `xy`-th root, for co-prime `x` and `y`.
///
/// Callers must ensure `w1^x ≡ w2^y (mod modulus)`; the co-primality of
/// the degrees is checked here and violations are rejected with
/// [`AccError::InputsNotCoprime`].
pub fn shamir_trick(
    w1: &Integer,
    w2: &Integer,
    x: &Integer,
    y: &Integer,
    modulus: &Integer,
) -> Result<Integer, AccError> {
    let (a, b) = bezout(x, y);
    if Integer::from(&a * x) + Integer::from(&b * y) != 1 {
        return Err(AccError::InputsNotCoprime);
    }
    let left = mod_pow(w1, &b, modulus)?;
    let right = mod_pow(w2, &a, modulus)?;
    Ok(left * right % modulus)
}
