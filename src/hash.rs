use crate::accumulator::Element;
use crate::math::is_probable_prime;
use blake2::{Blake2b512, Digest};
use rug::{integer::Order, Integer};

/// Render a non-negative integer as big-endian hex, left-padded with one
/// zero when the digit count is odd.
///
/// Concatenations of even-length renderings are unambiguous, which makes
/// this the canonical encoding for every integer fed into a hash.
pub fn even_hex(i: &Integer) -> String {
    let hex = i.to_string_radix(16);
    if hex.len() % 2 == 0 {
        hex
    } else {
        format!("0{hex}")
    }
}

/// Deterministically map arbitrary bytes to an odd probable prime.
///
/// Hashes `input ‖ even_hex(nonce)` with Blake2b-512 for nonce 0, 1, 2…,
/// forces the digest odd and returns the first candidate passing a
/// Miller-Rabin test. The nonce search is unbounded; prime density among
/// 512-bit odd integers ends it after a handful of iterations.
pub fn hash_to_prime(input: &[u8]) -> Integer {
    let mut nonce = Integer::new();
    loop {
        let mut hasher = Blake2b512::new();
        hasher.update(input);
        hasher.update(even_hex(&nonce).as_bytes());
        let mut digest = hasher.finalize();
        // big-endian interpretation, so the last byte holds the low bit
        digest[63] |= 1;
        let candidate = Integer::from_digits(&digest, Order::Msf);
        if is_probable_prime(&candidate) {
            return candidate;
        }
        nonce += 1;
    }
}

/// The prime product encoding a batch of elements, 1 for an empty batch.
///
/// Distinct elements map to distinct primes with overwhelming
/// probability, so products over disjoint batches are co-prime.
pub fn elements_to_prime(elements: &[Element]) -> Integer {
    elements
        .iter()
        .fold(Integer::from(1), |product, e| product * e.to_prime())
}

/// Hash a sequence of integers to an unstructured challenge integer.
///
/// Same Blake2b-512 digest as [`hash_to_prime`] but without the
/// primality search; used where a challenge only needs to be unpredictable.
pub fn hash_to_integer(parts: &[&Integer]) -> Integer {
    let mut hasher = Blake2b512::new();
    for part in parts {
        hasher.update(even_hex(part).as_bytes());
    }
    Integer::from_digits(&hasher.finalize(), Order::Msf)
}
