use crate::math::is_probable_prime;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rand::RngCore;
use rug::{integer::Order, Integer};

/// The RSA-2048 factoring-challenge modulus. Its factorization is
/// publicly unknown, making it a ready-made group of unknown order.
/// <https://en.wikipedia.org/wiki/RSA_numbers#RSA-2048>
pub static RSA2048_MODULUS: Lazy<Integer> = Lazy::new(|| {
    Integer::from(
        Integer::parse(
            "2519590847565789349402718324004839857142928212620403202777713783604366202070\
             7595556264018525880784406918290641249515082189298559149176184502808489120072\
             8449926873928072877767359714183472702618963750149718246911650776133798590957\
             0009733045974880842840179742910064245869181719511874612151517265463228221686\
             9987549182422433637259085141865462043576798423387184774447920739934236584823\
             8242811981638150106748104516603773060562016196762561338441436038339044149526\
             3443219011465754445417842402092461651572335077870774981712577246796292638635\
             6373289912154831438167899885040445364023527381951378636564391212010397122822\
             120720357",
        )
        .expect("hardcoded decimal literal"),
    )
});

/// The conventional element of presumed unknown order modulo
/// [`RSA2048_MODULUS`], used as the fixed generator there and as the
/// commitment base inside PoKE2.
pub const UNKNOWN_ORDER_GENERATOR: u32 = 2;

/// Generate an RSA-type modulus of `bit_length` bits as the product of
/// two random probable primes of half that width.
///
/// The factors live only inside this call; nothing retains them, so the
/// returned modulus has unknown factorization to every party including
/// the caller.
pub fn generate_modulus(bit_length: u32) -> Integer {
    let half = bit_length / 2;
    let p = generate_prime(half);
    let q = generate_prime(half);
    p * q
}

// Random probable prime of exactly `bits` bits with the top two bits
// set, so the product of two of them reaches its full nominal width.
fn generate_prime(bits: u32) -> Integer {
    loop {
        let mut candidate = random_bits(bits);
        candidate.set_bit(bits - 1, true);
        candidate.set_bit(bits - 2, true);
        candidate.set_bit(0, true);
        if is_probable_prime(&candidate) {
            return candidate;
        }
    }
}

/// Uniform random integer in `[0, bound)`, drawn from the operating
/// system RNG by rejection sampling at `bound`'s bit width.
pub fn random_below(bound: &Integer) -> Integer {
    let bits = bound.significant_bits();
    loop {
        let candidate = random_bits(bits);
        if candidate < *bound {
            return candidate;
        }
    }
}

// `bits` uniform random bits from `OsRng`.
fn random_bits(bits: u32) -> Integer {
    let len = ((bits + 7) / 8) as usize;
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    let mut value = Integer::from_digits(&buf, Order::Msf);
    value >>= len as u32 * 8 - bits;
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_modulus_has_expected_width() {
        assert_eq!(RSA2048_MODULUS.significant_bits(), 2048);
        assert!(RSA2048_MODULUS.is_odd());
    }

    #[test]
    fn generated_moduli_have_requested_width() {
        let n = generate_modulus(512);
        assert_eq!(n.significant_bits(), 512);
        assert!(n.is_odd());
    }

    #[test]
    fn random_below_respects_bound() {
        let bound = Integer::from(1_000_003);
        for _ in 0..100 {
            let v = random_below(&bound);
            assert!(v < bound);
            assert!(v >= 0);
        }
    }
}
