/*
    Copyright the rsa-accumulator developers. All Rights Reserved.
    SPDX-License-Identifier: Apache-2.0
*/
//! A dynamic universal accumulator over an RSA group of unknown order,
//! following the constructions of Boneh, Bünz and Fisch,
//! <https://eprint.iacr.org/2018/1188>.
//!
//! A single group element stands in for an arbitrary set: elements are
//! mapped to prime exponents, folded into the value by exponentiation and
//! removed again by taking roots. Holders of the compact value can check
//! succinct membership and non-membership proofs without ever seeing the
//! set itself.
#![deny(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_parens,
    unused_lifetimes,
    unconditional_recursion,
    unused_extern_crates,
    trivial_casts,
    trivial_numeric_casts
)]
mod error;
mod hash;
mod math;


pub mod accumulator;
pub mod poe;
pub mod poke2;

pub use error::AccError;
pub use hash::{elements_to_prime, even_hex, hash_to_integer, hash_to_prime};
pub use math::{bezout, is_probable_prime, mod_inverse, mod_pow, shamir_trick};
pub use poe::PoeProof;
pub use poke2::Poke2Proof;
