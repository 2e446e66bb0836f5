//! The accumulator state machine, its proof value objects and the
//! modulus/randomness setup they are built on.

mod acc;
mod proof;
mod setup;

pub use acc::*;
pub use proof::*;
pub use setup::*;
