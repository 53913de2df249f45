//! Randomized credential generation.
//!
//! Pure, no I/O: the random source is passed in so tests can seed it.

use rand::Rng;

use crate::api::types::Credentials;

const USERNAME_PREFIX: &str = "user";
const PASSWORD_PREFIX: &str = "Pass@";

/// Generate a fresh username/password pair.
///
/// Username and password each carry a 6-digit random number after a fixed
/// prefix.
pub fn generate(rng: &mut impl Rng) -> Credentials {
    Credentials {
        username: format!("{}{}", USERNAME_PREFIX, rng.gen_range(100_000..=999_999)),
        password: format!("{}{}", PASSWORD_PREFIX, rng.gen_range(100_000..=999_999)),
    }
}
