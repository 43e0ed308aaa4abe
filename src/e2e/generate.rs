use rand::{Rng, distr::Alphanumeric};
use uuid::Uuid;

pub const DEFAULT_RANDOM_LENGTH: usize = 15;
const EMAIL_RANDOM_LENGTH: usize = 10;

/// Endless supply of `length`-character strings drawn from `[a-zA-Z0-9]`.
pub fn alphanumeric_strings(length: usize) -> impl Iterator<Item = String> {
    let mut rng = rand::rng();
    std::iter::repeat_with(move || {
        (&mut rng)
            .sample_iter(Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    })
}

pub fn rand_alphanumeric(length: usize) -> String {
    alphanumeric_strings(length).next().unwrap_or_default()
}

pub fn generate_autotest_email() -> String {
    format!(
        "autotest_{}@testmail.com",
        rand_alphanumeric(EMAIL_RANDOM_LENGTH)
    )
}

pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}
