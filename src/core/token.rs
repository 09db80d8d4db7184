use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated offer ids
pub const OFFER_ID_LENGTH: usize = 10;

/// Generate a random alphanumeric token of `len` characters
///
/// Uses the thread-local generator, a CSPRNG seeded from the operating system.
pub fn generate_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random ten-digit account number
pub fn random_account_id() -> u64 {
    rand::thread_rng().gen_range(1_000_000_000..10_000_000_000)
}
