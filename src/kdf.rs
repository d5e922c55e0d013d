use crate::algorithm::Algorithm;
use crate::error::HashError;
use crate::hasher::{validate_input, validate_rounds};

use base64::engine::general_purpose::STANDARD as b64_std;
use base64::Engine;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Number of random bytes fed to PBKDF2 as its salt
pub const SEED_LEN: usize = 16;

/// Length, in characters, of every salt this crate produces
pub const SALT_LEN: usize = 22;

/// Default number of PBKDF2 iterations used by [`SaltGenerator`]
pub const DEFAULT_KDF_ROUNDS: u32 = 100_000;

/// A builder for a standalone salt derived from an input with PBKDF2.
///
/// The salt is 22 characters of the standard base64 alphabet. It is never deterministic
/// from the input alone: 16 fresh random bytes are mixed in on every call.
#[derive(Clone, Copy, Debug)]
pub struct SaltGenerator {
    alg: Algorithm,
    rounds: u32,
}

impl Default for SaltGenerator {
    /// Create a new `SaltGenerator` with default values.
    ///
    /// The defaults are as follows:
    ///
    /// * Algorithm: SHA-256
    /// * Rounds: 100000
    fn default() -> Self {
        Self {
            alg: Algorithm::Sha256,
            rounds: DEFAULT_KDF_ROUNDS,
        }
    }
}

impl SaltGenerator {
    /// Create a new `SaltGenerator` with default values (SHA-256, 100000 rounds)
    pub fn new() -> Self {
        Self::default()
    }

    /// The digest algorithm underlying the PBKDF2 HMAC
    pub fn algorithm(mut self, alg: Algorithm) -> Self {
        self.alg = alg;
        self
    }

    /// The number of PBKDF2 iterations. Generation time grows linearly with this value and
    /// no upper limit is enforced.
    pub fn rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Consumes the `SaltGenerator` and returns a salt, drawing randomness from the
    /// operating system.
    pub fn generate<I>(self, input: &I) -> Result<String, HashError>
    where
        I: AsRef<str> + ?Sized,
    {
        self.generate_with_rng(input, &mut OsRng)
    }

    /// Consumes the `SaltGenerator` and returns a salt, drawing randomness from `rng`.
    ///
    /// Passing a seeded generator makes the salt reproducible. Only do this in tests.
    pub fn generate_with_rng<I, R>(self, input: &I, rng: &mut R) -> Result<String, HashError>
    where
        I: AsRef<str> + ?Sized,
        R: RngCore + CryptoRng + ?Sized,
    {
        let input = input.as_ref();

        validate_input(input, "Input is required and cannot be empty")?;
        let rounds = validate_rounds(self.rounds)?;

        tracing::debug!(algorithm = %self.alg, rounds, "generating salt from KDF");

        let seed = draw_seed(rng)?;
        derive_salt(self.alg, input.as_bytes(), &seed, rounds)
    }
}

/// Fills a fresh seed for the salt derivation
pub(crate) fn draw_seed<R>(rng: &mut R) -> Result<[u8; SEED_LEN], HashError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut seed = [0u8; SEED_LEN];
    rng.try_fill_bytes(&mut seed)
        .map_err(|e| HashError::RandomSource(e.to_string()))?;

    Ok(seed)
}

/// Runs PBKDF2 over `input` and `seed`, then keeps the first 22 characters of the base64
/// encoding of the 22 derived bytes
pub(crate) fn derive_salt(
    alg: Algorithm,
    input: &[u8],
    seed: &[u8],
    rounds: u32,
) -> Result<String, HashError> {
    let mut derived = [0u8; SALT_LEN];
    alg.pbkdf2(input, seed, rounds, &mut derived)?;

    let mut salt = b64_std.encode(derived);
    salt.truncate(SALT_LEN);

    Ok(salt)
}
