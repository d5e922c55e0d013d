use crate::algorithm::Algorithm;
use crate::compare::constant_time_compare;
use crate::error::HashError;
use crate::kdf::{derive_salt, draw_seed, SALT_LEN};
use crate::lexer::TokenizedHash;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::str::FromStr;

/// Length, in characters, of the digest stored in a hash string
pub const DIGEST_LEN: usize = 31;

/// Default number of rounds used by [`Hasher`]
pub const DEFAULT_ROUNDS: u32 = 12;

/// Default version tag written into hash strings
pub const DEFAULT_VERSION: &str = "2a";

/// A builder for a hash. Parameters for hashing, such as the number of rounds and the digest
/// algorithm, are set with chained calls before the final call to [`Hasher::hash()`].
#[derive(Clone, Debug)]
pub struct Hasher<'a> {
    alg: Algorithm,
    rounds: u32,
    version: &'a str,
}

impl Default for Hasher<'_> {
    /// Create a new `Hasher` with default values.
    ///
    /// The defaults are as follows:
    ///
    /// * Algorithm: SHA-256
    /// * Rounds: 12
    /// * Version: `2a`
    fn default() -> Self {
        Self {
            alg: Algorithm::Sha256,
            rounds: DEFAULT_ROUNDS,
            version: DEFAULT_VERSION,
        }
    }
}

impl<'a> Hasher<'a> {
    /// Create a new `Hasher` with default values (SHA-256, 12 rounds, version `2a`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies the digest algorithm to use, both for the rounds and for deriving the salt.
    ///
    /// Note that the algorithm is not recorded in the hash string. [`Hash::verify()`] always
    /// uses SHA-256, so a hash made with any other algorithm has to be checked using
    /// [`Hash::verify_with_algorithm()`].
    pub fn algorithm(mut self, alg: Algorithm) -> Self {
        self.alg = alg;
        self
    }

    /// The number of times the digest is re-applied to its own hex output. The same count is
    /// used for the PBKDF2 iterations that derive the salt.
    ///
    /// Hashing and verification time grow linearly with this value, and no upper limit is
    /// enforced. Choose the highest count your login latency budget can afford.
    pub fn rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// A 2-character tag identifying the scheme generation, such as `2a` or `2b`. The tag is
    /// stored in the hash string but does not affect the computed digest.
    ///
    /// The width is counted in Unicode scalar values (`char`s), not UTF-16 code units. A
    /// single character outside the Basic Multilingual Plane, such as an emoji, counts as 1
    /// here and is rejected, even though it is 2 UTF-16 code units wide.
    pub fn version(mut self, version: &'a str) -> Self {
        self.version = version;
        self
    }

    /// Consumes the `Hasher` and returns a hash, drawing the salt seed from the operating
    /// system's secure random number generator.
    ///
    /// This can be an expensive operation for high round counts. For some applications, it
    /// might make sense to move this operation to a separate thread.
    pub fn hash<P>(self, input: &P) -> Result<Hash, HashError>
    where
        P: AsRef<str> + ?Sized,
    {
        self.hash_with_rng(input, &mut OsRng)
    }

    /// Consumes the `Hasher` and returns a hash, drawing the salt seed from `rng`.
    ///
    /// Passing a seeded generator makes the hash reproducible, which is useful in tests but
    /// defeats the purpose of a salt in production.
    pub fn hash_with_rng<P, R>(self, input: &P, rng: &mut R) -> Result<Hash, HashError>
    where
        P: AsRef<str> + ?Sized,
        R: RngCore + CryptoRng + ?Sized,
    {
        let input = input.as_ref();

        validate_input(input, "Input password is required and cannot be empty")?;
        let rounds = validate_rounds(self.rounds)?;
        validate_version(self.version)?;

        tracing::debug!(
            algorithm = %self.alg,
            rounds,
            version = self.version,
            "hashing input"
        );

        let seed = draw_seed(rng)?;
        let salt = derive_salt(self.alg, input.as_bytes(), &seed, rounds)?;
        let digest = iterate_digest(self.alg, input, &salt, rounds);

        Hash::from_parts(self.version, rounds, &salt, &digest)
    }
}

/// A container for a hash, the salt it was computed with, and the parameters used for
/// hashing.
///
/// The string form is `$<version>$<rounds>$<salt><digest>`, with a 22-character salt and a
/// 31-character digest concatenated without a delimiter.
///
/// `Hash` does not implement `PartialEq`. Check passwords with [`Hash::verify()`], or compare
/// digests with [`constant_time_compare()`](crate::constant_time_compare).
///
/// ```compile_fail
/// use saltyhash::Hasher;
///
/// let a = Hasher::default().hash("password").unwrap();
/// let b = a.clone();
/// assert!(a == b);
/// ```
#[derive(Clone, Debug)]
pub struct Hash {
    version: String,
    rounds: u32,
    salt: String,
    digest: String,
}

impl fmt::Display for Hash {
    /// Writes the hash string. Aside from the digest, the hash string includes the salt and
    /// the parameters needed to recompute the digest, making it easy to store in a database.
    ///
    /// A hash string looks something like this:
    ///
    /// _$2a$12$Eg+2z/z4syxD5yJSVsT4N64c1a6e3bb8f1e9f0d7a3c5b2e4f6a8c_
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}${}${}{}",
            self.version, self.rounds, self.salt, self.digest
        )
    }
}

impl FromStr for Hash {
    type Err = HashError;

    /// Deserializes a hash string into its version, rounds, salt and digest.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokenized_hash = TokenizedHash::from_str(s)?;

        validate_version(&tokenized_hash.version)?;
        let rounds = parse_rounds(&tokenized_hash.rounds)?;

        let salt_and_digest = &tokenized_hash.salt_and_digest;
        let split = salt_and_digest
            .char_indices()
            .nth(SALT_LEN)
            .map(|(i, _)| i)
            .unwrap_or(salt_and_digest.len());

        let (salt, digest) = salt_and_digest.split_at(split);

        Self::from_parts(&tokenized_hash.version, rounds, salt, digest)
    }
}

impl Hash {
    /// Assembles a hash from its parts, e.g. when they are stored in separate columns.
    ///
    /// The version must be exactly 2 characters, rounds must be positive, the salt exactly 22
    /// characters and the digest exactly 31 characters. None of them may contain `$`.
    pub fn from_parts(
        version: &str,
        rounds: u32,
        salt: &str,
        digest: &str,
    ) -> Result<Self, HashError> {
        validate_version(version)?;
        let rounds = validate_rounds(rounds)?;

        let salt_len = salt.chars().count();
        if salt_len != SALT_LEN {
            return Err(HashError::InvalidSaltLength(salt_len));
        }

        let digest_len = digest.chars().count();
        if digest_len != DIGEST_LEN {
            return Err(HashError::InvalidDigestLength(digest_len));
        }

        if salt.contains('$') || digest.contains('$') {
            return Err(HashError::MalformedHash(
                "Salt and digest cannot contain '$'",
            ));
        }

        Ok(Self {
            version: String::from(version),
            rounds,
            salt: String::from(salt),
            digest: String::from(digest),
        })
    }

    /// The 2-character version tag
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The number of rounds the digest was computed with
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The 22-character salt
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// The 31-character digest
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Checks if the hash matches the provided password, recomputing the digest with
    /// SHA-256.
    ///
    /// The hash string has no algorithm field, so SHA-256 is assumed for every stored hash.
    /// A hash made with another algorithm will simply never match here; use
    /// [`Hash::verify_with_algorithm()`] for those.
    ///
    /// Returns an error only for a blank password. A wrong password yields `Ok(false)`.
    pub fn verify<P>(&self, password: &P) -> Result<bool, HashError>
    where
        P: AsRef<str> + ?Sized,
    {
        self.verify_with_algorithm(password, Algorithm::Sha256)
    }

    /// Checks if the hash matches the provided password, recomputing the digest with the
    /// given algorithm.
    pub fn verify_with_algorithm<P>(&self, password: &P, alg: Algorithm) -> Result<bool, HashError>
    where
        P: AsRef<str> + ?Sized,
    {
        let password = password.as_ref();
        validate_input(password, "Password is required and cannot be empty")?;

        tracing::debug!(algorithm = %alg, rounds = self.rounds, "verifying password");

        let digest = iterate_digest(alg, password, &self.salt, self.rounds);

        // The comparison must scan the whole digest
        Ok(constant_time_compare(&digest, &self.digest))
    }
}

/// Digests `input` followed by `salt`, then re-digests the hex output `rounds - 1` more
/// times and keeps the first 31 hex characters
fn iterate_digest(alg: Algorithm, input: &str, salt: &str, rounds: u32) -> String {
    let mut working = format!("{input}{salt}");

    for _ in 0..rounds {
        working = alg.hex_digest(working.as_bytes());
    }

    working.truncate(DIGEST_LEN);
    working
}

pub(crate) fn validate_input(input: &str, msg: &'static str) -> Result<(), HashError> {
    if input.trim().is_empty() {
        return Err(HashError::EmptyInput(msg));
    }

    Ok(())
}

pub(crate) fn validate_rounds(rounds: u32) -> Result<u32, HashError> {
    if rounds == 0 {
        return Err(HashError::InvalidRounds("Rounds must be a positive number"));
    }

    Ok(rounds)
}

/// Converts a signed round count, rejecting anything that is not a positive `u32`
pub(crate) fn rounds_from_i64(rounds: i64) -> Result<u32, HashError> {
    if rounds <= 0 {
        return Err(HashError::InvalidRounds("Rounds must be a positive number"));
    }

    match u32::try_from(rounds) {
        Ok(r) => Ok(r),
        Err(_) => Err(HashError::InvalidRounds("Rounds is too big")),
    }
}

fn parse_rounds(rounds: &str) -> Result<u32, HashError> {
    if rounds.is_empty() || !rounds.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HashError::InvalidRounds("Rounds must be a decimal number"));
    }

    match rounds.parse() {
        Ok(r) => validate_rounds(r),
        Err(_) => Err(HashError::InvalidRounds("Rounds is too big")),
    }
}

/// Width is in `char`s, so one astral-plane character is 1 wide (it is 2 in UTF-16)
fn validate_version(version: &str) -> Result<(), HashError> {
    if version.chars().count() != 2 || version.contains('$') {
        return Err(HashError::InvalidVersion);
    }

    Ok(())
}
