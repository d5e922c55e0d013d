#![deny(missing_docs)]

//! A library for hashing passwords into salted, versioned, iterated digests and verifying
//! passwords against them.
//!
//! A hash string carries everything needed to check a password later:
//!
//! ```text
//! $<version>$<rounds>$<salt><digest>
//! ```
//!
//! * `version` is a 2-character tag such as `2a`.
//! * `rounds` is how many times the digest was iterated.
//! * `salt` is 22 base64 characters, derived with
//!   [PBKDF2](https://en.wikipedia.org/wiki/PBKDF2) from the password and 16 fresh random
//!   bytes.
//! * `digest` is the first 31 hex characters of the final round.
//!
//! The salt and digest have fixed widths and are written without a delimiter between them,
//! so hash strings produced by any version of this crate can be parsed by any other.
//!
//! This is not a memory-hard construction. Each round is one digest computation, so the
//! cost of a guess is linear in the round count. Pick the round count accordingly.
//!
//! # Examples
//!
//! Hash a password, then verify the hash:
//!
//! ```rust
//! use saltyhash::Hasher;
//!
//! let hash = Hasher::default().hash("password").unwrap();
//! assert!(hash.verify("password").unwrap());
//! assert!(!hash.verify("hunter2").unwrap());
//! ```
//!
//! Change the parameters used for hashing:
//!
//! ```rust
//! use saltyhash::{Algorithm, Hasher};
//!
//! let hash = Hasher::new()
//!         .algorithm(Algorithm::Sha256)
//!         .rounds(1000)
//!         .version("2b")
//!         .hash("password")
//!         .unwrap();
//!
//! assert_eq!(hash.rounds(), 1000);
//! assert_eq!(hash.salt().len(), 22);
//! assert_eq!(hash.digest().len(), 31);
//! assert!(hash.to_string().starts_with("$2b$1000$"));
//! ```
//!
//! Store a hash string, then verify a password against it:
//!
//! ```rust
//! use saltyhash::{compare_password, hash};
//!
//! let stored = hash("Tr0ub4dor&3", 4, "sha256", "2a").unwrap().to_string();
//!
//! assert!(compare_password("Tr0ub4dor&3", &stored).unwrap());
//! assert!(!compare_password("wrong-password", &stored).unwrap());
//! ```
//!
//! A hash string that cannot be parsed is an error rather than a failed match:
//!
//! ```rust
//! use saltyhash::{compare_password, HashError};
//!
//! assert!(matches!(
//!     compare_password("password", "not-a-valid-hash"),
//!     Err(HashError::MalformedHash(_))
//! ));
//! ```
//!
//! Derive a standalone salt:
//!
//! ```rust
//! use saltyhash::generate_salt_from_kdf;
//!
//! let salt = generate_salt_from_kdf("seed", 1000, "sha256").unwrap();
//! assert_eq!(salt.len(), 22);
//! ```

mod algorithm;
mod compare;
mod error;
mod hasher;
mod kdf;
mod lexer;

pub use algorithm::Algorithm;
pub use compare::constant_time_compare;
pub use error::HashError;
pub use hasher::{Hash, Hasher, DEFAULT_ROUNDS, DEFAULT_VERSION, DIGEST_LEN};
pub use kdf::{SaltGenerator, DEFAULT_KDF_ROUNDS, SALT_LEN, SEED_LEN};

use hasher::{rounds_from_i64, validate_input};
use std::str::FromStr;

/// Hashes `input` with the given round count, algorithm name and version tag.
///
/// Parameters are checked in order (input, rounds, algorithm, version) before any work is
/// done. The defaults used by [`Hasher::default()`] are 12 rounds, `"sha256"` and `"2a"`.
pub fn hash(input: &str, rounds: i64, algorithm: &str, version: &str) -> Result<Hash, HashError> {
    validate_input(input, "Input password is required and cannot be empty")?;
    let rounds = rounds_from_i64(rounds)?;
    let alg = Algorithm::from_str(algorithm)?;

    Hasher::new()
        .rounds(rounds)
        .algorithm(alg)
        .version(version)
        .hash(input)
}

/// Checks `password` against a stored hash string.
///
/// Returns `Ok(false)` for a well-formed hash that does not match. Returns an error if
/// either argument is blank or the hash string is malformed, in which case the password
/// could not be checked at all.
///
/// The digest is always recomputed with SHA-256. See [`Hash::verify_with_algorithm()`] for
/// hashes made with other algorithms.
pub fn compare_password(password: &str, hashed: &str) -> Result<bool, HashError> {
    validate_input(password, "Password is required and cannot be empty")?;
    validate_input(hashed, "Hash value is required and cannot be empty")?;

    let hash = Hash::from_str(hashed)
        .inspect_err(|e| tracing::debug!(error = %e, "rejected stored hash string"))?;

    hash.verify(password)
}

/// Derives a 22-character salt from `input` with PBKDF2, using the given number of
/// iterations and algorithm name. The default used by [`SaltGenerator::default()`] is
/// 100000 iterations of `"sha256"`.
pub fn generate_salt_from_kdf(
    input: &str,
    rounds: i64,
    algorithm: &str,
) -> Result<String, HashError> {
    validate_input(input, "Input is required and cannot be empty")?;
    let rounds = rounds_from_i64(rounds)?;
    let alg = Algorithm::from_str(algorithm)?;

    SaltGenerator::new()
        .rounds(rounds)
        .algorithm(alg)
        .generate(input)
}
