use thiserror::Error;

/// Errors that may occur when using this crate
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HashError {
    /// A required string (an input, a password, or a hash string) is empty or contains only
    /// whitespace
    #[error("HashError: Empty input: {0}")]
    EmptyInput(&'static str),

    /// The round count is zero, negative, or does not fit in a `u32`
    #[error("HashError: Invalid rounds: {0}")]
    InvalidRounds(&'static str),

    /// The named digest algorithm is not one this crate provides. See
    /// [`Algorithm::supported()`](crate::Algorithm::supported).
    #[error("HashError: Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The version is not exactly 2 characters long (or contains the `$` delimiter)
    #[error("HashError: Invalid version: Version must be exactly 2 characters")]
    InvalidVersion,

    /// A hash string does not have the `$<version>$<rounds>$<salt><digest>` shape
    #[error("HashError: Malformed hash: {0}")]
    MalformedHash(&'static str),

    /// The salt of a hash is not exactly 22 characters long. Holds the length found.
    #[error("HashError: Invalid salt length: expected 22 characters, found {0}")]
    InvalidSaltLength(usize),

    /// The digest of a hash is not exactly 31 characters long. Holds the length found.
    #[error("HashError: Invalid digest length: expected 31 characters, found {0}")]
    InvalidDigestLength(usize),

    /// The secure random number generator failed to produce bytes
    #[error("HashError: Random source failure: {0}")]
    RandomSource(String),

    /// PBKDF2 rejected its parameters
    #[error("HashError: Key derivation failure: {0}")]
    KeyDerivation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            HashError::InvalidSaltLength(3).to_string(),
            "HashError: Invalid salt length: expected 22 characters, found 3"
        );
        assert_eq!(
            HashError::UnsupportedAlgorithm(String::from("md4")).to_string(),
            "HashError: Unsupported algorithm: md4"
        );
        assert_eq!(
            HashError::InvalidVersion.to_string(),
            "HashError: Invalid version: Version must be exactly 2 characters"
        );
    }
}
