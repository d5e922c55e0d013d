use crate::error::HashError;

use blake2::{Blake2b512, Blake2s256};
use digest::core_api::BlockSizeUser;
use digest::Digest;
use hmac::SimpleHmac;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use std::fmt;
use std::str::FromStr;

/// The digest algorithm used both for the iterated hashing rounds and as the HMAC inside
/// the PBKDF2 salt derivation.
///
/// Algorithms are named the way OpenSSL and Node.js name them (e.g. `sha256`, `sha3-512`,
/// `blake2b512`), which makes it possible to pass an algorithm name straight from a
/// configuration file. Use [`Algorithm::supported()`] to list every name this crate accepts.
///
/// This is a fixed subset of what OpenSSL offers: `md5`, `sha1`, the SHA-2 and SHA-3
/// families, `blake2b512` and `blake2s256`. Other OpenSSL names, such as `ripemd160`,
/// `sm3`, `shake256` or the `RSA-SHA256` style aliases, are rejected with
/// [`HashError::UnsupportedAlgorithm`]. `md5` and `sha1` are only here so that existing
/// hashes can still be produced and checked. Do not choose them for new hashes.
///
/// SHA-256 is the default and is the only algorithm used by [`Hash::verify()`]. Hashes
/// made with any other algorithm must be checked with [`Hash::verify_with_algorithm()`].
///
/// [`Hash::verify()`]: crate::Hash::verify
/// [`Hash::verify_with_algorithm()`]: crate::Hash::verify_with_algorithm
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// MD5 (`md5`)
    Md5,

    /// SHA-1 (`sha1`)
    Sha1,

    /// SHA-224 (`sha224`)
    Sha224,

    /// SHA-256 (`sha256`)
    #[default]
    Sha256,

    /// SHA-384 (`sha384`)
    Sha384,

    /// SHA-512 (`sha512`)
    Sha512,

    /// SHA-512/224 (`sha512-224`)
    Sha512_224,

    /// SHA-512/256 (`sha512-256`)
    Sha512_256,

    /// SHA3-224 (`sha3-224`)
    Sha3_224,

    /// SHA3-256 (`sha3-256`)
    Sha3_256,

    /// SHA3-384 (`sha3-384`)
    Sha3_384,

    /// SHA3-512 (`sha3-512`)
    Sha3_512,

    /// BLAKE2b with a 512-bit output (`blake2b512`)
    Blake2b512,

    /// BLAKE2s with a 256-bit output (`blake2s256`)
    Blake2s256,
}

const SUPPORTED: [Algorithm; 14] = [
    Algorithm::Md5,
    Algorithm::Sha1,
    Algorithm::Sha224,
    Algorithm::Sha256,
    Algorithm::Sha384,
    Algorithm::Sha512,
    Algorithm::Sha512_224,
    Algorithm::Sha512_256,
    Algorithm::Sha3_224,
    Algorithm::Sha3_256,
    Algorithm::Sha3_384,
    Algorithm::Sha3_512,
    Algorithm::Blake2b512,
    Algorithm::Blake2s256,
];

impl Algorithm {
    /// Every algorithm this crate can hash with, in no particular order of preference
    pub fn supported() -> &'static [Algorithm] {
        &SUPPORTED
    }

    /// The name used for this algorithm in configuration and by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
            Algorithm::Sha512_224 => "sha512-224",
            Algorithm::Sha512_256 => "sha512-256",
            Algorithm::Sha3_224 => "sha3-224",
            Algorithm::Sha3_256 => "sha3-256",
            Algorithm::Sha3_384 => "sha3-384",
            Algorithm::Sha3_512 => "sha3-512",
            Algorithm::Blake2b512 => "blake2b512",
            Algorithm::Blake2s256 => "blake2s256",
        }
    }

    /// Lowercase hex encoding of the digest of `data`
    pub(crate) fn hex_digest(self, data: &[u8]) -> String {
        match self {
            Algorithm::Md5 => hex_digest_with::<Md5>(data),
            Algorithm::Sha1 => hex_digest_with::<Sha1>(data),
            Algorithm::Sha224 => hex_digest_with::<Sha224>(data),
            Algorithm::Sha256 => hex_digest_with::<Sha256>(data),
            Algorithm::Sha384 => hex_digest_with::<Sha384>(data),
            Algorithm::Sha512 => hex_digest_with::<Sha512>(data),
            Algorithm::Sha512_224 => hex_digest_with::<Sha512_224>(data),
            Algorithm::Sha512_256 => hex_digest_with::<Sha512_256>(data),
            Algorithm::Sha3_224 => hex_digest_with::<Sha3_224>(data),
            Algorithm::Sha3_256 => hex_digest_with::<Sha3_256>(data),
            Algorithm::Sha3_384 => hex_digest_with::<Sha3_384>(data),
            Algorithm::Sha3_512 => hex_digest_with::<Sha3_512>(data),
            Algorithm::Blake2b512 => hex_digest_with::<Blake2b512>(data),
            Algorithm::Blake2s256 => hex_digest_with::<Blake2s256>(data),
        }
    }

    /// PBKDF2 with an HMAC over this algorithm. Fills all of `out`.
    pub(crate) fn pbkdf2(
        self,
        password: &[u8],
        salt: &[u8],
        rounds: u32,
        out: &mut [u8],
    ) -> Result<(), HashError> {
        match self {
            Algorithm::Md5 => pbkdf2_with::<Md5>(password, salt, rounds, out),
            Algorithm::Sha1 => pbkdf2_with::<Sha1>(password, salt, rounds, out),
            Algorithm::Sha224 => pbkdf2_with::<Sha224>(password, salt, rounds, out),
            Algorithm::Sha256 => pbkdf2_with::<Sha256>(password, salt, rounds, out),
            Algorithm::Sha384 => pbkdf2_with::<Sha384>(password, salt, rounds, out),
            Algorithm::Sha512 => pbkdf2_with::<Sha512>(password, salt, rounds, out),
            Algorithm::Sha512_224 => pbkdf2_with::<Sha512_224>(password, salt, rounds, out),
            Algorithm::Sha512_256 => pbkdf2_with::<Sha512_256>(password, salt, rounds, out),
            Algorithm::Sha3_224 => pbkdf2_with::<Sha3_224>(password, salt, rounds, out),
            Algorithm::Sha3_256 => pbkdf2_with::<Sha3_256>(password, salt, rounds, out),
            Algorithm::Sha3_384 => pbkdf2_with::<Sha3_384>(password, salt, rounds, out),
            Algorithm::Sha3_512 => pbkdf2_with::<Sha3_512>(password, salt, rounds, out),
            Algorithm::Blake2b512 => pbkdf2_with::<Blake2b512>(password, salt, rounds, out),
            Algorithm::Blake2s256 => pbkdf2_with::<Blake2s256>(password, salt, rounds, out),
        }
    }
}

fn hex_digest_with<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

// SimpleHmac rather than Hmac: the BLAKE2 cores buffer lazily, which Hmac does not accept
fn pbkdf2_with<D>(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) -> Result<(), HashError>
where
    D: Digest + BlockSizeUser + Clone + Sync,
{
    pbkdf2::pbkdf2::<SimpleHmac<D>>(password, salt, rounds, out)
        .map_err(|e| HashError::KeyDerivation(e.to_string()))
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = HashError;

    /// Looks up an algorithm by its exact (lowercase) name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SUPPORTED
            .iter()
            .copied()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| HashError::UnsupportedAlgorithm(String::from(s)))
    }
}
