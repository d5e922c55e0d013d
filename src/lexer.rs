use crate::error::HashError;

use std::ops::Range;
use std::str::FromStr;

/// The fields of a hash string after splitting on `$`, before any of them is validated
pub struct TokenizedHash {
    pub version: String,
    pub rounds: String,
    pub salt_and_digest: String,
}

impl FromStr for TokenizedHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum HashStates {
            Start,
            Version,
            Rounds,
            SaltAndDigest,
        }

        let mut state = HashStates::Start;

        let mut version = 0..0;
        let mut rounds = 0..0;
        let mut salt_and_digest = 0..0;

        for (i, c) in s.char_indices() {
            let next = i + c.len_utf8();

            match state {
                HashStates::Start => {
                    state = match c {
                        '$' => {
                            version = next..next;
                            HashStates::Version
                        }
                        _ => return Err(HashError::MalformedHash("Must begin with '$'")),
                    };
                }

                HashStates::Version => {
                    if c == '$' {
                        rounds = next..next;
                        state = HashStates::Rounds;
                    } else {
                        version.end = next;
                    }
                }

                HashStates::Rounds => {
                    if c == '$' {
                        salt_and_digest = next..next;
                        state = HashStates::SaltAndDigest;
                    } else {
                        rounds.end = next;
                    }
                }

                HashStates::SaltAndDigest => {
                    if c == '$' {
                        return Err(HashError::MalformedHash(
                            "Too many '$' delimiters; expected exactly 4 fields",
                        ));
                    }

                    salt_and_digest.end = next;
                }
            }
        }

        if !matches!(state, HashStates::SaltAndDigest) {
            return Err(HashError::MalformedHash(
                "Too few '$' delimiters; expected exactly 4 fields",
            ));
        }

        let field = |r: Range<usize>| String::from(&s[r]);

        Ok(Self {
            version: field(version),
            rounds: field(rounds),
            salt_and_digest: field(salt_and_digest),
        })
    }
}
