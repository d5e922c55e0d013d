//! Properties that must hold for every password, checked with generated inputs

use proptest::prelude::*;
use saltyhash::{
    compare_password, constant_time_compare, hash, Hash, Hasher, DIGEST_LEN, SALT_LEN,
};
use std::str::FromStr;

fn password() -> impl Strategy<Value = String> {
    "\\PC{1,40}".prop_filter("must not be blank", |s| !s.trim().is_empty())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn hash_string_has_canonical_shape(input in password(), rounds in 1i64..16) {
        let hash_string = hash(&input, rounds, "sha256", "2a").unwrap().to_string();

        // ^\$\w{2}\$\d+\$.{53}$
        let fields: Vec<&str> = hash_string.split('$').collect();
        prop_assert_eq!(fields.len(), 4);
        prop_assert_eq!(fields[0], "");
        prop_assert_eq!(fields[1].chars().count(), 2);
        prop_assert!(fields[1].chars().all(is_word_char));
        prop_assert_eq!(fields[2], rounds.to_string());
        prop_assert_eq!(fields[3].chars().count(), SALT_LEN + DIGEST_LEN);
    }

    #[test]
    fn hashing_round_trips(input in password(), rounds in 1i64..16) {
        let hash_string = hash(&input, rounds, "sha256", "2a").unwrap().to_string();

        prop_assert!(compare_password(&input, &hash_string).unwrap());
        prop_assert_eq!(
            Hash::from_str(&hash_string).unwrap().to_string(),
            hash_string
        );
    }

    #[test]
    fn other_passwords_do_not_match(input in password(), other in password()) {
        prop_assume!(input != other);

        let hash_string = hash(&input, 3, "sha256", "2a").unwrap().to_string();

        prop_assert!(!compare_password(&other, &hash_string).unwrap());
    }

    #[test]
    fn salts_are_fresh(input in password()) {
        let first = Hasher::new().rounds(2).hash(&input).unwrap();
        let second = Hasher::new().rounds(2).hash(&input).unwrap();

        prop_assert_ne!(first.salt(), second.salt());
        prop_assert_ne!(first.digest(), second.digest());
    }

    #[test]
    fn constant_time_compare_agrees_with_equality(a in "\\PC{0,40}", b in "\\PC{0,40}") {
        let extended = format!("{}x", a);

        prop_assert!(constant_time_compare(&a, &a));
        prop_assert!(!constant_time_compare(&a, &extended));
        prop_assert_eq!(constant_time_compare(&a, &b), a == b);
    }
}
