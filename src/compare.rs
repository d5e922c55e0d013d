use subtle::ConstantTimeEq;

/// Compares two strings without exiting early on the first mismatched byte, preventing
/// timing attacks that would otherwise reveal how much of a secret a guess got right.
///
/// Strings of different lengths are rejected immediately, so the _length_ of a secret is
/// not protected. Only the byte-by-byte comparison of equal-length strings runs in
/// constant time. Digests produced by this crate always have the same length, so this
/// makes no difference to [`Hash::verify()`](crate::Hash::verify).
///
/// ```rust
/// use saltyhash::constant_time_compare;
///
/// assert!(constant_time_compare("digest", "digest"));
/// assert!(!constant_time_compare("digest", "digesT"));
/// assert!(!constant_time_compare("digest", "digestx"));
/// ```
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());

    if a.len() != b.len() {
        return false;
    }

    accumulate_difference(a.iter().zip(b.iter())).ct_eq(&0).into()
}

/// ORs together the XOR of every pair of bytes, consuming every pair
fn accumulate_difference<'a, I>(pairs: I) -> u8
where
    I: Iterator<Item = (&'a u8, &'a u8)>,
{
    pairs.fold(0u8, |difference, (x, y)| difference | (x ^ y))
}
