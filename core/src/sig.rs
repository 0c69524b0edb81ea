//! Request signature calculator.

use md5::{Digest, Md5};

/// Compute the request signature over `pairs` with the shared `secret`.
///
/// Pairs are sorted by key, concatenated as `key=value` and suffixed with
/// the secret; the signature is the lowercase hex MD5 of the UTF-8 bytes.
/// Pure and total: the same input always yields the same digest, including
/// for non-ASCII values.
pub fn signature<'a, I>(secret: &str, pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut sorted: Vec<(&str, &str)> = pairs.into_iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let mut hasher = Md5::new();
    for (key, value) in sorted {
        hasher.update(key.as_bytes());
        hasher.update(b"=");
        hasher.update(value.as_bytes());
    }
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}
