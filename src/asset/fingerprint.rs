//! Content fingerprints.
//!
//! A fingerprint is the blake3 hash of an asset's transformed bytes,
//! truncated to [`DIGEST_LEN`] bytes and encoded as unpadded URL-safe
//! base64, so it can be used as a path segment directly.
//!
//! ```ignore
//! let fp = fingerprint::compute(b"body{}"); // 22 chars, [A-Za-z0-9_-]
//! let url = fingerprint::public_path("/assets/", &fp);
//! ```

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Digest bytes kept from the blake3 output.
pub const DIGEST_LEN: usize = 16;

/// Compute the fingerprint of transformed bytes.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> String {
    let hash = blake3::hash(data.as_ref());
    URL_SAFE_NO_PAD.encode(&hash.as_bytes()[..DIGEST_LEN])
}

/// Public path for a fingerprint.
#[inline]
pub fn public_path(prefix: &str, fingerprint: &str) -> String {
    format!("{prefix}{fingerprint}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_fingerprint_shape() {
        let fp = compute(b"body{color:red}");
        assert_eq!(fp.len(), 22);
        assert!(
            fp.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(compute("a{}"), compute(b"a{}".as_slice()));
        assert_ne!(compute("a{}"), compute("b{}"));
    }

    #[test]
    fn test_fingerprint_collision_resistance() {
        // Single-byte mutations of one base payload plus a growing suffix.
        let base = b"body{margin:0;padding:0;color:#343a40}".to_vec();
        let mut seen = FxHashSet::default();
        let mut count = 0;

        for i in 0..base.len() {
            for delta in 1..=32u8 {
                let mut mutated = base.clone();
                mutated[i] = mutated[i].wrapping_add(delta);
                assert!(seen.insert(compute(&mutated)));
                count += 1;
            }
        }
        for n in 0..2000 {
            let mut extended = base.clone();
            extended.extend_from_slice(n.to_string().as_bytes());
            assert!(seen.insert(compute(&extended)));
            count += 1;
        }

        assert_eq!(seen.len(), count);
        assert!(!seen.contains(&compute(&base)));
    }

    #[test]
    fn test_public_path() {
        assert_eq!(public_path("/assets/", "abc"), "/assets/abc");
    }
}
