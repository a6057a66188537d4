//! Content hashing for the file change tracker (§4.K): the first 8
//! bytes of a file's SHA-256 digest, as lowercase hex.

use sha2::{Digest, Sha256};

/// Hashes `content` to the 16-hex-char fingerprint the change tracker
/// and on-disk cache key both use.
pub fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest[..8].iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_sixteen_lowercase_hex_chars() {
        let hash = content_hash("extends Node\n");
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn identical_content_hashes_identically() {
        assert_eq!(content_hash("extends Node\n"), content_hash("extends Node\n"));
    }

    #[test]
    fn different_content_hashes_differently() {
        assert_ne!(content_hash("extends Node\n"), content_hash("extends Sprite2D\n"));
    }
}
