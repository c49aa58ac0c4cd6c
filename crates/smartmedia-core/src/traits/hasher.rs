//! Stable name hashing for storage identifiers.

/// Deterministic hash of a file name.
pub trait NameHasher: Send + Sync {
    fn hash(&self, name: &str) -> String;
}

/// First 8 hex characters of the MD5 digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5NameHasher;

impl NameHasher for Md5NameHasher {
    fn hash(&self, name: &str) -> String {
        let digest = format!("{:x}", md5::compute(name.as_bytes()));
        digest[..8].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_hash_is_stable() {
        let hasher = Md5NameHasher;
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(hasher.hash(""), "d41d8cd9");
        assert_eq!(hasher.hash("photo.png"), hasher.hash("photo.png"));
        assert_ne!(hasher.hash("photo.png"), hasher.hash("photo2.png"));
        assert_eq!(hasher.hash("photo.png").len(), 8);
    }
}
