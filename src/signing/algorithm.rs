//! Signing algorithm variants.

/// The closed set of supported signing algorithms.
///
/// Each variant carries the algorithm name that appears in the
/// string-to-sign and `authorization` header, and the RSA-PSS salt length
/// used when generating the signature. The hash is SHA-256 for every
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningAlgorithm {
    /// RSA-PSS with SHA-256 and a digest-length (32 byte) salt.
    RsaPssSha256,
    /// RSA-PSS with SHA-256 and a 20 byte salt, kept for merchants whose
    /// profiles were provisioned against the older signing scheme.
    RsaPssSha256Legacy,
}

impl SigningAlgorithm {
    /// Algorithm name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            SigningAlgorithm::RsaPssSha256 => "PT2-RSA-PSS-SHA256",
            SigningAlgorithm::RsaPssSha256Legacy => "PT1-RSA-PSS-SHA256",
        }
    }

    /// PSS salt length in bytes.
    pub fn salt_len(&self) -> usize {
        match self {
            SigningAlgorithm::RsaPssSha256 => 32,
            SigningAlgorithm::RsaPssSha256Legacy => 20,
        }
    }
}

impl Default for SigningAlgorithm {
    fn default() -> Self {
        SigningAlgorithm::RsaPssSha256
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names() {
        assert_eq!(SigningAlgorithm::RsaPssSha256.name(), "PT2-RSA-PSS-SHA256");
        assert_eq!(
            SigningAlgorithm::RsaPssSha256Legacy.name(),
            "PT1-RSA-PSS-SHA256"
        );
    }

    #[test]
    fn test_salt_lengths() {
        assert_eq!(SigningAlgorithm::RsaPssSha256.salt_len(), 32);
        assert_eq!(SigningAlgorithm::RsaPssSha256Legacy.salt_len(), 20);
    }

    #[test]
    fn test_default_is_current_scheme() {
        assert_eq!(SigningAlgorithm::default(), SigningAlgorithm::RsaPssSha256);
    }
}
