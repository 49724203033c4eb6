//! Hash algorithm selection shared by the KDF and MAC primitives

use std::{fmt, str::FromStr};

use crate::error::CryptoError;

/// HKDF can expand at most this many digest-sized blocks.
const HKDF_MAX_BLOCKS: usize = 255;

/// Hash function backing HKDF and HMAC.
///
/// The set is closed: string selectors are parsed at the boundary via
/// [`FromStr`], which accepts exactly `"SHA256"` and `"SHA512"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-256, 32-byte digest
    Sha256,
    /// SHA-512, 64-byte digest
    #[default]
    Sha512,
}

impl HashAlgorithm {
    /// Digest size in bytes.
    pub const fn digest_size(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Largest HKDF output this hash can produce.
    pub const fn max_kdf_output(self) -> usize {
        HKDF_MAX_BLOCKS * self.digest_size()
    }

    /// Canonical selector string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            other => Err(CryptoError::UnsupportedAlgorithm { name: other.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_names() {
        assert_eq!("SHA256".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha256));
        assert_eq!("SHA512".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha512));
    }

    #[test]
    fn rejects_md5() {
        let result = "MD5".parse::<HashAlgorithm>();
        assert_eq!(result, Err(CryptoError::UnsupportedAlgorithm { name: "MD5".to_string() }));
    }

    #[test]
    fn rejects_lowercase_and_empty() {
        assert!("sha256".parse::<HashAlgorithm>().is_err());
        assert!("".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn name_roundtrips_through_parse() {
        for hash in [HashAlgorithm::Sha256, HashAlgorithm::Sha512] {
            assert_eq!(hash.to_string().parse::<HashAlgorithm>(), Ok(hash));
        }
    }

    #[test]
    fn default_is_sha512() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha512);
    }

    #[test]
    fn kdf_bound() {
        assert_eq!(HashAlgorithm::Sha256.max_kdf_output(), 255 * 32);
        assert_eq!(HashAlgorithm::Sha512.max_kdf_output(), 255 * 64);
    }
}
