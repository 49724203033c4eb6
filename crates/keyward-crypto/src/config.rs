//! Ratchet configuration

use crate::{error::CryptoError, hash::HashAlgorithm};

/// Root and chain key length used when none is configured
pub const DEFAULT_KEY_LENGTH: usize = 32;

/// Parameters shared by every step of one ratchet instance.
///
/// Root and chain keys in a single ratchet always have the same length.
/// The domain label (`info`) separates this ratchet's derivations from any
/// other HKDF use in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatchetConfig {
    key_length: usize,
    hash: HashAlgorithm,
    info: Vec<u8>,
}

impl RatchetConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// - `ZeroLength` / `OddLength`: `key_length` is zero or odd
    /// - `LengthExceedsDigest`: `key_length` is longer than one `hash` digest
    pub fn new(
        key_length: usize,
        hash: HashAlgorithm,
        info: &[u8],
    ) -> Result<Self, CryptoError> {
        check_key_length(key_length, hash)?;
        Ok(Self { key_length, hash, info: info.to_vec() })
    }

    /// Default configuration with a caller-chosen domain label.
    pub fn with_info(info: &[u8]) -> Self {
        Self { info: info.to_vec(), ..Self::default() }
    }

    /// Root and chain key length in bytes.
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// Message key material length: `2.5 × key_length`.
    pub fn message_key_length(&self) -> usize {
        message_key_length(self.key_length)
    }

    /// Hash backing HKDF and HMAC.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Domain label passed as HKDF `info`.
    pub fn info(&self) -> &[u8] {
        &self.info
    }
}

impl Default for RatchetConfig {
    fn default() -> Self {
        Self { key_length: DEFAULT_KEY_LENGTH, hash: HashAlgorithm::default(), info: Vec::new() }
    }
}

/// `2.5 × key_length`, exact for even lengths.
pub(crate) fn message_key_length(key_length: usize) -> usize {
    key_length * 2 + key_length / 2
}

/// Validate a root/chain key length for `hash`.
///
/// Lengths must be even and non-zero, and fit in one HMAC output so the
/// next chain key can be taken from a single tag.
pub(crate) fn check_key_length(key_length: usize, hash: HashAlgorithm) -> Result<(), CryptoError> {
    if key_length % 2 != 0 {
        return Err(CryptoError::OddLength { length: key_length });
    }
    if key_length == 0 {
        return Err(CryptoError::ZeroLength);
    }
    if key_length > hash.digest_size() {
        return Err(CryptoError::LengthExceedsDigest {
            length: key_length,
            digest_size: hash.digest_size(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RatchetConfig::default();
        assert_eq!(config.key_length(), 32);
        assert_eq!(config.message_key_length(), 80);
        assert_eq!(config.hash(), HashAlgorithm::Sha512);
        assert!(config.info().is_empty());
    }

    #[test]
    fn with_info_keeps_defaults() {
        let config = RatchetConfig::with_info(b"app-v1");
        assert_eq!(config.key_length(), DEFAULT_KEY_LENGTH);
        assert_eq!(config.info(), b"app-v1");
    }

    #[test]
    fn rejects_odd_length() {
        let result = RatchetConfig::new(33, HashAlgorithm::Sha512, b"");
        assert_eq!(result, Err(CryptoError::OddLength { length: 33 }));
    }

    #[test]
    fn rejects_zero_length() {
        let result = RatchetConfig::new(0, HashAlgorithm::Sha512, b"");
        assert_eq!(result, Err(CryptoError::ZeroLength));
    }

    #[test]
    fn rejects_length_beyond_digest() {
        let result = RatchetConfig::new(64, HashAlgorithm::Sha256, b"");
        assert_eq!(result, Err(CryptoError::LengthExceedsDigest { length: 64, digest_size: 32 }));
        assert!(RatchetConfig::new(64, HashAlgorithm::Sha512, b"").is_ok());
    }

    #[test]
    fn message_key_length_is_two_and_a_half_times() {
        assert_eq!(message_key_length(2), 5);
        assert_eq!(message_key_length(16), 40);
        assert_eq!(message_key_length(32), 80);
        assert_eq!(message_key_length(64), 160);
    }
}
