//! Error types for key agreement and key derivation

use thiserror::Error;

/// Errors from key agreement, derivation, and ratchet operations.
///
/// Every fallible operation in this crate returns one of these and never a
/// partial output. None of them are transient: retrying with the same inputs
/// yields the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Encoded key material has the wrong size
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Expanded private key whose public half does not match its seed
    #[error("invalid private key: public half does not match seed")]
    InvalidPrivateKey,

    /// Public key bytes do not decode to a curve point
    #[error("invalid public key: not a valid curve point")]
    InvalidPublicKey,

    /// Diffie-Hellman produced the all-zero point (small-order peer key)
    #[error("non-contributory key exchange")]
    NonContributory,

    /// Hash algorithm name outside the supported set
    #[error("unsupported hash algorithm: {name}")]
    UnsupportedAlgorithm {
        /// The rejected algorithm name
        name: String,
    },

    /// Key length must be even
    #[error("key length must be even, got {length}")]
    OddLength {
        /// The rejected length
        length: usize,
    },

    /// Key length must be non-zero
    #[error("key length must be non-zero")]
    ZeroLength,

    /// Input key length differs from the configured key length
    #[error("key length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Configured key length
        expected: usize,
        /// Length of the supplied key
        actual: usize,
    },

    /// Chain key length exceeds what one HMAC output can supply
    #[error("key length {length} exceeds {digest_size}-byte digest")]
    LengthExceedsDigest {
        /// Requested key length
        length: usize,
        /// Digest size of the selected hash
        digest_size: usize,
    },

    /// HKDF output request above `255 * digest_size`
    #[error("requested {requested} bytes of key material, maximum is {max}")]
    OutputTooLarge {
        /// Requested output length
        requested: usize,
        /// Largest output the selected hash supports
        max: usize,
    },

    /// Underlying KDF or MAC primitive failed
    #[error("derivation failed: {reason}")]
    DerivationFailure {
        /// Which primitive failed and how
        reason: &'static str,
    },

    /// Derived output does not have the size it was derived for
    #[error("derived key has length {actual}, expected {expected}")]
    DerivationLengthError {
        /// Target length
        expected: usize,
        /// Length actually produced
        actual: usize,
    },

    /// Ratchet generation would overflow
    #[error("ratchet generation overflow at {current}")]
    GenerationOverflow {
        /// Current generation when overflow was detected
        current: u32,
    },
}

impl CryptoError {
    /// Returns true if the caller supplied invalid input.
    ///
    /// Precondition violations (bad lengths, malformed keys, unknown
    /// algorithms) are fixed by changing the call. Everything else is a
    /// primitive failure or exhausted state and requires starting over with
    /// fresh key material.
    pub fn is_precondition(&self) -> bool {
        match self {
            Self::InvalidKeyLength { .. }
            | Self::InvalidPrivateKey
            | Self::InvalidPublicKey
            | Self::UnsupportedAlgorithm { .. }
            | Self::OddLength { .. }
            | Self::ZeroLength
            | Self::LengthMismatch { .. }
            | Self::LengthExceedsDigest { .. }
            | Self::OutputTooLarge { .. } => true,

            Self::NonContributory
            | Self::DerivationFailure { .. }
            | Self::DerivationLengthError { .. }
            | Self::GenerationOverflow { .. } => false,
        }
    }
}
