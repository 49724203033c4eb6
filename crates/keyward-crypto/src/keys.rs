//! Identity-style key pairs used by the handshake and the DH ratchet
//!
//! Keys are held in their Ed25519 encoding (32-byte seed, 32-byte compressed
//! Edwards point) so the same identity key can sign prekeys elsewhere. They
//! are converted to Montgomery form only inside [`crate::dh::exchange`].

use std::fmt;

use ed25519_dalek::{SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Length of a private key seed
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of the expanded `seed || public` private key form
pub const EXPANDED_PRIVATE_KEY_LENGTH: usize = 64;

/// Length of an encoded public key
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Source of cryptographically secure random bytes.
///
/// Key generation takes its entropy from the caller so tests can run
/// deterministically.
///
/// # Safety
///
/// Production implementations MUST draw from a CSPRNG.
pub trait RandomSource {
    /// Fills the provided buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);
}

/// Private half of a key pair. Zeroized on drop.
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Build a private key from its 32-byte seed.
    pub fn from_seed(seed: &[u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self { signing_key: SigningKey::from_bytes(seed) }
    }

    /// Decode a private key from a 32-byte seed or a 64-byte expanded key.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: neither 32 nor 64 bytes
    /// - `InvalidPrivateKey`: expanded form whose public half does not
    ///   belong to its seed
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        match bytes.len() {
            PRIVATE_KEY_LENGTH => {
                let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
                seed.copy_from_slice(bytes);
                Ok(Self::from_seed(&seed))
            },
            EXPANDED_PRIVATE_KEY_LENGTH => {
                let mut expanded = Zeroizing::new([0u8; EXPANDED_PRIVATE_KEY_LENGTH]);
                expanded.copy_from_slice(bytes);
                let signing_key = SigningKey::from_keypair_bytes(&expanded)
                    .map_err(|_| CryptoError::InvalidPrivateKey)?;
                Ok(Self { signing_key })
            },
            actual => Err(CryptoError::InvalidKeyLength { expected: PRIVATE_KEY_LENGTH, actual }),
        }
    }

    /// The 32-byte seed.
    pub fn to_seed(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// The public key belonging to this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey { verifying_key: self.signing_key.verifying_key() }
    }

    /// Montgomery-form scalar for X25519.
    pub(crate) fn to_scalar_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_scalar_bytes())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").field("public", &self.public_key()).finish_non_exhaustive()
    }
}

/// Public half of a key pair.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    verifying_key: VerifyingKey,
}

impl PublicKey {
    /// Decode a public key from its 32-byte encoding.
    ///
    /// # Errors
    ///
    /// - `InvalidPublicKey`: the bytes are not a valid curve point
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, CryptoError> {
        let verifying_key =
            VerifyingKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { verifying_key })
    }

    /// Decode a public key from an untyped byte slice.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: not exactly 32 bytes
    /// - `InvalidPublicKey`: the bytes are not a valid curve point
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: &[u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKeyLength { expected: PUBLIC_KEY_LENGTH, actual: bytes.len() }
        })?;
        Self::from_bytes(array)
    }

    /// The 32-byte encoding.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.verifying_key.to_bytes()
    }

    /// Montgomery u-coordinate for X25519.
    pub(crate) fn to_montgomery_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_montgomery().to_bytes()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(")?;
        for byte in self.to_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// A private key together with its public key.
#[derive(Debug)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Build a key pair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self::from_private(PrivateKey::from_seed(seed))
    }

    /// Build a key pair around an existing private key.
    pub fn from_private(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }

    /// Generate a fresh key pair from caller-provided entropy.
    pub fn generate(rng: &impl RandomSource) -> Self {
        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        rng.random_bytes(seed.as_mut_slice());
        Self::from_seed(&seed)
    }

    /// The private key.
    pub fn private(&self) -> &PrivateKey {
        &self.private
    }

    /// The public key.
    pub fn public(&self) -> PublicKey {
        self.public
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct CountingSource {
        next: Cell<u8>,
    }

    impl RandomSource for CountingSource {
        fn random_bytes(&self, buffer: &mut [u8]) {
            for byte in buffer.iter_mut() {
                *byte = self.next.get();
                self.next.set(self.next.get().wrapping_add(1));
            }
        }
    }

    #[test]
    fn from_seed_is_deterministic() {
        let a = KeyPair::from_seed(&[7u8; 32]);
        let b = KeyPair::from_seed(&[7u8; 32]);
        assert_eq!(a.public(), b.public());
    }

    #[test]
    fn seed_roundtrips() {
        let private = PrivateKey::from_seed(&[9u8; 32]);
        assert_eq!(*private.to_seed(), [9u8; 32]);
    }

    #[test]
    fn expanded_form_matches_seed_form() {
        let pair = KeyPair::from_seed(&[3u8; 32]);
        let mut expanded = Vec::with_capacity(EXPANDED_PRIVATE_KEY_LENGTH);
        expanded.extend_from_slice(&[3u8; 32]);
        expanded.extend_from_slice(&pair.public().to_bytes());

        let decoded = PrivateKey::from_slice(&expanded).unwrap();
        assert_eq!(decoded.public_key(), pair.public());
        assert_eq!(*decoded.to_seed(), [3u8; 32]);
    }

    #[test]
    fn expanded_form_with_foreign_public_half_is_rejected() {
        let other = KeyPair::from_seed(&[4u8; 32]);
        let mut expanded = Vec::with_capacity(EXPANDED_PRIVATE_KEY_LENGTH);
        expanded.extend_from_slice(&[3u8; 32]);
        expanded.extend_from_slice(&other.public().to_bytes());

        let result = PrivateKey::from_slice(&expanded);
        assert!(matches!(result, Err(CryptoError::InvalidPrivateKey)));
    }

    #[test]
    fn private_key_wrong_length_is_rejected() {
        let result = PrivateKey::from_slice(&[0u8; 31]);
        assert!(matches!(
            result,
            Err(CryptoError::InvalidKeyLength { expected: 32, actual: 31 })
        ));
    }

    #[test]
    fn public_key_wrong_length_is_rejected() {
        let result = PublicKey::from_slice(&[0u8; 33]);
        assert_eq!(result, Err(CryptoError::InvalidKeyLength { expected: 32, actual: 33 }));
    }

    #[test]
    fn public_key_bytes_roundtrip() {
        let pair = KeyPair::from_seed(&[5u8; 32]);
        let decoded = PublicKey::from_slice(&pair.public().to_bytes()).unwrap();
        assert_eq!(decoded, pair.public());
    }

    #[test]
    fn generate_draws_seed_from_source() {
        let source = CountingSource { next: Cell::new(0) };
        let generated = KeyPair::generate(&source);

        let mut expected_seed = [0u8; 32];
        for (i, byte) in expected_seed.iter_mut().enumerate() {
            *byte = i as u8;
        }
        assert_eq!(generated.public(), KeyPair::from_seed(&expected_seed).public());

        // Source advanced, so the next pair differs
        let second = KeyPair::generate(&source);
        assert_ne!(generated.public(), second.public());
    }

    #[test]
    fn debug_does_not_print_seed() {
        let private = PrivateKey::from_seed(&[0xABu8; 32]);
        let rendered = format!("{private:?}");
        assert!(!rendered.contains("abababab"));
    }
}
