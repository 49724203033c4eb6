//! DH ratchet: root key step on every Diffie-Hellman key rotation

use crate::{
    config::{RatchetConfig, check_key_length},
    dh,
    error::CryptoError,
    hash::HashAlgorithm,
    kdf,
    keys::{PrivateKey, PublicKey},
    ratchet::chain::ChainRatchet,
    secret::{ChainKey, RootKey, SharedSecret},
};

/// Derive the next root key and a fresh chain key.
///
/// ```text
/// dh             = X25519(private, public)
/// next_root_key  = HKDF(L, secret = dh,       salt = root_key, info)
/// next_chain_key = HKDF(L, secret = root_key, salt = dh,       info)
/// ```
///
/// Secret and salt swap roles between the two derivations, which keeps the
/// outputs independent although both come from the same two inputs.
///
/// # Errors
///
/// - `OddLength` / `ZeroLength` / `LengthExceedsDigest`: invalid
///   `output_length`
/// - `LengthMismatch`: `root_key` is not `output_length` bytes
/// - Any error from [`dh::exchange`] or [`kdf::derive`]
/// - `DerivationLengthError`: an output has the wrong size
pub fn step(
    root_key: &RootKey,
    private: &PrivateKey,
    public: &PublicKey,
    output_length: usize,
    info: &[u8],
    hash: HashAlgorithm,
) -> Result<(RootKey, ChainKey), CryptoError> {
    check_key_length(output_length, hash)?;
    if root_key.len() != output_length {
        return Err(CryptoError::LengthMismatch { expected: output_length, actual: root_key.len() });
    }

    let dh_output = dh::exchange(private, public)?;

    let next_root_key = RootKey::from_vec(kdf::derive(
        output_length,
        hash,
        dh_output.as_slice(),
        root_key.as_bytes(),
        info,
    )?);
    let next_chain_key = ChainKey::from_vec(kdf::derive(
        output_length,
        hash,
        root_key.as_bytes(),
        dh_output.as_slice(),
        info,
    )?);

    for actual in [next_root_key.len(), next_chain_key.len()] {
        if actual != output_length {
            return Err(CryptoError::DerivationLengthError { expected: output_length, actual });
        }
    }

    tracing::trace!(key_length = output_length, %hash, "advanced DH ratchet");

    Ok((next_root_key, next_chain_key))
}

/// Stateful DH ratchet owning the root key.
///
/// Each [`ratchet()`](Self::ratchet) call replaces the root key and hands out
/// a new [`ChainRatchet`] for the sending or receiving chain.
#[derive(Debug)]
pub struct RootRatchet {
    root_key: RootKey,
    config: RatchetConfig,
    steps: u32,
}

impl RootRatchet {
    /// Wrap an existing root key.
    ///
    /// # Errors
    ///
    /// - `LengthMismatch`: `root_key` length differs from the config
    pub fn new(root_key: RootKey, config: RatchetConfig) -> Result<Self, CryptoError> {
        if root_key.len() != config.key_length() {
            return Err(CryptoError::LengthMismatch {
                expected: config.key_length(),
                actual: root_key.len(),
            });
        }
        Ok(Self { root_key, config, steps: 0 })
    }

    /// Seed the root key from a handshake secret, consuming it.
    ///
    /// # Errors
    ///
    /// - `LengthMismatch`: the secret length differs from the configured key
    ///   length
    pub fn from_shared_secret(
        shared_secret: SharedSecret,
        config: RatchetConfig,
    ) -> Result<Self, CryptoError> {
        Self::new(RootKey::from_slice(shared_secret.as_bytes()), config)
    }

    /// Number of DH ratchet steps taken.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Configuration this ratchet derives with.
    pub fn config(&self) -> &RatchetConfig {
        &self.config
    }

    /// Mix a new DH output into the root key and start a new chain.
    ///
    /// On error the root key is left unchanged.
    ///
    /// # Errors
    ///
    /// - `GenerationOverflow`: the step counter is exhausted
    /// - Any error from [`step`]
    pub fn ratchet(
        &mut self,
        private: &PrivateKey,
        public: &PublicKey,
    ) -> Result<ChainRatchet, CryptoError> {
        if self.steps == u32::MAX {
            return Err(CryptoError::GenerationOverflow { current: self.steps });
        }

        let (next_root_key, chain_key) = step(
            &self.root_key,
            private,
            public,
            self.config.key_length(),
            self.config.info(),
            self.config.hash(),
        )?;

        self.root_key = next_root_key;
        self.steps += 1;

        tracing::debug!(steps = self.steps, "rotated root key");

        ChainRatchet::new(chain_key, self.config.clone())
    }
}
