//! Symmetric ratchet for forward-secure message key derivation
//!
//! # Security Properties
//!
//! - Forward Secrecy: the chain key is replaced on every step and the old
//!   value is zeroized
//! - Key Uniqueness: each generation produces distinct key material
//! - Determinism: same chain key always produces the same sequence

use zeroize::Zeroizing;

use crate::{
    config::{RatchetConfig, check_key_length, message_key_length},
    error::CryptoError,
    hash::HashAlgorithm,
    kdf, mac,
    secret::{ChainKey, MessageKeyMaterial},
};

/// HMAC input selecting the message key seed
pub const MESSAGE_KEY_CONSTANT: [u8; 1] = [0x01];

/// HMAC input selecting the next chain key
pub const CHAIN_KEY_CONSTANT: [u8; 1] = [0x02];

/// Derive message key material and the next chain key from `chain_key`.
///
/// ```text
/// next_chain_key = HMAC(chain_key, 0x02)[..L]
/// seed           = HMAC(chain_key, 0x01)
/// material       = HKDF(2.5L, secret = seed, salt = zeros(2.5L), info)
/// ```
///
/// The caller must drop `chain_key` once the step succeeds; deriving from it
/// again reuses message keys.
///
/// # Errors
///
/// - `OddLength` / `ZeroLength`: invalid `output_length`
/// - `LengthExceedsDigest`: `output_length` longer than one `hash` digest
/// - `LengthMismatch`: `chain_key` is not `output_length` bytes
/// - `DerivationFailure` / `DerivationLengthError`: primitive failure
pub fn advance(
    chain_key: &ChainKey,
    output_length: usize,
    info: &[u8],
    hash: HashAlgorithm,
) -> Result<(MessageKeyMaterial, ChainKey), CryptoError> {
    check_key_length(output_length, hash)?;
    if chain_key.len() != output_length {
        return Err(CryptoError::LengthMismatch {
            expected: output_length,
            actual: chain_key.len(),
        });
    }

    let chain_tag = Zeroizing::new(mac::tag(hash, chain_key.as_bytes(), &CHAIN_KEY_CONSTANT)?);
    let seed = Zeroizing::new(mac::tag(hash, chain_key.as_bytes(), &MESSAGE_KEY_CONSTANT)?);

    let material_length = message_key_length(output_length);
    let salt = vec![0u8; material_length];
    let material = kdf::derive(material_length, hash, &seed, &salt, info)?;
    if material.len() != material_length {
        return Err(CryptoError::DerivationLengthError {
            expected: material_length,
            actual: material.len(),
        });
    }

    let next_chain_key = ChainKey::from_slice(&chain_tag[..output_length]);

    tracing::trace!(key_length = output_length, %hash, "advanced symmetric ratchet");

    Ok((MessageKeyMaterial::from_vec(material), next_chain_key))
}

/// Message key material tagged with the generation it was derived at.
#[derive(Debug)]
pub struct MessageKey {
    material: MessageKeyMaterial,
    generation: u32,
}

impl MessageKey {
    /// Key material for the AEAD layer.
    pub fn material(&self) -> &MessageKeyMaterial {
        &self.material
    }

    /// Ratchet generation this key was derived from.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Unwrap the key material.
    pub fn into_material(self) -> MessageKeyMaterial {
        self.material
    }
}

/// Stateful symmetric ratchet owning one chain key.
///
/// Each [`next_message_key()`](Self::next_message_key) call applies
/// [`advance`] and overwrites the chain key, so past message keys cannot be
/// recomputed from the current state.
#[derive(Debug)]
pub struct ChainRatchet {
    chain_key: ChainKey,
    config: RatchetConfig,
    generation: u32,
}

impl ChainRatchet {
    /// Start a chain at generation 0.
    ///
    /// # Errors
    ///
    /// - `LengthMismatch`: `chain_key` length differs from the config
    pub fn new(chain_key: ChainKey, config: RatchetConfig) -> Result<Self, CryptoError> {
        if chain_key.len() != config.key_length() {
            return Err(CryptoError::LengthMismatch {
                expected: config.key_length(),
                actual: chain_key.len(),
            });
        }
        Ok(Self { chain_key, config, generation: 0 })
    }

    /// Number of message keys derived so far.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Configuration this chain derives with.
    pub fn config(&self) -> &RatchetConfig {
        &self.config
    }

    /// Derive the next message key and advance the chain.
    ///
    /// # Errors
    ///
    /// - `GenerationOverflow`: the chain is exhausted
    /// - Any error from [`advance`]; the chain is left unchanged
    pub fn next_message_key(&mut self) -> Result<MessageKey, CryptoError> {
        if self.generation == u32::MAX {
            return Err(CryptoError::GenerationOverflow { current: self.generation });
        }

        let (material, next_chain_key) = advance(
            &self.chain_key,
            self.config.key_length(),
            self.config.info(),
            self.config.hash(),
        )?;

        // Old chain key is zeroized when dropped here
        self.chain_key = next_chain_key;

        let generation = self.generation;
        self.generation += 1;

        tracing::debug!(generation, "derived message key");

        Ok(MessageKey { material, generation })
    }
}
