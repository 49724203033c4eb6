//! Keyward Cryptographic Primitives
//!
//! Key agreement and key derivation for a Signal-style session: an X3DH
//! handshake that produces a shared secret, and a double ratchet that turns
//! it into a forward-secret stream of message keys. Pure functions with
//! deterministic outputs. Callers provide random bytes for deterministic
//! testing.
//!
//! # Key Lifecycle
//!
//! ```text
//! Identity / Prekeys / Ephemeral key
//!        │
//!        ▼
//! X3DH (4 × X25519 + HKDF) → Shared Secret
//!        │
//!        ▼
//! DH Ratchet (X25519 + HKDF) → Root Key, Chain Key
//!        │
//!        ▼
//! Symmetric Ratchet (HMAC + HKDF) → Message Key Material
//!        │
//!        ▼
//! AEAD layer (outside this crate)
//! ```
//!
//! Message key material is used for exactly one message and discarded.
//! Every step returns new key values; the predecessor is zeroized when its
//! owner drops it.
//!
//! # Security
//!
//! Forward Secrecy:
//! - Chain keys are replaced on every message and cannot be recomputed from
//!   their successors
//! - Root keys are replaced on every DH rotation
//!
//! Domain Separation:
//! - `0x01` selects the message key seed and `0x02` the next chain key
//! - The caller's `info` label separates this ratchet from other HKDF uses
//!
//! Not Covered:
//! - Prekey signature verification (caller precondition for X3DH)
//! - Encryption with the derived material, header encoding, persistence
//! - Skipped-message keys for out-of-order delivery

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod dh;
pub mod error;
pub mod hash;
pub mod kdf;
pub mod keys;
pub mod mac;
pub mod ratchet;
pub mod secret;
pub mod x3dh;

pub use config::{DEFAULT_KEY_LENGTH, RatchetConfig};
pub use error::CryptoError;
pub use hash::HashAlgorithm;
pub use keys::{KeyPair, PrivateKey, PublicKey, RandomSource};
pub use ratchet::{ChainRatchet, MessageKey, RootRatchet, advance, step};
pub use secret::{ChainKey, MessageKeyMaterial, RootKey, SharedSecret};
pub use x3dh::{PrekeyBundle, agree_as_initiator, agree_as_receiver, agree_with_bundle};
