//! Double-ratchet key schedule
//!
//! Two interlocking ratchets turn one handshake secret into an unbounded
//! stream of single-use message keys:
//!
//! ```text
//! Shared Secret (X3DH)
//!        │
//!        ▼
//! Root Key ──DH ratchet (new DH output)──▶ Root Key' + Chain Key
//!                                                       │
//!                                                       ▼
//!                            Chain Key ──symmetric ratchet──▶ Chain Key'
//!                                                       │
//!                                                       ▼
//!                                           Message Key Material
//! ```
//!
//! The free functions [`step`] and [`advance`] are the stateless primitives;
//! [`RootRatchet`] and [`ChainRatchet`] own the keys between steps and
//! zeroize each predecessor as it is replaced.

pub mod chain;
pub mod root;

pub use chain::{CHAIN_KEY_CONSTANT, ChainRatchet, MESSAGE_KEY_CONSTANT, MessageKey, advance};
pub use root::{RootRatchet, step};
