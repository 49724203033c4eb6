//! Owned secret buffers for derived key material
//!
//! Each type owns its bytes exclusively, has no `Clone`, prints redacted,
//! and zeroizes on drop. Ratchet steps consume a borrowed predecessor and
//! return fresh values; dropping the predecessor erases it.

use std::fmt;

use zeroize::Zeroize;

use crate::error::CryptoError;

macro_rules! secret_bytes {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name {
            bytes: Vec<u8>,
        }

        impl $name {
            /// Take ownership of `bytes`.
            pub fn from_vec(bytes: Vec<u8>) -> Self {
                Self { bytes }
            }

            /// Copy `bytes` into a new owned buffer.
            pub fn from_slice(bytes: &[u8]) -> Self {
                Self { bytes: bytes.to_vec() }
            }

            /// Raw key bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// Length in bytes.
            pub fn len(&self) -> usize {
                self.bytes.len()
            }

            /// True if the buffer holds no bytes.
            pub fn is_empty(&self) -> bool {
                self.bytes.is_empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "([REDACTED; {}])"), self.bytes.len())
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                self.bytes.zeroize();
            }
        }
    };
}

secret_bytes!(
    /// The ratchet's slow-moving secret, replaced on every DH ratchet step.
    RootKey
);

secret_bytes!(
    /// The ratchet's fast-moving secret, replaced on every message.
    ChainKey
);

secret_bytes!(
    /// Per-message key material, `2.5 ×` the chain key length.
    ///
    /// Sliced by the AEAD layer into encryption key, MAC key, and IV with
    /// [`MessageKeyMaterial::split`]. Used for exactly one message.
    MessageKeyMaterial
);

secret_bytes!(
    /// Output of the X3DH handshake, consumed to seed the root key.
    SharedSecret
);

impl MessageKeyMaterial {
    /// Split into `(encryption_key, mac_key, iv)`.
    ///
    /// The IV is whatever remains after the two keys; with 80 bytes of
    /// material and 32-byte keys it is 16 bytes.
    ///
    /// # Errors
    ///
    /// - `LengthMismatch`: the two keys do not leave room for an IV
    pub fn split(
        &self,
        encryption_key_length: usize,
        mac_key_length: usize,
    ) -> Result<(&[u8], &[u8], &[u8]), CryptoError> {
        let keys_length = encryption_key_length.saturating_add(mac_key_length);
        if keys_length >= self.bytes.len() {
            return Err(CryptoError::LengthMismatch {
                expected: self.bytes.len(),
                actual: keys_length,
            });
        }

        let (encryption_key, rest) = self.bytes.split_at(encryption_key_length);
        let (mac_key, iv) = rest.split_at(mac_key_length);
        Ok((encryption_key, mac_key, iv))
    }
}
