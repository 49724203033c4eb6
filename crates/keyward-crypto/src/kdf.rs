//! Key derivation using HKDF (extract-then-expand)

use hkdf::Hkdf;
use sha2::{Sha256, Sha512};

use crate::{error::CryptoError, hash::HashAlgorithm};

/// Derive `output_length` bytes of key material.
///
/// Extracts with `salt` over `secret`, then expands with `info` and
/// truncates to `output_length`. Any of the byte inputs may be empty, and
/// `output_length` need not be a multiple of the digest size.
///
/// The returned buffer is secret; callers move it into a zeroizing wrapper.
///
/// # Errors
///
/// - `OutputTooLarge`: `output_length` exceeds `255 * digest_size`
/// - `DerivationFailure`: HKDF rejected the expansion
pub fn derive(
    output_length: usize,
    hash: HashAlgorithm,
    secret: &[u8],
    salt: &[u8],
    info: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let max = hash.max_kdf_output();
    if output_length > max {
        return Err(CryptoError::OutputTooLarge { requested: output_length, max });
    }

    let mut okm = vec![0u8; output_length];
    let expanded = match hash {
        HashAlgorithm::Sha256 => Hkdf::<Sha256>::new(Some(salt), secret).expand(info, &mut okm),
        HashAlgorithm::Sha512 => Hkdf::<Sha512>::new(Some(salt), secret).expand(info, &mut okm),
    };
    expanded.map_err(|_| CryptoError::DerivationFailure { reason: "hkdf expand failed" })?;

    Ok(okm)
}
