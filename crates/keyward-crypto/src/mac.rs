//! Message authentication using HMAC

use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Sha256, Sha512};

use crate::{error::CryptoError, hash::HashAlgorithm};

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the HMAC tag of `message` under `key`.
///
/// The tag length equals the digest size of `hash`. HMAC accepts keys of
/// any length, including empty.
///
/// # Errors
///
/// - `DerivationFailure`: the HMAC primitive rejected the key
pub fn tag(hash: HashAlgorithm, key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    match hash {
        HashAlgorithm::Sha256 => compute::<HmacSha256>(key, message),
        HashAlgorithm::Sha512 => compute::<HmacSha512>(key, message),
    }
}

/// Check `expected` against the HMAC tag of `message` in constant time.
///
/// Returns `Ok(false)` on any mismatch, including a truncated tag.
pub fn verify(
    hash: HashAlgorithm,
    key: &[u8],
    message: &[u8],
    expected: &[u8],
) -> Result<bool, CryptoError> {
    match hash {
        HashAlgorithm::Sha256 => check::<HmacSha256>(key, message, expected),
        HashAlgorithm::Sha512 => check::<HmacSha512>(key, message, expected),
    }
}

fn keyed<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<M, CryptoError> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|_| CryptoError::DerivationFailure { reason: "hmac rejected key" })?;
    mac.update(message);
    Ok(mac)
}

fn compute<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mac = keyed::<M>(key, message)?;
    Ok(mac.finalize().into_bytes().to_vec())
}

fn check<M: Mac + KeyInit>(
    key: &[u8],
    message: &[u8],
    expected: &[u8],
) -> Result<bool, CryptoError> {
    let mac = keyed::<M>(key, message)?;
    Ok(mac.verify_slice(expected).is_ok())
}
