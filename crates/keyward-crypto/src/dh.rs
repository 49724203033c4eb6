//! X25519 Diffie-Hellman over identity-style keys

use x25519_dalek::{PublicKey as MontgomeryPublic, StaticSecret};
use zeroize::Zeroizing;

use crate::{
    error::CryptoError,
    keys::{PrivateKey, PublicKey},
};

/// Length of a Diffie-Hellman output
pub const DH_OUTPUT_LENGTH: usize = 32;

/// Compute the X25519 shared point between `private` and `public`.
///
/// Both keys are first converted from their Edwards encoding to Montgomery
/// form: the private seed to its hashed scalar, the public point to its
/// u-coordinate. The result is symmetric, so
/// `exchange(a, B) == exchange(b, A)` for key pairs `(a, A)` and `(b, B)`.
///
/// # Errors
///
/// - `NonContributory`: `public` is a small-order point and the result is
///   all zeros
pub fn exchange(
    private: &PrivateKey,
    public: &PublicKey,
) -> Result<Zeroizing<[u8; DH_OUTPUT_LENGTH]>, CryptoError> {
    let scalar = private.to_scalar_bytes();
    // `StaticSecret` only takes the scalar by value, so one stack copy escapes
    // `Zeroizing`. The secret itself is wiped on drop.
    let secret = StaticSecret::from(*scalar);
    let their_public = MontgomeryPublic::from(public.to_montgomery_bytes());

    let shared = secret.diffie_hellman(&their_public);
    if !shared.was_contributory() {
        return Err(CryptoError::NonContributory);
    }

    Ok(Zeroizing::new(shared.to_bytes()))
}

/// [`exchange`] over raw encoded keys.
///
/// `private` is a 32-byte seed or 64-byte expanded key; `public` is a
/// 32-byte encoded point.
///
/// # Errors
///
/// - `InvalidKeyLength`: either key has the wrong size
/// - `InvalidPrivateKey` / `InvalidPublicKey`: the bytes do not decode
/// - `NonContributory`: see [`exchange`]
pub fn exchange_bytes(
    private: &[u8],
    public: &[u8],
) -> Result<Zeroizing<[u8; DH_OUTPUT_LENGTH]>, CryptoError> {
    let private = PrivateKey::from_slice(private)?;
    let public = PublicKey::from_slice(public)?;
    exchange(&private, &public)
}
