//! X3DH initial key agreement
//!
//! Four Diffie-Hellman exchanges between the sender's identity and ephemeral
//! keys and the receiver's identity, signed prekey, and one-time prekey:
//!
//! ```text
//! DH1 = DH(IK_sender,  SPK_receiver)
//! DH2 = DH(EK_sender,  IK_receiver)
//! DH3 = DH(EK_sender,  SPK_receiver)
//! DH4 = DH(EK_sender,  OPK_receiver)
//!
//! shared_secret = HKDF(32, DH1 || DH2 || DH3 || DH4, salt = "", info = "")
//! ```
//!
//! The receiver computes the same four values from its private keys and the
//! sender's public keys, so both roles arrive at the same secret.
//!
//! # Preconditions
//!
//! The signed prekey's signature is NOT checked here. The initiator must
//! verify it against the receiver's identity key before calling
//! [`agree_as_initiator`].

use zeroize::Zeroizing;

use crate::{
    dh::{self, DH_OUTPUT_LENGTH},
    error::CryptoError,
    hash::HashAlgorithm,
    kdf,
    keys::{PrivateKey, PublicKey},
    secret::SharedSecret,
};

/// Length of the agreed shared secret
pub const SHARED_SECRET_LENGTH: usize = 32;

/// Number of DH outputs mixed into the shared secret
const DH_COUNT: usize = 4;

/// Public keys a receiver publishes for initiators.
///
/// The one-time prekey is mandatory: a receiver that has run out of
/// one-time prekeys needs a replenishment policy outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrekeyBundle {
    /// Long-term identity key
    pub identity_key: PublicKey,
    /// Medium-term signed prekey (signature verified by the caller)
    pub signed_prekey: PublicKey,
    /// Single-use prekey
    pub one_time_prekey: PublicKey,
}

/// Run the initiator side of the handshake.
///
/// # Errors
///
/// Any error from [`dh::exchange`] or [`kdf::derive`]. The handshake is
/// aborted at the first failure; no partial secret is returned.
pub fn agree_as_initiator(
    hash: HashAlgorithm,
    receiver_identity: &PublicKey,
    receiver_signed_prekey: &PublicKey,
    receiver_one_time_prekey: &PublicKey,
    sender_identity: &PrivateKey,
    sender_ephemeral: &PrivateKey,
) -> Result<SharedSecret, CryptoError> {
    let dh1 = dh::exchange(sender_identity, receiver_signed_prekey)?;
    let dh2 = dh::exchange(sender_ephemeral, receiver_identity)?;
    let dh3 = dh::exchange(sender_ephemeral, receiver_signed_prekey)?;
    let dh4 = dh::exchange(sender_ephemeral, receiver_one_time_prekey)?;

    let shared_secret = combine(hash, [&*dh1, &*dh2, &*dh3, &*dh4])?;

    tracing::debug!(%hash, "completed X3DH as initiator");

    Ok(shared_secret)
}

/// Run the receiver side of the handshake.
///
/// Mirrors [`agree_as_initiator`]: each DH uses the receiver's private key
/// and the sender's public key in the same slot.
///
/// # Errors
///
/// Same as [`agree_as_initiator`].
pub fn agree_as_receiver(
    hash: HashAlgorithm,
    receiver_identity: &PrivateKey,
    receiver_signed_prekey: &PrivateKey,
    receiver_one_time_prekey: &PrivateKey,
    sender_identity: &PublicKey,
    sender_ephemeral: &PublicKey,
) -> Result<SharedSecret, CryptoError> {
    let dh1 = dh::exchange(receiver_signed_prekey, sender_identity)?;
    let dh2 = dh::exchange(receiver_identity, sender_ephemeral)?;
    let dh3 = dh::exchange(receiver_signed_prekey, sender_ephemeral)?;
    let dh4 = dh::exchange(receiver_one_time_prekey, sender_ephemeral)?;

    let shared_secret = combine(hash, [&*dh1, &*dh2, &*dh3, &*dh4])?;

    tracing::debug!(%hash, "completed X3DH as receiver");

    Ok(shared_secret)
}

/// Run the initiator side against a published bundle.
///
/// # Errors
///
/// Same as [`agree_as_initiator`].
pub fn agree_with_bundle(
    hash: HashAlgorithm,
    bundle: &PrekeyBundle,
    sender_identity: &PrivateKey,
    sender_ephemeral: &PrivateKey,
) -> Result<SharedSecret, CryptoError> {
    agree_as_initiator(
        hash,
        &bundle.identity_key,
        &bundle.signed_prekey,
        &bundle.one_time_prekey,
        sender_identity,
        sender_ephemeral,
    )
}

/// Concatenate the DH outputs in slot order and extract the shared secret.
fn combine(
    hash: HashAlgorithm,
    outputs: [&[u8; DH_OUTPUT_LENGTH]; DH_COUNT],
) -> Result<SharedSecret, CryptoError> {
    let mut input = Zeroizing::new(Vec::<u8>::with_capacity(DH_OUTPUT_LENGTH * DH_COUNT));
    for output in outputs {
        input.extend_from_slice(output.as_slice());
    }

    let secret = kdf::derive(SHARED_SECRET_LENGTH, hash, &input, &[], &[])?;
    Ok(SharedSecret::from_vec(secret))
}
