//! Fuzz target for the X3DH handshake
//!
//! Builds both roles from arbitrary seeds and checks that they agree, and
//! that raw public key decoding never panics.

#![no_main]

use arbitrary::Arbitrary;
use keyward_crypto::{HashAlgorithm, KeyPair, PublicKey, agree_as_initiator, agree_as_receiver};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct HandshakeScenario {
    use_sha256: bool,
    receiver_identity: [u8; 32],
    receiver_signed_prekey: [u8; 32],
    receiver_one_time_prekey: [u8; 32],
    sender_identity: [u8; 32],
    sender_ephemeral: [u8; 32],
    /// Untrusted bytes presented as a one-time prekey
    raw_prekey: Vec<u8>,
}

fuzz_target!(|scenario: HandshakeScenario| {
    let hash = if scenario.use_sha256 { HashAlgorithm::Sha256 } else { HashAlgorithm::Sha512 };

    let receiver_identity = KeyPair::from_seed(&scenario.receiver_identity);
    let receiver_signed_prekey = KeyPair::from_seed(&scenario.receiver_signed_prekey);
    let receiver_one_time_prekey = KeyPair::from_seed(&scenario.receiver_one_time_prekey);
    let sender_identity = KeyPair::from_seed(&scenario.sender_identity);
    let sender_ephemeral = KeyPair::from_seed(&scenario.sender_ephemeral);

    let initiator = agree_as_initiator(
        hash,
        &receiver_identity.public(),
        &receiver_signed_prekey.public(),
        &receiver_one_time_prekey.public(),
        sender_identity.private(),
        sender_ephemeral.private(),
    );
    let receiver = agree_as_receiver(
        hash,
        receiver_identity.private(),
        receiver_signed_prekey.private(),
        receiver_one_time_prekey.private(),
        &sender_identity.public(),
        &sender_ephemeral.public(),
    );

    // INVARIANT: seed-derived keys always agree
    let (Ok(initiator), Ok(receiver)) = (initiator, receiver) else {
        unreachable!("handshake over seed-derived keys cannot fail");
    };
    assert_eq!(initiator.as_bytes(), receiver.as_bytes());
    assert_eq!(initiator.len(), 32);

    // INVARIANT: hostile prekey bytes fail cleanly or complete the handshake
    if let Ok(prekey) = PublicKey::from_slice(&scenario.raw_prekey) {
        let _ = agree_as_initiator(
            hash,
            &receiver_identity.public(),
            &receiver_signed_prekey.public(),
            &prekey,
            sender_identity.private(),
            sender_ephemeral.private(),
        );
    }
});
