//! Fuzz target for HKDF derivation and the two ratchets
//!
//! # Strategy
//!
//! - Arbitrary secrets, salts, and labels (empty, small, large)
//! - Arbitrary requested lengths, including odd and oversized ones
//! - Random sequences of symmetric and DH ratchet steps
//!
//! # Invariants
//!
//! - Derivation never panics and returns exactly the requested length
//! - Derivation is deterministic
//! - Odd lengths are always rejected
//! - Successful steps return keys of the configured length and material of
//!   2.5 times that length
//! - Both sides of a DH ratchet step derive identical keys

#![no_main]

use arbitrary::Arbitrary;
use keyward_crypto::{
    ChainKey, CryptoError, HashAlgorithm, KeyPair, RootKey, advance, kdf, step,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct ScheduleScenario {
    /// Selects SHA-256 when true
    use_sha256: bool,
    /// Input keying material for the KDF check
    secret: Vec<u8>,
    /// Salt for the KDF check
    salt: Vec<u8>,
    /// Domain label shared by every step
    info: Vec<u8>,
    /// Requested KDF output length
    output_length: u16,
    /// Root/chain key length (may be odd or zero)
    key_length: u8,
    /// Initial key fill byte
    fill: u8,
    /// Ratchet operations to perform
    operations: Vec<ScheduleOperation>,
}

#[derive(Debug, Clone, Arbitrary)]
enum ScheduleOperation {
    /// Symmetric ratchet step
    Advance,
    /// DH ratchet step with two key pairs
    Rotate { ours: [u8; 32], theirs: [u8; 32] },
}

fuzz_target!(|scenario: ScheduleScenario| {
    let hash = if scenario.use_sha256 { HashAlgorithm::Sha256 } else { HashAlgorithm::Sha512 };

    // INVARIANT 1: KDF returns exactly the requested length or OutputTooLarge
    let length = scenario.output_length as usize;
    match kdf::derive(length, hash, &scenario.secret, &scenario.salt, &scenario.info) {
        Ok(okm) => {
            assert_eq!(okm.len(), length, "kdf must honour the requested length");

            // INVARIANT 2: KDF is deterministic
            let again = kdf::derive(length, hash, &scenario.secret, &scenario.salt, &scenario.info);
            assert_eq!(again.ok(), Some(okm), "kdf must be deterministic");
        },
        Err(err) => {
            assert!(length > hash.max_kdf_output(), "unexpected kdf error: {err}");
        },
    }

    let key_length = scenario.key_length as usize;
    let mut chain_key = ChainKey::from_vec(vec![scenario.fill; key_length]);
    let mut root_key = RootKey::from_vec(vec![scenario.fill; key_length]);

    let info = scenario.info.as_slice();

    for op in scenario.operations {
        match op {
            ScheduleOperation::Advance => match advance(&chain_key, key_length, info, hash) {
                Ok((material, next)) => {
                    // INVARIANT 3: output lengths follow the key length
                    assert_eq!(material.len(), key_length * 5 / 2);
                    assert_eq!(next.len(), key_length);
                    chain_key = next;
                },
                Err(CryptoError::OddLength { .. }) => {
                    // INVARIANT 4: odd lengths never succeed
                    assert_eq!(key_length % 2, 1);
                },
                Err(_) => {
                    // Zero or oversized lengths
                },
            },

            ScheduleOperation::Rotate { ours, theirs } => {
                let ours = KeyPair::from_seed(&ours);
                let theirs = KeyPair::from_seed(&theirs);

                let mine =
                    step(&root_key, ours.private(), &theirs.public(), key_length, info, hash);
                let peer =
                    step(&root_key, theirs.private(), &ours.public(), key_length, info, hash);

                match (mine, peer) {
                    (Ok((next_root, next_chain)), Ok((peer_root, peer_chain))) => {
                        // INVARIANT 5: both sides agree
                        assert_eq!(next_root.as_bytes(), peer_root.as_bytes());
                        assert_eq!(next_chain.as_bytes(), peer_chain.as_bytes());
                        assert_eq!(next_root.len(), key_length);
                        root_key = next_root;
                        chain_key = next_chain;
                    },
                    (Err(a), Err(b)) => assert_eq!(a, b, "both sides must fail the same way"),
                    _ => unreachable!("one side succeeded where the other failed"),
                }
            },
        }
    }
});
