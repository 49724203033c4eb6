//! Property-based tests for the key schedule
//!
//! These tests verify the fundamental invariants of the derivation pipeline:
//!
//! 1. **Symmetry**: both sides of a DH exchange compute the same point
//! 2. **Determinism**: KDF and ratchet steps are pure functions
//! 3. **Forward progress**: the symmetric ratchet never repeats a key
//! 4. **Independence**: DH ratchet outputs differ from each other and the
//!    input
//! 5. **Parity**: odd key lengths are always rejected

use std::collections::HashSet;

use keyward_crypto::{
    ChainKey, ChainRatchet, CryptoError, HashAlgorithm, KeyPair, RatchetConfig, RootKey, advance,
    dh::exchange, kdf, step,
};
use proptest::prelude::*;

fn hash_strategy() -> impl Strategy<Value = HashAlgorithm> {
    prop_oneof![Just(HashAlgorithm::Sha256), Just(HashAlgorithm::Sha512)]
}

fn seed_strategy() -> impl Strategy<Value = [u8; 32]> {
    prop::collection::vec(any::<u8>(), 32..=32).prop_map(|v| {
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&v);
        arr
    })
}

#[test]
fn chain_never_repeats_within_a_thousand_steps() {
    let mut chain_key = ChainKey::from_slice(&[0u8; 32]);
    let mut materials = HashSet::new();
    let mut chain_keys = HashSet::new();

    for _ in 0..1000 {
        let (material, next) = advance(&chain_key, 32, b"test", HashAlgorithm::Sha512).unwrap();
        assert!(materials.insert(material.as_bytes().to_vec()), "message key repeated");
        assert!(chain_keys.insert(next.as_bytes().to_vec()), "chain key repeated");
        chain_key = next;
    }

    assert_eq!(materials.len(), 1000);
    assert_eq!(chain_keys.len(), 1000);
}

#[test]
fn stateful_chain_never_repeats_within_a_thousand_steps() {
    let config = RatchetConfig::new(32, HashAlgorithm::Sha256, b"properties").unwrap();
    let mut ratchet = ChainRatchet::new(ChainKey::from_slice(&[0x5Au8; 32]), config).unwrap();
    let mut materials = HashSet::new();

    for expected_generation in 0..1000u32 {
        let key = ratchet.next_message_key().unwrap();
        assert_eq!(key.generation(), expected_generation);
        assert_eq!(key.material().len(), 80);
        assert!(materials.insert(key.material().as_bytes().to_vec()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_dh_symmetric(seed_a in seed_strategy(), seed_b in seed_strategy()) {
        let a = KeyPair::from_seed(&seed_a);
        let b = KeyPair::from_seed(&seed_b);

        let ab = exchange(a.private(), &b.public()).unwrap();
        let ba = exchange(b.private(), &a.public()).unwrap();

        prop_assert_eq!(*ab, *ba);
    }

    #[test]
    fn prop_kdf_deterministic_and_exact(
        length in 0usize..600,
        hash in hash_strategy(),
        secret in prop::collection::vec(any::<u8>(), 0..64),
        salt in prop::collection::vec(any::<u8>(), 0..64),
        info in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let first = kdf::derive(length, hash, &secret, &salt, &info).unwrap();
        let second = kdf::derive(length, hash, &secret, &salt, &info).unwrap();

        prop_assert_eq!(first.len(), length);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_advance_lengths(
        half_length in 1usize..=16,
        hash in hash_strategy(),
        fill in any::<u8>(),
        info in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let length = half_length * 2;
        let chain_key = ChainKey::from_vec(vec![fill; length]);

        let (material, next) = advance(&chain_key, length, &info, hash).unwrap();

        prop_assert_eq!(material.len(), length * 5 / 2);
        prop_assert_eq!(next.len(), length);
        prop_assert_ne!(next.as_bytes(), chain_key.as_bytes());
    }

    #[test]
    fn prop_advance_rejects_odd_lengths(half_length in 0usize..32, hash in hash_strategy()) {
        let length = half_length * 2 + 1;
        let chain_key = ChainKey::from_vec(vec![0u8; length]);

        let result = advance(&chain_key, length, b"test", hash);

        let rejected = matches!(result, Err(CryptoError::OddLength { .. }));
        prop_assert!(rejected, "odd length {} accepted", length);
    }

    #[test]
    fn prop_step_rejects_odd_lengths(half_length in 0usize..32, seed in seed_strategy()) {
        let length = half_length * 2 + 1;
        let pair = KeyPair::from_seed(&seed);
        let root_key = RootKey::from_vec(vec![0u8; length]);

        let result =
            step(&root_key, pair.private(), &pair.public(), length, b"", HashAlgorithm::Sha512);

        let rejected = matches!(result, Err(CryptoError::OddLength { .. }));
        prop_assert!(rejected, "odd length {} accepted", length);
    }

    #[test]
    fn prop_step_outputs_independent(
        ours in seed_strategy(),
        theirs in seed_strategy(),
        root in seed_strategy(),
        hash in hash_strategy(),
    ) {
        let ours = KeyPair::from_seed(&ours);
        let theirs = KeyPair::from_seed(&theirs);
        let root_key = RootKey::from_slice(&root);

        let (next_root, next_chain) =
            step(&root_key, ours.private(), &theirs.public(), 32, b"prop", hash).unwrap();

        prop_assert_ne!(next_root.as_bytes(), next_chain.as_bytes());
        prop_assert_ne!(next_root.as_bytes(), root_key.as_bytes());
        prop_assert_ne!(next_chain.as_bytes(), root_key.as_bytes());
    }

    #[test]
    fn prop_step_agrees_across_sides(
        ours in seed_strategy(),
        theirs in seed_strategy(),
        root in seed_strategy(),
    ) {
        let ours = KeyPair::from_seed(&ours);
        let theirs = KeyPair::from_seed(&theirs);

        let root_key = RootKey::from_slice(&root);
        let hash = HashAlgorithm::Sha512;

        let (root_a, chain_a) =
            step(&root_key, ours.private(), &theirs.public(), 32, b"", hash).unwrap();
        let (root_b, chain_b) =
            step(&root_key, theirs.private(), &ours.public(), 32, b"", hash).unwrap();

        prop_assert_eq!(root_a.as_bytes(), root_b.as_bytes());
        prop_assert_eq!(chain_a.as_bytes(), chain_b.as_bytes());
    }
}
