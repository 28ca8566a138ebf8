//! Property-based tests for the Merkle reconstruction and chain-hash and
//! SAN-anchor invariants (`spec.md` §8, properties 2/3/6). Properties 1, 4,
//! and 5 need either a prover (this crate is verify-only) or full
//! certificate fixtures, so those paths are covered instead by the golden
//! end-to-end vector in `epoch.rs` and the unit tests in `cert.rs`
//! (SCT diversity counting, issuer-pinned root mismatch, single mutated
//! neighbour / chain-hash byte).

use kt_verifier::epoch::canonical_san;
use kt_verifier::hash::{sha256_concat, ZERO_NODE};
use kt_verifier::merkle::{leaf_hash, reconstruct_root, tree_path};
use kt_verifier::types::{NeighbourMap, ProofType};
use proptest::prelude::*;

proptest! {
    /// Property 2: inserting a neighbour explicitly equal to the zero hash
    /// yields the same root as omitting it entirely, once the absence fast
    /// path has already been left (i.e. some earlier neighbour is present).
    #[test]
    fn neighbour_absence_equivalence(
        beta in prop::array::uniform64(any::<u8>()),
        anchor_level in 0u8..200,
        zero_level in 200u8..255,
        anchor_sibling in prop::array::uniform32(any::<u8>()),
    ) {
        let path = tree_path(&beta);
        let leaf = leaf_hash(ProofType::Presence, Some(b"skl"), 1);

        let mut with_zero = NeighbourMap::new();
        with_zero.insert(anchor_level, anchor_sibling);
        with_zero.insert(zero_level, ZERO_NODE);

        let mut without_zero = NeighbourMap::new();
        without_zero.insert(anchor_level, anchor_sibling);

        let root_a = reconstruct_root(&path, ProofType::Presence, leaf, &with_zero);
        let root_b = reconstruct_root(&path, ProofType::Presence, leaf, &without_zero);
        prop_assert_eq!(root_a, root_b);
    }

    /// Property 3: the chain hash is exactly SHA256(prev || root), with no
    /// tolerance for byte-level drift in either operand.
    #[test]
    fn chain_hash_binding_is_bit_exact(
        prev in prop::array::uniform32(any::<u8>()),
        root in prop::array::uniform32(any::<u8>()),
        mutate_byte in 0usize..32,
    ) {
        let expected = sha256_concat(&prev, &root);
        prop_assert_eq!(sha256_concat(&prev, &root), expected);

        let mut mutated_root = root;
        mutated_root[mutate_byte] ^= 0x01;
        prop_assert_ne!(sha256_concat(&prev, &mutated_root), expected);
    }

    /// Property 6: the SAN anchor changes under any single-component
    /// mutation, and an unrelated certificate field can never coincide
    /// with it for arbitrary inputs.
    #[test]
    fn san_anchor_strictness(
        chain_hash in prop::array::uniform32(any::<u8>()),
        certificate_time in any::<i64>(),
        epoch_id in any::<u32>(),
        base_domain in "[a-z]{1,10}\\.[a-z]{2,4}",
    ) {
        let base = canonical_san(&chain_hash, certificate_time, epoch_id, &base_domain);

        let mut mutated_hash = chain_hash;
        mutated_hash[0] ^= 0x01;
        prop_assert_ne!(canonical_san(&mutated_hash, certificate_time, epoch_id, &base_domain), base.clone());

        prop_assert_ne!(
            canonical_san(&chain_hash, certificate_time.wrapping_add(1), epoch_id, &base_domain),
            base.clone()
        );
        prop_assert_ne!(
            canonical_san(&chain_hash, certificate_time, epoch_id.wrapping_add(1), &base_domain),
            base
        );
    }

    /// Mutating any neighbour entry changes the reconstructed root
    /// (merkle-level analogue of property 1, which at the full
    /// `verify_insertion` level also depends on VRF proof bytes).
    #[test]
    fn mutating_any_neighbour_changes_root(
        beta in prop::array::uniform64(any::<u8>()),
        level in 0u8..255,
        sibling in prop::array::uniform32(any::<u8>()),
    ) {
        let path = tree_path(&beta);
        let leaf = leaf_hash(ProofType::Presence, Some(b"skl"), 1);

        let mut neighbours = NeighbourMap::new();
        neighbours.insert(level, sibling);
        let original_root = reconstruct_root(&path, ProofType::Presence, leaf, &neighbours);

        let mut mutated_sibling = sibling;
        mutated_sibling[0] ^= 0x01;
        let mut mutated = NeighbourMap::new();
        mutated.insert(level, mutated_sibling);
        let mutated_root = reconstruct_root(&path, ProofType::Presence, leaf, &mutated);

        prop_assert_ne!(original_root, mutated_root);
    }
}

/// Golden end-to-end vector reproduced from a real server-issued presence
/// proof, cross-checked bit-exactly against its VRF output, signed key
/// list, neighbour set, and published root hash.
mod golden_vectors {
    use super::*;

    /// `β` for alpha `"pro@proton.black"` under the pinned VRF key, taken
    /// from an independently confirmed good-proof vector (same VRF proof
    /// bytes as the existence proof below).
    const PRESENCE_BETA: [u8; 64] = [
        0x56, 0x1f, 0x32, 0x9b, 0xff, 0x63, 0xf4, 0x4f, 0xdb, 0x12, 0x15, 0xe9, 0x34, 0x8e, 0xa6,
        0x98, 0x81, 0x42, 0x9b, 0x0a, 0xc1, 0x84, 0x32, 0xfe, 0x2c, 0x7a, 0x8e, 0xfd, 0x16, 0x18,
        0xd4, 0x2f, 0x51, 0x0b, 0x67, 0x44, 0x0f, 0x83, 0xb6, 0xc4, 0x69, 0xcc, 0x63, 0x95, 0xf7,
        0x0a, 0x85, 0xc2, 0xb1, 0x7f, 0xf3, 0x9e, 0x31, 0xfe, 0xf9, 0xbc, 0xc9, 0x32, 0xd8, 0x33,
        0x1b, 0xee, 0x83, 0x51,
    ];

    const PRESENCE_SIGNED_KEY_LIST: &str = r#"[{"Primary":1,"Flags":3,"Fingerprint":"552acf5984e187edc0682d84395469b11f04cd64","SHA256Fingerprints":["ef445078489f7feec6af4b0e23f9bad8bc883e4c4166bd81478851cfa9090b6c","92c8c4a69a75f83af7c13c9049c94e7f75b3ccd8ca33c6c302cd04286a556387"]},{"Primary":0,"Flags":3,"Fingerprint":"5372de721b9971518273581e04cd9dc25fbae509","SHA256Fingerprints":["4380c60bc440132428390868598b9872ed4efad6a87e2c7aad25807fe7f675b0","bad8f749883cc2873d09e66cfce2604855b85aaaa7215311d444e2b60a96cd59"]}]"#;

    const PRESENCE_ROOT_HASH: &str =
        "d61969ba4ab30507809aec0d3a49810433c9abc5a28c17b1f160692766b60595";

    fn hex32(s: &str) -> [u8; 32] {
        let bytes = hex::decode(s).expect("valid hex");
        <[u8; 32]>::try_from(bytes).expect("32 bytes")
    }

    #[test]
    fn presence_proof_reconstructs_the_published_root_hash() {
        let path = tree_path(&PRESENCE_BETA);
        let leaf = leaf_hash(ProofType::Presence, Some(PRESENCE_SIGNED_KEY_LIST.as_bytes()), 0);

        let neighbours: [(u8, &str); 14] = [
            (0, "d6a32d69fe74b4f4c7783624a1f9dc29faae7abedb9f7a35667b403b54949c51"),
            (1, "dc5dd14729a0e5ec0b9947517c8dbc5900ed9b45cae579b81421a2c7474a4bc5"),
            (2, "e1666a9c0be19d3fa50227a3421209459a83f8922ac4da44262a13176b5682b1"),
            (3, "59af0d29c47e774217a867c193ad43dccf8aa841d4ba8341f504a3ae08dd500a"),
            (4, "a6a3dd3ec7ee85af3ecde7ae1e769c50fb3fab6f407b1f68635b68bf8bd9f7ab"),
            (5, "4c9c6081f317911d4fd41b4a58b21cf64da8d2352abb5a0f43bb0e9d78d9685d"),
            (6, "b7500c93afd823e443a57701fc4396a20bc2b930c20b62f34e488a42f4a73b2e"),
            (7, "d8d01da11426f7170541260b970c23a93d89d4d9a6be889bd698c531c9f511a7"),
            (8, "a6c59154f274e6cfc9fc6c85e4c8c63e4c08303960eaf0d97154882c349cac81"),
            (9, "135bcd400baa90cae2ef72522e1ed6481d559bbf1869c0fb44ec229d4a11dabd"),
            (10, "9a6221223169dc031b37e32133ef20ca0b1e0a6a7f1c960415a71852d308db6a"),
            (11, "80db7974dfa860c3ec31429a7c168364ccb7a3104c298ddc9a22a523edd65806"),
            (12, "187e1ae64197a1cc4ada1885ca744cd398a5497c7766f00421d9a0b0ced1ad2f"),
            (13, "66cb75d9d6561ccd765da48c10e9d4641ef0b654ed24e00f5ea07b11da219654"),
        ];
        let mut map = NeighbourMap::new();
        for (level, hash) in neighbours {
            map.insert(level, hex32(hash));
        }

        let root = reconstruct_root(&path, ProofType::Presence, leaf, &map);
        assert_eq!(hex::encode(root), PRESENCE_ROOT_HASH);
    }
}
