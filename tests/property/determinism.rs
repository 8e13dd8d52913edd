//! Property-based tests for determinism guarantees

use proptest::prelude::*;
use sealdir::tree::builder::{SealOptions, TreeBuilder};
use sealdir::tree::hasher::{self, Accumulator, HashAlgorithm};
use sealdir::Digest;
use std::fs;
use tempfile::TempDir;

proptest! {
    /// A file's content digest is the plain hash of its bytes
    #[test]
    fn prop_leaf_content_is_direct_hash(
        content in proptest::collection::vec(any::<u8>(), 0..20_000),
        block_size in 1usize..9000,
    ) {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("f.bin");
        fs::write(&file, &content).unwrap();

        let leaf = TreeBuilder::new(file)
            .with_options(SealOptions::default().with_block_size(block_size))
            .build()
            .unwrap();
        let direct = hasher::digest_bytes(HashAlgorithm::Sha256, &content).unwrap();
        prop_assert_eq!(leaf.content_digest(), &direct);
    }

    /// Streaming in arbitrary chunks matches a one-shot digest
    #[test]
    fn prop_chunked_writes_match_one_shot(
        content in proptest::collection::vec(any::<u8>(), 0..4096),
        chunk in 1usize..512,
    ) {
        let mut acc = Accumulator::open(HashAlgorithm::Sha256).unwrap();
        for piece in content.chunks(chunk) {
            acc.write(piece);
        }
        prop_assert_eq!(
            acc.finalize(),
            hasher::digest_bytes(HashAlgorithm::Sha256, &content).unwrap()
        );
    }

    /// combine(a, b) differs from combine(b, a) whenever a != b
    #[test]
    fn prop_combine_is_order_sensitive(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        prop_assume!(a != b);
        let a = Digest::from_array(a);
        let b = Digest::from_array(b);
        let ab = hasher::combine(HashAlgorithm::Sha256, &a, &b).unwrap();
        let ba = hasher::combine(HashAlgorithm::Sha256, &b, &a).unwrap();
        prop_assert_ne!(ab, ba);
    }

    /// Digest ordering is plain lexicographic byte order
    #[test]
    fn prop_digest_order_is_lexicographic(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        prop_assert_eq!(Digest::from_array(a).cmp(&Digest::from_array(b)), a.cmp(&b));
    }

    /// The same set of files seals identically however many times it is built
    #[test]
    fn prop_tree_seal_is_deterministic(
        files in proptest::collection::btree_map("[a-z]{1,8}", "[ -~]{0,64}", 0..8),
    ) {
        let temp_dir = TempDir::new().unwrap();
        for (name, contents) in &files {
            fs::write(temp_dir.path().join(name), contents).unwrap();
        }

        let builder = TreeBuilder::new(temp_dir.path().to_path_buf());
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        prop_assert_eq!(first.seal_digest(), second.seal_digest());
        prop_assert_eq!(first.content_digest(), second.content_digest());
        prop_assert_eq!(first.children().len(), files.len());
    }
}
