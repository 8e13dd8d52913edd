//! Sealdir: Cryptographic Directory Seals
//!
//! Computes a single fingerprint summarizing the content and selected
//! metadata (names, permission bits, sizes) of a directory subtree. Seal a
//! directory once, recompute later, and compare the two root digests to
//! detect any change.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tree;
pub mod types;

pub use error::{ApiError, SealError, UnsupportedKind};
pub use tree::builder::{SealOptions, TreeBuilder, DEFAULT_BLOCK_SIZE};
pub use tree::hasher::{init, HashAlgorithm};
pub use tree::node::{LeafKind, LeafNode, Node, TreeNode};
pub use types::{Digest, DIGEST_LEN};
