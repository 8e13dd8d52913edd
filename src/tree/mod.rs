//! Filesystem Merkle Tree
//!
//! Seals a directory subtree as a Merkle tree shaped like the filesystem,
//! where each node (file or directory) carries a content digest and a seal
//! digest over content plus metadata.

pub mod builder;
pub mod hasher;
pub mod node;
pub mod path;
pub mod walker;
