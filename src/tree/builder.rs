//! Tree builder for constructing seal trees
//!
//! The builder is the dispatcher: it classifies every entry under the root,
//! builds leaves for files and symlinks, and folds finished children into
//! their parent directory in enumeration order (sorted by file name).

use crate::error::SealError;
use crate::tree::hasher::{self, HashAlgorithm};
use crate::tree::node::{DirectoryFold, LeafKind, LeafNode, Node};
use crate::tree::walker::{EntryKind, Walker};
use crate::types::Digest;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Default streaming block size (4 KiB)
pub const DEFAULT_BLOCK_SIZE: usize = 4 << 10;

/// Parameters fixed for the lifetime of one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealOptions {
    /// Hash algorithm for every digest in the tree
    pub algorithm: HashAlgorithm,
    /// Block size used when streaming file content
    pub block_size: usize,
    /// Also write a directory's own name and permission bits into its seal digest
    pub directory_metadata: bool,
}

impl Default for SealOptions {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            block_size: DEFAULT_BLOCK_SIZE,
            directory_metadata: false,
        }
    }
}

impl SealOptions {
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the streaming block size.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be positive");
        self.block_size = block_size;
        self
    }

    pub fn with_directory_metadata(mut self, enabled: bool) -> Self {
        self.directory_metadata = enabled;
        self
    }
}

/// Tree builder for constructing seal trees
pub struct TreeBuilder {
    root: PathBuf,
    options: SealOptions,
}

impl TreeBuilder {
    /// Create a new tree builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            options: SealOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SealOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the complete seal tree.
    ///
    /// A file or symlink root yields a leaf, a directory root yields a tree.
    /// The first error anywhere in the subtree aborts the whole build.
    #[instrument(skip(self), fields(root = %self.root.display(), algorithm = %self.options.algorithm))]
    pub fn build(&self) -> Result<Node, SealError> {
        let start = Instant::now();
        info!("Starting seal build");

        let result = hasher::ensure_available(self.options.algorithm).and_then(|_| self.fold_entries());
        match result {
            Ok(root) => {
                info!(
                    node_count = root.node_count(),
                    seal = %root.seal_digest(),
                    duration_ms = start.elapsed().as_millis(),
                    "Seal build completed"
                );
                Ok(root)
            }
            Err(e) => {
                error!("Seal build failed: {}", e);
                Err(e)
            }
        }
    }

    /// Seal digest of the root
    ///
    /// Convenience wrapper that builds the tree and keeps only the root seal.
    pub fn compute_root(&self) -> Result<Digest, SealError> {
        Ok(*self.build()?.seal_digest())
    }

    /// Consume post-order entries, keeping one open fold per ancestor directory.
    fn fold_entries(&self) -> Result<Node, SealError> {
        let walker = Walker::new(self.root.clone());
        // open_dirs[d] accumulates the children of the directory at depth d
        let mut open_dirs: Vec<DirectoryFold> = Vec::new();

        for entry in walker.walk() {
            let entry = entry?;
            while open_dirs.len() < entry.depth {
                open_dirs.push(DirectoryFold::open(&self.options)?);
            }

            let node = match entry.kind {
                EntryKind::File => Node::Leaf(LeafNode::build_with_permissions(
                    &entry.path,
                    LeafKind::File,
                    entry.permissions,
                    &self.options,
                )?),
                EntryKind::Symlink => Node::Leaf(LeafNode::build_with_permissions(
                    &entry.path,
                    LeafKind::Symlink,
                    entry.permissions,
                    &self.options,
                )?),
                EntryKind::Directory => {
                    // A directory with children already has a fold one level down
                    let fold = if open_dirs.len() > entry.depth {
                        open_dirs.pop()
                    } else {
                        None
                    };
                    let fold = match fold {
                        Some(fold) => fold,
                        None => DirectoryFold::open(&self.options)?,
                    };
                    let tree = fold.finish(entry.path, entry.permissions, &self.options);
                    debug!(
                        path = %tree.path().display(),
                        children = tree.children().len(),
                        seal = %tree.seal_digest(),
                        "Sealed directory"
                    );
                    Node::Tree(tree)
                }
                EntryKind::Unsupported(kind) => {
                    return Err(SealError::UnsupportedEntryType {
                        kind,
                        path: entry.path,
                    })
                }
            };

            match entry.depth.checked_sub(1) {
                None => return Ok(node),
                Some(parent) => open_dirs[parent].push(node),
            }
        }

        Err(SealError::file_access(
            &self.root,
            io::Error::new(io::ErrorKind::NotFound, "walk yielded no root entry"),
        ))
    }
}
