//! Seal tree node types
//!
//! Every node carries two digests:
//! - `content_digest`: file bytes, or the children's content digests in order
//! - `seal_digest`: content plus metadata (name, permission bits, size)

use crate::error::SealError;
use crate::tree::builder::{SealOptions, TreeBuilder};
use crate::tree::hasher::Accumulator;
use crate::tree::path::{entry_name, name_bytes, permission_bits};
use crate::types::Digest;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::trace;

/// What a leaf was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    File,
    Symlink,
}

/// Leaf node: a regular file or a symlink
///
/// Symlinks are opened like files, so their digests cover the target's
/// bytes while the permission bits are the link's own.
#[derive(Debug, Clone)]
pub struct LeafNode {
    path: PathBuf,
    kind: LeafKind,
    permissions: u32,
    size: u64,
    content_digest: Digest,
    seal_digest: Digest,
}

impl LeafNode {
    /// Build a leaf from a path known to name a regular file or symlink
    pub fn build(path: &Path, kind: LeafKind, options: &SealOptions) -> Result<Self, SealError> {
        let metadata =
            std::fs::symlink_metadata(path).map_err(|e| SealError::file_access(path, e))?;
        Self::build_with_permissions(path, kind, permission_bits(&metadata), options)
    }

    pub(crate) fn build_with_permissions(
        path: &Path,
        kind: LeafKind,
        permissions: u32,
        options: &SealOptions,
    ) -> Result<Self, SealError> {
        // Algorithm availability is checked before touching the file.
        let mut content_acc = Accumulator::open(options.algorithm)?;
        let mut seal_acc = Accumulator::open(options.algorithm)?;

        let mut file = File::open(path).map_err(|e| SealError::file_access(path, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| SealError::file_access(path, e))?;
        // A symlink may resolve to a directory or device; only regular files are streamed
        if !metadata.is_file() {
            return Err(SealError::file_access(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }
        let size = metadata.len();
        let mut buffer = vec![0u8; options.block_size];

        stream_into(&mut file, &mut content_acc, &mut buffer)
            .map_err(|e| SealError::file_access(path, e))?;
        let content_digest = content_acc.finalize();

        file.seek(SeekFrom::Start(0))
            .map_err(|e| SealError::file_access(path, e))?;
        stream_into(&mut file, &mut seal_acc, &mut buffer)
            .map_err(|e| SealError::file_access(path, e))?;
        seal_acc.write(&name_bytes(entry_name(path)));
        seal_acc.write(permissions.to_string().as_bytes());
        seal_acc.write(size.to_string().as_bytes());
        let seal_digest = seal_acc.finalize();

        trace!(
            path = %path.display(),
            size,
            permissions,
            content = %content_digest,
            seal = %seal_digest,
            "Sealed leaf"
        );

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            permissions,
            size,
            content_digest,
            seal_digest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> LeafKind {
        self.kind
    }

    pub fn permissions(&self) -> u32 {
        self.permissions
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn content_digest(&self) -> &Digest {
        &self.content_digest
    }

    pub fn seal_digest(&self) -> &Digest {
        &self.seal_digest
    }
}

/// Stream a whole file in `buffer`-sized blocks; the last block may be short or empty
fn stream_into(file: &mut File, acc: &mut Accumulator, buffer: &mut [u8]) -> io::Result<u64> {
    let mut total = 0u64;
    loop {
        let read = match file.read(buffer) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        acc.write(&buffer[..read]);
        total += read as u64;
    }
}

/// Tree node: a directory and the nodes of its children, in enumeration order
#[derive(Debug, Clone)]
pub struct TreeNode {
    path: PathBuf,
    permissions: u32,
    children: Vec<Node>,
    content_digest: Digest,
    seal_digest: Digest,
}

impl TreeNode {
    /// Build a tree from a path known to name a directory
    pub fn build(path: &Path, options: &SealOptions) -> Result<Self, SealError> {
        match TreeBuilder::new(path.to_path_buf())
            .with_options(options.clone())
            .build()?
        {
            Node::Tree(tree) => Ok(tree),
            Node::Leaf(_) => Err(SealError::file_access(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn permissions(&self) -> u32 {
        self.permissions
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn content_digest(&self) -> &Digest {
        &self.content_digest
    }

    pub fn seal_digest(&self) -> &Digest {
        &self.seal_digest
    }
}

/// Running fold of one directory's children into its two digests
pub(crate) struct DirectoryFold {
    content: Accumulator,
    seal: Accumulator,
    children: Vec<Node>,
}

impl DirectoryFold {
    pub(crate) fn open(options: &SealOptions) -> Result<Self, SealError> {
        Ok(Self {
            content: Accumulator::open(options.algorithm)?,
            seal: Accumulator::open(options.algorithm)?,
            children: Vec::new(),
        })
    }

    /// Fold a finished child; callers push children in enumeration order
    pub(crate) fn push(&mut self, child: Node) {
        self.content.write_digest(child.content_digest());
        self.seal.write_digest(child.seal_digest());
        self.children.push(child);
    }

    pub(crate) fn finish(
        mut self,
        path: PathBuf,
        permissions: u32,
        options: &SealOptions,
    ) -> TreeNode {
        if options.directory_metadata {
            self.seal.write(&name_bytes(entry_name(&path)));
            self.seal.write(permissions.to_string().as_bytes());
        }
        TreeNode {
            path,
            permissions,
            children: self.children,
            content_digest: self.content.finalize(),
            seal_digest: self.seal.finalize(),
        }
    }
}

/// Seal tree node
#[derive(Debug, Clone)]
pub enum Node {
    Leaf(LeafNode),
    Tree(TreeNode),
}

impl Node {
    pub fn content_digest(&self) -> &Digest {
        match self {
            Node::Leaf(leaf) => leaf.content_digest(),
            Node::Tree(tree) => tree.content_digest(),
        }
    }

    pub fn seal_digest(&self) -> &Digest {
        match self {
            Node::Leaf(leaf) => leaf.seal_digest(),
            Node::Tree(tree) => tree.seal_digest(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Node::Leaf(leaf) => leaf.path(),
            Node::Tree(tree) => tree.path(),
        }
    }

    pub fn name(&self) -> &OsStr {
        entry_name(self.path())
    }

    pub fn permissions(&self) -> u32 {
        match self {
            Node::Leaf(leaf) => leaf.permissions(),
            Node::Tree(tree) => tree.permissions(),
        }
    }

    /// Children in enumeration order; empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Tree(tree) => tree.children(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Node::Leaf(leaf) => match leaf.kind() {
                LeafKind::File => "file",
                LeafKind::Symlink => "symlink",
            },
            Node::Tree(_) => "directory",
        }
    }

    /// Number of nodes in this subtree, itself included
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first pre-order traversal yielding `(depth, node)`
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter {
            stack: vec![(0, self)],
        }
    }
}

/// Pre-order iterator over a seal tree, backed by an explicit stack
pub struct NodeIter<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}
