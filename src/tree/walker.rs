//! Filesystem walker for traversing directory structures
//!
//! Yields every entry under a root exactly once, children sorted by file
//! name and each directory after its contents (post-order). The traversal
//! stack lives on the heap inside `walkdir`, so nesting depth is bounded by
//! memory rather than the call stack.

use crate::error::{SealError, UnsupportedKind};
use crate::tree::path;
use std::fs::FileType;
use std::io;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Filesystem entry types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Symlink,
    Directory,
    Unsupported(UnsupportedKind),
}

/// Classify a (non-followed) file type
pub fn classify(file_type: FileType) -> EntryKind {
    if file_type.is_file() {
        return EntryKind::File;
    }
    if file_type.is_symlink() {
        return EntryKind::Symlink;
    }
    if file_type.is_dir() {
        return EntryKind::Directory;
    }
    EntryKind::Unsupported(unsupported_kind(file_type))
}

#[cfg(unix)]
fn unsupported_kind(file_type: FileType) -> UnsupportedKind {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_block_device() {
        UnsupportedKind::BlockDevice
    } else if file_type.is_char_device() {
        UnsupportedKind::CharDevice
    } else if file_type.is_fifo() {
        UnsupportedKind::Fifo
    } else if file_type.is_socket() {
        UnsupportedKind::Socket
    } else {
        UnsupportedKind::Unrecognisable
    }
}

#[cfg(not(unix))]
fn unsupported_kind(_file_type: FileType) -> UnsupportedKind {
    UnsupportedKind::Unrecognisable
}

/// A classified entry with its depth below the root (root = 0)
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub depth: usize,
    pub kind: EntryKind,
    /// Permission bits of the entry itself (symlinks are not followed)
    pub permissions: u32,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Walk the filesystem lazily in post-order.
    ///
    /// The first unreadable entry yields `FileAccess`; an entry that is not
    /// a file, symlink or directory yields `UnsupportedEntryType`.
    pub fn walk(&self) -> impl Iterator<Item = Result<Entry, SealError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .contents_first(true)
            .sort_by_file_name()
            .into_iter()
            .map(move |entry| {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(self.root.as_path()).to_path_buf();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
                    SealError::FileAccess { path, source }
                })?;

                let kind = classify(entry.file_type());
                if let EntryKind::Unsupported(kind) = kind {
                    return Err(SealError::UnsupportedEntryType {
                        kind,
                        path: entry.into_path(),
                    });
                }

                let metadata = entry.metadata().map_err(|e| {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("failed to read metadata"));
                    SealError::file_access(entry.path(), source)
                })?;

                Ok(Entry {
                    depth: entry.depth(),
                    kind,
                    permissions: path::permission_bits(&metadata),
                    path: entry.into_path(),
                })
            })
    }
}
