//! Path and metadata helpers used when sealing entries

use crate::error::SealError;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Canonicalize the root path of a seal
///
/// Uses dunce so Windows paths stay in their familiar form. Fails with
/// `FileAccess` when the root does not exist or cannot be resolved.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, SealError> {
    dunce::canonicalize(path).map_err(|e| SealError::file_access(path, e))
}

/// Base name of an entry, falling back to the whole path (e.g. for `/`)
pub fn entry_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

/// Raw bytes of a file name as written into a seal digest
#[cfg(unix)]
pub fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(name.as_bytes())
}

#[cfg(not(unix))]
pub fn name_bytes(name: &OsStr) -> Cow<'_, [u8]> {
    match name.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Permission bits of an entry (`mode & 0o7777`)
#[cfg(unix)]
pub fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
pub fn permission_bits(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}
