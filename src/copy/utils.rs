//! Helpers shared by the copy operations.

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

/// Identity of a file that survives different spellings of its path.
///
/// On Unix this is `(dev, ino)`. Elsewhere it falls back to a hash of the
/// canonical path.
#[cfg(unix)]
pub(crate) fn file_key(meta: &Metadata, _path: &Path) -> io::Result<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    Ok((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
pub(crate) fn file_key(_meta: &Metadata, path: &Path) -> io::Result<(u64, u64)> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let canonical = path.canonicalize()?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok((0, hasher.finish()))
}

/// Whether `dst` already exists and is the same file as the source.
///
/// A destination that cannot be inspected is treated as distinct; opening
/// it will report the real problem.
pub(crate) fn is_same_file(src: &Path, src_meta: &Metadata, dst: &Path) -> bool {
    let Ok(dst_meta) = fs::metadata(dst) else {
        return false;
    };
    match (file_key(src_meta, src), file_key(&dst_meta, dst)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
