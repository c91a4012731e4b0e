// Platform-specific filesystem identity
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Physical identity of a file, stable across the different paths that reach it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileIdentity {
    Inode { dev: u64, ino: u64 },
    Canonical(PathBuf),
}

#[cfg(unix)]
pub fn file_identity(_path: &Path, metadata: &Metadata) -> FileIdentity {
    use std::os::unix::fs::MetadataExt;

    FileIdentity::Inode {
        dev: metadata.dev(),
        ino: metadata.ino(),
    }
}

#[cfg(not(unix))]
pub fn file_identity(path: &Path, _metadata: &Metadata) -> FileIdentity {
    FileIdentity::Canonical(std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}
