//! File-based previous-address store.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::lookup::PublicAddress;

use super::{AddressStore, LoadResult, PersistenceError};

/// Stores the last observed address as a single line of plain text.
///
/// # Atomic Writes
///
/// Uses the write-to-temp-then-rename pattern:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// The file is either fully written or left untouched. Concurrent runs are
/// not coordinated; the last writer wins.
#[derive(Debug, Clone)]
pub struct FileAddressStore {
    path: PathBuf,
}

impl FileAddressStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AddressStore for FileAddressStore {
    fn load(&self) -> Result<LoadResult, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadResult::NotFound),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let line = content.lines().next().unwrap_or_default().trim();
        if line.is_empty() {
            return Ok(LoadResult::NotFound);
        }

        Ok(match line.parse::<PublicAddress>() {
            Ok(address) => LoadResult::Loaded(address),
            Err(e) => LoadResult::Corrupted {
                reason: e.to_string(),
            },
        })
    }

    fn save(&self, address: &PublicAddress) -> Result<(), PersistenceError> {
        write_atomically(&self.path, &format!("{address}\n")).map_err(|source| {
            PersistenceError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// Writes `content` to `path` through a sibling temp file and a rename.
pub(super) fn write_atomically(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Append .tmp instead of replacing the extension (state.txt -> state.txt.tmp)
    let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)
}
