//! Mapped File
//!
//! Read-only whole-file memory mapping with its owning descriptor.
//!
//! A `MappedFile` is a single-owner resource: the mapping and descriptor
//! are released exactly once, when the value is dropped. Handing the map
//! to another component (e.g. a page file) is a move, never a share.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::envelope;
use crate::error::{PgdbError, Result};

/// A whole file mapped read-only into memory
pub struct MappedFile {
    /// Path the mapping was opened from
    path: PathBuf,

    /// Descriptor held open for the lifetime of the mapping
    #[allow(dead_code)]
    file: File,

    /// Cached file size at open time
    len: usize,

    /// The read-only, shared mapping
    map: Mmap,
}

impl MappedFile {
    /// Open `path` read-only and map the entire file.
    ///
    /// Fails with [`PgdbError::FileTooSmall`] if the file cannot hold even
    /// an envelope header; no database file is that short.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path)?;
        let len = file.metadata()?.len() as usize;

        if len < envelope::HEADER_SIZE {
            return Err(PgdbError::FileTooSmall);
        }

        // Safety: the mapping is read-only and pgdb never truncates or
        // rewrites a file in place while it is mapped.
        let map = unsafe { Mmap::map(&file)? };

        Ok(Self {
            path,
            file,
            len,
            map,
        })
    }

    /// File length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only view of the entire file
    pub fn bytes(&self) -> &[u8] {
        &self.map
    }

    /// Path the file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}
