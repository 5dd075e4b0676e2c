//! Root Index Manager
//!
//! Per-table sorted index routing key ranges to page files. Each entry's
//! key is the inclusive upper boundary of the range served by one page
//! file; the page-file id is the entry's position. Root files live under
//! numeric names in the database directory and are write-once.

use std::fs::{self, OpenOptions};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{prefix_cmp, MappedFile};
use crate::envelope;
use crate::error::{PgdbError, Result};

/// Magic tag for the root-index envelope
pub const ROOT_MAGIC: &[u8; envelope::MAGIC_SIZE] = b"PGDBROOT";

/// One range boundary in a root index.
///
/// The id of the page file the range routes to is the entry's position in
/// [`RootIdx::entries`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootEnt {
    /// Inclusive upper boundary of the routed key range
    pub key: Vec<u8>,
}

/// A table's root index: range boundaries, ascending by key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootIdx {
    pub entries: Vec<RootEnt>,
}

impl RootIdx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Write `root` as file `<dir>/<file_id>`.
///
/// Root files are write-once: the destination is created with
/// exclusive-create semantics and the call fails if it already exists.
/// There is no temp-file-plus-rename step here; a partial file is
/// unlinked on failure.
pub fn write_root(dir: &Path, root: &RootIdx, file_id: u64) -> Result<()> {
    let path = dir.join(file_id.to_string());

    let payload = bincode::serialize(root).map_err(|e| PgdbError::Serialization(e.to_string()))?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)?;

    if let Err(e) = envelope::wrap(&mut file, ROOT_MAGIC, &payload) {
        drop(file);
        let _ = fs::remove_file(&path);
        return Err(e);
    }

    Ok(())
}

/// Map, verify, and decode the root index stored as `<dir>/<file_id>`.
pub fn read_root(dir: &Path, file_id: u64) -> Result<RootIdx> {
    let map = MappedFile::open(dir.join(file_id.to_string()))?;
    let payload = envelope::verify(ROOT_MAGIC, map.bytes())?;

    bincode::deserialize(payload).map_err(|e| PgdbError::Serialization(e.to_string()))
}

/// Find the candidate page file for `key`.
///
/// Scans entries in ascending stored order and returns the position of
/// the first boundary at or after `key` under the shared-prefix rule (a
/// strict prefix counts as reached). `None` means the key lies beyond
/// every indexed range: no candidate, not an error.
pub fn find_rootent(root: &RootIdx, key: &[u8]) -> Option<usize> {
    root.entries
        .iter()
        .position(|ent| prefix_cmp(key, &ent.key) != std::cmp::Ordering::Greater)
}
