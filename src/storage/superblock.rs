//! Superblock Manager
//!
//! Database-level metadata: the database identity and its table
//! directory. One superblock per database, in the file `superblock`,
//! replaced only by writing a temp file and renaming it into place.

use std::fs::{self, OpenOptions};
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::envelope;
use crate::error::{PgdbError, Result};

use super::MappedFile;

/// Name of the superblock file inside a database directory
pub const SUPERBLOCK_FILENAME: &str = "superblock";

/// Magic tag for the superblock envelope
pub const SUPERBLOCK_MAGIC: &[u8; envelope::MAGIC_SIZE] = b"PGDBSUPR";

/// Per-table metadata recorded in the superblock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMeta {
    /// Table name, unique within the database
    pub name: String,

    /// Table identity
    pub uuid: Uuid,

    /// File id of the table's root index
    pub root_id: u64,
}

/// Database-level metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Superblock {
    /// Database identity, generated at creation
    pub uuid: Uuid,

    /// Ordered table directory
    pub tables: Vec<TableMeta>,
}

impl Superblock {
    /// Look a table up by name
    pub fn table(&self, name: &str) -> Option<&TableMeta> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// True iff `dir` holds a superblock that is openable for read and write.
pub fn have_superblock(dir: &Path) -> bool {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(dir.join(SUPERBLOCK_FILENAME))
        .is_ok()
}

/// Write `superblock` into `dir`, replacing any existing one atomically.
///
/// The envelope is written to a fresh `superblock.tmp` (exclusive-create:
/// a pre-existing temp file is an error) and renamed over the final name.
/// The temp file is unlinked on every failure path; the existing
/// superblock is never written over in place.
pub fn write_superblock(dir: &Path, superblock: &Superblock) -> Result<()> {
    let tmp_path = dir.join(format!("{}.tmp", SUPERBLOCK_FILENAME));
    let path = dir.join(SUPERBLOCK_FILENAME);

    let payload =
        bincode::serialize(superblock).map_err(|e| PgdbError::Serialization(e.to_string()))?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)?;

    if let Err(e) = envelope::wrap(&mut file, SUPERBLOCK_MAGIC, &payload) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    drop(file);

    if let Err(e) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Map and verify the superblock in `dir`, returning the decoded struct.
///
/// The mapping lives only for the duration of this call; on success the
/// caller keeps the decoded superblock, not the map.
pub fn read_superblock(dir: &Path) -> Result<Superblock> {
    let map = MappedFile::open(dir.join(SUPERBLOCK_FILENAME))?;
    let payload = envelope::verify(SUPERBLOCK_MAGIC, map.bytes())?;

    bincode::deserialize(payload).map_err(|e| PgdbError::Serialization(e.to_string()))
}
