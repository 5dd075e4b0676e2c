//! Database Lifecycle
//!
//! Open/create/close/destroy over a database directory, plus the point
//! lookup that composes the root index and page files.
//!
//! ## Lifecycle
//!
//! ```text
//! absent ──open(create_if_missing)──▶ creating ──▶ open ──close──▶ closed
//!                                                   │
//! on-disk database ────────destroy────────────────▶ destroyed
//! ```
//!
//! A handle is exclusively owned by the caller between open and close.
//! Everything the handle owns (tables, their root indexes, the decoded
//! superblock) is released when it drops; page-file mappings live only
//! for the duration of a single `get`.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::Config;
use crate::error::{PgdbError, Result};
use crate::storage::{self, PageFile, RootIdx, Superblock, TableMeta};

/// Fixed capacity of the open-table set
pub const MAX_TABLES: usize = 1;

/// Name of the table every database is created with
pub const MASTER_TABLE: &str = "master";

/// An open table: its name, root file id, and decoded root index
pub struct Table {
    name: String,
    root_id: u64,
    root: RootIdx,
}

impl Table {
    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File id of the table's root index
    pub fn root_id(&self) -> u64 {
        self.root_id
    }

    /// The decoded root index
    pub fn root(&self) -> &RootIdx {
        &self.root
    }
}

/// An open database
pub struct Database {
    /// Open-time configuration
    config: Config,

    /// The database directory
    path: PathBuf,

    /// Decoded database metadata
    superblock: Superblock,

    /// Open tables, capacity fixed at MAX_TABLES
    tables: Vec<Table>,

    /// Recovered id counter: one past the highest numeric filename seen.
    /// No current operation consumes it; future allocation will.
    next_file_id: u64,
}

impl Database {
    /// Open or create the database at `path`.
    ///
    /// Steps, in order:
    /// 1. A missing path is an error unless `create_if_missing` is set
    /// 2. An existing path is an error if `error_if_exists` is set
    /// 3. Creation is disallowed when `readonly` is set
    /// 4. An existing path must be an accessible directory
    /// 5. Creation makes the directory, writes a superblock with a single
    ///    "master" table, and writes an empty root index as file `0`
    /// 6. Read and verify the superblock
    /// 7. Recover the next-file-id counter from the directory's numeric
    ///    filenames
    /// 8. Open the "master" table
    ///
    /// On any failure, everything built so far is torn down before the
    /// error is returned; a partial handle never escapes.
    pub fn open(config: Config, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut creating = false;
        if !path.exists() {
            if !config.create_if_missing {
                return Err(PgdbError::DatabaseMissing);
            }
            creating = true;
        } else if config.error_if_exists {
            return Err(PgdbError::DatabaseExists);
        }

        if creating {
            if config.readonly {
                return Err(PgdbError::ReadOnly);
            }
            create_db_dir(&path)?;
        } else {
            check_db_dir(&path, config.readonly)?;
        }

        let superblock = storage::read_superblock(&path)?;
        let next_file_id = scan_next_file_id(&path)?;

        let mut tables = Vec::with_capacity(MAX_TABLES);
        let meta = superblock
            .table(MASTER_TABLE)
            .ok_or_else(|| PgdbError::UnknownTable(MASTER_TABLE.to_string()))?;
        open_table(&path, &mut tables, meta)?;

        tracing::debug!(
            path = %path.display(),
            uuid = %superblock.uuid,
            next_file_id,
            "database open"
        );

        Ok(Self {
            config,
            path,
            superblock,
            tables,
            next_file_id,
        })
    }

    /// Close the database.
    ///
    /// Purely an in-memory teardown: tables, root indexes, and the
    /// superblock are released. Nothing is written to disk.
    pub fn close(self) {
        tracing::debug!(path = %self.path.display(), "database close");
        // resources are released by drop
    }

    /// Destroy the on-disk database at `path`.
    ///
    /// Requires a verifiable superblock to be present; anything else
    /// fails with [`PgdbError::NotAPgdbDatabase`] and leaves the
    /// directory untouched. Every directory entry is then unlinked and
    /// the directory removed. The sequence is not transactional: a
    /// failure mid-unlink aborts with the OS error and leaves the
    /// directory partially deleted.
    pub fn destroy(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !storage::have_superblock(path) {
            return Err(PgdbError::NotAPgdbDatabase);
        }

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            fs::remove_file(entry.path())?;
        }
        fs::remove_dir(path)?;

        tracing::info!(path = %path.display(), "database destroyed");
        Ok(())
    }

    /// Get the value stored under `key` in the "master" table.
    ///
    /// Returns:
    /// - `Ok(Some(value))` — exact match; the bytes are copied out of the
    ///   page-file mapping into a caller-owned buffer
    /// - `Ok(None)` — no candidate page file, or no byte-for-byte match
    /// - `Err(_)` — the root index routed to a page file that could not
    ///   be opened or validated
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.get_at(0, key)
    }

    /// Lookup in a specific table slot
    fn get_at(&self, table_slot: usize, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let table = &self.tables[table_slot];

        let page_id = match storage::find_rootent(table.root(), key) {
            Some(pos) => pos as u64,
            None => return Ok(None),
        };

        let pf = PageFile::open(&self.path, page_id)?;

        let slot = match pf.find(key, true) {
            Some(slot) => slot,
            None => return Ok(None),
        };

        // An index record pointing outside the file reads as a miss
        Ok(pf.value(slot).map(|v| v.to_vec()))
    }

    // =========================================================================
    // Placeholder Seams (declared surface, unimplemented write/scan paths)
    // =========================================================================

    /// Store `key` → `value`. Not yet implemented: no-op.
    pub fn put(&mut self, _key: &[u8], _value: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Remove `key`. Not yet implemented: no-op.
    pub fn delete(&mut self, _key: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Apply a batch of writes. Not yet implemented: no-op.
    pub fn write(&mut self, _batch: WriteBatch) -> Result<()> {
        Ok(())
    }

    /// Compact the given key range. Not yet implemented: no-op.
    pub fn compact_range(&mut self, _start_key: &[u8], _limit_key: &[u8]) {}

    /// Approximate on-disk size of each key range. Not yet implemented:
    /// reports zero for every range.
    pub fn approximate_sizes(&self, ranges: &[(&[u8], &[u8])]) -> Vec<u64> {
        vec![0; ranges.len()]
    }

    /// Introspect a named property. Not yet implemented: no property
    /// names are known.
    pub fn property_value(&self, _name: &str) -> Option<String> {
        None
    }

    /// Repair the database at `path`. Not yet implemented: no-op.
    pub fn repair(_path: impl AsRef<Path>) -> Result<()> {
        Ok(())
    }

    // =========================================================================
    // Accessors (for tooling, testing, and debugging)
    // =========================================================================

    /// The database directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The database identity from the superblock
    pub fn uuid(&self) -> Uuid {
        self.superblock.uuid
    }

    /// The open tables
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The recovered next-file-id counter
    pub fn next_file_id(&self) -> u64 {
        self.next_file_id
    }

    /// The open-time configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// A batch of writes, applied together by [`Database::write`].
///
/// Reserved seam for the future write path; collecting into it works,
/// applying it is a no-op today.
#[derive(Debug, Default)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

#[derive(Debug)]
enum BatchOp {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a put
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        self.ops.push(BatchOp::Put {
            key: key.to_vec(),
            value: value.to_vec(),
        });
    }

    /// Queue a delete
    pub fn delete(&mut self, key: &[u8]) {
        self.ops.push(BatchOp::Delete { key: key.to_vec() });
    }

    /// Drop all queued operations
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Visit the queued operations in insertion order
    pub fn iterate(&self, mut put: impl FnMut(&[u8], &[u8]), mut deleted: impl FnMut(&[u8])) {
        for op in &self.ops {
            match op {
                BatchOp::Put { key, value } => put(key, value),
                BatchOp::Delete { key } => deleted(key),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

// =============================================================================
// Private Helpers
// =============================================================================

/// Create and seed a fresh database directory: the directory itself, a
/// superblock naming one "master" table rooted at file id 0, and an empty
/// root index as file 0.
fn create_db_dir(path: &Path) -> Result<()> {
    fs::create_dir(path)?;

    let superblock = Superblock {
        uuid: Uuid::new_v4(),
        tables: vec![TableMeta {
            name: MASTER_TABLE.to_string(),
            uuid: Uuid::new_v4(),
            root_id: 0,
        }],
    };

    storage::write_superblock(path, &superblock)?;
    storage::write_root(path, &RootIdx::new(), 0)?;

    tracing::info!(path = %path.display(), uuid = %superblock.uuid, "database created");
    Ok(())
}

/// Verify an existing path is a directory we can use: readable, and
/// writable unless the database is opened read-only.
fn check_db_dir(path: &Path, readonly: bool) -> Result<()> {
    let meta = fs::metadata(path)?;
    if !meta.is_dir() {
        return Err(PgdbError::NotADirectory);
    }
    if !readonly && meta.permissions().readonly() {
        return Err(PgdbError::ReadOnly);
    }
    Ok(())
}

/// Recover the next-file-id counter: one past the highest all-digit
/// filename in the directory, or 0 if there are none.
fn scan_next_file_id(path: &Path) -> Result<u64> {
    let mut max_id: Option<u64> = None;

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if let Some(id) = parse_file_id(&entry.file_name()) {
            max_id = Some(max_id.map_or(id, |m| m.max(id)));
        }
    }

    Ok(max_id.map_or(0, |m| m + 1))
}

/// Parse a directory entry name as a file id.
/// "17" → Some(17); "superblock", "superblock.tmp", "01a" → None
fn parse_file_id(name: &OsStr) -> Option<u64> {
    let name = name.to_str()?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Read a table's root index and add it to the open set.
fn open_table(dir: &Path, tables: &mut Vec<Table>, meta: &TableMeta) -> Result<()> {
    if tables.len() >= MAX_TABLES {
        return Err(PgdbError::TableCapacity);
    }

    let root = storage::read_root(dir, meta.root_id)?;
    tables.push(Table {
        name: meta.name.clone(),
        root_id: meta.root_id,
        root,
    });

    Ok(())
}
