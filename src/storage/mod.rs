//! Storage Module
//!
//! On-disk layout of a database directory:
//!
//! ```text
//! <dbdir>/
//!   ├── superblock    Envelope{magic="PGDBSUPR", payload=Superblock}
//!   ├── 0             Envelope{magic="PGDBROOT", payload=RootIdx}
//!   ├── 1             ... or a raw page file (magic="PGDBPAGE" in-band)
//!   └── N             numeric names form one shared id namespace
//! ```
//!
//! Numerically-named files hold either a root index or a page file; only
//! the magic embedded in the file distinguishes the two. All multi-byte
//! integers on disk are little-endian, and every sorted sequence (root
//! entries, page-file index records) is ascending by raw byte comparison
//! of keys.

mod map;
mod pagefile;
mod root;
mod superblock;

use std::cmp::Ordering;

pub use map::MappedFile;
pub use pagefile::{PageFile, PageIndexEntry, PAGE_HEADER_SIZE, PAGE_INDEX_SIZE, PAGE_MAGIC};
pub use root::{find_rootent, read_root, write_root, RootEnt, RootIdx, ROOT_MAGIC};
pub use superblock::{
    have_superblock, read_superblock, write_superblock, Superblock, TableMeta, SUPERBLOCK_FILENAME,
    SUPERBLOCK_MAGIC,
};

/// Shared-prefix key comparison.
///
/// Compares only the first `min(a.len(), b.len())` bytes. A strict prefix
/// of a stored key therefore compares `Equal`: the boundary counts as
/// reached. This is the routing comparison, not a full lexicographic
/// compare; callers that need byte-for-byte identity must also check the
/// lengths.
pub(crate) fn prefix_cmp(a: &[u8], b: &[u8]) -> Ordering {
    let len = a.len().min(b.len());
    a[..len].cmp(&b[..len])
}
