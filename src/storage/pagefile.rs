//! Page File Reader
//!
//! An immutable page file holds a sorted key→value index plus the key and
//! value payload bytes, all referenced by absolute offsets into the same
//! file:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Header (32 bytes)                                        │
//! │   Magic "PGDBPAGE" (8) | NEntries: u32 LE (4) | Rsvd (20)│
//! ├──────────────────────────────────────────────────────────┤
//! │ Index (NEntries × 32-byte records, ascending by key)     │
//! │   KOff: u32 | KLen: u32 | KCsum (4) | Rsvd (4)           │
//! │   VOff: u32 | VLen: u32 | VCsum (4) | Rsvd (4)           │
//! ├──────────────────────────────────────────────────────────┤
//! │ Payload bytes (keys and values, at absolute offsets)     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike the superblock and root index, a page file is not wrapped in
//! the checksummed envelope: its magic sits in-band and the header is
//! checked directly.

use std::path::Path;

use super::{prefix_cmp, MappedFile};
use crate::error::{PgdbError, Result};

/// Magic tag embedded at the start of every page file
pub const PAGE_MAGIC: &[u8; 8] = b"PGDBPAGE";

/// Header size: Magic (8) + NEntries (4) + Reserved (20) = 32 bytes
pub const PAGE_HEADER_SIZE: usize = 32;

/// Size of one index record; identical to the header size
pub const PAGE_INDEX_SIZE: usize = 32;

/// Decoded view of one 32-byte index record.
///
/// The checksum prefixes are the first 4 bytes of the SHA-256 of the key
/// and value payloads; they are recorded by writers but not verified on
/// the read path.
#[derive(Debug, Clone, Copy)]
pub struct PageIndexEntry {
    pub k_offset: u32,
    pub k_len: u32,
    pub k_csum: [u8; 4],
    pub v_offset: u32,
    pub v_len: u32,
    pub v_csum: [u8; 4],
}

/// A page file opened for lookups, backed by its owned mapping
pub struct PageFile {
    map: MappedFile,
    n_entries: u32,
}

impl PageFile {
    /// Open page file `<dir>/<page_id>`.
    ///
    /// Requires, in order: the file holds a full header
    /// ([`PgdbError::PageTooSmall`]), the in-band magic matches
    /// ([`PgdbError::PageMagicMismatch`]), and the file is large enough
    /// for the declared index records ([`PgdbError::PageIndexTruncated`]).
    pub fn open(dir: &Path, page_id: u64) -> Result<Self> {
        let map = MappedFile::open(dir.join(page_id.to_string()))?;

        if map.len() < PAGE_HEADER_SIZE {
            return Err(PgdbError::PageTooSmall);
        }

        let bytes = map.bytes();
        if &bytes[..PAGE_MAGIC.len()] != PAGE_MAGIC {
            return Err(PgdbError::PageMagicMismatch);
        }

        let n_entries = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        let want = PAGE_HEADER_SIZE + n_entries as usize * PAGE_INDEX_SIZE;
        if map.len() < want {
            return Err(PgdbError::PageIndexTruncated);
        }

        Ok(Self { map, n_entries })
    }

    /// Number of index records
    pub fn entry_count(&self) -> u32 {
        self.n_entries
    }

    /// Decode the index record in `slot`, if the slot exists
    pub fn index(&self, slot: usize) -> Option<PageIndexEntry> {
        if slot >= self.n_entries as usize {
            return None;
        }

        let base = PAGE_HEADER_SIZE + slot * PAGE_INDEX_SIZE;
        let rec = &self.map.bytes()[base..base + PAGE_INDEX_SIZE];

        Some(PageIndexEntry {
            k_offset: u32::from_le_bytes(rec[0..4].try_into().unwrap()),
            k_len: u32::from_le_bytes(rec[4..8].try_into().unwrap()),
            k_csum: rec[8..12].try_into().unwrap(),
            v_offset: u32::from_le_bytes(rec[16..20].try_into().unwrap()),
            v_len: u32::from_le_bytes(rec[20..24].try_into().unwrap()),
            v_csum: rec[24..28].try_into().unwrap(),
        })
    }

    /// Key bytes of the record in `slot`.
    ///
    /// `None` if the slot does not exist or the record's offset/length
    /// fall outside the file.
    pub fn key(&self, slot: usize) -> Option<&[u8]> {
        let ent = self.index(slot)?;
        self.payload(ent.k_offset, ent.k_len)
    }

    /// Value bytes of the record in `slot`; same bounds rules as [`Self::key`]
    pub fn value(&self, slot: usize) -> Option<&[u8]> {
        let ent = self.index(slot)?;
        self.payload(ent.v_offset, ent.v_len)
    }

    /// Locate `key` in the index.
    ///
    /// Records are scanned in ascending key order with the shared-prefix
    /// comparison. With `exact_match`, a hit requires the comparison to be
    /// equal *and* the lengths to match; reaching a boundary without that
    /// identity is a miss, never a near-miss record. Without
    /// `exact_match`, the first record at or after `key` is returned, as
    /// an insertion point for future range use.
    ///
    /// A record whose key bytes fall outside the file ends the scan as a
    /// miss; the sorted order beyond it cannot be trusted.
    pub fn find(&self, key: &[u8], exact_match: bool) -> Option<usize> {
        for slot in 0..self.n_entries as usize {
            let stored = self.key(slot)?;

            let cmp = prefix_cmp(key, stored);
            if cmp == std::cmp::Ordering::Greater {
                continue;
            }

            if !exact_match {
                return Some(slot);
            }
            if cmp == std::cmp::Ordering::Equal && key.len() == stored.len() {
                return Some(slot);
            }
            return None;
        }

        None
    }

    fn payload(&self, offset: u32, len: u32) -> Option<&[u8]> {
        let start = offset as usize;
        let end = start.checked_add(len as usize)?;
        self.map.bytes().get(start..end)
    }
}
