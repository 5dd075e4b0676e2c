//! Tests for the superblock manager
//!
//! These tests verify:
//! - Presence probing
//! - Write/read round-trips through the envelope
//! - Atomic replacement via temp file + rename
//! - Verification failures for corrupt or foreign files

use std::fs;

use pgdb::envelope;
use pgdb::storage::{
    have_superblock, read_superblock, write_superblock, Superblock, TableMeta,
    SUPERBLOCK_FILENAME,
};
use pgdb::PgdbError;
use tempfile::TempDir;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_superblock(root_id: u64) -> Superblock {
    Superblock {
        uuid: Uuid::new_v4(),
        tables: vec![TableMeta {
            name: "master".to_string(),
            uuid: Uuid::new_v4(),
            root_id,
        }],
    }
}

// =============================================================================
// Presence Tests
// =============================================================================

#[test]
fn test_have_superblock_on_empty_dir() {
    let dir = TempDir::new().unwrap();
    assert!(!have_superblock(dir.path()));
}

#[test]
fn test_have_superblock_after_write() {
    let dir = TempDir::new().unwrap();
    write_superblock(dir.path(), &sample_superblock(0)).unwrap();

    assert!(have_superblock(dir.path()));
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_write_read_roundtrip() {
    let dir = TempDir::new().unwrap();
    let sb = sample_superblock(3);

    write_superblock(dir.path(), &sb).unwrap();
    let out = read_superblock(dir.path()).unwrap();

    assert_eq!(out.uuid, sb.uuid);
    assert_eq!(out.tables.len(), 1);
    assert_eq!(out.tables[0].name, "master");
    assert_eq!(out.tables[0].uuid, sb.tables[0].uuid);
    assert_eq!(out.tables[0].root_id, 3);
}

#[test]
fn test_table_lookup_by_name() {
    let dir = TempDir::new().unwrap();
    write_superblock(dir.path(), &sample_superblock(0)).unwrap();

    let sb = read_superblock(dir.path()).unwrap();
    assert!(sb.table("master").is_some());
    assert!(sb.table("nonexistent").is_none());
}

// =============================================================================
// Replacement Tests
// =============================================================================

#[test]
fn test_rewrite_replaces_superblock() {
    let dir = TempDir::new().unwrap();

    let first = sample_superblock(0);
    let second = sample_superblock(7);

    write_superblock(dir.path(), &first).unwrap();
    write_superblock(dir.path(), &second).unwrap();

    let out = read_superblock(dir.path()).unwrap();
    assert_eq!(out.uuid, second.uuid);
    assert_eq!(out.tables[0].root_id, 7);
}

#[test]
fn test_rewrite_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();

    write_superblock(dir.path(), &sample_superblock(0)).unwrap();
    write_superblock(dir.path(), &sample_superblock(1)).unwrap();

    let tmp = dir.path().join(format!("{}.tmp", SUPERBLOCK_FILENAME));
    assert!(!tmp.exists());
}

#[test]
fn test_write_fails_if_temp_file_exists() {
    let dir = TempDir::new().unwrap();

    // A stale temp file blocks the exclusive-create
    let tmp = dir.path().join(format!("{}.tmp", SUPERBLOCK_FILENAME));
    fs::write(&tmp, b"stale").unwrap();

    let result = write_superblock(dir.path(), &sample_superblock(0));
    assert!(matches!(result, Err(PgdbError::Io(_))));
}

// =============================================================================
// Verification Failure Tests
// =============================================================================

#[test]
fn test_read_missing_superblock() {
    let dir = TempDir::new().unwrap();

    let result = read_superblock(dir.path());
    assert!(matches!(result, Err(PgdbError::Io(_))));
}

#[test]
fn test_read_corrupted_superblock() {
    let dir = TempDir::new().unwrap();
    write_superblock(dir.path(), &sample_superblock(0)).unwrap();

    // Flip one payload byte on disk
    let path = dir.path().join(SUPERBLOCK_FILENAME);
    let mut bytes = fs::read(&path).unwrap();
    let mid = envelope::HEADER_SIZE + 1;
    bytes[mid] ^= 0x01;
    fs::write(&path, &bytes).unwrap();

    let result = read_superblock(dir.path());
    assert!(matches!(result, Err(PgdbError::ChecksumMismatch)));
}

#[test]
fn test_read_foreign_envelope() {
    let dir = TempDir::new().unwrap();

    // A well-formed envelope with the wrong magic is not a superblock
    let path = dir.path().join(SUPERBLOCK_FILENAME);
    let mut file = fs::File::create(&path).unwrap();
    envelope::wrap(&mut file, b"PGDBROOT", b"not a superblock").unwrap();

    let result = read_superblock(dir.path());
    assert!(matches!(result, Err(PgdbError::MagicMismatch)));
}

#[test]
fn test_read_truncated_superblock() {
    let dir = TempDir::new().unwrap();
    write_superblock(dir.path(), &sample_superblock(0)).unwrap();

    let path = dir.path().join(SUPERBLOCK_FILENAME);
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 10]).unwrap();

    let result = read_superblock(dir.path());
    assert!(matches!(result, Err(PgdbError::TooShortForTrailer)));
}
