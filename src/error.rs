//! Error types for pgdb
//!
//! Provides a unified error type for all operations.
//!
//! A missing key is *not* an error: lookups report absence as `Ok(None)`.
//! Everything here is a genuine failure: an OS error, a file that fails
//! format validation, or a misuse of the database lifecycle.

use thiserror::Error;

/// Result type alias using PgdbError
pub type Result<T> = std::result::Result<T, PgdbError>;

/// Unified error type for pgdb operations
#[derive(Debug, Error)]
pub enum PgdbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Envelope Validation Errors
    // -------------------------------------------------------------------------
    #[error("file too short for header")]
    TooShortForHeader,

    #[error("magic mismatch")]
    MagicMismatch,

    #[error("file too short for data")]
    TooShortForData,

    #[error("file too short for data and metadata")]
    TooShortForTrailer,

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("payload too large for envelope")]
    PayloadTooLarge,

    // -------------------------------------------------------------------------
    // Mapped File Errors
    // -------------------------------------------------------------------------
    #[error("file too small for header")]
    FileTooSmall,

    // -------------------------------------------------------------------------
    // Page File Errors
    // -------------------------------------------------------------------------
    #[error("pagefile too small")]
    PageTooSmall,

    #[error("pagefile magic mismatch")]
    PageMagicMismatch,

    #[error("pagefile too small for index")]
    PageIndexTruncated,

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Lifecycle / Configuration Errors
    // -------------------------------------------------------------------------
    #[error("database missing")]
    DatabaseMissing,

    #[error("database already exists")]
    DatabaseExists,

    #[error("not a directory")]
    NotADirectory,

    #[error("database is readonly")]
    ReadOnly,

    #[error("not a pgdb database")]
    NotAPgdbDatabase,

    #[error("table capacity exceeded")]
    TableCapacity,

    #[error("unknown table: {0}")]
    UnknownTable(String),
}
