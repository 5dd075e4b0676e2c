//! # pgdb
//!
//! An embedded, directory-backed key-value store with:
//! - A LevelDB-style call surface (open/get/close/destroy)
//! - A checksummed on-disk envelope format (SHA-256 trailer)
//! - Memory-mapped, read-only file access
//! - Two-level sorted lookup: root index → page file
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Database                              │
//! │              (open / create / close / destroy)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ get(key)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Root Index                              │
//! │          (sorted key-range boundaries → page id)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ candidate page id
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Page File                               │
//! │        (sorted key/value index + payload, mmap'd)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!               ┌───────▼───────┐
//!               │  Mapped File  │
//!               │  + Envelope   │
//!               └───────────────┘
//! ```
//!
//! The write path (put/delete/batch), iterators, and snapshots are
//! declared as placeholder seams only; creation seeds an empty database
//! that point reads operate on.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod envelope;
pub mod storage;
pub mod db;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use db::{Database, WriteBatch};
pub use error::{PgdbError, Result};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of pgdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
