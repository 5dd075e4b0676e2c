//! Checksummed file envelope codec
//!
//! Every metadata file in a database (the superblock and each root index)
//! is wrapped in the same integrity envelope:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Header (16 bytes)                                        │
//! │   Magic (8) | PayloadLen: u32 LE (4) | Reserved (4)      │
//! ├──────────────────────────────────────────────────────────┤
//! │ Payload (PayloadLen bytes)                               │
//! ├──────────────────────────────────────────────────────────┤
//! │ Trailer (32 bytes)                                       │
//! │   SHA-256 over header ‖ payload                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Page files carry their magic in-band instead (their header layout is
//! fixed and checked directly by [`crate::storage::PageFile`]).

use std::io::Write;

use sha2::{Digest, Sha256};

use crate::error::{PgdbError, Result};

/// Length of the magic tag at the start of every envelope
pub const MAGIC_SIZE: usize = 8;

/// Header size: Magic (8) + PayloadLen (4) + Reserved (4) = 16 bytes
pub const HEADER_SIZE: usize = 16;

/// Trailer size: one SHA-256 digest
pub const TRAILER_SIZE: usize = 32;

/// Wrap `payload` in an envelope and write it to `sink` as one write.
///
/// The whole envelope (header, payload, trailer) is assembled in memory
/// and emitted with a single write call; a torn write leaves a short
/// file, which `verify` reports as a length failure.
pub fn wrap(sink: &mut impl Write, magic: &[u8; MAGIC_SIZE], payload: &[u8]) -> Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| PgdbError::PayloadTooLarge)?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len() + TRAILER_SIZE);
    buf.extend_from_slice(magic);
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // reserved
    buf.extend_from_slice(payload);

    // Trailer covers header ‖ payload, which is exactly what's in buf so far
    let digest = Sha256::digest(&buf);
    buf.extend_from_slice(&digest);

    sink.write_all(&buf)?;
    Ok(())
}

/// Verify an envelope and return a view of its payload.
///
/// Validations run in a fixed order so each failure mode reports a
/// distinct error:
/// 1. [`PgdbError::TooShortForHeader`]: not enough bytes for the header
/// 2. [`PgdbError::MagicMismatch`]: the 8-byte tag differs
/// 3. [`PgdbError::TooShortForData`]: declared payload exceeds the file
/// 4. [`PgdbError::TooShortForTrailer`]: header + payload + trailer
///    exceeds the file
/// 5. [`PgdbError::ChecksumMismatch`]: recomputed SHA-256 differs
pub fn verify<'a>(magic: &[u8; MAGIC_SIZE], bytes: &'a [u8]) -> Result<&'a [u8]> {
    // is header present?
    if bytes.len() < HEADER_SIZE {
        return Err(PgdbError::TooShortForHeader);
    }

    // magic numbers must match
    if &bytes[..MAGIC_SIZE] != magic {
        return Err(PgdbError::MagicMismatch);
    }

    // encapsulated data length
    let len = u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize;
    if len > bytes.len() {
        return Err(PgdbError::TooShortForData);
    }

    // total == header + data + trailer
    let want_len = HEADER_SIZE + len + TRAILER_SIZE;
    if want_len > bytes.len() {
        return Err(PgdbError::TooShortForTrailer);
    }

    // verify hash(header ‖ data)
    let digest = Sha256::digest(&bytes[..HEADER_SIZE + len]);
    if digest[..] != bytes[HEADER_SIZE + len..want_len] {
        return Err(PgdbError::ChecksumMismatch);
    }

    Ok(&bytes[HEADER_SIZE..HEADER_SIZE + len])
}
