//! IPDB file header
//!
//! The first 24 bytes of an IPDB file describe the index geometry:
//!
//! ```text
//! 0x00  [u8; 4]  magic "IPDB"
//! 0x04  u16 LE   format version
//! 0x06  u8       offset field width (pointers into the location table)
//! 0x07  u8       prefix field width (sorted IPv6 prefix keys)
//! 0x08  u64 LE   index record count
//! 0x10  u64 LE   byte offset of the first index record
//! ```
//!
//! Field widths are taken as declared. A file whose magic matches but whose
//! geometry is nonsense loads fine and fails later with `Corrupt`, `Io` or
//! `IndexOutOfRange` from the individual lookups.

use crate::error::{Ipv6WryError, Result};
use crate::reader::ByteReader;
use serde::Serialize;
use zerocopy::byteorder::little_endian::{U16, U64};
use zerocopy::{FromBytes, Immutable, KnownLayout};

/// Magic bytes identifying an IPDB file
pub const MAGIC: &[u8; 4] = b"IPDB";

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = std::mem::size_of::<RawHeader>();

/// On-disk header layout
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout)]
struct RawHeader {
    magic: [u8; 4],
    version: U16,
    offset_width: u8,
    prefix_width: u8,
    record_count: U64,
    index_base: U64,
}

/// Parsed header with the derived index geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatabaseHeader {
    /// Format version (informational)
    pub version: u16,
    /// Width in bytes of pointer fields
    pub offset_width: u8,
    /// Width in bytes of the prefix key in each index record
    pub prefix_width: u8,
    /// Number of index records
    pub record_count: u64,
    /// Byte offset of index record 0
    pub index_base: u64,
}

impl DatabaseHeader {
    /// Validate the magic and decode the geometry fields.
    pub fn load(reader: &ByteReader) -> Result<Self> {
        let magic = reader
            .read_bytes(0, MAGIC.len())
            .map_err(|_| Ipv6WryError::InvalidFormat)?;
        if magic != MAGIC {
            return Err(Ipv6WryError::InvalidFormat);
        }

        let (raw, _) = RawHeader::read_from_prefix(reader.as_slice()).map_err(|_| {
            Ipv6WryError::Corrupt(format!(
                "Header truncated: {} bytes (need {})",
                reader.len(),
                HEADER_SIZE
            ))
        })?;

        Ok(Self {
            version: raw.version.get(),
            offset_width: raw.offset_width,
            prefix_width: raw.prefix_width,
            record_count: raw.record_count.get(),
            index_base: raw.index_base.get(),
        })
    }

    /// Bytes per index record
    pub fn record_stride(&self) -> u64 {
        self.offset_width as u64 + self.prefix_width as u64
    }

    /// Byte offset of index record `index`.
    ///
    /// Fails with `IndexOutOfRange` unless `index < record_count`.
    pub fn record_address(&self, index: u64) -> Result<u64> {
        if index >= self.record_count {
            return Err(Ipv6WryError::IndexOutOfRange {
                index,
                count: self.record_count,
            });
        }
        index
            .checked_mul(self.record_stride())
            .and_then(|rel| rel.checked_add(self.index_base))
            .ok_or_else(|| {
                Ipv6WryError::Corrupt(format!("Address of index record {} overflows", index))
            })
    }
}
