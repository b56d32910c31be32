//! Sorted index search
//!
//! Index records are `prefix_width` bytes of sorted IPv6 prefix key followed by
//! `offset_width` bytes of location-table pointer. A record starts a range that
//! ends where the next record begins, so the last record only closes the final
//! range and is never a match target of its own (see [`IndexSearcher::clamp`]).

use crate::error::Result;
use crate::header::DatabaseHeader;
use crate::reader::ByteReader;
use serde::Serialize;

/// One decoded index record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexRecord {
    /// Position in the index
    pub index: u64,
    /// Range start key (top 64 bits of the first address)
    pub prefix: u64,
    /// Pointer to the record's location entry
    pub location_offset: u64,
}

/// Binary search over the index described by a header
pub struct IndexSearcher<'a> {
    reader: &'a ByteReader,
    header: &'a DatabaseHeader,
}

impl<'a> IndexSearcher<'a> {
    /// Create a searcher over `reader` using `header` geometry
    pub fn new(reader: &'a ByteReader, header: &'a DatabaseHeader) -> Self {
        Self { reader, header }
    }

    /// Prefix key of record `index`
    pub fn prefix_at(&self, index: u64) -> Result<u64> {
        let addr = self.header.record_address(index)?;
        self.reader.read_uint(addr, self.header.prefix_width)
    }

    /// Location pointer of record `index`
    pub fn location_offset_at(&self, index: u64) -> Result<u64> {
        let addr = self.header.record_address(index)?;
        self.reader.read_uint(
            addr.saturating_add(self.header.prefix_width as u64),
            self.header.offset_width,
        )
    }

    /// Decode record `index`
    pub fn record(&self, index: u64) -> Result<IndexRecord> {
        Ok(IndexRecord {
            index,
            prefix: self.prefix_at(index)?,
            location_offset: self.location_offset_at(index)?,
        })
    }

    /// Find the greatest index whose prefix key is `<= key`.
    ///
    /// Returns `Ok(None)` when `key` sorts below every record. Equal keys
    /// return the first probed match, so with duplicate prefixes any record
    /// of the run may come back.
    pub fn find(&self, key: u64) -> Result<Option<u64>> {
        if self.header.record_count == 0 {
            return Ok(None);
        }

        let mut lo = 0u64;
        let mut hi = self.header.record_count - 1;

        while lo < hi {
            if hi - lo <= 1 {
                if self.prefix_at(lo)? > key {
                    return Ok(None);
                } else if self.prefix_at(hi)? <= key {
                    return Ok(Some(hi));
                } else {
                    return Ok(Some(lo));
                }
            }

            // hi - lo >= 2, so lo < mid < hi
            let mid = lo + (hi - lo) / 2;
            let data = self.prefix_at(mid)?;
            if data > key {
                hi = mid - 1;
            } else if data < key {
                // lo stays a candidate: key(mid) < key is all we know
                lo = mid;
            } else {
                return Ok(Some(mid));
            }
        }

        // Window collapsed to a single record: a one-record index, or `hi`
        // stepped down onto `lo`. Everything past `lo` is already known to be
        // greater than `key`.
        if self.prefix_at(lo)? <= key {
            Ok(Some(lo))
        } else {
            Ok(None)
        }
    }

    /// Clamp a match so it names the start of a complete range.
    ///
    /// The final record only terminates the last range, so matches are pulled
    /// back to `record_count - 2`. A single-record index clamps to 0.
    pub fn clamp(&self, index: u64) -> u64 {
        index.min(self.header.record_count.saturating_sub(2))
    }
}
