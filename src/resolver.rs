//! Location table decoding
//!
//! Location entries are either literal NUL-terminated UTF-8 text or a one-byte
//! redirect tag followed by an `offset_width` pointer:
//!
//! - tag `1`: redirect to an entry that is itself compound (country + region/ISP).
//!   Nothing is appended after it at this level.
//! - tag `2`: redirect to a single part; when a compound is being assembled the
//!   second part follows the pointer.
//! - anything else: the first byte of the literal text.
//!
//! A zero pointer means the address has no known location.

use crate::error::{Ipv6WryError, Result};
use crate::header::DatabaseHeader;
use crate::reader::ByteReader;

/// Redirect to a compound entry
pub const TAG_REDIRECT_COMPOUND: u8 = 1;

/// Redirect to a single part
pub const TAG_REDIRECT_SINGLE: u8 = 2;

/// Maximum nesting of redirects and part reads before giving up.
///
/// Well-formed files nest at most a few levels; pointers are untrusted and may
/// form cycles.
pub const MAX_REDIRECT_DEPTH: usize = 16;

/// Resolves location-table offsets to display text
pub struct LocationResolver<'a> {
    reader: &'a ByteReader,
    header: &'a DatabaseHeader,
}

impl<'a> LocationResolver<'a> {
    /// Create a resolver over `reader` using `header` geometry
    pub fn new(reader: &'a ByteReader, header: &'a DatabaseHeader) -> Self {
        Self { reader, header }
    }

    /// Resolve the entry at `offset`.
    ///
    /// With `compound` set, a second part following the first is appended with
    /// a single space (unless the entry was a tag-1 redirect, whose target
    /// already carries both parts).
    pub fn resolve(&self, offset: u64, compound: bool) -> Result<String> {
        self.resolve_at(offset, compound, 0)
    }

    fn resolve_at(&self, offset: u64, compound: bool, depth: usize) -> Result<String> {
        if depth >= MAX_REDIRECT_DEPTH {
            return Err(Ipv6WryError::Corrupt(format!(
                "Location redirects nest deeper than {} at offset {}",
                MAX_REDIRECT_DEPTH, offset
            )));
        }

        let tag = self.reader.read_uint(offset, 1)? as u8;
        let (first, next) = match tag {
            TAG_REDIRECT_COMPOUND | TAG_REDIRECT_SINGLE => {
                let pointer = self
                    .reader
                    .read_uint(offset.saturating_add(1), self.header.offset_width)?;
                if pointer == 0 {
                    return Err(Ipv6WryError::UnknownAddress);
                }
                let part = self.resolve_at(pointer, tag == TAG_REDIRECT_COMPOUND, depth + 1)?;
                (part, offset.saturating_add(1 + self.header.offset_width as u64))
            }
            _ => {
                let bytes = self.reader.read_cstr(offset)?;
                let next = offset.saturating_add(bytes.len() as u64 + 1);
                (String::from_utf8_lossy(bytes).into_owned(), next)
            }
        };

        if !compound || tag == TAG_REDIRECT_COMPOUND {
            return Ok(first);
        }

        let second = self.resolve_at(next, false, depth + 1)?;
        log::trace!(
            "location @{}: {:?} + {:?} (tag {})",
            offset,
            first,
            second,
            tag
        );
        if !first.is_empty() && !second.is_empty() {
            Ok(format!("{} {}", first, second))
        } else {
            Ok(first)
        }
    }
}
