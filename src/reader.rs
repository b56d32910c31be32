//! Positioned, read-only access to a database byte source.
//!
//! The database is either memory-mapped or held as an owned buffer. Every read
//! names its own offset, so there is no shared cursor and a single
//! [`ByteReader`] can serve any number of threads at once.
//!
//! # Example
//!
//! ```
//! use ipv6wry::reader::ByteReader;
//!
//! let reader = ByteReader::from_bytes(vec![0x01, 0x02, 0x03, b'h', b'i', 0]);
//! assert_eq!(reader.read_uint(0, 3)?, 0x030201);
//! assert_eq!(reader.read_cstr(3)?, b"hi");
//! # Ok::<(), ipv6wry::Ipv6WryError>(())
//! ```

use crate::error::{Ipv6WryError, Result};
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::path::Path;

/// Storage for database bytes - either owned or memory-mapped
enum ByteSource {
    Owned(Vec<u8>),
    Mmap(Mmap),
}

impl ByteSource {
    fn as_slice(&self) -> &[u8] {
        match self {
            ByteSource::Owned(v) => v.as_slice(),
            ByteSource::Mmap(m) => &m[..],
        }
    }
}

/// Read-only byte source with bounds-checked positioned reads.
pub struct ByteReader {
    source: ByteSource,
}

impl ByteReader {
    /// Memory-map a database file.
    ///
    /// Open and map failures are reported as `DatabaseUnreadable`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Ipv6WryError::DatabaseUnreadable(format!("Failed to open {}: {}", path.display(), e))
        })?;

        // SAFETY: the mapping is read-only and the format is append-only; a
        // concurrent external writer can change bytes under us but cannot make
        // the slice dangle while the mapping is alive.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| {
            Ipv6WryError::DatabaseUnreadable(format!("Failed to mmap {}: {}", path.display(), e))
        })?;

        Ok(Self {
            source: ByteSource::Mmap(mmap),
        })
    }

    /// Wrap an in-memory database image.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            source: ByteSource::Owned(data),
        }
    }

    /// Total size of the byte source.
    pub fn len(&self) -> u64 {
        self.as_slice().len() as u64
    }

    /// True when the source holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// The whole source as a slice.
    pub fn as_slice(&self) -> &[u8] {
        self.source.as_slice()
    }

    /// Read `length` bytes starting at `offset`.
    pub fn read_bytes(&self, offset: u64, length: usize) -> Result<&[u8]> {
        let data = self.as_slice();
        let start = self.checked_offset(offset)?;
        let end = start
            .checked_add(length)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| {
                Ipv6WryError::Io(format!(
                    "Read of {} bytes at offset {} exceeds database size {}",
                    length,
                    offset,
                    data.len()
                ))
            })?;
        Ok(&data[start..end])
    }

    /// Read a little-endian unsigned integer of `width` bytes, zero-extended.
    ///
    /// Widths 1 through 8 are accepted.
    pub fn read_uint(&self, offset: u64, width: u8) -> Result<u64> {
        if width == 0 || width > 8 {
            return Err(Ipv6WryError::Corrupt(format!(
                "Unsupported integer width {} at offset {}",
                width, offset
            )));
        }
        let bytes = self.read_bytes(offset, width as usize)?;
        let mut buf = [0u8; 8];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    /// Read a NUL-terminated byte string starting at `offset`.
    ///
    /// The terminator is not included in the returned slice.
    pub fn read_cstr(&self, offset: u64) -> Result<&[u8]> {
        let data = self.as_slice();
        let start = self.checked_offset(offset)?;
        if start >= data.len() {
            return Err(Ipv6WryError::Io(format!(
                "String offset {} exceeds database size {}",
                offset,
                data.len()
            )));
        }
        let tail = &data[start..];
        let len = memchr::memchr(0, tail).ok_or_else(|| {
            Ipv6WryError::Corrupt(format!("Unterminated string at offset {}", offset))
        })?;
        Ok(&tail[..len])
    }

    fn checked_offset(&self, offset: u64) -> Result<usize> {
        usize::try_from(offset).map_err(|_| {
            Ipv6WryError::Io(format!("Offset {} does not fit in address space", offset))
        })
    }
}

impl fmt::Debug for ByteReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.source {
            ByteSource::Owned(_) => "owned",
            ByteSource::Mmap(_) => "mmap",
        };
        f.debug_struct("ByteReader")
            .field("source", &kind)
            .field("size", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(data: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_uint_widths() {
        let reader = ByteReader::from_bytes(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(reader.read_uint(0, 1).unwrap(), 0x01);
        assert_eq!(reader.read_uint(0, 2).unwrap(), 0x0201);
        assert_eq!(reader.read_uint(0, 3).unwrap(), 0x030201);
        assert_eq!(reader.read_uint(0, 4).unwrap(), 0x04030201);
        assert_eq!(reader.read_uint(1, 8).unwrap(), 0x0908070605040302);
    }

    #[test]
    fn test_read_uint_is_unsigned() {
        // High bit set must not sign-extend
        let reader = ByteReader::from_bytes(vec![0xff, 0xff, 0xff]);
        assert_eq!(reader.read_uint(0, 2).unwrap(), 0xffff);
        assert_eq!(reader.read_uint(0, 3).unwrap(), 0xff_ffff);
    }

    #[test]
    fn test_read_uint_rejects_bad_width() {
        let reader = ByteReader::from_bytes(vec![0; 16]);
        assert!(matches!(reader.read_uint(0, 0), Err(Ipv6WryError::Corrupt(_))));
        assert!(matches!(reader.read_uint(0, 9), Err(Ipv6WryError::Corrupt(_))));
    }

    #[test]
    fn test_out_of_bounds_reads() {
        let reader = ByteReader::from_bytes(vec![0; 4]);
        assert!(reader.read_bytes(0, 4).is_ok());
        assert!(matches!(reader.read_bytes(1, 4), Err(Ipv6WryError::Io(_))));
        assert!(matches!(reader.read_bytes(u64::MAX, 1), Err(Ipv6WryError::Io(_))));
        assert!(matches!(reader.read_uint(2, 4), Err(Ipv6WryError::Io(_))));
        assert!(matches!(reader.read_cstr(4), Err(Ipv6WryError::Io(_))));
    }

    #[test]
    fn test_read_cstr() {
        let reader = ByteReader::from_bytes(b"abc\0\0xyz".to_vec());
        assert_eq!(reader.read_cstr(0).unwrap(), b"abc");
        assert_eq!(reader.read_cstr(1).unwrap(), b"bc");
        assert_eq!(reader.read_cstr(4).unwrap(), b"");
        assert!(matches!(reader.read_cstr(5), Err(Ipv6WryError::Corrupt(_))));
    }

    #[test]
    fn test_open_mmap_file() {
        let file = create_test_file(b"IPDB\0\0\x03\x08");
        let reader = ByteReader::open(file.path()).unwrap();
        assert_eq!(reader.len(), 8);
        assert_eq!(reader.read_bytes(0, 4).unwrap(), b"IPDB");
        assert_eq!(reader.read_uint(6, 1).unwrap(), 3);
    }

    #[test]
    fn test_nonexistent_file() {
        let result = ByteReader::open("/nonexistent/path/to/ipv6wry.db");
        assert!(matches!(result, Err(Ipv6WryError::DatabaseUnreadable(_))));
    }
}
