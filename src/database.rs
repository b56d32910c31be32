//! Lookup API
//!
//! [`Database`] owns the byte source and parsed header and runs the full
//! pipeline: search key, index search, range clamp, location resolution.
//! It holds no mutable state, so one instance can be shared across threads.

use crate::address::{extract_key, search_key};
use crate::error::{Ipv6WryError, Result};
use crate::header::DatabaseHeader;
use crate::index::{IndexRecord, IndexSearcher};
use crate::reader::ByteReader;
use crate::resolver::LocationResolver;
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;
use std::path::Path;

/// A resolved address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// The address as queried
    pub ip: String,
    /// Location text, e.g. `"中国 北京"`
    pub area: String,
}

/// Structured lookup outcome for callers that must not see a `Result`
///
/// Serializes untagged: `{"ip": .., "area": ..}` or `{"error": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LookupResult {
    /// Address resolved
    Found(Location),
    /// Lookup failed; `error` is the error's display message
    Failed {
        /// Error message
        error: String,
    },
}

impl LookupResult {
    /// True when the lookup resolved
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found(_))
    }

    /// The result as a JSON object: `{ip, area}` or `{error}`
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        match self {
            LookupResult::Found(loc) => {
                map.insert("ip".to_string(), loc.ip.clone().into());
                map.insert("area".to_string(), loc.area.clone().into());
            }
            LookupResult::Failed { error } => {
                map.insert("error".to_string(), error.clone().into());
            }
        }
        map
    }
}

impl From<Result<Location>> for LookupResult {
    fn from(result: Result<Location>) -> Self {
        match result {
            Ok(loc) => LookupResult::Found(loc),
            Err(e) => LookupResult::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Read-only IPDB database
///
/// # Examples
///
/// ```no_run
/// use ipv6wry::Database;
///
/// let db = Database::open("ipv6wry.db")?;
/// let loc = db.lookup("2001:da8::1")?;
/// println!("{} => {}", loc.ip, loc.area);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Database {
    reader: ByteReader,
    header: DatabaseHeader,
}

impl Database {
    /// Open a database file using memory mapping
    ///
    /// Fails with `DatabaseUnreadable` if the file cannot be opened and
    /// `InvalidFormat` if it is not an IPDB file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let db = Self::from_reader(ByteReader::open(path)?)?;
        log::debug!(
            "opened {} (v{}, {} records)",
            path.display(),
            db.header.version,
            db.header.record_count
        );
        Ok(db)
    }

    /// Create database from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(ByteReader::from_bytes(data))
    }

    fn from_reader(reader: ByteReader) -> Result<Self> {
        let header = DatabaseHeader::load(&reader)?;
        log::debug!(
            "IPDB geometry: offset_width={} prefix_width={} records={} index_base={:#x} size={}",
            header.offset_width,
            header.prefix_width,
            header.record_count,
            header.index_base,
            reader.len()
        );
        Ok(Self { reader, header })
    }

    /// Parsed header geometry
    pub fn header(&self) -> &DatabaseHeader {
        &self.header
    }

    /// Number of index records
    pub fn record_count(&self) -> u64 {
        self.header.record_count
    }

    /// Size of the underlying file in bytes
    pub fn size(&self) -> u64 {
        self.reader.len()
    }

    /// Look up an IPv6 address given as text
    pub fn lookup(&self, text: &str) -> Result<Location> {
        let key = extract_key(text)?;
        let area = self.lookup_key(key)?;
        Ok(Location {
            ip: text.to_string(),
            area,
        })
    }

    /// Look up a parsed IPv6 address, returning the area text
    pub fn lookup_addr(&self, addr: Ipv6Addr) -> Result<String> {
        self.lookup_key(search_key(addr)?)
    }

    /// Resolve the area for a 64-bit search key
    pub fn lookup_key(&self, key: u64) -> Result<String> {
        let searcher = IndexSearcher::new(&self.reader, &self.header);
        let found = searcher.find(key)?.ok_or(Ipv6WryError::UnknownAddress)?;
        let index = searcher.clamp(found);
        log::trace!("key {:#018x}: record {} (clamped {})", key, found, index);
        self.area_of(index)
    }

    /// Resolve the area text of index record `index` directly
    pub fn area_of(&self, index: u64) -> Result<String> {
        let searcher = IndexSearcher::new(&self.reader, &self.header);
        let location_offset = searcher.location_offset_at(index)?;
        LocationResolver::new(&self.reader, &self.header).resolve(location_offset, true)
    }

    /// Decode index record `index`
    pub fn record(&self, index: u64) -> Result<IndexRecord> {
        IndexSearcher::new(&self.reader, &self.header).record(index)
    }

    /// Look up `text`, folding any failure into the structured result
    pub fn search_ip(&self, text: &str) -> LookupResult {
        self.lookup(text).into()
    }
}
