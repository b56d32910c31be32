//! Synthetic IPDB image writer for tests, benches and fuzz targets.
//!
//! Layout produced: `[header][location table][index]`. Table entries are
//! appended first so their offsets are known when records are added.
//!
//! Self-contained on purpose: integration tests include it with `#[path]`.
#![allow(dead_code)]

/// Builds an in-memory IPDB image
pub struct FixtureBuilder {
    offset_width: u8,
    prefix_width: u8,
    version: u16,
    magic: [u8; 4],
    table: Vec<u8>,
    records: Vec<(u64, u64)>,
}

impl FixtureBuilder {
    /// Size of the fixed header
    pub const HEADER_SIZE: u64 = 24;

    /// New builder with the given pointer and prefix widths
    pub fn new(offset_width: u8, prefix_width: u8) -> Self {
        Self {
            offset_width,
            prefix_width,
            version: 1,
            magic: *b"IPDB",
            table: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Builder with the geometry of the published ipv6wry.db (3-byte pointers, 8-byte keys)
    pub fn standard() -> Self {
        Self::new(3, 8)
    }

    /// Override the magic bytes
    pub fn with_magic(mut self, magic: &[u8; 4]) -> Self {
        self.magic = *magic;
        self
    }

    /// File offset the next table entry will land on
    pub fn next_offset(&self) -> u64 {
        Self::HEADER_SIZE + self.table.len() as u64
    }

    /// Append a NUL-terminated string, returning its offset
    pub fn text(&mut self, s: &str) -> u64 {
        let at = self.next_offset();
        self.table.extend_from_slice(s.as_bytes());
        self.table.push(0);
        at
    }

    /// Append a raw two-part location (`first\0second\0`), returning its offset
    pub fn location(&mut self, first: &str, second: &str) -> u64 {
        let at = self.text(first);
        self.text(second);
        at
    }

    /// Append a redirect marker (`tag` then pointer), returning its offset
    pub fn redirect(&mut self, tag: u8, target: u64) -> u64 {
        let at = self.next_offset();
        self.table.push(tag);
        self.push_uint(target, self.offset_width);
        at
    }

    /// Append raw bytes, returning their offset
    pub fn raw(&mut self, bytes: &[u8]) -> u64 {
        let at = self.next_offset();
        self.table.extend_from_slice(bytes);
        at
    }

    /// Add an index record; records must be added in ascending prefix order
    pub fn record(&mut self, prefix: u64, location_offset: u64) -> &mut Self {
        self.records.push((prefix, location_offset));
        self
    }

    /// Offset the index will start at once built
    pub fn index_base(&self) -> u64 {
        self.next_offset()
    }

    /// Serialize the image
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.magic);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.push(self.offset_width);
        out.push(self.prefix_width);
        out.extend_from_slice(&(self.records.len() as u64).to_le_bytes());
        out.extend_from_slice(&self.index_base().to_le_bytes());
        out.extend_from_slice(&self.table);
        for &(prefix, location) in &self.records {
            write_uint(&mut out, prefix, self.prefix_width);
            write_uint(&mut out, location, self.offset_width);
        }
        out
    }

    fn push_uint(&mut self, value: u64, width: u8) {
        write_uint(&mut self.table, value, width);
    }
}

fn write_uint(out: &mut Vec<u8>, value: u64, width: u8) {
    out.extend_from_slice(&value.to_le_bytes()[..width as usize]);
}

/// Two-record database from the end-to-end scenario:
/// `2001::/16 -> "CountryA CityA"`, `2002::/16 -> "CountryB CityB"`
pub fn two_record_db() -> Vec<u8> {
    let mut fx = FixtureBuilder::standard();
    let a = fx.location("CountryA", "CityA");
    let b = fx.location("CountryB", "CityB");
    fx.record(0x2001_0000_0000_0000, a);
    fx.record(0x2002_0000_0000_0000, b);
    fx.build()
}

/// Database exercising every redirect form, keyed by the top 16 bits:
///
/// - `1000::` raw `"中国 北京"` parts
/// - `2000::` tag 2 country, raw ISP afterwards (`"中国 电信"`)
/// - `3000::` tag 1 to a shared compound entry (`"中国 北京"`)
/// - `4000::` tag 1 to an entry whose country is tag 2 and ISP tag 2 (`"日本 东京"`)
/// - `5000::` tag 2 with a zero pointer
/// - `6000::` sentinel end-of-range record
pub fn redirect_db() -> Vec<u8> {
    let mut fx = FixtureBuilder::standard();
    let china = fx.text("中国");
    let beijing_compound = fx.location("中国", "北京");
    let japan = fx.text("日本");
    let tokyo = fx.text("东京");

    let raw = fx.location("中国", "北京");

    let telecom_entry = fx.redirect(2, china);
    fx.text("电信");

    let shared = fx.redirect(1, beijing_compound);

    let japan_compound = fx.redirect(2, japan);
    fx.redirect(2, tokyo);
    let nested = fx.redirect(1, japan_compound);

    let dead = fx.redirect(2, 0);
    let end = fx.location("", "");

    fx.record(0x1000_0000_0000_0000, raw);
    fx.record(0x2000_0000_0000_0000, telecom_entry);
    fx.record(0x3000_0000_0000_0000, shared);
    fx.record(0x4000_0000_0000_0000, nested);
    fx.record(0x5000_0000_0000_0000, dead);
    fx.record(0x6000_0000_0000_0000, end);
    fx.build()
}
