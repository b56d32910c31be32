//! ipv6wry - IPv6 Geolocation Lookups against IPDB Databases
//!
//! Resolves IPv6 addresses to location text ("country region" or
//! "country ISP") using the read-only IPDB format published as `ipv6wry.db`.
//!
//! # Quick Start
//!
//! ```no_run
//! use ipv6wry::Database;
//!
//! let db = Database::open("ipv6wry.db")?;
//!
//! let loc = db.lookup("2001:da8:8000::1")?;
//! println!("{} is in {}", loc.ip, loc.area);
//!
//! // Callers that want a value instead of a Result
//! let result = db.search_ip("not-an-address");
//! assert!(!result.is_found());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  IPDB File Format                    │
//! ├──────────────────────────────────────┤
//! │  1. Header (magic, widths, counts)   │
//! │  2. Location table (strings and      │
//! │     redirect markers, deduplicated)  │
//! │  3. Index (sorted 64-bit prefixes +  │
//! │     location pointers)               │
//! └──────────────────────────────────────┘
//!
//!  text ─► address ─► index ─► resolver ─► "中国 北京"
//!          (u64 key)  (binary   (pointer
//!                     search)    chains)
//! ```
//!
//! All reads are positioned reads on a memory map, so a [`Database`] is
//! `Send + Sync` and needs no locking. See [`global`] for a lazily opened
//! process-wide instance.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// IPv6 text to 64-bit search key
pub mod address;
/// Lookup API
pub mod database;
/// Error types for database loading and lookups
pub mod error;
pub mod global;
pub mod header;
pub mod index;
/// Positioned byte reads over a mapped or owned database image
pub mod reader;
pub mod resolver;

#[cfg(test)]
mod fixture;

// Re-exports for Rust consumers

/// Database handle and structured results
pub use crate::database::{Database, Location, LookupResult};

pub use crate::error::{Ipv6WryError, Result};
pub use crate::header::DatabaseHeader;
pub use crate::index::IndexRecord;

/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
