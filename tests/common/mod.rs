//! Shared helpers for integration tests

#![allow(dead_code)]

#[path = "../../src/fixture.rs"]
mod fixture;

pub use fixture::*;

use std::io::Write;
use tempfile::NamedTempFile;

/// Write a database image to a temp file
pub fn write_db(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".db").unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
