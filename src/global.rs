//! Process-wide shared database
//!
//! For callers that want one database per process without threading a handle
//! around. The path may be configured with [`set_db_path`] until the first
//! call to [`instance`] (or [`search_ip`]) opens the file; after that the path
//! is frozen and further changes fail with `DatabaseRepathNotAllowed`.
//!
//! ```no_run
//! use ipv6wry::global;
//!
//! global::set_db_path("/var/lib/ipv6wry/ipv6wry.db")?;
//! let result = global::search_ip("2001:da8::1");
//! println!("{}", serde_json::to_string(&result)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::database::{Database, LookupResult};
use crate::error::{Ipv6WryError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Database path used when none was configured
pub const DEFAULT_DB_PATH: &str = "ipv6wry.db";

/// Configured path; the lock doubles as the initialization gate
static DB_PATH: Mutex<Option<PathBuf>> = Mutex::new(None);

static INSTANCE: OnceLock<Database> = OnceLock::new();

fn lock_path() -> MutexGuard<'static, Option<PathBuf>> {
    // Nothing inside the lock can be left half-written
    DB_PATH.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Configure the database path for the shared instance.
///
/// Fails with `DatabaseRepathNotAllowed` once the instance exists, and with
/// `DatabaseUnreadable` if `path` cannot be opened for reading. A later call
/// before initialization replaces an earlier one.
pub fn set_db_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut configured = lock_path();

    if INSTANCE.get().is_some() {
        return Err(Ipv6WryError::DatabaseRepathNotAllowed);
    }

    File::open(path).map_err(|e| {
        Ipv6WryError::DatabaseUnreadable(format!("Failed to open {}: {}", path.display(), e))
    })?;

    *configured = Some(path.to_path_buf());
    Ok(())
}

/// The path the shared instance was (or will be) opened from
pub fn db_path() -> PathBuf {
    lock_path()
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

/// True once the shared instance has been opened
pub fn is_initialized() -> bool {
    INSTANCE.get().is_some()
}

/// The shared database, opening it on first use.
///
/// Concurrent first calls open the file exactly once. A failed open leaves
/// the instance uninitialized, so the path can still be corrected.
pub fn instance() -> Result<&'static Database> {
    if let Some(db) = INSTANCE.get() {
        return Ok(db);
    }

    let configured = lock_path();
    if let Some(db) = INSTANCE.get() {
        return Ok(db);
    }

    let path = configured
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
    let db = Database::open(&path)?;
    log::debug!("shared instance initialized from {}", path.display());
    Ok(INSTANCE.get_or_init(|| db))
}

/// Look up `text` on the shared database.
///
/// Never fails: load and lookup errors alike come back as
/// [`LookupResult::Failed`].
pub fn search_ip(text: &str) -> LookupResult {
    match instance() {
        Ok(db) => db.search_ip(text),
        Err(e) => LookupResult::Failed {
            error: e.to_string(),
        },
    }
}
