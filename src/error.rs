use std::fmt;

/// Result type alias for ipv6wry operations
pub type Result<T> = std::result::Result<T, Ipv6WryError>;

/// Main error type for database loading and lookups
///
/// Load-time errors (`DatabaseUnreadable`, `InvalidFormat`) leave no usable
/// database behind. Everything else is per-lookup and never affects later calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ipv6WryError {
    /// Database file missing or unreadable
    DatabaseUnreadable(String),

    /// Magic bytes are not `IPDB`
    InvalidFormat,

    /// Path override attempted after the shared instance was initialized
    DatabaseRepathNotAllowed,

    /// Input text is not an IPv6 literal
    NotIpv6Format,

    /// No covering range, or a redirect pointer of zero
    UnknownAddress,

    /// An index computation fell outside `[0, count)`
    IndexOutOfRange {
        /// Offending index
        index: u64,
        /// Number of index records in the database
        count: u64,
    },

    /// Structural damage in a file whose magic matched
    Corrupt(String),

    /// Read outside the byte source or OS-level failure
    Io(String),
}

impl fmt::Display for Ipv6WryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ipv6WryError::DatabaseUnreadable(_) => write!(f, "Failed open ip database file!"),
            Ipv6WryError::InvalidFormat => {
                write!(f, "The type of ip database file is not \"IPDB\".")
            }
            Ipv6WryError::DatabaseRepathNotAllowed => write!(
                f,
                "The Path of ip database file can't change after instance."
            ),
            Ipv6WryError::NotIpv6Format => write!(f, "Input ip address is not in IPv6 format."),
            Ipv6WryError::UnknownAddress => write!(f, "Unknown Address."),
            Ipv6WryError::IndexOutOfRange { .. } => write!(f, "Index out of range"),
            Ipv6WryError::Corrupt(msg) => write!(f, "Corrupt ip database: {}", msg),
            Ipv6WryError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Ipv6WryError {}

impl From<std::io::Error> for Ipv6WryError {
    fn from(err: std::io::Error) -> Self {
        Ipv6WryError::Io(err.to_string())
    }
}
