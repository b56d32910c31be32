//! IPv6 text to search key
//!
//! The index is keyed by the top 64 bits of an address: the first four
//! 16-bit groups folded big-group-first into a `u64`.

use crate::error::{Ipv6WryError, Result};
use std::net::Ipv6Addr;

/// Parse `text` as an IPv6 literal and return its search key.
///
/// Accepts standard colon-hex notation with at most one `::`, including an
/// embedded dotted-quad tail. Bare IPv4, zone suffixes and surrounding
/// whitespace are rejected with `NotIpv6Format`.
///
/// # Example
///
/// ```
/// use ipv6wry::address::extract_key;
///
/// assert_eq!(extract_key("2001:db8::1")?, 0x2001_0db8_0000_0000);
/// assert!(extract_key("192.168.1.1").is_err());
/// # Ok::<(), ipv6wry::Ipv6WryError>(())
/// ```
pub fn extract_key(text: &str) -> Result<u64> {
    let addr: Ipv6Addr = text.parse().map_err(|_| Ipv6WryError::NotIpv6Format)?;
    search_key(addr)
}

/// Fold the first four groups of `addr` into a search key
pub fn search_key(addr: Ipv6Addr) -> Result<u64> {
    addr.segments()[..4].iter().try_fold(0u64, |acc, &group| {
        acc.checked_mul(0x10000)
            .and_then(|acc| acc.checked_add(group as u64))
            .ok_or(Ipv6WryError::NotIpv6Format)
    })
}
