#![no_main]
use ipv6wry::{Database, LookupResult};
use libfuzzer_sys::fuzz_target;

#[path = "../../src/fixture.rs"]
mod fixture;

fuzz_target!(|data: &[u8]| {
    // Fuzzed query text against a well-formed database
    if let Ok(s) = std::str::from_utf8(data) {
        let db = Database::from_bytes(fixture::redirect_db()).unwrap();
        let result = db.search_ip(s);

        // Anything std accepts as IPv6 must get past key extraction
        if s.parse::<std::net::Ipv6Addr>().is_ok() {
            if let LookupResult::Failed { error } = &result {
                assert_ne!(error, "Input ip address is not in IPv6 format.");
            }
        }
    }
});
