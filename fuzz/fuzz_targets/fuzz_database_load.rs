#![no_main]
use ipv6wry::Database;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a database image: loading and lookups must fail
    // cleanly, never panic or loop
    if let Ok(db) = Database::from_bytes(data.to_vec()) {
        for query in ["::", "::1", "2001:db8::1", "8000::", "ffff:ffff:ffff:ffff::"] {
            let _ = db.search_ip(query);
        }
        for index in 0..db.record_count().min(8) {
            let _ = db.record(index);
            let _ = db.area_of(index);
        }
    }
});
