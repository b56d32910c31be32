use anyhow::{Context, Result};
use ipv6wry::{Database, LookupResult};
use std::path::PathBuf;

pub fn cmd_query(database: PathBuf, addresses: Vec<String>, quiet: bool) -> Result<()> {
    let db = Database::open(&database)
        .with_context(|| format!("Failed to load database: {}", database.display()))?;

    let results: Vec<LookupResult> = addresses.iter().map(|a| db.search_ip(a)).collect();
    let all_found = results.iter().all(LookupResult::is_found);

    if !quiet {
        // Always an array, one entry per address in argument order
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    std::process::exit(if all_found { 0 } else { 1 });
}
