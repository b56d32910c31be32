use anyhow::{Context, Result};
use ipv6wry::Database;
use serde_json::json;
use std::path::PathBuf;

pub fn cmd_inspect(database: PathBuf, json_output: bool, records: u64) -> Result<()> {
    let db = Database::open(&database)
        .with_context(|| format!("Failed to load database: {}", database.display()))?;

    let header = *db.header();
    let shown = records.min(header.record_count);

    let mut rows = Vec::new();
    for index in 0..shown {
        let record = db
            .record(index)
            .with_context(|| format!("Failed to read index record {}", index))?;
        // The last record only closes the final range
        let area = if index + 1 < header.record_count {
            db.area_of(index).unwrap_or_else(|e| format!("<{}>", e))
        } else {
            String::new()
        };
        rows.push((record, area));
    }

    if json_output {
        let output = json!({
            "file": database.display().to_string(),
            "size": db.size(),
            "header": header,
            "records": rows
                .iter()
                .map(|(record, area)| json!({
                    "index": record.index,
                    "prefix": format!("{:#018x}", record.prefix),
                    "location_offset": record.location_offset,
                    "area": area,
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Database:     {}", database.display());
        println!("Size:         {} bytes", db.size());
        println!("Version:      {}", header.version);
        println!("Offset width: {} bytes", header.offset_width);
        println!("Prefix width: {} bytes", header.prefix_width);
        println!("Records:      {}", header.record_count);
        println!("Index base:   {:#x}", header.index_base);
        if !rows.is_empty() {
            println!();
            for (record, area) in &rows {
                println!(
                    "  [{:>6}] {:#018x} @{:<8} {}",
                    record.index, record.prefix, record.location_offset, area
                );
            }
        }
    }

    Ok(())
}
