mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{cmd_inspect, cmd_query};

#[derive(Parser)]
#[command(name = "ipv6wry")]
#[command(
    about = "IPv6 geolocation lookups against IPDB databases",
    long_about = "ipv6wry - Resolve IPv6 addresses to location text using an IPDB (ipv6wry.db) database\n\n\
    The database is memory-mapped read-only; lookups take the top 64 bits of each\n\
    address, binary-search the sorted prefix index and follow the location table's\n\
    redirect chains to build \"country region\" style text.\n\n\
    Examples:\n\
      ipv6wry query ipv6wry.db 2001:da8:8000::1\n\
      ipv6wry query ipv6wry.db 2001:da8::1 240e::1 --quiet\n\
      ipv6wry inspect ipv6wry.db --records 10"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more IPv6 addresses
    Query {
        /// Path to the IPDB database (ipv6wry.db)
        #[arg(value_name = "DATABASE")]
        database: PathBuf,

        /// IPv6 addresses to resolve
        #[arg(value_name = "ADDRESS", required = true)]
        addresses: Vec<String>,

        /// Quiet mode - no output, only exit code (0 = all resolved, 1 = otherwise)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Inspect an IPDB database header and index
    Inspect {
        /// Path to the IPDB database (ipv6wry.db)
        #[arg(value_name = "DATABASE")]
        database: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,

        /// Number of leading index records to show
        #[arg(short, long, default_value = "5")]
        records: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            database,
            addresses,
            quiet,
        } => cmd_query(database, addresses, quiet),
        Commands::Inspect {
            database,
            json,
            records,
        } => cmd_inspect(database, json, records),
    }
}
