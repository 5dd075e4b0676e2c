//! pgdb CLI
//!
//! Command-line interface for inspecting and managing pgdb databases.

use clap::{Parser, Subcommand};
use pgdb::{Config, Database};
use tracing_subscriber::{fmt, EnvFilter};

/// pgdb CLI
#[derive(Parser, Debug)]
#[command(name = "pgdb-cli")]
#[command(about = "CLI for the pgdb embedded key-value store")]
#[command(version)]
struct Args {
    /// Database directory
    #[arg(short, long, default_value = "./pgdb_data")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new database
    Create,

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Show database metadata
    Stat,

    /// Destroy the database: remove every file and the directory
    Destroy,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pgdb=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> pgdb::Result<()> {
    match &args.command {
        Commands::Create => {
            let config = Config::builder()
                .create_if_missing(true)
                .error_if_exists(true)
                .build();

            let db = Database::open(config, &args.db)?;
            println!("created {} ({})", db.path().display(), db.uuid());
            db.close();
        }

        Commands::Get { key } => {
            let config = Config::builder().readonly(true).build();

            let db = Database::open(config, &args.db)?;
            match db.get(key.as_bytes())? {
                Some(value) => println!("{}", String::from_utf8_lossy(&value)),
                None => println!("(not found)"),
            }
            db.close();
        }

        Commands::Stat => {
            let config = Config::builder().readonly(true).build();

            let db = Database::open(config, &args.db)?;
            println!("path:         {}", db.path().display());
            println!("uuid:         {}", db.uuid());
            println!("next file id: {}", db.next_file_id());
            for table in db.tables() {
                println!(
                    "table:        {} (root id {}, {} root entries)",
                    table.name(),
                    table.root_id(),
                    table.root().len()
                );
            }
            db.close();
        }

        Commands::Destroy => {
            Database::destroy(&args.db)?;
            println!("destroyed {}", args.db);
        }
    }

    Ok(())
}
