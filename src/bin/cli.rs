//! Fireclient CLI.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use colored::*;
use fireclient::{Fields, FireConfig, Fireclient, QueryOutcome, Record};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fireclient")]
#[command(about = "CRUD and pseudo-queries against a hosted document store", long_about = None)]
struct Cli {
    /// Connection config JSON file (falls back to FIRECLIENT_* env vars)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a single document by id
    Get {
        /// Collection name
        collection: String,

        /// Document id
        id: String,
    },

    /// List all documents in a collection
    List {
        /// Collection name
        collection: String,

        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Project one field across all documents in a collection
    Field {
        /// Collection name
        collection: String,

        /// Field name
        field: String,
    },

    /// Insert a document with store-generated id
    Insert {
        /// Collection name
        collection: String,

        /// Document fields as a JSON object
        #[arg(long)]
        json: String,
    },

    /// Merge fields into an existing document
    Update {
        /// Collection name
        collection: String,

        /// Document id
        id: String,

        /// Fields to merge as a JSON object
        #[arg(long)]
        json: String,
    },

    /// Delete a document
    Delete {
        /// Collection name
        collection: String,

        /// Document id
        id: String,
    },

    /// Dispatch a pseudo-query sentence
    Query {
        /// Sentence, e.g. "select * from books"
        sentence: String,

        /// Payload for insert/update sentences, as a JSON object
        #[arg(long)]
        payload: Option<String>,
    },

    /// Print the client version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("fireclient {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => FireConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FireConfig::from_env().context("loading config from environment")?,
    };
    let client = Fireclient::connect(config)?;

    match cli.command {
        Commands::Get { collection, id } => {
            match client.fetch_one(&collection, &id).await? {
                Some(record) => print_record(&record)?,
                None => println!("{} Document not found: {}/{}", "✗".yellow(), collection, id),
            }
        }

        Commands::List { collection, format } => {
            let records = client.fetch_all(&collection).await?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!(
                    "{} Found {} documents in '{}':",
                    "✓".green(),
                    records.len(),
                    collection
                );
                for record in &records {
                    println!("  {} {}", "•".green(), record.id.bright_white());
                }
            }
        }

        Commands::Field { collection, field } => {
            let values = client.fetch_field(&collection, &field).await?;

            println!(
                "{} '{}' across {} documents:",
                "✓".green(),
                field,
                values.len()
            );
            for value in values {
                match value {
                    Some(value) => println!("  {}", serde_json::to_string(&value)?),
                    None => println!("  {}", "(absent)".dimmed()),
                }
            }
        }

        Commands::Insert { collection, json } => {
            let fields = parse_fields(&json)?;
            let id = client.insert(&collection, fields).await?;
            println!("{} Inserted document: {}", "✓".green(), id.bright_white());
        }

        Commands::Update { collection, id, json } => {
            let fields = parse_fields(&json)?;
            client.update(&collection, &id, fields).await?;
            println!("{} Updated document: {}", "✓".green(), id.bright_white());
        }

        Commands::Delete { collection, id } => {
            client.remove(&collection, &id).await?;
            println!("{} Deleted document: {}", "✓".green(), id.bright_white());
        }

        Commands::Query { sentence, payload } => {
            let payload = payload.as_deref().map(parse_fields).transpose()?;

            match client.query(&sentence, payload).await? {
                QueryOutcome::Records(records) => {
                    println!("{} {} records:", "✓".green(), records.len());
                    println!("{}", serde_json::to_string_pretty(&records)?);
                }
                QueryOutcome::Record(Some(record)) => print_record(&record)?,
                QueryOutcome::Record(None) => {
                    println!("{} No matching document", "✗".yellow());
                }
                QueryOutcome::Inserted(id) => {
                    println!("{} Inserted document: {}", "✓".green(), id.bright_white());
                }
                QueryOutcome::Done => println!("{} Done", "✓".green()),
            }
        }

        Commands::Version => unreachable!(),
    }

    Ok(())
}

fn parse_fields(json: &str) -> anyhow::Result<Fields> {
    let value: serde_json::Value = serde_json::from_str(json).context("invalid JSON payload")?;
    value
        .as_object()
        .cloned()
        .ok_or_else(|| anyhow!("payload must be a JSON object"))
}

fn print_record(record: &Record) -> anyhow::Result<()> {
    println!("{} {}", "✓".green(), record.id.bright_white());
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
