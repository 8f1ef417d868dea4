//! impress-authors binary
//!
//! Resolves the authors of a JSON corpus of publication records and writes
//! the author registry and publication credits as JSON.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use impress_authors::{load_corpus, AuthorRecord, Membership, ResolveConfig, Resolver};

/// Resolve author identities across a publication corpus
#[derive(Parser, Debug)]
#[command(name = "impress-authors", version, about)]
struct Args {
    /// JSON array of publication records
    #[arg(short, long, value_name = "FILE")]
    corpus: PathBuf,

    /// TOML configuration; defaults are used when omitted
    #[arg(short = 'f', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Output {
    authors: Vec<AuthorRecord>,
    memberships: Vec<Membership>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ResolveConfig::load(path)?,
        None => ResolveConfig::default(),
    };
    let resolver = Resolver::new(config)?;

    let records = load_corpus(&args.corpus)?;
    let resolution = resolver.resolve(&records)?;
    resolution.diagnostics.log();

    let output = Output {
        authors: resolution.author_records(),
        memberships: resolution.memberships(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match &args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
