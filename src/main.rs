//! `nexus`: query a movie catalog from the command line.
//!
//! Loads the CSV once, builds every index, then either answers a single
//! subcommand or drops into the interactive shell.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nexus_catalog::ingest::load_catalog;
use nexus_catalog::shell::{run_shell, write_path, write_record, write_stats, write_titles};
use nexus_catalog::text::normalize;
use nexus_catalog::{Catalog, CatalogConfig, CatalogError, Record};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "nexus")]
#[command(about = "Movie catalog with title, actor and genre indexes and similarity graph queries")]
#[command(version)]
struct Cli {
    /// CSV export to load (IMDB movie_metadata layout by default)
    #[arg(short, long, default_value = "movie_metadata.csv")]
    data: PathBuf,

    /// TOML file overriding catalog settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a movie by exact title
    Title { title: String },
    /// List movies featuring an actor
    Actor { name: String },
    /// List movies in a genre
    Genre { name: String },
    /// Recommend movies similar to a title
    Recommend { title: String },
    /// Shortest chain of similar movies between two titles
    Path { from: String, to: String },
    /// Index statistics
    Stats,
    /// Interactive menu (default)
    Shell,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nexus_catalog=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CatalogConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    let catalog = load_catalog(&cli.data, &config)
        .with_context(|| format!("loading {}", cli.data.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&catalog, io::stdin().lock(), &mut out)?,
        Command::Stats => {
            let stats = catalog.stats();
            if cli.json {
                emit_json(&mut out, &stats)?;
            } else {
                write_stats(&mut out, &stats)?;
            }
        }
        command => answer(&catalog, command, cli.json, &mut out)?,
    }
    Ok(())
}

/// Run a single lookup or traversal subcommand.
fn answer<W: Write>(catalog: &Catalog, command: Command, json: bool, out: &mut W) -> Result<()> {
    let records: Vec<&Record> = match &command {
        Command::Title { title } => {
            let record = catalog
                .find_by_title(&normalize(title))
                .ok_or_else(|| CatalogError::NotFound(title.clone()))?;
            vec![record]
        }
        Command::Actor { name } => catalog
            .find_by_actor(&normalize(name))
            .ok_or_else(|| CatalogError::NotFound(name.clone()))?,
        Command::Genre { name } => catalog
            .find_by_genre(&normalize(name))
            .ok_or_else(|| CatalogError::NotFound(name.clone()))?,
        Command::Recommend { title } => catalog.recommend_for_title(&normalize(title))?,
        Command::Path { from, to } => {
            catalog.path_between_titles(&normalize(from), &normalize(to))?
        }
        Command::Stats | Command::Shell => return Ok(()),
    };

    if json {
        return emit_json(out, &records);
    }
    match command {
        Command::Title { .. } => {
            for record in &records {
                write_record(out, record)?;
            }
        }
        Command::Path { .. } => write_path(out, &records)?,
        Command::Recommend { .. } => write_titles(out, "Similar Recommendations:", &records)?,
        _ => write_titles(out, "Found Movies:", &records)?,
    }
    Ok(())
}

fn emit_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
