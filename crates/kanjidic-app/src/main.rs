use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod dictionary;
pub mod profile;


#[derive(Parser, Debug)]
#[command(name = "kanjidic", version, about = "Read and query KANJIDIC files")]
pub struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// KANJIDIC file
    #[arg(long, global = true)]
    pub dict: Option<String>,

    /// Encoding label of the KANJIDIC file
    #[arg(long, global = true)]
    pub encoding: Option<String>,

    /// File listing joyo characters (required unless KANJIDIC_JOYO_PATH is set)
    #[arg(long, global = true)]
    pub joyo: Option<String>,

    /// Log and skip lines that cannot be parsed
    #[arg(long, global = true)]
    pub skip_malformed: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print every record as one JSON object per line
    Dump {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Look up each character of CHARS
    Lookup { chars: String },
    /// Parse the record at a line number (0 is the header)
    Line { index: usize },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = profile::resolve(&cli)?;
    init_tracing(&config.log_filter);

    let mut reader = dictionary::open_reader(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Dump { limit } => {
            commands::dump(&mut reader, limit, &mut out)?;
        }
        Command::Lookup { chars } => {
            let misses = commands::lookup(&mut reader, &chars, &mut out)?;
            for character in misses {
                eprintln!("{character}: not found");
            }
        }
        Command::Line { index } => {
            if !commands::line(&mut reader, index, &mut out)? {
                bail!("Line {index} holds no record");
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Logs go to stderr, stdout carries the JSON
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
