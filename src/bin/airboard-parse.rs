use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use airboard::{DumpParser, DumpZone, OrganizationRegistry, ParsedDump, RecencyFilter};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "airboard-parse")]
#[command(about = "Parse an airodump-ng dump once and print it as JSON")]
struct Cli {
    /// airodump-ng CSV file to parse
    #[arg(short, long, default_value = "dump-01.csv")]
    file: PathBuf,

    /// IEEE OUI registry file
    #[arg(long, default_value = "oui.txt")]
    oui: PathBuf,

    /// IEEE CID registry file
    #[arg(long, default_value = "cid.txt")]
    cid: PathBuf,

    /// Dump timestamps were written in UTC rather than local time
    #[arg(long)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print client stations
    Clients {
        /// Only clients seen in the last N minutes
        #[arg(short, long)]
        minutes: Option<String>,
    },
    /// Print access points
    AccessPoints,
}

fn parse_dump(cli: &Cli) -> Result<ParsedDump> {
    let registry = Arc::new(OrganizationRegistry::load(&cli.oui, &cli.cid));
    let zone = if cli.utc { DumpZone::Utc } else { DumpZone::Local };
    let parser = DumpParser::new(registry).with_zone(zone);

    let text = read_lossy(&cli.file)?;
    let parsed = parser
        .parse(&text)
        .with_context(|| format!("Failed to parse {:?}", cli.file))?;
    Ok(parsed)
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run(cli: Cli) -> Result<()> {
    let parsed = parse_dump(&cli)?;

    let json = match cli.command {
        Commands::Clients { minutes } => {
            let clients = match minutes {
                Some(raw) => RecencyFilter::from_param(Some(&raw)).apply(&parsed.clients),
                None => parsed.clients,
            };
            serde_json::to_string_pretty(&clients)?
        }
        Commands::AccessPoints => serde_json::to_string_pretty(&parsed.access_points)?,
    };

    println!("{}", json);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
