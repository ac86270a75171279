//! Ratchet CLI
//!
//! Command-line interface for translating a Terraform provider schema dump
//! into a CUE schema.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ratchet::{check, load_document, translate_with, TranslateOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ratchet")]
#[command(about = "Translate a Terraform provider schema into a CUE schema")]
#[command(version)]
struct Cli {
    /// Output of `terraform providers schema -json`
    schema: PathBuf,

    /// Provider address, e.g. registry.terraform.io/hashicorp/aws
    provider_address: String,

    /// Output file (stdout if not specified)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Leave data sources out of the schema
    #[arg(long)]
    no_data_sources: bool,

    /// Leave resources out of the schema
    #[arg(long)]
    no_resources: bool,

    /// Check the generated CUE for structural errors before writing it
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run(cli: Cli) -> Result<(), u8> {
    let document = load_document(&cli.schema).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let options = TranslateOptions::new()
        .data_sources(!cli.no_data_sources)
        .resources(!cli.no_resources);

    let schema = translate_with(&document, &cli.provider_address, &options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if cli.check {
        let result = check(&schema);
        for diagnostic in &result.diagnostics {
            eprintln!("  {}", diagnostic);
        }
        if !result.is_ok() {
            eprintln!(
                "Check failed: {} error(s), {} warning(s)",
                result.errors, result.warnings
            );
            return Err(1);
        }
        info!(warnings = result.warnings, "check passed");
    }

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &schema).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            print!("{}", schema);
        }
    }

    Ok(())
}
