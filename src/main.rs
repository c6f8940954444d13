use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, LevelFilter};

use pathway_psimi::config::load_config;
use pathway_psimi::{run, ComplexPairing, ConvertConfig, ReportFormat, ReportOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert GPML pathways to molecular interaction reports", long_about = None)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert every pathway in a directory into one report
    #[command(name = "convert")]
    Convert {
        /// Directory of GPML pathway files
        #[arg(long)]
        pathways: PathBuf,
        /// Directory searched recursively for .bridge mapping databases
        #[arg(long)]
        mapping_dbs: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
        #[arg(long, value_enum)]
        complex_pairing: Option<ComplexPairing>,
        /// Add participant names and the pathway name to TSV rows
        #[arg(long)]
        extended_columns: bool,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'info' instead.", cli.log_level);
        LevelFilter::Info
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(cli:?; "Parsed arguments");

    match cli.command {
        Command::Convert {
            pathways,
            mapping_dbs,
            output,
            format,
            complex_pairing,
            extended_columns,
            config,
        } => {
            let app_config = load_config(config.as_deref()).context("Failed to load configuration")?;
            let convert = ConvertConfig {
                pathway_dir: pathways,
                mapping_dir: mapping_dbs,
                output,
                format: format.unwrap_or(app_config.conversion.format),
                pairing: complex_pairing.unwrap_or(app_config.conversion.complex_pairing),
                report: ReportOptions {
                    extended_columns: extended_columns || app_config.conversion.extended_columns,
                    psimi: app_config.psimi,
                },
            };
            let summary = run(&convert)
                .with_context(|| format!("Conversion into {:?} failed", convert.output))?;
            info!(
                pathways = summary.pathways,
                skipped = summary.skipped,
                records = summary.records,
                mapping_sources = summary.mapping_sources;
                "Done"
            );
            Ok(())
        }
    }
}
