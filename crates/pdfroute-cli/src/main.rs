//! pdfroute command-line interface.
//!
//! # Commands
//!
//! - `run`: process every PDF in the input folder
//! - `config show`: print the effective configuration
//! - `config init`: write a default configuration file
//!
//! Configuration comes from `--config`, or is discovered as `pdfroute.toml` /
//! `config.json` in the current directory and its parents, or falls back to the
//! built-in folder names. Folder flags on `run` override whichever was loaded.

#![deny(unsafe_code)]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdfroute::{BatchReport, BatchSummary, LopdfExtractor, PipelineConfig, spawn_batch};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdfroute")]
#[command(version, about = "Extract text from a folder of PDFs and route the originals", long_about = None)]
struct Cli {
    /// Log diagnostics at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in the input folder
    Run {
        /// Path to config file (TOML, YAML, or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Folder scanned for PDF files
        #[arg(long)]
        input: Option<PathBuf>,

        /// Folder receiving extracted text files
        #[arg(long)]
        output_text: Option<PathBuf>,

        /// Folder originals are moved to
        #[arg(long)]
        archive: Option<PathBuf>,

        /// Folder receiving copies of PDFs without usable text
        #[arg(long)]
        failed: Option<PathBuf>,

        /// Attempts per move or copy
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Pause between attempts, in milliseconds
        #[arg(long)]
        retry_delay_ms: Option<u64>,

        /// Output format for the final report
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Inspect or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show {
        /// Path to config file (TOML, YAML, or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },

    /// Write a configuration file holding the defaults
    Init {
        /// Destination; `.json` writes JSON, anything else TOML
        #[arg(short, long, default_value = "pdfroute.toml")]
        path: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ConfigFormat {
    Toml,
    Json,
}

/// Folder and retry flags that override the loaded configuration.
#[derive(Default)]
struct Overrides {
    input: Option<PathBuf>,
    output_text: Option<PathBuf>,
    archive: Option<PathBuf>,
    failed: Option<PathBuf>,
    max_attempts: Option<u32>,
    retry_delay_ms: Option<u64>,
}

impl Overrides {
    fn apply(self, config: &mut PipelineConfig) {
        let folders = &mut config.folders;
        if let Some(input) = self.input {
            folders.input_pdf_folder = input;
        }
        if let Some(output_text) = self.output_text {
            folders.output_text_folder = output_text;
        }
        if let Some(archive) = self.archive {
            folders.archive_folder = archive;
        }
        if let Some(failed) = self.failed {
            folders.failed_text_extraction_folder = failed;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.relocation.max_attempts = max_attempts;
        }
        if let Some(retry_delay_ms) = self.retry_delay_ms {
            config.relocation.retry_delay_ms = retry_delay_ms;
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose))))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            config,
            input,
            output_text,
            archive,
            failed,
            max_attempts,
            retry_delay_ms,
            format,
        } => {
            let mut pipeline_config = load_config(config.as_deref())?;
            Overrides {
                input,
                output_text,
                archive,
                failed,
                max_attempts,
                retry_delay_ms,
            }
            .apply(&mut pipeline_config);
            pipeline_config.validate().context("Invalid configuration")?;

            run_batch(pipeline_config, format).await
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show { config, format } => {
                    let pipeline_config = load_config(config.as_deref())?;
                    match format {
                        ConfigFormat::Toml => print!("{}", pipeline_config.to_toml_string()?),
                        ConfigFormat::Json => println!("{}", serde_json::to_string_pretty(&pipeline_config)?),
                    }
                }
                ConfigAction::Init { path, force } => {
                    if path.exists() && !force {
                        bail!("{} already exists (use --force to overwrite)", path.display());
                    }
                    PipelineConfig::default()
                        .save_to_file(&path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote default configuration to {}", path.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log filter used when `RUST_LOG` is unset.
///
/// Status lines are already printed by [`run_batch`]; their tracing mirror stays
/// silent unless `--verbose` asks for diagnostics.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "pdfroute=debug" } else { "pdfroute=off" }
}

/// Load configuration from an explicit path, by discovery, or the defaults.
fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    if let Some(path) = path {
        return PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    let discovered = PipelineConfig::discover().context("Failed to discover configuration")?;
    Ok(discovered.unwrap_or_default())
}

/// Run the batch on a worker and relay its status lines until it finishes.
///
/// Status lines go to stdout in text mode and to stderr in JSON mode, so the
/// JSON report is the only thing on stdout.
async fn run_batch(config: PipelineConfig, format: OutputFormat) -> Result<ExitCode> {
    let mut handle = spawn_batch(config, Arc::new(LopdfExtractor::new()));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;

    loop {
        tokio::select! {
            line = handle.next_status() => match line {
                Some(line) => match format {
                    OutputFormat::Text => println!("{}", line),
                    OutputFormat::Json => eprintln!("{}", line),
                },
                None => break,
            },
            _ = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                handle.cancel();
                eprintln!("Interrupted; stopping after the current file...");
            }
        }
    }

    match handle.join().await {
        Ok(report) => {
            print_report(&report, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_precondition() => {
            tracing::debug!("Run stopped before processing: {}", e);
            print_report(&BatchReport::default(), format)?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).context("Batch run failed"),
    }
}

fn print_report(report: &BatchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_summary(&report.summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    println!();
    println!("{}", summary);
}
