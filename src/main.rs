//! `tablift` CLI - detect tables in document layouts and export them

mod cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use tablift::{AppConfig, ExportFormat, Telemetry};

#[derive(Parser)]
#[command(name = "tablift")]
#[command(about = "Infer tables from positioned text and ruling lines")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file (default: ~/.config/tablift/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Row/column clustering slack in points
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Minimum rows for a table
    #[arg(long, global = true)]
    min_rows: Option<usize>,

    /// Minimum columns for a table
    #[arg(long, global = true)]
    min_cols: Option<usize>,

    /// Line classification slack in points
    #[arg(long, global = true)]
    line_margin: Option<f64>,

    /// Debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract tables from one document
    Extract {
        /// Layout file (.json, or .pdf with the `pdf` feature)
        input: PathBuf,

        /// Directory for the exported artifact
        output_dir: PathBuf,

        /// Export format: json, markdown
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },

    /// Extract tables from every supported document in a directory
    Batch {
        /// Directory of layout files (not searched recursively)
        input_dir: PathBuf,

        /// Directory for the exported artifacts
        output_dir: PathBuf,

        /// Documents processed concurrently
        #[arg(short, long)]
        workers: Option<usize>,

        /// Export format: json, markdown
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },

    /// Print detected tables as markdown
    Show {
        /// Layout file
        input: PathBuf,
    },
}

impl GlobalArgs {
    fn telemetry(&self) -> Telemetry {
        if std::env::var_os("RUST_LOG").is_some() {
            return Telemetry::with_filter(EnvFilter::from_default_env());
        }
        let level = if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        };
        Telemetry::stderr(level)
    }

    /// File config with command-line overrides applied.
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref()).context("Failed to load config")?;
        let extractor = &mut config.extractor;
        if let Some(tolerance) = self.tolerance {
            extractor.tolerance = tolerance;
        }
        if let Some(min_rows) = self.min_rows {
            extractor.min_rows = min_rows;
        }
        if let Some(min_cols) = self.min_cols {
            extractor.min_cols = min_cols;
        }
        if let Some(line_margin) = self.line_margin {
            extractor.line_margin = line_margin;
        }
        extractor.validate().context("Invalid extractor settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let telemetry = cli.global.telemetry();
    let mut config = cli.global.app_config()?;

    match cli.command {
        Commands::Extract {
            input,
            output_dir,
            format,
        } => {
            let format = format.unwrap_or(config.batch.format);
            cmd::extract::cmd_extract(&input, &output_dir, &config.extractor, format, &telemetry)
                .await?;
        }
        Commands::Batch {
            input_dir,
            output_dir,
            workers,
            format,
        } => {
            if let Some(workers) = workers {
                config.batch.workers = workers;
            }
            if let Some(format) = format {
                config.batch.format = format;
            }
            cmd::batch::cmd_batch(&input_dir, &output_dir, &config, &telemetry).await?;
        }
        Commands::Show { input } => {
            cmd::show::cmd_show(&input, &config.extractor, &telemetry)?;
        }
    }

    Ok(())
}
