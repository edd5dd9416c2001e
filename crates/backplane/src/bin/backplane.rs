//! backplane CLI: read color-coded schedule grids from backplane photos.

use backplane::{run_batch, BatchMode, BatchOptions, BatchReport, PipelineConfig, ScheduleReader};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

/// Exit status when at least one image in the batch failed.
const EXIT_IMAGE_FAILED: u8 = 2;

#[derive(Parser)]
#[command(name = "backplane")]
#[command(about = "Read color-coded schedule grids from photographs of a green backplane")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate, rectify and scan each image; print the matrices.
    Read(BatchArgs),

    /// Locate and rectify each image; write the rectified images.
    Rectify(BatchArgs),

    /// Scan images that are already rectified; print the matrices.
    Scan(BatchArgs),

    /// Print the default configuration as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct BatchArgs {
    /// Input images, processed in order.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// JSON configuration file (missing fields keep their defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid columns (overrides the config).
    #[arg(long)]
    cols: Option<usize>,

    /// Grid rows (overrides the config).
    #[arg(long)]
    rows: Option<usize>,

    /// Write a JSON report of every image to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Directory for rectified images.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Do not write rectified images.
    #[arg(long)]
    no_rectified: bool,
}

impl BatchArgs {
    fn load_config(&self) -> CliResult<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load_json(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        config.validate()?;
        Ok(config)
    }

    fn options(&self, mode: BatchMode, config: &PipelineConfig) -> BatchOptions {
        let mut options = BatchOptions::new(mode);
        options.naming = config.artifacts.clone();
        if mode != BatchMode::Scan && !self.no_rectified {
            options.out_dir = Some(self.out_dir.clone());
        }
        options
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Read(args) => run_images(&args, BatchMode::Read),
        Commands::Rectify(args) => run_images(&args, BatchMode::Rectify),
        Commands::Scan(args) => run_images(&args, BatchMode::Scan),
        Commands::DefaultConfig => run_default_config().map(|_| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(_verbose: u8, _quiet: bool) {
    backplane::core::init_tracing(false);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8, quiet: bool) {
    let level = backplane::core::level_from_verbosity(verbose, quiet);
    let _ = backplane::core::init_with_level(level);
}

fn run_default_config() -> CliResult<()> {
    let json = serde_json::to_string_pretty(&PipelineConfig::default())?;
    println!("{json}");
    Ok(())
}

fn run_images(args: &BatchArgs, mode: BatchMode) -> CliResult<ExitCode> {
    let config = args.load_config()?;
    let reader = ScheduleReader::from_config(&config)?;
    let options = args.options(mode, &config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report: BatchReport = run_batch(&reader, &args.images, &options, &mut out)?;
    out.flush()?;

    if let Some(path) = &args.report {
        report.write_json(path)?;
        log::info!("report written to {}", path.display());
    }

    Ok(if report.failed() > 0 {
        ExitCode::from(EXIT_IMAGE_FAILED)
    } else {
        ExitCode::SUCCESS
    })
}
