use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{cmd_analyze, cmd_highlight, cmd_init, cmd_normalize};

#[derive(Parser)]
#[command(name = "umbra")]
#[command(
    version,
    about = "Dark-region analysis and shadow normalization for photographs",
    long_about = None
)]
struct Cli {
    /// Configuration file (overrides $UMBRA_CONFIG and the default locations)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the percentage of each image covered by dark regions
    Analyze {
        /// Input files or directories
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Scan directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Intensity threshold; pixels strictly below it are dark (0-255)
        #[arg(short, long, value_name = "N")]
        threshold: Option<i64>,

        /// Regions must be strictly larger than this area
        #[arg(short = 'a', long, value_name = "AREA")]
        min_area: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Paint the dark regions of one image with an overlay color
    Highlight {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (default: <stem>_highlighted.png next to the input)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Intensity threshold; pixels strictly below it are dark (0-255)
        #[arg(short, long, value_name = "N")]
        threshold: Option<i64>,

        /// Regions must be strictly larger than this area
        #[arg(short = 'a', long, value_name = "AREA")]
        min_area: Option<f64>,

        /// Overlay color (comma-separated: R,G,B)
        #[arg(long, value_name = "R,G,B")]
        color: Option<String>,
    },

    /// Remove uneven illumination and equalize mean brightness
    Normalize {
        /// Input files or directories
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Scan directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Target mean brightness (0-255)
        #[arg(long, value_name = "N")]
        target: Option<i64>,

        /// Illumination blur kernel size (odd)
        #[arg(long, value_name = "N")]
        kernel: Option<i64>,

        /// Suffix appended to output file names
        #[arg(long, value_name = "SUFFIX")]
        suffix: Option<String>,

        /// Output format (png, tif, tiff, jpg, jpeg, bmp)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Write the default configuration file
    Init {
        /// Destination (default: the per-user config directory)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { path, force } => cmd_init(path, force),
        command => {
            let handle = umbra_core::load_config(cli.config.as_deref());
            match &handle.source {
                Some(source) => tracing::info!("Loaded config from {}", source.display()),
                None => tracing::debug!("No config file found; using built-in defaults"),
            }
            for warning in &handle.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
            run(&handle.config, command)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &umbra_core::UmbraConfig, command: Commands) -> Result<(), String> {
    match command {
        Commands::Analyze {
            inputs,
            recursive,
            threshold,
            min_area,
            json,
            threads,
        } => cmd_analyze(config, inputs, recursive, threshold, min_area, json, threads),

        Commands::Highlight {
            input,
            out,
            threshold,
            min_area,
            color,
        } => cmd_highlight(config, input, out, threshold, min_area, color),

        Commands::Normalize {
            inputs,
            recursive,
            out,
            target,
            kernel,
            suffix,
            format,
            threads,
        } => cmd_normalize(
            config, inputs, recursive, out, target, kernel, suffix, format, threads,
        ),

        Commands::Init { path, force } => cmd_init(path, force),
    }
}
