//! Command-line interface for structscan.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{self, Config, DEFAULT_CONFIG};
use crate::discover::{build_exclude_set, ScanResult, Scanner};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Discover Go types that should receive generated JSON code.
///
/// Types are selected by `easyjson:json` doc comments, or, with `--all`,
/// every top-level struct not marked `easyjson:skip`.
#[derive(Parser)]
#[command(name = "structscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan Go files or package directories
    Scan(ScanArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Files or package directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Select every struct not marked easyjson:skip
    #[arg(short, long)]
    pub all: bool,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json (overrides config)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "structscan.yaml")]
    pub output: PathBuf,
}

/// Load the explicit config, a discovered one, or the defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Config::discover(Path::new(".")),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    debug!(config = %path.display(), "loading config");
    let config = Config::parse_file(&path)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// Merge the loaded config with command-line overrides and validate it.
fn resolve_config(args: &ScanArgs) -> anyhow::Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if args.all {
        config.all_structs = Some(true);
    }
    if let Some(format) = &args.format {
        config.format = Some(format.clone());
    }
    config::validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Scan each target in order, stopping at the first failure.
fn scan_targets(scanner: &Scanner, paths: &[PathBuf]) -> anyhow::Result<Vec<ScanResult>> {
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("cannot access path {}", path.display()))?;
        let result = scanner.scan(path, metadata.is_dir())?;
        results.push(result);
    }
    Ok(results)
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    let config = resolve_config(args)?;

    let exclude = build_exclude_set(&config.exclude)?;
    let scanner = Scanner::new(config.scan_options()).exclude(exclude);
    let results = scan_targets(&scanner, &args.paths)?;

    match config.get_format() {
        "json" => report::write_json(&results)?,
        _ => report::write_pretty(&results),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }

    std::fs::write(&args.output, DEFAULT_CONFIG)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize the scan", args.output.display());
    println!("  2. Run: structscan scan . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
