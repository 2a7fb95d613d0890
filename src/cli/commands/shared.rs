//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, input discovery, the concurrent
//! per-file parse loop and output writing used by both subcommands.

use crate::app::adapters::workbook_reader::is_workbook_path;
use crate::cli::args::CommonArgs;
use crate::config::ProcessorConfig;
use crate::{Error, Result};
use anyhow::Context;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Run statistics reported after every command
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Number of workbook files found in the input paths
    pub files_discovered: usize,
    /// Number of files parsed successfully
    pub files_parsed: usize,
    /// Number of files that failed to open or parse
    pub files_failed: usize,
    /// Employees (attendance) or reports (PMS) produced
    pub records_produced: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl RunStats {
    /// One-line summary for the end of a run
    pub fn summary_line(&self) -> String {
        format!(
            "Parsed {}/{} files, {} records in {:.2}s ({} failed)",
            self.files_parsed,
            self.files_discovered,
            self.records_produced,
            self.processing_time.as_secs_f64(),
            self.files_failed
        )
    }
}

/// Parse outcome of one input file
#[derive(Debug)]
pub struct FileOutcome<T> {
    pub path: PathBuf,
    pub result: anyhow::Result<T>,
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hr_sheet_processor={}", log_level)));

    let installed = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // A subscriber installed earlier in the process stays in place
    match installed {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(e) => debug!("Keeping existing log subscriber: {}", e),
    }
    Ok(())
}

/// Load configuration: explicit file, then the default location, then
/// built-in defaults, with CLI overrides applied last
pub fn load_configuration(args: &CommonArgs) -> Result<ProcessorConfig> {
    let config_file = match &args.config_file {
        Some(path) => Some(path.clone()),
        None => ProcessorConfig::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    };

    let mut config = match &config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            ProcessorConfig::from_file(path)?
        }
        None => {
            info!("No config file found, using defaults");
            ProcessorConfig::default()
        }
    };

    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut ProcessorConfig, args: &CommonArgs) {
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
}

/// Expand the input paths into workbook files.
///
/// Files are taken as given; directories are walked recursively for
/// spreadsheet extensions, skipping Office lock files (`~$name.xlsx`).
/// Each directory's files are sorted, input order is kept across inputs and
/// duplicates are dropped.
pub fn discover_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in paths {
        if input.is_file() {
            if !is_workbook_path(input) {
                warn!("{} does not look like a spreadsheet, trying anyway", input.display());
            }
            push_unique(&mut files, input.clone());
            continue;
        }

        if !input.is_dir() {
            return Err(Error::io(
                format!("Input path does not exist: {}", input.display()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "Path not found"),
            ));
        }

        let mut found: Vec<PathBuf> = WalkDir::new(input)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && is_workbook_path(path) && !is_lock_file(path))
            .collect();
        found.sort();

        debug!("Discovered {} workbooks in {}", found.len(), input.display());
        for path in found {
            push_unique(&mut files, path);
        }
    }

    Ok(files)
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("~$"))
}

/// File name used for department inference and reporting
pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Create a progress bar for file processing
pub fn create_progress_bar(total: u64, operation: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(operation.to_string());
    pb
}

/// Parse files on the blocking pool, at most `workers` at a time.
///
/// Outcomes come back in input order regardless of completion order.
pub async fn parse_files_concurrently<T, F>(
    files: Vec<PathBuf>,
    workers: usize,
    progress: Option<&ProgressBar>,
    parse: F,
) -> Vec<FileOutcome<T>>
where
    T: Send + 'static,
    F: Fn(&Path) -> Result<T> + Send + Sync + 'static,
{
    let parse = Arc::new(parse);

    let mut outcomes: Vec<(usize, FileOutcome<T>)> = stream::iter(files.into_iter().enumerate())
        .map(|(index, path)| {
            let parse = Arc::clone(&parse);
            async move {
                let task_path = path.clone();
                let result = match task::spawn_blocking(move || (*parse)(&task_path)).await {
                    Ok(parsed) => parsed.map_err(anyhow::Error::from),
                    Err(join_error) => Err(anyhow::anyhow!("Parse task failed: {}", join_error)),
                }
                .with_context(|| format!("Failed to parse {}", path.display()));

                (index, FileOutcome { path, result })
            }
        })
        .buffer_unordered(workers.max(1))
        .inspect(|_| {
            if let Some(pb) = progress {
                pb.inc(1);
            }
        })
        .collect()
        .await;

    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

/// Keep successful outcomes in order, logging and counting the failures
pub fn collect_successes<T>(outcomes: Vec<FileOutcome<T>>, stats: &mut RunStats) -> Vec<(PathBuf, T)> {
    let mut parsed = Vec::with_capacity(outcomes.len());

    for FileOutcome { path, result } in outcomes {
        match result {
            Ok(value) => {
                stats.files_parsed += 1;
                parsed.push((path, value));
            }
            Err(e) => {
                stats.files_failed += 1;
                error!("{:#}", e);
            }
        }
    }

    parsed
}

/// Write rendered results to the output file, or stdout without one
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| {
                Error::io(format!("Failed to write output file {}", path.display()), e)
            })?;
            info!("Wrote results to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Disable ANSI colours when results go to a file
pub fn configure_colors(args: &CommonArgs) {
    if args.output.is_some() {
        colored::control::set_override(false);
    }
}
