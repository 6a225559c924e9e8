//! Logging for the marquee binaries.
//!
//! Events go to two sinks: stderr, filtered to the level picked on the
//! command line unless `RUST_LOG` overrides it, and a per-run file under
//! the logs directory that keeps everything down to `TRACE`.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// File name of the per-run log; each run truncates it.
pub const LOG_FILE_NAME: &str = "marquee-last-run.log";

/// Used when no logs directory is given.
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Console verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

/// Installs the global subscriber and returns the path of the run log.
///
/// # Errors
///
/// Fails when the logs directory or file cannot be created, or when a
/// global subscriber is already installed.
pub fn init_tracing(
    console_level: impl Into<Level>,
    logs_dir: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let console_level = console_level.into();
    let (log_path, log_file) = open_run_log(logs_dir.unwrap_or(Path::new(DEFAULT_LOGS_DIR)))?;

    tracing_subscriber::registry()
        .with(stderr_layer(console_level))
        .with(run_log_layer(log_file))
        .try_init()?;

    tracing::info!(
        console = %console_level,
        log_file = %log_path.display(),
        "Tracing initialized"
    );
    Ok(log_path)
}

fn open_run_log(logs_dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(logs_dir)?;
    let path = logs_dir.join(LOG_FILE_NAME);
    let file = File::create(&path)?;
    Ok((path, file))
}

fn stderr_layer<S>(level: Level) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter)
}

fn run_log_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_ansi(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(file)
        .with_filter(EnvFilter::new("trace"))
}
