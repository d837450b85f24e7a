//! Logging init: `pkgstats.log` under the XDG state dir, or stderr when that
//! file cannot be opened.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,pkgstats=debug";
const LOG_FILE_NAME: &str = "pkgstats.log";

/// Per-event writer: a clone of the log file handle, or stderr if cloning failed.
enum LogSink {
    File(File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/pkgstats`.
pub fn log_dir() -> Result<PathBuf> {
    let xdg_dirs =
        xdg::BaseDirectories::with_prefix("pkgstats").context("locate XDG state directory")?;
    Ok(xdg_dirs.get_state_home().join("pkgstats"))
}

/// Opens `<dir>/pkgstats.log` for appending, creating `dir` if needed.
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir).with_context(|| format!("create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    Ok((path, file))
}

/// Initialize logging to `~/.local/state/pkgstats/pkgstats.log`.
/// Returns Err if the file cannot be opened so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    init_logging_in(&log_dir()?)
}

/// Like [`init_logging`] with an explicit log directory. Nothing is installed
/// when the file cannot be opened.
pub fn init_logging_in(dir: &Path) -> Result<()> {
    let (path, file) = open_log_file(dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::info!("pkgstats logging to {}", path.display());
    Ok(())
}

/// Initialize logging to stderr only. Safe to call when a subscriber is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
