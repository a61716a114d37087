//! Logging configuration for the bot.
//!
//! The bot logs to an appending file that is rotated by size whenever the
//! next event would push it past the limit, or to stderr for interactive dry
//! runs. Both install the subscriber as the scoped
//! default and hand back a [`LogGuard`]; dropping the guard uninstalls the
//! subscriber and closes the log file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{BotError, Result};

/// Keeps the installed subscriber (and its file handle) alive.
#[must_use = "logging stops when the guard is dropped"]
pub struct LogGuard {
    _default: DefaultGuard,
}

impl LogGuard {
    /// Logs a fatal error through this guard's subscriber before handing the
    /// result back.
    pub fn record_failure<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            tracing::error!("{}: {}", e.category(), e);
        }
        result
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Size-limited log file shared by every event the subscriber writes.
///
/// Before a write that would take the file past `max_bytes`, the file is
/// shifted to `.1` (older backups move up) and a fresh one is opened. A single
/// event larger than the limit still goes into an empty file whole.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: u32,
    active: Mutex<ActiveFile>,
}

struct ActiveFile {
    file: File,
    written: u64,
}

impl RotatingFile {
    /// Rotates an oversized leftover file, then opens `path` for appending.
    pub fn open(config: &LoggingConfig) -> io::Result<Self> {
        rotate_if_needed(&config.path, config.max_bytes, config.backups)?;
        let file = open_append(&config.path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path: config.path.clone(),
            max_bytes: config.max_bytes,
            backups: config.backups,
            active: Mutex::new(ActiveFile { file, written }),
        })
    }

    fn rotate(&self, active: &mut ActiveFile) -> io::Result<()> {
        active.file.flush()?;
        shift_backups(&self.path, self.backups)?;
        active.file = open_append(&self.path)?;
        active.written = 0;
        Ok(())
    }
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if active.written > 0 && active.written + buf.len() as u64 > self.max_bytes {
            self.rotate(&mut active)?;
        }
        let n = active.file.write(buf)?;
        active.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .file
            .flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = &'a RotatingFile;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

/// Initializes file logging.
///
/// The file is rotated first if it has grown past `max_bytes`, then opened for
/// appending and kept under the limit for as long as the guard lives.
pub fn init_file_logging(config: &LoggingConfig) -> Result<LogGuard> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| BotError::config(format!("Could not create log directory: {e}")))?;
    }

    let log_file = RotatingFile::open(config)
        .map_err(|e| BotError::config(format!("Could not open log file: {e}")))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false) // No ANSI colors in file output
        .finish();

    Ok(LogGuard {
        _default: tracing::subscriber::set_default(subscriber),
    })
}

/// Initializes logging to stderr.
pub fn init_stderr_logging() -> LogGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .finish();

    LogGuard {
        _default: tracing::subscriber::set_default(subscriber),
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Returns the path of the `index`-th rotated file (`bot.log.3`).
fn backup_path(path: &Path, index: u32) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Shifts `path` to `path.1`, `path.1` to `path.2`, ... when it exceeds `max_bytes`.
///
/// The oldest backup beyond `backups` is discarded. With zero backups the file
/// is simply removed.
pub fn rotate_if_needed(path: &Path, max_bytes: u64, backups: u32) -> io::Result<bool> {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if size <= max_bytes {
        return Ok(false);
    }

    shift_backups(path, backups)?;
    Ok(true)
}

/// Moves `path` to `path.1` unconditionally, shifting older backups up.
fn shift_backups(path: &Path, backups: u32) -> io::Result<()> {
    if backups == 0 {
        return fs::remove_file(path);
    }

    let oldest = backup_path(path, backups);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }

    for index in (1..backups).rev() {
        let from = backup_path(path, index);
        if from.exists() {
            fs::rename(&from, backup_path(path, index + 1))?;
        }
    }

    fs::rename(path, backup_path(path, 1))
}
