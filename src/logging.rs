//! Log sinks
//!
//! The dashboard owns the terminal, so while it runs tracing output goes to a
//! size-capped file instead of stderr.

use color_eyre::eyre::{ContextCompat, Result, WrapErr, eyre};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Log file name inside the data directory
pub const LOG_FILE: &str = "uptimey.log";

/// Rotate once the active file reaches this size
const MAX_LOG_BYTES: u64 = 1_000_000;

/// Size-capped log file keeping one previous generation (`<name>.old`)
///
/// The file is re-created if something deletes it while we are writing.
pub struct RotatingFileAppender {
    path: PathBuf,
    backup_path: PathBuf,
    max_size_bytes: u64,
    file: Mutex<Option<File>>,
}

impl RotatingFileAppender {
    pub fn new(dir: impl Into<PathBuf>, filename: &str, max_size_bytes: u64) -> Self {
        let dir = dir.into();
        Self {
            path: dir.join(filename),
            backup_path: dir.join(format!("{filename}.old")),
            max_size_bytes,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(path: &Path, truncate: bool) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.create(true);
        if truncate {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }
        #[cfg(unix)]
        options.mode(0o600);
        options.open(path)
    }

    /// Handle to the active file, reopened when missing on disk
    fn active<'a>(&self, slot: &'a mut Option<File>) -> io::Result<&'a mut File> {
        if !self.path.exists() {
            *slot = None;
        }
        if slot.is_none() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            *slot = Some(Self::open(&self.path, false)?);
        }
        slot.as_mut()
            .ok_or_else(|| io::Error::other("Log file unavailable"))
    }

    fn rotate(&self, slot: &mut Option<File>) -> io::Result<()> {
        *slot = None;
        if self.path.exists() {
            fs::rename(&self.path, &self.backup_path)?;
        }
        *slot = Some(Self::open(&self.path, true)?);
        Ok(())
    }
}

impl Write for RotatingFileAppender {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut slot = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("Log mutex poisoned: {e}")))?;

        let size = self
            .active(&mut slot)
            .and_then(|f| f.metadata())
            .map_or(0, |m| m.len());

        if size >= self.max_size_bytes
            && let Err(e) = self.rotate(&mut slot)
        {
            eprintln!("Failed to rotate log file: {e}");
        }

        self.active(&mut slot)?.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut slot = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("Log mutex poisoned: {e}")))?;
        match slot.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Directory holding the dashboard log (`~/.local/share/uptimey`)
///
/// # Errors
/// Returns an error if no data directory can be determined.
pub fn log_dir() -> Result<PathBuf> {
    Ok(dirs::data_local_dir()
        .context("Could not determine data directory")?
        .join("uptimey"))
}

/// Route tracing output to the rotating log file in `dir`
///
/// `RUST_LOG` overrides `level`. Keep the returned guard alive for as long as
/// logs should be flushed.
///
/// # Errors
/// Returns an error if the directory cannot be created or a global subscriber
/// is already installed.
pub fn init_file_logging(dir: &Path, level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(dir).wrap_err_with(|| format!("Failed to create log dir: {dir:?}"))?;

    let appender = RotatingFileAppender::new(dir, LOG_FILE, MAX_LOG_BYTES);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("uptimey={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("Failed to install log subscriber: {e}"))?;

    Ok(guard)
}
