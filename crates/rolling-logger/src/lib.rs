//! Rolling Logger
//!
//! A `tracing` subscriber that writes to a size-rotated file in the log
//! directory and keeps the most recent lines in memory, so the app can
//! show them without touching the file. Records emitted through the `log`
//! facade are bridged into the same subscriber.

mod line_buffer;
mod rolling_file;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use line_buffer::LineBuffer;
use rolling_file::RollingFile;

#[derive(Debug, Error)]
pub enum RollingLoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Used when `RUST_LOG` is not set
    pub level: log::LevelFilter,
    /// Size at which the active file is rotated
    pub max_file_bytes: u64,
    /// Files kept on disk, the active one included
    pub max_files: usize,
    /// Lines kept in memory
    pub buffer_lines: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: log::LevelFilter::Info,
            max_file_bytes: 1024 * 1024,
            max_files: 5,
            buffer_lines: 500,
        }
    }
}

struct WriterInner {
    file: RollingFile,
    buffer: LineBuffer,
}

/// Cloneable writer feeding both the rolling file and the line buffer
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<WriterInner>>,
}

impl SharedWriter {
    pub fn open(log_dir: &Path, app_name: &str, config: &LoggerConfig) -> Result<Self, RollingLoggerError> {
        let file = RollingFile::open(log_dir, app_name, config.max_file_bytes, config.max_files)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(WriterInner {
                file,
                buffer: LineBuffer::new(config.buffer_lines),
            })),
        })
    }

    /// Most recent lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(inner) => inner.buffer.snapshot(),
            Err(poisoned) => poisoned.into_inner().buffer.snapshot(),
        }
    }

    /// Path of the file currently written to
    pub fn active_path(&self) -> Option<PathBuf> {
        self.inner.lock().ok().map(|inner| inner.file.active_path())
    }
}

impl io::Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        inner.file.write_chunk(buf)?;
        inner.buffer.push_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        inner.file.flush()
    }
}

static LOGGER: OnceLock<SharedWriter> = OnceLock::new();

/// Initialize the global logger with default settings
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), RollingLoggerError> {
    init_logger_with(&log_dir, app_name, &LoggerConfig::default())
}

/// Initialize the global logger
///
/// Installs the subscriber process-wide. A second call fails with
/// `AlreadyInitialized`.
pub fn init_logger_with(log_dir: &Path, app_name: &str, config: &LoggerConfig) -> Result<(), RollingLoggerError> {
    if LOGGER.get().is_some() {
        return Err(RollingLoggerError::AlreadyInitialized);
    }

    let writer = SharedWriter::open(log_dir, app_name, config)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string().to_lowercase()));

    let make_writer = writer.clone();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(move || make_writer.clone())
        .try_init()
        .map_err(|e| RollingLoggerError::Subscriber(e.to_string()))?;

    LOGGER
        .set(writer)
        .map_err(|_| RollingLoggerError::AlreadyInitialized)?;

    tracing::info!(app = app_name, dir = %log_dir.display(), "Logger initialized");
    Ok(())
}

/// Log an info message through the global logger
pub fn info(message: &str) -> Result<(), RollingLoggerError> {
    LOGGER.get().ok_or(RollingLoggerError::NotInitialized)?;
    tracing::info!("{}", message);
    Ok(())
}

/// Log an error message through the global logger
pub fn error(message: &str) -> Result<(), RollingLoggerError> {
    LOGGER.get().ok_or(RollingLoggerError::NotInitialized)?;
    tracing::error!("{}", message);
    Ok(())
}

/// Most recent lines of the global logger (empty before init)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|w| w.recent_lines()).unwrap_or_default()
}
