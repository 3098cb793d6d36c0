//! Logging infrastructure for gapedit.
//!
//! Backs the `log` facade with a process-wide logger that keeps the most
//! recent entries in memory and appends every accepted record to a file.

use chrono::Local;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp in HH:MM:SS format
    pub timestamp: String,
    /// Message level
    pub level: LogLevel,
    /// Module path the record came from
    pub target: String,
    /// Message text
    pub message: String,
}

impl LogEntry {
    /// Render the entry the way it is written to the log file
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {} {}: {}",
            self.timestamp,
            self.level.to_str(),
            self.target,
            self.message
        )
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to string
    pub fn to_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Facade filter admitting this level and everything more severe
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            // Trace is folded into debug
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Mutable logger state
#[derive(Debug)]
struct LogState {
    /// Last N entries
    entries: VecDeque<LogEntry>,
    /// Maximum number of entries kept in memory
    max_entries: usize,
    /// Log file path, if file output is enabled
    file_path: Option<PathBuf>,
}

impl LogState {
    fn new(file_path: Option<PathBuf>, max_entries: usize) -> Self {
        if let Some(path) = &file_path {
            // Create parent directory if it doesn't exist
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }

            // Clear log file on startup
            if let Ok(mut file) = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
            {
                let _ = writeln!(file, "=== gapedit log start ===");
            }
        }

        Self {
            entries: VecDeque::new(),
            max_entries,
            file_path,
        }
    }

    fn add_entry(&mut self, entry: LogEntry) {
        // Write to file (create if deleted)
        if let Some(path) = &self.file_path {
            if let Ok(mut file) = OpenOptions::new().append(true).create(true).open(path) {
                let _ = writeln!(file, "{}", entry.format_line());
            }
        }

        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}

/// `log::Log` implementation installed by [`init`]
#[derive(Debug)]
struct Logger {
    /// Minimum level to record
    min_level: LogLevel,
    state: Mutex<LogState>,
}

impl Logger {
    fn new(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) -> Self {
        Self {
            min_level,
            state: Mutex::new(LogState::new(file_path, max_entries)),
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        LogLevel::from(metadata.level()) >= self.min_level
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level: record.level().into(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };

        if let Ok(mut state) = self.state.lock() {
            state.add_entry(entry);
        }
    }

    fn flush(&self) {}
}

/// Global logger instance that persists for the application lifetime.
static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Initialize the global logger
///
/// Must be called once at application startup. Later calls keep the first
/// configuration and return `false`.
///
/// # Arguments
///
/// * `file_path` - Log file path, `None` keeps entries in memory only
/// * `max_entries` - Maximum number of log entries to keep in memory
/// * `min_level` - Minimum log level to record (Debug, Info, Warn, Error)
pub fn init(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) -> bool {
    let mut fresh = false;
    let logger = LOGGER.get_or_init(|| {
        fresh = true;
        Logger::new(file_path, max_entries, min_level)
    });

    if fresh && log::set_logger(logger).is_ok() {
        log::set_max_level(min_level.to_level_filter());
        true
    } else {
        false
    }
}

/// Get all log entries
///
/// Returns the entries currently held in memory, oldest first.
/// Empty when the logger was never initialized.
pub fn entries() -> Vec<LogEntry> {
    LOGGER
        .get()
        .and_then(|logger| logger.state.lock().ok())
        .map(|state| state.entries.iter().cloned().collect())
        .unwrap_or_default()
}
