//! FILENAME: app/src/logging.rs
// PURPOSE: Unified logging for the dashboard.
// CONTEXT: Every line has the form `seq|level|category|message`. The sequence
// is global and monotonic so interleaved output can be sorted afterwards.
// The `log` facade is routed through the same writer, with the record target
// as category.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;

pub use log::Level;

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Global sequence counter
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Global log file handle
pub static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

static LOGGER: UnifiedLogger = UnifiedLogger;

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

fn level_code(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}

pub fn format_line(seq: u64, level: Level, category: &str, message: &str) -> String {
    format!("{}|{}|{}|{}", seq, level_code(level), category, message)
}

/// Write a log line in unified format (stderr, plus the log file if open)
pub fn write_log(level: Level, category: &str, message: &str) {
    if level > log::max_level() {
        return;
    }
    let line = format_line(next_seq(), level, category, message);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            if let Err(e) = writeln!(file, "{}", line) {
                eprintln!("[LOG_ERROR] Failed to write: {}", e);
            }
            let _ = file.flush();
        }
    }

    eprintln!("{}", line);
}

/// Write an ENTER log line for command entry
pub fn write_log_enter(level: Level, category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(level, category, &message);
}

// ============================================================================
// LOG FACADE BACKEND
// ============================================================================

/// `log::Log` backend writing unified lines.
pub struct UnifiedLogger;

impl Log for UnifiedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            write_log(record.level(), record.target(), &record.args().to_string());
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

/// Installs the logger and sets the level. The log file, if given, is
/// truncated.
///
/// Calling this twice keeps the first logger but still applies the new level
/// and file.
pub fn init_logging(log_file: Option<&Path>, level: LevelFilter) -> std::io::Result<()> {
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = Some(file);
        }
    }

    // Already installed by an earlier call
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
    Ok(())
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Debug, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Info, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Warn, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Error, $cat, &format!($($arg)*))
    };
}

// ENTER macro for command tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter($crate::logging::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter($crate::logging::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub use log_debug;
pub use log_enter;
pub use log_error;
pub use log_info;
pub use log_warn;
