//! Rolling Logger
//!
//! `log` backend that keeps the last N formatted lines in memory so the UI
//! can show or export them, and forwards every line to the browser console
//! (wasm32) or stderr.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

#[derive(Debug)]
pub enum LoggerError {
    /// `init_logger` was not called
    NotInitialized,
    /// Another global logger is already installed
    AlreadySet,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::NotInitialized => write!(f, "rolling logger not initialized"),
            LoggerError::AlreadySet => write!(f, "a global logger is already set"),
        }
    }
}

impl std::error::Error for LoggerError {}

/// Circular buffer of formatted log lines
pub struct RollingLogger {
    app_name: String,
    capacity: usize,
    level: LevelFilter,
    lines: Mutex<VecDeque<String>>,
}

impl RollingLogger {
    pub fn new(app_name: impl Into<String>, capacity: usize) -> Self {
        Self {
            app_name: app_name.into(),
            capacity: capacity.max(1),
            level: LevelFilter::Info,
            lines: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    fn format(&self, level: Level, target: &str, message: &fmt::Arguments<'_>) -> String {
        format!(
            "[{}] {} {:<5} {}: {}",
            chrono::Utc::now().format("%H:%M:%S%.3f"),
            self.app_name,
            level,
            target,
            message
        )
    }

    /// Store a line, dropping the oldest once full
    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format(record.level(), record.target(), record.args());
        emit(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global logger
pub fn init_logger(app_name: &str, capacity: usize) -> Result<(), LoggerError> {
    init_logger_with_level(app_name, capacity, LevelFilter::Info)
}

pub fn init_logger_with_level(app_name: &str, capacity: usize, level: LevelFilter) -> Result<(), LoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(app_name, capacity).with_level(level));
    log::set_logger(logger).map_err(|_| LoggerError::AlreadySet)?;
    log::set_max_level(level);
    Ok(())
}

/// Lines buffered by the global logger
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingLogger::lines).unwrap_or_default()
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    write(Level::Info, message)
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    write(Level::Error, message)
}

fn write(level: Level, message: &str) -> Result<(), LoggerError> {
    let logger = LOGGER.get().ok_or(LoggerError::NotInitialized)?;
    logger.log(
        &Record::builder()
            .level(level)
            .target("app")
            .args(format_args!("{}", message))
            .build(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(logger: &RollingLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("test")
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_buffer_wraps_at_capacity() {
        let logger = RollingLogger::new("Test", 3);
        for i in 0..5 {
            record(&logger, Level::Info, &format!("line {}", i));
        }
        let lines = logger.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("line 2"));
        assert!(lines[2].ends_with("line 4"));
    }

    #[test]
    fn test_level_filter() {
        let logger = RollingLogger::new("Test", 10).with_level(LevelFilter::Warn);
        record(&logger, Level::Info, "quiet");
        record(&logger, Level::Error, "loud");
        let lines = logger.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("Test"));
    }

    #[test]
    fn test_clear() {
        let logger = RollingLogger::new("Test", 2);
        record(&logger, Level::Info, "x");
        logger.clear();
        assert!(logger.lines().is_empty());
    }
}
