use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
}

pub struct Logger {
    prefix: Option<String>,
    min_level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, verbose: bool) -> Self {
        let min_level = if verbose { LogLevel::Debug } else { LogLevel::Info };
        Self { prefix, min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let level_tag = match level {
            LogLevel::Debug => "[debug] ",
            LogLevel::Info => "",
        };
        if let Some(ref prefix) = self.prefix {
            println!("[{}][{}] {}{}", timestamp, prefix, level_tag, message);
        } else {
            println!("[{}] {}{}", timestamp, level_tag, message);
        }
    }
}

/// Installs the process-wide logger. Later calls keep the first configuration.
pub fn init_logger(prefix: Option<String>, verbose: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, verbose));
}

// Messages logged before init_logger are dropped, so library code and tests
// can log freely without a host having set anything up.
pub fn log_at(level: LogLevel, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, message);
    }
}

pub fn log(message: &str) {
    log_at(LogLevel::Info, message);
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::logger::log_at($crate::logger::LogLevel::Debug, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_logger_enables_debug() {
        let logger = Logger::new(None, true);
        assert!(logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
    }

    #[test]
    fn test_quiet_logger_filters_debug() {
        let logger = Logger::new(Some("Runner".to_string()), false);
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
    }
}
