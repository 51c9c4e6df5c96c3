//! Global logger для симуляции
//!
//! Host (headless runner, tests, будущий клиент) ставит свой `LogPrinter`,
//! симуляция пишет через free functions (`log`, `log_info`, ...).
//! Timestamp добавляется здесь, printer получает готовую строку.
//!
//! Уровень по умолчанию: `Debug`, переопределяется env `SIDEARM_LOG=info|warning|error`.

use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

/// Env переменная с минимальным уровнем логов
pub const LOG_LEVEL_ENV: &str = "SIDEARM_LOG";

static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

pub static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

// Паника в одном тесте не должна выключать логи в остальных
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    *lock(&LOGGER) = Some(logger);
}

pub fn set_log_level(level: LogLevel) {
    *lock(&LOGGER_LEVEL) = level;
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut slot = lock(&LOGGER);
    if slot.is_none() {
        *slot = Some(logger);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        f.pad(name)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < *lock(&LOGGER_LEVEL) {
        return;
    }

    if let Some(logger) = lock(&LOGGER).as_ref() {
        logger.log(level, &stamp(message));
    }
}

fn stamp(message: &str) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    format!("[{}] {}", timestamp, message)
}

/// stdout для Debug/Info, stderr для Warning/Error
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if level >= LogLevel::Warning {
            eprintln!("{:<7} {}", level, message);
        } else {
            println!("{:<7} {}", level, message);
        }
    }
}

/// Ставит `ConsoleLogger` (если host ещё не поставил свой) и уровень из env
pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));

    if let Ok(value) = std::env::var(LOG_LEVEL_ENV) {
        match value.parse() {
            Ok(level) => set_log_level(level),
            Err(err) => log_warning(&format!("{LOG_LEVEL_ENV}: {err}")),
        }
    }
}
