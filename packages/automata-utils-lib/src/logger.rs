use std::{fmt::Display, fs, str::FromStr, sync::Mutex};

use anyhow::Context;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::config::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

/// Installs a global `tracing` subscriber as described by the config.
///
/// Does nothing if logging is disabled. Events go to stderr, or to
/// `./logs/<name>_<timestamp>.txt` if `log_file` is set. Fails if a global
/// subscriber is already installed or the log file cannot be created.
pub fn init_logging(config: &LoggerConfig, name: &str) -> anyhow::Result<()> {
    if !*config.get_enabled() {
        return Ok(());
    }

    let builder = tracing_subscriber::fmt()
        .with_max_level(config.get_log_level().to_tracing_level())
        .with_target(false);

    if *config.get_log_file() {
        let path = format!(
            "./logs/{}_{}.txt",
            name,
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        );
        fs::create_dir_all("./logs").context("failed to create the log directory")?;
        let file = fs::File::create(&path).with_context(|| format!("failed to create {path}"))?;

        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install the tracing subscriber: {e}"))?;
    } else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install the tracing subscriber: {e}"))?;
    }

    Ok(())
}

#[test]
fn test_log_level_from_str() {
    assert_eq!("DBG".parse::<LogLevel>(), Ok(LogLevel::Debug));
    assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
    assert!("verbose".parse::<LogLevel>().is_err());
}
