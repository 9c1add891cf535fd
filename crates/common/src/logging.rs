//! Provides utilities to initialize logging.
use std::env;

use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Environment variable name for the service label, which is appended to the
/// whoami string.
pub const SVC_LABEL_ENVVAR: &str = "WALLETKIT_SVC_LABEL";

/// Set to `1` to include source file names in log lines.
pub const LOG_FILE_ENVVAR: &str = "LOG_FILE";

/// Set to `1` to include source line numbers in log lines.
pub const LOG_LINE_NUM_ENVVAR: &str = "LOG_LINE_NUM";

/// Configuration for the logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// The whoami string, which is used to identify the process in logs.
    whoami: String,

    /// Write logs to stderr instead of stdout, leaving stdout for command output.
    stderr: bool,
}

impl LoggerConfig {
    /// Creates a new instance with whoami set.
    pub const fn new(whoami: String) -> Self {
        Self {
            whoami,
            stderr: false,
        }
    }

    /// Creates a new instance with the whoami string derived from the provided base name.
    pub fn with_base_name(s: &str) -> Self {
        Self::new(get_whoami_string(s))
    }

    /// Sends log output to stderr.
    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    /// The whoami string.
    pub fn whoami(&self) -> &str {
        &self.whoami
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name("(walletkit)")
    }
}

/// Initializes the logging subsystem with the provided config.
pub fn init(config: LoggerConfig) {
    let filt = tracing_subscriber::EnvFilter::from_default_env();

    let log_file = env::var(LOG_FILE_ENVVAR).is_ok_and(|v| v == "1");
    let log_line_num = env::var(LOG_LINE_NUM_ENVVAR).is_ok_and(|v| v == "1");

    let format = tracing_subscriber::fmt::format()
        .with_file(log_file)
        .with_line_number(log_line_num);

    if config.stderr {
        let sub = tracing_subscriber::fmt::layer()
            .compact()
            .event_format(format)
            .with_writer(std::io::stderr)
            .with_filter(filt);
        tracing_subscriber::registry().with(sub).init();
    } else {
        let sub = tracing_subscriber::fmt::layer()
            .compact()
            .event_format(format)
            .with_filter(filt);
        tracing_subscriber::registry().with(sub).init();
    }

    info!(whoami = %config.whoami(), "logging started");
}

/// Gets the service label from the standard envvar, which should be included
/// in the whoami string.
pub fn get_service_label_from_env() -> Option<String> {
    env::var(SVC_LABEL_ENVVAR).ok()
}

/// Computes a standard whoami string.
pub fn get_whoami_string(base: &str) -> String {
    match get_service_label_from_env() {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whoami_without_label() {
        if get_service_label_from_env().is_none() {
            assert_eq!(get_whoami_string("key-cli"), "key-cli");
        }
    }

    #[test]
    fn test_config_builders() {
        let config = LoggerConfig::new("key-cli".to_string()).with_stderr();
        assert_eq!(config.whoami(), "key-cli");
        assert!(config.stderr);
    }
}
