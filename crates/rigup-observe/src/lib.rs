//! Logging initialization for the rigup toolkit.
//!
//! One call in `main` wires a `tracing` subscriber with an env-filter
//! level, RFC3339 timestamps, and either a human-oriented text format
//! or JSON lines for log shippers.

mod config;
pub use config::LoggerConfig;

mod error;
pub use error::LoggerError;

mod format;
pub use format::LoggerFormat;

mod init;

pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LoggerFormat::Text => init::text(cfg),
        LoggerFormat::Json => init::json(cfg),
    }
}
