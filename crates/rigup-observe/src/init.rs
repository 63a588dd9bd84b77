use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::LoggerConfig;
use crate::error::LoggerError;

pub(crate) fn text(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = env_filter(&cfg.level)?;
    let fmt_layer = fmt::layer()
        .with_ansi(cfg.use_color)
        .with_target(cfg.with_targets)
        .with_timer(rfc3339_timer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(init_error)
}

pub(crate) fn json(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = env_filter(&cfg.level)?;
    let fmt_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(rfc3339_timer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(init_error)
}

fn env_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(level).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

fn rfc3339_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn init_error(e: impl std::fmt::Display) -> LoggerError {
    let message = e.to_string();
    if message.contains("SetGlobalDefaultError") {
        LoggerError::AlreadyInitialized
    } else {
        LoggerError::InitializationFailed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_directives_are_validated_up_front() {
        assert!(env_filter("info").is_ok());
        assert!(env_filter("rigup_market=debug,info").is_ok());
        assert!(matches!(
            env_filter("==nonsense=="),
            Err(LoggerError::InvalidLogLevel(_))
        ));
    }
}
