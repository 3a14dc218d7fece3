//! `log` macros are forwarded to a global slog logger writing to stderr,
//! either terminal formatted or one json object per line
use std::io;
use std::str::FromStr;

use log::{self, LevelFilter, SetLoggerError};
use slog::{Drain, Level, Logger};
use slog_async::Async;
use slog_json::Json;
use slog_scope::{self, GlobalLoggerGuard};
use slog_stdlog;
use slog_term::{FullFormat, TermDecorator};

use config::Logging;

/// Level from config, unknown names mean `info`
pub fn level_filter(name: &str) -> LevelFilter {
    LevelFilter::from_str(name).unwrap_or(LevelFilter::Info)
}

fn slog_level(filter: LevelFilter) -> Level {
    match filter {
        LevelFilter::Off | LevelFilter::Error => Level::Error,
        LevelFilter::Warn => Level::Warning,
        LevelFilter::Info => Level::Info,
        LevelFilter::Debug => Level::Debug,
        LevelFilter::Trace => Level::Trace,
    }
}

pub fn create_logger(config: &Logging) -> Logger {
    let drain = if config.json {
        let drain = Json::new(io::stderr()).add_default_keys().build().fuse();
        Async::new(drain).build()
    } else {
        let decorator = TermDecorator::new().stderr().build();
        let drain = FullFormat::new(decorator).build().fuse();
        Async::new(drain).build()
    };
    let drain = drain.filter_level(slog_level(level_filter(&config.level))).fuse();

    Logger::root(drain, slog_o!())
}

/// Installs the global logger. Records are dropped once the guard goes out of scope.
pub fn init(config: &Logging) -> Result<GlobalLoggerGuard, SetLoggerError> {
    let guard = slog_scope::set_global_logger(create_logger(config));
    slog_stdlog::init()?;
    log::set_max_level(level_filter(&config.level));
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(level_filter("warn"), LevelFilter::Warn);
        assert_eq!(level_filter("DEBUG"), LevelFilter::Debug);
        assert_eq!(level_filter("off"), LevelFilter::Off);
        assert_eq!(level_filter("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_slog_levels() {
        assert_eq!(slog_level(LevelFilter::Warn), Level::Warning);
        assert_eq!(slog_level(LevelFilter::Info), Level::Info);
        assert_eq!(slog_level(LevelFilter::Trace), Level::Trace);
    }
}
