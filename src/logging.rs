//! Logging setup.
//!
//! Diagnostics go to stderr, one line per event. Notices are printed bare;
//! every other level is prefixed with its name so errors stand out.

use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;
use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "frameloop=debug"). When unset, `RUST_LOG` is consulted, then `info`.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Explicit filter directives.
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Initialize the global logger once; later calls are ignored.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = builder(config, Env::default());

        // Another logger may already be installed (e.g. by a test harness)
        let _ = builder.try_init();
        log::debug!("logging initialized");
    });
}

/// Logger for `config`, with `env` supplying the fallback filter.
fn builder(config: &LoggingConfig, env: Env<'_>) -> Builder {
    let mut builder = Builder::from_env(env.default_filter_or("info"));
    if let Some(filter) = &config.filter {
        builder.parse_filters(filter);
    }

    builder
        .target(env_logger::Target::Stderr)
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{level}: {}", record.args()),
        });
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_init_is_idempotent() {
        init_logging(&LoggingConfig {
            filter: Some("warn".to_string()),
        });
        init_logging(&LoggingConfig::default());
        log::warn!("still one logger");
    }

    #[test]
    fn test_default_filter_is_info() {
        let env = Env::new().filter("FRAMELOOP_TEST_UNSET_FILTER");
        let logger = builder(&LoggingConfig::default(), env).build();
        assert_eq!(logger.filter(), LevelFilter::Info);
    }

    #[test]
    fn test_explicit_filter_overrides_default() {
        let config = LoggingConfig {
            filter: Some("warn".to_string()),
        };
        let env = Env::new().filter("FRAMELOOP_TEST_UNSET_FILTER");
        let logger = builder(&config, env).build();
        assert_eq!(logger.filter(), LevelFilter::Warn);
    }
}
