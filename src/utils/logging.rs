use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::EnvConfig;

/// Logging setup
pub struct LoggingConfig;

impl LoggingConfig {
    /// Initializes logging
    ///
    /// Configured through environment variables:
    /// - RUST_LOG: log level (error, warn, info, debug, trace)
    /// - UGSETUP_DEBUG: verbose debug output
    ///
    /// Logs go to stderr; stdout carries only script output.
    ///
    /// ```no_run
    /// use ugsetup::utils::LoggingConfig;
    ///
    /// LoggingConfig::init();
    /// tracing::info!("ready");
    /// ```
    pub fn init() {
        let is_debug = Self::is_debug();

        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new(Self::default_directive(is_debug)),
        };

        let fmt_layer = if is_debug {
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
        } else {
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .with_thread_ids(false)
        };

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();

        if is_debug {
            tracing::debug!("debug logging enabled");
        }
    }

    /// Initializes logging with a custom filter
    pub fn init_with_filter(filter: &str) {
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new(filter))
            .with(fmt::layer().with_writer(io::stderr))
            .try_init();
    }

    /// Whether debug mode is enabled
    pub fn is_debug() -> bool {
        EnvConfig::is_debug_mode()
    }

    fn default_directive(is_debug: bool) -> &'static str {
        if is_debug {
            "ugsetup=debug,info"
        } else {
            "ugsetup=info,warn"
        }
    }
}
