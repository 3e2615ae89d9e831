//! Tracing subscriber setup shared by gsort binaries
//!
//! Tracing is installed before configuration is resolved so the resolver's
//! own events are emitted. The filter sits behind a reload layer; once the
//! config is loaded its level is applied through the returned [`LogHandle`].

use crate::{Error, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Environment variable overriding the configured log level
pub const LOG_LEVEL_ENV: &str = "GSORT_LOG_LEVEL";

/// Level used until (or unless) a configured level is applied
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `GSORT_LOG_LEVEL`, trimmed and lowercased, when set and non-blank
pub fn log_level_override() -> Option<String> {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .map(|level| level.trim().to_lowercase())
        .filter(|level| !level.is_empty())
}

/// Pick the effective log level.
///
/// Priority: `GSORT_LOG_LEVEL` > configured level. `RUST_LOG`, when set, is
/// honoured by [`init_tracing`] and overrides both.
pub fn resolve_log_level(configured: &str) -> String {
    log_level_override().unwrap_or_else(|| configured.to_string())
}

fn parse_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", level, e)))
}

/// Control over the installed filter
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Replace the active filter; a no-op when `RUST_LOG` chose it
    pub fn set_level(&self, level: &str) -> Result<()> {
        if self.from_env {
            return Ok(());
        }
        let filter = parse_filter(level)?;
        self.handle
            .reload(filter)
            .map_err(|e| Error::Config(format!("Failed to apply log level '{}': {}", level, e)))
    }

    /// Current filter directives, as displayed by `EnvFilter`
    pub fn current(&self) -> Option<String> {
        self.handle.with_current(|filter| filter.to_string()).ok()
    }
}

fn reloadable(filter: EnvFilter, from_env: bool) -> (reload::Layer<EnvFilter, Registry>, LogHandle) {
    let (layer, handle) = reload::Layer::new(filter);
    (layer, LogHandle { handle, from_env })
}

/// Install the global subscriber: fmt output on stderr behind a reloadable filter.
///
/// `RUST_LOG` takes precedence over `level` so per-module filters keep working.
pub fn init_tracing(level: &str) -> Result<LogHandle> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (parse_filter(level)?, false),
    };
    let (filter, handle) = reloadable(filter, from_env);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::Config(format!("Tracing already initialised: {}", e)))?;

    Ok(handle)
}
