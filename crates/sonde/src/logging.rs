//! Diagnostics sink configuration.
//!
//! The library never installs a global subscriber. A [`LoggingConfig`] builds
//! a [`Dispatch`] that is handed to a [`Reporter`](crate::Reporter), which
//! runs its pipeline under it.

use tracing::{Dispatch, Level};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt};

/// Logging configuration for a report run.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for everything outside this crate.
    pub level: Level,
    /// Log level for sonde itself.
    pub sonde_level: Level,
    /// Emit JSON lines instead of human-readable text.
    pub json_format: bool,
    /// Explicit filter directives; overrides both levels.
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            sonde_level: Level::INFO,
            json_format: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Debug output from sonde, for troubleshooting a configuration.
    pub fn verbose() -> Self {
        Self {
            level: Level::INFO,
            sonde_level: Level::DEBUG,
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_sonde_level(mut self, level: Level) -> Self {
        self.sonde_level = level;
        self
    }

    pub fn with_json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directives for this configuration.
    pub fn env_filter(&self) -> String {
        match &self.env_filter {
            Some(filter) => filter.clone(),
            None => format!(
                "{},sonde={}",
                self.level.as_str().to_lowercase(),
                self.sonde_level.as_str().to_lowercase()
            ),
        }
    }

    /// Build the dispatcher. `RUST_LOG`, when set, takes precedence.
    ///
    /// Records are written to standard error.
    pub fn build_dispatch(&self) -> Dispatch {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.env_filter()));

        let fmt_layer = if self.json_format {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer);
        Dispatch::new(subscriber)
    }
}
