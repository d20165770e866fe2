use crate::config::{AppEnvironment, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Filter directive used when neither `RUST_LOG` nor `APP_LOG_LEVEL` is
/// set. Development runs keep the posting pipeline's debug-level events
/// (quota decisions, sanitizer rejections); everything else stays at info.
fn default_directive(environment: AppEnvironment) -> &'static str {
    match environment {
        AppEnvironment::Development => "debug",
        AppEnvironment::Test | AppEnvironment::Production => "info",
    }
}

/// Directive resolution order: `RUST_LOG` wins, then the configured
/// `APP_LOG_LEVEL`, then the environment default.
fn resolve_directive(environment: AppEnvironment, config: &TelemetryConfig) -> &str {
    config
        .log_level
        .as_deref()
        .unwrap_or_else(|| default_directive(environment))
}

pub fn init(
    environment: AppEnvironment,
    config: &TelemetryConfig,
) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = resolve_directive(environment, config);
            EnvFilter::try_new(directive).map_err(|source| TelemetryError::EnvFilter {
                value: directive.to_string(),
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
