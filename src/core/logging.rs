use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LogFormat;
use crate::error::{AppError, Result};

pub const DEFAULT_LOG_FILTER: &str = "warn,config_cluster_operator=info";

/// Initialize structured logging system
///
/// `RUST_LOG` takes precedence over [`DEFAULT_LOG_FILTER`].
pub fn init_structured_logging(format: LogFormat) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let fmt_layer = match format {
        LogFormat::Json => fmt::layer()
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .with_timer(fmt::time::ChronoUtc::rfc_3339())
            .json()
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_span_events(FmtSpan::NONE)
            .with_timer(fmt::time::ChronoUtc::rfc_3339())
            .compact()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::ConfigurationError(format!("logging already initialized: {}", e)))
}
