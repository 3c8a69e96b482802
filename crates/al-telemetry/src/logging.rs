//! Structured logging setup.
//!
//! Every line carries the same core fields so logs from different documents
//! can be filtered apart:
//! - `subsystem`: emitting subsystem
//! - `document_id`: advice letter the event concerns
//! - Additional context fields

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber described by `config`.
///
/// Fails on unparseable filter directives, or if a global subscriber is
/// already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("{}: {e}", config.log_level)))?;

    let fmt_layer = if !config.console_output {
        None
    } else if config.json_logs {
        Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        )
    } else {
        Some(tracing_subscriber::fmt::layer().with_target(true).boxed())
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::debug!(
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Structured logging initialized"
    );

    Ok(())
}

/// Route logs into the test harness output.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Log a document-scoped event with standard fields.
#[macro_export]
macro_rules! log_document_event {
    ($level:ident, $subsystem:expr, $msg:expr, $document_id:expr $(, $($field:tt)*)?) => {
        $crate::tracing::$level!(
            subsystem = $subsystem,
            document_id = %$document_id,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a recommendation-scoped event with standard fields.
#[macro_export]
macro_rules! log_recommendation_event {
    ($level:ident, $subsystem:expr, $msg:expr, $document_id:expr, $recommendation_id:expr $(, $($field:tt)*)?) => {
        $crate::tracing::$level!(
            subsystem = $subsystem,
            document_id = %$document_id,
            recommendation_id = %$recommendation_id,
            $($($field)*,)?
            $msg
        )
    };
}
