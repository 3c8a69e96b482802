//! # Advice-Letter Telemetry
//!
//! Structured logging for the advice-letter subsystems, built on
//! `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use al_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AL_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directives |
//! | `AL_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `AL_JSON_LOGS` | `false` | JSON output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, init_test_logging};

#[doc(hidden)]
pub use tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
