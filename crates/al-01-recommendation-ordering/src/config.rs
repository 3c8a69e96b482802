//! Configuration for Recommendation Ordering Subsystem

use serde::{Deserialize, Serialize};
use std::env;

/// Ordering service configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Commit attempts after the first one that lost an optimistic race
    pub max_commit_retries: u32,
    /// Upper bound on recommendations per advice letter
    pub max_recommendations_per_document: usize,
    /// Forward committed changes to the event publisher
    pub publish_events: bool,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            max_commit_retries: 3,
            max_recommendations_per_document: 500,
            publish_events: true,
        }
    }
}

impl OrderingConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AL_MAX_COMMIT_RETRIES`: default 3
    /// - `AL_MAX_RECOMMENDATIONS`: default 500
    /// - `AL_PUBLISH_EVENTS`: default true
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            max_commit_retries: lookup("AL_MAX_COMMIT_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_commit_retries),

            max_recommendations_per_document: lookup("AL_MAX_RECOMMENDATIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_recommendations_per_document),

            publish_events: lookup("AL_PUBLISH_EVENTS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.publish_events),
        }
    }
}
