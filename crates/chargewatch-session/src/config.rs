//! Session manager configuration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Configuration for the session manager.
///
/// Create one with `SessionConfig::default()` and override only the fields
/// you care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Length of the trailing window [`summarize`](crate::SessionManager::summarize)
    /// counts events in, in seconds. Both ends of the window are exclusive.
    ///
    /// Default: 60 seconds.
    pub summary_window_secs: u64,
}

impl SessionConfig {
    /// The summary window as a signed duration.
    ///
    /// Values too large for chrono saturate to the largest representable
    /// duration, which simply makes the window unbounded in practice.
    pub fn summary_window(&self) -> TimeDelta {
        i64::try_from(self.summary_window_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            summary_window_secs: 60,
        }
    }
}
