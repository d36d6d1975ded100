use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tracker tuning knobs
///
/// Defaults: the `item` class marker, a 10 ms watchdog poll, and a 3 second
/// dwell threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Class marking an element as a trackable item
    pub item_class: String,

    /// Watchdog poll period in milliseconds
    pub poll_interval_ms: u64,

    /// Dwell threshold in milliseconds; exceeding it triggers the one-time
    /// threshold diagnostic
    pub threshold_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            item_class: "item".to_string(),
            poll_interval_ms: 10,
            threshold_ms: 3000,
        }
    }
}

impl TrackerConfig {
    /// Poll period as a `Duration`, clamped to 1 ms; tokio rejects a
    /// zero-length interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn threshold(&self) -> Duration {
        Duration::from_millis(self.threshold_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = TrackerConfig::default();
        assert_eq!(config.item_class, "item");
        assert_eq!(config.poll_interval_ms, 10);
        assert_eq!(config.threshold_ms, 3000);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: TrackerConfig = serde_json::from_str(r#"{"thresholdMs": 500}"#).unwrap();
        assert_eq!(config.threshold_ms, 500);
        assert_eq!(config.poll_interval_ms, 10);
        assert_eq!(config.item_class, "item");
    }

    #[test]
    fn test_zero_poll_interval_is_clamped() {
        let config = TrackerConfig {
            poll_interval_ms: 0,
            ..TrackerConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
