//! Router configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Router settings
///
/// Deserializes from a camelCase object so the same struct can come from a
/// JSON file or straight from JavaScript. Missing keys take their defaults.
///
/// # Examples
///
/// ```
/// use rhtmx_hash_router::RouterConfig;
///
/// let config: RouterConfig = serde_json::from_str(r#"{ "linkClass": "nav" }"#).unwrap();
/// assert_eq!(config.link_class, "nav");
/// assert_eq!(config.link_settle_delay_ms, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouterConfig {
    /// CSS class marking anchors the router should follow
    pub link_class: String,

    /// Delay between a routed anchor click and reading its target, so the
    /// browser's own fragment update lands first
    pub link_settle_delay_ms: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            link_class: "ctrl".to_string(),
            link_settle_delay_ms: 20,
        }
    }
}

impl RouterConfig {
    pub fn with_link_class(mut self, class: impl Into<String>) -> Self {
        self.link_class = class.into();
        self
    }

    pub fn with_link_settle_delay(mut self, delay: Duration) -> Self {
        self.link_settle_delay_ms = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        self
    }

    pub fn link_settle_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.link_settle_delay_ms))
    }

    /// CSS selector for routed anchors, e.g. `a.ctrl`
    pub fn link_selector(&self) -> String {
        format!("a.{}", self.link_class)
    }
}
