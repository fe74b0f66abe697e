//! Runtime options for a statechart.

use serde::{Deserialize, Serialize};

/// Options controlling monitoring, tracing and initialization.
///
/// Every field has a default, so partial JSON documents are accepted.
///
/// # Example
///
/// ```rust
/// use statechart::config::StatechartOptions;
///
/// let options = StatechartOptions::from_json(r#"{ "monitor_is_active": true }"#).unwrap();
/// assert!(options.monitor_is_active);
/// assert!(options.auto_init);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatechartOptions {
    /// Record every enter/exit notification in a monitor.
    pub monitor_is_active: bool,
    /// Log each enter/exit at info level instead of trace.
    pub trace: bool,
    /// Enter the initial configuration as part of building.
    pub auto_init: bool,
    /// Maximum number of journal records kept; `None` keeps all.
    pub journal_capacity: Option<usize>,
}

impl Default for StatechartOptions {
    fn default() -> Self {
        Self {
            monitor_is_active: false,
            trace: false,
            auto_init: true,
            journal_capacity: Some(256),
        }
    }
}

impl StatechartOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
