//! Hub configuration
//!
//! # Example
//!
//! ```
//! use event_hub::{DispatchMode, HubConfig};
//!
//! let config = HubConfig::default().with_dispatch(DispatchMode::Live);
//! assert_eq!(config.dispatch, DispatchMode::Live);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// How `trigger` walks an event's listener sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Copy the sequence when dispatch starts. Listeners added or removed
    /// by a running callback take effect on the next `trigger`.
    #[default]
    Snapshot,
    /// Walk the live sequence with an index cursor, re-reading it after
    /// every callback. A callback that removes an earlier listener shifts
    /// the next one under the cursor (it is skipped); one that appends a
    /// listener to the same event sees it invoked in the same dispatch.
    Live,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot => f.write_str("snapshot"),
            Self::Live => f.write_str("live"),
        }
    }
}

/// Per-hub configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Dispatch strategy for `trigger`
    pub dispatch: DispatchMode,
}

impl HubConfig {
    /// Builder-style method to set the dispatch mode
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }
}
