//! Error types for the event hub

use thiserror::Error;

/// Errors raised by `on`, `off` and `trigger`.
#[derive(Debug, Error)]
pub enum HubError {
    /// An argument failed its type guard. Raised before the registry is touched.
    #[error("Invalid argument `{param}`: expected {expected}, found {found}")]
    InvalidArgument {
        param: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A listener returned an error during dispatch. Listeners after it were not invoked.
    #[error("Listener for event `{event}` failed: {source}")]
    ListenerFailed {
        event: String,
        #[source]
        source: anyhow::Error,
    },
}

impl HubError {
    pub(crate) fn invalid_argument(
        param: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::InvalidArgument {
            param,
            expected,
            found,
        }
    }

    /// Whether this is a failed argument check.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Result alias used throughout the crate.
pub type HubResult<T> = Result<T, HubError>;
