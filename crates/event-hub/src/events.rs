//! # Events Capability
//!
//! Any type that holds a [`Registry`] of itself can implement [`Events`] and
//! gains `on`, `off` and `trigger`. `trigger` hands `self` to every listener.
//!
//! ```
//! use event_hub::{callback, Events, Registry};
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! struct Door {
//!     opened: AtomicU32,
//!     events: Registry<Door>,
//! }
//!
//! impl Events for Door {
//!     fn registry(&self) -> &Registry<Self> {
//!         &self.events
//!     }
//! }
//!
//! let door = Door { opened: AtomicU32::new(0), events: Registry::new() };
//! door.on("open", callback(|_, door: &Door| {
//!     door.opened.fetch_add(1, Ordering::SeqCst);
//!     Ok(())
//! }), None)?;
//! door.trigger("open")?;
//! assert_eq!(door.opened.load(Ordering::SeqCst), 1);
//! # Ok::<(), event_hub::HubError>(())
//! ```

use crate::config::HubConfig;
use crate::error::HubResult;
use crate::registry::Registry;
use crate::value::Value;

/// Event registration and dispatch for an owning type.
pub trait Events: Sized {
    /// The registry owned by this instance.
    fn registry(&self) -> &Registry<Self>;

    /// Register `callback` for `event`, optionally bound to `context`.
    fn on(
        &self,
        event: impl Into<Value<Self>>,
        callback: impl Into<Value<Self>>,
        context: Option<Value<Self>>,
    ) -> HubResult<()> {
        self.registry().on(event.into(), callback.into(), context)
    }

    /// Remove the first listener matching `callback` and `context`.
    fn off(
        &self,
        event: impl Into<Value<Self>>,
        callback: impl Into<Value<Self>>,
        context: Option<Value<Self>>,
    ) -> HubResult<()> {
        self.registry().off(event.into(), callback.into(), context)
    }

    /// Invoke every listener for `event` with `self` as the argument.
    fn trigger(&self, event: impl Into<Value<Self>>) -> HubResult<()> {
        self.registry().trigger(self, event.into())
    }

    /// Like [`trigger`](Self::trigger); `args` are accepted and ignored.
    fn trigger_with<I>(&self, event: impl Into<Value<Self>>, args: I) -> HubResult<()>
    where
        I: IntoIterator<Item = Value<Self>>,
    {
        self.registry().trigger_with(self, event.into(), args)
    }

    /// Number of listeners currently registered for `event`.
    fn listener_count(&self, event: &str) -> usize {
        self.registry().listener_count(event)
    }
}

/// A bare hub: an owner whose only state is its registry.
#[derive(Debug, Default)]
pub struct EventHub {
    registry: Registry<EventHub>,
}

impl EventHub {
    /// Create a hub with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hub with the given configuration.
    #[must_use]
    pub fn with_config(config: HubConfig) -> Self {
        Self {
            registry: Registry::with_config(config),
        }
    }
}

impl Events for EventHub {
    fn registry(&self) -> &Registry<Self> {
        &self.registry
    }
}
