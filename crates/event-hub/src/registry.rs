//! # Listener Registry
//!
//! Per-instance storage behind `on`, `off` and `trigger`.
//!
//! ## Layout
//!
//! - `known_events`: every event name that has ever had a listener registered.
//!   Triggering a name outside this set is a no-op.
//! - `listeners_by_event`: event name to listeners, in registration order.
//!   Dispatch order is registration order.
//!
//! Storage is created on the first `on` call. Each registry is owned by one
//! instance; nothing is shared between registries.
//!
//! ## Locking
//!
//! State sits behind a `parking_lot::Mutex`. The lock is never held while a
//! callback runs, so callbacks may re-enter the same registry and other
//! threads may register or remove listeners mid-dispatch.

use crate::config::{DispatchMode, HubConfig};
use crate::error::{HubError, HubResult};
use crate::listener::{Callback, Context, Listener};
use crate::value::Value;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, trace};

struct RegistryState<T> {
    known_events: HashSet<String>,
    listeners_by_event: HashMap<String, Vec<Listener<T>>>,
}

impl<T> RegistryState<T> {
    fn new() -> Self {
        Self {
            known_events: HashSet::new(),
            listeners_by_event: HashMap::new(),
        }
    }
}

/// Event listeners for a single owner of type `T`.
pub struct Registry<T> {
    config: HubConfig,
    state: OnceLock<Mutex<RegistryState<T>>>,
}

impl<T> Registry<T> {
    /// Create an empty registry with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    /// Create an empty registry with the given configuration.
    #[must_use]
    pub fn with_config(config: HubConfig) -> Self {
        Self {
            config,
            state: OnceLock::new(),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Append a listener for `event`.
    ///
    /// `event` must pass the string guard and `callback` the function guard,
    /// checked in that order. On failure nothing is registered.
    pub fn on(
        &self,
        event: Value<T>,
        callback: Value<T>,
        context: Option<Value<T>>,
    ) -> HubResult<()> {
        let name = event_name(&event)?;
        let callback = callback_arg(&callback)?;
        let context = Context::from_arg(context);

        let mut guard = self.state.get_or_init(|| Mutex::new(RegistryState::new())).lock();
        let state = &mut *guard;
        if !state.known_events.contains(name) {
            state.known_events.insert(name.to_string());
        }
        let listeners = state
            .listeners_by_event
            .entry(name.to_string())
            .or_default();
        listeners.push(Listener::new(callback.clone(), context));

        debug!(event = name, listeners = listeners.len(), "Listener registered");
        Ok(())
    }

    /// Remove the earliest listener whose callback is `callback` and whose
    /// context strictly equals `context`.
    ///
    /// Omitting the context only matches listeners registered without one.
    /// A miss is silent.
    pub fn off(
        &self,
        event: Value<T>,
        callback: Value<T>,
        context: Option<Value<T>>,
    ) -> HubResult<()> {
        let name = event_name(&event)?;
        let callback = callback_arg(&callback)?;
        let context = Context::from_arg(context);

        let Some(state) = self.state.get() else {
            return Ok(());
        };
        let mut state = state.lock();
        let Some(listeners) = state.listeners_by_event.get_mut(name) else {
            return Ok(());
        };

        match listeners
            .iter()
            .position(|listener| listener.matches(callback, context.as_ref()))
        {
            Some(index) => {
                listeners.remove(index);
                debug!(
                    event = name,
                    index,
                    listeners = listeners.len(),
                    "Listener removed"
                );
            }
            None => trace!(event = name, "No matching listener to remove"),
        }
        Ok(())
    }

    /// Invoke every listener for `event` in registration order, passing
    /// `owner` to each.
    ///
    /// The first listener error aborts the dispatch and is returned as
    /// [`HubError::ListenerFailed`].
    pub fn trigger(&self, owner: &T, event: Value<T>) -> HubResult<()> {
        let name = event_name(&event)?;

        let Some(state) = self.state.get() else {
            return Ok(());
        };
        if !state.lock().known_events.contains(name) {
            trace!(event = name, "Trigger on unregistered event");
            return Ok(());
        }

        match self.config.dispatch {
            DispatchMode::Snapshot => {
                let listeners = state
                    .lock()
                    .listeners_by_event
                    .get(name)
                    .cloned()
                    .unwrap_or_default();
                trace!(
                    event = name,
                    listeners = listeners.len(),
                    mode = %self.config.dispatch,
                    "Dispatching"
                );
                for listener in &listeners {
                    dispatch(name, listener, owner)?;
                }
            }
            DispatchMode::Live => {
                trace!(event = name, mode = %self.config.dispatch, "Dispatching");
                let mut cursor = 0;
                loop {
                    let next = state
                        .lock()
                        .listeners_by_event
                        .get(name)
                        .and_then(|listeners| listeners.get(cursor))
                        .cloned();
                    let Some(listener) = next else {
                        break;
                    };
                    dispatch(name, &listener, owner)?;
                    cursor += 1;
                }
            }
        }
        Ok(())
    }

    /// Same as [`trigger`](Self::trigger). Extra arguments are accepted and
    /// dropped; listeners always receive the owner alone.
    pub fn trigger_with<I>(&self, owner: &T, event: Value<T>, args: I) -> HubResult<()>
    where
        I: IntoIterator<Item = Value<T>>,
    {
        let ignored = args.into_iter().count();
        if ignored > 0 {
            trace!(ignored, "Extra trigger arguments ignored");
        }
        self.trigger(owner, event)
    }

    /// Listeners for `event`, in dispatch order.
    #[must_use]
    pub fn listeners(&self, event: &str) -> Vec<Listener<T>> {
        self.state
            .get()
            .and_then(|state| state.lock().listeners_by_event.get(event).cloned())
            .unwrap_or_default()
    }

    /// Number of listeners for `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.state
            .get()
            .and_then(|state| state.lock().listeners_by_event.get(event).map(Vec::len))
            .unwrap_or(0)
    }

    /// Whether `event` has ever had a listener registered.
    #[must_use]
    pub fn is_known(&self, event: &str) -> bool {
        self.state
            .get()
            .is_some_and(|state| state.lock().known_events.contains(event))
    }

    /// All event names ever registered, sorted.
    #[must_use]
    pub fn known_events(&self) -> Vec<String> {
        let mut events: Vec<String> = self
            .state
            .get()
            .map(|state| state.lock().known_events.iter().cloned().collect())
            .unwrap_or_default();
        events.sort();
        events
    }
}

fn event_name<T>(event: &Value<T>) -> HubResult<&str> {
    event
        .as_event_name()
        .ok_or_else(|| HubError::invalid_argument("event", "a string", event.type_name()))
}

fn callback_arg<T>(callback: &Value<T>) -> HubResult<&Callback<T>> {
    callback
        .as_callback()
        .ok_or_else(|| HubError::invalid_argument("callback", "a function", callback.type_name()))
}

fn dispatch<T>(event: &str, listener: &Listener<T>, owner: &T) -> HubResult<()> {
    listener.invoke(owner).map_err(|source| {
        debug!(event, error = %source, "Listener failed, aborting dispatch");
        HubError::ListenerFailed {
            event: event.to_string(),
            source,
        }
    })
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("known_events", &self.known_events())
            .finish()
    }
}
