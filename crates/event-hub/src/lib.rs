//! # Event Hub - Per-Instance Event Listeners
//!
//! Gives any owning type three operations:
//!
//! - `on(event, callback, context?)`: append a listener
//! - `off(event, callback, context?)`: remove the first matching listener
//! - `trigger(event)`: call every listener for `event`, in registration
//!   order, synchronously, passing the owner as the only argument
//!
//! ## Dispatch Context
//!
//! A listener registered with a context runs against that context; without
//! one it runs against the owner. Object, function and boxed-string contexts
//! are held weakly and never kept alive by the registry.
//!
//! ```text
//!   owner.trigger("ping")
//!          │
//!          ▼
//!   ┌─────────────────────┐
//!   │ Registry<Owner>     │   "ping" → [ (cb1, -), (cb2, obj) ]
//!   └─────────────────────┘
//!          │
//!          ├──► cb1(Receiver::Owner(owner),   owner)
//!          └──► cb2(Receiver::Context(obj),   owner)
//! ```
//!
//! ## Errors
//!
//! Arguments are checked at runtime (event must be a string, callback a
//! function) and fail with `HubError::InvalidArgument`. A listener error
//! stops the dispatch and comes back as `HubError::ListenerFailed`.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod config;
pub mod error;
pub mod events;
pub mod listener;
pub mod registry;
pub mod value;

// Re-export main types
pub use config::{DispatchMode, HubConfig};
pub use error::{HubError, HubResult};
pub use events::{EventHub, Events};
pub use listener::{callback, Callback, Context, Listener, Receiver};
pub use registry::Registry;
pub use value::Value;
