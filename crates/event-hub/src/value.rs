//! # Host Values
//!
//! The hub accepts "any value" for its arguments and decides at runtime
//! whether a value is an acceptable event name or callback. `Value` is that
//! runtime category, and the guards on it define the accept/reject boundary:
//!
//! - an event name is a primitive `String` or an object-wrapped `BoxedString`
//! - a callback is a `Function`
//! - a context may be anything
//!
//! `Undefined` and `Null` are the host's absent values. Passing either as a
//! context is the same as passing no context at all.

use crate::listener::{callback_addr, Callback, Receiver};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A dynamically-typed argument to `on`, `off` or `trigger`.
///
/// `T` is the owner type, which fixes the callback signature.
pub enum Value<T> {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    /// Primitive string, compared by content.
    String(String),
    /// Object-wrapped string, compared by identity.
    BoxedString(Arc<str>),
    Function(Callback<T>),
    Object(Arc<dyn Any + Send + Sync>),
}

impl<T> Value<T> {
    /// Wrap a shared object. The hub only ever keeps a weak reference to it.
    pub fn object<O: Any + Send + Sync>(obj: &Arc<O>) -> Self {
        let obj: Arc<dyn Any + Send + Sync> = obj.clone();
        Self::Object(obj)
    }

    /// Wrap a closure as a callback value.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(Receiver<'_, T>, &T) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Create an object-wrapped string.
    pub fn boxed_string(s: &str) -> Self {
        Self::BoxedString(Arc::from(s))
    }

    /// Runtime category, as reported in `InvalidArgument` errors.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::BoxedString(_) | Self::Object(_) => "object",
            Self::Function(_) => "function",
        }
    }

    /// String guard. Accepts primitive and boxed strings alike.
    #[must_use]
    pub fn as_event_name(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::BoxedString(s) => Some(s),
            _ => None,
        }
    }

    /// Function guard.
    #[must_use]
    pub fn as_callback(&self) -> Option<&Callback<T>> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// True for `Undefined` and `Null`.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Strict equality: primitives by value, everything else by identity.
    #[must_use]
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            // NaN != NaN falls out of f64 comparison
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::BoxedString(a), Self::BoxedString(b)) => Arc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => callback_addr(a) == callback_addr(b),
            (Self::Object(a), Self::Object(b)) => object_addr(a) == object_addr(b),
            _ => false,
        }
    }
}

pub(crate) fn object_addr(obj: &Arc<dyn Any + Send + Sync>) -> *const () {
    Arc::as_ptr(obj) as *const ()
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Undefined => Self::Undefined,
            Self::Null => Self::Null,
            Self::Bool(b) => Self::Bool(*b),
            Self::Number(n) => Self::Number(*n),
            Self::String(s) => Self::String(s.clone()),
            Self::BoxedString(s) => Self::BoxedString(s.clone()),
            Self::Function(f) => Self::Function(f.clone()),
            Self::Object(o) => Self::Object(o.clone()),
        }
    }
}

impl<T> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("Undefined"),
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::BoxedString(s) => f.debug_tuple("BoxedString").field(&&**s).finish(),
            Self::Function(cb) => f
                .debug_tuple("Function")
                .field(&callback_addr(cb))
                .finish(),
            Self::Object(o) => f.debug_tuple("Object").field(&object_addr(o)).finish(),
        }
    }
}

impl<T> From<&str> for Value<T> {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl<T> From<String> for Value<T> {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T> From<Arc<str>> for Value<T> {
    fn from(s: Arc<str>) -> Self {
        Self::BoxedString(s)
    }
}

impl<T> From<bool> for Value<T> {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T> From<f64> for Value<T> {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<T> From<i32> for Value<T> {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl<T> From<i64> for Value<T> {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl<T> From<Callback<T>> for Value<T> {
    fn from(cb: Callback<T>) -> Self {
        Self::Function(cb)
    }
}

impl<T> From<&Callback<T>> for Value<T> {
    fn from(cb: &Callback<T>) -> Self {
        Self::Function(cb.clone())
    }
}

impl<T, V: Into<Value<T>>> From<Option<V>> for Value<T> {
    fn from(v: Option<V>) -> Self {
        v.map_or(Self::Undefined, Into::into)
    }
}
