//! # Listeners
//!
//! A listener is a `(callback, context)` pair. The context decides what the
//! callback runs against (its [`Receiver`]); the owner the event was
//! triggered on is always passed as the callback's second argument.

use crate::value::{object_addr, Value};
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

/// A registered callback.
///
/// Identity is the `Arc` allocation: clones of one `Callback` are the same
/// callback, two separately created closures never are.
pub type Callback<T> =
    Arc<dyn Fn(Receiver<'_, T>, &T) -> anyhow::Result<()> + Send + Sync>;

/// Build a [`Callback`] from a closure.
pub fn callback<T, F>(f: F) -> Callback<T>
where
    F: Fn(Receiver<'_, T>, &T) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub(crate) fn callback_addr<T>(cb: &Callback<T>) -> *const () {
    Arc::as_ptr(cb) as *const ()
}

type WeakCallback<T> =
    Weak<dyn Fn(Receiver<'_, T>, &T) -> anyhow::Result<()> + Send + Sync>;

/// The dispatch context stored with a listener.
///
/// Identity-compared values (objects, functions, boxed strings) are held
/// as `Weak` back-references and never keep their referent alive.
pub enum Context<T> {
    /// Back-reference to a shared object.
    Object(Weak<dyn Any + Send + Sync>),
    /// Back-reference to a callback used as context.
    Function(WeakCallback<T>),
    /// Back-reference to a boxed string.
    BoxedString(Weak<str>),
    /// A primitive value, stored as given.
    Value(Value<T>),
}

impl<T> Context<T> {
    /// Convert an optional argument into a stored context.
    ///
    /// `None`, `Undefined` and `Null` all mean "no context".
    pub(crate) fn from_arg(arg: Option<Value<T>>) -> Option<Self> {
        match arg? {
            v if v.is_absent() => None,
            Value::Object(obj) => Some(Self::Object(Arc::downgrade(&obj))),
            Value::Function(f) => Some(Self::Function(Arc::downgrade(&f))),
            Value::BoxedString(s) => Some(Self::BoxedString(Arc::downgrade(&s))),
            v => Some(Self::Value(v)),
        }
    }

    /// Upgrade an object context and downcast it.
    ///
    /// Returns `None` for non-object contexts, for objects of another type
    /// and for objects that have since been dropped.
    #[must_use]
    pub fn downcast<O: Any + Send + Sync>(&self) -> Option<Arc<O>> {
        match self {
            Self::Object(weak) => weak.upgrade()?.downcast::<O>().ok(),
            _ => None,
        }
    }

    /// Upgrade a function context.
    #[must_use]
    pub fn function(&self) -> Option<Callback<T>> {
        match self {
            Self::Function(weak) => weak.upgrade(),
            _ => None,
        }
    }

    /// Upgrade a boxed string context.
    #[must_use]
    pub fn boxed_string(&self) -> Option<Arc<str>> {
        match self {
            Self::BoxedString(weak) => weak.upgrade(),
            _ => None,
        }
    }

    /// The stored value, for primitive contexts.
    #[must_use]
    pub fn value(&self) -> Option<&Value<T>> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Whether a back-referenced context has been dropped.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        match self {
            Self::Object(weak) => weak.strong_count() == 0,
            Self::Function(weak) => weak.strong_count() == 0,
            Self::BoxedString(weak) => weak.strong_count() == 0,
            Self::Value(_) => false,
        }
    }

    fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => weak_addr(a) == weak_addr(b),
            (Self::Function(a), Self::Function(b)) => weak_addr(a) == weak_addr(b),
            (Self::BoxedString(a), Self::BoxedString(b)) => weak_addr(a) == weak_addr(b),
            (Self::Value(a), Self::Value(b)) => a.strict_eq(b),
            _ => false,
        }
    }
}

fn weak_addr<U: ?Sized>(weak: &Weak<U>) -> *const () {
    weak.as_ptr().cast::<()>()
}

impl<T> Clone for Context<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Object(weak) => Self::Object(weak.clone()),
            Self::Function(weak) => Self::Function(weak.clone()),
            Self::BoxedString(weak) => Self::BoxedString(weak.clone()),
            Self::Value(v) => Self::Value(v.clone()),
        }
    }
}

impl<T> fmt::Debug for Context<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(weak) => match weak.upgrade() {
                Some(obj) => f.debug_tuple("Object").field(&object_addr(&obj)).finish(),
                None => f.write_str("Object(<dropped>)"),
            },
            Self::Function(weak) if weak.strong_count() == 0 => {
                f.write_str("Function(<dropped>)")
            }
            Self::Function(weak) => f.debug_tuple("Function").field(&weak_addr(weak)).finish(),
            Self::BoxedString(weak) => match weak.upgrade() {
                Some(s) => f.debug_tuple("BoxedString").field(&s).finish(),
                None => f.write_str("BoxedString(<dropped>)"),
            },
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

/// What a callback runs against: its stored context, or the owner.
pub enum Receiver<'a, T> {
    Owner(&'a T),
    Context(&'a Context<T>),
}

impl<'a, T> Receiver<'a, T> {
    /// The owner, when the listener was registered without a context.
    #[must_use]
    pub fn owner(&self) -> Option<&'a T> {
        match *self {
            Self::Owner(owner) => Some(owner),
            Self::Context(_) => None,
        }
    }

    /// The stored context, when there is one.
    #[must_use]
    pub fn context(&self) -> Option<&'a Context<T>> {
        match *self {
            Self::Context(ctx) => Some(ctx),
            Self::Owner(_) => None,
        }
    }

    /// Shorthand for `context()?.downcast()`.
    #[must_use]
    pub fn downcast<O: Any + Send + Sync>(&self) -> Option<Arc<O>> {
        self.context()?.downcast()
    }
}

/// A registered `(callback, context)` pair.
pub struct Listener<T> {
    callback: Callback<T>,
    context: Option<Context<T>>,
}

impl<T> Listener<T> {
    pub(crate) fn new(callback: Callback<T>, context: Option<Context<T>>) -> Self {
        Self { callback, context }
    }

    #[must_use]
    pub fn callback(&self) -> &Callback<T> {
        &self.callback
    }

    #[must_use]
    pub fn context(&self) -> Option<&Context<T>> {
        self.context.as_ref()
    }

    /// Same callback and strictly-equal context. An absent context only
    /// matches an absent context.
    pub(crate) fn matches(&self, callback: &Callback<T>, context: Option<&Context<T>>) -> bool {
        if callback_addr(&self.callback) != callback_addr(callback) {
            return false;
        }
        match (&self.context, context) {
            (None, None) => true,
            (Some(a), Some(b)) => a.strict_eq(b),
            _ => false,
        }
    }

    /// Invoke the callback with `owner` as argument.
    pub(crate) fn invoke(&self, owner: &T) -> anyhow::Result<()> {
        let receiver = match &self.context {
            Some(ctx) => Receiver::Context(ctx),
            None => Receiver::Owner(owner),
        };
        (self.callback)(receiver, owner)
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
            context: self.context.clone(),
        }
    }
}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &callback_addr(&self.callback))
            .field("context", &self.context)
            .finish()
    }
}
