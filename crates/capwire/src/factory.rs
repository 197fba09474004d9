//! Factory Variants
//!
//! A factory is the behavior stored at a registration key. The flavor is
//! fixed at registration time rather than inspected at call time: the
//! blocking resolution path accepts only [`Factory::Sync`] and
//! [`Factory::Singleton`], while the suspension-capable path accepts all
//! three variants.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use futures::future::LocalBoxFuture;

use crate::container::Container;

/// Type-erased resolved instance, recovered with [`Arc::downcast`].
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

/// Callable producing an instance without suspension.
pub type SyncFactoryFn = Box<dyn Fn(&Container) -> SharedInstance>;

/// Callable producing an instance through a suspension point.
pub type AsyncFactoryFn =
    Box<dyn for<'a> Fn(&'a Container) -> LocalBoxFuture<'a, SharedInstance>>;

/// Behavior stored at one registration key.
///
/// Factories have no state of their own beyond what their callable
/// captures; distinct factories are told apart by identity of the
/// `Rc<Factory>` handle the registry stores them behind.
pub enum Factory {
    /// Produces the instance synchronously, given the resolving container.
    Sync(SyncFactoryFn),
    /// Produces the instance through a future the resolving path awaits.
    Async(AsyncFactoryFn),
    /// Always hands out the same pre-existing instance, ignoring the
    /// container. The only variant [`crate::Registry::find_instance`]
    /// accepts.
    Singleton(SharedInstance),
}

impl Factory {
    /// Wrap a synchronous callable.
    pub fn sync<F>(produce: F) -> Self
    where
        F: Fn(&Container) -> SharedInstance + 'static,
    {
        Self::Sync(Box::new(produce))
    }

    /// Wrap a suspension-capable callable.
    pub fn async_fn<F>(produce: F) -> Self
    where
        F: for<'a> Fn(&'a Container) -> LocalBoxFuture<'a, SharedInstance> + 'static,
    {
        Self::Async(Box::new(produce))
    }

    /// Wrap a pre-existing instance.
    pub fn singleton(instance: SharedInstance) -> Self {
        Self::Singleton(instance)
    }

    /// Whether this factory is a singleton wrapper.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Singleton(_))
    }

    /// The wrapped instance, for singleton factories.
    pub fn instance(&self) -> Option<&SharedInstance> {
        match self {
            Self::Singleton(instance) => Some(instance),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Sync(_) => "sync",
            Self::Async(_) => "async",
            Self::Singleton(_) => "singleton",
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Factory").field(&self.kind()).finish()
    }
}
