//! Resolution Container
//!
//! The resolution phase of the wiring mechanism. A container resolves a
//! registration key to an instance at most once and serves every later
//! lookup of that key from its own cache, hiding the synchronous versus
//! suspension-capable distinction behind two entry points.
//!
//! ## Caching discipline
//!
//! The cache is written exactly once per key, on the first successful
//! resolution through either path; entries are never invalidated or
//! evicted for the container's lifetime. Containers derived from the same
//! registry cache independently of one another.
//!
//! ## Re-entrancy
//!
//! A factory receives the resolving container and may resolve its own
//! dependencies through it. Resolution of the *same* key from inside its
//! own factory is not guarded: there is no per-key lock or in-flight
//! marker, so such a cycle recurses unboundedly, and resolutions of one
//! key interleaving across a suspension point each run the factory with
//! the last cache write winning.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use capwire_domain::{Error, Result, ServiceKey};

use crate::factory::{Factory, SharedInstance};
use crate::registry::Registry;

/// Resolution-phase cache bound to one [`Registry`].
pub struct Container {
    registry: Registry,
    cache: RefCell<HashMap<ServiceKey, SharedInstance>>,
}

impl Container {
    pub(crate) fn new(registry: Registry) -> Self {
        Self {
            registry,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The registry this container resolves from.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve `key` without suspension.
    ///
    /// On a cache miss the factory is looked up in the bound registry
    /// (propagating [`Error::DoesNotRegistered`] unchanged) and invoked
    /// with this container. A suspension-capable factory fails with
    /// [`Error::DoesNotSupportAwaitable`] without being invoked and
    /// without touching the cache.
    pub fn find(&self, key: impl Into<ServiceKey>) -> Result<SharedInstance> {
        let key = key.into();
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }
        let factory = self.registry.find_factory(key.clone())?;
        let instance = match &*factory {
            Factory::Sync(produce) => produce(self),
            Factory::Singleton(instance) => Arc::clone(instance),
            Factory::Async(_) => return Err(Error::does_not_support_awaitable(key)),
        };
        self.remember(key, &instance);
        Ok(instance)
    }

    /// Resolve `key`, suspending if the factory does.
    ///
    /// Identical cache-hit behavior to [`Container::find`]. On a miss a
    /// suspension-capable factory is awaited to completion; synchronous
    /// and singleton factories resolve without suspension. This path
    /// never fails with [`Error::DoesNotSupportAwaitable`].
    pub async fn async_find(&self, key: impl Into<ServiceKey>) -> Result<SharedInstance> {
        let key = key.into();
        if let Some(hit) = self.cached(&key) {
            return Ok(hit);
        }
        let factory = self.registry.find_factory(key.clone())?;
        let instance = match &*factory {
            Factory::Sync(produce) => produce(self),
            Factory::Singleton(instance) => Arc::clone(instance),
            Factory::Async(produce) => produce(self).await,
        };
        self.remember(key, &instance);
        Ok(instance)
    }

    // Cache reads and writes happen in disjoint borrows so factories can
    // resolve their dependencies through the very container resolving them.
    fn cached(&self, key: &ServiceKey) -> Option<SharedInstance> {
        let hit = self.cache.borrow().get(key).cloned();
        if hit.is_some() {
            trace!(%key, "cache hit");
        }
        hit
    }

    fn remember(&self, key: ServiceKey, instance: &SharedInstance) {
        debug!(%key, "resolved and cached instance");
        self.cache.borrow_mut().insert(key, Arc::clone(instance));
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.registry)
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}
