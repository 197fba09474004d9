//! Factory Registry
//!
//! The registry is the registration phase of the wiring mechanism: it owns
//! the key-to-factory map, validates capability constraints through the
//! injected [`DescriptorValidator`] and refuses to overwrite an occupied
//! key. Containers derived from a registry share it by reference, so
//! registrations made after a container exists are still visible to it for
//! keys that container has not resolved yet.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use capwire_domain::{
    DeliveredMarkerValidator, DescriptorValidator, Error, Result, ServiceKey,
};

use crate::container::Container;
use crate::factory::{Factory, SharedInstance};

struct RegistryInner {
    adaptors: RefCell<HashMap<ServiceKey, Rc<Factory>>>,
    validator: Box<dyn DescriptorValidator>,
}

/// Registration-phase owner of the key-to-factory map.
///
/// `Registry` is a cheap cloneable handle; clones and the containers
/// created from them all observe the same underlying map. The registry is
/// created empty and mutated only by registration calls.
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RegistryInner>,
}

impl Registry {
    /// Empty registry with the default delivered-marker validator.
    pub fn new() -> Self {
        Self::with_validator(DeliveredMarkerValidator)
    }

    /// Empty registry with a caller-supplied descriptor validator.
    pub fn with_validator(validator: impl DescriptorValidator + 'static) -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                adaptors: RefCell::new(HashMap::new()),
                validator: Box::new(validator),
            }),
        }
    }

    /// Store `factory` under `key`.
    ///
    /// A key constrained by a descriptor must carry a delivered capability
    /// marker per the injected validator; anything else is a programming
    /// contract violation and panics. An occupied key fails with
    /// [`Error::AlreadyRegistered`] and retains the original factory.
    pub fn register_factory(&self, factory: Factory, key: impl Into<ServiceKey>) -> Result<()> {
        let key = key.into();
        if let Some(descriptor) = key.descriptor {
            assert!(
                self.inner.validator.is_delivered(descriptor),
                "registration key is constrained by a non-delivered capability descriptor: {descriptor}",
            );
        }
        let mut adaptors = self.inner.adaptors.borrow_mut();
        if adaptors.contains_key(&key) {
            return Err(Error::already_registered(key));
        }
        debug!(%key, kind = factory.kind(), "registered factory");
        adaptors.insert(key, Rc::new(factory));
        Ok(())
    }

    /// The factory stored under `key`, by shared handle.
    ///
    /// Fails with [`Error::DoesNotRegistered`] when the key is absent.
    /// Side-effect-free on registry state.
    pub fn find_factory(&self, key: impl Into<ServiceKey>) -> Result<Rc<Factory>> {
        let key = key.into();
        match self.inner.adaptors.borrow().get(&key) {
            Some(factory) => Ok(Rc::clone(factory)),
            None => {
                debug!(%key, "factory lookup missed");
                Err(Error::does_not_registered(key))
            }
        }
    }

    /// Store `instance` under `key` behind a singleton factory.
    ///
    /// Duplicate detection is identical to [`Registry::register_factory`].
    pub fn register_instance(
        &self,
        instance: SharedInstance,
        key: impl Into<ServiceKey>,
    ) -> Result<()> {
        self.register_factory(Factory::singleton(instance), key)
    }

    /// The pre-existing instance stored under `key`.
    ///
    /// Registry-level accessor: never invokes a general factory and never
    /// touches any container cache. Fails with [`Error::IsNotSingleton`]
    /// when the factory at the key is not a singleton wrapper.
    pub fn find_instance(&self, key: impl Into<ServiceKey>) -> Result<SharedInstance> {
        let key = key.into();
        let factory = self.find_factory(key.clone())?;
        match factory.instance() {
            Some(instance) => Ok(Arc::clone(instance)),
            None => Err(Error::is_not_singleton(key)),
        }
    }

    /// New container bound to this registry.
    pub fn create_container(&self) -> Container {
        Container::new(self.clone())
    }

    /// Non-failing membership probe.
    pub fn is_registered(&self, key: impl Into<ServiceKey>) -> bool {
        self.inner.adaptors.borrow().contains_key(&key.into())
    }

    /// Snapshot of every registered key, for diagnostics.
    pub fn registered_keys(&self) -> Vec<ServiceKey> {
        self.inner.adaptors.borrow().keys().cloned().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("registrations", &self.inner.adaptors.borrow().len())
            .finish()
    }
}
