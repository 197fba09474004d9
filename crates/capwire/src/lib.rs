//! capwire - Minimal Dependency-Resolution Registry
//!
//! A two-phase wiring mechanism: factories are registered into a
//! [`Registry`] under an optional capability descriptor plus a name, and
//! instances are later resolved from a [`Container`] derived from that
//! registry. Each container memoizes its resolutions independently, and
//! factories come in synchronous and suspension-capable flavors.
//!
//! ## Architecture
//!
//! - [`Registry`] (leaf): owns the key-to-factory map, validates
//!   registration keys and detects duplicates.
//! - [`Container`]: resolves a key to an instance on demand, caching the
//!   result for its own lifetime; offers a blocking path ([`Container::find`])
//!   and a suspension-capable path ([`Container::async_find`]).
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use capwire::{Capability, Container, Descriptor, Factory, Registry, SharedInstance};
//!
//! enum Greeter {}
//! impl Capability for Greeter {}
//!
//! fn greeting(_container: &Container) -> SharedInstance {
//!     Arc::new(String::from("hello"))
//! }
//!
//! let registry = Registry::new();
//! registry.register_factory(Factory::sync(greeting), Descriptor::of::<Greeter>())?;
//!
//! let container = registry.create_container();
//! let first = container.find(Descriptor::of::<Greeter>())?;
//! let second = container.find(Descriptor::of::<Greeter>())?;
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(*first.downcast::<String>().unwrap(), "hello");
//! # Ok::<(), capwire::Error>(())
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded cooperative use is assumed. There is no per-key
//! resolution lock: if two resolutions of one key interleave across a
//! suspension point, each runs the factory and the last cache write wins.

pub mod container;
pub mod factory;
pub mod registry;

pub use capwire_domain::{
    AnyCapability, Capability, DeliveredMarkerValidator, Descriptor, DescriptorValidator, Error,
    Result, ServiceKey, is_capability_marker, is_delivered_capability,
};
pub use container::Container;
pub use factory::{Factory, SharedInstance};
pub use registry::Registry;
