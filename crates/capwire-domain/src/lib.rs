//! Domain Layer - capwire
//!
//! Core vocabulary of the capwire dependency-resolution registry:
//! capability descriptors, the registration key value object, and the
//! error taxonomy shared by the registry and container.
//!
//! ## Architecture
//!
//! The domain layer:
//! - Defines the `Capability` marker trait and the opaque `Descriptor` token
//! - Defines `ServiceKey`, the (descriptor, name) pair registrations live under
//! - Defines the `DescriptorValidator` port consulted at registration time
//! - Has no dependency on the wiring layer or on any runtime
//!
//! ## Dependencies
//!
//! This crate depends only on `thiserror` for the error taxonomy.

pub mod descriptor;
pub mod error;
pub mod key;

pub use descriptor::{
    AnyCapability, Capability, DeliveredMarkerValidator, Descriptor, DescriptorValidator,
    is_capability_marker, is_delivered_capability,
};
pub use error::{Error, Result};
pub use key::ServiceKey;
