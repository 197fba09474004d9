//! Capability Descriptors
//!
//! Registrations may be constrained by a capability: an abstract interface
//! marker a factory promises to satisfy. At runtime a capability is
//! represented by an opaque [`Descriptor`] token built from a marker type,
//! so descriptors stay comparable and hashable without any reflection.
//!
//! ## Classification
//!
//! Not every token is registrable. A descriptor is a *capability marker*
//! when it was minted from a [`Capability`] type, and it is *delivered*
//! when that marker is concrete enough to register against - i.e. anything
//! but the root [`AnyCapability`] marker, which names the concept of a
//! capability without anchoring one. Plain types (minted through
//! [`Descriptor::opaque`]) are neither.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker trait for capability interfaces.
///
/// Implemented by the tag types (or trait objects) a registration can be
/// constrained by. The trait carries no behavior; it only makes the type
/// eligible for [`Descriptor::of`].
pub trait Capability: 'static {}

/// The root capability marker.
///
/// `AnyCapability` is a capability by classification but is unanchored:
/// it stands for "some capability" rather than a specific one, so the
/// default validator rejects it as a registration constraint.
pub enum AnyCapability {}

impl Capability for AnyCapability {}

/// Opaque identity token for a capability or plain type.
///
/// Equality and hashing use the underlying [`TypeId`] plus the marker
/// classification; the captured type name is diagnostics only.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    id: TypeId,
    type_name: &'static str,
    marker: bool,
}

impl Descriptor {
    /// Token for a capability marker type.
    pub fn of<C>() -> Self
    where
        C: Capability + ?Sized,
    {
        Self {
            id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            marker: true,
        }
    }

    /// Token for a plain (non-capability) type.
    ///
    /// Plain tokens can never pass the delivered-capability check; they
    /// exist so validators can classify arbitrary types uniformly.
    pub fn opaque<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            marker: false,
        }
    }

    /// The captured type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.marker == other.marker
    }
}

impl Eq for Descriptor {}

impl Hash for Descriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.marker.hash(state);
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Whether `descriptor` was minted from a [`Capability`] type, the root
/// marker included.
pub fn is_capability_marker(descriptor: Descriptor) -> bool {
    descriptor.marker
}

/// Whether `descriptor` is a delivered capability marker: a capability
/// other than the root [`AnyCapability`].
pub fn is_delivered_capability(descriptor: Descriptor) -> bool {
    descriptor.marker && descriptor.id != TypeId::of::<AnyCapability>()
}

/// Port: registration-time descriptor check.
///
/// The registry consults this before accepting a constrained registration.
/// Kept as a trait so the policy can be swapped independently of the
/// registry, e.g. with a permissive stub in tests.
pub trait DescriptorValidator {
    /// True iff `descriptor` may constrain a registration.
    fn is_delivered(&self, descriptor: Descriptor) -> bool;
}

/// Default validator: accepts exactly the delivered capability markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveredMarkerValidator;

impl DescriptorValidator for DeliveredMarkerValidator {
    fn is_delivered(&self, descriptor: Descriptor) -> bool {
        is_delivered_capability(descriptor)
    }
}
