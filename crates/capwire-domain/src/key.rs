//! Registration Key Value Object
//!
//! Every factory slot is addressed by a [`ServiceKey`]: an optional
//! capability descriptor plus a name. An absent descriptor is the "no
//! constraint" sentinel and the default name is the empty string, so the
//! fully-anonymous key `()` is a valid, ordinary slot.

use std::fmt;

use crate::descriptor::Descriptor;

/// Key one factory registration lives under.
///
/// Two keys are equal iff both components are equal: the descriptor by
/// token identity (absent compared as a sentinel), the name by exact
/// string equality.
///
/// ## Example
///
/// ```rust
/// use capwire_domain::{Capability, Descriptor, ServiceKey};
///
/// enum Clock {}
/// impl Capability for Clock {}
///
/// let anonymous = ServiceKey::from(());
/// let by_capability = ServiceKey::from(Descriptor::of::<Clock>());
/// let named = ServiceKey::from((Descriptor::of::<Clock>(), "utc"));
///
/// assert_ne!(anonymous, by_capability);
/// assert_ne!(by_capability, named);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ServiceKey {
    /// Capability constraint, absent meaning unconstrained
    pub descriptor: Option<Descriptor>,
    /// Registration name, empty by default
    pub name: String,
}

impl ServiceKey {
    /// Build a key from its two components.
    pub fn new(descriptor: Option<Descriptor>, name: impl Into<String>) -> Self {
        Self {
            descriptor,
            name: name.into(),
        }
    }

    /// The fully-anonymous key: no descriptor, empty name.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.descriptor {
            Some(descriptor) => write!(f, "{descriptor}")?,
            None => f.write_str("<any>")?,
        }
        if !self.name.is_empty() {
            write!(f, " \"{}\"", self.name)?;
        }
        Ok(())
    }
}

impl From<()> for ServiceKey {
    fn from((): ()) -> Self {
        Self::anonymous()
    }
}

impl From<Descriptor> for ServiceKey {
    fn from(descriptor: Descriptor) -> Self {
        Self::new(Some(descriptor), "")
    }
}

impl From<&str> for ServiceKey {
    fn from(name: &str) -> Self {
        Self::new(None, name)
    }
}

impl From<(Descriptor, &str)> for ServiceKey {
    fn from((descriptor, name): (Descriptor, &str)) -> Self {
        Self::new(Some(descriptor), name)
    }
}

impl From<(Option<Descriptor>, &str)> for ServiceKey {
    fn from((descriptor, name): (Option<Descriptor>, &str)) -> Self {
        Self::new(descriptor, name)
    }
}
