//! Error handling types

use thiserror::Error;

use crate::key::ServiceKey;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy of the registry and container.
///
/// Every variant carries the offending key for diagnostics. None of these
/// is recovered internally: each propagates unchanged to the caller at the
/// exact call that triggered it, and none is retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A factory already occupies the key; the original registration is
    /// retained and the new one is dropped.
    #[error("already registered: {key}")]
    AlreadyRegistered {
        /// The occupied registration key
        key: ServiceKey,
    },

    /// No factory is registered under the key.
    #[error("does not registered: {key}")]
    DoesNotRegistered {
        /// The absent registration key
        key: ServiceKey,
    },

    /// The factory under the key is not a singleton, so there is no
    /// pre-existing instance to hand out.
    #[error("is not singleton: {key}")]
    IsNotSingleton {
        /// The registration key holding a general factory
        key: ServiceKey,
    },

    /// The factory under the key suspends, but resolution came through
    /// the blocking path.
    #[error("does not support awaitable: {key}")]
    DoesNotSupportAwaitable {
        /// The registration key holding an async factory
        key: ServiceKey,
    },
}

impl Error {
    /// Create an already-registered error
    pub fn already_registered(key: impl Into<ServiceKey>) -> Self {
        Self::AlreadyRegistered { key: key.into() }
    }

    /// Create a does-not-registered error
    pub fn does_not_registered(key: impl Into<ServiceKey>) -> Self {
        Self::DoesNotRegistered { key: key.into() }
    }

    /// Create an is-not-singleton error
    pub fn is_not_singleton(key: impl Into<ServiceKey>) -> Self {
        Self::IsNotSingleton { key: key.into() }
    }

    /// Create a does-not-support-awaitable error
    pub fn does_not_support_awaitable(key: impl Into<ServiceKey>) -> Self {
        Self::DoesNotSupportAwaitable { key: key.into() }
    }

    /// The key the failure was raised for.
    pub fn key(&self) -> &ServiceKey {
        match self {
            Self::AlreadyRegistered { key }
            | Self::DoesNotRegistered { key }
            | Self::IsNotSingleton { key }
            | Self::DoesNotSupportAwaitable { key } => key,
        }
    }
}
