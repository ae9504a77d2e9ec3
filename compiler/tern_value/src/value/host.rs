//! Opaque host values.
//!
//! A host value is any foreign object the core cannot inspect directly.
//! Only registry strategies written for that host model (accessors,
//! converters, iterator providers) read it, via `HostValue::downcast_ref`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A foreign object wrapped for transport through the engine.
pub trait HostObject: Any + Send + Sync + fmt::Debug {
    /// Name of the host model this object belongs to (e.g. `"json"`).
    ///
    /// Becomes the `TypeTag::Host` payload, so it must be stable.
    fn kind(&self) -> &'static str;

    /// Runtime type within the host model, for diagnostics (e.g. `"object"`).
    fn type_name(&self) -> &'static str;

    /// Structural equality against another host object.
    fn host_eq(&self, other: &dyn HostObject) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a host object.
#[derive(Clone)]
pub struct HostValue(Arc<dyn HostObject>);

impl HostValue {
    pub fn new(object: impl HostObject) -> Self {
        HostValue(Arc::new(object))
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        self.0.kind()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Borrow the concrete host object if it is a `T`.
    pub fn downcast_ref<T: HostObject>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Whether both handles point at the same host object.
    pub fn ptr_eq(&self, other: &HostValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.host_eq(other.0.as_ref())
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
