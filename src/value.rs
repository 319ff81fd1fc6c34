use std::{
    any::{Any, TypeId},
    fmt::{Debug, Formatter},
};

#[cfg(feature = "arc")]
mod types {
    use std::{any::Any, sync::Arc};

    /// A reference-counted pointer holding a service. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Arc<T>;

    /// A reference-counted service pointer holding an instance of `dyn Any`.
    pub type DynSvc = Arc<dyn Any + Send + Sync>;

    /// Implemented automatically on types that are capable of being a service.
    pub trait Service: Any + Send + Sync {}
    impl<T: ?Sized + Any + Send + Sync> Service for T {}
}

#[cfg(feature = "rc")]
mod types {
    use std::{any::Any, rc::Rc};

    /// A reference-counted pointer holding a service. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Rc<T>;

    /// A reference-counted service pointer holding an instance of `dyn Any`.
    pub type DynSvc = Rc<dyn Any>;

    /// Implemented automatically on types that are capable of being a service.
    pub trait Service: Any {}
    impl<T: ?Sized + Any> Service for T {}
}

pub use types::*;

/// Type information about a service. This is the lookup key used when asking
/// a [`Scope`](crate::Scope) for a value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ServiceInfo {
    id: TypeId,
    name: &'static str,
}

impl ServiceInfo {
    /// Creates a [`ServiceInfo`] for the given type.
    #[inline]
    #[must_use]
    pub fn of<T: ?Sized + Any>() -> Self {
        ServiceInfo {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Gets the [`TypeId`] for this service.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Gets the full type name of this service.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Gets the type name of this service without its module path or generic
    /// parameters. Used in diagnostics.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Whether this type is part of the language's own structural vocabulary
    /// (primitives, tuples, arrays, references, and anything from `core`,
    /// `alloc` or `std`). Such types are never used as lookup keys.
    ///
    /// ```
    /// use field_injector::ServiceInfo;
    ///
    /// struct Settings;
    ///
    /// assert!(ServiceInfo::of::<String>().is_structural());
    /// assert!(ServiceInfo::of::<(i32, u8)>().is_structural());
    /// assert!(ServiceInfo::of::<Vec<Settings>>().is_structural());
    /// assert!(!ServiceInfo::of::<Settings>().is_structural());
    /// ```
    #[must_use]
    pub fn is_structural(&self) -> bool {
        let name = self.name;
        name.starts_with(|c: char| matches!(c, '(' | '[' | '&' | '*'))
            || !name.contains("::")
            || ["core::", "alloc::", "std::"]
                .iter()
                .any(|prefix| name.starts_with(prefix))
    }
}

/// Named attribute access on a service, used to pluck values off of resolved
/// services and request contexts.
///
/// ```
/// use field_injector::{Attributes, Value};
///
/// struct View {
///     name: String,
/// }
///
/// impl Attributes for View {
///     fn attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(Value::new(self.name.clone())),
///             "caps_name" => Some(Value::new(self.name.to_uppercase())),
///             _ => None,
///         }
///     }
/// }
///
/// let view = Value::with_attributes(View { name: "view".to_string() });
/// let caps = view.attribute("caps_name").unwrap();
/// assert_eq!("VIEW", caps.downcast_ref::<String>().unwrap());
/// ```
pub trait Attributes: Service {
    /// Gets the value of the attribute with the given name, if there is one.
    fn attribute(&self, name: &str) -> Option<Value>;
}

type AttributeFn = fn(&dyn Any, &str) -> Option<Value>;

fn pluck<T: Attributes>(value: &dyn Any, name: &str) -> Option<Value> {
    value.downcast_ref::<T>().and_then(|value| value.attribute(name))
}

/// A type-erased, reference-counted value flowing through resolution. Values
/// remember the type they were created from, and optionally how to read named
/// attributes off of themselves.
#[derive(Clone)]
pub struct Value {
    info: ServiceInfo,
    inner: DynSvc,
    attributes: Option<AttributeFn>,
}

impl Value {
    /// Wraps a service in a value.
    #[must_use]
    pub fn new<T: Service>(value: T) -> Self {
        Value::from_svc(Svc::new(value))
    }

    /// Wraps an existing service pointer in a value.
    #[must_use]
    pub fn from_svc<T: Service>(service: Svc<T>) -> Self {
        Value {
            info: ServiceInfo::of::<T>(),
            inner: service,
            attributes: None,
        }
    }

    /// Wraps a service in a value whose attributes can be plucked.
    #[must_use]
    pub fn with_attributes<T: Attributes>(value: T) -> Self {
        Value::from_svc_with_attributes(Svc::new(value))
    }

    /// Wraps an existing service pointer in a value whose attributes can be
    /// plucked.
    #[must_use]
    pub fn from_svc_with_attributes<T: Attributes>(service: Svc<T>) -> Self {
        Value {
            info: ServiceInfo::of::<T>(),
            inner: service,
            attributes: Some(pluck::<T>),
        }
    }

    /// Type information about the wrapped service.
    #[must_use]
    pub fn info(&self) -> ServiceInfo {
        self.info
    }

    /// Whether the wrapped service is a `T`.
    #[must_use]
    pub fn is<T: Service>(&self) -> bool {
        self.info == ServiceInfo::of::<T>()
    }

    /// Whether attributes can be plucked from this value.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        self.attributes.is_some()
    }

    /// Tries to get a service pointer to the wrapped service as a `T`.
    #[must_use]
    pub fn downcast<T: Service>(&self) -> Option<Svc<T>> {
        self.inner.clone().downcast::<T>().ok()
    }

    /// Tries to borrow the wrapped service as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Service>(&self) -> Option<&T> {
        (*self.inner).downcast_ref::<T>()
    }

    /// Reads a named attribute off of the wrapped service. Returns `None` if
    /// the service has no such attribute, or if this value was not created
    /// with attribute access.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<Value> {
        let pluck = self.attributes?;
        pluck(&*self.inner, name)
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.info.name())
            .field("attributes", &self.attributes.is_some())
            .finish()
    }
}
