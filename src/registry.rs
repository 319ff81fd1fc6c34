use crate::{
    Attributes, Container, Provided, Service, ServiceInfo, Svc, Target, Value,
};
use std::{any::Any, collections::HashMap};
use tracing::debug;

/// A type that knows how to declare itself as a [`Target`]. Injectable types
/// can be registered without a separate target declaration.
pub trait Injectable: Service {
    /// Declares how this type is constructed.
    fn target() -> Target;
}

/// Collects registrations and creates [`Container`]s from them. A registry is
/// usually filled in once at startup, then used to create a container per
/// request, each with its own request context.
///
/// Registering a second value or target for the same key replaces the first,
/// and the old registration is returned.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    registrations: HashMap<ServiceInfo, Provided>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registers a ready-made instance, keyed by its own type. Every lookup
    /// returns the same instance.
    pub fn register_singleton<T: Service>(&mut self, value: T) -> Option<Provided> {
        self.register_value(ServiceInfo::of::<T>(), Value::new(value))
    }

    /// Registers a ready-made instance whose attributes can be plucked.
    pub fn register_attributed<T: Attributes>(
        &mut self,
        value: T,
    ) -> Option<Provided> {
        self.register_value(ServiceInfo::of::<T>(), Value::with_attributes(value))
    }

    /// Registers a value under an arbitrary key.
    pub fn register_value(
        &mut self,
        key: ServiceInfo,
        value: Value,
    ) -> Option<Provided> {
        debug!(key = key.name(), service = value.info().name(), "registered value");
        self.registrations.insert(key, Provided::Instance(value))
    }

    /// Registers a target under an arbitrary key. The target is resolved and
    /// constructed each time the key is looked up.
    pub fn register_injectable(
        &mut self,
        key: ServiceInfo,
        target: Target,
    ) -> Option<Provided> {
        debug!(
            key = key.name(),
            target_name = target.name(),
            "registered injectable"
        );
        self.registrations.insert(key, Provided::Injectable(target))
    }

    /// Registers an injectable type under its own type.
    pub fn register<T: Injectable>(&mut self) -> Option<Provided> {
        self.register_injectable(ServiceInfo::of::<T>(), T::target())
    }

    /// Registers an injectable type under another type, usually a trait
    /// object the type implements.
    ///
    /// ```
    /// use field_injector::{
    ///     Injectable, Registry, Scope, ServiceInfo, Target,
    /// };
    ///
    /// trait Greeter: Send + Sync {}
    ///
    /// struct English;
    /// impl Greeter for English {}
    ///
    /// impl Injectable for English {
    ///     fn target() -> Target {
    ///         Target::record::<English>().construct(|_| Ok(English))
    ///     }
    /// }
    ///
    /// let mut registry = Registry::new();
    /// registry.register_for::<dyn Greeter, English>();
    ///
    /// let container = registry.create_container(None);
    /// let greeter = container.get_value(ServiceInfo::of::<dyn Greeter>()).unwrap();
    /// assert!(greeter.is::<English>());
    /// ```
    pub fn register_for<I, T>(&mut self) -> Option<Provided>
    where
        I: ?Sized + Any,
        T: Injectable,
    {
        self.register_injectable(ServiceInfo::of::<I>(), T::target())
    }

    /// Whether anything is registered for a key.
    #[must_use]
    pub fn contains(&self, key: &ServiceInfo) -> bool {
        self.registrations.contains_key(key)
    }

    /// Removes and returns the registration for a key.
    pub fn remove(&mut self, key: &ServiceInfo) -> Option<Provided> {
        self.registrations.remove(key)
    }

    /// Creates a container holding a snapshot of the current registrations
    /// and an optional request context.
    #[must_use]
    pub fn create_container(&self, context: Option<Value>) -> Container {
        Container::new(Svc::new(self.registrations.clone()), context)
    }
}
