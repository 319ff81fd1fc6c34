use crate::{
    resolve, InjectError, InjectResult, Injectable, Injector, Props, Provided,
    Scope, Service, ServiceInfo, Svc, Value,
};
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
};

/// A scope backed by the registrations of a [`Registry`](crate::Registry),
/// plus an optional request context. Containers are cheap to clone and are
/// usually created once per request.
#[derive(Clone)]
pub struct Container {
    registrations: Svc<HashMap<ServiceInfo, Provided>>,
    context: Option<Value>,
}

impl Container {
    pub(crate) fn new(
        registrations: Svc<HashMap<ServiceInfo, Provided>>,
        context: Option<Value>,
    ) -> Self {
        Container {
            registrations,
            context,
        }
    }

    /// Gets the service registered for `T`. Registered instances are returned
    /// as-is, and registered targets are resolved and constructed.
    pub fn get<T: Service>(&self) -> InjectResult<Svc<T>> {
        let service_info = ServiceInfo::of::<T>();
        self.get_value(service_info)?
            .downcast()
            .ok_or(InjectError::InvalidProvider { service_info })
    }

    /// Gets the value registered for a key.
    pub fn get_value(&self, service_info: ServiceInfo) -> InjectResult<Value> {
        let provided = self
            .registrations
            .get(&service_info)
            .ok_or(InjectError::MissingProvider { service_info })?;

        self.inject_provided(provided, None, None)
    }

    /// Resolves and constructs `T` with the given props. If a target is
    /// registered for `T`, that target is used. Otherwise, `T`'s own target is
    /// used and `T` does not need to be registered.
    pub fn inject<T: Injectable>(&self, props: &Props) -> InjectResult<Svc<T>> {
        self.inject_with::<T>(Some(props), None)
    }

    /// Resolves and constructs `T` with props and system props. See
    /// [`Container::inject`].
    pub fn inject_with<T: Injectable>(
        &self,
        props: Option<&Props>,
        system_props: Option<&Props>,
    ) -> InjectResult<Svc<T>> {
        let service_info = ServiceInfo::of::<T>();
        let value = match self.registrations.get(&service_info) {
            Some(provided) => {
                self.inject_provided(provided, props, system_props)?
            }
            None => resolve(&T::target(), self, props, system_props)?,
        };

        value
            .downcast()
            .ok_or(InjectError::InvalidProvider { service_info })
    }

    /// Resolves and constructs whatever is registered for a key, with props
    /// and system props. Registered instances are returned as-is.
    pub fn inject_value(
        &self,
        service_info: ServiceInfo,
        props: Option<&Props>,
        system_props: Option<&Props>,
    ) -> InjectResult<Value> {
        let provided = self
            .registrations
            .get(&service_info)
            .ok_or(InjectError::MissingProvider { service_info })?;
        self.inject_provided(provided, props, system_props)
    }

    fn inject_provided(
        &self,
        provided: &Provided,
        props: Option<&Props>,
        system_props: Option<&Props>,
    ) -> InjectResult<Value> {
        match provided {
            Provided::Instance(value) => Ok(value.clone()),
            Provided::Injectable(target) => {
                resolve(target, self, props, system_props)
            }
        }
    }

    /// Creates an [`Injector`] over this container.
    #[must_use]
    pub fn injector(&self) -> Injector<'_> {
        Injector::new(self)
    }

    /// The request context this container was created with.
    #[must_use]
    pub fn request_context(&self) -> Option<&Value> {
        self.context.as_ref()
    }

    /// Whether anything is registered for a key.
    #[must_use]
    pub fn contains(&self, key: &ServiceInfo) -> bool {
        self.registrations.contains_key(key)
    }
}

impl Scope for Container {
    fn get(&self, key: &ServiceInfo) -> Option<Provided> {
        self.registrations.get(key).cloned()
    }

    fn context(&self) -> Option<Value> {
        self.context.clone()
    }

    fn handle(&self) -> Value {
        Value::new(self.clone())
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let registered: Vec<_> =
            self.registrations.keys().map(ServiceInfo::name).collect();
        f.debug_struct("Container")
            .field("registered", &registered)
            .field("context", &self.context)
            .finish()
    }
}
