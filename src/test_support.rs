use crate::{
    Attributes, FieldSpec, Operator, Origin, Outcome, Provided,
    ResolutionContext, Scope, ServiceInfo, Target, Value,
};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// A scope backed by a plain map, independent of any registry.
#[derive(Clone, Debug, Default)]
pub(crate) struct DummyScope {
    services: HashMap<ServiceInfo, Provided>,
    context: Option<Value>,
}

impl DummyScope {
    pub fn new() -> Self {
        DummyScope::default()
    }

    pub fn with<T: Attributes>(self, service: T) -> Self {
        self.with_value(ServiceInfo::of::<T>(), Value::with_attributes(service))
    }

    pub fn with_value(mut self, key: ServiceInfo, value: Value) -> Self {
        self.services.insert(key, Provided::Instance(value));
        self
    }

    pub fn with_target(mut self, key: ServiceInfo, target: Target) -> Self {
        self.services.insert(key, Provided::Injectable(target));
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

impl Scope for DummyScope {
    fn get(&self, key: &ServiceInfo) -> Option<Provided> {
        self.services.get(key).cloned()
    }

    fn context(&self) -> Option<Value> {
        self.context.clone()
    }

    fn handle(&self) -> Value {
        Value::new(self.clone())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Settings {
    pub greeting: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            greeting: "Hello".to_string(),
        }
    }
}

impl Attributes for Settings {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "greeting" => Some(Value::new(self.greeting.clone())),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Customer {
    pub name: String,
}

impl Attributes for Customer {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::new(self.name.clone())),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Dummy {
    pub age: u32,
    pub title: String,
}

/// A record with one field that has no default and one that does.
pub(crate) fn dummy_target() -> Target {
    Target::record::<Dummy>()
        .field(FieldSpec::of::<u32>("age"))
        .field(
            FieldSpec::of::<String>("title").with_default("Dummy Target".to_string()),
        )
        .construct(|args| {
            Ok(Dummy {
                age: *args.get("age")?,
                title: args.cloned("title")?,
            })
        })
}

/// Counts how many times it is applied, then passes the previous outcome on.
#[derive(Debug)]
pub(crate) struct Counted {
    calls: Arc<AtomicUsize>,
}

impl Counted {
    pub const ORIGIN: Origin = Origin::new("Counted");

    pub fn new(calls: Arc<AtomicUsize>) -> Self {
        Counted { calls }
    }
}

impl Operator for Counted {
    fn origin(&self) -> Origin {
        Counted::ORIGIN
    }

    fn apply(
        &self,
        previous: Option<Outcome>,
        _context: &ResolutionContext<'_>,
    ) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        previous.unwrap_or_else(|| Outcome::not_found(Counted::ORIGIN, "nothing before"))
    }
}
