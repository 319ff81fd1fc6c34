use crate::{ServiceInfo, Target, Value};

/// What a scope has registered for a lookup key.
#[derive(Clone, Debug)]
pub enum Provided {
    /// A ready-made value, returned as-is.
    Instance(Value),
    /// A target that must be resolved and constructed on each lookup.
    Injectable(Target),
}

/// A lookup scope for services. Resolution only ever asks a scope for three
/// things: a registered service by type, the request context, and the scope
/// itself so that fields can ask for the scope they are injected from.
pub trait Scope {
    /// Gets whatever is registered for the given type.
    fn get(&self, key: &ServiceInfo) -> Option<Provided>;

    /// Gets the request context, if one was set.
    fn context(&self) -> Option<Value>;

    /// Gets the scope itself as a value. Fields whose declared type matches
    /// this value's type receive it directly.
    fn handle(&self) -> Value;
}
