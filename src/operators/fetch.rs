use super::pluck::pluck;
use crate::{
    Operator, Origin, Outcome, ResolutionContext, Service, ServiceInfo,
};
use std::fmt::{Display, Formatter};
use tracing::trace;

/// The key used to look a service up in a scope. Only types are valid keys.
/// Names are accepted so they can be rejected with a clear diagnostic.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum LookupKey {
    /// Look up by type.
    Type(ServiceInfo),
    /// Look up by name. Never valid.
    Name(String),
}

impl Display for LookupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKey::Type(info) => f.write_str(info.short_name()),
            LookupKey::Name(name) => write!(f, "'{}'", name),
        }
    }
}

impl From<ServiceInfo> for LookupKey {
    fn from(info: ServiceInfo) -> Self {
        LookupKey::Type(info)
    }
}

impl From<&str> for LookupKey {
    fn from(name: &str) -> Self {
        LookupKey::Name(name.to_owned())
    }
}

impl From<String> for LookupKey {
    fn from(name: String) -> Self {
        LookupKey::Name(name)
    }
}

/// Looks a service up in the scope, optionally plucking an attribute off of
/// whatever was found. Registered targets are constructed on demand.
#[derive(Clone, Debug)]
pub struct FetchFromScope {
    key: LookupKey,
    attr: Option<String>,
}

impl FetchFromScope {
    /// Names this operator in outcomes and errors.
    pub const ORIGIN: Origin = Origin::new("FetchFromScope");

    /// Looks up the service registered for `T`.
    #[must_use]
    pub fn of<T: ?Sized + Service>() -> Self {
        FetchFromScope::new(ServiceInfo::of::<T>())
    }

    /// Looks up the service registered for a key.
    #[must_use]
    pub fn new(key: impl Into<LookupKey>) -> Self {
        FetchFromScope {
            key: key.into(),
            attr: None,
        }
    }

    /// Plucks an attribute off of the found service.
    #[must_use]
    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }

    /// The lookup key.
    #[must_use]
    pub fn key(&self) -> &LookupKey {
        &self.key
    }

    /// The attribute to pluck, if any.
    #[must_use]
    pub fn attr(&self) -> Option<&str> {
        self.attr.as_deref()
    }
}

impl Operator for FetchFromScope {
    fn origin(&self) -> Origin {
        FetchFromScope::ORIGIN
    }

    fn apply(
        &self,
        _previous: Option<Outcome>,
        context: &ResolutionContext<'_>,
    ) -> Outcome {
        let info = match &self.key {
            LookupKey::Type(info) => *info,
            LookupKey::Name(name) => {
                return Outcome::error(
                    FetchFromScope::ORIGIN,
                    format!(
                        "Cannot use a string '{}' as container lookup value",
                        name
                    ),
                );
            }
        };

        let provided = match context.lookup(&info) {
            Some(provided) => provided,
            None => {
                return Outcome::not_found(
                    FetchFromScope::ORIGIN,
                    format!("No service '{}' found in container", self.key),
                );
            }
        };

        let value = match context.instantiate(provided) {
            Ok(value) => value,
            Err(error) => return Outcome::nested(FetchFromScope::ORIGIN, error),
        };

        trace!(service = info.name(), "fetched from scope");
        match &self.attr {
            Some(attr) => pluck(FetchFromScope::ORIGIN, &value, attr),
            None => Outcome::Found(value),
        }
    }
}
