use super::pluck::pluck;
use crate::{Operator, Origin, Outcome, ResolutionContext};

/// Fetches the request context the scope was created with, optionally
/// plucking an attribute off of it. A scope without a context is a
/// misconfiguration.
#[derive(Clone, Debug, Default)]
pub struct FetchRequestContext {
    attr: Option<String>,
}

impl FetchRequestContext {
    /// Names this operator in outcomes and errors.
    pub const ORIGIN: Origin = Origin::new("FetchRequestContext");

    /// Fetches the whole context, without plucking anything off of it.
    #[must_use]
    pub fn new() -> Self {
        FetchRequestContext::default()
    }

    /// Plucks an attribute off of the context.
    #[must_use]
    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }

    /// The attribute to pluck, if any.
    #[must_use]
    pub fn attr(&self) -> Option<&str> {
        self.attr.as_deref()
    }
}

impl Operator for FetchRequestContext {
    fn origin(&self) -> Origin {
        FetchRequestContext::ORIGIN
    }

    fn apply(
        &self,
        _previous: Option<Outcome>,
        context: &ResolutionContext<'_>,
    ) -> Outcome {
        let request_context = match context.request_context() {
            Some(request_context) => request_context,
            None => {
                return Outcome::error(
                    FetchRequestContext::ORIGIN,
                    "Container context is None",
                )
            }
        };

        match &self.attr {
            Some(attr) => pluck(FetchRequestContext::ORIGIN, &request_context, attr),
            None => Outcome::Found(request_context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_support::{dummy_target, Customer, DummyScope},
        Value,
    };

    fn customer() -> Value {
        Value::with_attributes(Customer {
            name: "Mary".to_string(),
        })
    }

    #[test]
    fn returns_whole_context() {
        let scope = DummyScope::new().with_context(customer());
        let target = dummy_target();
        let context = ResolutionContext::new(&target, &scope, None, None);

        let outcome = FetchRequestContext::new().apply(None, &context);
        assert!(outcome.value().map_or(false, Value::is::<Customer>));
    }

    #[test]
    fn plucks_from_context() {
        let scope = DummyScope::new().with_context(customer());
        let target = dummy_target();
        let context = ResolutionContext::new(&target, &scope, None, None);

        let outcome = FetchRequestContext::new()
            .with_attr("name")
            .apply(None, &context);
        assert_eq!(
            Some(&"Mary".to_string()),
            outcome.value().and_then(Value::downcast_ref::<String>)
        );
    }

    #[test]
    fn missing_context_is_an_error() {
        let scope = DummyScope::new();
        let target = dummy_target();
        let context = ResolutionContext::new(&target, &scope, None, None);

        for operator in &[
            FetchRequestContext::new(),
            FetchRequestContext::new().with_attr("name"),
        ] {
            let outcome = operator.apply(None, &context);
            assert!(outcome.is_error());
            assert_eq!(Some("Container context is None"), outcome.message());
        }
    }

    #[test]
    fn missing_attribute_is_an_error() {
        let scope = DummyScope::new().with_context(customer());
        let target = dummy_target();
        let context = ResolutionContext::new(&target, &scope, None, None);

        let outcome = FetchRequestContext::new()
            .with_attr("email")
            .apply(None, &context);
        assert!(outcome.is_error());
        assert_eq!(Some("No attribute 'email' on 'Customer'"), outcome.message());
    }
}
