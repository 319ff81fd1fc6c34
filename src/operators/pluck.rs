use crate::{Operator, Origin, Outcome, ResolutionContext, Value};
use tracing::trace;

/// Reads a named attribute off of the value found by the previous operator.
#[derive(Clone, Debug)]
pub struct PluckAttribute {
    name: String,
}

impl PluckAttribute {
    /// Names this operator in outcomes and errors.
    pub const ORIGIN: Origin = Origin::new("PluckAttribute");

    /// Creates an operator plucking the attribute with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        PluckAttribute { name: name.into() }
    }

    /// The attribute being plucked.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Operator for PluckAttribute {
    fn origin(&self) -> Origin {
        PluckAttribute::ORIGIN
    }

    fn apply(
        &self,
        previous: Option<Outcome>,
        _context: &ResolutionContext<'_>,
    ) -> Outcome {
        match previous {
            None => Outcome::not_found(
                PluckAttribute::ORIGIN,
                "Cannot use 'PluckAttribute' operator first in the pipeline",
            ),
            Some(Outcome::Found(value)) => {
                pluck(PluckAttribute::ORIGIN, &value, &self.name)
            }
            Some(outcome @ Outcome::NotFound { .. })
            | Some(outcome @ Outcome::Error { .. }) => outcome,
            Some(outcome) => Outcome::error(
                PluckAttribute::ORIGIN,
                format!(
                    "operator received an unexpected {:?} outcome",
                    outcome.kind()
                ),
            ),
        }
    }
}

/// Reads an attribute off of a value. A missing attribute is a
/// misconfiguration, not a miss.
pub(crate) fn pluck(origin: Origin, value: &Value, name: &str) -> Outcome {
    match value.attribute(name) {
        Some(attribute) => {
            trace!(
                service = value.info().name(),
                attribute = name,
                "plucked attribute"
            );
            Outcome::Found(attribute)
        }
        None => Outcome::error(
            origin,
            format!(
                "No attribute '{}' on '{}'",
                name,
                value.info().short_name()
            ),
        ),
    }
}
