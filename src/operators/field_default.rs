use crate::{Operator, Origin, Outcome, ResolutionContext};

/// Reads the static default of a field on the target being resolved.
#[derive(Clone, Debug)]
pub struct ReadFieldDefault {
    field: String,
}

impl ReadFieldDefault {
    /// Names this operator in outcomes and errors.
    pub const ORIGIN: Origin = Origin::new("ReadFieldDefault");

    /// Reads the default of the named field.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        ReadFieldDefault {
            field: field.into(),
        }
    }

    /// The name of the field whose default is read.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Operator for ReadFieldDefault {
    fn origin(&self) -> Origin {
        ReadFieldDefault::ORIGIN
    }

    fn apply(
        &self,
        _previous: Option<Outcome>,
        context: &ResolutionContext<'_>,
    ) -> Outcome {
        let field = match context.field(&self.field) {
            Some(field) => field,
            None => {
                return Outcome::error(
                    ReadFieldDefault::ORIGIN,
                    format!("No field \"{}\" on target", self.field),
                )
            }
        };

        match field.default_value() {
            Some(value) => Outcome::Found(value.clone()),
            None => Outcome::not_found(
                ReadFieldDefault::ORIGIN,
                format!("Field \"{}\" has no default", self.field),
            ),
        }
    }
}
