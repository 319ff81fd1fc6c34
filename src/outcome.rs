//! Outcomes of rules and operators.
//!
//! Rules and operators never signal their decisions by failing. Instead they
//! always return an [`Outcome`], which holds the value (if any) and indicates
//! what the caller should do next. Only the resolver turns outcomes into
//! errors.

use crate::{InjectError, ServiceInfo, Value};
use std::fmt::{Display, Formatter};

/// Names the rule or operator that produced an [`Outcome`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Origin(&'static str);

impl Origin {
    /// Creates a new origin with the given name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Origin(name)
    }

    /// The name of the rule or operator.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// The decision reached by a rule or operator.
#[derive(Debug)]
pub enum Outcome {
    /// A value was produced.
    Found(Value),

    /// A lookup was done, but nothing matched. A field default may still
    /// satisfy the field.
    NotFound {
        /// The text to display if the miss becomes a failure.
        message: String,
        /// Where the miss happened.
        origin: Origin,
    },

    /// A configuration mistake. Processing stops: no more operators and no
    /// more rules.
    Error {
        /// The text to display.
        message: String,
        /// Where the mistake was detected.
        origin: Origin,
        /// The failure of a nested resolution, if that's what went wrong. It
        /// is surfaced as-is so the innermost diagnostic is reported.
        cause: Option<Box<InjectError>>,
    },

    /// The field is not part of the arguments collected for construction.
    /// The target assigns it itself.
    Init(ServiceInfo),

    /// The rule's conditions were not met, so move on to the next rule.
    Skip(Origin),
}

/// The tag of an [`Outcome`], without its payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OutcomeKind {
    /// See [`Outcome::Found`].
    Found,
    /// See [`Outcome::NotFound`].
    NotFound,
    /// See [`Outcome::Error`].
    Error,
    /// See [`Outcome::Init`].
    Init,
    /// See [`Outcome::Skip`].
    Skip,
}

impl Outcome {
    /// Creates a [`Outcome::NotFound`].
    #[must_use]
    pub fn not_found(origin: Origin, message: impl Into<String>) -> Self {
        Outcome::NotFound {
            message: message.into(),
            origin,
        }
    }

    /// Creates an [`Outcome::Error`] without a nested cause.
    #[must_use]
    pub fn error(origin: Origin, message: impl Into<String>) -> Self {
        Outcome::Error {
            message: message.into(),
            origin,
            cause: None,
        }
    }

    /// Creates an [`Outcome::Error`] from the failure of a nested resolution.
    #[must_use]
    pub fn nested(origin: Origin, cause: InjectError) -> Self {
        Outcome::Error {
            message: cause.to_string(),
            origin,
            cause: Some(Box::new(cause)),
        }
    }

    /// The tag of this outcome.
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Found(_) => OutcomeKind::Found,
            Outcome::NotFound { .. } => OutcomeKind::NotFound,
            Outcome::Error { .. } => OutcomeKind::Error,
            Outcome::Init(_) => OutcomeKind::Init,
            Outcome::Skip(_) => OutcomeKind::Skip,
        }
    }

    /// Whether this outcome is an [`Outcome::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }

    /// Whether this outcome is an [`Outcome::Skip`].
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip(_))
    }

    /// The value produced, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Found(value) => Some(value),
            _ => None,
        }
    }

    /// The diagnostic message, for misses and errors.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::NotFound { message, .. } | Outcome::Error { message, .. } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Where this outcome came from, for misses, errors and skips.
    #[must_use]
    pub fn origin(&self) -> Option<Origin> {
        match self {
            Outcome::NotFound { origin, .. }
            | Outcome::Error { origin, .. }
            | Outcome::Skip(origin) => Some(*origin),
            _ => None,
        }
    }
}
