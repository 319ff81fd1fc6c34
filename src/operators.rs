//! Operators are the steps of an annotation's pipeline. Each one receives the
//! outcome of the step before it and produces a new one.

mod fetch;
mod field_default;
mod pluck;
mod request_context;

pub use fetch::*;
pub use field_default::*;
pub use pluck::*;
pub use request_context::*;

use crate::{Origin, Outcome, ResolutionContext, Service};
use std::fmt::Debug;

/// A step in a field's operator pipeline.
///
/// The first operator in a pipeline receives `None` as its previous outcome.
/// Operators never fail outright. They report misconfiguration by returning
/// [`Outcome::Error`], which stops the pipeline.
pub trait Operator: Service + Debug {
    /// Names this operator in diagnostics.
    fn origin(&self) -> Origin;

    /// Runs this step of the pipeline.
    fn apply(
        &self,
        previous: Option<Outcome>,
        context: &ResolutionContext<'_>,
    ) -> Outcome;
}
