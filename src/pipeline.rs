use crate::{Operator, Origin, Outcome, ResolutionContext, Svc};
use tracing::trace;

/// Names the pipeline runner itself in diagnostics.
pub const PIPELINE_ORIGIN: Origin = Origin::new("OperatorPipeline");

/// Runs a chain of operators, feeding each the outcome of the one before it.
/// The first operator receives `None`. An [`Outcome::Error`] stops the chain
/// and is returned immediately. Otherwise, the outcome of the last operator is
/// returned, whatever it is.
///
/// An empty chain has nothing to run and is treated as a misconfiguration.
#[must_use]
pub fn run_operators(
    operators: &[Svc<dyn Operator>],
    context: &ResolutionContext<'_>,
) -> Outcome {
    let mut previous: Option<Outcome> = None;
    for operator in operators {
        let outcome = operator.apply(previous.take(), context);
        trace!(
            operator = operator.origin().name(),
            outcome = ?outcome.kind(),
            "applied operator"
        );

        if outcome.is_error() {
            return outcome;
        }

        previous = Some(outcome);
    }

    previous.unwrap_or_else(|| {
        Outcome::error(PIPELINE_ORIGIN, "Operator pipeline is empty")
    })
}
