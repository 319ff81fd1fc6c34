//! The rules that decide how a field gets its value.
//!
//! For each field, the rules in [`RULES`] are evaluated in order. The first
//! one that does not [`Skip`](Outcome::Skip) decides the field's outcome.

use crate::{
    run_operators, FieldDescriptor, Origin, Outcome, ResolutionContext,
};
use tracing::trace;

/// A strategy for resolving a field.
pub trait Rule {
    /// Names this rule in diagnostics.
    fn origin(&self) -> Origin;

    /// Tries to resolve a field. Returns [`Outcome::Skip`] if this rule does
    /// not apply to the field.
    fn evaluate(
        &self,
        field: &FieldDescriptor,
        context: &ResolutionContext<'_>,
    ) -> Outcome;
}

/// Fields that the target populates itself are marked as such.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExcludedField;

impl ExcludedField {
    /// Names this rule in outcomes and errors.
    pub const ORIGIN: Origin = Origin::new("ExcludedField");
}

impl Rule for ExcludedField {
    fn origin(&self) -> Origin {
        ExcludedField::ORIGIN
    }

    fn evaluate(
        &self,
        field: &FieldDescriptor,
        _context: &ResolutionContext<'_>,
    ) -> Outcome {
        if field.participates_in_construction() {
            Outcome::Skip(ExcludedField::ORIGIN)
        } else {
            Outcome::Init(field.declared_type())
        }
    }
}

/// Values passed in props win over everything else. Props are checked before
/// system props.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExplicitOverride;

impl ExplicitOverride {
    /// Names this rule in outcomes and errors.
    pub const ORIGIN: Origin = Origin::new("ExplicitOverride");
}

impl Rule for ExplicitOverride {
    fn origin(&self) -> Origin {
        ExplicitOverride::ORIGIN
    }

    fn evaluate(
        &self,
        field: &FieldDescriptor,
        context: &ResolutionContext<'_>,
    ) -> Outcome {
        let value = [context.props(), context.system_props()]
            .into_iter()
            .flatten()
            .find_map(|props| props.get(field.name()));

        match value {
            Some(value) => Outcome::Found(value.clone()),
            None => Outcome::Skip(ExplicitOverride::ORIGIN),
        }
    }
}

/// A field declared as the scope's own type receives the scope.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScopeSelfRequest;

impl ScopeSelfRequest {
    /// Names this rule in outcomes and errors.
    pub const ORIGIN: Origin = Origin::new("ScopeSelfRequest");
}

impl Rule for ScopeSelfRequest {
    fn origin(&self) -> Origin {
        ScopeSelfRequest::ORIGIN
    }

    fn evaluate(
        &self,
        field: &FieldDescriptor,
        context: &ResolutionContext<'_>,
    ) -> Outcome {
        let handle = context.scope().handle();
        if field.declared_type() == handle.info() {
            Outcome::Found(handle)
        } else {
            Outcome::Skip(ScopeSelfRequest::ORIGIN)
        }
    }
}

/// Fields without an annotation are looked up in the scope by their declared
/// type. Structural types are never looked up.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTypeLookup;

impl PlainTypeLookup {
    /// Names this rule in outcomes and errors.
    pub const ORIGIN: Origin = Origin::new("PlainTypeLookup");
}

impl Rule for PlainTypeLookup {
    fn origin(&self) -> Origin {
        PlainTypeLookup::ORIGIN
    }

    fn evaluate(
        &self,
        field: &FieldDescriptor,
        context: &ResolutionContext<'_>,
    ) -> Outcome {
        let declared_type = field.declared_type();
        if field.is_annotated() || declared_type.is_structural() {
            return Outcome::Skip(PlainTypeLookup::ORIGIN);
        }

        match context.lookup(&declared_type) {
            Some(provided) => match context.instantiate(provided) {
                Ok(value) => Outcome::Found(value),
                Err(error) => Outcome::nested(PlainTypeLookup::ORIGIN, error),
            },
            None => Outcome::not_found(
                PlainTypeLookup::ORIGIN,
                format!(
                    "No service '{}' found in container",
                    declared_type.short_name()
                ),
            ),
        }
    }
}

/// Annotated fields run their operator pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnnotatedPipeline;

impl AnnotatedPipeline {
    /// Names this rule in outcomes and errors.
    pub const ORIGIN: Origin = Origin::new("AnnotatedPipeline");
}

impl Rule for AnnotatedPipeline {
    fn origin(&self) -> Origin {
        AnnotatedPipeline::ORIGIN
    }

    fn evaluate(
        &self,
        field: &FieldDescriptor,
        context: &ResolutionContext<'_>,
    ) -> Outcome {
        if !field.is_annotated() {
            return Outcome::Skip(AnnotatedPipeline::ORIGIN);
        }

        if field.operators().is_empty() {
            return Outcome::error(
                AnnotatedPipeline::ORIGIN,
                "Annotation has no operators",
            );
        }

        run_operators(field.operators(), context)
    }
}

/// Every rule, in evaluation order.
pub const RULES: [&dyn Rule; 5] = [
    &ExcludedField,
    &ExplicitOverride,
    &ScopeSelfRequest,
    &PlainTypeLookup,
    &AnnotatedPipeline,
];

/// Evaluates [`RULES`] in order against a field until one of them does not
/// skip. Returns that rule's origin along with its outcome. If every rule
/// skips, the last skip is returned.
#[must_use]
pub fn evaluate_rules(
    field: &FieldDescriptor,
    context: &ResolutionContext<'_>,
) -> (Origin, Outcome) {
    let mut last = (
        AnnotatedPipeline::ORIGIN,
        Outcome::Skip(AnnotatedPipeline::ORIGIN),
    );

    for rule in RULES.iter() {
        let outcome = rule.evaluate(field, context);
        trace!(
            field = field.name(),
            rule = rule.origin().name(),
            outcome = ?outcome.kind(),
            "evaluated rule"
        );

        if !outcome.is_skip() {
            return (rule.origin(), outcome);
        }

        last = (rule.origin(), outcome);
    }

    last
}
