#![allow(clippy::used_underscore_binding)]

use crate::{Origin, ServiceInfo};
use derive_more::{Display, Error};

/// A result from attempting to resolve the fields of a target and construct
/// an instance of it.
pub type InjectResult<T> = Result<T, InjectError>;

/// An error that has occurred during resolution of a target.
///
/// Failures raised from field resolution display as
/// `<target>|<field>|<origin>: <message>`, where the origin names the rule or
/// operator that produced the failure.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum InjectError {
    /// A field's value could not be found and the field has no default.
    #[display(fmt = "{}|{}|{}: {}", target, field, origin, message)]
    MissingValue {
        /// The target being constructed.
        target: &'static str,
        /// The field that could not be resolved.
        field: &'static str,
        /// The rule or operator that reported the miss.
        origin: Origin,
        /// Description of what was missing.
        message: String,
    },

    /// A field is misconfigured in a way that makes resolution impossible.
    #[display(fmt = "{}|{}|{}: {}", target, field, origin, message)]
    InvalidValue {
        /// The target being constructed.
        target: &'static str,
        /// The field that failed.
        field: &'static str,
        /// The rule or operator that reported the failure.
        origin: Origin,
        /// Description of the failure.
        message: String,
    },

    /// No rule handled a field, and the field has no default to fall back on.
    #[display(
        fmt = "{}|{}: no rule produced a value and the field has no default",
        target,
        field
    )]
    Unresolved {
        /// The target being constructed.
        target: &'static str,
        /// The field no rule handled.
        field: &'static str,
    },

    /// A cycle was detected while resolving nested targets.
    #[display(
        fmt = "a cycle was detected during resolution of {} [{}]",
        target,
        "fmt_cycle(cycle)"
    )]
    CycleDetected {
        /// The target that was requested again while being constructed.
        target: &'static str,
        /// The chain of targets that were being constructed.
        cycle: Vec<&'static str>,
    },

    /// Nothing is registered for the requested service.
    #[display(fmt = "{} has no provider", "service_info.name()")]
    MissingProvider {
        /// The service that was requested.
        service_info: ServiceInfo,
    },

    /// The registered value or target produced the wrong type.
    #[display(
        fmt = "the registered provider for {} returned the wrong type",
        "service_info.name()"
    )]
    InvalidProvider {
        /// The service that was requested.
        service_info: ServiceInfo,
    },

    /// A constructor asked for an argument that was neither resolved nor
    /// declared with a default.
    #[display(fmt = "{}|{}: no value was supplied for this argument", target, field)]
    MissingArgument {
        /// The target being constructed.
        target: &'static str,
        /// The requested argument.
        field: &'static str,
    },

    /// A constructor asked for an argument as the wrong type.
    #[display(
        fmt = "{}|{}: expected a value of type {}, found {}",
        target,
        field,
        "expected.name()",
        "found.name()"
    )]
    InvalidArgument {
        /// The target being constructed.
        target: &'static str,
        /// The requested argument.
        field: &'static str,
        /// The type the constructor asked for.
        expected: ServiceInfo,
        /// The type of the resolved value.
        found: ServiceInfo,
    },

    /// A target's constructor failed.
    #[display(fmt = "an error occurred during construction of {}: {}", target, message)]
    ActivationFailed {
        /// The target being constructed.
        target: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// An unexpected error has occurred. This is usually caused by a bug in
    /// the library itself.
    #[display(fmt = "an unexpected error occurred (please report this): {}", _0)]
    InternalError(#[error(ignore)] String),
}

fn fmt_cycle(cycle: &[&'static str]) -> String {
    cycle.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_failures_use_pipe_separated_prefix() {
        let error = InjectError::MissingValue {
            target: "Heading",
            field: "greeting",
            origin: Origin::new("FetchFromScope"),
            message: "No service 'Settings' found in container".to_string(),
        };
        assert_eq!(
            "Heading|greeting|FetchFromScope: No service 'Settings' found in container",
            error.to_string()
        );
    }

    #[test]
    fn cycle_lists_targets_in_request_order() {
        let error = InjectError::CycleDetected {
            target: "Foo",
            cycle: vec!["Foo", "Bar", "Foo"],
        };
        assert_eq!(
            "a cycle was detected during resolution of Foo [Foo -> Bar -> Foo]",
            error.to_string()
        );
    }
}
