use crate::{
    evaluate_rules, Arguments, InjectError, InjectResult, Outcome, Props,
    ResolutionContext, Scope, Service, ServiceInfo, Svc, Target, Value,
};
use tracing::{debug, warn};

/// Resolves every field of a target, then constructs or calls it with the
/// resolved arguments.
///
/// For each field, in declaration order, the rules are evaluated and the
/// outcome is applied:
/// - a found value is supplied as the field's argument;
/// - fields the target populates itself are left out;
/// - a configuration error stops resolution immediately;
/// - a miss, or a field no rule handled, falls back to the field's default,
///   and fails if there is none.
///
/// ```
/// use field_injector::{
///     props, resolve, Annotation, Attributes, FieldSpec, PluckAttribute,
///     FetchFromScope, Registry, Target, Value,
/// };
///
/// struct Settings {
///     greeting: String,
/// }
///
/// impl Attributes for Settings {
///     fn attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "greeting" => Some(Value::new(self.greeting.clone())),
///             _ => None,
///         }
///     }
/// }
///
/// let target = Target::function::<String>("greet")
///     .field(FieldSpec::of::<String>("person"))
///     .field(FieldSpec::of::<String>("greeting").annotated(
///         Annotation::new()
///             .then(FetchFromScope::of::<Settings>())
///             .then(PluckAttribute::new("greeting")),
///     ))
///     .construct(|args| {
///         Ok(format!(
///             "{} {}",
///             args.cloned::<String>("greeting")?,
///             args.cloned::<String>("person")?
///         ))
///     });
///
/// let mut registry = Registry::new();
/// registry.register_attributed(Settings {
///     greeting: "Hello".to_string(),
/// });
/// let container = registry.create_container(None);
///
/// let props = props! { "person" => "Fred".to_string() };
/// let value = resolve(&target, &container, Some(&props), None).unwrap();
/// assert_eq!("Hello Fred", value.downcast_ref::<String>().unwrap());
/// ```
pub fn resolve(
    target: &Target,
    scope: &dyn Scope,
    props: Option<&Props>,
    system_props: Option<&Props>,
) -> InjectResult<Value> {
    let context = ResolutionContext::new(target, scope, props, system_props);
    resolve_in(&context)
}

pub(crate) fn resolve_nested(
    target: &Target,
    scope: &dyn Scope,
    parents: Vec<Target>,
) -> InjectResult<Value> {
    let context =
        ResolutionContext::with_path(target, scope, None, None, parents);
    resolve_in(&context)
}

fn resolve_in(context: &ResolutionContext<'_>) -> InjectResult<Value> {
    let target = context.target();
    debug!(target_name = target.name(), "resolving target");

    let mut arguments = Arguments::new(target);
    for field in context.fields() {
        let (origin, outcome) = evaluate_rules(field, context);
        match outcome {
            Outcome::Found(value) => {
                arguments.supply(field.name(), value);
            }
            Outcome::Init(_) => {}
            Outcome::Error {
                cause: Some(cause), ..
            } => return Err(*cause),
            Outcome::Error {
                message, origin, ..
            } => {
                return Err(InjectError::InvalidValue {
                    target: target.name(),
                    field: field.name(),
                    origin,
                    message,
                })
            }
            Outcome::NotFound { message, origin } => {
                if field.default_value().is_none() {
                    return Err(InjectError::MissingValue {
                        target: target.name(),
                        field: field.name(),
                        origin,
                        message,
                    });
                }

                warn!(
                    target_name = target.name(),
                    field = field.name(),
                    %origin,
                    %message,
                    "falling back to field default"
                );
            }
            Outcome::Skip(_) => {
                if field.default_value().is_none() {
                    return Err(InjectError::Unresolved {
                        target: target.name(),
                        field: field.name(),
                    });
                }

                debug!(
                    target_name = target.name(),
                    field = field.name(),
                    %origin,
                    "no rule matched, using field default"
                );
            }
        }
    }

    let value = target.invoke(arguments)?;
    debug!(target_name = target.name(), "constructed target");
    Ok(value)
}

/// Resolves targets against a scope. This is a convenience wrapper around
/// [`resolve`].
#[derive(Clone, Copy)]
pub struct Injector<'a> {
    scope: &'a dyn Scope,
}

impl<'a> Injector<'a> {
    /// Creates an injector over a scope.
    #[must_use]
    pub fn new(scope: &'a dyn Scope) -> Self {
        Injector { scope }
    }

    /// The scope targets are resolved in.
    #[must_use]
    pub fn scope(&self) -> &'a dyn Scope {
        self.scope
    }

    /// Resolves and constructs a target with no props.
    pub fn inject(&self, target: &Target) -> InjectResult<Value> {
        resolve(target, self.scope, None, None)
    }

    /// Resolves and constructs a target with the given props.
    pub fn inject_with(
        &self,
        target: &Target,
        props: Option<&Props>,
        system_props: Option<&Props>,
    ) -> InjectResult<Value> {
        resolve(target, self.scope, props, system_props)
    }

    /// Resolves and constructs a target, then downcasts the result.
    pub fn inject_as<T: Service>(
        &self,
        target: &Target,
        props: Option<&Props>,
    ) -> InjectResult<Svc<T>> {
        resolve(target, self.scope, props, None)?
            .downcast()
            .ok_or_else(|| InjectError::InvalidProvider {
                service_info: ServiceInfo::of::<T>(),
            })
    }
}
