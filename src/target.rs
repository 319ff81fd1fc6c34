use crate::{
    Arguments, Attributes, InjectResult, Operator, Service, ServiceInfo, Svc,
    Value,
};
use std::{
    any::Any,
    fmt::{Debug, Formatter},
    marker::PhantomData,
};

/// The shape of a target. Descriptor extraction is selected by this alone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TargetKind {
    /// A record with named fields. Fields can be excluded from construction.
    Record,
    /// A tuple-like record with named positions.
    Tuple,
    /// A plain function with named parameters.
    Function,
}

/// A declared field type, before unwrapping.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeRef {
    /// A field of type `T`.
    Plain(ServiceInfo),
    /// A field of type `Option<T>`. Lookups use `T`.
    Optional(ServiceInfo),
}

impl TypeRef {
    /// The type used as a lookup key, with any optional wrapper removed.
    #[must_use]
    pub fn unwrapped(&self) -> ServiceInfo {
        match self {
            TypeRef::Plain(info) | TypeRef::Optional(info) => *info,
        }
    }

    /// Whether the declared type was wrapped in `Option`.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeRef::Optional(_))
    }
}

/// An ordered chain of operators attached to a field. Declaring a field with
/// an annotation opts it into operator-based resolution instead of a plain
/// type lookup.
///
/// ```
/// use field_injector::{Annotation, FetchFromScope, PluckAttribute};
///
/// struct Settings;
///
/// let annotation = Annotation::new()
///     .then(FetchFromScope::of::<Settings>())
///     .then(PluckAttribute::new("greeting"));
/// assert_eq!(2, annotation.len());
/// ```
#[derive(Clone, Default)]
pub struct Annotation {
    operators: Vec<Svc<dyn Operator>>,
}

impl Annotation {
    /// Creates an empty annotation.
    #[must_use]
    pub fn new() -> Self {
        Annotation::default()
    }

    /// Appends an operator to the end of the chain.
    #[must_use]
    pub fn then<O: Operator>(mut self, operator: O) -> Self {
        self.operators.push(Svc::new(operator));
        self
    }

    /// The operators in the order they run.
    #[must_use]
    pub fn operators(&self) -> &[Svc<dyn Operator>] {
        &self.operators
    }

    /// The number of operators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether the chain has no operators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Debug for Annotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.operators.iter()).finish()
    }
}

/// The static declaration of one field or parameter of a target.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    name: &'static str,
    declared: TypeRef,
    default_value: Option<Value>,
    excluded: bool,
    annotation: Option<Annotation>,
}

impl FieldSpec {
    /// Declares a field of type `T`.
    #[must_use]
    pub fn of<T: ?Sized + Any>(name: &'static str) -> Self {
        FieldSpec::new(name, TypeRef::Plain(ServiceInfo::of::<T>()))
    }

    /// Declares a field of type `Option<T>`.
    #[must_use]
    pub fn optional<T: ?Sized + Any>(name: &'static str) -> Self {
        FieldSpec::new(name, TypeRef::Optional(ServiceInfo::of::<T>()))
    }

    /// Declares a field with an explicit type reference.
    #[must_use]
    pub fn new(name: &'static str, declared: TypeRef) -> Self {
        FieldSpec {
            name,
            declared,
            default_value: None,
            excluded: false,
            annotation: None,
        }
    }

    /// Gives the field a static default.
    #[must_use]
    pub fn with_default<T: Service>(self, value: T) -> Self {
        self.with_default_value(Value::new(value))
    }

    /// Gives the field a static default from an existing value.
    #[must_use]
    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Excludes the field from construction. The target populates it itself.
    /// Only record targets honor this.
    #[must_use]
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Attaches an operator chain to the field.
    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's declared type.
    #[must_use]
    pub fn declared(&self) -> TypeRef {
        self.declared
    }

    /// The field's static default, if it has one.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Whether the field was marked as excluded from construction.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// The field's annotation, if it has one.
    #[must_use]
    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }
}

/// Builds the value of a target from its resolved arguments.
pub trait Constructor: Service + Fn(Arguments) -> InjectResult<Value> {}
impl<F: Service + Fn(Arguments) -> InjectResult<Value>> Constructor for F {}

/// Something that can be constructed or called with resolved arguments: a
/// record, a tuple-like record, or a function. Targets are declared once and
/// are cheap to clone.
///
/// ```
/// use field_injector::{FieldSpec, Target, TargetKind};
///
/// struct Greeting {
///     greeting: String,
///     name: String,
/// }
///
/// let target = Target::record::<Greeting>()
///     .field(FieldSpec::of::<String>("greeting"))
///     .field(FieldSpec::of::<String>("name").with_default("World".to_string()))
///     .construct(|args| {
///         Ok(Greeting {
///             greeting: args.cloned("greeting")?,
///             name: args.cloned("name")?,
///         })
///     });
///
/// assert_eq!("Greeting", target.name());
/// assert_eq!(TargetKind::Record, target.kind());
/// assert_eq!(2, target.fields().len());
/// ```
#[derive(Clone)]
pub struct Target {
    name: &'static str,
    kind: TargetKind,
    result: ServiceInfo,
    fields: Svc<[FieldSpec]>,
    constructor: Svc<dyn Constructor>,
}

impl Target {
    /// Starts declaring a record target producing a `R`.
    #[must_use]
    pub fn record<R: Service>() -> TargetBuilder<R> {
        TargetBuilder::new(ServiceInfo::of::<R>().short_name(), TargetKind::Record)
    }

    /// Starts declaring a tuple-like target producing a `R`.
    #[must_use]
    pub fn tuple<R: Service>() -> TargetBuilder<R> {
        TargetBuilder::new(ServiceInfo::of::<R>().short_name(), TargetKind::Tuple)
    }

    /// Starts declaring a function target named `name` returning a `R`.
    #[must_use]
    pub fn function<R: Service>(name: &'static str) -> TargetBuilder<R> {
        TargetBuilder::new(name, TargetKind::Function)
    }

    /// The name of this target, used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The shape of this target.
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// The type of value this target produces.
    #[must_use]
    pub fn result(&self) -> ServiceInfo {
        self.result
    }

    /// The declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Finds a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Whether this is the same declaration as another target. Clones of a
    /// target share its declaration. Separately built targets never do, even
    /// when their names and results match.
    #[must_use]
    pub fn same_as(&self, other: &Target) -> bool {
        Svc::ptr_eq(&self.constructor, &other.constructor)
    }

    /// Constructs or calls the target with the given arguments.
    pub fn invoke(&self, arguments: Arguments) -> InjectResult<Value> {
        (self.constructor)(arguments)
    }
}

impl Debug for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("result", &self.result.name())
            .field("fields", &self.fields)
            .finish()
    }
}

/// A builder for a [`Target`].
pub struct TargetBuilder<R> {
    name: &'static str,
    kind: TargetKind,
    fields: Vec<FieldSpec>,
    marker: PhantomData<fn() -> R>,
}

impl<R: Service> TargetBuilder<R> {
    fn new(name: &'static str, kind: TargetKind) -> Self {
        TargetBuilder {
            name,
            kind,
            fields: Vec::new(),
            marker: PhantomData,
        }
    }

    /// Declares the next field of the target.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Finishes the target with a constructor.
    #[must_use]
    pub fn construct<F>(self, constructor: F) -> Target
    where
        F: Service + Fn(Arguments) -> InjectResult<R>,
    {
        self.finish(move |arguments: Arguments| {
            constructor(arguments).map(Value::new)
        })
    }

    fn finish<F: Constructor>(self, constructor: F) -> Target {
        Target {
            name: self.name,
            kind: self.kind,
            result: ServiceInfo::of::<R>(),
            fields: self.fields.into(),
            constructor: Svc::new(constructor),
        }
    }
}

impl<R: Attributes> TargetBuilder<R> {
    /// Finishes the target with a constructor, allowing attributes to be
    /// plucked from the values it produces.
    #[must_use]
    pub fn construct_with_attributes<F>(self, constructor: F) -> Target
    where
        F: Service + Fn(Arguments) -> InjectResult<R>,
    {
        self.finish(move |arguments: Arguments| {
            constructor(arguments).map(Value::with_attributes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_field_unwraps_to_inner_type() {
        let field = FieldSpec::optional::<u32>("count");
        assert!(field.declared().is_optional());
        assert_eq!(ServiceInfo::of::<u32>(), field.declared().unwrapped());
    }

    #[test]
    fn field_lookup_by_name() {
        let target = Target::function::<u32>("double")
            .field(FieldSpec::of::<u32>("value").with_default(2_u32))
            .construct(|args| Ok(*args.get::<u32>("value")? * 2));

        assert_eq!("double", target.name());
        assert_eq!(TargetKind::Function, target.kind());
        assert_eq!(ServiceInfo::of::<u32>(), target.result());
        assert!(target.field("value").is_some());
        assert!(target.field("missing").is_none());
    }

    #[test]
    fn invoke_runs_constructor() {
        let target = Target::function::<u32>("double")
            .field(FieldSpec::of::<u32>("value").with_default(21_u32))
            .construct(|args| Ok(*args.get::<u32>("value")? * 2));

        let value = target.invoke(Arguments::new(&target)).unwrap();
        assert_eq!(Some(&42), value.downcast_ref::<u32>());
    }

    #[test]
    fn clones_share_a_declaration() {
        let build = || {
            Target::function::<u32>("double")
                .construct(|args| Ok(*args.get::<u32>("value")? * 2))
        };
        let first = build();
        let second = build();

        assert!(first.same_as(&first.clone()));
        assert!(!first.same_as(&second));
    }

    #[test]
    fn annotation_keeps_operator_order() {
        use crate::{FetchRequestContext, PluckAttribute};

        let annotation = Annotation::new()
            .then(FetchRequestContext::new())
            .then(PluckAttribute::new("name"));
        let origins: Vec<_> = annotation
            .operators()
            .iter()
            .map(|operator| operator.origin())
            .collect();
        assert_eq!(
            vec![FetchRequestContext::ORIGIN, PluckAttribute::ORIGIN],
            origins
        );
    }
}
