use crate::{
    extract_field_descriptors, resolver::resolve_nested, FieldDescriptor,
    InjectError, InjectResult, Props, Provided, Scope, ServiceInfo, Target,
    Value,
};

/// Everything rules and operators can see while a single target is being
/// resolved. A new context is created for each target, including nested ones.
pub struct ResolutionContext<'a> {
    scope: &'a dyn Scope,
    props: Option<&'a Props>,
    system_props: Option<&'a Props>,
    target: &'a Target,
    fields: Vec<FieldDescriptor>,
    path: Vec<Target>,
}

impl<'a> ResolutionContext<'a> {
    /// Creates a context for resolving a target at the top of a request.
    #[must_use]
    pub fn new(
        target: &'a Target,
        scope: &'a dyn Scope,
        props: Option<&'a Props>,
        system_props: Option<&'a Props>,
    ) -> Self {
        ResolutionContext::with_path(target, scope, props, system_props, Vec::new())
    }

    /// Creates a context for a target that is being resolved while the targets
    /// in `parents` are still being constructed.
    pub(crate) fn with_path(
        target: &'a Target,
        scope: &'a dyn Scope,
        props: Option<&'a Props>,
        system_props: Option<&'a Props>,
        parents: Vec<Target>,
    ) -> Self {
        let mut path = parents;
        path.push(target.clone());

        ResolutionContext {
            scope,
            props,
            system_props,
            target,
            fields: extract_field_descriptors(target),
            path,
        }
    }

    /// The scope services are looked up in.
    #[must_use]
    pub fn scope(&self) -> &'a dyn Scope {
        self.scope
    }

    /// The props passed in for this target. Nested targets get none.
    #[must_use]
    pub fn props(&self) -> Option<&'a Props> {
        self.props
    }

    /// The system props passed in for this target. Nested targets get none.
    #[must_use]
    pub fn system_props(&self) -> Option<&'a Props> {
        self.system_props
    }

    /// The target being resolved.
    #[must_use]
    pub fn target(&self) -> &'a Target {
        self.target
    }

    /// Descriptors of the target's fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Finds a field of the target by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Names of the targets currently being constructed, outermost first. The
    /// last one is this context's target.
    #[must_use]
    pub fn path(&self) -> Vec<&'static str> {
        self.path.iter().map(Target::name).collect()
    }

    /// Looks a service up in the scope.
    #[must_use]
    pub fn lookup(&self, key: &ServiceInfo) -> Option<Provided> {
        self.scope.get(key)
    }

    /// The scope's request context, if it has one.
    #[must_use]
    pub fn request_context(&self) -> Option<Value> {
        self.scope.context()
    }

    /// Turns whatever a scope provided into a value, resolving and
    /// constructing registered targets.
    pub fn instantiate(&self, provided: Provided) -> InjectResult<Value> {
        match provided {
            Provided::Instance(value) => Ok(value),
            Provided::Injectable(target) => self.inject(&target),
        }
    }

    /// Resolves and constructs a nested target in the same scope. Props are
    /// not passed down. Requesting a target that is already being constructed
    /// is a cycle.
    pub fn inject(&self, target: &Target) -> InjectResult<Value> {
        if self.path.iter().any(|parent| parent.same_as(target)) {
            let mut cycle = self.path();
            cycle.push(target.name());
            return Err(InjectError::CycleDetected {
                target: target.name(),
                cycle,
            });
        }

        resolve_nested(target, self.scope, self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_support::{dummy_target, DummyScope},
        FieldSpec,
    };

    struct Inner(u32);
    struct Outer;

    #[test]
    fn instance_is_returned_as_is() {
        let scope = DummyScope::new();
        let target = dummy_target();
        let context = ResolutionContext::new(&target, &scope, None, None);

        let value = Value::new(Inner(3));
        let instantiated = context.instantiate(Provided::Instance(value)).unwrap();
        assert_eq!(Some(3), instantiated.downcast_ref::<Inner>().map(|i| i.0));
    }

    #[test]
    fn injectable_is_constructed() {
        let scope = DummyScope::new();
        let target = dummy_target();
        let context = ResolutionContext::new(&target, &scope, None, None);

        let inner = Target::tuple::<Inner>()
            .field(FieldSpec::of::<u32>("0").with_default(7_u32))
            .construct(|args| Ok(Inner(*args.get("0")?)));
        let instantiated =
            context.instantiate(Provided::Injectable(inner)).unwrap();
        assert_eq!(Some(7), instantiated.downcast_ref::<Inner>().map(|i| i.0));
    }

    #[test]
    fn repeated_target_is_a_cycle() {
        let scope = DummyScope::new();
        let outer = Target::record::<Outer>().construct(|_| Ok(Outer));
        let context = ResolutionContext::new(&outer, &scope, None, None);
        assert_eq!(vec!["Outer"], context.path());

        match context.inject(&outer) {
            Err(InjectError::CycleDetected { target, cycle }) => {
                assert_eq!("Outer", target);
                assert_eq!(vec!["Outer", "Outer"], cycle);
            }
            Err(error) => Err(error).unwrap(),
            Ok(_) => unreachable!("cycle should have been detected"),
        }
    }

    #[test]
    fn field_lookup_by_name() {
        let scope = DummyScope::new();
        let target = dummy_target();
        let context = ResolutionContext::new(&target, &scope, None, None);
        assert!(context.field("age").is_some());
        assert!(context.field("missing").is_none());
        assert_eq!(target.fields().len(), context.fields().len());
    }
}
