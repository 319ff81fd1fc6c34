use crate::{FieldSpec, Operator, ServiceInfo, Svc, Target, TargetKind, Value};

/// Everything rules need to know about one field of a target. Descriptors
/// are derived fresh for every resolution and never change.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    name: &'static str,
    declared_type: ServiceInfo,
    default_value: Option<Value>,
    participates_in_construction: bool,
    annotated: bool,
    operators: Vec<Svc<dyn Operator>>,
}

impl FieldDescriptor {
    /// Describes a declared field. `Option<T>` is unwrapped to `T` and any
    /// annotation is split into its operator chain.
    #[must_use]
    pub fn describe(spec: &FieldSpec, participates_in_construction: bool) -> Self {
        let (annotated, operators) = match spec.annotation() {
            Some(annotation) => (true, annotation.operators().to_vec()),
            None => (false, Vec::new()),
        };

        FieldDescriptor {
            name: spec.name(),
            declared_type: spec.declared().unwrapped(),
            default_value: spec.default_value().cloned(),
            participates_in_construction,
            annotated,
            operators,
        }
    }

    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's declared type, unwrapped.
    #[must_use]
    pub fn declared_type(&self) -> ServiceInfo {
        self.declared_type
    }

    /// The field's static default, if it has one.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Whether the field is part of the target's construction arguments.
    #[must_use]
    pub fn participates_in_construction(&self) -> bool {
        self.participates_in_construction
    }

    /// Whether the field was declared with an annotation, even an empty one.
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        self.annotated
    }

    /// The operator chain from the field's annotation.
    #[must_use]
    pub fn operators(&self) -> &[Svc<dyn Operator>] {
        &self.operators
    }
}

/// Produces the descriptors of a target's fields, in declaration order.
#[must_use]
pub fn extract_field_descriptors(target: &Target) -> Vec<FieldDescriptor> {
    target
        .fields()
        .iter()
        .map(|spec| match target.kind() {
            TargetKind::Record => FieldDescriptor::describe(spec, !spec.is_excluded()),
            TargetKind::Tuple | TargetKind::Function => {
                FieldDescriptor::describe(spec, true)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Annotation, FetchFromScope, PluckAttribute};

    struct Settings;

    #[derive(Debug)]
    struct Record {
        age: u32,
        title: String,
        upper: String,
    }

    fn record_target() -> Target {
        Target::record::<Record>()
            .field(FieldSpec::of::<u32>("age"))
            .field(
                FieldSpec::optional::<String>("title")
                    .with_default("Dummy Target".to_string()),
            )
            .field(FieldSpec::of::<String>("upper").excluded())
            .construct(|args| {
                let title = args.cloned::<String>("title")?;
                Ok(Record {
                    age: *args.get("age")?,
                    upper: title.to_uppercase(),
                    title,
                })
            })
    }

    #[test]
    fn record_fields_keep_declaration_order() {
        let names: Vec<_> = extract_field_descriptors(&record_target())
            .iter()
            .map(FieldDescriptor::name)
            .collect();
        assert_eq!(vec!["age", "title", "upper"], names);
    }

    #[test]
    fn record_fields_honor_exclusion() {
        let descriptors = extract_field_descriptors(&record_target());
        assert!(descriptors[0].participates_in_construction());
        assert!(descriptors[1].participates_in_construction());
        assert!(!descriptors[2].participates_in_construction());
    }

    #[test]
    fn defaults_and_optional_types_are_extracted() {
        let descriptors = extract_field_descriptors(&record_target());
        assert!(descriptors[0].default_value().is_none());
        assert_eq!(ServiceInfo::of::<String>(), descriptors[1].declared_type());
        assert_eq!(
            Some(&"Dummy Target".to_string()),
            descriptors[1]
                .default_value()
                .and_then(Value::downcast_ref::<String>)
        );
    }

    #[test]
    fn function_and_tuple_fields_always_participate() {
        let function = Target::function::<u32>("age")
            .field(FieldSpec::of::<u32>("age").excluded())
            .construct(|args| Ok(*args.get::<u32>("age")?));
        let tuple = Target::tuple::<(u32,)>()
            .field(FieldSpec::of::<u32>("age").excluded())
            .construct(|args| Ok((*args.get::<u32>("age")?,)));

        for target in &[function, tuple] {
            let descriptors = extract_field_descriptors(target);
            assert!(descriptors[0].participates_in_construction());
        }
    }

    #[test]
    fn annotation_becomes_operator_chain() {
        let annotated = FieldSpec::of::<String>("greeting").annotated(
            Annotation::new()
                .then(FetchFromScope::of::<Settings>())
                .then(PluckAttribute::new("greeting")),
        );
        let descriptor = FieldDescriptor::describe(&annotated, true);
        assert!(descriptor.is_annotated());
        assert_eq!(2, descriptor.operators().len());

        let plain = FieldDescriptor::describe(&FieldSpec::of::<String>("greeting"), true);
        assert!(!plain.is_annotated());
        assert!(plain.operators().is_empty());
    }

    #[test]
    fn empty_annotation_is_still_annotated() {
        let spec = FieldSpec::of::<String>("greeting").annotated(Annotation::new());
        let descriptor = FieldDescriptor::describe(&spec, true);
        assert!(descriptor.is_annotated());
        assert!(descriptor.operators().is_empty());
    }
}
