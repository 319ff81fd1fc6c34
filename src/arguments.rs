use crate::{InjectError, InjectResult, Service, ServiceInfo, Svc, Target, Value};
use std::collections::HashMap;

/// The resolved arguments handed to a target's constructor.
///
/// Fields that were resolved are "supplied". Fields that were not supplied
/// fall back to their declared default, which is how the target's own default
/// applies when nothing else provided a value.
#[derive(Clone, Debug)]
pub struct Arguments {
    target: &'static str,
    supplied: HashMap<&'static str, Value>,
    defaults: HashMap<&'static str, Value>,
}

impl Arguments {
    /// Creates an empty set of arguments for a target, with only its declared
    /// defaults available.
    #[must_use]
    pub fn new(target: &Target) -> Self {
        let defaults = target
            .fields()
            .iter()
            .filter_map(|field| {
                field
                    .default_value()
                    .map(|value| (field.name(), value.clone()))
            })
            .collect();

        Arguments {
            target: target.name(),
            supplied: HashMap::new(),
            defaults,
        }
    }

    /// Supplies the value of a field. If a value was already supplied, it is
    /// replaced and returned.
    pub fn supply(&mut self, name: &'static str, value: Value) -> Option<Value> {
        self.supplied.insert(name, value)
    }

    /// Whether a value was supplied for the field, rather than falling back
    /// to a default.
    #[must_use]
    pub fn is_supplied(&self, name: &str) -> bool {
        self.supplied.contains_key(name)
    }

    /// The number of supplied values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.supplied.len()
    }

    /// Whether no values were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.supplied.is_empty()
    }

    /// Gets the supplied value of a field, or its default.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.supplied.get(name).or_else(|| self.defaults.get(name))
    }

    /// Gets the value of a field as a `T`.
    pub fn get<T: Service>(&self, name: &'static str) -> InjectResult<Svc<T>> {
        let value =
            self.value(name)
                .ok_or_else(|| InjectError::MissingArgument {
                    target: self.target,
                    field: name,
                })?;

        value
            .downcast()
            .ok_or_else(|| InjectError::InvalidArgument {
                target: self.target,
                field: name,
                expected: ServiceInfo::of::<T>(),
                found: value.info(),
            })
    }

    /// Gets a clone of the value of a field as a `T`.
    pub fn cloned<T: Service + Clone>(
        &self,
        name: &'static str,
    ) -> InjectResult<T> {
        self.get::<T>(name).map(|value| T::clone(&value))
    }

    /// Gets the value of an optional field as a `T`. A field that was
    /// neither supplied nor has a default is `None`.
    pub fn optional<T: Service>(
        &self,
        name: &'static str,
    ) -> InjectResult<Option<Svc<T>>> {
        match self.get(name) {
            Ok(value) => Ok(Some(value)),
            Err(InjectError::MissingArgument { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldSpec;

    fn target() -> Target {
        Target::record::<String>()
            .field(FieldSpec::of::<String>("first"))
            .field(FieldSpec::of::<String>("last").with_default("Doe".to_string()))
            .construct(|args| {
                Ok(format!(
                    "{} {}",
                    args.cloned::<String>("first")?,
                    args.cloned::<String>("last")?
                ))
            })
    }

    #[test]
    fn supplied_value_wins_over_default() {
        let target = target();
        let mut args = Arguments::new(&target);
        assert!(args.supply("last", Value::new("Smith".to_string())).is_none());
        assert!(args.is_supplied("last"));
        assert_eq!("Smith", args.cloned::<String>("last").unwrap());
    }

    #[test]
    fn default_applies_when_not_supplied() {
        let target = target();
        let args = Arguments::new(&target);
        assert!(args.is_empty());
        assert!(!args.is_supplied("last"));
        assert_eq!("Doe", args.cloned::<String>("last").unwrap());
    }

    #[test]
    fn missing_argument_is_reported() {
        let target = target();
        let args = Arguments::new(&target);
        match args.get::<String>("first") {
            Err(InjectError::MissingArgument { target, field }) => {
                assert_eq!("String", target);
                assert_eq!("first", field);
            }
            Err(error) => Err(error).unwrap(),
            Ok(_) => unreachable!("no value should have been found"),
        }
        assert!(args.optional::<String>("first").unwrap().is_none());
    }

    #[test]
    fn wrong_type_is_reported() {
        let target = target();
        let mut args = Arguments::new(&target);
        args.supply("first", Value::new(12_i32));
        match args.get::<String>("first") {
            Err(InjectError::InvalidArgument {
                expected, found, ..
            }) => {
                assert_eq!(ServiceInfo::of::<String>(), expected);
                assert_eq!(ServiceInfo::of::<i32>(), found);
            }
            Err(error) => Err(error).unwrap(),
            Ok(_) => unreachable!("value should not have downcast"),
        }
    }

    #[test]
    fn target_receives_arguments() {
        let target = target();
        let mut args = Arguments::new(&target);
        args.supply("first", Value::new("Jane".to_string()));
        let value = target.invoke(args).unwrap();
        assert_eq!(Some(&"Jane Doe".to_string()), value.downcast_ref());
    }
}
