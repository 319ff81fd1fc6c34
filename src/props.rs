use crate::{Service, Value};
use std::collections::{hash_map, HashMap};

/// Values passed explicitly at resolution time, keyed by field name. When a
/// field's name is present in props, that value wins over everything else.
///
/// ```
/// use field_injector::{props, Props};
///
/// let props = props! {
///     "person" => "Fred".to_string(),
///     "count" => 3_u32,
/// };
/// assert_eq!(2, props.len());
/// assert!(props.get("person").unwrap().is::<String>());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Props {
    values: HashMap<String, Value>,
}

impl Props {
    /// Creates an empty set of props.
    #[must_use]
    pub fn new() -> Self {
        Props::default()
    }

    /// Adds a value, returning the updated props.
    #[must_use]
    pub fn with<T: Service>(self, key: &str, value: T) -> Self {
        self.with_value(key, Value::new(value))
    }

    /// Adds an existing value, returning the updated props.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.insert_value(key, value);
        self
    }

    /// Sets the value of a prop. If the prop was already set, the old value is
    /// returned.
    pub fn insert<T: Service>(&mut self, key: &str, value: T) -> Option<Value> {
        self.insert_value(key, Value::new(value))
    }

    /// Sets the value of a prop from an existing value.
    pub fn insert_value(&mut self, key: &str, value: Value) -> Option<Value> {
        self.values.insert(key.to_owned(), value)
    }

    /// Removes and returns the value of a prop if it has been set.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Gets the value of a prop if it has been set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether a prop has been set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The number of props that have been set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no props have been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over every prop, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.values.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Props {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}

/// Creates a set of [`Props`] from key/value pairs. Each value is wrapped with
/// [`Value::new`](crate::Value::new).
#[macro_export]
macro_rules! props {
    {} => {
        $crate::Props::new()
    };
    {
        $($key:expr => $value:expr),+
        $(,)?
    } => {{
        let mut props = $crate::Props::new();
        $(
            props.insert($key, $value);
        )+
        props
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prop_is_inserted_then_removed() {
        let mut props = Props::new();
        assert!(props.insert("foo", "bar".to_string()).is_none());
        assert!(props.contains("foo"));
        assert_eq!(
            Some(&"bar".to_string()),
            props.get("foo").and_then(Value::downcast_ref::<String>)
        );

        let removed = props.remove("foo").unwrap();
        assert_eq!(Some(&"bar".to_string()), removed.downcast_ref());
        assert!(props.is_empty());
    }

    #[test]
    fn insert_replaces_previous_value() {
        let mut props = Props::new().with("count", 1_u32);
        let previous = props.insert("count", 2_u32).unwrap();
        assert_eq!(Some(&1), previous.downcast_ref::<u32>());
        assert_eq!(
            Some(&2),
            props.get("count").and_then(Value::downcast_ref::<u32>)
        );
    }

    #[test]
    fn collects_from_pairs() {
        let props: Props = vec![("a", Value::new(1_u8)), ("b", Value::new(2_u8))]
            .into_iter()
            .collect();
        assert_eq!(2, props.len());
        assert_eq!(2, props.iter().count());
    }

    #[test]
    fn empty_macro_creates_empty_props() {
        let props = props! {};
        assert!(props.is_empty());
    }
}
