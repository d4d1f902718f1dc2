//! Ordered attribute container backing every resource.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An ordered mapping from field name to JSON value.
///
/// Keys keep their insertion order, and keys that no typed accessor knows
/// about are kept as-is, so a bag decoded from a response re-encodes to the
/// same document.
///
/// A field that was never set is simply absent: [`get`](Self::get) returns
/// `None` and the field is left out of the serialized payload. An explicit
/// JSON `null` is a present value and is serialized as `null`.
///
/// # Example
///
/// ```rust
/// use billing_api::AttributeBag;
/// use serde_json::Value;
///
/// let mut bag = AttributeBag::new();
/// bag.set("name", "Basic plan").set("description", Value::Null);
///
/// assert_eq!(bag.get_str("name"), Some("Basic plan"));
/// assert_eq!(bag.get("description"), Some(&Value::Null));
/// assert!(bag.get("state").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag {
    fields: Map<String, Value>,
}

impl AttributeBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a field, or `None` if it is unset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns a string field.
    ///
    /// Returns `None` if the field is unset or not a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns a boolean field.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Returns a signed integer field.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Returns an unsigned integer field.
    ///
    /// Numeric strings are accepted, since the API sends counters such as
    /// `total_items` either way.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match self.get(key)? {
            Value::String(s) => s.parse().ok(),
            value => value.as_u64(),
        }
    }

    /// Returns a floating point field.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Returns a nested object field as a bag.
    #[must_use]
    pub fn get_bag(&self, key: &str) -> Option<Self> {
        match self.get(key)? {
            Value::Object(map) => Some(Self::from(map.clone())),
            _ => None,
        }
    }

    /// Returns a field holding an array of objects as a list of bags.
    ///
    /// Returns `None` if the field is unset, not an array, or contains a
    /// non-object element.
    #[must_use]
    pub fn get_bag_list(&self, key: &str) -> Option<Vec<Self>> {
        match self.get(key)? {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => Some(Self::from(map.clone())),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// Sets a field, replacing any previous value in place.
    ///
    /// Setting never fails; no validation happens at set-time.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Sets a field holding a list of nested bags.
    pub fn set_bag_list(&mut self, key: impl Into<String>, items: Vec<Self>) -> &mut Self {
        let values: Vec<Value> = items.into_iter().map(Value::from).collect();
        self.set(key, values)
    }

    /// Removes a field, returning it to the unset state.
    ///
    /// The order of the remaining fields is preserved.
    pub fn unset(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Returns `true` if the field is set (including an explicit `null`).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of set fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copies every field of `other` into this bag.
    ///
    /// Existing fields are overwritten in place; new fields are appended.
    pub fn merge(&mut self, other: Self) -> &mut Self {
        for (key, value) in other.fields {
            self.fields.insert(key, value);
        }
        self
    }

    /// Returns the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the bag and returns the underlying map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for AttributeBag {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<AttributeBag> for Value {
    fn from(bag: AttributeBag) -> Self {
        Self::Object(bag.fields)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (key, value) in iter {
            bag.set(key, value);
        }
        bag
    }
}
