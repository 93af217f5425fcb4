//! Field state records.
//!
//! This module provides `Record`, an insertion-ordered mapping from attribute names to
//! JSON values. A record is identified inside a collection by its fingerprint (the
//! sorted set of its attribute names), never by its values or its `id`.

use crate::constants::ID;
use crate::states::{self, StatesError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single field state: named attributes holding arbitrary values.
///
/// Attributes keep their insertion order. Equality is attribute-wise and ignores that
/// order, so two records are equal when they hold the same names with the same values.
///
/// # Examples
///
/// ```
/// use fieldstates::Record;
///
/// let mut state = Record::new();
/// state.set("id", 1).set("x", "X").set("a", "A");
///
/// assert_eq!(state.fingerprint(), "a,x");
/// assert_eq!(state, Record::new().with("a", "A").with("x", "X").with("id", 1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    attributes: Map<String, Value>,
}

impl Record {
    /// Create a new empty `Record`.
    pub fn new() -> Self {
        Self {
            attributes: Map::new(),
        }
    }

    /// Return the record with an attribute set, for building records inline.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Get an attribute value by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Remove an attribute, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.shift_remove(key)
    }

    /// Check whether an attribute is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// The reserved `id` attribute, if any.
    pub fn id(&self) -> Option<&Value> {
        self.attributes.get(ID)
    }

    /// Attribute names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Attribute name/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get the number of attributes, `id` included.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the record has no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute-wise comparison used to detect no-op replacements.
    ///
    /// Like `==` it ignores attribute order and includes `id`, but numbers compare by
    /// numeric value, so `1` and `1.0` are the same attribute value. Nested values still
    /// use JSON equality.
    pub fn same_attributes(&self, other: &Record) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| {
                other
                    .get(key)
                    .is_some_and(|other_value| same_value(value, other_value))
            })
    }

    /// The shape of this record, see [`states::fingerprint`].
    pub fn fingerprint(&self) -> String {
        states::fingerprint(Some(self))
    }

    /// Get a reference to the underlying JSON map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Consume the record, returning the underlying JSON map.
    pub fn into_map(self) -> Map<String, Value> {
        self.attributes
    }
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => match (a.as_u64(), b.as_u64()) {
                (Some(a), Some(b)) => a == b,
                _ => a.as_f64() == b.as_f64(),
            },
        },
        _ => a == b,
    }
}

impl From<Map<String, Value>> for Record {
    fn from(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        record.attributes
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.attributes)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TryFrom<Value> for Record {
    type Error = StatesError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(attributes) => Ok(Self { attributes }),
            other => Err(StatesError::invalid_argument("state", "object", &other)),
        }
    }
}

impl TryFrom<&Value> for Record {
    type Error = StatesError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(attributes) => Ok(Self {
                attributes: attributes.clone(),
            }),
            other => Err(StatesError::invalid_argument("state", "object", other)),
        }
    }
}
