//! Plain state sequences and the pure functions that transform them.
//!
//! A [`Records`] value is a shared, read-only sequence of records. The functions in this
//! module never modify their input: they return either a brand new sequence or, when
//! nothing would change, the very same one. Callers detect no-ops with
//! [`Records::ptr_eq`] instead of comparing contents.
//!
//! "Absent" inputs are expressed as `None` and degrade to neutral behaviour: an empty
//! fingerprint, an empty sequence, or "not found".

pub mod errors;


pub use errors::StatesError;

use crate::constants::{FINGERPRINT_SEPARATOR, ID};
use crate::record::Record;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::ops::Deref;
use std::sync::Arc;

/// A shared, read-only sequence of records.
///
/// Cloning is cheap and yields the same sequence (see [`Records::ptr_eq`]). Elements are
/// handed out as `Arc<Record>`; there is no way to reach a `&mut Record` inside a
/// sequence, so any attempt to change one through a shared handle copies it first.
///
/// ```compile_fail
/// use fieldstates::{Record, Records};
///
/// let states: Records = vec![Record::new().with("x", "x")].into();
/// states.push(Record::new());
/// ```
///
/// ```compile_fail
/// use fieldstates::{Record, Records};
///
/// let states: Records = vec![Record::new().with("x", "x")].into();
/// states[0].set("x", "X");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Records {
    items: Arc<[Arc<Record>]>,
}

impl Records {
    /// Create a new empty sequence.
    pub fn new() -> Self {
        Self::from_arcs(Vec::new())
    }

    fn from_arcs(items: Vec<Arc<Record>>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }

    /// Returns true if both values are the same sequence, not merely equal ones.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.items, &other.items)
    }

    /// The elements as a slice of shared records.
    pub fn as_slice(&self) -> &[Arc<Record>] {
        &self.items
    }

    /// Iterator over the records in order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.items.iter().map(Arc::as_ref)
    }

    /// Index of the first record with the given fingerprint.
    ///
    /// An empty fingerprint never matches.
    pub fn position(&self, fingerprint: &str) -> Option<usize> {
        if fingerprint.is_empty() {
            return None;
        }
        self.records()
            .position(|state| self::fingerprint(Some(state)) == fingerprint)
    }

    fn with_replaced(&self, index: usize, state: Record) -> Self {
        let mut items = self.items.to_vec();
        items[index] = Arc::new(state);
        Self::from_arcs(items)
    }

    fn with_appended(&self, state: Record) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(Arc::new(state));
        Self::from_arcs(items)
    }

    fn without(&self, index: usize) -> Self {
        let mut items = self.items.to_vec();
        items.remove(index);
        Self::from_arcs(items)
    }
}

impl Default for Records {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Records {
    type Target = [Arc<Record>];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl AsRef<[Arc<Record>]> for Records {
    fn as_ref(&self) -> &[Arc<Record>] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a Records {
    type Item = &'a Arc<Record>;
    type IntoIter = std::slice::Iter<'a, Arc<Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Vec<Record>> for Records {
    fn from(states: Vec<Record>) -> Self {
        states.into_iter().collect()
    }
}

impl FromIterator<Record> for Records {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::from_arcs(iter.into_iter().map(Arc::new).collect())
    }
}

impl FromIterator<Arc<Record>> for Records {
    fn from_iter<T: IntoIterator<Item = Arc<Record>>>(iter: T) -> Self {
        Self::from_arcs(iter.into_iter().collect())
    }
}

impl TryFrom<&Value> for Records {
    type Error = StatesError;

    /// Copies a JSON array into a new sequence.
    ///
    /// Entries that are not objects have no attributes, so they could never be matched
    /// or replaced; they are skipped. Only a value that is not an array is rejected.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(parse_states(value)?.into_iter().flatten().collect())
    }
}

impl TryFrom<Value> for Records {
    type Error = StatesError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Records::try_from(&value)
    }
}

impl Serialize for Records {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records())
    }
}

impl<'de> Deserialize<'de> for Records {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Record>::deserialize(deserializer).map(Records::from)
    }
}

/// Reads a JSON array into records. Entries that are not objects become `None`.
pub(crate) fn parse_states(value: &Value) -> Result<Vec<Option<Record>>, StatesError> {
    let Value::Array(items) = value else {
        return Err(StatesError::invalid_argument("states", "array", value));
    };
    Ok(items
        .iter()
        .map(|item| match item {
            Value::Object(attributes) => Some(Record::from(attributes.clone())),
            _ => None,
        })
        .collect())
}

/// Computes the shape of a record: its attribute names except `id`, sorted and
/// joined with commas.
///
/// Names are ordered by their UTF-16 code units, so names outside the Basic
/// Multilingual Plane sort before U+E000..U+FFFF the way JavaScript hosts sort them.
///
/// # Examples
///
/// ```
/// use fieldstates::{Record, states::fingerprint};
///
/// let state = Record::new().with("id", 1).with("x", "X").with("y", "Y").with("a", "A");
/// assert_eq!(fingerprint(Some(&state)), "a,x,y");
/// assert_eq!(fingerprint(Some(&Record::new())), "");
/// assert_eq!(fingerprint(None), "");
/// ```
pub fn fingerprint(state: Option<&Record>) -> String {
    let Some(state) = state else {
        return String::new();
    };
    let mut keys: Vec<&str> = state.keys().filter(|key| *key != ID).collect();
    keys.sort_unstable_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
    keys.join(FINGERPRINT_SEPARATOR)
}

/// Finds the first record whose fingerprint equals `fingerprint`.
///
/// An empty fingerprint never matches anything, not even a record without attributes.
pub fn find_state<'a>(states: Option<&'a Records>, fingerprint: &str) -> Option<&'a Record> {
    let states = states?;
    states
        .position(fingerprint)
        .map(|index| states.items[index].as_ref())
}

/// Removes the first record whose fingerprint equals `fingerprint`.
///
/// Returns the input sequence itself when nothing matches (or the fingerprint is
/// empty), and a new sequence without that one record otherwise.
pub fn remove_state(states: Option<&Records>, fingerprint: &str) -> Records {
    let Some(states) = states else {
        return Records::new();
    };
    match states.position(fingerprint) {
        Some(index) => {
            tracing::trace!(fingerprint, index, "removed field state");
            states.without(index)
        }
        None => states.clone(),
    }
}

/// Inserts `state` or updates the record sharing its fingerprint.
///
/// - A missing state, or one without attributes besides `id`, changes nothing.
/// - A match that is attribute-wise equal to `state` (see [`Record::same_attributes`])
///   changes nothing.
/// - A match that differs is replaced in place by a copy of `state`.
/// - Without a match, a copy of `state` is appended.
///
/// "Changes nothing" means the input sequence itself is returned.
///
/// # Examples
///
/// ```
/// use fieldstates::{Record, Records, states::replace_state};
///
/// let states: Records = vec![Record::new().with("id", 2).with("y", "Y")].into();
/// let state = Record::new().with("id", 1).with("x", "X");
///
/// let result = replace_state(Some(&states), Some(&state));
/// assert_eq!(result.len(), 2);
/// assert_eq!(*result[1], state);
///
/// let again = replace_state(Some(&result), Some(&state));
/// assert!(Records::ptr_eq(&again, &result));
/// ```
pub fn replace_state(states: Option<&Records>, state: Option<&Record>) -> Records {
    let states = states.cloned().unwrap_or_default();
    let what = fingerprint(state);
    let Some(state) = state.filter(|_| !what.is_empty()) else {
        return states;
    };
    match states.position(&what) {
        Some(index) if states.items[index].same_attributes(state) => states,
        Some(index) => {
            tracing::trace!(fingerprint = %what, index, "replaced field state");
            states.with_replaced(index, state.clone())
        }
        None => {
            tracing::trace!(fingerprint = %what, index = states.len(), "appended field state");
            states.with_appended(state.clone())
        }
    }
}

/// Applies [`replace_state`] once per state, left to right.
///
/// When every individual replacement is a no-op the input sequence itself is returned.
pub fn replace_states<'a, I, S>(states: Option<&Records>, new_states: I) -> Records
where
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a Record>>,
{
    let mut current = states.cloned().unwrap_or_default();
    for state in new_states {
        current = replace_state(Some(&current), state.into());
    }
    current
}

/// Same as [`remove_state`], for a sequence given as JSON.
///
/// `null` stands for an absent sequence, and any other value that is not an array is
/// rejected with [`StatesError::InvalidArgument`]. Array entries that are not objects
/// are skipped, see [`Records::try_from`].
pub fn remove_state_json(states: &Value, fingerprint: &str) -> Result<Records, StatesError> {
    let states = json_states(states)?;
    Ok(remove_state(states.as_ref(), fingerprint))
}

/// Same as [`replace_state`], for a sequence given as JSON.
///
/// `null` stands for an absent sequence, and any other value that is not an array is
/// rejected with [`StatesError::InvalidArgument`]. Array entries that are not objects
/// are skipped, see [`Records::try_from`].
pub fn replace_state_json(states: &Value, state: Option<&Record>) -> Result<Records, StatesError> {
    let states = json_states(states)?;
    Ok(replace_state(states.as_ref(), state))
}

/// Same as [`replace_states`], for a sequence given as JSON.
pub fn replace_states_json<'a, I, S>(states: &Value, new_states: I) -> Result<Records, StatesError>
where
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a Record>>,
{
    let states = json_states(states)?;
    Ok(replace_states(states.as_ref(), new_states))
}

fn json_states(states: &Value) -> Result<Option<Records>, StatesError> {
    match states {
        Value::Null => Ok(None),
        other => Records::try_from(other).map(Some),
    }
}
