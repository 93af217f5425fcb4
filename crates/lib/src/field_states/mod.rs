//! The immutable field state collection.
//!
//! This module provides [`FieldStates`], a value type holding at most one record per
//! fingerprint. It delegates all matching and merging to [`crate::states`] and only
//! decides whether a change produced a new collection or left the current one as is.


use crate::record::Record;
use crate::states::{self, Records};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::borrow::{Borrow, Cow};

/// Selects the record to remove from a [`FieldStates`] collection.
///
/// A record selects by its shape only; its values are ignored.
#[derive(Debug, Clone, Copy)]
pub enum StateSelector<'a> {
    /// Select by fingerprint string
    Fingerprint(&'a str),
    /// Select by the fingerprint of a record
    State(&'a Record),
}

impl<'a> StateSelector<'a> {
    /// The fingerprint this selector matches.
    pub fn fingerprint(&self) -> Cow<'a, str> {
        match *self {
            StateSelector::Fingerprint(fingerprint) => Cow::Borrowed(fingerprint),
            StateSelector::State(state) => Cow::Owned(state.fingerprint()),
        }
    }
}

impl<'a> From<&'a str> for StateSelector<'a> {
    fn from(fingerprint: &'a str) -> Self {
        StateSelector::Fingerprint(fingerprint)
    }
}

impl<'a> From<&'a String> for StateSelector<'a> {
    fn from(fingerprint: &'a String) -> Self {
        StateSelector::Fingerprint(fingerprint)
    }
}

impl<'a> From<&'a Record> for StateSelector<'a> {
    fn from(state: &'a Record) -> Self {
        StateSelector::State(state)
    }
}

/// An immutable, ordered collection of field states with unique fingerprints.
///
/// A collection never changes once built. [`add`](FieldStates::add) and
/// [`remove`](FieldStates::remove) return a new collection when something changed, and
/// the same collection (see [`FieldStates::ptr_eq`]) when the operation was a no-op.
///
/// Instances are only obtained through [`create`](FieldStates::create),
/// [`from_states`](FieldStates::from_states) and their siblings, which copy everything
/// they are given. Stored records are reachable through shared references only.
///
/// # Examples
///
/// ```
/// use fieldstates::{FieldStates, Record};
///
/// let fs1 = FieldStates::create();
/// let fs2 = fs1.add(Record::new().with("x", "x"));
/// let fs3 = fs2.add(Record::new().with("x", "x"));
/// let fs4 = fs3.add(Record::new().with("x", "X"));
///
/// assert!(!FieldStates::ptr_eq(&fs1, &fs2));
/// assert!(FieldStates::ptr_eq(&fs2, &fs3));
/// assert!(!FieldStates::ptr_eq(&fs3, &fs4));
/// assert_eq!(fs4.find("x"), Some(&Record::new().with("x", "X")));
/// ```
///
/// Stored records cannot be changed through the collection:
///
/// ```compile_fail
/// use fieldstates::{FieldStates, Record};
///
/// let fs = FieldStates::create().add(Record::new().with("x", "x"));
/// fs.find("x").unwrap().set("x", "X");
/// ```
///
/// ```compile_fail
/// use fieldstates::{FieldStates, Record};
///
/// let fs = FieldStates::create();
/// fs.get().push(Record::new().with("x", "x").into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStates {
    states: Records,
}

impl FieldStates {
    /// Wraps an already normalized sequence. Not reachable from outside the crate.
    fn new(states: Records) -> Self {
        Self { states }
    }

    /// Create a new empty collection.
    pub fn create() -> Self {
        Self::new(Records::new())
    }

    /// Build a collection from owned records, dropping `None` entries.
    ///
    /// Records without attributes besides `id` are dropped. When several records share a
    /// fingerprint, the later one replaces the earlier one at the earlier position.
    pub fn from_states<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Record>>,
    {
        let states: Vec<Option<Record>> = states.into_iter().map(Into::into).collect();
        Self::new(states::replace_states(None, states.iter().map(Option::as_ref)))
    }

    /// Build a collection from borrowed records, copying each of them.
    pub fn from_slice(states: &[Record]) -> Self {
        Self::new(states::replace_states(None, states))
    }

    /// Build a collection from a JSON array of objects. Entries that are not objects are
    /// dropped.
    ///
    /// Fails with an invalid argument error when `value` is not an array.
    pub fn from_json(value: &Value) -> crate::Result<Self> {
        let states = states::parse_states(value)?;
        Ok(Self::new(states::replace_states(
            None,
            states.iter().map(Option::as_ref),
        )))
    }

    /// Parse a collection from JSON text, with the same rules as [`FieldStates::from_json`].
    ///
    /// Fails with a serialization error when `json` is not valid JSON.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    /// Returns true if both values are the same collection, not merely equal ones.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Records::ptr_eq(&this.states, &other.states)
    }

    /// The fingerprint of a record, see [`states::fingerprint`].
    pub fn fingerprint(state: &Record) -> String {
        states::fingerprint(Some(state))
    }

    /// All records in order, as a read-only sequence.
    pub fn get(&self) -> &Records {
        &self.states
    }

    /// The stored record with the given fingerprint.
    pub fn find(&self, fingerprint: &str) -> Option<&Record> {
        states::find_state(Some(&self.states), fingerprint)
    }

    /// Check whether a record with the given fingerprint is stored.
    pub fn contains(&self, fingerprint: &str) -> bool {
        self.states.position(fingerprint).is_some()
    }

    /// Iterator over the stored records in order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.states.records()
    }

    /// Fingerprints of the stored records, in order.
    pub fn fingerprints(&self) -> Vec<String> {
        self.iter().map(Record::fingerprint).collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Insert a record, or update the one sharing its fingerprint.
    ///
    /// The record is copied. Returns `self` unchanged when the collection already holds an
    /// equal record, or when the record has no attributes besides `id`.
    pub fn add(&self, state: impl Borrow<Record>) -> Self {
        self.mutate(states::replace_state(
            Some(&self.states),
            Some(Borrow::<Record>::borrow(&state)),
        ))
    }

    /// Insert or update several records, left to right.
    ///
    /// Returns `self` unchanged when `states` is empty or every record is already present.
    pub fn add_all<I, S>(&self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Borrow<Record>,
    {
        let states: Vec<S> = states.into_iter().collect();
        self.mutate(states::replace_states(
            Some(&self.states),
            states.iter().map(Borrow::<Record>::borrow),
        ))
    }

    /// Remove the record matching a fingerprint, or matching the shape of a record.
    ///
    /// Returns `self` unchanged when nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldstates::{FieldStates, Record};
    ///
    /// let fs = FieldStates::create()
    ///     .add(Record::new().with("x", "x"))
    ///     .add(Record::new().with("y", "y"));
    ///
    /// let removed = fs.remove(&Record::new().with("y", "zz"));
    /// assert_eq!(removed.fingerprints(), vec!["x"]);
    /// assert!(FieldStates::ptr_eq(&removed.remove("y"), &removed));
    /// ```
    pub fn remove<'a>(&self, selector: impl Into<StateSelector<'a>>) -> Self {
        let selector: StateSelector<'a> = selector.into();
        let fingerprint = selector.fingerprint();
        self.mutate(states::remove_state(Some(&self.states), &fingerprint))
    }

    fn mutate(&self, states: Records) -> Self {
        if Records::ptr_eq(&states, &self.states) {
            return self.clone();
        }
        tracing::debug!(
            before = self.states.len(),
            after = states.len(),
            "field states changed"
        );
        Self::new(states)
    }
}

impl Default for FieldStates {
    fn default() -> Self {
        Self::create()
    }
}

impl FromIterator<Record> for FieldStates {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::from_states(iter)
    }
}

impl From<Vec<Record>> for FieldStates {
    fn from(states: Vec<Record>) -> Self {
        Self::from_states(states)
    }
}

impl<'a> IntoIterator for &'a FieldStates {
    type Item = &'a std::sync::Arc<Record>;
    type IntoIter = std::slice::Iter<'a, std::sync::Arc<Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl Serialize for FieldStates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.states.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldStates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Option<Record>>::deserialize(deserializer).map(Self::from_states)
    }
}
