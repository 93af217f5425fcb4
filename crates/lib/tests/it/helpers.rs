//! Shared helpers for building records and checking collections.

use fieldstates::{FieldStates, Record, Records};
use serde_json::Value;

/// Build a record from a JSON object literal.
///
/// # Panics
/// Panics if `value` is not an object.
pub fn record(value: Value) -> Record {
    Record::try_from(value).expect("test records must be JSON objects")
}

/// Build a sequence from JSON object literals.
pub fn records(values: impl IntoIterator<Item = Value>) -> Records {
    values.into_iter().map(record).collect()
}

/// Render a sequence as JSON for whole-value comparisons.
pub fn as_json(states: &Records) -> Value {
    serde_json::to_value(states).expect("records always serialize")
}

/// Assert that a collection holds exactly `expected`, in order.
pub fn assert_states(fs: &FieldStates, expected: Value) {
    assert_eq!(as_json(fs.get()), expected, "unexpected field states");
}
