//! Tests for the Record type

use fieldstates::{Record, constants};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_fingerprint_independent_of_insertion_order() {
    let a = Record::new().with("y", "Y").with("id", 1).with("a", "A");
    let b = Record::new().with("a", "A").with("y", "Y");
    assert_eq!(a.fingerprint(), "a,y");
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn test_id_is_stored_but_not_fingerprinted() {
    let state = record(json!({"id": "abc", "x": 1}));
    assert_eq!(state.id(), Some(&json!("abc")));
    assert_eq!(state.get(constants::ID), Some(&json!("abc")));
    assert_eq!(state.len(), 2);
    assert_eq!(state.fingerprint(), "x");
}

#[test]
fn test_values_are_opaque() {
    let state = record(json!({"nested": {"deep": [1, 2, 3]}, "flag": true}));
    assert_eq!(state.fingerprint(), "flag,nested");
    assert_eq!(state.get("nested"), Some(&json!({"deep": [1, 2, 3]})));
}

#[test]
fn test_set_replaces_value_in_place() {
    let mut state = Record::new();
    state.set("a", 1).set("b", 2).set("a", 3);
    let pairs: Vec<_> = state.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    assert_eq!(
        pairs,
        vec![("a".to_string(), json!(3)), ("b".to_string(), json!(2))]
    );
}

#[test]
fn test_conversions() {
    let state = record(json!({"x": 1}));
    let value: serde_json::Value = state.clone().into();
    assert_eq!(value, json!({"x": 1}));
    assert_eq!(Record::from(state.clone().into_map()), state);
    assert!(state.contains_key("x"));
    assert!(!state.contains_key("y"));
    assert!(!state.is_empty());
    assert!(Record::default().is_empty());
}
