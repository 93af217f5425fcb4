//! Tests for the pure state sequence functions

use fieldstates::Records;
use fieldstates::states::{
    fingerprint, find_state, remove_state, remove_state_json, replace_state, replace_state_json,
    replace_states,
};
use serde_json::json;
use std::sync::Arc;

use crate::helpers::*;

#[test]
fn test_fingerprint_examples() {
    assert_eq!(
        fingerprint(Some(&record(json!({"id": 1, "x": "X", "y": "Y", "a": "A"})))),
        "a,x,y"
    );
    assert_eq!(fingerprint(Some(&record(json!({})))), "");
    assert_eq!(fingerprint(None), "");
}

#[test]
fn test_lookup() {
    let states = records([
        json!({"id": 1, "x": "X"}),
        json!({"id": 2, "x": "X", "y": "Y"}),
        json!({"id": 3, "a": "A"}),
    ]);
    assert_eq!(find_state(Some(&states), "x").unwrap().id(), Some(&json!(1)));
    assert_eq!(find_state(Some(&states), "x,y").unwrap().id(), Some(&json!(2)));
    assert!(find_state(Some(&states), "x,y,z").is_none());
    assert!(find_state(Some(&states), "a,x").is_none());
    assert!(find_state(Some(&states), "").is_none());
}

#[test]
fn test_insert_or_update() {
    let result = replace_state(Some(&Records::new()), Some(&record(json!({"id": 1, "x": "X"}))));
    assert_eq!(as_json(&result), json!([{"id": 1, "x": "X"}]));

    let states = records([json!({"id": 2, "y": "Y"})]);
    let result = replace_state(Some(&states), Some(&record(json!({"id": 1, "x": "X"}))));
    assert_eq!(
        as_json(&result),
        json!([{"id": 2, "y": "Y"}, {"id": 1, "x": "X"}])
    );
}

#[test]
fn test_replace_idempotence() {
    let states = records([json!({"id": 1, "x": "X"}), json!({"y": "Y"})]);
    let same = replace_state(Some(&states), Some(&record(json!({"x": "X", "id": 1}))));
    assert!(Records::ptr_eq(&same, &states));

    let changed = replace_state(Some(&states), Some(&record(json!({"id": 1, "x": "*"}))));
    assert!(!Records::ptr_eq(&changed, &states));
    assert_eq!(as_json(&changed), json!([{"id": 1, "x": "*"}, {"y": "Y"}]));

    let same = replace_state(Some(&changed), Some(&record(json!({"id": 1, "x": "*"}))));
    assert!(Records::ptr_eq(&same, &changed));
}

#[test]
fn test_removal_idempotence() {
    let states = records([json!({"a": 1}), json!({"b": 2}), json!({"c": 3})]);

    let missing = remove_state(Some(&states), "d");
    assert!(Records::ptr_eq(&missing, &states));

    let removed = remove_state(Some(&states), "b");
    assert!(!Records::ptr_eq(&removed, &states));
    assert_eq!(as_json(&removed), json!([{"a": 1}, {"c": 3}]));
    assert!(Arc::ptr_eq(&removed[0], &states[0]));
    assert!(Arc::ptr_eq(&removed[1], &states[2]));
    assert_eq!(states.len(), 3);

    let again = remove_state(Some(&removed), "b");
    assert!(Records::ptr_eq(&again, &removed));
}

#[test]
fn test_batch_replace() {
    let states = records([json!({"x": 1}), json!({"y": 2})]);
    let updates = [
        record(json!({"y": 20})),
        record(json!({"z": 3})),
        record(json!({"x": 1})),
    ];
    let result = replace_states(Some(&states), &updates);
    assert_eq!(as_json(&result), json!([{"x": 1}, {"y": 20}, {"z": 3}]));

    let unchanged = replace_states(Some(&result), &updates);
    assert!(Records::ptr_eq(&unchanged, &result));
}

#[test]
fn test_invalid_argument_for_non_sequences() {
    let state = record(json!({"x": 1}));
    for bad in [json!(1), json!("states"), json!({"x": 1}), json!(true)] {
        let err = replace_state_json(&bad, Some(&state)).unwrap_err();
        assert!(err.is_invalid_argument(), "expected invalid argument for {bad}");
        let err = remove_state_json(&bad, "x").unwrap_err();
        assert!(err.is_invalid_argument(), "expected invalid argument for {bad}");
    }

    let err: fieldstates::Error = replace_state_json(&json!(3), Some(&state))
        .unwrap_err()
        .into();
    assert!(err.is_invalid_argument());
    assert!(err.is_states_error());
}
