//! Decision engine vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use scopegate_core::engine::evaluate_snapshot;

mod vector_loader;
use vector_loader::load;

#[test]
fn decision_vectors() {
    let files = [
        "decision_end_to_end.json",
        "decision_no_header.json",
        "decision_empty_header_value.json",
        "decision_header_case_mismatch.json",
        "decision_header_first_with_value.json",
        "decision_no_match.json",
        "decision_order_and_duplicates.json",
        "decision_corrupt_snapshot.json",
        "decision_missing_entitlements_key.json",
        "decision_corrupt_snapshot_no_header.json",
    ];

    for f in files {
        let tv = load(f);
        let snapshot = tv.snapshot();
        let decision = evaluate_snapshot(&tv.request.event, snapshot.as_ref());

        let mut got = serde_json::to_value(decision.into_response()).unwrap();

        // Error descriptions carry decoder detail; only require one to exist.
        if let Some(obj) = got.as_object_mut() {
            if let Some(desc) = obj.remove("errorDescription") {
                assert!(
                    desc.as_str().is_some_and(|s| !s.is_empty()),
                    "{f}: empty errorDescription"
                );
            }
        }

        assert_eq!(got, tv.expect, "{f}: {}", tv.description);
    }
}

#[test]
fn end_to_end_wire_bytes() {
    let tv = load("decision_end_to_end.json");
    let snapshot = tv.snapshot().unwrap();
    let decision = evaluate_snapshot(&tv.request.event, Ok(&snapshot));
    let body = serde_json::to_string(&decision.into_response()).unwrap();
    assert_eq!(
        body,
        r#"{"actionStatus":"SUCCESS","operations":[{"op":"add","path":"/accessToken/scopes/-","value":"partner:invoke"}]}"#
    );
}

#[test]
fn corrupt_snapshot_yields_no_operations() {
    let tv = load("decision_corrupt_snapshot.json");
    let err = tv.snapshot().expect_err("must fail");
    assert_eq!(err.code().as_str(), "POLICY_UNAVAILABLE");

    let decision = evaluate_snapshot(&tv.request.event, Err(&err));
    assert!(!decision.is_success());
    assert!(decision.operations.is_empty());
    assert_eq!(decision.scopes().count(), 0);
}

#[test]
fn snapshot_is_untouched_by_evaluation() {
    let tv = load("decision_order_and_duplicates.json");
    let snapshot = tv.snapshot().unwrap();
    let before = snapshot.clone();

    let first = evaluate_snapshot(&tv.request.event, Ok(&snapshot));
    let second = evaluate_snapshot(&tv.request.event, Ok(&snapshot));

    assert_eq!(snapshot, before);
    assert_eq!(first, second);
    assert_eq!(
        first.scopes().collect::<Vec<_>>(),
        ["partner:read", "partner:write", "partner:read"]
    );
}
