//! Property-based invariant tests for the n-ary merge engine.
//!
//! These tests verify the precedence contract for **any** list of remote
//! values:
//!
//! 1. The verdict matches a reference oracle evaluating the five precedence
//!    rules in order.
//! 2. First-failure-wins: the aggregate error is the first failure in input
//!    order.
//! 3. Payloads preserve input order.
//! 4. `combine` agrees with `sequence` on states, with keys re-attached in
//!    insertion order.
//! 5. Tuple and list forms agree at every arity tested.
//! 6. Merging a single value preserves its state.

use indexmap::IndexMap;
use proptest::prelude::*;
use refetch_core::{Remote, RemoteState, SequenceTuple, combine, sequence};

// ── Helpers ─────────────────────────────────────────────────────────────

fn arb_state() -> impl Strategy<Value = RemoteState<u8, i32>> {
    prop_oneof![
        Just(RemoteState::Initial),
        Just(RemoteState::Pending(None)),
        any::<i32>().prop_map(|v| RemoteState::Pending(Some(v))),
        any::<i32>().prop_map(RemoteState::Success),
        any::<u8>().prop_map(|e| RemoteState::Failure {
            error: e,
            stale: None
        }),
        (any::<u8>(), any::<i32>()).prop_map(|(e, v)| RemoteState::Failure {
            error: e,
            stale: Some(v)
        }),
    ]
}

fn arb_remote() -> impl Strategy<Value = Remote<u8, i32>> {
    arb_state().prop_map(Remote::from)
}

fn arb_remotes(max: usize) -> impl Strategy<Value = Vec<Remote<u8, i32>>> {
    proptest::collection::vec(arb_remote(), 0..max)
}

/// Reference oracle: the five precedence rules, written independently of
/// the production code path.
fn oracle(values: &[Remote<u8, i32>]) -> RemoteState<u8, Vec<i32>> {
    if values.iter().all(Remote::is_success) {
        let items = values.iter().filter_map(|v| v.value().copied()).collect();
        return RemoteState::Success(items);
    }
    if let Some(failed) = values.iter().find(|v| v.is_failure()) {
        let error = *failed.error().unwrap();
        return RemoteState::Failure { error, stale: None };
    }
    if values.iter().all(Remote::has_value) {
        let items = values.iter().filter_map(|v| v.value().copied()).collect();
        return RemoteState::Pending(Some(items));
    }
    if values.iter().any(Remote::is_pending) {
        return RemoteState::Pending(None);
    }
    RemoteState::Initial
}

// ═════════════════════════════════════════════════════════════════════════
// Precedence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sequence_matches_the_precedence_oracle(values in arb_remotes(8)) {
        let expected = oracle(&values);
        let got = sequence(values).into_state();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn failure_verdict_is_the_first_failure(values in arb_remotes(8)) {
        let first_error = values.iter().find_map(|v| v.error().copied());
        let any_success_gap = !values.iter().all(Remote::is_success);
        let got = sequence(values).into_state();
        if let (Some(error), true) = (first_error, any_success_gap) {
            prop_assert_eq!(got, RemoteState::Failure { error, stale: None });
        }
    }

    #[test]
    fn success_payloads_preserve_input_order(payloads in proptest::collection::vec(any::<i32>(), 0..8)) {
        let values: Vec<Remote<u8, i32>> =
            payloads.iter().map(|&v| Remote::success(v)).collect();
        let got = sequence(values).into_state();
        prop_assert_eq!(got, RemoteState::Success(payloads));
    }

    #[test]
    fn merging_one_value_is_lossless_up_to_wrapping(value in arb_remote()) {
        let expected = oracle(std::slice::from_ref(&value));
        let got = sequence(vec![value]).into_state();
        prop_assert_eq!(got, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Keyed and tuple forms agree with the list form
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn combine_agrees_with_sequence(values in arb_remotes(8)) {
        let keys: Vec<usize> = (0..values.len()).collect();
        let entries: IndexMap<usize, Remote<u8, i32>> =
            keys.iter().copied().zip(values.clone()).collect();

        let keyed = combine(entries).into_state();
        let listed = sequence(values).into_state();

        let rezipped = match listed {
            RemoteState::Success(items) => {
                RemoteState::Success(keys.into_iter().zip(items).collect::<IndexMap<_, _>>())
            }
            RemoteState::Pending(Some(items)) => {
                RemoteState::Pending(Some(keys.into_iter().zip(items).collect()))
            }
            RemoteState::Pending(None) => RemoteState::Pending(None),
            RemoteState::Initial => RemoteState::Initial,
            RemoteState::Failure { error, .. } => RemoteState::Failure { error, stale: None },
        };
        prop_assert_eq!(keyed, rezipped);
    }

    #[test]
    fn tuple_form_agrees_with_list_form(a in arb_remote(), b in arb_remote(), c in arb_remote()) {
        let listed = sequence(vec![a.clone(), b.clone(), c.clone()]).into_state();
        let tupled = (a, b, c).sequence().into_state();

        let flattened = match tupled {
            RemoteState::Success((x, y, z)) => RemoteState::Success(vec![x, y, z]),
            RemoteState::Pending(Some((x, y, z))) => RemoteState::Pending(Some(vec![x, y, z])),
            RemoteState::Pending(None) => RemoteState::Pending(None),
            RemoteState::Initial => RemoteState::Initial,
            RemoteState::Failure { error, .. } => RemoteState::Failure { error, stale: None },
        };
        prop_assert_eq!(flattened, listed);
    }
}
