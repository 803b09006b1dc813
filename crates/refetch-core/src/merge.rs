#![forbid(unsafe_code)]

//! N-ary merge engine: collapse many remote values into one.
//!
//! [`sequence`] merges an ordered list, [`combine`] a keyed map, and
//! [`SequenceTuple`] gives heterogeneous call sites a typed tuple form.
//! All three pick the aggregate state by the same precedence, evaluated in
//! this exact order:
//!
//! 1. every input `Success` → `Success` of all payloads;
//! 2. any input `Failure` → `Failure` with the **first** error in input
//!    order (first-failure-wins);
//! 3. every input `Success` or stale-success → `Pending` with all payloads;
//! 4. any input `Pending` → empty `Pending`;
//! 5. otherwise (all `Initial`) → `Initial`.
//!
//! Rule 2 outranks 3–5 but is outranked by 1, so a mix of `Success` and
//! `Failure` always yields `Failure`, never `Pending`.
//!
//! # Invariants
//!
//! 1. The aggregate's `refetch`/`remove` delegate to every member handle,
//!    independent of which rule fired.
//! 2. Payload order (or key order) matches input order.
//! 3. The empty list is unanimously successful: `Success` of an empty
//!    collection.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::handles::Handles;
use crate::state::{Remote, RemoteState};

/// Merge an ordered list of remote values into one remote list.
pub fn sequence<E, A>(values: Vec<Remote<E, A>>) -> Remote<E, Vec<A>> {
    let handles = Handles::fan_out(values.iter().map(|value| value.handles().clone()));
    #[cfg(feature = "tracing")]
    let total = values.len();

    // Rule 1: unanimous success.
    if values.iter().all(Remote::is_success) {
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "sequence.verdict", verdict = "success", members = total);
        let items: Vec<A> = values.into_iter().map(take_success).collect();
        return Remote::from_parts(RemoteState::Success(items), handles);
    }

    // Rule 2: first failure wins; later failures are dropped.
    if let Some(index) = values.iter().position(Remote::is_failure) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "sequence.verdict",
            verdict = "failure",
            members = total,
            failed_at = index
        );
        let mut values = values;
        let error = take_error(values.swap_remove(index));
        return Remote::from_parts(RemoteState::Failure { error, stale: None }, handles);
    }

    // Rule 3: every member still has a usable payload.
    if values.iter().all(Remote::has_value) {
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "sequence.verdict", verdict = "refetching", members = total);
        let items: Vec<A> = values.into_iter().map(take_value).collect();
        return Remote::from_parts(RemoteState::Pending(Some(items)), handles);
    }

    // Rule 4: somebody is still fetching with nothing to show.
    if values.iter().any(Remote::is_pending) {
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "sequence.verdict", verdict = "pending", members = total);
        return Remote::from_parts(RemoteState::Pending(None), handles);
    }

    // Rule 5: nothing has started.
    #[cfg(feature = "tracing")]
    tracing::debug!(message = "sequence.verdict", verdict = "initial", members = total);
    Remote::from_parts(RemoteState::Initial, handles)
}

/// Merge a keyed map of remote values into one remote map.
///
/// Same precedence as [`sequence`] (it delegates to it); key order in the
/// result matches insertion order of the input.
pub fn combine<K, E, A>(entries: IndexMap<K, Remote<E, A>>) -> Remote<E, IndexMap<K, A>>
where
    K: Hash + Eq,
{
    let (keys, values): (Vec<K>, Vec<Remote<E, A>>) = entries.into_iter().unzip();
    let (state, handles) = sequence(values).into_parts();

    let state = match state {
        RemoteState::Success(items) => {
            RemoteState::Success(keys.into_iter().zip(items).collect())
        }
        RemoteState::Pending(Some(items)) => {
            RemoteState::Pending(Some(keys.into_iter().zip(items).collect()))
        }
        RemoteState::Pending(None) => RemoteState::Pending(None),
        RemoteState::Initial => RemoteState::Initial,
        RemoteState::Failure { error, .. } => RemoteState::Failure { error, stale: None },
    };
    Remote::from_parts(state, handles)
}

/// Tuple form of [`sequence`] for merging remote values of different
/// payload types.
///
/// Implemented for tuples of arity 1 through 8; the variant precedence is
/// identical to the list form.
pub trait SequenceTuple<E> {
    /// The merged payload: one slot per input, in order.
    type Payload;

    /// Merge the tuple into a single remote value.
    fn sequence(self) -> Remote<E, Self::Payload>;
}

fn take_success<E, A>(value: Remote<E, A>) -> A {
    match value.into_state() {
        RemoteState::Success(value) => value,
        _ => unreachable!("caller checked is_success"),
    }
}

fn take_error<E, A>(value: Remote<E, A>) -> E {
    match value.into_state() {
        RemoteState::Failure { error, .. } => error,
        _ => unreachable!("caller checked is_failure"),
    }
}

fn take_value<E, A>(value: Remote<E, A>) -> A {
    match value.into_state() {
        RemoteState::Success(value) | RemoteState::Pending(Some(value)) => value,
        _ => unreachable!("caller checked has_value"),
    }
}

fn state_has_value<E, A>(state: &RemoteState<E, A>) -> bool {
    matches!(
        state,
        RemoteState::Success(_) | RemoteState::Pending(Some(_))
    )
}

fn take_state_value<E, A>(state: RemoteState<E, A>) -> A {
    match state {
        RemoteState::Success(value) | RemoteState::Pending(Some(value)) => value,
        _ => unreachable!("caller checked state_has_value"),
    }
}

macro_rules! impl_sequence_tuple {
    ($($var:ident : $ty:ident),+) => {
        impl<E, $($ty),+> SequenceTuple<E> for ($(Remote<E, $ty>,)+) {
            type Payload = ($($ty,)+);

            fn sequence(self) -> Remote<E, Self::Payload> {
                let ($($var,)+) = self;
                let handles = Handles::fan_out([$($var.handles().clone()),+]);

                // Rule 1: unanimous success.
                if $($var.is_success())&&+ {
                    return Remote::from_parts(
                        RemoteState::Success(($(take_success($var),)+)),
                        handles,
                    );
                }

                // Rule 2: first failure wins, scanning in tuple order.
                $(
                    let $var = match $var.into_state() {
                        RemoteState::Failure { error, .. } => {
                            return Remote::from_parts(
                                RemoteState::Failure { error, stale: None },
                                handles,
                            );
                        }
                        state => state,
                    };
                )+

                // Rule 3: every member still has a usable payload.
                if $(state_has_value(&$var))&&+ {
                    return Remote::from_parts(
                        RemoteState::Pending(Some(($(take_state_value($var),)+))),
                        handles,
                    );
                }

                // Rule 4: somebody is still fetching with nothing to show.
                if $(matches!($var, RemoteState::Pending(_)))||+ {
                    return Remote::from_parts(RemoteState::Pending(None), handles);
                }

                // Rule 5: nothing has started.
                Remote::from_parts(RemoteState::Initial, handles)
            }
        }
    };
}

impl_sequence_tuple!(a: A1);
impl_sequence_tuple!(a: A1, b: A2);
impl_sequence_tuple!(a: A1, b: A2, c: A3);
impl_sequence_tuple!(a: A1, b: A2, c: A3, d: A4);
impl_sequence_tuple!(a: A1, b: A2, c: A3, d: A4, e: A5);
impl_sequence_tuple!(a: A1, b: A2, c: A3, d: A4, e: A5, f: A6);
impl_sequence_tuple!(a: A1, b: A2, c: A3, d: A4, e: A5, f: A6, g: A7);
impl_sequence_tuple!(a: A1, b: A2, c: A3, d: A4, e: A5, f: A6, g: A7, h: A8);
