#![forbid(unsafe_code)]

//! Unary combinators over [`Remote`].
//!
//! All combinators are pure and total, with one shared branching discipline:
//! `Success` first, then stale-success (`Pending` with a payload), then an
//! untouched pass-through for everything else — except the error-channel
//! operations, which target `Failure` only. No combinator ever invokes a
//! payload function without a payload.

use crate::state::{Remote, RemoteState};

impl<E, A> Remote<E, A> {
    /// Transform the payload, preserving the lifecycle state.
    ///
    /// Applies `f` wherever a payload exists: `Success`, stale-success, and
    /// the stale data of `Failure` (carried forward so a later re-fetch can
    /// still show it). `Initial` and empty `Pending` pass through.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Remote<E, B> {
        let (state, handles) = self.into_parts();
        let state = match state {
            RemoteState::Initial => RemoteState::Initial,
            RemoteState::Pending(value) => RemoteState::Pending(value.map(f)),
            RemoteState::Success(value) => RemoteState::Success(f(value)),
            RemoteState::Failure { error, stale } => RemoteState::Failure {
                error,
                stale: stale.map(f),
            },
        };
        Remote::from_parts(state, handles)
    }

    /// Transform the error channel. All non-`Failure` states pass through.
    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> Remote<F, A> {
        let (state, handles) = self.into_parts();
        let state = match state {
            RemoteState::Initial => RemoteState::Initial,
            RemoteState::Pending(value) => RemoteState::Pending(value),
            RemoteState::Success(value) => RemoteState::Success(value),
            RemoteState::Failure { error, stale } => RemoteState::Failure {
                error: f(error),
                stale,
            },
        };
        Remote::from_parts(state, handles)
    }

    /// Sequence a payload-dependent continuation, flattening one level.
    ///
    /// For `Success` and stale-success the result is `f(payload)` verbatim
    /// (including its handles). `Initial` and empty `Pending` pass through;
    /// `Failure` passes through with its stale data dropped, since no value
    /// of the new payload type ever existed.
    pub fn and_then<B>(self, f: impl FnOnce(A) -> Remote<E, B>) -> Remote<E, B> {
        let (state, handles) = self.into_parts();
        match state {
            RemoteState::Success(value) | RemoteState::Pending(Some(value)) => f(value),
            RemoteState::Pending(None) => Remote::from_parts(RemoteState::Pending(None), handles),
            RemoteState::Initial => Remote::from_parts(RemoteState::Initial, handles),
            RemoteState::Failure { error, .. } => {
                Remote::from_parts(RemoteState::Failure { error, stale: None }, handles)
            }
        }
    }

    /// Total case analysis: exactly one branch runs.
    ///
    /// `on_pending` receives the optional stale payload, so a single branch
    /// covers both plain pending and stale-success.
    pub fn fold<B>(
        self,
        on_initial: impl FnOnce() -> B,
        on_pending: impl FnOnce(Option<A>) -> B,
        on_failure: impl FnOnce(E) -> B,
        on_success: impl FnOnce(A) -> B,
    ) -> B {
        match self.into_state() {
            RemoteState::Initial => on_initial(),
            RemoteState::Failure { error, .. } => on_failure(error),
            RemoteState::Success(value) => on_success(value),
            RemoteState::Pending(value) => on_pending(value),
        }
    }

    /// The payload for `Success` or stale-success, otherwise `on_else()`.
    pub fn unwrap_or_else(self, on_else: impl FnOnce() -> A) -> A {
        match self.into_state() {
            RemoteState::Success(value) | RemoteState::Pending(Some(value)) => value,
            _ => on_else(),
        }
    }

    /// The payload for `Success` or stale-success, otherwise `None`.
    #[must_use]
    pub fn to_option(self) -> Option<A> {
        match self.into_state() {
            RemoteState::Success(value) | RemoteState::Pending(Some(value)) => Some(value),
            _ => None,
        }
    }

    /// Lift an optional value: `Some` becomes `Success`, `None` becomes
    /// `Failure` with the supplied error.
    pub fn from_option(option: Option<A>, on_none: impl FnOnce() -> E) -> Self {
        match option {
            Some(value) => Remote::success(value),
            None => Remote::failure(on_none()),
        }
    }

    /// Lift a completed result: `Ok` becomes `Success`, `Err` becomes
    /// `Failure`.
    pub fn from_result(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Remote::success(value),
            Err(error) => Remote::failure(error),
        }
    }

    /// Collapse into a result, supplying errors for the two states that
    /// carry neither payload nor error.
    pub fn to_result(
        self,
        on_initial: impl FnOnce() -> E,
        on_pending_no_data: impl FnOnce() -> E,
    ) -> Result<A, E> {
        match self.into_state() {
            RemoteState::Success(value) | RemoteState::Pending(Some(value)) => Ok(value),
            RemoteState::Initial => Err(on_initial()),
            RemoteState::Pending(None) => Err(on_pending_no_data()),
            RemoteState::Failure { error, .. } => Err(error),
        }
    }
}
