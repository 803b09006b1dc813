#![forbid(unsafe_code)]

//! The four-state remote value.
//!
//! A [`Remote<E, A>`] tracks the lifecycle of a value produced elsewhere
//! (a network fetch, a cache read, a long computation):
//!
//! | State | Carries | Meaning |
//! |---|---|---|
//! | `Initial` | nothing | no fetch has started |
//! | `Pending` | optional `A` | fetch in flight; may keep the previous value |
//! | `Success` | `A` | fetch completed, value available |
//! | `Failure` | `E`, optional stale `A` | fetch completed with an error |
//!
//! `Pending` with a payload is **stale-success**: a refetch is in flight but
//! the previous value is still usable, and most combinators treat it like
//! `Success` rather than like an empty `Pending`.
//!
//! # Invariants
//!
//! 1. Exactly one state is active; only `Failure` carries an error.
//! 2. `Success` always has a payload; a payload under `Pending`/`Failure`
//!    always originates from a prior `Success`, never fabricated.
//! 3. Values are immutable: every combinator consumes `self` and returns a
//!    new value.
//! 4. The carried [`Handles`] never affect equality or state classification.

use crate::handles::Handles;

/// The pure lifecycle state, without side-effect handles.
///
/// This is the canonical representation; producer encodings (two-flag,
/// boolean-flag) are reduced to it at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RemoteState<E, A> {
    /// No fetch has started.
    Initial,
    /// Fetch in flight, optionally with the previous success value.
    Pending(Option<A>),
    /// Fetch completed with a value.
    Success(A),
    /// Fetch completed with an error, optionally keeping the previous
    /// success value as stale data.
    Failure {
        /// The carried error. Opaque application data, never thrown.
        error: E,
        /// Previous success value, if any.
        stale: Option<A>,
    },
}

/// A remote value: lifecycle state plus delegated side-effect handles.
#[derive(Debug, Clone)]
pub struct Remote<E, A> {
    state: RemoteState<E, A>,
    handles: Handles,
}

impl<E, A> Remote<E, A> {
    /// The empty state: nothing fetched, nothing in flight.
    #[must_use]
    pub fn initial() -> Self {
        RemoteState::Initial.into()
    }

    /// A fetch in flight with no usable data yet.
    #[must_use]
    pub fn pending() -> Self {
        RemoteState::Pending(None).into()
    }

    /// A re-fetch in flight that still carries the previous success value.
    #[must_use]
    pub fn pending_with(value: A) -> Self {
        RemoteState::Pending(Some(value)).into()
    }

    /// A completed fetch.
    #[must_use]
    pub fn success(value: A) -> Self {
        RemoteState::Success(value).into()
    }

    /// A failed fetch with no stale data.
    #[must_use]
    pub fn failure(error: E) -> Self {
        RemoteState::Failure { error, stale: None }.into()
    }

    pub(crate) fn from_parts(state: RemoteState<E, A>, handles: Handles) -> Self {
        Self { state, handles }
    }

    pub(crate) fn into_parts(self) -> (RemoteState<E, A>, Handles) {
        (self.state, self.handles)
    }

    /// Borrow the lifecycle state.
    #[must_use]
    pub fn state(&self) -> &RemoteState<E, A> {
        &self.state
    }

    /// Consume the value, dropping its handles.
    #[must_use]
    pub fn into_state(self) -> RemoteState<E, A> {
        self.state
    }

    /// Borrow the side-effect handles.
    #[must_use]
    pub fn handles(&self) -> &Handles {
        &self.handles
    }

    /// Replace both side-effect handles.
    #[must_use]
    pub fn with_handles(mut self, handles: Handles) -> Self {
        self.handles = handles;
        self
    }

    /// Replace the refetch callback, keeping the remove callback.
    #[must_use]
    pub fn with_refetch(mut self, refetch: impl Fn() + Send + Sync + 'static) -> Self {
        self.handles = self.handles.with_refetch(std::sync::Arc::new(refetch));
        self
    }

    /// Replace the remove callback, keeping the refetch callback.
    #[must_use]
    pub fn with_remove(mut self, remove: impl Fn() + Send + Sync + 'static) -> Self {
        self.handles = self.handles.with_remove(std::sync::Arc::new(remove));
        self
    }

    /// Ask the producer to re-run the fetch. No-op unless a handle was
    /// attached.
    pub fn refetch(&self) {
        self.handles.refetch();
    }

    /// Ask the producer to drop the cached entry. No-op unless a handle was
    /// attached.
    pub fn remove(&self) {
        self.handles.remove();
    }

    /// No fetch has started.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        matches!(self.state, RemoteState::Initial)
    }

    /// A fetch is in flight (with or without stale data).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, RemoteState::Pending(_))
    }

    /// Fetch completed with a value.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.state, RemoteState::Success(_))
    }

    /// Fetch completed with an error.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.state, RemoteState::Failure { .. })
    }

    /// Stale-success: a re-fetch is in flight but the previous value is
    /// still available.
    #[must_use]
    pub fn is_refetching(&self) -> bool {
        matches!(self.state, RemoteState::Pending(Some(_)))
    }

    /// A usable payload exists: `Success` or stale-success.
    #[must_use]
    pub fn has_value(&self) -> bool {
        matches!(
            self.state,
            RemoteState::Success(_) | RemoteState::Pending(Some(_))
        )
    }

    /// Borrow the payload for `Success` or stale-success.
    ///
    /// `Failure`'s stale data is deliberately not surfaced here; it exists
    /// only so adapters and re-fetch cycles can carry it forward.
    #[must_use]
    pub fn value(&self) -> Option<&A> {
        match &self.state {
            RemoteState::Success(value) | RemoteState::Pending(Some(value)) => Some(value),
            _ => None,
        }
    }

    /// Borrow the error for `Failure`.
    #[must_use]
    pub fn error(&self) -> Option<&E> {
        match &self.state {
            RemoteState::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    /// A borrowing view of this value, sharing its handles.
    ///
    /// Lets consumers run consuming combinators such as
    /// [`fold`](Remote::fold) without giving up ownership.
    #[must_use]
    pub fn as_ref(&self) -> Remote<&E, &A> {
        let state = match &self.state {
            RemoteState::Initial => RemoteState::Initial,
            RemoteState::Pending(value) => RemoteState::Pending(value.as_ref()),
            RemoteState::Success(value) => RemoteState::Success(value),
            RemoteState::Failure { error, stale } => RemoteState::Failure {
                error,
                stale: stale.as_ref(),
            },
        };
        Remote {
            state,
            handles: self.handles.clone(),
        }
    }
}

impl<E, A> From<RemoteState<E, A>> for Remote<E, A> {
    fn from(state: RemoteState<E, A>) -> Self {
        Self {
            state,
            handles: Handles::noop(),
        }
    }
}

impl<E, A> Default for Remote<E, A> {
    fn default() -> Self {
        Self::initial()
    }
}

/// Equality compares lifecycle states only; handles are identity-free
/// side-effect plumbing.
impl<E: PartialEq, A: PartialEq> PartialEq for Remote<E, A> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<E: Eq, A: Eq> Eq for Remote<E, A> {}

#[cfg(feature = "serde")]
impl<E: serde::Serialize, A: serde::Serialize> serde::Serialize for Remote<E, A> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, E, A> serde::Deserialize<'de> for Remote<E, A>
where
    E: serde::Deserialize<'de>,
    A: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RemoteState::deserialize(deserializer).map(Self::from)
    }
}
