#![forbid(unsafe_code)]

//! Producer-snapshot adapters.
//!
//! Upstream fetch clients describe their lifecycle in their own vocabulary.
//! This module accepts three snapshot shapes and reduces each to the
//! canonical [`Remote`]:
//!
//! - [`QuerySnapshot`]: two-flag encoding, `status` × `activity`;
//! - [`FlagSnapshot`]: boolean-flag encoding, four `is_*` flags;
//! - [`MutationSnapshot`]: one-shot operations with a flat four-way status.
//!
//! Adaptation is the only fallible surface of the crate. Malformed
//! combinations (a success without a payload, an error state without an
//! error, flags that select no variant) are rejected with a
//! [`SnapshotError`], never coerced into a default state.
//!
//! # Invariants
//!
//! 1. `TryFrom` either yields a well-formed [`Remote`] or an error naming
//!    the offending field; no silent fallback variant exists.
//! 2. [`QuerySnapshot`] and [`FlagSnapshot`] agree on every snapshot that is
//!    expressible in both encodings.
//! 3. Callbacks present on the snapshot become the value's handles; absent
//!    callbacks become the shared no-op.

use thiserror::Error;

use crate::handles::{Effect, Handles};
use crate::state::{Remote, RemoteState};

/// Rejection reasons for malformed producer snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// A success state arrived without a payload.
    #[error("success state carries no payload")]
    MissingData,
    /// An error state arrived without an error value.
    #[error("error state carries no error value")]
    MissingError,
    /// A state that cannot carry data arrived with one.
    #[error("idle state unexpectedly carries a payload")]
    UnexpectedData,
    /// A state that cannot carry an error arrived with one.
    #[error("state unexpectedly carries an error value")]
    UnexpectedError,
    /// Boolean flags assert two variants at once.
    #[error("snapshot flags select more than one state")]
    ConflictingFlags,
    /// Boolean flags assert no variant at all.
    #[error("snapshot flags select no state")]
    NoVariant,
}

#[cfg(feature = "tracing")]
fn reject(encoding: &'static str, error: SnapshotError) -> SnapshotError {
    tracing::warn!(message = "snapshot.rejected", encoding, %error);
    error
}

#[cfg(not(feature = "tracing"))]
fn reject(_encoding: &'static str, error: SnapshotError) -> SnapshotError {
    error
}

/// Where a query sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LifecycleStatus {
    /// No successful fetch yet.
    Loading,
    /// Last fetch succeeded.
    Success,
    /// Last fetch failed.
    Error,
}

/// Whether a fetch is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Activity {
    /// No request in flight.
    Idle,
    /// A request is in flight.
    Fetching,
}

/// Two-flag query snapshot: lifecycle status crossed with fetch activity.
///
/// Classification, in order:
///
/// - any status while `Fetching` → `Pending` with whatever data exists;
/// - `Success` while `Idle` → `Success` (payload required);
/// - `Error` while `Idle` → `Failure` (error required, stale data kept);
/// - `Loading` while `Idle` → `Initial` (must carry neither data nor error).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuerySnapshot<E, A> {
    /// Lifecycle status reported by the producer.
    pub status: LifecycleStatus,
    /// Whether a request is currently in flight.
    pub activity: Activity,
    /// Payload, if the producer has one (current or stale).
    pub data: Option<A>,
    /// Error, if the last fetch failed.
    pub error: Option<E>,
    /// Callback that re-runs the fetch.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub refetch: Option<Effect>,
    /// Callback that drops the cached entry.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub remove: Option<Effect>,
}

impl<E, A> TryFrom<QuerySnapshot<E, A>> for Remote<E, A> {
    type Error = SnapshotError;

    fn try_from(snapshot: QuerySnapshot<E, A>) -> Result<Self, SnapshotError> {
        let handles = Handles::from_options(snapshot.refetch, snapshot.remove);
        let state = match (snapshot.status, snapshot.activity) {
            // In-flight wins over everything else; stale data rides along.
            (_, Activity::Fetching) => RemoteState::Pending(snapshot.data),
            (LifecycleStatus::Success, Activity::Idle) => {
                if snapshot.error.is_some() {
                    return Err(reject("query", SnapshotError::UnexpectedError));
                }
                let data = snapshot
                    .data
                    .ok_or_else(|| reject("query", SnapshotError::MissingData))?;
                RemoteState::Success(data)
            }
            (LifecycleStatus::Error, Activity::Idle) => {
                let error = snapshot
                    .error
                    .ok_or_else(|| reject("query", SnapshotError::MissingError))?;
                RemoteState::Failure {
                    error,
                    stale: snapshot.data,
                }
            }
            (LifecycleStatus::Loading, Activity::Idle) => {
                if snapshot.data.is_some() {
                    return Err(reject("query", SnapshotError::UnexpectedData));
                }
                if snapshot.error.is_some() {
                    return Err(reject("query", SnapshotError::UnexpectedError));
                }
                RemoteState::Initial
            }
        };
        Ok(Remote::from_parts(state, handles))
    }
}

/// Boolean-flag query snapshot.
///
/// Classification, in order: `is_idle` → `Initial`; fetching without an
/// error → `Pending`; error while not fetching → `Failure`; otherwise a
/// settled `is_success` → `Success`. An error flag raised *while* fetching
/// is ambiguous and rejected, as is a flag set selecting no variant.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagSnapshot<E, A> {
    /// The query has not been started.
    pub is_idle: bool,
    /// A request is in flight.
    pub is_fetching: bool,
    /// The last fetch succeeded.
    pub is_success: bool,
    /// The last fetch failed.
    pub is_error: bool,
    /// Payload, if the producer has one (current or stale).
    pub data: Option<A>,
    /// Error, if the last fetch failed.
    pub error: Option<E>,
    /// Callback that re-runs the fetch.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub refetch: Option<Effect>,
    /// Callback that drops the cached entry.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub remove: Option<Effect>,
}

impl<E, A> TryFrom<FlagSnapshot<E, A>> for Remote<E, A> {
    type Error = SnapshotError;

    fn try_from(snapshot: FlagSnapshot<E, A>) -> Result<Self, SnapshotError> {
        let handles = Handles::from_options(snapshot.refetch, snapshot.remove);
        let state = if snapshot.is_idle {
            if snapshot.data.is_some() {
                return Err(reject("flag", SnapshotError::UnexpectedData));
            }
            if snapshot.error.is_some() {
                return Err(reject("flag", SnapshotError::UnexpectedError));
            }
            RemoteState::Initial
        } else if snapshot.is_fetching {
            if snapshot.is_error {
                return Err(reject("flag", SnapshotError::ConflictingFlags));
            }
            RemoteState::Pending(snapshot.data)
        } else if snapshot.is_error {
            let error = snapshot
                .error
                .ok_or_else(|| reject("flag", SnapshotError::MissingError))?;
            RemoteState::Failure {
                error,
                stale: snapshot.data,
            }
        } else if snapshot.is_success {
            if snapshot.error.is_some() {
                return Err(reject("flag", SnapshotError::UnexpectedError));
            }
            let data = snapshot
                .data
                .ok_or_else(|| reject("flag", SnapshotError::MissingData))?;
            RemoteState::Success(data)
        } else {
            return Err(reject("flag", SnapshotError::NoVariant));
        };
        Ok(Remote::from_parts(state, handles))
    }
}

/// One-shot mutation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MutationStatus {
    /// Not triggered yet.
    Idle,
    /// Running.
    Loading,
    /// Completed with a value.
    Success,
    /// Completed with an error.
    Error,
}

/// Snapshot of a one-shot mutation.
///
/// Mutations never carry stale data and never refetch; the four statuses
/// map directly onto the four lifecycle states.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationSnapshot<E, A> {
    /// The mutation's flat status.
    pub status: MutationStatus,
    /// Result payload, once completed successfully.
    pub data: Option<A>,
    /// Error, once completed unsuccessfully.
    pub error: Option<E>,
}

impl<E, A> TryFrom<MutationSnapshot<E, A>> for Remote<E, A> {
    type Error = SnapshotError;

    fn try_from(snapshot: MutationSnapshot<E, A>) -> Result<Self, SnapshotError> {
        let state = match snapshot.status {
            MutationStatus::Idle => {
                if snapshot.data.is_some() {
                    return Err(reject("mutation", SnapshotError::UnexpectedData));
                }
                if snapshot.error.is_some() {
                    return Err(reject("mutation", SnapshotError::UnexpectedError));
                }
                RemoteState::Initial
            }
            MutationStatus::Loading => RemoteState::Pending(None),
            MutationStatus::Success => {
                if snapshot.error.is_some() {
                    return Err(reject("mutation", SnapshotError::UnexpectedError));
                }
                let data = snapshot
                    .data
                    .ok_or_else(|| reject("mutation", SnapshotError::MissingData))?;
                RemoteState::Success(data)
            }
            MutationStatus::Error => {
                let error = snapshot
                    .error
                    .ok_or_else(|| reject("mutation", SnapshotError::MissingError))?;
                RemoteState::Failure { error, stale: None }
            }
        };
        Ok(state.into())
    }
}
