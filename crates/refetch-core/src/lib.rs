#![forbid(unsafe_code)]

//! Core remote-value algebra.
//!
//! A [`Remote<E, A>`] models the lifecycle of data fetched from elsewhere
//! as four explicit states (`Initial`, `Pending`, `Success`, `Failure`),
//! with stale data carried through re-fetches instead of flickering back to
//! a spinner. On top of the type sit:
//!
//! - unary combinators (`map`, `map_err`, `and_then`, `fold`, conversions
//!   to and from `Option`/`Result`);
//! - an n-ary [`merge`] engine (`sequence`, `combine`, tuple form) that
//!   collapses many remote values into one under a fixed precedence;
//! - [`adapter`]s that reduce producer snapshot encodings to the canonical
//!   enum, rejecting malformed combinations;
//! - delegated [`handles`] so a derived value can still ask its producers
//!   to refetch.
//!
//! The crate is pure and synchronous: no I/O, no scheduler, no retry
//! policy. It classifies and combines lifecycle states; running fetches is
//! the producer's job.
//!
//! Cargo features: `serde` (state and snapshot serialization), `tracing`
//! (merge-verdict and snapshot-rejection events).

pub mod adapter;
pub mod handles;
pub mod merge;
mod ops;
pub mod pipe;
pub mod state;

pub use adapter::{
    Activity, FlagSnapshot, LifecycleStatus, MutationSnapshot, MutationStatus, QuerySnapshot,
    SnapshotError,
};
pub use handles::{Effect, Handles};
pub use merge::{SequenceTuple, combine, sequence};
pub use pipe::Pipe;
pub use state::{Remote, RemoteState};
