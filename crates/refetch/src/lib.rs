#![forbid(unsafe_code)]

//! Public facade crate.
//!
//! Re-exports the remote-value algebra from `refetch-core` and the render
//! boundary from `refetch-render` as one stable surface.
//!
//! ```
//! use refetch::prelude::*;
//!
//! let user: Remote<String, &str> = Remote::success("ada");
//! let city: Remote<String, &str> = Remote::pending_with("london");
//!
//! let merged = (user, city).sequence();
//! assert!(merged.is_refetching());
//! assert_eq!(merged.value(), Some(&("ada", "london")));
//! ```

pub use refetch_core::{
    Activity, Effect, FlagSnapshot, Handles, LifecycleStatus, MutationSnapshot, MutationStatus,
    Pipe, QuerySnapshot, Remote, RemoteState, SequenceTuple, SnapshotError, combine, sequence,
};
pub use refetch_render::RemoteView;

pub mod prelude {
    //! Everything a typical consumer needs in scope.
    pub use refetch_core::{
        Pipe, Remote, RemoteState, SequenceTuple, SnapshotError, combine, sequence,
    };
    pub use refetch_render::RemoteView;
}
