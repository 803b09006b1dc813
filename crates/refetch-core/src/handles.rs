#![forbid(unsafe_code)]

//! Delegated side-effect handles (`refetch`/`remove`).
//!
//! A remote value may carry two callbacks handed over by the upstream fetch
//! client: one to re-run the fetch, one to drop the cached entry. The core
//! never schedules or awaits them; it only threads them through combinators
//! and fans them out when several values are merged into one.
//!
//! # Invariants
//!
//! 1. Handles carry no data and never participate in equality or in
//!    merge-state decisions.
//! 2. The default handles are a process-wide shared no-op; constructing a
//!    value without callbacks allocates nothing new.
//! 3. A fanned-out handle invokes every member handle exactly once per call,
//!    in member order.

use std::fmt;
use std::sync::{Arc, OnceLock};

/// A shared, cloneable side-effect callback.
pub type Effect = Arc<dyn Fn() + Send + Sync + 'static>;

/// The process-wide no-op effect. Cloned, never re-allocated.
fn noop_effect() -> Effect {
    static NOOP: OnceLock<Effect> = OnceLock::new();
    NOOP.get_or_init(|| Arc::new(|| {})).clone()
}

/// The `refetch`/`remove` callback pair carried by a remote value.
#[derive(Clone)]
pub struct Handles {
    refetch: Effect,
    remove: Effect,
}

impl Handles {
    /// Build handles from two closures.
    pub fn new(
        refetch: impl Fn() + Send + Sync + 'static,
        remove: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            refetch: Arc::new(refetch),
            remove: Arc::new(remove),
        }
    }

    /// Build handles from already-shared effects.
    #[must_use]
    pub fn from_effects(refetch: Effect, remove: Effect) -> Self {
        Self { refetch, remove }
    }

    /// Build handles from optional effects, filling gaps with the shared
    /// no-op.
    #[must_use]
    pub fn from_options(refetch: Option<Effect>, remove: Option<Effect>) -> Self {
        Self {
            refetch: refetch.unwrap_or_else(noop_effect),
            remove: remove.unwrap_or_else(noop_effect),
        }
    }

    /// The shared no-op pair.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            refetch: noop_effect(),
            remove: noop_effect(),
        }
    }

    /// Replace the refetch callback.
    #[must_use]
    pub fn with_refetch(mut self, refetch: Effect) -> Self {
        self.refetch = refetch;
        self
    }

    /// Replace the remove callback.
    #[must_use]
    pub fn with_remove(mut self, remove: Effect) -> Self {
        self.remove = remove;
        self
    }

    /// Aggregate handles that delegate to every member in order.
    ///
    /// Used by the merge engine: refetching a merged value refetches all of
    /// its members, independent of which precedence rule produced it.
    #[must_use]
    pub fn fan_out(members: impl IntoIterator<Item = Handles>) -> Self {
        let members: Arc<[Handles]> = members.into_iter().collect();
        let for_refetch = Arc::clone(&members);
        Self {
            refetch: Arc::new(move || {
                for member in for_refetch.iter() {
                    member.refetch();
                }
            }),
            remove: Arc::new(move || {
                for member in members.iter() {
                    member.remove();
                }
            }),
        }
    }

    /// Invoke the refetch callback.
    pub fn refetch(&self) {
        (self.refetch)();
    }

    /// Invoke the remove callback.
    pub fn remove(&self) {
        (self.remove)();
    }
}

impl Default for Handles {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Handles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handles").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn noop_is_shared() {
        let a = Handles::noop();
        let b = Handles::noop();
        assert!(Arc::ptr_eq(&a.refetch, &b.refetch));
        assert!(Arc::ptr_eq(&a.remove, &b.remove));
    }

    #[test]
    fn default_is_noop() {
        let d = Handles::default();
        let n = Handles::noop();
        assert!(Arc::ptr_eq(&d.refetch, &n.refetch));
    }

    #[test]
    fn from_options_fills_gaps() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let refetch: Effect = Arc::new(move || {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        let handles = Handles::from_options(Some(refetch), None);
        handles.refetch();
        handles.remove(); // no-op
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fan_out_invokes_every_member_in_order() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let member = |tag: u8| {
            let for_refetch = Arc::clone(&order);
            let for_remove = Arc::clone(&order);
            Handles::new(
                move || for_refetch.lock().unwrap().push(("refetch", tag)),
                move || for_remove.lock().unwrap().push(("remove", tag)),
            )
        };

        let merged = Handles::fan_out([member(0), member(1), member(2)]);
        merged.refetch();
        merged.remove();

        let log = order.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                ("refetch", 0),
                ("refetch", 1),
                ("refetch", 2),
                ("remove", 0),
                ("remove", 1),
                ("remove", 2),
            ]
        );
    }

    #[test]
    fn fan_out_of_nothing_is_inert() {
        let merged = Handles::fan_out(std::iter::empty());
        merged.refetch();
        merged.remove();
    }
}
