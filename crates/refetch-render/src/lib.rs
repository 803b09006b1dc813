#![forbid(unsafe_code)]

//! Render-projection boundary for remote values.
//!
//! [`RemoteView`] maps each lifecycle state of a [`Remote`] to one branch
//! of host-UI output. It is toolkit-agnostic: `R` is whatever the host
//! renders (a string, a widget tree, a virtual DOM node), and only needs a
//! `Default` to stand in for branches the caller did not provide.
//!
//! Branch selection is a single call to the core `fold`; this crate never
//! re-implements variant dispatch.
//!
//! # Invariants
//!
//! 1. The success branch is mandatory; every other branch is optional and
//!    defaults to `R::default()`.
//! 2. Stale-success renders through the `refetching` branch when present,
//!    otherwise through the `pending` branch. It never silently falls into
//!    the success branch.
//! 3. `render` borrows the value; rendering consumes nothing.

use refetch_core::Remote;

/// Per-state render branches for one remote value.
///
/// ```
/// use refetch_core::Remote;
/// use refetch_render::RemoteView;
///
/// let view = RemoteView::new(|n: &i32| format!("value: {n}"))
///     .pending(|| "loading...".to_string())
///     .failure(|e: &String| format!("error: {e}"));
///
/// let value: Remote<String, i32> = Remote::success(7);
/// assert_eq!(view.render(&value), "value: 7");
/// assert_eq!(view.render(&Remote::pending()), "loading...");
/// ```
pub struct RemoteView<'a, E, A, R> {
    on_success: Box<dyn Fn(&A) -> R + 'a>,
    on_initial: Option<Box<dyn Fn() -> R + 'a>>,
    on_pending: Option<Box<dyn Fn() -> R + 'a>>,
    on_refetching: Option<Box<dyn Fn(&A) -> R + 'a>>,
    on_failure: Option<Box<dyn Fn(&E) -> R + 'a>>,
}

impl<'a, E, A, R: Default> RemoteView<'a, E, A, R> {
    /// A view with only the mandatory success branch.
    pub fn new(on_success: impl Fn(&A) -> R + 'a) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_initial: None,
            on_pending: None,
            on_refetching: None,
            on_failure: None,
        }
    }

    /// Branch for `Initial`.
    #[must_use]
    pub fn initial(mut self, on_initial: impl Fn() -> R + 'a) -> Self {
        self.on_initial = Some(Box::new(on_initial));
        self
    }

    /// Branch for `Pending` without data. Also covers stale-success when no
    /// `refetching` branch is set.
    #[must_use]
    pub fn pending(mut self, on_pending: impl Fn() -> R + 'a) -> Self {
        self.on_pending = Some(Box::new(on_pending));
        self
    }

    /// Branch for stale-success: a re-fetch in flight with the previous
    /// value still on hand.
    #[must_use]
    pub fn refetching(mut self, on_refetching: impl Fn(&A) -> R + 'a) -> Self {
        self.on_refetching = Some(Box::new(on_refetching));
        self
    }

    /// Branch for `Failure`.
    #[must_use]
    pub fn failure(mut self, on_failure: impl Fn(&E) -> R + 'a) -> Self {
        self.on_failure = Some(Box::new(on_failure));
        self
    }

    /// Project the value through the matching branch.
    pub fn render(&self, value: &Remote<E, A>) -> R {
        value.as_ref().fold(
            || self.on_initial.as_deref().map_or_else(R::default, |f| f()),
            |stale| match (stale, &self.on_refetching) {
                (Some(value), Some(f)) => f(value),
                _ => self.fallback_pending(),
            },
            |error| match &self.on_failure {
                Some(f) => f(error),
                None => self.default_branch("failure"),
            },
            |value| (self.on_success)(value),
        )
    }

    fn fallback_pending(&self) -> R {
        match &self.on_pending {
            Some(f) => f(),
            None => self.default_branch("pending"),
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn default_branch(&self, branch: &'static str) -> R {
        #[cfg(feature = "tracing")]
        tracing::trace!(message = "view.default_branch", branch);
        R::default()
    }
}
