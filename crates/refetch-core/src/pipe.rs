#![forbid(unsafe_code)]

//! Left-to-right function application.

/// Apply a function to `self`, reading left to right.
///
/// Keeps combinator chains in reading order when a step is a free function
/// rather than a method:
///
/// ```
/// use refetch_core::pipe::Pipe;
///
/// let n = 2.pipe(|n| n * 10).pipe(|n| n + 1);
/// assert_eq!(n, 21);
/// ```
pub trait Pipe: Sized {
    /// Apply `f` to `self`.
    fn pipe<B>(self, f: impl FnOnce(Self) -> B) -> B {
        f(self)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Remote;

    #[test]
    fn pipe_is_plain_application() {
        assert_eq!(3.pipe(|n| n + 1), 4);
    }

    #[test]
    fn pipe_chains_combinators_in_reading_order() {
        let value: Remote<&str, i32> = Remote::success(2);
        let shown = value
            .map(|n| n * 10)
            .pipe(|v| v.unwrap_or_else(|| 0))
            .pipe(|n| format!("got {n}"));
        assert_eq!(shown, "got 20");
    }
}
