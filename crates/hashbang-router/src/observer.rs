//! Navigation notifications.

use crate::matcher::MatchResult;

/// Receives the outcome of every dispatched navigation.
///
/// Both methods default to no-ops so observers implement only what they need.
pub trait RouterObserver {
    /// Called after the matched action ran and the path was recorded.
    fn route_matched(&self, _result: &MatchResult) {}

    /// Called when no route matched `path`.
    fn route_not_found(&self, _path: &str) {}
}

/// Handle returned by [`Router::observe`](crate::Router::observe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// A navigation outcome, for closure-based observers.
#[derive(Debug, Clone, Copy)]
pub enum RouterEvent<'a> {
    /// A route matched.
    Matched(&'a MatchResult),
    /// Nothing matched the path.
    NotFound(&'a str),
}

/// Adapts a closure over [`RouterEvent`] into a [`RouterObserver`].
///
/// ```ignore
/// router.observe(FnObserver(|event: RouterEvent<'_>| {
///     if let RouterEvent::NotFound(path) = event {
///         show_404(path);
///     }
/// }));
/// ```
pub struct FnObserver<F>(pub F);

impl<F> RouterObserver for FnObserver<F>
where
    F: Fn(RouterEvent<'_>),
{
    fn route_matched(&self, result: &MatchResult) {
        (self.0)(RouterEvent::Matched(result));
    }

    fn route_not_found(&self, path: &str) {
        (self.0)(RouterEvent::NotFound(path));
    }
}
