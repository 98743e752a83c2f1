//! Callback-style controller API kept for older call sites.
//!
//! Older code registers routes with `controller.on(pattern, callback)` and
//! listens for `Changed`/`Missing` events instead of observing the router
//! directly. [`Controller`] forwards all of that to a [`Router`].

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::error::Result;
use crate::location::MemoryLocation;
use crate::matcher::MatchResult;
use crate::observer::RouterObserver;
use crate::pattern::PatternCompiler;
use crate::query::Query;
use crate::router::Router;
use crate::table::RouteId;

/// What a legacy callback receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRequest {
    /// The registered pattern.
    pub pattern: String,
    /// `(name, value)` pairs in declaration order.
    pub params: Vec<(String, String)>,
    /// Query parameters.
    pub query: Query,
}

/// Legacy notification names for router outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyEvent {
    /// Emitted for every matched navigation.
    Changed { pattern: String, path: String },
    /// Emitted when nothing matched.
    Missing { path: String },
}

type LegacyListener = Rc<dyn Fn(&LegacyEvent)>;

/// The legacy controller.
#[derive(Clone)]
pub struct Controller {
    router: Router,
    listeners: Rc<RefCell<Vec<LegacyListener>>>,
}

thread_local! {
    static SHARED: Controller = Controller::new(Router::new(Rc::new(MemoryLocation::new())));
}

impl Controller {
    /// Wraps `router`, translating its notifications into legacy events.
    #[must_use]
    pub fn new(router: Router) -> Self {
        let listeners: Rc<RefCell<Vec<LegacyListener>>> = Rc::default();
        router.observe(LegacyBridge {
            listeners: Rc::clone(&listeners),
        });
        Self { router, listeners }
    }

    /// Returns the shared controller, creating it on first use.
    ///
    /// The router is single-threaded, so there is one instance per thread.
    /// It starts stopped; the host application calls `start` on it.
    #[must_use]
    pub fn shared() -> Self {
        SHARED.with(Clone::clone)
    }

    /// Returns the underlying router.
    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// Registers `callback` for `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`](crate::RouterError::InvalidPattern)
    /// for a malformed pattern.
    pub fn on<F>(&self, pattern: &str, callback: F) -> Result<RouteId>
    where
        F: Fn(&LegacyRequest) + 'static,
    {
        let owned = pattern.to_string();
        let marker = self.router.config().parameter_marker;
        let compiled = PatternCompiler::new(marker).compile(pattern)?;
        let parameter_names = compiled.parameter_names().to_vec();

        self.router.add_route(pattern, move |values, query| {
            let request = LegacyRequest {
                pattern: owned.clone(),
                params: parameter_names
                    .iter()
                    .cloned()
                    .zip(values.iter().cloned())
                    .collect(),
                query: query.clone(),
            };
            callback(&request);
        })
    }

    /// Registers a listener for legacy events.
    pub fn bind<F>(&self, listener: F)
    where
        F: Fn(&LegacyEvent) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Starts the router.
    pub fn start(&self) {
        self.router.start();
    }

    /// Navigates to a dynamically typed path.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PathType`](crate::RouterError::PathType) when
    /// `path` is not a string.
    pub fn redirect(&self, path: &Value) -> Result<()> {
        self.router.redirect_to_value(path, None)
    }
}

struct LegacyBridge {
    listeners: Rc<RefCell<Vec<LegacyListener>>>,
}

impl LegacyBridge {
    fn emit(&self, event: &LegacyEvent) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(event);
        }
    }
}

impl RouterObserver for LegacyBridge {
    fn route_matched(&self, result: &MatchResult) {
        self.emit(&LegacyEvent::Changed {
            pattern: result.route.pattern().to_string(),
            path: result.path.clone(),
        });
    }

    fn route_not_found(&self, path: &str) {
        self.emit(&LegacyEvent::Missing {
            path: path.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationAdapter;

    #[test]
    fn test_on_delegates_to_router() {
        let location = Rc::new(MemoryLocation::new());
        let controller = Controller::new(Router::new(location.clone()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller
            .on("posts/#slug", move |req| sink.borrow_mut().push(req.clone()))
            .unwrap();
        controller.start();
        location.set_path("posts/hello?ref=home");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].pattern, "posts/#slug");
        assert_eq!(seen[0].params, [("slug".to_string(), "hello".to_string())]);
        assert_eq!(seen[0].query.get("ref").map(String::as_str), Some("home"));
    }

    #[test]
    fn test_events_are_translated() {
        let location = Rc::new(MemoryLocation::new());
        let controller = Controller::new(Router::new(location.clone()));
        controller.on("home", |_| {}).unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        controller.bind(move |event| sink.borrow_mut().push(event.clone()));

        controller.start();
        location.set_path("home");

        assert_eq!(
            *events.borrow(),
            [
                LegacyEvent::Missing {
                    path: String::new()
                },
                LegacyEvent::Changed {
                    pattern: "home".to_string(),
                    path: "home".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_redirect_rejects_non_string() {
        let controller = Controller::new(Router::new(Rc::new(MemoryLocation::new())));
        assert!(controller.redirect(&Value::Null).is_err());
        assert!(controller.redirect(&Value::from("x")).is_ok());
        assert_eq!(controller.router().current_path(), "x");
    }

    #[test]
    fn test_shared_is_a_singleton() {
        let first = Controller::shared();
        let second = Controller::shared();
        assert!(Rc::ptr_eq(&first.listeners, &second.listeners));
    }

    #[test]
    fn test_invalid_pattern_surfaces() {
        let controller = Controller::new(Router::new(Rc::new(MemoryLocation::new())));
        assert!(controller.on(".*/x", |_| {}).is_err());
        assert!(controller.router().routes().is_empty());
    }
}
