//! Main router implementation.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::history::HistoryStack;
use crate::location::{LocationAdapter, SubscriptionId};
use crate::matcher::{match_path, MatchResult};
use crate::observer::{ObserverId, RouterObserver};
use crate::pattern::PatternCompiler;
use crate::query::{join_fragment, Query};
use crate::table::{Action, RouteId, RouteTable};

/// The navigation router.
///
/// `Router` is a cheap handle over shared single-threaded state: clone it
/// into actions that need to navigate, or use [`Router::downgrade`] to
/// avoid a reference cycle through the route table.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use hashbang_router::{MemoryLocation, LocationAdapter, Router};
///
/// let location = Rc::new(MemoryLocation::new());
/// let router = Router::new(location.clone());
///
/// router.add_route("users/#id", |params, _query| {
///     assert_eq!(params, ["42"]);
/// }).unwrap();
///
/// router.start();
/// router.redirect_to("users/42", None);
/// assert_eq!(location.path(), "users/42");
/// assert_eq!(router.get_parameter("id").as_deref(), Some("42"));
/// assert_eq!(router.link_to("users/7", None), "#!/users/7");
/// ```
#[derive(Clone)]
pub struct Router {
    inner: Rc<Inner>,
}

/// A non-owning router handle.
#[derive(Clone)]
pub struct WeakRouter {
    inner: Weak<Inner>,
}

impl WeakRouter {
    /// Returns the router if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Router> {
        self.inner.upgrade().map(|inner| Router { inner })
    }
}

struct Inner {
    config: RouterConfig,
    compiler: PatternCompiler,
    location: Rc<dyn LocationAdapter>,
    table: RefCell<RouteTable>,
    last_match: RefCell<Option<MatchResult>>,
    history: RefCell<HistoryStack>,
    observers: RefCell<Vec<(ObserverId, Rc<dyn RouterObserver>)>>,
    next_observer: Cell<u64>,
    started: Cell<bool>,
    subscription: Cell<Option<SubscriptionId>>,
    pending: RefCell<VecDeque<String>>,
    dispatching: Cell<bool>,
}

impl Router {
    /// Creates a stopped router over `location` with the default config.
    pub fn new(location: Rc<dyn LocationAdapter>) -> Self {
        Self::build(location, RouterConfig::default())
    }

    /// Creates a stopped router with custom settings.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Config`] if the config does not validate.
    pub fn with_config(location: Rc<dyn LocationAdapter>, config: RouterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(location, config))
    }

    fn build(location: Rc<dyn LocationAdapter>, config: RouterConfig) -> Self {
        let history = config
            .history_limit
            .map_or_else(HistoryStack::new, HistoryStack::with_limit);
        Self {
            inner: Rc::new(Inner {
                compiler: PatternCompiler::new(config.parameter_marker),
                config,
                location,
                table: RefCell::new(RouteTable::new()),
                last_match: RefCell::new(None),
                history: RefCell::new(history),
                observers: RefCell::new(Vec::new()),
                next_observer: Cell::new(0),
                started: Cell::new(false),
                subscription: Cell::new(None),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Returns a non-owning handle, for capture inside actions.
    #[must_use]
    pub fn downgrade(&self) -> WeakRouter {
        WeakRouter {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    /// Compiles `pattern` and appends it to the route table.
    ///
    /// The action receives parameter values in declaration order, then the
    /// query. The current path is not re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] for a malformed pattern; the
    /// table is left unchanged.
    pub fn add_route<F>(&self, pattern: &str, action: F) -> Result<RouteId>
    where
        F: Fn(&[String], &Query) + 'static,
    {
        let action: Action = Rc::new(action);
        let id = self
            .inner
            .table
            .borrow_mut()
            .add(self.inner.compiler, pattern, action)?;
        debug!(%id, pattern, "route added");
        Ok(id)
    }

    /// Returns `(id, pattern)` for every route, in precedence order.
    #[must_use]
    pub fn routes(&self) -> Vec<(RouteId, String)> {
        self.inner
            .table
            .borrow()
            .iter()
            .map(|route| (route.id(), route.pattern().to_string()))
            .collect()
    }

    /// Subscribes to the location and evaluates the current path.
    ///
    /// Calling `start` on a started router does nothing.
    pub fn start(&self) {
        if self.inner.started.replace(true) {
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        let id = self.inner.location.subscribe(Rc::new(move |path: &str| {
            if let Some(inner) = weak.upgrade() {
                inner.on_location_change(path);
            }
        }));
        self.inner.subscription.set(Some(id));

        let path = self.inner.location.path();
        debug!(path = %path, "router started");
        self.inner.enqueue(path);
    }

    /// Unsubscribes from the location and drops queued navigations.
    ///
    /// Safe to call from inside an action; calling it twice does nothing.
    pub fn stop(&self) {
        if !self.inner.started.replace(false) {
            return;
        }
        if let Some(id) = self.inner.subscription.take() {
            self.inner.location.unsubscribe(id);
        }

        let dropped = std::mem::take(&mut *self.inner.pending.borrow_mut());
        if !dropped.is_empty() {
            warn!(count = dropped.len(), "router stopped with queued navigations");
        }
        debug!("router stopped");
    }

    /// Returns true between `start` and `stop`.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.inner.started.get()
    }

    /// Evaluates `fragment` against the route table right away, whether or
    /// not the router is started.
    ///
    /// Called from inside an action, the navigation runs after that action
    /// completes.
    pub fn navigate(&self, fragment: &str) {
        self.inner.enqueue(fragment.trim_start_matches('/').to_string());
    }

    /// Navigates to `path` with an optional query.
    pub fn redirect_to(&self, path: &str, query: Option<&Query>) {
        let fragment = query.map_or_else(
            || path.trim_start_matches('/').to_string(),
            |query| join_fragment(path, query),
        );
        self.inner.go(fragment);
    }

    /// Navigates to `path` without a query.
    pub fn redirect_to_path(&self, path: &str) {
        self.redirect_to(path, None);
    }

    /// Navigates to an already formatted URL such as `#!/a?x=1`.
    pub fn redirect_to_url(&self, url: &str) {
        self.inner.go(self.strip_url(url).to_string());
    }

    /// Navigates to a dynamically typed path.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PathType`] unless `path` is a JSON string.
    pub fn redirect_to_value(&self, path: &Value, query: Option<&Query>) -> Result<()> {
        match path {
            Value::String(path) => {
                self.redirect_to(path, query);
                Ok(())
            }
            other => Err(RouterError::PathType {
                found: json_type_name(other),
            }),
        }
    }

    /// Formats the navigable link for `path` without navigating.
    ///
    /// `link_to("", None)` is the root link, `#!/`.
    #[must_use]
    pub fn link_to(&self, path: &str, query: Option<&Query>) -> String {
        let fragment = query.map_or_else(
            || path.trim_start_matches('/').to_string(),
            |query| join_fragment(path, query),
        );
        format!("{}{fragment}", self.inner.config.link_prefix)
    }

    /// Same as [`Router::link_to`].
    #[must_use]
    pub fn link_to_path(&self, path: &str, query: Option<&Query>) -> String {
        self.link_to(path, query)
    }

    /// Re-formats an existing URL (`#/a`, `/a`, `#!/a`) as a navigable link.
    #[must_use]
    pub fn link_to_url(&self, url: &str) -> String {
        format!("{}{}", self.inner.config.link_prefix, self.strip_url(url))
    }

    fn strip_url<'a>(&self, url: &'a str) -> &'a str {
        let rest = url
            .strip_prefix(self.inner.config.link_prefix.as_str())
            .or_else(|| url.strip_prefix("#!"))
            .or_else(|| url.strip_prefix('#'))
            .unwrap_or(url);
        rest.trim_start_matches('/')
    }

    /// Returns a named path parameter of the last match, falling back to
    /// its query.
    #[must_use]
    pub fn get_parameter(&self, name: &str) -> Option<String> {
        let last = self.inner.last_match.borrow();
        let result = last.as_ref()?;
        result
            .parameter(name)
            .or_else(|| result.query.get(name).map(String::as_str))
            .map(str::to_string)
    }

    /// Returns the named path parameters of the last match, in declaration
    /// order.
    #[must_use]
    pub fn get_parameters(&self) -> Vec<(String, String)> {
        self.inner
            .last_match
            .borrow()
            .as_ref()
            .map(|result| {
                result
                    .parameters()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the query of the last match.
    #[must_use]
    pub fn query(&self) -> Query {
        self.inner
            .last_match
            .borrow()
            .as_ref()
            .map(|result| result.query.clone())
            .unwrap_or_default()
    }

    /// Merges `query` into the last match's query and navigates there.
    ///
    /// Does nothing before the first match.
    pub fn set_parameters(&self, query: &Query) {
        let Some((path, mut merged)) = self
            .inner
            .last_match
            .borrow()
            .as_ref()
            .map(|result| (result.path.clone(), result.query.clone()))
        else {
            return;
        };
        merged.extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.redirect_to(&path, Some(&merged));
    }

    /// Returns the last successful match, if the last navigation matched.
    #[must_use]
    pub fn last_match(&self) -> Option<MatchResult> {
        self.inner.last_match.borrow().clone()
    }

    /// Returns the location's current path.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.inner.location.path()
    }

    /// Navigates to the previous history entry.
    ///
    /// At the root this navigates to `fallback`, or the root path. Returns
    /// the fragment navigated to.
    pub fn back(&self, fallback: Option<&str>) -> String {
        let target = self.inner.history.borrow_mut().back(fallback);
        debug!(to = %target, "navigating back");
        self.inner.go(target.clone());
        target
    }

    /// Returns the recorded history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.inner
            .history
            .borrow()
            .entries()
            .map(str::to_string)
            .collect()
    }

    /// Registers a navigation observer.
    pub fn observe(&self, observer: impl RouterObserver + 'static) -> ObserverId {
        let id = ObserverId(self.inner.next_observer.get());
        self.inner.next_observer.set(id.0 + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));
        id
    }

    /// Removes an observer. Unknown ids are ignored.
    pub fn unobserve(&self, id: ObserverId) {
        self.inner.observers.borrow_mut().retain(|(oid, _)| *oid != id);
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.inner.config)
            .field("routes", &self.inner.table.borrow().len())
            .field("started", &self.inner.started.get())
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn on_location_change(&self, path: &str) {
        if self.started.get() {
            self.enqueue(path.to_string());
        }
    }

    /// Asks the location to navigate. Fake locations never notify, so the
    /// router dispatches itself while started.
    fn go(&self, fragment: String) {
        self.location.set_path(&fragment);
        if self.location.is_fake() && self.started.get() {
            self.enqueue(fragment);
        }
    }

    /// Queues a navigation and drains the queue unless a dispatch is
    /// already running further up the stack.
    fn enqueue(&self, fragment: String) {
        self.pending.borrow_mut().push_back(fragment);
        if self.dispatching.get() {
            trace!("navigation queued behind running dispatch");
            return;
        }

        let _guard = DispatchGuard::enter(&self.dispatching);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(fragment) = next else { break };
            self.dispatch(&fragment);
        }
    }

    fn dispatch(&self, fragment: &str) {
        let result = match_path(&self.table.borrow(), fragment);

        let Some(result) = result else {
            debug!(path = fragment, "route not found");
            *self.last_match.borrow_mut() = None;
            for observer in self.observer_snapshot() {
                observer.route_not_found(fragment);
            }
            return;
        };

        debug!(
            pattern = result.route.pattern(),
            path = %result.path,
            "route matched"
        );
        *self.last_match.borrow_mut() = Some(result.clone());
        result.route.invoke(&result.parameter_values, &result.query);
        self.history.borrow_mut().push(result.fragment());
        for observer in self.observer_snapshot() {
            observer.route_matched(&result);
        }
    }

    fn observer_snapshot(&self) -> Vec<Rc<dyn RouterObserver>> {
        self.observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect()
    }
}

/// Clears the dispatching flag even if an action panics.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
