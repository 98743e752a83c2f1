//! The ordered route table.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::pattern::{CompiledPattern, PatternCompiler};
use crate::query::Query;

/// A route action: positional parameter values, then the query.
pub type Action = Rc<dyn Fn(&[String], &Query)>;

/// Identifies a route by its registration position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(usize);

impl RouteId {
    /// Returns the registration index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

/// A compiled pattern bound to its action.
pub struct CompiledRoute {
    id: RouteId,
    pattern: CompiledPattern,
    action: Action,
}

impl CompiledRoute {
    /// Returns the route id.
    #[must_use]
    pub const fn id(&self) -> RouteId {
        self.id
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub const fn compiled(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Returns the original pattern string.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.pattern()
    }

    /// Returns the parameter names in declaration order.
    #[must_use]
    pub fn parameter_names(&self) -> &[String] {
        self.pattern.parameter_names()
    }

    /// Runs the bound action.
    pub fn invoke(&self, values: &[String], query: &Query) {
        (self.action)(values, query);
    }
}

impl fmt::Debug for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRoute")
            .field("id", &self.id)
            .field("pattern", &self.pattern.pattern())
            .finish_non_exhaustive()
    }
}

/// Routes in registration order. Earlier routes take precedence.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Rc<CompiledRoute>>,
}

impl RouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `pattern` and appends it with `action`.
    ///
    /// The table is untouched when compilation fails.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`](crate::RouterError::InvalidPattern)
    /// for a malformed pattern.
    pub fn add(&mut self, compiler: PatternCompiler, pattern: &str, action: Action) -> Result<RouteId> {
        let pattern = compiler.compile(pattern)?;
        let id = RouteId(self.routes.len());
        self.routes.push(Rc::new(CompiledRoute {
            id,
            pattern,
            action,
        }));
        Ok(id)
    }

    /// Returns the route with the given id.
    #[must_use]
    pub fn get(&self, id: RouteId) -> Option<&Rc<CompiledRoute>> {
        self.routes.get(id.0)
    }

    /// Returns an iterator over routes in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<CompiledRoute>> {
        self.routes.iter()
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
