#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use hashbang_router::{FnObserver, MemoryLocation, Query, Router, RouterEvent};

/// One observed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Action {
        pattern: String,
        params: Vec<String>,
        query: Query,
    },
    Matched(String),
    NotFound(String),
}

/// A router over a memory location that records actions and notifications.
pub struct Fixture {
    pub location: Rc<MemoryLocation>,
    pub router: Router,
    pub log: Rc<RefCell<Vec<Dispatch>>>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::at("")
    }

    pub fn at(path: &str) -> Self {
        let location = Rc::new(MemoryLocation::at(path));
        let router = Router::new(location.clone());
        let log: Rc<RefCell<Vec<Dispatch>>> = Rc::default();

        let sink = Rc::clone(&log);
        router.observe(FnObserver(move |event: RouterEvent<'_>| {
            let entry = match event {
                RouterEvent::Matched(result) => Dispatch::Matched(result.path.clone()),
                RouterEvent::NotFound(path) => Dispatch::NotFound(path.to_string()),
            };
            sink.borrow_mut().push(entry);
        }));

        Self {
            location,
            router,
            log,
        }
    }

    /// Adds a route whose action records its arguments.
    pub fn route(&self, pattern: &str) {
        let sink = Rc::clone(&self.log);
        let owned = pattern.to_string();
        self.router
            .add_route(pattern, move |params, query| {
                sink.borrow_mut().push(Dispatch::Action {
                    pattern: owned.clone(),
                    params: params.to_vec(),
                    query: query.clone(),
                });
            })
            .unwrap_or_else(|e| panic!("Failed to add route {pattern}: {e}"));
    }

    /// Patterns of every action run so far.
    pub fn actions(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|d| match d {
                Dispatch::Action { pattern, .. } => Some(pattern.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn not_found(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|d| match d {
                Dispatch::NotFound(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}
