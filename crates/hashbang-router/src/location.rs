//! Location adapters: the boundary between the router and whatever holds
//! the current address fragment.
//!
//! The router only ever reads the path, asks the adapter to navigate, and
//! listens for change notifications. [`MemoryLocation`] is a complete
//! in-process adapter; [`FakeLocation`] is a test double that never
//! notifies.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Callback invoked with the new path after each completed navigation.
pub type ChangeListener = Rc<dyn Fn(&str)>;

/// Handle returned by [`LocationAdapter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The navigable environment seen by the router.
pub trait LocationAdapter {
    /// Returns the current path, without the navigation marker.
    fn path(&self) -> String;

    /// Navigates to `path`, notifying subscribers once navigation completes.
    fn set_path(&self, path: &str);

    /// Registers a listener for completed navigations.
    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId;

    /// Removes a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Returns true for test doubles that never deliver notifications.
    fn is_fake(&self) -> bool {
        false
    }
}

/// An in-memory location that notifies synchronously.
///
/// Every `set_path` notifies, even when the path is unchanged.
#[derive(Default)]
pub struct MemoryLocation {
    path: RefCell<String>,
    listeners: RefCell<Vec<(SubscriptionId, ChangeListener)>>,
    next_id: Cell<u64>,
}

impl MemoryLocation {
    /// Creates a location at the root path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a location at `path` without notifying anyone.
    #[must_use]
    pub fn at(path: &str) -> Self {
        let location = Self::new();
        *location.path.borrow_mut() = strip_leading_slashes(path);
        location
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl LocationAdapter for MemoryLocation {
    fn path(&self) -> String {
        self.path.borrow().clone()
    }

    fn set_path(&self, path: &str) {
        let path = strip_leading_slashes(path);
        *self.path.borrow_mut() = path.clone();

        // Listeners may navigate or (un)subscribe; iterate over a snapshot.
        let listeners: Vec<ChangeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&path);
        }
    }

    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(sid, _)| *sid != id);
    }
}

/// A location double: records navigations, never notifies.
#[derive(Debug, Default)]
pub struct FakeLocation {
    path: RefCell<String>,
    log: RefCell<Vec<String>>,
}

impl FakeLocation {
    /// Creates a fake location at the root path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every path passed to `set_path`, oldest first.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl LocationAdapter for FakeLocation {
    fn path(&self) -> String {
        self.path.borrow().clone()
    }

    fn set_path(&self, path: &str) {
        let path = strip_leading_slashes(path);
        self.log.borrow_mut().push(path.clone());
        *self.path.borrow_mut() = path;
    }

    fn subscribe(&self, _listener: ChangeListener) -> SubscriptionId {
        SubscriptionId(0)
    }

    fn unsubscribe(&self, _id: SubscriptionId) {}

    fn is_fake(&self) -> bool {
        true
    }
}

fn strip_leading_slashes(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}
