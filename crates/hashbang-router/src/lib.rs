//! # hashbang-router
//!
//! A single-page navigation router driven by the address fragment.
//!
//! This crate provides:
//! - Route patterns with static, parameter and trailing regex tokens
//! - First-match-wins resolution in registration order
//! - A pluggable location abstraction with change notifications
//! - Navigation history with `back` and a root fallback
//! - `#!/path?query` link generation
//! - A callback-style legacy controller
//!
//! ## Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use hashbang_router::{MemoryLocation, Router};
//!
//! let router = Router::new(Rc::new(MemoryLocation::new()));
//!
//! router.add_route("", |_, _| println!("home")).unwrap();
//! router.add_route("users/#id", |params, _| println!("user {}", params[0])).unwrap();
//! router.add_route("docs/.*", |_, _| println!("docs")).unwrap();
//!
//! router.start();
//! router.redirect_to("users/42", None);
//! router.back(None);
//! assert_eq!(router.current_path(), "");
//! ```
//!
//! ## Pattern Syntax
//!
//! Tokens are separated by `/`:
//!
//! | token | matches |
//! |-------|---------|
//! | `users` | exactly `users` |
//! | `#id` | one non-empty token, bound to `id` |
//! | `.*` (last token only) | the rest of the path, zero or more tokens |
//!
//! A token is read as a regex fragment when it contains a quantifier,
//! group, class, alternation, anchor or escape. A plain `.` does not count,
//! so `file.txt` stays static.
//!
//! ## Precedence
//!
//! Routes are tested in the order they were added and the first one that
//! matches wins. Register `users/new` before `users/#id`.
//!
//! ## Observing Navigation
//!
//! ```
//! use std::rc::Rc;
//! use hashbang_router::{FnObserver, MemoryLocation, Router, RouterEvent};
//!
//! let router = Router::new(Rc::new(MemoryLocation::new()));
//! router.observe(FnObserver(|event: RouterEvent<'_>| {
//!     if let RouterEvent::NotFound(path) = event {
//!         println!("404: {path}");
//!     }
//! }));
//! router.start();
//! ```

mod config;
mod error;
mod history;
mod legacy;
mod location;
mod matcher;
mod observer;
mod pattern;
pub mod query;
mod router;
mod segment;
mod table;

pub use config::{RouterConfig, DEFAULT_LINK_PREFIX, DEFAULT_PARAMETER_MARKER};
pub use error::{PatternErrorKind, Result, RouterError};
pub use history::HistoryStack;
pub use legacy::{Controller, LegacyEvent, LegacyRequest};
pub use location::{ChangeListener, FakeLocation, LocationAdapter, MemoryLocation, SubscriptionId};
pub use matcher::{match_path, match_pattern, MatchResult};
pub use observer::{FnObserver, ObserverId, RouterEvent, RouterObserver};
pub use pattern::{compile, CompiledPattern, PatternCompiler};
pub use query::Query;
pub use router::{Router, WeakRouter};
pub use segment::{Segment, WildcardTail};
pub use table::{Action, CompiledRoute, RouteId, RouteTable};
