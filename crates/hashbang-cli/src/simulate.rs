//! Navigation script execution.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use tracing::info;

use hashbang_router::{FnObserver, MemoryLocation, RouterEvent};

use crate::routes::RoutesFile;

/// One step of a navigation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Navigate to a fragment.
    Go(String),
    /// Go back, optionally with a fallback.
    Back(Option<String>),
}

impl Step {
    /// Parses `back`, `back:<fallback>` or a plain fragment.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "back" => Self::Back(None),
            _ => raw.strip_prefix("back:").map_or_else(
                || Self::Go(raw.to_string()),
                |fallback| Self::Back(Some(fallback.to_string())),
            ),
        }
    }
}

/// Result of running a script.
#[derive(Debug, Default)]
pub struct Transcript {
    /// One line per dispatch.
    pub lines: Vec<String>,
    /// Final history, oldest first.
    pub history: Vec<String>,
    /// Final location path.
    pub location: String,
}

/// Runs `steps` against a fresh memory location.
pub fn run(routes: &RoutesFile, steps: &[Step]) -> Result<Transcript> {
    let lines = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&lines);
    let router = routes.build_router(Rc::new(MemoryLocation::new()), move |pattern, values| {
        sink.borrow_mut()
            .push(format!("action {pattern} {values:?}"));
    })?;

    let sink = Rc::clone(&lines);
    router.observe(FnObserver(move |event: RouterEvent<'_>| {
        let line = match event {
            RouterEvent::Matched(result) => format!("matched /{}", result.fragment()),
            RouterEvent::NotFound(path) => format!("not found /{path}"),
        };
        sink.borrow_mut().push(line);
    }));

    router.start();
    for step in steps {
        match step {
            Step::Go(fragment) => {
                info!(fragment = %fragment, "go");
                router.redirect_to_url(fragment);
            }
            Step::Back(fallback) => {
                let target = router.back(fallback.as_deref());
                info!(to = %target, "back");
            }
        }
    }

    let lines = lines.borrow().clone();
    Ok(Transcript {
        lines,
        history: router.history(),
        location: router.current_path(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbang_router::RouterConfig;

    fn routes(patterns: &[&str]) -> RoutesFile {
        RoutesFile {
            config: RouterConfig::default(),
            routes: patterns.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_step_parsing() {
        assert_eq!(Step::parse("back"), Step::Back(None));
        assert_eq!(Step::parse("back:home"), Step::Back(Some("home".into())));
        assert_eq!(Step::parse("users/1"), Step::Go("users/1".into()));
    }

    #[test]
    fn test_run_script() {
        let steps: Vec<Step> = ["a", "b", "back", "back", "back:x"]
            .into_iter()
            .map(Step::parse)
            .collect();
        let transcript = run(&routes(&["", "#page"]), &steps).unwrap();

        assert_eq!(transcript.location, "x");
        assert_eq!(transcript.history, ["x"]);
        assert_eq!(transcript.lines[0], "action  []");
        assert!(transcript.lines.contains(&"matched /b".to_string()));
    }

    #[test]
    fn test_not_found_is_reported() {
        let transcript = run(&routes(&["home"]), &[Step::parse("nowhere")]).unwrap();
        assert_eq!(transcript.lines, ["not found /", "not found /nowhere"]);
        assert!(transcript.history.is_empty());
    }
}
