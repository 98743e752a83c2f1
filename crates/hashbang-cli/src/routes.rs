//! Routes file loading.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::Deserialize;

use hashbang_router::{LocationAdapter, Router, RouterConfig};

/// Contents of a routes file.
///
/// ```json
/// { "config": { "history_limit": 20 }, "routes": ["", "users/#id", "docs/.*"] }
/// ```
#[derive(Debug, Deserialize)]
pub struct RoutesFile {
    #[serde(default)]
    pub config: RouterConfig,
    pub routes: Vec<String>,
}

impl RoutesFile {
    /// Reads and parses a routes file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read routes file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse routes file {}", path.display()))
    }

    /// Builds a router with every route registered; `on_match` receives the
    /// pattern and positional values of each dispatched action.
    pub fn build_router<F>(&self, location: Rc<dyn LocationAdapter>, on_match: F) -> Result<Router>
    where
        F: Fn(&str, &[String]) + Clone + 'static,
    {
        let router = Router::with_config(location, self.config.clone())?;
        for pattern in &self.routes {
            let owned = pattern.clone();
            let callback = on_match.clone();
            router
                .add_route(pattern, move |values, _query| callback(&owned, values))
                .with_context(|| format!("cannot register route `{pattern}`"))?;
        }
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbang_router::MemoryLocation;
    use std::io::Write;

    #[test]
    fn test_load_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"routes": ["", "users/#id"]}}"#).unwrap();

        let routes = RoutesFile::load(file.path()).unwrap();
        assert_eq!(routes.routes, ["", "users/#id"]);
        assert_eq!(routes.config, RouterConfig::default());
    }

    #[test]
    fn test_invalid_pattern_fails_build() {
        let routes = RoutesFile {
            config: RouterConfig::default(),
            routes: vec!["ok".into(), ".*/bad".into()],
        };
        let err = routes
            .build_router(Rc::new(MemoryLocation::new()), |_, _| {})
            .unwrap_err();
        assert!(err.to_string().contains(".*/bad"));
    }

    #[test]
    fn test_missing_file() {
        assert!(RoutesFile::load(Path::new("/nonexistent/routes.json")).is_err());
    }
}
