//! First-match-wins path resolution.

use std::rc::Rc;

use tracing::trace;

use crate::pattern::CompiledPattern;
use crate::query::{split_fragment, Query};
use crate::segment::Segment;
use crate::table::{CompiledRoute, RouteTable};

/// The outcome of a successful match.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// The matched route.
    pub route: Rc<CompiledRoute>,
    /// The matched path, without query.
    pub path: String,
    /// Parameter values aligned with `route.parameter_names()`.
    pub parameter_values: Vec<String>,
    /// Query parameters from the navigated fragment.
    pub query: Query,
}

impl MatchResult {
    /// Returns the value bound to a named parameter.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.route
            .parameter_names()
            .iter()
            .position(|n| n == name)
            .map(|i| self.parameter_values[i].as_str())
    }

    /// Returns `(name, value)` pairs in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.route
            .parameter_names()
            .iter()
            .map(String::as_str)
            .zip(self.parameter_values.iter().map(String::as_str))
    }

    /// Returns the path and query in fragment form.
    #[must_use]
    pub fn fragment(&self) -> String {
        crate::query::join_fragment(&self.path, &self.query)
    }
}

/// Tests a path against one pattern, returning parameter values on success.
///
/// Without a trailing wildcard the token counts must be equal; a wildcard
/// consumes every remaining token, including none.
#[must_use]
pub fn match_pattern(pattern: &CompiledPattern, path: &str) -> Option<Vec<String>> {
    let tokens: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    let segments = pattern.segments();

    let fixed = if pattern.has_wildcard() {
        segments.len() - 1
    } else {
        segments.len()
    };
    if tokens.len() < fixed || (!pattern.has_wildcard() && tokens.len() != fixed) {
        return None;
    }

    let mut values = Vec::with_capacity(pattern.parameter_names().len());
    for (segment, token) in segments[..fixed].iter().zip(&tokens) {
        if !segment.matches_token(token) {
            return None;
        }
        if let Segment::Parameter(_) = segment {
            values.push((*token).to_string());
        }
    }

    if let Some(Segment::Wildcard(tail)) = segments.last() {
        let remainder = tokens[fixed..].join("/");
        if !tail.matches(&remainder) {
            return None;
        }
    }

    Some(values)
}

/// Resolves a fragment against the table.
///
/// Routes are tested in registration order and the first structural match
/// wins, so specific patterns must be registered before general ones.
/// A query suffix (`?a=1`) is split off and returned in the result.
#[must_use]
pub fn match_path(table: &RouteTable, fragment: &str) -> Option<MatchResult> {
    let (path, query) = split_fragment(fragment);

    for route in table.iter() {
        trace!(pattern = route.pattern(), path, "testing route");
        if let Some(parameter_values) = match_pattern(route.compiled(), path) {
            return Some(MatchResult {
                route: Rc::clone(route),
                path: path.to_string(),
                parameter_values,
                query,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{compile, PatternCompiler};
    use crate::table::Action;

    fn build_table(patterns: &[&str]) -> RouteTable {
        let mut table = RouteTable::new();
        for pattern in patterns {
            let action: Action = Rc::new(|_: &[String], _: &Query| {});
            table.add(PatternCompiler::default(), pattern, action).unwrap();
        }
        table
    }

    #[test]
    fn test_literal_path() {
        let pattern = compile("users").unwrap();
        assert!(match_pattern(&pattern, "users").is_some());
        assert!(match_pattern(&pattern, "/users").is_some());
        assert!(match_pattern(&pattern, "users/").is_none());
        assert!(match_pattern(&pattern, "posts").is_none());
    }

    #[test]
    fn test_multiple_params() {
        let pattern = compile("some/#value/#anothervalue").unwrap();
        let values = match_pattern(&pattern, "some/thing/thing2").unwrap();
        assert_eq!(values, ["thing", "thing2"]);
    }

    #[test]
    fn test_param_requires_token() {
        let pattern = compile("users/#id").unwrap();
        assert!(match_pattern(&pattern, "users/").is_none());
        assert!(match_pattern(&pattern, "users").is_none());
        assert!(match_pattern(&pattern, "users/1/2").is_none());
    }

    #[test]
    fn test_wildcard_remainder() {
        let pattern = compile("any/.*").unwrap();
        assert!(match_pattern(&pattern, "any/thing").is_some());
        assert!(match_pattern(&pattern, "any/x/y/z").is_some());
        assert!(match_pattern(&pattern, "any/").is_some());
        assert!(match_pattern(&pattern, "any").is_some());
        assert!(match_pattern(&pattern, "other/thing").is_none());
    }

    #[test]
    fn test_wildcard_regex_is_applied() {
        let pattern = compile("#kind/[0-9]+").unwrap();
        assert_eq!(match_pattern(&pattern, "post/42").unwrap(), ["post"]);
        assert!(match_pattern(&pattern, "post/abc").is_none());
        assert!(match_pattern(&pattern, "post").is_none());
    }

    #[test]
    fn test_root_pattern() {
        let pattern = compile("").unwrap();
        assert!(match_pattern(&pattern, "").is_some());
        assert!(match_pattern(&pattern, "a").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let table = build_table(&["foo", "#x"]);
        let result = match_path(&table, "foo").unwrap();
        assert_eq!(result.route.id().index(), 0);

        let table = build_table(&["#x", "foo"]);
        let result = match_path(&table, "foo").unwrap();
        assert_eq!(result.route.id().index(), 0);
        assert_eq!(result.parameter("x"), Some("foo"));
    }

    #[test]
    fn test_query_split_off() {
        let table = build_table(&["users/#id"]);
        let result = match_path(&table, "users/7?tab=posts").unwrap();
        assert_eq!(result.parameter_values, ["7"]);
        assert_eq!(result.query.get("tab").map(String::as_str), Some("posts"));
        assert_eq!(result.fragment(), "users/7?tab=posts");
    }

    #[test]
    fn test_no_match() {
        let table = build_table(&["a", "b/#id"]);
        assert!(match_path(&table, "c").is_none());
        assert!(match_path(&RouteTable::new(), "").is_none());
    }

    #[test]
    fn test_parameters_in_declaration_order() {
        let table = build_table(&["#b/#a"]);
        let result = match_path(&table, "1/2").unwrap();
        let pairs: Vec<_> = result.parameters().collect();
        assert_eq!(pairs, [("b", "1"), ("a", "2")]);
    }
}
