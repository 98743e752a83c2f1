//! Route pattern compilation.

use std::collections::HashSet;

use crate::config::DEFAULT_PARAMETER_MARKER;
use crate::error::{PatternErrorKind, Result, RouterError};
use crate::segment::{looks_like_regex, Segment, WildcardTail};

/// A route pattern parsed into segments.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The original pattern string.
    pattern: String,
    /// Parsed segments, in pattern order.
    segments: Vec<Segment>,
    /// Parameter names in declaration order.
    parameter_names: Vec<String>,
}

impl CompiledPattern {
    /// Returns the original pattern string.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the compiled segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the parameter names in declaration order.
    #[must_use]
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// Returns true if the pattern ends with a wildcard.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.segments.last().is_some_and(Segment::is_wildcard)
    }
}

/// Parses route pattern strings into [`CompiledPattern`]s.
///
/// Pattern syntax (tokens separated by `/`):
/// - `users` - static token, matched exactly
/// - `#id` - parameter, matches one token and binds it to `id`
/// - `.*` - trailing regex fragment, matches the rest of the path
///
/// # Example
///
/// ```
/// use hashbang_router::PatternCompiler;
///
/// let compiled = PatternCompiler::default().compile("posts/#id/.*").unwrap();
/// assert_eq!(compiled.parameter_names(), ["id"]);
/// assert!(compiled.has_wildcard());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PatternCompiler {
    marker: char,
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_PARAMETER_MARKER)
    }
}

impl PatternCompiler {
    /// Creates a compiler using `marker` to introduce parameter tokens.
    #[must_use]
    pub const fn new(marker: char) -> Self {
        Self { marker }
    }

    /// Compiles a pattern.
    ///
    /// Leading `/` characters are ignored, so `/users` and `users` are the
    /// same pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] when a wildcard is not the last
    /// token, a parameter name is empty or repeated, or the wildcard fragment
    /// is not a valid regex.
    pub fn compile(&self, pattern: &str) -> Result<CompiledPattern> {
        let tokens: Vec<&str> = pattern.trim_start_matches('/').split('/').collect();
        let last = tokens.len() - 1;

        let mut segments = Vec::with_capacity(tokens.len());
        let mut parameter_names = Vec::new();
        let mut seen = HashSet::new();

        for (position, token) in tokens.into_iter().enumerate() {
            if let Some(name) = token.strip_prefix(self.marker) {
                if name.is_empty() {
                    return Err(RouterError::pattern(
                        pattern,
                        PatternErrorKind::EmptyParameterName { position },
                    ));
                }
                if !seen.insert(name) {
                    return Err(RouterError::pattern(
                        pattern,
                        PatternErrorKind::DuplicateParameter {
                            name: name.to_string(),
                        },
                    ));
                }
                parameter_names.push(name.to_string());
                segments.push(Segment::Parameter(name.to_string()));
            } else if looks_like_regex(token) {
                if position != last {
                    return Err(RouterError::pattern(
                        pattern,
                        PatternErrorKind::WildcardNotLast { position },
                    ));
                }
                let tail = WildcardTail::new(token).map_err(|e| {
                    RouterError::pattern(
                        pattern,
                        PatternErrorKind::InvalidWildcard {
                            fragment: token.to_string(),
                            message: e.to_string(),
                        },
                    )
                })?;
                segments.push(Segment::Wildcard(tail));
            } else {
                segments.push(Segment::Static(token.to_string()));
            }
        }

        Ok(CompiledPattern {
            pattern: pattern.to_string(),
            segments,
            parameter_names,
        })
    }
}

/// Compiles a pattern with the default `#` parameter marker.
///
/// # Errors
///
/// See [`PatternCompiler::compile`].
pub fn compile(pattern: &str) -> Result<CompiledPattern> {
    PatternCompiler::default().compile(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(pattern: &str) -> PatternErrorKind {
        match compile(pattern) {
            Err(RouterError::InvalidPattern { reason, .. }) => reason,
            other => panic!("Expected invalid pattern for {pattern}, got {other:?}"),
        }
    }

    #[test]
    fn test_static_pattern() {
        let compiled = compile("users/list").unwrap();
        assert_eq!(compiled.segments().len(), 2);
        assert!(compiled.parameter_names().is_empty());
        assert!(matches!(&compiled.segments()[0], Segment::Static(s) if s == "users"));
    }

    #[test]
    fn test_parameters_in_declaration_order() {
        let compiled = compile("some/#value/#anothervalue").unwrap();
        assert_eq!(compiled.parameter_names(), ["value", "anothervalue"]);
    }

    #[test]
    fn test_leading_slash_ignored() {
        let compiled = compile("/users/#id").unwrap();
        assert!(matches!(&compiled.segments()[0], Segment::Static(s) if s == "users"));
        assert_eq!(compiled.pattern(), "/users/#id");
    }

    #[test]
    fn test_empty_pattern_is_root() {
        let compiled = compile("").unwrap();
        assert_eq!(compiled.segments().len(), 1);
        assert!(matches!(&compiled.segments()[0], Segment::Static(s) if s.is_empty()));
    }

    #[test]
    fn test_trailing_wildcard() {
        let compiled = compile("any/.*").unwrap();
        assert!(compiled.has_wildcard());
        assert!(compiled.parameter_names().is_empty());
    }

    #[test]
    fn test_wildcard_not_last() {
        assert_eq!(
            reason("any/.*/more"),
            PatternErrorKind::WildcardNotLast { position: 1 }
        );
    }

    #[test]
    fn test_duplicate_parameter() {
        assert_eq!(
            reason("a/#id/b/#id"),
            PatternErrorKind::DuplicateParameter {
                name: "id".to_string()
            }
        );
    }

    #[test]
    fn test_empty_parameter_name() {
        assert_eq!(
            reason("a/#"),
            PatternErrorKind::EmptyParameterName { position: 1 }
        );
    }

    #[test]
    fn test_invalid_wildcard_regex() {
        assert!(matches!(
            reason("files/(.*"),
            PatternErrorKind::InvalidWildcard { .. }
        ));
    }

    #[test]
    fn test_custom_marker() {
        let compiled = PatternCompiler::new(':').compile("users/:id").unwrap();
        assert_eq!(compiled.parameter_names(), ["id"]);
        let literal = PatternCompiler::new(':').compile("users/#id").unwrap();
        assert!(literal.parameter_names().is_empty());
    }
}
