//! Compiled pattern segments.

use std::fmt;

use regex::Regex;

/// A segment in a compiled route pattern.
#[derive(Debug, Clone)]
pub enum Segment {
    /// A literal token, compared by exact (case-sensitive) equality.
    Static(String),
    /// A named parameter, matching one non-empty token.
    Parameter(String),
    /// A trailing regex fragment matching the remainder of the path.
    Wildcard(WildcardTail),
}

impl Segment {
    /// Returns true if this segment is a trailing wildcard.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }

    /// Tests a single path token against a static or parameter segment.
    ///
    /// Always false for wildcards, which consume whole remainders instead.
    #[must_use]
    pub fn matches_token(&self, token: &str) -> bool {
        match self {
            Self::Static(literal) => literal == token,
            Self::Parameter(_) => !token.is_empty(),
            Self::Wildcard(_) => false,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(literal) => f.write_str(literal),
            Self::Parameter(name) => write!(f, "#{name}"),
            Self::Wildcard(tail) => f.write_str(tail.raw()),
        }
    }
}

/// The raw fragment of a wildcard segment together with its anchored regex.
#[derive(Debug, Clone)]
pub struct WildcardTail {
    raw: String,
    regex: Regex,
}

impl WildcardTail {
    /// Compiles a raw fragment, anchoring it so it must cover the whole remainder.
    pub(crate) fn new(raw: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{raw})$"))?;
        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    /// Returns the fragment as written in the pattern.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Tests the joined remainder of a path (possibly empty).
    #[must_use]
    pub fn matches(&self, remainder: &str) -> bool {
        self.regex.is_match(remainder)
    }
}

/// Returns true if a pattern token should be read as a regex fragment.
///
/// A `.` alone is not enough (`file.txt` stays static); the token needs a
/// quantifier, group, class, alternation, anchor or escape.
pub(crate) fn looks_like_regex(token: &str) -> bool {
    token
        .chars()
        .any(|c| matches!(c, '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '\\'))
}
