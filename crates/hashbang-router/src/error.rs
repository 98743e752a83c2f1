//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
///
/// An unmatched path is not an error: it is reported through
/// [`RouterObserver::route_not_found`](crate::RouterObserver::route_not_found).
#[derive(Debug, Error)]
pub enum RouterError {
    /// A route pattern could not be compiled.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: PatternErrorKind,
    },

    /// Navigation was requested with something other than a string path.
    #[error("navigation path must be a string, got {found}")]
    PathType { found: &'static str },

    /// A configuration value cannot be honoured.
    #[error("invalid router configuration: {0}")]
    Config(String),
}

/// Why a pattern was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternErrorKind {
    /// A wildcard token appeared before the last position.
    #[error("wildcard at token {position} must be the last token")]
    WildcardNotLast { position: usize },

    /// Two parameter tokens share a name.
    #[error("parameter `{name}` is declared more than once")]
    DuplicateParameter { name: String },

    /// A parameter marker with nothing after it.
    #[error("parameter at token {position} has no name")]
    EmptyParameterName { position: usize },

    /// The trailing regex fragment does not compile.
    #[error("wildcard `{fragment}` is not a valid regex: {message}")]
    InvalidWildcard { fragment: String, message: String },
}

impl RouterError {
    pub(crate) fn pattern(pattern: &str, reason: PatternErrorKind) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
