//! Router configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouterError};

/// The default character introducing a parameter token.
pub const DEFAULT_PARAMETER_MARKER: char = '#';

/// The default prefix of navigable links.
pub const DEFAULT_LINK_PREFIX: &str = "#!/";

/// Router settings.
///
/// Every field has a default, so a partial JSON object deserializes:
///
/// ```
/// use hashbang_router::RouterConfig;
///
/// let config: RouterConfig = serde_json::from_str(r#"{"history_limit": 50}"#).unwrap();
/// assert_eq!(config.link_prefix, "#!/");
/// assert_eq!(config.history_limit, Some(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Leading character of parameter tokens in patterns.
    pub parameter_marker: char,
    /// Prefix of generated links, stripped again from incoming URLs.
    pub link_prefix: String,
    /// Maximum number of history entries kept; unbounded when `None`.
    pub history_limit: Option<usize>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            parameter_marker: DEFAULT_PARAMETER_MARKER,
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            history_limit: None,
        }
    }
}

impl RouterConfig {
    /// Sets the parameter marker.
    #[must_use]
    pub const fn parameter_marker(mut self, marker: char) -> Self {
        self.parameter_marker = marker;
        self
    }

    /// Sets the link prefix.
    #[must_use]
    pub fn link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = prefix.into();
        self
    }

    /// Bounds the history stack.
    #[must_use]
    pub const fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Checks that the settings can be honoured.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Config`] for an empty link prefix, a zero
    /// history limit, or a parameter marker that could be part of a
    /// static token or a separator.
    pub fn validate(&self) -> Result<()> {
        if self.link_prefix.is_empty() {
            return Err(RouterError::Config("link_prefix must not be empty".into()));
        }
        if self.parameter_marker.is_alphanumeric() || self.parameter_marker == '/' {
            return Err(RouterError::Config(format!(
                "parameter_marker `{}` is not usable",
                self.parameter_marker
            )));
        }
        if self.history_limit == Some(0) {
            return Err(RouterError::Config(
                "history_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RouterConfig::default();
        assert_eq!(config.parameter_marker, '#');
        assert_eq!(config.link_prefix, "#!/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(RouterConfig::default().link_prefix("").validate().is_err());
        assert!(RouterConfig::default().parameter_marker('a').validate().is_err());
        assert!(RouterConfig::default().parameter_marker('/').validate().is_err());
        assert!(RouterConfig::default().history_limit(0).validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: RouterConfig = serde_json::from_str(r#"{"parameter_marker": ":"}"#).unwrap();
        assert_eq!(config.parameter_marker, ':');
        assert_eq!(config.history_limit, None);
    }
}
