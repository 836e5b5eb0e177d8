//! Formatter configuration.

use crate::error::OptionsError;

/// Rendering options for [`StorageFormatter`](crate::StorageFormatter).
#[derive(Clone, Debug)]
pub struct FormatterOptions {
    tag_rendering: bool,
    jira_parsing: bool,
    jira_server: Option<String>,
}

impl FormatterOptions {
    /// Options with tag callouts on or off and no Jira integration.
    #[must_use]
    pub fn new(tag_rendering: bool) -> Self {
        Self {
            tag_rendering,
            jira_parsing: false,
            jira_server: None,
        }
    }

    /// Options with Jira issue extraction against `server`.
    ///
    /// A configured server implies tag rendering.
    #[must_use]
    pub fn with_jira_server(server: impl Into<String>) -> Self {
        Self {
            tag_rendering: true,
            jira_parsing: true,
            jira_server: Some(server.into()),
        }
    }

    /// Build options from the two driver flags.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::TagsDisabledWithJiraServer`] when
    /// `ignore_tags` is combined with a Jira server.
    pub fn from_flags(
        ignore_tags: bool,
        jira_server: Option<String>,
    ) -> Result<Self, OptionsError> {
        match jira_server {
            Some(_) if ignore_tags => Err(OptionsError::TagsDisabledWithJiraServer),
            Some(server) => Ok(Self::with_jira_server(server)),
            None => Ok(Self::new(!ignore_tags)),
        }
    }

    /// Toggle Jira issue extraction without supplying a server.
    ///
    /// A formatter configured this way with no server suppresses tag
    /// output entirely instead of failing. Long-standing behavior, kept
    /// as-is; [`from_flags`](Self::from_flags) is the strict path.
    #[must_use]
    pub fn with_jira_parsing(mut self, enabled: bool) -> Self {
        self.jira_parsing = enabled;
        self
    }

    /// Whether tag callouts are rendered at all.
    #[must_use]
    pub fn tag_rendering_enabled(&self) -> bool {
        self.tag_rendering
    }

    /// Whether issue references are extracted from tag lists.
    #[must_use]
    pub fn jira_parsing_enabled(&self) -> bool {
        self.jira_parsing
    }

    /// Configured Jira server URL, if any.
    #[must_use]
    pub fn jira_server(&self) -> Option<&str> {
        self.jira_server.as_deref()
    }
}

impl Default for FormatterOptions {
    /// Tag rendering on, no Jira integration.
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_path_leaves_jira_off() {
        let options = FormatterOptions::new(true);
        assert!(options.tag_rendering_enabled());
        assert!(!options.jira_parsing_enabled());
        assert_eq!(options.jira_server(), None);
    }

    #[test]
    fn test_server_path_implies_tag_rendering() {
        let options = FormatterOptions::with_jira_server("https://jira.example.com");
        assert!(options.tag_rendering_enabled());
        assert!(options.jira_parsing_enabled());
        assert_eq!(options.jira_server(), Some("https://jira.example.com"));
    }

    #[test]
    fn test_from_flags_rejects_conflicting_combination() {
        let result = FormatterOptions::from_flags(true, Some("https://jira.example.com".to_owned()));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_flags_ignore_tags_only() {
        let options = FormatterOptions::from_flags(true, None).unwrap();
        assert!(!options.tag_rendering_enabled());
        assert!(!options.jira_parsing_enabled());
    }

    #[test]
    fn test_from_flags_server_only() {
        let options =
            FormatterOptions::from_flags(false, Some("https://jira.example.com".to_owned()))
                .unwrap();
        assert!(options.jira_parsing_enabled());
    }
}
