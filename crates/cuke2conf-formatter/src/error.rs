//! Formatter error types.

/// Violation of the event-stream protocol.
///
/// Protocol violations are fatal: the stream is malformed and cannot be
/// repaired locally, so no partial document is emitted for it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// A step arrived while no section was open to receive it.
    #[error("step \"{keyword} {text}\" arrived outside of any section")]
    StepOutsideSection {
        /// Step keyword (e.g. "Given").
        keyword: String,
        /// Step text.
        text: String,
    },
}

/// Invalid option combination, rejected at construction time.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OptionsError {
    /// Tag rendering disabled together with a Jira server: the server
    /// implies tag rendering.
    #[error("ignoring tags and parsing Jira issues are mutually exclusive")]
    TagsDisabledWithJiraServer,
}
