//! Streaming conversion of Gherkin feature documents to Confluence XHTML
//! storage format.
//!
//! A feature document arrives as an ordered stream of [`DocumentEvent`]s,
//! one per structural unit. The target markup is strictly nested — a
//! section's heading, tags and steps form one committed block — but the
//! stream carries no "section closed" signal: closure is only inferable
//! from the next event that cannot belong to the current section.
//! [`StorageFormatter`] therefore buffers exactly one section at a time and
//! flushes it when a disqualifying event arrives, choosing between an
//! inline heading and a collapsible `expand` region based on what triggered
//! the flush.
//!
//! # Example
//!
//! ```
//! use cuke2conf_formatter::{DocumentEvent, FormatterOptions, StorageFormatter};
//!
//! # fn main() -> Result<(), cuke2conf_formatter::FormatError> {
//! let mut formatter = StorageFormatter::new(FormatterOptions::default());
//! formatter.handle(DocumentEvent::ScenarioStart {
//!     name: "Login".to_owned(),
//!     description: String::new(),
//!     tags: vec!["@smoke".to_owned()],
//! })?;
//! formatter.handle(DocumentEvent::Step {
//!     keyword: "Given".to_owned(),
//!     text: "a registered user".to_owned(),
//!     table: None,
//! })?;
//! formatter.handle(DocumentEvent::EndOfDocument)?;
//!
//! let xhtml = formatter.drain();
//! assert!(xhtml.contains(r#"ac:name="expand""#));
//! # Ok(())
//! # }
//! ```

mod error;
mod event;
mod formatter;
mod macros;
mod markup;
mod options;
mod section;
mod tags;

pub use error::{FormatError, OptionsError};
pub use event::{DocumentEvent, InlineTable};
pub use formatter::StorageFormatter;
pub use macros::{Macro, jira_issue};
pub use markup::{Format, escape_xml};
pub use options::FormatterOptions;
pub use tags::partition;
