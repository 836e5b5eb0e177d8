//! Macro constructs built on the storage-format primitives.
//!
//! Confluence macros are "rich content" blocks: a named
//! `ac:structured-macro` element carrying optional parameters and a
//! rich-text body.

use std::fmt::Write;

use crate::markup::escape_xml;

/// Body-wrapping macros emitted by the converter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Macro<'a> {
    /// Informational callout, used for tag annotations.
    Info,
    /// Bordered panel, used around nested data tables.
    Panel,
    /// Collapsible region with a visible title.
    Expand {
        /// Title shown on the collapsed control.
        title: &'a str,
    },
}

impl Macro<'_> {
    /// Wrap an already-rendered body in this macro.
    #[must_use]
    pub fn wrap(&self, body: &str) -> String {
        match self {
            Self::Info => structured_macro("info", &[], body),
            Self::Panel => structured_macro("panel", &[], body),
            Self::Expand { title } => structured_macro("expand", &[("title", title)], body),
        }
    }
}

/// Render a Jira issue macro referencing `key` on `server`.
///
/// Parameter-only macro: it carries no rich-text body.
#[must_use]
pub fn jira_issue(server: &str, key: &str) -> String {
    format!(
        concat!(
            r#"<ac:structured-macro ac:name="jira" ac:schema-version="1">"#,
            r#"<ac:parameter ac:name="server">{}</ac:parameter>"#,
            r#"<ac:parameter ac:name="key">{}</ac:parameter>"#,
            "</ac:structured-macro>"
        ),
        escape_xml(server),
        escape_xml(key)
    )
}

/// Emit a structured macro with parameters and a rich-text body.
///
/// Parameter values are escaped; the body is inserted verbatim since it is
/// already-rendered markup.
fn structured_macro(name: &str, params: &[(&str, &str)], body: &str) -> String {
    let mut out = format!(r#"<ac:structured-macro ac:name="{name}" ac:schema-version="1">"#);
    for (param, value) in params {
        let _ = write!(
            out,
            r#"<ac:parameter ac:name="{param}">{}</ac:parameter>"#,
            escape_xml(value)
        );
    }
    out.push_str("<ac:rich-text-body>");
    out.push_str(body);
    out.push_str("</ac:rich-text-body></ac:structured-macro>");
    out
}
