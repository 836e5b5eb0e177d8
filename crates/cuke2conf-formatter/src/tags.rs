//! Tag partitioning and rendering.
//!
//! Tags fall into two disjoint groups: Jira issue references (`@ABC-123`)
//! and descriptive tags (everything else). Descriptive tags are listed in
//! one info callout; each issue reference becomes its own Jira macro.

use std::sync::LazyLock;

use regex::Regex;

use crate::macros::{Macro, jira_issue};
use crate::markup::Format;
use crate::options::FormatterOptions;

/// Bare Jira issue key: a project code of at least two capitals, a dash
/// and up to nine digits.
static JIRA_ISSUE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Z][A-Z]+-[0-9]{1,9}$").unwrap());

/// Lead-in sentence of the tag callout.
const CALLOUT_LEAD_IN: &str = " This section is tagged as ";

/// Split `tags` into issue references and descriptive tags.
///
/// Matching is on the bare name (sigil stripped). The partition is total
/// and lossless, and relative order is preserved within each group.
#[must_use]
pub fn partition(tags: &[String]) -> (Vec<&str>, Vec<&str>) {
    let mut issue_refs = Vec::new();
    let mut descriptive = Vec::new();
    for tag in tags {
        if JIRA_ISSUE_KEY.is_match(bare_name(tag)) {
            issue_refs.push(tag.as_str());
        } else {
            descriptive.push(tag.as_str());
        }
    }
    (issue_refs, descriptive)
}

/// Renders tag lists according to the configured options.
pub(crate) struct TagAnnotator<'a> {
    options: &'a FormatterOptions,
}

impl<'a> TagAnnotator<'a> {
    pub(crate) fn new(options: &'a FormatterOptions) -> Self {
        Self { options }
    }

    /// Render the full tag annotation for one section: a callout for the
    /// descriptive tags followed by one Jira macro per issue reference.
    ///
    /// Empty when there are no tags, tag rendering is disabled, or issue
    /// parsing is enabled without a configured server.
    pub(crate) fn render(&self, tags: &[String]) -> String {
        if tags.is_empty() || !self.options.tag_rendering_enabled() {
            return String::new();
        }
        if self.options.jira_parsing_enabled() && self.options.jira_server().is_none() {
            return String::new();
        }

        let (issue_refs, descriptive) = if self.options.jira_parsing_enabled() {
            partition(tags)
        } else {
            (Vec::new(), tags.iter().map(String::as_str).collect())
        };

        let mut out = render_callout(&descriptive);
        if let Some(server) = self.options.jira_server() {
            out.push_str(&render_references(&issue_refs, server));
        }
        out
    }
}

/// One info callout listing the bare tag names, bold-italicized and
/// comma-joined. Empty for an empty list.
fn render_callout(tags: &[&str]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let names = tags
        .iter()
        .map(|tag| Format::Bold.wrap(&Format::Italics.wrap(bare_name(tag))))
        .collect::<Vec<_>>()
        .join(", ");
    Macro::Info.wrap(&format!("{CALLOUT_LEAD_IN}{names}"))
}

/// One Jira macro per issue reference, newline-joined.
fn render_references(issue_refs: &[&str], server: &str) -> String {
    issue_refs
        .iter()
        .map(|tag| jira_issue(server, bare_name(tag)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bare_name(tag: &str) -> &str {
    tag.strip_prefix('@').unwrap_or(tag)
}
