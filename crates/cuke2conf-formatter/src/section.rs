//! Section rendering: one buffered section into one committed markup block.
//!
//! The renderer is pure and stateless. Content is built once; the flush
//! style only decides the wrapper around it — an inline heading or a
//! collapsible region.

use std::sync::LazyLock;

use regex::Regex;

use crate::event::InlineTable;
use crate::macros::Macro;
use crate::markup::{Format, escape_xml};
use crate::options::FormatterOptions;
use crate::tags::TagAnnotator;

/// Newline variants normalized to single spaces in description text.
static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Placeholder title for sections without a name.
const UNDEFINED_SECTION: &str = "Undefined section";

/// Title of a buffered section.
#[derive(Clone, Debug, Default)]
pub(crate) struct SectionTitle {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// One buffered step.
#[derive(Clone, Debug)]
pub(crate) struct BufferedStep {
    pub keyword: String,
    pub text: String,
    pub table: Option<InlineTable>,
}

/// Presentation of a flushed section, determined by the event that
/// triggered the flush.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlushStyle {
    /// Another titled section follows: heading, tags and description
    /// inline, then the steps table.
    Inline,
    /// An example block or the end of the document follows: the steps
    /// table inside a collapsible region titled with the section name.
    Collapsed,
}

/// Renders one section's buffered content into a markup block.
pub(crate) struct SectionRenderer<'a> {
    options: &'a FormatterOptions,
}

impl<'a> SectionRenderer<'a> {
    pub(crate) fn new(options: &'a FormatterOptions) -> Self {
        Self { options }
    }

    /// Render a complete section block in the given style.
    pub(crate) fn render(
        &self,
        title: &SectionTitle,
        steps: &[BufferedStep],
        style: FlushStyle,
    ) -> String {
        let table = render_steps_table(steps);
        match style {
            FlushStyle::Inline => self.wrap_inline(title, &table),
            FlushStyle::Collapsed => wrap_collapsed(title, &table),
        }
    }

    fn wrap_inline(&self, title: &SectionTitle, table: &str) -> String {
        let heading = if title.name.is_empty() {
            Format::RedForeground.wrap(&Format::Italics.wrap(UNDEFINED_SECTION))
        } else {
            title.name.clone()
        };
        let mut out = Format::Header2.wrap(&heading);
        out.push_str(&TagAnnotator::new(self.options).render(&title.tags));
        out.push_str(&normalize_newlines(&title.description));
        out.push_str(table);
        out
    }
}

fn wrap_collapsed(title: &SectionTitle, table: &str) -> String {
    let name = if title.name.is_empty() {
        UNDEFINED_SECTION
    } else {
        &title.name
    };
    Macro::Expand { title: name }.wrap(table)
}

/// Steps table: one row per step, plus one panel row after each step that
/// carries a non-empty inline table. Empty for an empty step list.
fn render_steps_table(steps: &[BufferedStep]) -> String {
    if steps.is_empty() {
        return String::new();
    }
    let mut rows = String::new();
    for step in steps {
        let keyword = Format::CellAlignedRight
            .wrap(&Format::GreyForeground.wrap(&Format::Bold.wrap(step.keyword.trim())));
        let text = Format::Cell.wrap(&escape_xml(step.text.trim()));
        rows.push_str(&Format::TableRow.wrap(&format!("{keyword}{text}")));

        if let Some(table) = step.table.as_ref().filter(|t| !t.is_empty()) {
            rows.push_str(&nested_table_row(table));
        }
    }
    Format::Table.wrap(&rows)
}

/// Extra row holding a step's data table: empty keyword cell, then the
/// table wrapped in a panel in the text column.
fn nested_table_row(table: &InlineTable) -> String {
    let cells = format!(
        "{}{}",
        Format::Cell.wrap(""),
        Format::Cell.wrap(&Macro::Panel.wrap(&render_table(table)))
    );
    Format::TableRow.wrap(&cells)
}

/// Render a data table. Row 0 gets header cells; all cell content is
/// escaped.
pub(crate) fn render_table(table: &InlineTable) -> String {
    if table.rows.is_empty() {
        return String::new();
    }
    let mut rows = String::new();
    for (i, row) in table.rows.iter().enumerate() {
        let cell_format = if i == 0 {
            Format::HeaderCell
        } else {
            Format::Cell
        };
        let cells: String = row
            .iter()
            .map(|cell| cell_format.wrap(&escape_xml(cell)))
            .collect();
        rows.push_str(&Format::TableRow.wrap(&cells));
    }
    Format::Table.wrap(&rows)
}

/// Collapse newline variants to single spaces.
pub(crate) fn normalize_newlines(text: &str) -> String {
    NEWLINES.replace_all(text, " ").into_owned()
}
