//! Confluence storage-format primitives.
//!
//! [`Format`] enumerates every inline and block construct the converter
//! emits, dispatched through a single [`wrap`](Format::wrap) function.
//! Rendered blocks compose only by string concatenation; nothing here
//! re-parses markup.

/// Inline and block constructs of the Confluence XHTML storage format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Top-level heading, used for feature titles.
    Header1,
    /// Section heading, used for background and scenario titles.
    Header2,
    Bold,
    Italics,
    /// Red foreground span, used to flag placeholder titles.
    RedForeground,
    /// Dark grey foreground span, used for step keywords.
    GreyForeground,
    Table,
    TableRow,
    HeaderCell,
    Cell,
    /// Right-aligned body cell, used for the step keyword column.
    CellAlignedRight,
}

impl Format {
    /// Wrap already-rendered content in this construct's markup.
    ///
    /// The content is inserted verbatim; callers escape user-supplied text
    /// with [`escape_xml`] first where the target position requires it.
    #[must_use]
    pub fn wrap(self, content: &str) -> String {
        match self {
            Self::Header1 => format!("<h1>{content}</h1>"),
            Self::Header2 => format!("<h2>{content}</h2>"),
            Self::Bold => format!("<strong>{content}</strong>"),
            Self::Italics => format!("<em>{content}</em>"),
            Self::RedForeground => {
                format!(r#"<span style="color: rgb(255,0,0);">{content}</span>"#)
            }
            Self::GreyForeground => {
                format!(r#"<span style="color: rgb(128,128,128);">{content}</span>"#)
            }
            Self::Table => format!("<table><tbody>{content}</tbody></table>"),
            Self::TableRow => format!("<tr>{content}</tr>"),
            Self::HeaderCell => format!("<th>{content}</th>"),
            Self::Cell => format!("<td>{content}</td>"),
            Self::CellAlignedRight => {
                format!(r#"<td style="text-align: right;">{content}</td>"#)
            }
        }
    }
}

/// Escape text for placement inside storage-format element content.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
