//! Parsing events and inline data tables.

/// A data table attached to a step or example block.
///
/// Rows are ordered; row 0 is the header row when the table is non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineTable {
    /// Table rows, each an ordered list of cell strings.
    pub rows: Vec<Vec<String>>,
}

impl InlineTable {
    /// Create a table from its rows.
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Whether the table has no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One structural unit of a parsed feature document.
///
/// Events arrive in document order and are consumed one at a time by
/// [`StorageFormatter::handle`](crate::StorageFormatter::handle). Each
/// document is terminated by exactly one [`EndOfDocument`], after which the
/// next document's [`FeatureStart`] may follow on the same formatter.
///
/// [`EndOfDocument`]: DocumentEvent::EndOfDocument
/// [`FeatureStart`]: DocumentEvent::FeatureStart
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Feature header. Rendered immediately; never buffered.
    FeatureStart {
        name: String,
        description: String,
        tags: Vec<String>,
    },
    /// Opens a background section.
    BackgroundStart {
        name: String,
        description: String,
        tags: Vec<String>,
    },
    /// Opens a scenario section.
    ScenarioStart {
        name: String,
        description: String,
        tags: Vec<String>,
    },
    /// Opens a scenario-outline section.
    ScenarioOutlineStart {
        name: String,
        description: String,
        tags: Vec<String>,
    },
    /// One step of the currently open section.
    Step {
        keyword: String,
        text: String,
        table: Option<InlineTable>,
    },
    /// Example table of a scenario outline. Rendered immediately; closes
    /// the pending section without opening a new one.
    ExampleBlock {
        keyword: String,
        name: String,
        comments: Vec<String>,
        tags: Vec<String>,
        table: InlineTable,
    },
    /// End of the current document.
    EndOfDocument,
}
