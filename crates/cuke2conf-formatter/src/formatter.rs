//! Event-driven conversion of feature documents to storage format.

use crate::error::FormatError;
use crate::event::{DocumentEvent, InlineTable};
use crate::macros::Macro;
use crate::markup::{Format, escape_xml};
use crate::options::FormatterOptions;
use crate::section::{
    BufferedStep, FlushStyle, SectionRenderer, SectionTitle, normalize_newlines, render_table,
};
use crate::tags::TagAnnotator;

/// Streaming formatter for feature documents.
///
/// Consumes [`DocumentEvent`]s one at a time. The stream carries no
/// "section closed" signal, so the formatter buffers exactly one section
/// and flushes it on the first event that cannot belong to it. The flush
/// style follows from that event: another titled section renders the
/// buffered one inline, while an example block or the end of the document
/// renders it as a collapsible region.
///
/// One instance may be fed several documents in sequence; rendered output
/// accumulates in feed order until [`drain`](Self::drain).
#[derive(Debug)]
pub struct StorageFormatter {
    options: FormatterOptions,
    out: String,
    pending: Option<PendingSection>,
}

/// The buffered section: its title plus the steps received so far.
#[derive(Debug)]
struct PendingSection {
    title: SectionTitle,
    steps: Vec<BufferedStep>,
}

impl StorageFormatter {
    /// Create a formatter with the given options.
    #[must_use]
    pub fn new(options: FormatterOptions) -> Self {
        Self {
            options,
            out: String::with_capacity(4096),
            pending: None,
        }
    }

    /// Feed one event.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::StepOutsideSection`] if a step arrives while
    /// no section is open. The stream is malformed at that point and the
    /// formatter makes no attempt at local repair.
    pub fn handle(&mut self, event: DocumentEvent) -> Result<(), FormatError> {
        match event {
            DocumentEvent::FeatureStart {
                name,
                description,
                tags,
            } => {
                self.feature(&name, &description, &tags);
                Ok(())
            }
            DocumentEvent::BackgroundStart {
                name,
                description,
                tags,
            }
            | DocumentEvent::ScenarioStart {
                name,
                description,
                tags,
            }
            | DocumentEvent::ScenarioOutlineStart {
                name,
                description,
                tags,
            } => {
                self.open_section(SectionTitle {
                    name,
                    description,
                    tags,
                });
                Ok(())
            }
            DocumentEvent::Step {
                keyword,
                text,
                table,
            } => self.step(keyword, text, table),
            DocumentEvent::ExampleBlock {
                keyword,
                name,
                comments,
                tags,
                table,
            } => {
                self.example_block(&keyword, &name, &comments, &tags, &table);
                Ok(())
            }
            DocumentEvent::EndOfDocument => {
                tracing::debug!("end of document");
                self.flush(FlushStyle::Collapsed);
                Ok(())
            }
        }
    }

    /// Drain the accumulated output, flushing any pending section and
    /// returning the formatter to its initial state.
    pub fn drain(&mut self) -> String {
        self.flush(FlushStyle::Collapsed);
        std::mem::take(&mut self.out)
    }

    /// Features are never buffered: there is exactly one per document and
    /// nothing can be appended to it later.
    fn feature(&mut self, name: &str, description: &str, tags: &[String]) {
        tracing::debug!(name, "feature");
        self.out.push_str(&Format::Header1.wrap(name));
        self.out
            .push_str(&TagAnnotator::new(&self.options).render(tags));
        let description = normalize_newlines(description);
        if !description.is_empty() {
            self.out.push_str(&description);
        }
    }

    fn open_section(&mut self, title: SectionTitle) {
        tracing::debug!(name = %title.name, "section start");
        self.flush(FlushStyle::Inline);
        self.pending = Some(PendingSection {
            title,
            steps: Vec::new(),
        });
    }

    fn step(
        &mut self,
        keyword: String,
        text: String,
        table: Option<InlineTable>,
    ) -> Result<(), FormatError> {
        let Some(section) = self.pending.as_mut() else {
            return Err(FormatError::StepOutsideSection { keyword, text });
        };
        tracing::debug!(keyword = %keyword.trim(), "buffering step");
        section.steps.push(BufferedStep {
            keyword,
            text,
            table,
        });
        Ok(())
    }

    /// Example blocks close the pending section but never open one.
    fn example_block(
        &mut self,
        keyword: &str,
        name: &str,
        comments: &[String],
        tags: &[String],
        table: &InlineTable,
    ) {
        tracing::debug!(name, "example block");
        self.flush(FlushStyle::Collapsed);
        self.out.push('\n');
        for comment in comments {
            self.out.push(' ');
            self.out.push_str(comment);
        }
        self.out
            .push_str(&TagAnnotator::new(&self.options).render(tags));

        let header = Format::TableRow
            .wrap(&Format::HeaderCell.wrap(&escape_xml(&format!("{keyword}: {name}"))));
        let body =
            Format::TableRow.wrap(&Format::Cell.wrap(&Macro::Panel.wrap(&render_table(table))));
        self.out
            .push_str(&Format::Table.wrap(&format!("{header}{body}")));
    }

    fn flush(&mut self, style: FlushStyle) {
        let Some(section) = self.pending.take() else {
            return;
        };
        tracing::debug!(name = %section.title.name, ?style, "flushing section");
        let block = SectionRenderer::new(&self.options).render(
            &section.title,
            &section.steps,
            style,
        );
        self.out.push_str(&block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(name: &str) -> DocumentEvent {
        DocumentEvent::ScenarioStart {
            name: name.to_owned(),
            description: String::new(),
            tags: Vec::new(),
        }
    }

    fn step(keyword: &str, text: &str) -> DocumentEvent {
        DocumentEvent::Step {
            keyword: keyword.to_owned(),
            text: text.to_owned(),
            table: None,
        }
    }

    fn render(events: Vec<DocumentEvent>) -> String {
        let mut formatter = StorageFormatter::new(FormatterOptions::default());
        for event in events {
            formatter.handle(event).unwrap();
        }
        formatter.drain()
    }

    #[test]
    fn test_feature_renders_immediately() {
        let output = render(vec![
            DocumentEvent::FeatureStart {
                name: "Payments".to_owned(),
                description: "Charges\nand refunds".to_owned(),
                tags: vec!["@billing".to_owned()],
            },
            DocumentEvent::EndOfDocument,
        ]);
        assert!(output.starts_with("<h1>Payments</h1>"));
        assert!(output.contains("<strong><em>billing</em></strong>"));
        assert!(output.contains("Charges and refunds"));
    }

    #[test]
    fn test_steps_never_leak_across_sections() {
        let output = render(vec![
            scenario("A"),
            step("Given", "x"),
            scenario("B"),
            step("When", "y"),
            DocumentEvent::EndOfDocument,
        ]);
        let a = output.find("<h2>A</h2>").unwrap();
        let x = output.find("<td>x</td>").unwrap();
        let b = output.find(r#"<ac:parameter ac:name="title">B</ac:parameter>"#).unwrap();
        let y = output.find("<td>y</td>").unwrap();
        assert!(a < x && x < b && b < y);
    }

    #[test]
    fn test_terminal_section_collapses_intermediate_stays_inline() {
        let output = render(vec![
            scenario("A"),
            step("Given", "x"),
            scenario("B"),
            step("When", "y"),
            DocumentEvent::EndOfDocument,
        ]);
        // A is followed by a titled section: inline heading, no expand.
        assert!(output.contains("<h2>A</h2>"));
        assert!(!output.contains(r#"<ac:parameter ac:name="title">A</ac:parameter>"#));
        // B is followed by end-of-document: collapsed.
        assert!(output.contains(r#"<ac:parameter ac:name="title">B</ac:parameter>"#));
        assert!(!output.contains("<h2>B</h2>"));
    }

    #[test]
    fn test_lone_section_collapses() {
        let output = render(vec![
            scenario("A"),
            step("Given", "x"),
            DocumentEvent::EndOfDocument,
        ]);
        assert!(output.contains(r#"ac:name="expand""#));
        assert!(output.contains(r#"<ac:parameter ac:name="title">A</ac:parameter>"#));
        assert!(output.contains("<td>x</td>"));
    }

    #[test]
    fn test_empty_name_renders_placeholder() {
        let output = render(vec![scenario(""), DocumentEvent::EndOfDocument]);
        assert!(output.contains("Undefined section"));
        assert!(!output.contains("<h2></h2>"));
    }

    #[test]
    fn test_step_without_section_is_a_protocol_error() {
        let mut formatter = StorageFormatter::new(FormatterOptions::default());
        let err = formatter
            .handle(step("Given", "orphan"))
            .unwrap_err();
        assert!(matches!(err, FormatError::StepOutsideSection { .. }));
    }

    #[test]
    fn test_rendering_is_deterministic_across_instances() {
        let events = || {
            vec![
                DocumentEvent::FeatureStart {
                    name: "F".to_owned(),
                    description: String::new(),
                    tags: vec!["@a".to_owned(), "@b".to_owned()],
                },
                scenario("S"),
                step("Given", "x"),
                DocumentEvent::EndOfDocument,
            ]
        };
        assert_eq!(render(events()), render(events()));
    }

    #[test]
    fn test_example_block_closes_outline_and_renders_panel_table() {
        let output = render(vec![
            DocumentEvent::ScenarioOutlineStart {
                name: "Totals".to_owned(),
                description: String::new(),
                tags: Vec::new(),
            },
            step("Given", "<amount> items"),
            DocumentEvent::ExampleBlock {
                keyword: "Examples".to_owned(),
                name: "small carts".to_owned(),
                comments: Vec::new(),
                tags: Vec::new(),
                table: InlineTable::new(vec![
                    vec!["amount".to_owned()],
                    vec!["2".to_owned()],
                ]),
            },
            DocumentEvent::EndOfDocument,
        ]);
        // The outline collapses because the example block closed it.
        assert!(output.contains(r#"<ac:parameter ac:name="title">Totals</ac:parameter>"#));
        assert!(output.contains("<th>Examples: small carts</th>"));
        assert!(output.contains("<th>amount</th>"));
        assert!(output.contains("<td>2</td>"));
        // Outline flush precedes the examples table.
        let outline = output.find(r#"ac:name="expand""#).unwrap();
        let examples = output.find("Examples: small carts").unwrap();
        assert!(outline < examples);
    }

    #[test]
    fn test_example_block_does_not_open_a_section() {
        let mut formatter = StorageFormatter::new(FormatterOptions::default());
        formatter
            .handle(DocumentEvent::ExampleBlock {
                keyword: "Examples".to_owned(),
                name: String::new(),
                comments: Vec::new(),
                tags: Vec::new(),
                table: InlineTable::default(),
            })
            .unwrap();
        let err = formatter.handle(step("Given", "orphan")).unwrap_err();
        assert!(matches!(err, FormatError::StepOutsideSection { .. }));
    }

    #[test]
    fn test_example_header_cell_is_escaped() {
        let output = render(vec![
            scenario("S"),
            DocumentEvent::ExampleBlock {
                keyword: "Examples".to_owned(),
                name: "a <b>".to_owned(),
                comments: Vec::new(),
                tags: Vec::new(),
                table: InlineTable::default(),
            },
            DocumentEvent::EndOfDocument,
        ]);
        assert!(output.contains("<th>Examples: a &lt;b&gt;</th>"));
    }

    #[test]
    fn test_batch_output_preserves_document_order() {
        let mut formatter = StorageFormatter::new(FormatterOptions::default());
        for name in ["First", "Second"] {
            formatter
                .handle(DocumentEvent::FeatureStart {
                    name: name.to_owned(),
                    description: String::new(),
                    tags: Vec::new(),
                })
                .unwrap();
            formatter.handle(scenario("S")).unwrap();
            formatter.handle(step("Given", "x")).unwrap();
            formatter.handle(DocumentEvent::EndOfDocument).unwrap();
        }
        let output = formatter.drain();
        let first = output.find("<h1>First</h1>").unwrap();
        let second = output.find("<h1>Second</h1>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_drain_resets_the_formatter() {
        let mut formatter = StorageFormatter::new(FormatterOptions::default());
        formatter.handle(scenario("A")).unwrap();
        let first = formatter.drain();
        assert!(first.contains(r#"<ac:parameter ac:name="title">A</ac:parameter>"#));
        assert_eq!(formatter.drain(), "");
    }

    #[test]
    fn test_tag_suppression_applies_to_features_and_sections() {
        let mut formatter = StorageFormatter::new(FormatterOptions::new(false));
        formatter
            .handle(DocumentEvent::FeatureStart {
                name: "F".to_owned(),
                description: String::new(),
                tags: vec!["@hidden".to_owned()],
            })
            .unwrap();
        formatter
            .handle(DocumentEvent::ScenarioStart {
                name: "A".to_owned(),
                description: String::new(),
                tags: vec!["@hidden".to_owned()],
            })
            .unwrap();
        formatter.handle(scenario("B")).unwrap();
        formatter.handle(DocumentEvent::EndOfDocument).unwrap();
        let output = formatter.drain();
        assert!(!output.contains("hidden"));
        assert!(!output.contains(r#"ac:name="info""#));
    }

    #[test]
    fn test_feature_jira_tags_render_as_references() {
        let mut formatter = StorageFormatter::new(FormatterOptions::with_jira_server(
            "https://jira.example.com",
        ));
        formatter
            .handle(DocumentEvent::FeatureStart {
                name: "F".to_owned(),
                description: String::new(),
                tags: vec!["@smoke".to_owned(), "@ABC-123".to_owned()],
            })
            .unwrap();
        formatter.handle(DocumentEvent::EndOfDocument).unwrap();
        let output = formatter.drain();
        assert!(output.contains(r#"<ac:parameter ac:name="key">ABC-123</ac:parameter>"#));
        assert!(output.contains("<strong><em>smoke</em></strong>"));
    }
}
