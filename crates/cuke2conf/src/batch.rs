//! Batch conversion of feature files through the streaming formatter.
//!
//! Parsing is delegated to the `gherkin` crate; its AST is linearized into
//! the event stream the formatter consumes. Parse errors are fatal and
//! propagate unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use gherkin::{Feature, GherkinEnv};

use cuke2conf_formatter::{DocumentEvent, FormatterOptions, InlineTable, StorageFormatter};

use crate::error::CliError;

/// Combined report filename (single-file mode).
const REPORT_FILENAME: &str = "cucumber-report.xhtml";

/// Converts parsed feature files into storage-format documents.
pub(crate) struct BatchConverter {
    options: FormatterOptions,
}

impl BatchConverter {
    pub(crate) fn new(options: FormatterOptions) -> Self {
        Self { options }
    }

    /// Convert all features through one formatter into a single combined
    /// report. Output order matches feed order.
    pub(crate) fn convert_to_single_file(
        &self,
        features: &[PathBuf],
        output_dir: &Path,
    ) -> Result<PathBuf, CliError> {
        let mut formatter = StorageFormatter::new(self.options.clone());
        for path in features {
            feed_feature(path, &mut formatter)?;
        }
        let output_path = output_dir.join(REPORT_FILENAME);
        fs::write(&output_path, formatter.drain())?;
        Ok(output_path)
    }

    /// Convert each feature through a fresh formatter into its own
    /// `<stem>.xhtml` file.
    pub(crate) fn convert_per_feature(
        &self,
        features: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, CliError> {
        let mut written = Vec::with_capacity(features.len());
        for path in features {
            let mut formatter = StorageFormatter::new(self.options.clone());
            feed_feature(path, &mut formatter)?;

            let stem = path
                .file_stem()
                .map_or_else(|| "feature".to_owned(), |s| s.to_string_lossy().into_owned());
            let output_path = output_dir.join(format!("{stem}.xhtml"));
            fs::write(&output_path, formatter.drain())?;
            written.push(output_path);
        }
        Ok(written)
    }
}

/// Parse one feature file and push its event stream into the formatter.
fn feed_feature(path: &Path, formatter: &mut StorageFormatter) -> Result<(), CliError> {
    tracing::info!(path = %path.display(), "converting feature");
    let feature = Feature::parse_path(path, GherkinEnv::default())?;
    for event in linearize(&feature) {
        formatter.handle(event)?;
    }
    Ok(())
}

/// Flatten a parsed feature into the ordered event stream: feature header,
/// background, scenarios with their example blocks, rule members in
/// document order, then end-of-document.
fn linearize(feature: &Feature) -> Vec<DocumentEvent> {
    let mut events = vec![DocumentEvent::FeatureStart {
        name: feature.name.clone(),
        description: feature.description.clone().unwrap_or_default(),
        tags: feature.tags.clone(),
    }];

    if let Some(background) = &feature.background {
        push_background(background, &mut events);
    }
    for scenario in &feature.scenarios {
        push_scenario(scenario, &mut events);
    }
    for rule in &feature.rules {
        if let Some(background) = &rule.background {
            push_background(background, &mut events);
        }
        for scenario in &rule.scenarios {
            push_scenario(scenario, &mut events);
        }
    }

    events.push(DocumentEvent::EndOfDocument);
    events
}

fn push_background(background: &gherkin::Background, events: &mut Vec<DocumentEvent>) {
    events.push(DocumentEvent::BackgroundStart {
        name: background.name.clone(),
        description: background.description.clone().unwrap_or_default(),
        tags: Vec::new(),
    });
    for step in &background.steps {
        events.push(step_event(step));
    }
}

fn push_scenario(scenario: &gherkin::Scenario, events: &mut Vec<DocumentEvent>) {
    let name = scenario.name.clone();
    let description = scenario.description.clone().unwrap_or_default();
    let tags = scenario.tags.clone();
    if scenario.examples.is_empty() {
        events.push(DocumentEvent::ScenarioStart {
            name,
            description,
            tags,
        });
    } else {
        events.push(DocumentEvent::ScenarioOutlineStart {
            name,
            description,
            tags,
        });
    }

    for step in &scenario.steps {
        events.push(step_event(step));
    }

    for examples in &scenario.examples {
        events.push(DocumentEvent::ExampleBlock {
            keyword: examples.keyword.clone(),
            name: examples.name.clone().unwrap_or_default(),
            // The gherkin AST does not retain comments.
            comments: Vec::new(),
            tags: examples.tags.clone(),
            table: InlineTable::new(
                examples
                    .table
                    .as_ref()
                    .map(|table| table.rows.clone())
                    .unwrap_or_default(),
            ),
        });
    }
}

fn step_event(step: &gherkin::Step) -> DocumentEvent {
    DocumentEvent::Step {
        keyword: step.keyword.clone(),
        text: step.value.clone(),
        table: step
            .table
            .as_ref()
            .map(|table| InlineTable::new(table.rows.clone())),
    }
}
