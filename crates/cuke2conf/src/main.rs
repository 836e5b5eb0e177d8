//! cuke2conf CLI - convert Gherkin feature files to Confluence storage
//! format.
//!
//! Feeds each feature file's event stream through one
//! [`StorageFormatter`](cuke2conf_formatter::StorageFormatter) and writes
//! the rendered markup either as a single combined report or one file per
//! feature.

mod batch;
mod error;
mod finder;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cuke2conf_formatter::FormatterOptions;

use batch::BatchConverter;
use error::CliError;
use finder::FeatureFinder;
use output::Output;

/// Convert Gherkin feature files to Confluence storage format.
#[derive(Parser)]
#[command(name = "cuke2conf", version, about)]
struct Cli {
    /// Feature file, or directory to scan recursively for .feature files.
    input: PathBuf,

    /// Directory the rendered .xhtml output is written to.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Do not render tag callouts.
    #[arg(long)]
    ignore_tags: bool,

    /// Jira server URL; enables issue-reference extraction from tags.
    /// Mutually exclusive with --ignore-tags.
    #[arg(long, env = "CUKE2CONF_JIRA_SERVER")]
    jira_server: Option<String>,

    /// Write one output file per feature instead of a combined report.
    #[arg(long)]
    split: bool,

    /// Enable info-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(&cli, &output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli, output: &Output) -> Result<(), CliError> {
    let options = FormatterOptions::from_flags(cli.ignore_tags, cli.jira_server.clone())?;

    let features = FeatureFinder::new(&cli.input).find_features()?;
    if features.is_empty() {
        output.warning(&format!(
            "No feature files found under {}",
            cli.input.display()
        ));
        return Ok(());
    }
    output.info(&format!("Converting {} feature file(s)", features.len()));

    let converter = BatchConverter::new(options);
    let written = if cli.split {
        converter.convert_per_feature(&features, &cli.output_dir)?
    } else {
        vec![converter.convert_to_single_file(&features, &cli.output_dir)?]
    };

    for path in &written {
        output.success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}
