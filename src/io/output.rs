use crate::core::ReconciliationOutput;
use crate::io::writers::{JsonWriter, MarkdownWriter};
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const JSON_REPORT_FILE: &str = "zephyr.checker.result.json";
pub const MARKDOWN_REPORT_FILE: &str = "zephyr.checker.result.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Markdown];

    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => JSON_REPORT_FILE,
            OutputFormat::Markdown => MARKDOWN_REPORT_FILE,
        }
    }
}

pub trait OutputWriter {
    fn write_results(&mut self, results: &ReconciliationOutput) -> anyhow::Result<()>;
}

pub fn create_writer<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
    }
}

/// Writes the JSON and Markdown reports into `dir`, returning the paths written.
pub fn write_reports(results: &ReconciliationOutput, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    super::ensure_dir(dir)?;

    let mut written = Vec::with_capacity(OutputFormat::ALL.len());
    for format in OutputFormat::ALL {
        let path = dir.join(format.file_name());
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut buffered = BufWriter::new(file);
        create_writer(format, &mut buffered).write_results(results)?;
        buffered
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Output saved to file {}", path.display());
        written.push(path);
    }
    Ok(written)
}
