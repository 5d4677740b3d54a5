use crate::commands::allure::map_results;
use crate::io::read_allure_results;
use anyhow::{Context, Result};
use std::path::Path;

/// What a dry run would have posted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DryRunSummary {
    pub total_results: usize,
    pub mapped: usize,
    pub skipped: usize,
}

/// Parses and maps Allure results without contacting the TCM.
pub fn dry_run(report_dir: &Path, environment: &str) -> Result<DryRunSummary> {
    log::info!("Debug mode ON. Will not post");
    let results = read_allure_results(report_dir)
        .with_context(|| format!("Failed to read Allure results from {}", report_dir.display()))?;
    let (records, skipped) = map_results(&results, environment);
    for record in &records {
        log::info!(
            "{} <{}> {}ms ended {} ({})",
            record.case_key(),
            record.status(),
            record.duration_ms(),
            record.actual_end_date(),
            record.source_name()
        );
    }
    Ok(DryRunSummary {
        total_results: results.len(),
        mapped: records.len(),
        skipped,
    })
}
