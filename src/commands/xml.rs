//! The XML checker: cross-checks case keys in JUnit reports against the TCM
//! catalog and writes `zephyr.checker.result.{json,md}`.

use crate::core::{Platform, ReconciliationOutput, RemoteTestCase};
use crate::io::{case_identities, filter_suites, read_junit_report, write_reports};
use crate::reconcile::{
    compute_coverage, find_duplicate_keys, IdentifierExtractor, ReconcileOptions, Reconciler,
};
use crate::tcm::{find_deprecated_status_id, StatusType, TcmApi};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct XmlCheckConfig {
    pub project_key: String,
    pub report_from: PathBuf,
    pub platform: Platform,
    pub update_cases: bool,
    pub suite_name_contains: Option<String>,
    pub max_case_results: u32,
    pub max_status_results: u32,
    pub output_dir: PathBuf,
}

/// Remote state the comparison runs against, fetched once per run.
struct CatalogSnapshot {
    cases: Vec<RemoteTestCase>,
    deprecated_status_id: i64,
}

async fn fetch_catalog<C: TcmApi>(client: &C, config: &XmlCheckConfig) -> Option<CatalogSnapshot> {
    let cases = match client
        .fetch_test_cases(&config.project_key, config.max_case_results)
        .await
    {
        Ok(cases) => cases,
        Err(e) => {
            log::error!("Failed to fetch test cases: {}", e);
            return None;
        }
    };
    log::info!("Fetched {} test cases", cases.len());

    let statuses = match client
        .fetch_statuses(
            &config.project_key,
            StatusType::TestCase,
            config.max_status_results,
        )
        .await
    {
        Ok(statuses) => statuses,
        Err(e) => {
            log::error!("Failed to fetch test case statuses: {}", e);
            return None;
        }
    };

    match find_deprecated_status_id(&statuses) {
        Some(deprecated_status_id) => Some(CatalogSnapshot {
            cases,
            deprecated_status_id,
        }),
        None => {
            log::error!(
                "No Deprecated status among {} test case statuses",
                statuses.len()
            );
            None
        }
    }
}

/// Runs the checker and returns its findings without writing any file.
///
/// When the catalog cannot be fetched, only the local findings (missing and
/// duplicated keys) are returned.
pub async fn check_xml<C: TcmApi>(
    client: &C,
    config: &XmlCheckConfig,
) -> Result<ReconciliationOutput> {
    log::info!(
        "platform: [{}]; updateCases: [{}], suiteNameContains: [{}]",
        config.platform,
        config.update_cases,
        config.suite_name_contains.as_deref().unwrap_or("")
    );

    let suites = read_junit_report(&config.report_from).with_context(|| {
        format!(
            "Failed to read XML report from {}",
            config.report_from.display()
        )
    })?;
    if let Some(needle) = &config.suite_name_contains {
        log::info!("Test suite name should contain [{}]", needle);
    }
    let suites = filter_suites(suites, config.suite_name_contains.as_deref());

    let extractor = IdentifierExtractor::new(&config.project_key)
        .with_context(|| format!("Invalid project key {}", config.project_key))?;
    let extraction = extractor.extract(case_identities(&suites));
    let duplicate_keys = find_duplicate_keys(&extraction.references);

    let mut output = ReconciliationOutput {
        missing_ids: extraction.missing_ids,
        duplicate_keys,
        ..Default::default()
    };

    let Some(catalog) = fetch_catalog(client, config).await else {
        log::error!("Remote catalog unavailable. Skipping TCM comparison");
        return Ok(output);
    };

    let options = ReconcileOptions {
        platform: config.platform,
        update_cases: config.update_cases,
    };
    let comparison = Reconciler::new(client, options)
        .reconcile(
            &catalog.cases,
            catalog.deprecated_status_id,
            &extraction.references,
        )
        .await;

    output.tsm = Some(comparison);
    output.coverage = Some(compute_coverage(
        &catalog.cases,
        catalog.deprecated_status_id,
        config.platform,
    ));
    Ok(output)
}

/// Runs the checker and writes both report files into the output directory.
pub async fn run_xml_check<C: TcmApi>(
    client: &C,
    config: &XmlCheckConfig,
) -> Result<(ReconciliationOutput, Vec<PathBuf>)> {
    let output = check_xml(client, config).await?;
    let written = write_reports(&output, &config.output_dir)
        .with_context(|| format!("Failed to write reports to {}", config.output_dir.display()))?;
    Ok((output, written))
}
