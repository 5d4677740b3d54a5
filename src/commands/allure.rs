//! Allure push: map results to executions, create a test cycle, post every
//! execution and retry the server-side failures once.

use crate::core::ExecutionRecord;
use crate::io::{read_allure_results, AllureResult};
use crate::tcm::{ExecutionRequest, PostResult, TcmApi};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AllurePushConfig {
    pub project_key: String,
    pub report_dir: PathBuf,
    pub cycle_name: String,
    pub cycle_description: String,
    pub environment: String,
    pub show_progress: bool,
}

/// Counts reported at the end of a push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushSummary {
    /// Key of the created cycle; `None` when creation failed and nothing was posted.
    pub cycle_key: Option<String>,
    pub total_results: usize,
    /// Results without a linked case key.
    pub skipped: usize,
    pub posted: usize,
    pub not_posted: usize,
    pub retried: usize,
    pub not_posted_after_retry: usize,
}

/// Maps results to execution records, logging every result without a linked case.
pub fn map_results(results: &[AllureResult], environment: &str) -> (Vec<ExecutionRecord>, usize) {
    let mut records = Vec::with_capacity(results.len());
    let mut skipped = 0;
    for result in results {
        match result.to_execution_record(environment) {
            Some(record) => records.push(record),
            None => {
                log::error!("Test Link is missed for {}", result.full_name);
                skipped += 1;
            }
        }
    }
    (records, skipped)
}

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  "),
    );
    bar
}

async fn post_all<C: TcmApi>(
    client: &C,
    requests: impl IntoIterator<Item = ExecutionRequest>,
    bar: &ProgressBar,
) -> Vec<PostResult> {
    let mut results = Vec::new();
    for request in requests {
        bar.set_message(request.test_case_key.clone());
        results.push(client.post_execution(&request).await);
        bar.inc(1);
    }
    results
}

pub async fn push_allure_results<C: TcmApi>(
    client: &C,
    config: &AllurePushConfig,
) -> Result<PushSummary> {
    let results = read_allure_results(&config.report_dir).with_context(|| {
        format!(
            "Failed to read Allure results from {}",
            config.report_dir.display()
        )
    })?;
    let (records, skipped) = map_results(&results, &config.environment);

    let mut summary = PushSummary {
        total_results: results.len(),
        skipped,
        ..Default::default()
    };

    let cycle = match client
        .create_test_cycle(
            &config.project_key,
            &config.cycle_name,
            &config.cycle_description,
        )
        .await
    {
        Ok(cycle) => cycle,
        Err(e) => {
            log::error!("Test Cycle not created ({}). Will not post results", e);
            return Ok(summary);
        }
    };
    log::info!("Test Cycle {} created. Will post results", cycle.key);
    log::info!("Results to post: {}", records.len());

    let requests = records
        .iter()
        .map(|record| ExecutionRequest::from_record(&config.project_key, &cycle.key, record));
    let bar = progress_bar(records.len(), config.show_progress);
    let first_pass = post_all(client, requests, &bar).await;
    bar.finish_and_clear();

    summary.posted = first_pass.iter().filter(|r| r.posted()).count();
    summary.not_posted = first_pass.len() - summary.posted;
    log::info!("Results posted {}", summary.posted);
    log::info!("Results NOT posted {}", summary.not_posted);

    log::info!("Will try to post again all results with server error");
    let to_retry: Vec<ExecutionRequest> = first_pass
        .into_iter()
        .filter(PostResult::is_server_error)
        .map(|r| r.request)
        .collect();
    summary.retried = to_retry.len();

    let retry_bar = progress_bar(to_retry.len(), config.show_progress && !to_retry.is_empty());
    let retry_pass = post_all(client, to_retry, &retry_bar).await;
    retry_bar.finish_and_clear();

    summary.not_posted_after_retry = retry_pass.iter().filter(|r| !r.posted()).count();
    log::info!(
        "Results NOT posted after retry {}",
        summary.not_posted_after_retry
    );

    summary.cycle_key = Some(cycle.key);
    Ok(summary)
}
