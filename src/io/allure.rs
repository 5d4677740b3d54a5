//! Allure `*-result.json` ingestion and mapping to execution records.

use crate::core::{ExecutionRecord, ExecutionStatus};
use crate::errors::IngestError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const RESULT_SUFFIX: &str = "-result.json";
const ISSUE_LINK_NAME: &str = "Issue";
const CASE_KEY_MARKER: &str = "-T";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllureStatus {
    Passed,
    Failed,
    Broken,
    Skipped,
    #[serde(other)]
    Unknown,
}

impl AllureStatus {
    pub fn execution_status(self) -> ExecutionStatus {
        match self {
            AllureStatus::Passed => ExecutionStatus::Pass,
            AllureStatus::Failed | AllureStatus::Broken => ExecutionStatus::Fail,
            AllureStatus::Skipped | AllureStatus::Unknown => ExecutionStatus::NotExecuted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AllureLink {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusDetails {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub trace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllureResult {
    pub status: AllureStatus,
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub stop: i64,
    #[serde(default)]
    pub links: Vec<AllureLink>,
    #[serde(default)]
    pub status_details: Option<StatusDetails>,
    #[serde(default)]
    pub full_name: String,
}

impl AllureResult {
    /// TCM key linked to this result through an `Issue` link.
    ///
    /// The url may be a bare key or a browse link; the last path segment is
    /// the key.
    pub fn linked_case_key(&self) -> Option<String> {
        self.links
            .iter()
            .find(|link| link.name == ISSUE_LINK_NAME && link.url.contains(CASE_KEY_MARKER))
            .and_then(|link| link.url.trim_end_matches('/').rsplit('/').next())
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }

    /// Maps the result to an execution record, or `None` when no case is linked.
    pub fn to_execution_record(&self, environment: &str) -> Option<ExecutionRecord> {
        let case_key = self.linked_case_key()?;
        let comment = self
            .status_details
            .as_ref()
            .and_then(|details| details.trace.clone())
            .unwrap_or_default();
        Some(ExecutionRecord::new(
            case_key,
            self.status.execution_status(),
            self.stop.saturating_sub(self.start),
            environment,
            self.stop,
            comment,
            self.full_name.clone(),
        ))
    }
}

fn is_result_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(RESULT_SUFFIX))
}

/// Parses every `*-result.json` below `dir`, in file-name order.
pub fn read_allure_results(dir: &Path) -> Result<Vec<AllureResult>, IngestError> {
    if !dir.exists() {
        return Err(IngestError::MissingPath(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| IngestError::Walk {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() && is_result_file(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path).map_err(|e| IngestError::io(&path, e))?;
        let result: AllureResult = serde_json::from_str(&content)
            .map_err(|source| IngestError::Json {
                path: path.clone(),
                source,
            })?;
        log::debug!("{:?}", result);
        results.push(result);
    }
    log::info!("Read {} Allure results from {}", results.len(), dir.display());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    fn parse(json: &str) -> AllureResult {
        serde_json::from_str(json).unwrap()
    }

    const LINKED: &str = indoc! {r#"
        {
          "uuid": "abc",
          "fullName": "com.app.LoginTest.login",
          "status": "broken",
          "start": 1600000000000,
          "stop": 1600000004500,
          "statusDetails": {"message": "boom", "trace": "at LoginTest.kt:12"},
          "links": [
            {"name": "docs", "url": "https://wiki/page", "type": "link"},
            {"name": "Issue", "url": "https://jira.example.com/browse/PROJ-T42", "type": "issue"}
          ]
        }
    "#};

    #[test]
    fn test_maps_linked_result() {
        let record = parse(LINKED)
            .to_execution_record("Android - Portrait")
            .unwrap();
        assert_eq!(record.case_key(), "PROJ-T42");
        assert_eq!(record.status(), ExecutionStatus::Fail);
        assert_eq!(record.duration_ms(), 4500);
        assert_eq!(record.actual_end_date(), "2020-09-13T12:26:44Z");
        assert_eq!(record.comment(), "at LoginTest.kt:12");
        assert_eq!(record.environment(), "Android - Portrait");
        assert_eq!(record.source_name(), "com.app.LoginTest.login");
    }

    #[test]
    fn test_bare_key_url() {
        let result = parse(r#"{"status":"passed","links":[{"name":"Issue","url":"PROJ-T7"}]}"#);
        assert_eq!(result.linked_case_key().as_deref(), Some("PROJ-T7"));
    }

    #[test]
    fn test_issue_link_without_case_marker_is_ignored() {
        let result = parse(r#"{"status":"passed","links":[{"name":"Issue","url":"PROJ-123"}]}"#);
        assert_eq!(result.linked_case_key(), None);
        assert!(result.to_execution_record("env").is_none());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AllureStatus::Passed.execution_status(), ExecutionStatus::Pass);
        assert_eq!(AllureStatus::Failed.execution_status(), ExecutionStatus::Fail);
        assert_eq!(AllureStatus::Skipped.execution_status(), ExecutionStatus::NotExecuted);
        let unknown = parse(r#"{"status":"unknown"}"#);
        assert_eq!(unknown.status, AllureStatus::Unknown);
        assert_eq!(unknown.status.execution_status(), ExecutionStatus::NotExecuted);
    }

    #[test]
    fn test_extreme_timestamps_saturate_duration() {
        let result = parse(&format!(
            r#"{{"status":"passed","start":{},"stop":{},"links":[{{"name":"Issue","url":"X-T1"}}]}}"#,
            i64::MIN,
            i64::MAX
        ));
        let record = result.to_execution_record("env").unwrap();
        assert_eq!(record.duration_ms(), i64::MAX);
    }

    #[test]
    fn test_missing_trace_gives_empty_comment() {
        let result = parse(r#"{"status":"passed","links":[{"name":"Issue","url":"X-T1"}]}"#);
        assert_eq!(result.to_execution_record("env").unwrap().comment(), "");
    }

    #[test]
    fn test_reads_only_result_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b-result.json"), LINKED).unwrap();
        std::fs::write(
            dir.path().join("a-result.json"),
            r#"{"status":"passed","fullName":"first"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("c-container.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let results = read_allure_results(dir.path()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].full_name, "first");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let err = read_allure_results(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, IngestError::MissingPath(_)));
    }

    #[test]
    fn test_malformed_result_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("x-result.json"), "{not json").unwrap();
        let err = read_allure_results(dir.path()).unwrap_err();
        assert!(matches!(err, IngestError::Json { .. }));
    }
}
