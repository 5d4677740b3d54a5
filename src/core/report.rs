use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A case key found in a local test name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalCaseReference {
    pub key: String,
    pub test_name: String,
}

impl LocalCaseReference {
    pub fn new(key: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            test_name: test_name.into(),
        }
    }
}

/// Findings of the bidirectional TCM comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsmComparison {
    pub should_be_in_code: Vec<String>,
    pub should_be_in_zephyr: Vec<String>,
    pub missing_status: Vec<String>,
    pub deprecated_case: Vec<String>,
}

impl TsmComparison {
    pub fn finding_count(&self) -> usize {
        self.should_be_in_code.len()
            + self.should_be_in_zephyr.len()
            + self.missing_status.len()
            + self.deprecated_case.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub none: usize,
    pub done: usize,
    pub wont: usize,
    pub deprecated: usize,
    pub duplicate: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoveragePercentages {
    pub wont: f64,
    pub can_be_automated: f64,
    pub automated_of_can_be: f64,
    pub automated_of_total: f64,
    pub not_automated_of_can_be: f64,
    pub not_automated_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub total_cases: usize,
    pub non_deprecated_cases: usize,
    pub count_by_automation_status: StatusCounts,
    pub total_wont: usize,
    pub can_be_automated: usize,
    pub percentages: CoveragePercentages,
}

/// Everything one `xml` run found, serialized to `zephyr.checker.result.json`.
///
/// The comparison section is absent when the remote catalog could not be
/// fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationOutput {
    pub missing_ids: Vec<String>,
    pub duplicate_keys: BTreeMap<String, usize>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub tsm: Option<TsmComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageReport>,
}
