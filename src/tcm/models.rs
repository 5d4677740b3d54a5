//! Request and response bodies of the Zephyr Scale / TM4J v2 API.

use crate::core::{ExecutionRecord, RemoteTestCase};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error body returned by the TCM on 4xx/5xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Decodes an error body, keeping non-JSON text as the message.
    pub fn from_body(body: &str) -> Option<Self> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(
            serde_json::from_str::<ErrorResponse>(trimmed).unwrap_or_else(|_| ErrorResponse {
                error_code: None,
                message: Some(trimmed.to_string()),
            }),
        )
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.error_code, self.message.as_deref()) {
            (Some(code), Some(message)) => write!(f, "[{code}] {message}"),
            (Some(code), None) => write!(f, "[{code}]"),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("<no details>"),
        }
    }
}

/// Paged list envelope used by the list endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub is_last: Option<bool>,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

pub type TestCasesResponse = PagedResponse<RemoteTestCase>;
pub type StatusesResponse = PagedResponse<TcmStatus>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    TestCase,
}

impl StatusType {
    pub fn as_query(self) -> &'static str {
        match self {
            StatusType::TestCase => "TEST_CASE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcmStatus {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

/// Resolves the id of the project's "deprecated" test case status.
///
/// Matching is case-insensitive; when several statuses match, the last wins.
pub fn find_deprecated_status_id(statuses: &[TcmStatus]) -> Option<i64> {
    statuses
        .iter()
        .rev()
        .find(|status| status.name.trim().eq_ignore_ascii_case("deprecated"))
        .map(|status| status.id)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCycleRequest<'a> {
    pub project_key: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub status_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestCycle {
    #[serde(default)]
    pub id: Option<i64>,
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

/// Body of `POST /testexecutions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    pub project_key: String,
    pub test_case_key: String,
    pub test_cycle_key: String,
    pub status_name: String,
    pub execution_time: i64,
    pub environment_name: String,
    pub actual_end_date: String,
    pub comment: String,
}

impl ExecutionRequest {
    pub fn from_record(project_key: &str, test_cycle_key: &str, record: &ExecutionRecord) -> Self {
        Self {
            project_key: project_key.to_string(),
            test_case_key: record.case_key().to_string(),
            test_cycle_key: test_cycle_key.to_string(),
            status_name: record.status().as_str().to_string(),
            execution_time: record.duration_ms(),
            environment_name: record.environment().to_string(),
            actual_end_date: record.actual_end_date().to_string(),
            comment: record.comment().to_string(),
        }
    }
}

/// Outcome class of an HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    ClientError,
    /// 5xx, or no response at all.
    ServerError,
    Unexpected,
}

impl ResponseClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => ResponseClass::Success,
            400..=499 => ResponseClass::ClientError,
            500..=599 => ResponseClass::ServerError,
            _ => ResponseClass::Unexpected,
        }
    }
}

/// Result of posting one execution. Posting never fails with an error; the
/// outcome is always reported through this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResult {
    pub request: ExecutionRequest,
    pub class: ResponseClass,
    /// HTTP status, absent when the request never got a response.
    pub status: Option<u16>,
    pub error: Option<ErrorResponse>,
}

impl PostResult {
    pub fn posted(&self) -> bool {
        self.class == ResponseClass::Success
    }

    pub fn is_server_error(&self) -> bool {
        self.class == ResponseClass::ServerError
    }

    pub fn is_client_error(&self) -> bool {
        self.class == ResponseClass::ClientError
    }
}
