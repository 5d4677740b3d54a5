use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution status names understood by `POST /testexecutions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionStatus {
    #[serde(rename = "Pass")]
    Pass,
    #[serde(rename = "Fail")]
    Fail,
    #[serde(rename = "Not Executed")]
    NotExecuted,
}

impl ExecutionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionStatus::Pass => "Pass",
            ExecutionStatus::Fail => "Fail",
            ExecutionStatus::NotExecuted => "Not Executed",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One test execution ready to be posted, built from a single report entry.
///
/// Fields are private: a record is never edited after it has been mapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    case_key: String,
    status: ExecutionStatus,
    duration_ms: i64,
    environment: String,
    actual_end_date: String,
    comment: String,
    source_name: String,
}

impl ExecutionRecord {
    pub fn new(
        case_key: impl Into<String>,
        status: ExecutionStatus,
        duration_ms: i64,
        environment: impl Into<String>,
        end_epoch_ms: i64,
        comment: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            case_key: case_key.into(),
            status,
            duration_ms: duration_ms.max(0),
            environment: environment.into(),
            actual_end_date: epoch_millis_to_iso(end_epoch_ms),
            comment: comment.into(),
            source_name: source_name.into(),
        }
    }

    pub fn case_key(&self) -> &str {
        &self.case_key
    }

    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn actual_end_date(&self) -> &str {
        &self.actual_end_date
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Full name of the report entry this record came from.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

/// Formats epoch milliseconds as `YYYY-MM-DDTHH:MM:SSZ` in UTC.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn epoch_millis_to_iso(epoch_ms: i64) -> String {
    let instant: DateTime<Utc> = Utc
        .timestamp_millis_opt(epoch_ms)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
