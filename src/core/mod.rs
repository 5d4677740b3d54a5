//! Domain types shared by the ingest, remote and reconciliation layers.

pub mod execution;
pub mod report;
pub mod test_case;

pub use execution::{epoch_millis_to_iso, ExecutionRecord, ExecutionStatus};
pub use report::{
    CoveragePercentages, CoverageReport, LocalCaseReference, ReconciliationOutput, StatusCounts,
    TsmComparison,
};
pub use test_case::{AutomationStatus, CustomFields, IdSelf, Platform, RemoteTestCase};
