//! Remote Test Case Management access.
//!
//! [`TcmApi`] is the seam between the checker/push pipelines and the HTTP
//! service. Production code uses [`ZephyrClient`]; tests substitute an
//! in-memory implementation. A single client is built per run and passed by
//! reference to whoever needs it.

pub mod client;
pub mod models;

pub use client::{ApiFlavor, ZephyrClient};
pub use models::{
    find_deprecated_status_id, ErrorResponse, ExecutionRequest, PostResult, ResponseClass,
    StatusType, TcmStatus, TestCycle,
};

use crate::core::RemoteTestCase;
use crate::errors::TcmResult;

/// Operations the tool needs from the TCM service.
///
/// Calls are awaited one at a time; implementations need not be `Sync`.
#[allow(async_fn_in_trait)]
pub trait TcmApi {
    /// `GET /testcases`, capped at `max_results` entries.
    async fn fetch_test_cases(
        &self,
        project_key: &str,
        max_results: u32,
    ) -> TcmResult<Vec<RemoteTestCase>>;

    /// `GET /statuses` for one status type.
    async fn fetch_statuses(
        &self,
        project_key: &str,
        status_type: StatusType,
        max_results: u32,
    ) -> TcmResult<Vec<TcmStatus>>;

    /// `POST /testcycles` with `statusName = "Done"`.
    async fn create_test_cycle(
        &self,
        project_key: &str,
        name: &str,
        description: &str,
    ) -> TcmResult<TestCycle>;

    /// `POST /testexecutions`. Never fails; the outcome is classified in the result.
    async fn post_execution(&self, request: &ExecutionRequest) -> PostResult;

    /// `PUT /testcases/{key}` with the full case body.
    async fn update_test_case(&self, case: &RemoteTestCase) -> TcmResult<()>;
}
