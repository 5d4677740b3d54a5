//! Bidirectional comparison of local case references against the remote catalog.
//!
//! The forward pass walks the remote snapshot and reports automated cases no
//! local test references. The backward pass walks the local references and
//! reports keys unknown to the TCM, cases lacking the automated status, and
//! deprecated cases still referenced from code.
//!
//! When updates are enabled, corrective automation-status changes are pushed
//! one case at a time. A failed push is reported next to its finding and
//! never stops the run. Failed pushes are not retried.

use crate::core::{AutomationStatus, LocalCaseReference, Platform, RemoteTestCase, TsmComparison};
use crate::tcm::TcmApi;
use std::fmt;

/// What happened to the corrective update attached to a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Ok,
    Failed,
    Disabled,
}

impl fmt::Display for PushOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushOutcome::Ok => f.write_str("[Update OK]"),
            PushOutcome::Failed => f.write_str("[Update FAILED]"),
            PushOutcome::Disabled => f.write_str("[Update DISABLED]"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub platform: Platform,
    pub update_cases: bool,
}

pub struct Reconciler<'a, C: TcmApi> {
    client: &'a C,
    options: ReconcileOptions,
}

impl<'a, C: TcmApi> Reconciler<'a, C> {
    pub fn new(client: &'a C, options: ReconcileOptions) -> Self {
        Self { client, options }
    }

    /// Compares `locals` against `snapshot`.
    ///
    /// The snapshot is read-only; staged updates are computed as new values.
    pub async fn reconcile(
        &self,
        snapshot: &[RemoteTestCase],
        deprecated_status_id: i64,
        locals: &[LocalCaseReference],
    ) -> TsmComparison {
        let mut comparison = TsmComparison::default();

        log::info!("Will compare TSM with Code");
        self.forward_pass(snapshot, deprecated_status_id, locals, &mut comparison)
            .await;

        log::info!("Will compare Code with TSM");
        self.backward_pass(snapshot, deprecated_status_id, locals, &mut comparison)
            .await;

        log::info!("Done, {} findings", comparison.finding_count());
        comparison
    }

    async fn forward_pass(
        &self,
        snapshot: &[RemoteTestCase],
        deprecated_status_id: i64,
        locals: &[LocalCaseReference],
        comparison: &mut TsmComparison,
    ) {
        let platform = self.options.platform;
        let automated = snapshot
            .iter()
            .filter(|case| case.is_automated_on(platform) && !case.has_status(deprecated_status_id));

        for remote in automated {
            if locals.iter().any(|local| local.key == remote.key) {
                continue;
            }
            let finding = format!("{} {}", remote.key, remote.name);
            log::error!("[Missing case in Code]: {}", finding);
            let outcome = self.push(remote, AutomationStatus::None).await;
            comparison
                .should_be_in_code
                .push(format!("{finding} {outcome}"));
        }
    }

    async fn backward_pass(
        &self,
        snapshot: &[RemoteTestCase],
        deprecated_status_id: i64,
        locals: &[LocalCaseReference],
        comparison: &mut TsmComparison,
    ) {
        let platform = self.options.platform;

        for local in locals {
            let finding = format!("{} in {}", local.key, local.test_name);
            let Some(remote) = find_case(snapshot, &local.key) else {
                log::error!("[Missing case in TSM]: {}", finding);
                comparison.should_be_in_zephyr.push(finding);
                continue;
            };

            if !remote.is_automated_on(platform) {
                log::error!("[Missing automation status for {}]: {}", platform, finding);
                let outcome = self.push(remote, AutomationStatus::Done).await;
                comparison.missing_status.push(format!("{finding} {outcome}"));
            }

            if remote.has_status(deprecated_status_id) {
                log::error!("[Deprecated case]: {}", finding);
                comparison.deprecated_case.push(finding);
            }
        }
    }

    /// Pushes `case` with its platform status replaced by `status`, if updates are on.
    async fn push(&self, case: &RemoteTestCase, status: AutomationStatus) -> PushOutcome {
        if !self.options.update_cases {
            log::info!("Case update disabled, won't update TSM");
            return PushOutcome::Disabled;
        }

        let staged = case.with_automation_status(self.options.platform, status);
        match self.client.update_test_case(&staged).await {
            Ok(()) => PushOutcome::Ok,
            Err(e) => {
                log::error!("Error updating test case {}: {}", case.key, e);
                PushOutcome::Failed
            }
        }
    }
}

/// First remote case with `key`.
fn find_case<'s>(snapshot: &'s [RemoteTestCase], key: &str) -> Option<&'s RemoteTestCase> {
    snapshot.iter().find(|case| case.key == key)
}
