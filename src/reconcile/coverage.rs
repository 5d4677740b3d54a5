//! Automation coverage over the non-deprecated part of the remote catalog.
//!
//! Cases whose automation status is Won't, Duplicate or Deprecated cannot be
//! automated and are taken out of the "can be automated" denominator.
//! Percentages whose denominator is zero are reported as `0.0`.

use crate::core::{
    AutomationStatus, CoveragePercentages, CoverageReport, Platform, RemoteTestCase, StatusCounts,
};

pub fn compute_coverage(
    snapshot: &[RemoteTestCase],
    deprecated_status_id: i64,
    platform: Platform,
) -> CoverageReport {
    let mut counts = StatusCounts::default();
    let mut non_deprecated = 0usize;

    for case in snapshot.iter().filter(|c| !c.has_status(deprecated_status_id)) {
        non_deprecated += 1;
        match case.automation_status(platform) {
            AutomationStatus::None => counts.none += 1,
            AutomationStatus::Done => counts.done += 1,
            AutomationStatus::Wont => counts.wont += 1,
            AutomationStatus::Deprecated => counts.deprecated += 1,
            AutomationStatus::Duplicate => counts.duplicate += 1,
        }
    }

    let total_wont = counts.wont + counts.duplicate + counts.deprecated;
    let can_be_automated = non_deprecated.saturating_sub(total_wont);

    let percentages = CoveragePercentages {
        wont: percent(total_wont, non_deprecated),
        can_be_automated: percent(can_be_automated, non_deprecated),
        automated_of_can_be: percent(counts.done, can_be_automated),
        automated_of_total: percent(counts.done, non_deprecated),
        not_automated_of_can_be: percent(counts.none, can_be_automated),
        not_automated_of_total: percent(counts.none, non_deprecated),
    };

    log::info!(
        "Coverage for {}: {} of {} automatable cases automated ({:.2}%)",
        platform,
        counts.done,
        can_be_automated,
        percentages.automated_of_can_be
    );

    CoverageReport {
        total_cases: snapshot.len(),
        non_deprecated_cases: non_deprecated,
        count_by_automation_status: counts,
        total_wont,
        can_be_automated,
        percentages,
    }
}

/// `part / whole` as a percentage rounded to two decimals; `0.0` when `whole` is zero.
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 * 100.0 / whole as f64;
    (raw * 100.0).round() / 100.0
}
