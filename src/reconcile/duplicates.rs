use crate::core::LocalCaseReference;
use std::collections::BTreeMap;

/// Keys referenced by more than one local test, with their reference count.
///
/// The map iterates in lexical key order.
pub fn find_duplicate_keys(references: &[LocalCaseReference]) -> BTreeMap<String, usize> {
    log::info!("Checking duplicated ids");
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for reference in references {
        *counts.entry(reference.key.clone()).or_default() += 1;
    }
    counts.retain(|_, count| *count > 1);

    if !counts.is_empty() {
        log::error!("Duplicates: {:?}", counts);
    }
    counts
}
