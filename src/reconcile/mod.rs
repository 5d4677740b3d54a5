//! The XML checker: key extraction, duplicate detection, TCM comparison and
//! automation coverage.

pub mod coverage;
pub mod duplicates;
pub mod engine;
pub mod extractor;

pub use coverage::compute_coverage;
pub use duplicates::find_duplicate_keys;
pub use engine::{PushOutcome, ReconcileOptions, Reconciler};
pub use extractor::{Extraction, IdentifierExtractor};
