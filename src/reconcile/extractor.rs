//! Pulls TCM case keys out of local test names.
//!
//! Test names carry the key as `{PROJECT}_T{digits}` since `-` is not valid
//! in most test identifiers. The extracted key is normalized back to the TCM
//! form `{PROJECT}-T{digits}`.

use crate::core::LocalCaseReference;
use regex::Regex;

/// Result of scanning a set of test names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub references: Vec<LocalCaseReference>,
    /// `classname.testName` of every test without a key, in input order.
    pub missing_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct IdentifierExtractor {
    project_key: String,
    pattern: Regex,
}

impl IdentifierExtractor {
    pub fn new(project_key: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"{}_T(\d+)", regex::escape(project_key)))?;
        Ok(Self {
            project_key: project_key.to_string(),
            pattern,
        })
    }

    /// Normalized key of the first match in `test_name`, if any.
    pub fn extract_key(&self, test_name: &str) -> Option<String> {
        self.pattern
            .captures(test_name)
            .map(|caps| format!("{}-T{}", self.project_key, &caps[1]))
    }

    /// Splits `(classname, test_name)` pairs into keyed references and
    /// names lacking a key.
    pub fn extract<'a, I>(&self, tests: I) -> Extraction
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut extraction = Extraction::default();
        for (classname, test_name) in tests {
            match self.extract_key(test_name) {
                Some(key) => extraction
                    .references
                    .push(LocalCaseReference::new(key, test_name)),
                None => {
                    let qualified = format!("{classname}.{test_name}");
                    log::error!("[Missing case Id]: {}", qualified);
                    extraction.missing_ids.push(qualified);
                }
            }
        }
        extraction
    }
}
