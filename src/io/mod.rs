pub mod allure;
pub mod junit;
pub mod output;
pub mod writers;

pub use allure::{read_allure_results, AllureResult, AllureStatus};
pub use junit::{case_identities, filter_suites, read_junit_report, TestCase, TestSuite};
pub use output::{write_reports, OutputFormat, OutputWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
