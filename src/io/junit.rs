//! JUnit-style XML report ingestion.
//!
//! Reports are either a `<testsuites>` document or a single `<testsuite>`
//! document. A directory argument is walked recursively and every `*.xml`
//! file found is read in path order.
//!
//! Only names are typed. Counters, timings and outcome children vary between
//! runners and are skipped, so `<system-out>` between test cases and values
//! like `time=""` never reject a report.

use crate::errors::IngestError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TestSuites {
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "testsuite", default)]
    pub suites: Vec<TestSuite>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TestSuite {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "testcase", default)]
    pub cases: Vec<TestCase>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TestCase {
    #[serde(rename = "@classname", default)]
    pub classname: String,
    #[serde(rename = "@name", default)]
    pub name: String,
}

impl TestCase {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.classname, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootElement {
    Suites,
    Suite,
}

fn detect_root(content: &str, path: &Path) -> Result<RootElement, IngestError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return match e.name().as_ref() {
                    b"testsuites" => Ok(RootElement::Suites),
                    b"testsuite" => Ok(RootElement::Suite),
                    other => Err(IngestError::xml(
                        path,
                        format!(
                            "unexpected root element <{}>",
                            String::from_utf8_lossy(other)
                        ),
                    )),
                };
            }
            Ok(Event::Eof) => return Err(IngestError::xml(path, "document has no root element")),
            Ok(_) => {}
            Err(e) => return Err(IngestError::xml(path, e.to_string())),
        }
    }
}

/// Parses one XML document into its suites.
pub fn parse_junit(content: &str, path: &Path) -> Result<Vec<TestSuite>, IngestError> {
    let suites = match detect_root(content, path)? {
        RootElement::Suites => {
            quick_xml::de::from_str::<TestSuites>(content)
                .map_err(|e| IngestError::xml(path, e.to_string()))?
                .suites
        }
        RootElement::Suite => vec![quick_xml::de::from_str::<TestSuite>(content)
            .map_err(|e| IngestError::xml(path, e.to_string()))?],
    };
    Ok(suites)
}

fn collect_xml_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| IngestError::Walk {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let is_xml = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if entry.file_type().is_file() && is_xml {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Reads a report file, or every `*.xml` file under a report directory.
pub fn read_junit_report(path: &Path) -> Result<Vec<TestSuite>, IngestError> {
    if !path.exists() {
        return Err(IngestError::MissingPath(path.to_path_buf()));
    }

    let files = if path.is_dir() {
        collect_xml_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut suites = Vec::new();
    for file in &files {
        let content = fs::read_to_string(file).map_err(|e| IngestError::io(file, e))?;
        let parsed = parse_junit(&content, file)?;
        log::debug!("{} suites in {}", parsed.len(), file.display());
        suites.extend(parsed);
    }
    log::info!(
        "Read {} test suites from {} XML files",
        suites.len(),
        files.len()
    );
    Ok(suites)
}

/// Keeps suites whose name contains `needle`; all suites when no filter is set.
pub fn filter_suites(suites: Vec<TestSuite>, needle: Option<&str>) -> Vec<TestSuite> {
    match needle {
        Some(needle) => suites
            .into_iter()
            .filter(|suite| suite.name.contains(needle))
            .collect(),
        None => suites,
    }
}

/// `(classname, name)` of every test case, in document order.
pub fn case_identities(suites: &[TestSuite]) -> Vec<(&str, &str)> {
    suites
        .iter()
        .flat_map(|suite| suite.cases.iter())
        .map(|case| (case.classname.as_str(), case.name.as_str()))
        .collect()
}
