//! zephyr-sync reconciles automated-test metadata between local test reports
//! and a Zephyr Scale / TM4J test case management service.
//!
//! It pushes Allure results into new test cycles and cross-checks the case
//! keys embedded in JUnit test names against the remote catalog, optionally
//! correcting the automation status of remote cases.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod reconcile;
pub mod tcm;

pub use crate::core::{
    AutomationStatus, ExecutionRecord, ExecutionStatus, LocalCaseReference, Platform,
    ReconciliationOutput, RemoteTestCase, TsmComparison,
};
pub use crate::errors::{IngestError, TcmError, TcmResult};
