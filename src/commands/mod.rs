//! CLI command implementations.
//!
//! - **debug**: parse Allure results and log what would be posted
//! - **allure**: push Allure results into a new test cycle
//! - **xml**: cross-check JUnit reports against the TCM catalog
//! - **init**: write a default configuration file

pub mod allure;
pub mod debug;
pub mod init;
pub mod xml;

pub use allure::{push_allure_results, AllurePushConfig, PushSummary};
pub use debug::{dry_run, DryRunSummary};
pub use init::init_config;
pub use xml::{check_xml, run_xml_check, XmlCheckConfig};
