use crate::core::Platform;
use crate::tcm::ApiFlavor;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zephyr-sync")]
#[command(about = "Sync test reports with Zephyr Scale / TM4J", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Credentials and endpoint shared by every mode that talks to the TCM.
#[derive(Args, Debug, Clone)]
pub struct TcmArgs {
    /// API token used as a bearer credential
    #[arg(long, env = "ZEPHYR_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Jira project key, e.g. PROJ
    #[arg(long)]
    pub project_key: String,

    /// Which public API to talk to
    #[arg(long, value_enum)]
    pub api: Option<ApiFlavor>,

    /// Base url overriding the selected API (for self-hosted or test servers)
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse Allure results and log what would be posted, without posting
    Debug {
        /// Allure results directory
        #[arg(long)]
        report_from: PathBuf,

        /// Environment name attached to every execution
        #[arg(long)]
        environment: Option<String>,
    },

    /// Push Allure results into a new test cycle
    Allure {
        #[command(flatten)]
        tcm: TcmArgs,

        /// Allure results directory
        #[arg(long)]
        report_from: PathBuf,

        /// Name of the test cycle to create
        #[arg(long)]
        cycle_name: String,

        /// Description of the test cycle to create
        #[arg(long, default_value = "")]
        cycle_description: String,

        /// Environment name attached to every execution
        #[arg(long)]
        environment: Option<String>,
    },

    /// Cross-check case keys in JUnit XML reports against the TCM catalog
    Xml {
        #[command(flatten)]
        tcm: TcmArgs,

        /// JUnit XML report file or directory
        #[arg(long)]
        report_from: PathBuf,

        /// Platform whose automation status is checked
        #[arg(long, value_enum)]
        platform: Platform,

        /// Push corrective automation-status updates to the TCM
        #[arg(long)]
        update_cases: bool,

        /// Only check suites whose name contains this text
        #[arg(long)]
        suite_name_contains: Option<String>,

        /// Directory receiving zephyr.checker.result.{json,md}
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Initialize a configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
