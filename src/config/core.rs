use crate::tcm::ApiFlavor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = ".zephyr-sync.toml";

pub fn default_timeout_secs() -> u64 {
    30
}

pub fn default_max_case_results() -> u32 {
    1900
}

pub fn default_max_status_results() -> u32 {
    10
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_environment() -> String {
    "Android - Portrait".to_string()
}

/// Root configuration structure for zephyr-sync
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZephyrSyncConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub checker: CheckerConfig,

    #[serde(default)]
    pub allure: AllureConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Overrides the base url implied by the selected API flavor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default)]
    pub flavor: ApiFlavor,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            flavor: ApiFlavor::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.flavor.base_url())
    }
}

/// Page sizes used when fetching the remote catalog, and where reports go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    #[serde(default = "default_max_case_results")]
    pub max_case_results: u32,

    #[serde(default = "default_max_status_results")]
    pub max_status_results: u32,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_case_results: default_max_case_results(),
            max_status_results: default_max_status_results(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllureConfig {
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for AllureConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
        }
    }
}

impl ZephyrSyncConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.api.timeout_secs == 0 {
            return Err("api.timeout_secs must be greater than zero".to_string());
        }
        if self.checker.max_case_results == 0 || self.checker.max_status_results == 0 {
            return Err("checker page sizes must be greater than zero".to_string());
        }
        if self.allure.environment.trim().is_empty() {
            return Err("allure.environment must not be blank".to_string());
        }
        Ok(())
    }
}
