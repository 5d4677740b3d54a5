//! `.zephyr-sync.toml` configuration.
//!
//! The file is optional. It is looked up in the current directory and its
//! ancestors; command-line flags take precedence over every value in it.

mod core;
mod loader;

pub use self::core::{
    default_environment, default_max_case_results, default_max_status_results,
    default_output_dir, default_timeout_secs, AllureConfig, ApiConfig, CheckerConfig,
    ZephyrSyncConfig, CONFIG_FILE_NAME,
};
pub use loader::{directory_ancestors, load_config, load_config_from, parse_and_validate_config};
