use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# zephyr-sync configuration

[api]
# One of "zephyr" or "tm4j"; base_url overrides the flavor's endpoint
flavor = "zephyr"
timeout_secs = 30

[checker]
max_case_results = 1900
max_status_results = 10
output_dir = "."

[allure]
environment = "Android - Portrait"
"#;

/// Writes a default `.zephyr-sync.toml` into `dir`.
pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
