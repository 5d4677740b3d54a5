use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{ZephyrSyncConfig, CONFIG_FILE_NAME};

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parses and validates a config document.
pub fn parse_and_validate_config(contents: &str) -> Result<ZephyrSyncConfig, String> {
    let config = toml::from_str::<ZephyrSyncConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;
    config
        .validate()
        .map_err(|e| format!("Invalid {}: {}", CONFIG_FILE_NAME, e))?;
    Ok(config)
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ZephyrSyncConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Only actual errors are logged, not "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Searches `start` and its ancestors for the config file.
pub fn load_config_from(start: PathBuf) -> ZephyrSyncConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ZephyrSyncConfig::default()
        })
}

pub fn load_config() -> ZephyrSyncConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ZephyrSyncConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tcm::ApiFlavor;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [checker]
            max_case_results = 500
        "#})
        .unwrap();
        assert_eq!(config.checker.max_case_results, 500);
        assert_eq!(config.checker.max_status_results, 10);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.allure.environment, "Android - Portrait");
    }

    #[test]
    fn test_flavor_and_base_url() {
        let config = parse_and_validate_config(indoc! {r#"
            [api]
            flavor = "tm4j"
        "#})
        .unwrap();
        assert_eq!(config.api.flavor, ApiFlavor::Tm4j);
        assert_eq!(config.api.resolved_base_url(), ApiFlavor::Tm4j.base_url());

        let config = parse_and_validate_config(indoc! {r#"
            [api]
            base_url = "http://localhost:9000"
        "#})
        .unwrap();
        assert_eq!(config.api.resolved_base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = parse_and_validate_config("[checker]\nmax_status_results = 0\n").unwrap_err();
        assert!(err.contains("page sizes"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(parse_and_validate_config("[api\n").is_err());
    }

    #[test]
    fn test_directory_ancestors_is_bounded() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }

    #[test]
    fn test_finds_config_in_parent_directory() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("one").join("two");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[allure]\nenvironment = \"iOS - Landscape\"\n",
        )
        .unwrap();

        let config = load_config_from(nested);
        assert_eq!(config.allure.environment, "iOS - Landscape");
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join(CONFIG_FILE_NAME), "not = [valid").unwrap();
        assert_eq!(
            load_config_from(root.path().to_path_buf()),
            ZephyrSyncConfig::default()
        );
    }
}
