//! Application configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level gradebook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Base URL of the records API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory report files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradebook-reports")
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from the well-known paths.
///
/// Search order:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// Environment variable override: `GRADEBOOK_API_URL`.
pub fn load_config() -> Result<GradebookConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else if let Some(global) = global_config_path() {
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GradebookConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    if let Ok(url) = std::env::var("GRADEBOOK_API_URL") {
        config.api_url = url;
    }
    config.api_url = resolve_env_vars(&config.api_url);

    Ok(config)
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GradebookConfig::default();
        assert_eq!(config.api_url, "http://127.0.0.1:8000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.output_dir, PathBuf::from("./gradebook-reports"));
    }

    #[test]
    fn parse_partial_config_fills_defaults() {
        let config: GradebookConfig =
            toml::from_str("api_url = \"http://records.example:9000\"").unwrap();
        assert_eq!(config.api_url, "http://records.example:9000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_GRADEBOOK_TEST_VAR", "records.example");
        assert_eq!(
            resolve_env_vars("http://${_GRADEBOOK_TEST_VAR}:8000"),
            "http://records.example:8000"
        );
        std::env::remove_var("_GRADEBOOK_TEST_VAR");
    }

    #[test]
    fn explicit_path_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradebook.toml");
        std::fs::write(&path, "api_url = \"http://localhost:9999\"\ntimeout_secs = 5\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.api_url, "http://localhost:9999");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn explicit_missing_path_errors() {
        assert!(load_config_from(Some(Path::new("/nonexistent/gradebook.toml"))).is_err());
    }
}
