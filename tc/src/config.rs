//! Configuration for taskcheck

use eyre::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::checklist::ChecklistSyntax;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Name (and output title) of the check run
    #[serde(default = "default_check_name")]
    pub check_name: String,

    /// Literal that opens an ignore region
    #[serde(default = "default_ignore_start")]
    pub ignore_start: String,

    /// Literal that closes an ignore region
    #[serde(default = "default_ignore_end")]
    pub ignore_end: String,

    /// Checkbox characters that count as done
    #[serde(default = "default_fill_chars")]
    pub fill_chars: String,

    /// GitHub REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// HTTP timeout for the check-run request
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Log level used when --log-level is not given
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_check_name() -> String {
    crate::DEFAULT_CHECK_NAME.to_string()
}

fn default_ignore_start() -> String {
    crate::DEFAULT_IGNORE_START.to_string()
}

fn default_ignore_end() -> String {
    crate::DEFAULT_IGNORE_END.to_string()
}

fn default_fill_chars() -> String {
    crate::DEFAULT_FILL_CHARS.to_string()
}

fn default_api_url() -> String {
    crate::github::DEFAULT_API_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_name: default_check_name(),
            ignore_start: default_ignore_start(),
            ignore_end: default_ignore_end(),
            fill_chars: default_fill_chars(),
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from(config_path);
        }

        // Try default locations
        let default_paths = [
            Some(PathBuf::from("taskcheck.yml")),
            dirs::config_dir().map(|p| p.join("taskcheck").join("config.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        Ok(Config::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        debug!("Config::load_from: path={}", path.display());
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read config file {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).context(format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Checklist markup conventions from this config
    pub fn syntax(&self) -> ChecklistSyntax {
        ChecklistSyntax {
            ignore_start: self.ignore_start.clone(),
            ignore_end: self.ignore_end.clone(),
            fill_chars: self.fill_chars.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.check_name, "Tasks Completed Check");
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.syntax(), ChecklistSyntax::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("taskcheck.yml");
        std::fs::write(&path, "check_name: Checklist\nignore_start: \"<!--ignore--\"\nignore_end: \"--ignore-->\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.check_name, "Checklist");
        assert_eq!(config.fill_chars, "xX");
        assert_eq!(config.timeout_ms, 30_000);

        let syntax = config.syntax();
        assert_eq!(syntax.ignore_start, "<!--ignore--");
        assert_eq!(syntax.ignore_end, "--ignore-->");
    }

    #[test]
    fn test_full_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(
            &path,
            "check_name: Tasks\nfill_chars: \"xX✓\"\napi_url: https://ghe.example.com/api/v3\ntimeout_ms: 5000\nlog_level: debug\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.syntax().fill_chars, "xX✓");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        std::fs::write(&path, "timeout_ms: [not, a, number]").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
