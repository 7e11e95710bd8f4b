//! Configuration for locating and running the cpdf binary
//!
//! Configuration is always handed to [`crate::Cpdf::new`] explicitly. It can
//! be built in code, parsed from TOML, or seeded from environment variables:
//!
//! ```toml
//! binary = "/usr/local/bin/cpdf"
//! temp_dir = "/var/tmp/cpdf"
//! temp_prefix = "cpdf-"
//!
//! [env]
//! LANG = "C"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CpdfError;

/// Environment variable overriding [`CpdfConfig::binary`]
pub const BINARY_ENV: &str = "CPDF_BIN";
/// Environment variable overriding [`CpdfConfig::temp_dir`]
pub const TEMP_DIR_ENV: &str = "CPDF_TMP_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpdfConfig {
    /// Path to the cpdf executable (default: "cpdf" - uses PATH)
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Directory for allocated output files (default: system temp)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// File name prefix for allocated output files
    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,
    /// Extra environment variables set on every child process
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn default_binary() -> PathBuf {
    PathBuf::from("cpdf")
}

fn default_temp_prefix() -> String {
    "cpdf-".to_string()
}

impl Default for CpdfConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            temp_dir: None,
            temp_prefix: default_temp_prefix(),
            env: BTreeMap::new(),
        }
    }
}

impl CpdfConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`CpdfError::Config`] if the file cannot be read or the TOML
    /// is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CpdfError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CpdfError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, CpdfError> {
        toml::from_str(s)
            .map_err(|e| CpdfError::Config(format!("Failed to parse TOML configuration: {}", e)))
    }

    /// Defaults overridden by `CPDF_BIN` and `CPDF_TMP_DIR` when set
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var_os(key))
    }

    fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        if let Some(binary) = lookup(BINARY_ENV).filter(|v| !v.is_empty()) {
            self.binary = PathBuf::from(binary);
        }
        if let Some(dir) = lookup(TEMP_DIR_ENV).filter(|v| !v.is_empty()) {
            self.temp_dir = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Directory used for allocated output paths
    pub fn resolved_temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::ffi::OsString;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = CpdfConfig::from_str("").unwrap();
        assert_eq!(config, CpdfConfig::default());
        assert_eq!(config.binary, PathBuf::from("cpdf"));
        assert_eq!(config.temp_prefix, "cpdf-");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            binary = "/opt/cpdf/bin/cpdf"
            temp_dir = "/var/tmp/cpdf"
            temp_prefix = "job-"

            [env]
            LANG = "C"
        "#;

        let config = CpdfConfig::from_str(toml).unwrap();
        assert_eq!(config.binary, PathBuf::from("/opt/cpdf/bin/cpdf"));
        assert_eq!(config.temp_dir, Some(PathBuf::from("/var/tmp/cpdf")));
        assert_eq!(config.temp_prefix, "job-");
        assert_eq!(config.env.get("LANG").map(String::as_str), Some("C"));
    }

    #[test]
    fn test_parse_malformed_config_fails() {
        let result = CpdfConfig::from_str("binary = [");
        assert!(matches!(result, Err(CpdfError::Config(_))));
    }

    #[test]
    fn test_from_file_missing_fails() {
        let result = CpdfConfig::from_file("/nonexistent/cpdf.toml");
        assert!(matches!(result, Err(CpdfError::Config(_))));
    }

    #[test]
    fn test_from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpdf.toml");
        fs::write(&path, "binary = \"/usr/bin/cpdf\"\n").unwrap();

        let config = CpdfConfig::from_file(&path).unwrap();
        assert_eq!(config.binary, PathBuf::from("/usr/bin/cpdf"));
    }

    #[test]
    fn test_env_overrides() {
        let config = CpdfConfig::default().with_env_overrides(|key| match key {
            BINARY_ENV => Some(OsString::from("/custom/cpdf")),
            TEMP_DIR_ENV => Some(OsString::from("/scratch")),
            _ => None,
        });
        assert_eq!(config.binary, PathBuf::from("/custom/cpdf"));
        assert_eq!(config.resolved_temp_dir(), PathBuf::from("/scratch"));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = CpdfConfig::default().with_env_overrides(|_| Some(OsString::new()));
        assert_eq!(config, CpdfConfig::default());
    }

    #[test]
    fn test_resolved_temp_dir_defaults_to_system_temp() {
        assert_eq!(CpdfConfig::default().resolved_temp_dir(), std::env::temp_dir());
    }
}
