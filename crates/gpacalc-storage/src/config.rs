//! gpacalc configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gpacalc_core::model::DEFAULT_CREDIT;
use gpacalc_core::store::StoreConfig;

/// Top-level gpacalc configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpacalcConfig {
    /// File holding the persisted record.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Credit given to newly added courses.
    #[serde(default = "default_credit")]
    pub default_credit: f64,
}

fn default_data_file() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("gpacalc")
            .join("record.json"),
        _ => PathBuf::from("gpacalc-data.json"),
    }
}

fn default_credit() -> f64 {
    DEFAULT_CREDIT
}

impl Default for GpacalcConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_credit: default_credit(),
        }
    }
}

impl GpacalcConfig {
    /// Store settings derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            default_credit: self.default_credit,
        }
    }
}

/// Expand `${VAR_NAME}` references in a string.
///
/// Substituted values are copied through verbatim and never re-scanned.
/// Unset variables expand to an empty string; an unterminated `${` is kept.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the well-known locations.
///
/// Search order without an explicit path:
/// 1. `gpacalc.toml` in the current directory
/// 2. `~/.config/gpacalc/config.toml`
///
/// Environment variable override: `GPACALC_DATA_FILE`.
pub fn load_config_from(path: Option<&Path>) -> Result<GpacalcConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gpacalc.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
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
            let config = toml::from_str::<GpacalcConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => GpacalcConfig::default(),
    };

    if let Ok(data_file) = std::env::var("GPACALC_DATA_FILE") {
        if !data_file.is_empty() {
            config.data_file = PathBuf::from(data_file);
        }
    }

    config.data_file = PathBuf::from(resolve_env_vars(&config.data_file.to_string_lossy()));

    anyhow::ensure!(
        config.default_credit.is_finite() && config.default_credit > 0.0,
        "default_credit must be a positive number, got {}",
        config.default_credit
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gpacalc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_GPACALC_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_GPACALC_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_GPACALC_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_vars"), "no_vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_GPACALC_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_GPACALC_LOOP_VAR", "a${_GPACALC_LOOP_VAR}b");
        assert_eq!(
            resolve_env_vars("${_GPACALC_LOOP_VAR}/x"),
            "a${_GPACALC_LOOP_VAR}b/x"
        );
        assert_eq!(resolve_env_vars("${_GPACALC_UNSET_VAR}-${"), "-${");
        std::env::remove_var("_GPACALC_LOOP_VAR");
    }

    #[test]
    fn default_config() {
        let config = GpacalcConfig::default();
        assert_eq!(config.default_credit, 3.0);
        assert!(config.data_file.ends_with("record.json") || config.data_file.ends_with("gpacalc-data.json"));
        assert_eq!(config.store_config().default_credit, 3.0);
    }

    #[test]
    fn parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpacalc.toml");
        std::fs::write(
            &path,
            r#"
data_file = "/tmp/${_GPACALC_PARSE_TEST}/record.json"
default_credit = 4.5
"#,
        )
        .unwrap();
        std::env::set_var("_GPACALC_PARSE_TEST", "grades");

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_credit, 4.5);
        if std::env::var("GPACALC_DATA_FILE").is_err() {
            assert_eq!(config.data_file, PathBuf::from("/tmp/grades/record.json"));
        }
        std::env::remove_var("_GPACALC_PARSE_TEST");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/gpacalc.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn non_positive_default_credit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpacalc.toml");
        std::fs::write(&path, "default_credit = 0.0\n").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("default_credit"));
    }
}
