//! Configuration for the generation pipeline.
//!
//! Supports loading configuration from a config file and environment
//! variables, with environment variables taking precedence.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// Configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory copied verbatim into the output root before any module is written.
    #[serde(default = "default_support_dir")]
    pub support_dir: PathBuf,

    /// Name of the output root created under the target directory.
    #[serde(default = "default_output_dir_name")]
    pub output_dir_name: String,

    /// Extension of source and generated module files, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_support_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("support")
}

fn default_output_dir_name() -> String {
    "fp".to_string()
}

fn default_extension() -> String {
    "js".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            support_dir: default_support_dir(),
            output_dir_name: default_output_dir_name(),
            extension: default_extension(),
        }
    }
}

impl Config {
    /// Load configuration from the config file with environment overrides.
    pub fn load() -> GenResult<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| GenError::io(&path, e))?;
                serde_json::from_str(&contents)?
            }
            _ => Self::default(),
        };

        if let Ok(dir) = std::env::var("FP_MODULES_SUPPORT_DIR") {
            config.support_dir = PathBuf::from(dir);
        }
        if let Ok(name) = std::env::var("FP_MODULES_OUTPUT_DIR") {
            config.output_dir_name = name;
        }
        if let Ok(ext) = std::env::var("FP_MODULES_EXTENSION") {
            config.extension = ext;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get the path to the configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "fp-modules", "fp-modules")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Check that names used to build output paths are single path components.
    pub fn validate(&self) -> GenResult<()> {
        for (key, value) in [
            ("output_dir_name", &self.output_dir_name),
            ("extension", &self.extension),
        ] {
            if value.is_empty() {
                return Err(GenError::Config(format!("{key} must not be empty")));
            }
            if value.contains(['/', '\\']) || value == ".." {
                return Err(GenError::Config(format!(
                    "{key} must not contain path separators: {value}"
                )));
            }
        }
        Ok(())
    }

    /// File name for a module with the configured extension.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension)
    }

    /// Output root for a target directory.
    pub fn output_root(&self, target: &Path) -> PathBuf {
        target.join(&self.output_dir_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.output_dir_name, "fp");
        assert_eq!(config.extension, "js");
        assert!(config.support_dir.ends_with("support"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_paths() {
        let config = Config::default();

        assert_eq!(config.file_name("map"), "map.js");
        assert_eq!(
            config.output_root(Path::new("/tmp/lib")),
            PathBuf::from("/tmp/lib/fp")
        );
    }

    #[test]
    fn test_invalid_names_rejected() {
        let config = Config {
            output_dir_name: "../escape".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GenError::Config(_))));

        let config = Config {
            extension: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GenError::Config(_))));
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "extension": "mjs" }"#).unwrap();

        assert_eq!(config.extension, "mjs");
        assert_eq!(config.output_dir_name, "fp");
    }
}
