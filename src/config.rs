use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utils::constants::{
    CALM_SOURCE_URL, CONFIG_ENV_PREFIX, CONFIG_FILE_STEM, DEFAULT_OUTPUT_PREFIX,
};
use crate::utils::filename::source_file_name;

/// Runtime settings for a conversion run.
///
/// Layered, lowest precedence first: built-in defaults, `calm-processor.toml`
/// in the working directory (or an explicit file), then `CALM_*` environment
/// variables. Command-line flags are applied on top by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub source_url: String,
    /// Directory holding the downloaded spreadsheet
    pub work_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: CALM_SOURCE_URL.to_string(),
            work_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

impl Settings {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("source_url", defaults.source_url)?
            .set_default("work_dir", defaults.work_dir.to_string_lossy().to_string())?
            .set_default(
                "output_dir",
                defaults.output_dir.to_string_lossy().to_string(),
            )?
            .set_default("output_prefix", defaults.output_prefix)?;

        builder = match config_path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(CONFIG_FILE_STEM).required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn with_source_url(mut self, source_url: Option<String>) -> Self {
        if let Some(url) = source_url {
            self.source_url = url;
        }
        self
    }

    pub fn with_work_dir(mut self, work_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = work_dir {
            self.work_dir = dir;
        }
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn with_output_prefix(mut self, prefix: Option<String>) -> Self {
        if let Some(prefix) = prefix {
            self.output_prefix = prefix;
        }
        self
    }

    /// Where the source spreadsheet lives (or will live once downloaded)
    pub fn local_source_path(&self) -> Result<PathBuf> {
        Ok(self.work_dir.join(source_file_name(&self.source_url)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(
            &path,
            "output_dir = \"/tmp/calm-out\"\noutput_prefix = \"ALT\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("/tmp/calm-out"));
        assert_eq!(settings.output_prefix, "ALT");
        assert_eq!(settings.work_dir, PathBuf::from("."));
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = Settings::load(Some(&temp_dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_flag_overrides() {
        let settings = Settings::default()
            .with_output_prefix(Some("TEST".to_string()))
            .with_work_dir(Some(PathBuf::from("/data")))
            .with_output_dir(None);

        assert_eq!(settings.output_prefix, "TEST");
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert_eq!(
            settings.local_source_path().unwrap(),
            PathBuf::from("/data/CALM_Summary_table.xls")
        );
    }
}
