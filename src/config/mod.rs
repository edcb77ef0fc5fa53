pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use toml_config::{TomlConfig, LOG_FORMATS};

pub const DEFAULT_DATA_FILE: &str = "public_docs.json";
pub const DATA_FILE_ENV: &str = "BACKEND_DOCS_FILE";

/// Settings after every source has been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    pub data_file: String,
    pub verbose: bool,
    pub log_format: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            verbose: false,
            log_format: "compact".to_string(),
        }
    }
}

impl DocsConfig {
    /// Merges settings. `data_file` is the command-line or `BACKEND_DOCS_FILE`
    /// value and wins over the TOML file, which wins over the default.
    pub fn resolve(
        data_file: Option<&str>,
        verbose: bool,
        log_format: Option<&str>,
        toml: Option<&TomlConfig>,
    ) -> Self {
        let defaults = Self::default();
        let data_file = data_file
            .or_else(|| toml.and_then(TomlConfig::data_file))
            .map(str::to_string)
            .unwrap_or(defaults.data_file);
        let log_format = log_format
            .or_else(|| toml.and_then(TomlConfig::log_format))
            .map(str::to_string)
            .unwrap_or(defaults.log_format);

        Self {
            data_file,
            verbose: verbose || toml.is_some_and(TomlConfig::verbose),
            log_format,
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

impl ConfigProvider for DocsConfig {
    fn data_file(&self) -> &str {
        &self.data_file
    }
}

impl Validate for DocsConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", &self.data_file)?;
        validate_one_of("log_format", &self.log_format, LOG_FORMATS)
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
