use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_CONFIG_FILE: &str = "huffseed.toml";
/// Every byte of the limit is text; no terminator slot is reserved.
pub const DEFAULT_MAX_TEXT_BYTES: usize = 1024;
pub const DEFAULT_LOG_FILTER: &str = "huffseed=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Upper bound on bytes read from an input file.
    pub max_text_bytes: usize,
    pub log_filter: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ToolConfig {
    /// Loads `config_path`, or `huffseed.toml` if present, or the defaults.
    /// An explicitly named file must exist.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        if Path::new(config_file).exists() {
            let content = std::fs::read_to_string(config_file)
                .with_context(|| format!("failed to read config {}", config_file))?;
            let config: ToolConfig = toml::from_str(&content)
                .with_context(|| format!("failed to parse config {}", config_file))?;
            Ok(config)
        } else if config_path.is_some() {
            bail!("config file not found: {}", config_file)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("failed to write config {}", config_path))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_text_bytes == 0 {
            bail!("max_text_bytes must be greater than zero");
        }
        EnvFilter::try_new(&self.log_filter)
            .with_context(|| format!("invalid log_filter {:?}", self.log_filter))?;
        Ok(())
    }

    /// `RUST_LOG` wins over the configured filter.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_filter))
    }
}
