use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use titr_annotate::LexiconConfig;
use titr_extraction::ExtractionConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Bounds the caller enforces before invoking the engine.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    #[serde(default = "LimitsConfig::default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_chars: Self::default_max_input_chars(),
        }
    }
}

impl LimitsConfig {
    const fn default_max_input_chars() -> usize {
        10_000
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "extraction": {
    "allow_duplicate_directives": true
  },
  "lexicon": {
    "extra_lemmas": {
      "понизить": "снизить",
      "понизьте": "снизить"
    }
  },
  "limits": {
    "max_input_chars": 10000
  }
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("titr"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/titr/config.json`, falling back to defaults when it is absent.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {}: {e}", path.display())
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::ensure_config_dir()?.join("config.json");
        Self::write_template(&config_path)?;
        Ok(config_path)
    }

    /// Write the config template to `path`; refuses to overwrite.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        std::fs::write(path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}
