//! Configuration for the docpatch pipeline: the target document, the
//! credentials the external apply collaborator needs, and the folders the
//! surrounding summarization process reads and writes.
//!
//! The engine itself never touches this; it only receives resolved text.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

fn default_lookback_hours() -> u64 {
    48
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Identifier of the target rich-text document.
    pub document_id: String,
    /// Service-account credentials for the document API.
    pub service_account_key: PathBuf,
    /// Folder the generated Markdown summaries are cached in.
    pub summaries_dir: PathBuf,
    /// Folder the synthesized voice notes land in.
    pub voice_notes_dir: PathBuf,
    /// Channel whose uploads feed the pipeline.
    #[serde(default)]
    pub channel_id: String,
    /// How far back the video fetch looks, in hours.
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u64,
}

impl Config {
    /// Loads from `config_path`; a missing file is `Ok(None)`, not an error.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand tilde and env vars in every path the user wrote by hand
        config.service_account_key =
            expand_path(&config.service_account_key).unwrap_or(config.service_account_key);
        config.summaries_dir = expand_path(&config.summaries_dir).unwrap_or(config.summaries_dir);
        config.voice_notes_dir =
            expand_path(&config.voice_notes_dir).unwrap_or(config.voice_notes_dir);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/docpatch");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}

fn expand_path(path: &Path) -> Option<PathBuf> {
    let path_str = path.to_string_lossy();
    match shellexpand::full(&path_str) {
        Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
        Err(_) => None,
    }
}
