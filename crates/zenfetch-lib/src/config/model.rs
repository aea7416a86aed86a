use crate::error::ZenfetchError;
use crate::record::record_url;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use url::Url;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base of the record metadata endpoint; the record id is appended to it.
    pub api_url: String,
    pub record_id: String,
    /// Exact file names to download from the record, in order.
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Downloaded zip archives to unpack into the output directory.
    #[serde(default)]
    pub extract: Vec<String>,
    /// Writes the checkpoint pointer file when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<CheckpointConfig>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CheckpointConfig {
    #[serde(default = "default_pointer_subpath")]
    pub pointer_subpath: PathBuf,
    #[serde(default = "default_checkpoint_subpath")]
    pub checkpoint_subpath: PathBuf,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            pointer_subpath: default_pointer_subpath(),
            checkpoint_subpath: default_checkpoint_subpath(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_pointer_subpath() -> PathBuf {
    PathBuf::from("data/config/last_checkpoint")
}

fn default_checkpoint_subpath() -> PathBuf {
    PathBuf::from("data/config/checkpoint.pth")
}

impl Config {
    pub fn validate(&self) -> Result<(), ZenfetchError> {
        if self.record_id.trim().is_empty() {
            return Err(ZenfetchError::ConfigValidation {
                details: "record_id cannot be empty".to_string(),
            });
        }

        if self.files.is_empty() {
            return Err(ZenfetchError::ConfigValidation {
                details: "No files to download. Configure at least one entry in files.".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if file.is_empty() || file == "." || file == ".." || file.contains(['/', '\\']) {
                return Err(ZenfetchError::ConfigValidation {
                    details: format!("Invalid file name '{file}'"),
                });
            }
            if !seen.insert(file.as_str()) {
                return Err(ZenfetchError::ConfigValidation {
                    details: format!("File '{file}' is listed more than once"),
                });
            }
        }

        if let Some(archive) = self.extract.iter().find(|name| !seen.contains(name.as_str())) {
            return Err(ZenfetchError::ConfigValidation {
                details: format!("Archive '{archive}' is not among the downloaded files"),
            });
        }

        self.record_url()?;
        Ok(())
    }

    /// Metadata endpoint of the configured record.
    pub fn record_url(&self) -> Result<Url, ZenfetchError> {
        record_url(&self.api_url, &self.record_id)
    }
}
