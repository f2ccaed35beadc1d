//! Configuration file loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tonewav::GenerationRequest;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TONEWAV_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "tonewav.json";

/// Output file used when the config does not name one.
pub const DEFAULT_OUTPUT: &str = "test.wav";

/// Everything one run needs.
///
/// On disk this is a single JSON object: an optional `output` key next to
/// the [`GenerationRequest`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Destination file.
    pub output: PathBuf,
    /// Tone parameters.
    pub request: GenerationRequest,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: default_output(),
            request: GenerationRequest::default(),
        }
    }
}

impl Settings {
    /// Parses settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(text)?;
        let object = value
            .as_object_mut()
            .ok_or_else(|| anyhow!("config must be a JSON object"))?;

        let output = match object.remove("output") {
            Some(output) => serde_json::from_value(output).context("Invalid 'output' path")?,
            None => default_output(),
        };
        let request = serde_json::from_value(value)?;

        Ok(Self { output, request })
    }

    /// Reads settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Resolves the config source.
    ///
    /// An explicit path (from [`CONFIG_ENV`]) must exist. Otherwise
    /// [`DEFAULT_CONFIG_FILE`] in `dir` is used if present, and built-in
    /// defaults if not.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        let local = dir.join(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Ok((Self::from_file(&local)?, Some(local)));
        }

        Ok((Self::default(), None))
    }
}
