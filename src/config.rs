//! User defaults loaded from `~/.config/blendbatch/config.toml`.
//!
//! ```toml
//! blender_path = "/Applications/Blender.app/Contents/MacOS/Blender"
//! naming_scheme = "semantic"
//! ```
//!
//! Command-line flags override anything set here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::naming::NamingScheme;

/// Optional defaults for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Blender executable to use instead of searching `PATH`.
    pub blender_path: Option<PathBuf>,
    /// Scheme used when `--naming-scheme` is not given.
    pub naming_scheme: Option<NamingScheme>,
}

impl Config {
    /// Load the config file.
    ///
    /// With `explicit = None` the default location is used and a missing file
    /// yields [`Config::default`]. An explicit path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = default_path();
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }
}

/// Return the path to the default config file.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blendbatch")
        .join("config.toml")
}
