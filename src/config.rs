//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coven/coven.toml`
//! 3. Local config: path passed to [`Settings::load`]
//! 4. Environment variables: `COVEN_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::AttachPolicy;
use crate::errors::{CovenError, CovenResult};

/// Placeholder shown for vampires created without a name.
pub const DEFAULT_UNNAMED_LABEL: &str = "<unnamed>";

/// Unified configuration for a coven.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// How `add_offspring` handles double attachment and cycles
    pub attach_policy: AttachPolicy,
    /// Label used when rendering unnamed vampires
    pub unnamed_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            attach_policy: AttachPolicy::default(),
            unnamed_label: DEFAULT_UNNAMED_LABEL.to_string(),
        }
    }
}

/// Get the XDG config directory for coven.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coven").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coven.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// A missing global file is ignored; a `local` file that does not exist is
    /// an error.
    #[instrument(level = "debug")]
    pub fn load(local: Option<&Path>) -> CovenResult<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("attach_policy", defaults.attach_policy.as_str())
            .map_err(config_err)?
            .set_default("unnamed_label", defaults.unnamed_label)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            debug!(path = %global_path.display(), "global config");
            builder = builder.add_source(File::from(global_path).required(false));
        }

        if let Some(local_path) = local {
            debug!(path = %local_path.display(), "local config");
            builder = builder.add_source(File::from(local_path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("COVEN")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> CovenResult<String> {
        toml::to_string_pretty(self).map_err(|e| CovenError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# coven configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/coven/coven.toml
#   Local:  file passed to Settings::load
#   Env:    COVEN_* environment variables

# "strict" rejects double attachment and cycles in add_offspring,
# "permissive" overwrites the creator and leaves checks to traversal
# attach_policy = "strict"

# Label for vampires created without a name
# unnamed_label = "<unnamed>"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> CovenError {
    CovenError::Config {
        message: e.to_string(),
    }
}
