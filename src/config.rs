//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/taxtree/taxtree.toml`
//! 3. Local config: `<dir>/.taxtree.toml` (`-C` directory, or the current one)
//! 4. Environment variables: `TAXTREE_*` prefix
//!
//! Command-line arguments are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

pub const DEFAULT_INPUT: &str = "taxhier_MC.txt";
pub const DEFAULT_OUTPUT: &str = "taxonomy.json";
pub const DEFAULT_INDENT: usize = 2;

/// Unified configuration for taxtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Outline file to read
    pub input: PathBuf,
    /// JSON file to write
    pub output: PathBuf,
    /// Spaces per nesting level in the JSON output
    pub indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            indent: DEFAULT_INDENT,
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// `None` means "not specified in this layer, inherit from below".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub indent: Option<usize>,
}

/// Get the XDG config directory for taxtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "taxtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("taxtree.toml"))
}

/// Get the path to the local config file in a working directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".taxtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Merge overlay config onto self (base): specified values win.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            input: overlay.input.clone().unwrap_or_else(|| self.input.clone()),
            output: overlay
                .output
                .clone()
                .unwrap_or_else(|| self.output.clone()),
            indent: overlay.indent.unwrap_or(self.indent),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the path fields.
    fn expand_paths(&mut self) {
        self.input = expand_path(&self.input);
        self.output = expand_path(&self.output);
    }

    /// Resolve relative paths against `dir`.
    fn anchor_paths(&mut self, dir: &Path) {
        if self.input.is_relative() {
            self.input = dir.join(&self.input);
        }
        if self.output.is_relative() {
            self.output = dir.join(&self.output);
        }
    }

    /// Reject settings that cannot produce the documented output.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.indent == 0 {
            return Err(ApplicationError::Config {
                message: "indent must be at least 1 space".to_string(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `dir` - Working directory holding the local config. When given, relative
    ///   `input`/`output` paths are resolved against it.
    pub fn load(dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        let local_path = local_config_path(dir.unwrap_or_else(|| Path::new(".")));
        if local_path.exists() {
            let raw = load_raw_settings(&local_path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        if let Some(dir) = dir {
            current.anchor_paths(dir);
        }
        current.validate()?;

        Ok(current)
    }

    /// Apply TAXTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TAXTREE")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("input") {
            settings.input = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("output") {
            settings.output = PathBuf::from(val);
        }
        match config.get::<usize>("indent") {
            Ok(val) => settings.indent = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Apply command-line overrides on top of loaded settings.
    pub fn with_overrides(
        mut self,
        input: Option<&Path>,
        output: Option<&Path>,
        indent: Option<usize>,
    ) -> Result<Self, ApplicationError> {
        if let Some(input) = input {
            self.input = input.to_path_buf();
        }
        if let Some(output) = output {
            self.output = output.to_path_buf();
        }
        if let Some(indent) = indent {
            self.indent = indent;
        }
        self.validate()?;
        Ok(self)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# taxtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/taxtree/taxtree.toml
#   Local:  <dir>/.taxtree.toml      (dir = -C argument or current directory)
#   Env:    TAXTREE_INPUT, TAXTREE_OUTPUT, TAXTREE_INDENT
#   CLI:    convert [INPUT] --output FILE --indent N

# Outline file to convert
# input = "taxhier_MC.txt"

# JSON file to write
# output = "taxonomy.json"

# Spaces per nesting level in the JSON output
# indent = 2
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
