//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (the stock `cmake` / `build` / `GraphicalApp` setup)
//! 2. Global config: `$XDG_CONFIG_HOME/gl-helper/gl-helper.toml`
//! 3. Local config: `<project_dir>/.gl-helper.toml`
//! 4. Environment variables: `GL_HELPER_*` prefix
//!
//! Every field a higher layer names replaces the lower value.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{expand_env_vars, Toolchain, VariantCatalog};

const APP_NAME: &str = "gl-helper";
const LOCAL_CONFIG_FILE: &str = ".gl-helper.toml";
const ENV_PREFIX: &str = "GL_HELPER";

/// Unified configuration for gl-helper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Build tool executable (default: cmake)
    pub build_tool: String,
    /// Build output directory (default: build)
    pub build_dir: PathBuf,
    /// Program and flags used to delete the build directory (default: ["rm", "-rf"])
    pub remove_command: Vec<String>,
    /// Application binary name inside the build directory (default: GraphicalApp)
    pub binary_name: String,
    /// Known build variants; the binary launched is `<binary_name>-<variant>`
    pub variants: Vec<String>,
    /// Variant used by `run` without `--type`
    pub default_variant: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            build_tool: "cmake".into(),
            build_dir: PathBuf::from("build"),
            remove_command: vec!["rm".into(), "-rf".into()],
            binary_name: "GraphicalApp".into(),
            variants: vec!["opengl".into(), "vulkan".into()],
            default_variant: Some("opengl".into()),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub build_tool: Option<String>,
    pub build_dir: Option<PathBuf>,
    pub remove_command: Option<Vec<String>>,
    pub binary_name: Option<String>,
    pub variants: Option<Vec<String>>,
    pub default_variant: Option<String>,
}

/// Get the XDG config directory for gl-helper.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{APP_NAME}.toml")))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Directory holding the optional `.gl-helper.toml`
    pub fn load(project_dir: &Path) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        let local_path = local_config_path(project_dir);
        if local_path.exists() {
            debug!("local config: {}", local_path.display());
            current = current.merge_with(&load_raw_settings(&local_path)?);
        }

        current = current.merge_with(&Self::env_overrides()?);
        current.expand_paths();

        Ok(current)
    }

    /// Merge overlay onto self (base): every field the overlay names wins.
    ///
    /// Replacing `variants` without naming `default_variant` re-targets the
    /// default to the first listed variant (none when the list is empty), since
    /// TOML cannot express clearing an option.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        let variants = overlay
            .variants
            .clone()
            .unwrap_or_else(|| self.variants.clone());
        let default_variant = match (&overlay.default_variant, &overlay.variants) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(listed)) => listed.first().cloned(),
            (None, None) => self.default_variant.clone(),
        };

        Self {
            build_tool: overlay
                .build_tool
                .clone()
                .unwrap_or_else(|| self.build_tool.clone()),
            build_dir: overlay
                .build_dir
                .clone()
                .unwrap_or_else(|| self.build_dir.clone()),
            remove_command: overlay
                .remove_command
                .clone()
                .unwrap_or_else(|| self.remove_command.clone()),
            binary_name: overlay
                .binary_name
                .clone()
                .unwrap_or_else(|| self.binary_name.clone()),
            variants,
            default_variant,
        }
    }

    /// Read `GL_HELPER_*` environment variables as an overlay.
    ///
    /// List-valued keys (`variants`, `remove_command`) are comma separated.
    /// List splitting only happens with `try_parsing` enabled; scalars parsed
    /// as numbers or booleans still deserialize into the `String` fields.
    fn env_overrides() -> ApplicationResult<RawSettings> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("variants")
                    .with_list_parse_key("remove_command"),
            )
            .build()
            .map_err(config_err)?;

        config.try_deserialize().map_err(config_err)
    }

    /// Expand `~` and `$VAR` in the build directory.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.build_dir.to_string_lossy().as_ref());
        self.build_dir = PathBuf::from(expanded);
    }

    /// Validated toolchain for the command mapping.
    pub fn toolchain(&self) -> ApplicationResult<Toolchain> {
        Toolchain::new(
            self.build_tool.clone(),
            self.build_dir.clone(),
            self.remove_command.clone(),
            self.binary_name.clone(),
        )
        .map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }

    /// Validated variant catalog.
    pub fn catalog(&self) -> ApplicationResult<VariantCatalog> {
        VariantCatalog::new(&self.variants, self.default_variant.as_deref()).map_err(|e| {
            ApplicationError::Config {
                message: e.to_string(),
            }
        })
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# gl-helper configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/gl-helper/gl-helper.toml
#   Local:  ./.gl-helper.toml
#   Env:    GL_HELPER_* environment variables (lists comma separated)
#
# Each setting found in a higher layer replaces the lower one.

# Build tool executable
# build_tool = "cmake"

# Build output directory (~ and $VAR are expanded)
# build_dir = "build"

# Program and flags used by `clean`, followed by the build directory
# remove_command = ["rm", "-rf"]

# Application binary inside the build directory
# binary_name = "GraphicalApp"

# Build variants selectable with `run --type`; `run` launches <binary_name>-<variant>.
# An empty list launches the bare binary name.
# If variants is set without default_variant, the first entry becomes the default.
# variants = ["opengl", "vulkan"]
# default_variant = "opengl"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
