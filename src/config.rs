//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/streamlab/streamlab.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `STREAMLAB_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for streamlab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Separator printed between elements (default: tab)
    pub separator: String,
    /// Run matching examples on the rayon pool (default: true)
    pub parallel: bool,
    /// Worker threads for parallel examples (default: rayon's choice)
    pub threads: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            separator: "\t".into(),
            parallel: true,
            threads: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub separator: Option<String>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
}

/// Get the XDG config directory for streamlab.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "streamlab").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("streamlab.toml"))
}

/// Replace the escapes `\t`, `\n` and `\\` with the characters they name.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
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

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            parallel: overlay.parallel.unwrap_or(self.parallel),
            threads: overlay.threads.or(self.threads),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file; unlike the global file it must exist
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_with(
            global.as_deref(),
            local,
            Environment::with_prefix("STREAMLAB").prefix_separator("_"),
        )
    }

    /// Load settings from explicit sources.
    ///
    /// `env` is the environment source, injectable so callers can supply a
    /// fixed variable map instead of the process environment.
    pub fn load_with(
        global: Option<&Path>,
        local: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(path) = global {
            debug!("load_with: global={}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 3. Local config
        if let Some(path) = local {
            debug!("load_with: local={}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        current.separator = unescape(&current.separator);
        current.validate()?;
        Ok(current)
    }

    /// Apply environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("separator") {
            settings.separator = val;
        }
        if let Ok(val) = config.get_bool("parallel") {
            settings.parallel = val;
        }
        match config.get_int("threads") {
            Ok(val) => {
                settings.threads = Some(usize::try_from(val).map_err(|_| {
                    ApplicationError::Config {
                        message: format!("threads must not be negative: {val}"),
                    }
                })?);
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.threads == Some(0) {
            return Err(ApplicationError::Config {
                message: "threads must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

/// Environment source backed by a fixed map instead of the process env.
pub fn env_from_map(vars: HashMap<String, String>) -> Environment {
    Environment::with_prefix("STREAMLAB")
        .prefix_separator("_")
        .source(Some(vars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_tab_and_newline() {
        assert_eq!(unescape(r"a\tb\nc"), "a\tb\nc");
        assert_eq!(unescape(r"\\t"), r"\t");
        assert_eq!(unescape(r"x\"), r"x\");
    }

    #[test]
    fn merge_overlay_wins() {
        let raw = RawSettings {
            separator: Some(",".into()),
            parallel: None,
            threads: Some(2),
        };
        let merged = Settings::default().merge_with(&raw);
        assert_eq!(merged.separator, ",");
        assert!(merged.parallel);
        assert_eq!(merged.threads, Some(2));
    }
}
