//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgchart/orgchart.toml`
//! 3. Environment variables: `ORGCHART_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "ORGCHART";

/// Unified configuration for orgchart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Chart file used when no `--chart` is given
    pub chart_file: Option<PathBuf>,
    /// Show employee ids next to names when printing the chart
    pub show_ids: bool,
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub chart_file: Option<PathBuf>,
    pub show_ids: Option<bool>,
}

/// Get the XDG config directory for orgchart.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgchart").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgchart.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings from the global config file and `ORGCHART_*` variables.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_with(global_config_path().as_deref(), ENV_PREFIX)
    }

    /// Load settings from an explicit config file and env prefix.
    ///
    /// A missing file is not an error; the layer is skipped.
    pub fn load_with(config_file: Option<&Path>, env_prefix: &str) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, env_prefix)?;
        current.expand_paths();

        Ok(current)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            chart_file: overlay
                .chart_file
                .clone()
                .or_else(|| self.chart_file.clone()),
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
        }
    }

    /// Apply `<PREFIX>_*` environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, prefix: &str) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(prefix).separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("chart_file") {
            settings.chart_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("show_ids") {
            settings.show_ids = val;
        }

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        if let Some(chart) = &self.chart_file {
            self.chart_file = Some(PathBuf::from(expand_path(&chart.to_string_lossy())));
        }
    }

    /// Serialize the effective settings.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }

    /// Commented starter config.
    pub fn template() -> String {
        r#"# orgchart configuration
# Location: $XDG_CONFIG_HOME/orgchart/orgchart.toml
# Every key can be overridden with ORGCHART_<KEY>, e.g. ORGCHART_CHART_FILE.

# Chart file used when --chart is not given
# chart_file = "~/org/chart.toml"

# Show employee ids next to names
show_ids = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_with(None, "ORGCHART_UNIT_DEFAULTS").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_overlay_when_merging_then_overlay_wins_where_set() {
        let base = Settings {
            chart_file: Some(PathBuf::from("/base.toml")),
            show_ids: true,
        };
        let merged = base.merge_with(&RawSettings {
            chart_file: None,
            show_ids: Some(false),
        });
        assert_eq!(merged.chart_file, Some(PathBuf::from("/base.toml")));
        assert!(!merged.show_ids);
    }

    #[test]
    fn given_tilde_in_chart_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            chart_file: Some(PathBuf::from("~/chart.toml")),
            show_ids: false,
        };
        settings.expand_paths();
        let chart = settings.chart_file.unwrap();
        assert!(!chart.to_string_lossy().starts_with('~'));
        assert!(chart.ends_with("chart.toml"));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_config() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(raw.show_ids, Some(false));
        assert_eq!(raw.chart_file, None);
    }
}
