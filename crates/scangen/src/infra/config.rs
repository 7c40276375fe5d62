//! Configuration management utilities.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::app::presets::ScanPreset;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".scangen/config.toml";

/// Layered configuration loaded from defaults, user, workspace, explicit file, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
    /// Extra line templates keyed by name.
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
    /// Extra presets, or replacements for built-in ones with the same name.
    #[serde(default)]
    pub presets: Vec<ScanPreset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Output {
    #[serde(default)]
    directory: Option<PathBuf>,
}

impl Output {
    fn default_directory() -> PathBuf {
        PathBuf::from(".")
    }

    /// Directory generated files are written into.
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(Self::default_directory)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Logging {
    #[serde(default)]
    level: Option<String>,
}

impl Logging {
    fn default_level() -> &'static str {
        "info"
    }

    pub fn level(&self) -> String {
        self.level
            .clone()
            .unwrap_or_else(|| Self::default_level().to_owned())
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    output_dir: Option<String>,
    log_level: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            output_dir: env::var("SCANGEN_OUTPUT_DIR").ok(),
            log_level: env::var("SCANGEN_LOG_LEVEL").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(output_dir: &str, log_level: &str) -> Self {
        Self {
            output_dir: Some(output_dir.to_owned()),
            log_level: Some(log_level.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config,
    /// an optional explicit file, and env overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        let explicit = match explicit {
            Some(path) if !path.exists() => {
                anyhow::bail!("config file not found: {}", path.display())
            }
            other => other.map(Path::to_path_buf),
        };
        Self::load_with_layers(global, workspace, explicit, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        explicit: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        for path in [global, workspace, explicit].into_iter().flatten() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config layer");
                layers.push(Self::from_file(&path)?);
            }
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            output: merge_output(self.output, other.output),
            logging: merge_logging(self.logging, other.logging),
            templates: merge_templates(self.templates, other.templates),
            presets: merge_presets(self.presets, other.presets),
        }
    }
}

fn merge_output(mut base: Output, overlay: Output) -> Output {
    if let Some(value) = overlay.directory {
        base.directory = Some(value);
    }
    base
}

fn merge_logging(mut base: Logging, overlay: Logging) -> Logging {
    if let Some(value) = overlay.level {
        base.level = Some(value);
    }
    base
}

fn merge_templates(
    mut base: BTreeMap<String, String>,
    overlay: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    base.extend(overlay);
    base
}

fn merge_presets(mut base: Vec<ScanPreset>, overlay: Vec<ScanPreset>) -> Vec<ScanPreset> {
    for preset in overlay {
        match base.iter_mut().find(|existing| existing.name == preset.name) {
            Some(existing) => *existing = preset,
            None => base.push(preset),
        }
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("scangen/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(output_dir) = env.output_dir {
        config.output.directory = Some(PathBuf::from(output_dir));
    }
    if let Some(log_level) = env.log_level {
        config.logging.level = Some(log_level);
    }
    config
}
